use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use shopsynth_core::{DatasetSchema, TableName};

use crate::dataset::Dataset;
use crate::foreign::index_by_id;

/// Counter for one integrity rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStats {
    pub checked: u64,
    pub violations: u64,
}

impl CheckStats {
    fn record(&mut self, ok: bool) {
        self.checked += 1;
        if !ok {
            self.violations += 1;
        }
    }
}

/// Outcome of the integrity checks over a finished dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// Keyed by `<table>.<column>`.
    pub foreign_keys: BTreeMap<String, CheckStats>,
    /// Keyed by table; a violation is a row whose id is not its 1-based position.
    pub primary_keys: BTreeMap<String, CheckStats>,
    pub payment_amounts: CheckStats,
    pub order_item_prices: CheckStats,
    pub address_locations: CheckStats,
}

impl IntegrityReport {
    pub fn violations(&self) -> u64 {
        self.foreign_keys
            .values()
            .chain(self.primary_keys.values())
            .chain([
                &self.payment_amounts,
                &self.order_item_prices,
                &self.address_locations,
            ])
            .map(|stats| stats.violations)
            .sum()
    }

    pub fn is_clean(&self) -> bool {
        self.violations() == 0
    }
}

/// Verify referential integrity and the derived-value rules of a dataset.
pub fn check_dataset(schema: &DatasetSchema, dataset: &Dataset) -> IntegrityReport {
    let mut report = IntegrityReport::default();

    for table in &schema.tables {
        let mut stats = CheckStats::default();
        for (idx, id) in dataset.ids(table.name).into_iter().enumerate() {
            stats.record(id == idx as i64 + 1);
        }
        report.primary_keys.insert(table.name.to_string(), stats);
    }

    for table in &schema.tables {
        if table.foreign_keys.is_empty() {
            continue;
        }
        let rows = dataset.rows(table.name);
        for fk in &table.foreign_keys {
            let parent_ids: HashSet<i64> =
                dataset.ids(fk.referenced_table).into_iter().collect();
            let mut stats = CheckStats::default();
            if let Some(idx) = table.column_index(&fk.column) {
                for row in &rows {
                    let resolved = row
                        .get(idx)
                        .and_then(|value| value.as_i64())
                        .is_some_and(|id| parent_ids.contains(&id));
                    stats.record(resolved);
                }
            }
            report
                .foreign_keys
                .insert(format!("{}.{}", table.name, fk.column), stats);
        }
    }

    let orders = index_by_id(dataset.orders());
    for payment in dataset.payments() {
        let matches = orders
            .get(&payment.order_id)
            .is_some_and(|order| order.total_value == payment.payment_amount);
        report.payment_amounts.record(matches);
    }

    let products = index_by_id(dataset.products());
    for item in dataset.order_items() {
        let matches = products
            .get(&item.product_id)
            .is_some_and(|product| product.price == item.price_per_unit);
        report.order_item_prices.record(matches);
    }

    let places: HashSet<(&str, &str, &str)> = dataset
        .locations()
        .iter()
        .map(|location| {
            (
                location.city.as_str(),
                location.state.as_str(),
                location.country.as_str(),
            )
        })
        .collect();
    for address in dataset.customer_addresses() {
        let key = (
            address.city.as_str(),
            address.state.as_str(),
            address.country.as_str(),
        );
        report.address_locations.record(places.contains(&key));
    }

    report
}

/// Tables whose primary key or foreign key checks reported a violation.
pub fn failing_tables(report: &IntegrityReport) -> Vec<TableName> {
    let mut tables: Vec<TableName> = report
        .primary_keys
        .iter()
        .chain(report.foreign_keys.iter())
        .filter(|(_, stats)| stats.violations > 0)
        .filter_map(|(key, _)| key.split('.').next().and_then(TableName::parse))
        .collect();
    tables.sort();
    tables.dedup();
    tables
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::builder::DatasetBuilder;
    use crate::model::RecordCounts;

    fn full_builder(seed: u64) -> DatasetBuilder {
        let mut builder = DatasetBuilder::with_seed(seed)
            .reference_date(NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid date"));
        let counts = RecordCounts {
            customers: 10,
            customer_addresses: 12,
            products: 6,
            delivery_partners: 3,
            orders: 40,
            order_items: 80,
            payments: 40,
            deliveries: 40,
            returns: 15,
        };
        for table in TableName::ALL {
            builder
                .generate(table, counts.get(table).unwrap_or(0))
                .expect("generate table");
        }
        builder
    }

    #[test]
    fn generated_dataset_is_clean() {
        let builder = full_builder(5);
        let report = check_dataset(builder.schema(), builder.dataset());
        assert!(report.is_clean(), "violations: {report:?}");
        assert_eq!(report.foreign_keys.len(), 10);
        assert_eq!(report.foreign_keys["returns.product_id"].checked, 15);
        assert_eq!(report.payment_amounts.checked, 40);
        assert_eq!(report.order_item_prices.checked, 80);
        assert_eq!(report.address_locations.checked, 12);
        assert_eq!(report.primary_keys["locations"].checked, 16);
    }

    #[test]
    fn dangling_reference_is_reported() {
        let builder = full_builder(8);
        let mut dataset = builder.dataset().clone();
        dataset.payments[0].order_id = 10_000;
        dataset.payments[1].payment_amount += 1.0;

        let report = check_dataset(builder.schema(), &dataset);
        assert_eq!(report.foreign_keys["payments.order_id"].violations, 1);
        assert_eq!(report.payment_amounts.violations, 2);
        assert_eq!(failing_tables(&report), vec![TableName::Payments]);
    }

    #[test]
    fn out_of_sequence_ids_are_reported() {
        let builder = full_builder(13);
        let mut dataset = builder.dataset().clone();
        dataset.products[2].product_id = 99;

        let report = check_dataset(builder.schema(), &dataset);
        assert_eq!(report.primary_keys["products"].violations, 1);
        assert!(!report.is_clean());
    }
}
