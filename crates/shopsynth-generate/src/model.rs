use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shopsynth_core::TableName;

use crate::catalog::MAX_PRICE;
use crate::checks::IntegrityReport;
use crate::errors::GenerationError;

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Directory where the CSV tables are written.
    pub out_dir: PathBuf,
    /// Seed for every random choice; drawn from OS entropy when absent.
    pub seed: Option<u64>,
    /// Date treated as "today" by the date ranges; local date when absent.
    pub reference_date: Option<NaiveDate>,
    /// Records requested per table.
    pub counts: RecordCounts,
    /// Bounds for product prices.
    pub price_range: PriceRange,
    /// Optional path for a JSON copy of the generation report.
    pub report_path: Option<PathBuf>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("data"),
            seed: None,
            reference_date: None,
            counts: RecordCounts::default(),
            price_range: PriceRange::default(),
            report_path: None,
        }
    }
}

/// Requested record counts. Locations have no count: they always match the
/// city catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordCounts {
    pub customers: usize,
    pub customer_addresses: usize,
    pub products: usize,
    pub delivery_partners: usize,
    pub orders: usize,
    pub order_items: usize,
    pub payments: usize,
    pub deliveries: usize,
    pub returns: usize,
}

impl Default for RecordCounts {
    fn default() -> Self {
        Self {
            customers: 100,
            customer_addresses: 100,
            products: 20,
            delivery_partners: 5,
            orders: 500,
            order_items: 1000,
            payments: 500,
            deliveries: 500,
            returns: 100,
        }
    }
}

impl RecordCounts {
    /// Requested count for a table; `None` for the fixed-size location table.
    pub fn get(&self, table: TableName) -> Option<usize> {
        match table {
            TableName::Locations => None,
            TableName::Customers => Some(self.customers),
            TableName::CustomerAddresses => Some(self.customer_addresses),
            TableName::Products => Some(self.products),
            TableName::DeliveryPartners => Some(self.delivery_partners),
            TableName::Orders => Some(self.orders),
            TableName::OrderItems => Some(self.order_items),
            TableName::Payments => Some(self.payments),
            TableName::Deliveries => Some(self.deliveries),
            TableName::Returns => Some(self.returns),
        }
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        for table in TableName::ALL {
            if self.get(table) == Some(0) {
                return Err(GenerationError::InvalidConfig(format!(
                    "record count for {table} must be positive"
                )));
            }
        }
        Ok(())
    }
}

/// Inclusive product price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl Default for PriceRange {
    /// Every product costs 100 unless configured otherwise.
    fn default() -> Self {
        Self {
            min: 100.0,
            max: 100.0,
        }
    }
}

impl PriceRange {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(GenerationError::InvalidConfig(
                "price range bounds must be finite".to_string(),
            ));
        }
        if self.min < 0.0 {
            return Err(GenerationError::InvalidConfig(
                "price range min must be >= 0".to_string(),
            ));
        }
        if self.min > self.max {
            return Err(GenerationError::InvalidConfig(format!(
                "price range min ({}) must be <= max ({})",
                self.min, self.max
            )));
        }
        if self.max > MAX_PRICE {
            return Err(GenerationError::InvalidConfig(format!(
                "price range max ({}) must be <= {MAX_PRICE}",
                self.max
            )));
        }
        Ok(())
    }
}

/// Summary of a generated table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: TableName,
    pub rows_requested: u64,
    pub rows_generated: u64,
    pub bytes_written: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub reference_date: NaiveDate,
    pub out_dir: PathBuf,
    pub tables: Vec<TableReport>,
    pub bytes_written: u64,
    pub duration_ms: u64,
    pub integrity: IntegrityReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_counts() {
        let counts = RecordCounts::default();
        assert_eq!(counts.get(TableName::Locations), None);
        assert_eq!(counts.get(TableName::Customers), Some(100));
        assert_eq!(counts.get(TableName::OrderItems), Some(1000));
        assert_eq!(counts.get(TableName::DeliveryPartners), Some(5));
        assert_eq!(GenerateOptions::default().out_dir, PathBuf::from("data"));
    }

    #[test]
    fn zero_count_is_rejected() {
        let counts = RecordCounts {
            payments: 0,
            ..RecordCounts::default()
        };
        let err = counts.validate().expect_err("zero count");
        assert!(matches!(err, GenerationError::InvalidConfig(message) if message.contains("payments")));
    }

    #[test]
    fn inverted_price_range_is_rejected() {
        let range = PriceRange {
            min: 50.0,
            max: 10.0,
        };
        assert!(matches!(
            range.validate(),
            Err(GenerationError::InvalidConfig(_))
        ));
        assert!(PriceRange::default().validate().is_ok());
        assert!(
            PriceRange {
                min: f64::NAN,
                max: 1.0
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn prices_beyond_money_bound_are_rejected() {
        for max in [1e307, f64::MAX, MAX_PRICE * 10.0] {
            let range = PriceRange { min: 0.0, max };
            assert!(
                matches!(range.validate(), Err(GenerationError::InvalidConfig(_))),
                "max {max} accepted"
            );
        }
        assert!(
            PriceRange {
                min: MAX_PRICE,
                max: MAX_PRICE
            }
            .validate()
            .is_ok()
        );
    }

    #[test]
    fn partial_options_fill_defaults() {
        let options: GenerateOptions = serde_json::from_str(
            r#"{"seed": 7, "counts": {"orders": 25}, "price_range": {"min": 10.0, "max": 99.5}}"#,
        )
        .expect("parse options");
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.counts.orders, 25);
        assert_eq!(options.counts.customers, 100);
        assert_eq!(options.price_range.max, 99.5);
        assert_eq!(options.out_dir, PathBuf::from("data"));
    }
}
