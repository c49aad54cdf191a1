use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::graph::build_dependency_graph_report;
use crate::schema::{ColumnType, DatasetSchema, TableName};

/// Validate internal consistency of a dataset schema.
///
/// This checks:
/// - duplicate tables/columns
/// - the primary key is the first column and an integer
/// - foreign key columns, referenced targets and sourcing tables exist
/// - the dependency graph is acyclic
pub fn validate_schema(schema: &DatasetSchema) -> Result<()> {
    let mut catalog: BTreeMap<TableName, BTreeSet<&str>> = BTreeMap::new();

    for table in &schema.tables {
        if catalog.contains_key(&table.name) {
            return Err(Error::InvalidSchema(format!(
                "duplicate table name: {}",
                table.name
            )));
        }

        let mut columns = BTreeSet::new();
        for column in &table.columns {
            if !columns.insert(column.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate column name: {}.{}",
                    table.name, column.name
                )));
            }
        }

        match table.columns.first() {
            Some(first)
                if first.name == table.primary_key
                    && first.column_type == ColumnType::Integer => {}
            _ => {
                return Err(Error::InvalidSchema(format!(
                    "primary key of {} must be its first integer column",
                    table.name
                )));
            }
        }

        catalog.insert(table.name, columns);
    }

    for table in &schema.tables {
        let columns = &catalog[&table.name];

        for fk in &table.foreign_keys {
            if !columns.contains(fk.column.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "foreign key column not found: {}.{}",
                    table.name, fk.column
                )));
            }

            let referenced = catalog.get(&fk.referenced_table).ok_or_else(|| {
                Error::InvalidSchema(format!(
                    "foreign key {}.{} references missing table {}",
                    table.name, fk.column, fk.referenced_table
                ))
            })?;
            if !referenced.contains(fk.referenced_column.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "foreign key {}.{} references missing column {}.{}",
                    table.name, fk.column, fk.referenced_table, fk.referenced_column
                )));
            }

            if let Some(source) = fk.sourced_from {
                let source_columns = catalog.get(&source).ok_or_else(|| {
                    Error::InvalidSchema(format!(
                        "foreign key {}.{} is sourced from missing table {}",
                        table.name, fk.column, source
                    ))
                })?;
                if !source_columns.contains(fk.column.as_str()) {
                    return Err(Error::InvalidSchema(format!(
                        "sourcing table {} has no column {}",
                        source, fk.column
                    )));
                }
            }
        }

        for lookup in &table.lookups {
            if !catalog.contains_key(lookup) {
                return Err(Error::InvalidSchema(format!(
                    "{} looks up missing table {}",
                    table.name, lookup
                )));
            }
        }
    }

    let report = build_dependency_graph_report(schema);
    if let Some(cycle) = report.cycle {
        return Err(Error::Cycle(
            cycle.into_iter().map(|table| table.to_string()).collect(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ecommerce_schema_is_valid() {
        validate_schema(&DatasetSchema::ecommerce()).expect("built-in schema validates");
    }

    #[test]
    fn rejects_fk_to_missing_column() {
        let mut schema = DatasetSchema::ecommerce();
        let orders = schema
            .tables
            .iter_mut()
            .find(|table| table.name == TableName::Orders)
            .expect("orders");
        orders.foreign_keys[0].referenced_column = "id".to_string();

        let err = validate_schema(&schema).expect_err("dangling fk column");
        assert!(matches!(err, Error::InvalidSchema(message) if message.contains("customers.id")));
    }

    #[test]
    fn rejects_duplicate_columns() {
        let mut schema = DatasetSchema::ecommerce();
        let products = &mut schema.tables[3];
        let duplicate = products.columns[1].clone();
        products.columns.push(duplicate);

        assert!(matches!(
            validate_schema(&schema),
            Err(Error::InvalidSchema(_))
        ));
    }

    #[test]
    fn rejects_dependency_cycle() {
        let mut schema = DatasetSchema::ecommerce();
        let customers = schema
            .tables
            .iter_mut()
            .find(|table| table.name == TableName::Customers)
            .expect("customers");
        customers.lookups.push(TableName::Orders);

        assert!(matches!(validate_schema(&schema), Err(Error::Cycle(_))));
    }
}
