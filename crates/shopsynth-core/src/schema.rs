use std::fmt;

use serde::{Deserialize, Serialize};

/// The ten tables of the e-commerce dataset.
///
/// Declaration order is the canonical table order; `Ord` follows it and is
/// used to break ties when deriving the generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Locations,
    Customers,
    CustomerAddresses,
    Products,
    DeliveryPartners,
    Orders,
    OrderItems,
    Payments,
    Deliveries,
    Returns,
}

impl TableName {
    /// Every table, in canonical order.
    pub const ALL: [TableName; 10] = [
        TableName::Locations,
        TableName::Customers,
        TableName::CustomerAddresses,
        TableName::Products,
        TableName::DeliveryPartners,
        TableName::Orders,
        TableName::OrderItems,
        TableName::Payments,
        TableName::Deliveries,
        TableName::Returns,
    ];

    /// Plural snake-case name, also used as the export file stem.
    pub fn as_str(self) -> &'static str {
        match self {
            TableName::Locations => "locations",
            TableName::Customers => "customers",
            TableName::CustomerAddresses => "customer_addresses",
            TableName::Products => "products",
            TableName::DeliveryPartners => "delivery_partners",
            TableName::Orders => "orders",
            TableName::OrderItems => "order_items",
            TableName::Payments => "payments",
            TableName::Deliveries => "deliveries",
            TableName::Returns => "returns",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|table| table.as_str() == value)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical type of a column, which also fixes its CSV rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    /// Fixed-point rendering with `scale` fractional digits.
    Decimal { scale: u8 },
    Date,
    Text,
    Uuid,
}

/// Column metadata for a dataset table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub ordinal_position: u16,
    pub name: String,
    pub column_type: ColumnType,
}

/// A foreign key from a column of the owning table to a parent primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub column: String,
    pub referenced_table: TableName,
    pub referenced_column: String,
    /// Table the value is sampled from when it is not the referenced table
    /// itself (e.g. a return's product id comes from an order item).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sourced_from: Option<TableName>,
}

/// A dataset table: columns in export order plus its dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: TableName,
    pub primary_key: String,
    pub columns: Vec<Column>,
    pub foreign_keys: Vec<ForeignKey>,
    /// Tables read during generation without a foreign key column.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lookups: Vec<TableName>,
}

impl Table {
    /// Tables that must be populated before this one can be generated, in
    /// declaration order (foreign keys first, then lookups), without repeats.
    pub fn dependencies(&self) -> Vec<TableName> {
        let mut deps = Vec::new();
        let sources = self
            .foreign_keys
            .iter()
            .map(|fk| fk.sourced_from.unwrap_or(fk.referenced_table))
            .chain(self.lookups.iter().copied());
        for dep in sources {
            if dep != self.name && !deps.contains(&dep) {
                deps.push(dep);
            }
        }
        deps
    }

    /// Zero-based position of a column in export order.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }
}

/// Full dataset schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    pub tables: Vec<Table>,
}

impl DatasetSchema {
    pub fn table(&self, name: TableName) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// The built-in e-commerce schema.
    pub fn ecommerce() -> Self {
        use ColumnType::{Date, Integer, Text, Uuid};
        const MONEY: ColumnType = ColumnType::Decimal { scale: 2 };
        const COORDINATE: ColumnType = ColumnType::Decimal { scale: 6 };

        let tables = vec![
            TableBuilder::new(TableName::Locations)
                .column("location_id", Integer)
                .column("city", Text)
                .column("state", Text)
                .column("country", Text)
                .column("latitude", COORDINATE)
                .column("longitude", COORDINATE)
                .build(),
            TableBuilder::new(TableName::Customers)
                .column("customer_id", Integer)
                .column("name", Text)
                .column("gender", Text)
                .column("email", Text)
                .column("dob", Date)
                .column("phone_number", Text)
                .column("joining_date", Date)
                .build(),
            TableBuilder::new(TableName::CustomerAddresses)
                .column("address_id", Integer)
                .column("customer_id", Integer)
                .column("address", Text)
                .column("city", Text)
                .column("state", Text)
                .column("zip_code", Integer)
                .column("country", Text)
                .references("customer_id", TableName::Customers, "customer_id")
                .lookup(TableName::Locations)
                .build(),
            TableBuilder::new(TableName::Products)
                .column("product_id", Integer)
                .column("product_name", Text)
                .column("category", Text)
                .column("price", MONEY)
                .column("stock_quantity", Integer)
                .build(),
            TableBuilder::new(TableName::DeliveryPartners)
                .column("delivery_partner_id", Integer)
                .column("partner_name", Text)
                .column("contact_number", Text)
                .column("service_area", Text)
                .build(),
            TableBuilder::new(TableName::Orders)
                .column("order_id", Integer)
                .column("customer_id", Integer)
                .column("order_date", Date)
                .column("order_status", Text)
                .column("total_value", MONEY)
                .column("address_id", Integer)
                .references("customer_id", TableName::Customers, "customer_id")
                .references("address_id", TableName::CustomerAddresses, "address_id")
                .build(),
            TableBuilder::new(TableName::OrderItems)
                .column("order_item_id", Integer)
                .column("order_id", Integer)
                .column("product_id", Integer)
                .column("quantity", Integer)
                .column("price_per_unit", MONEY)
                .references("order_id", TableName::Orders, "order_id")
                .references("product_id", TableName::Products, "product_id")
                .build(),
            TableBuilder::new(TableName::Payments)
                .column("payment_id", Integer)
                .column("order_id", Integer)
                .column("payment_date", Date)
                .column("payment_method", Text)
                .column("payment_status", Text)
                .column("payment_amount", MONEY)
                .references("order_id", TableName::Orders, "order_id")
                .build(),
            TableBuilder::new(TableName::Deliveries)
                .column("delivery_id", Integer)
                .column("order_id", Integer)
                .column("delivery_date", Date)
                .column("delivery_status", Text)
                .column("delivery_partner_id", Integer)
                .column("tracking_number", Uuid)
                .references("order_id", TableName::Orders, "order_id")
                .references(
                    "delivery_partner_id",
                    TableName::DeliveryPartners,
                    "delivery_partner_id",
                )
                .build(),
            TableBuilder::new(TableName::Returns)
                .column("return_id", Integer)
                .column("order_id", Integer)
                .column("product_id", Integer)
                .column("return_date", Date)
                .column("return_reason", Text)
                .references("order_id", TableName::Orders, "order_id")
                .references_via(
                    "product_id",
                    TableName::Products,
                    "product_id",
                    TableName::OrderItems,
                )
                .build(),
        ];

        Self { tables }
    }
}

/// The first column added becomes the primary key.
struct TableBuilder {
    table: Table,
}

impl TableBuilder {
    fn new(name: TableName) -> Self {
        Self {
            table: Table {
                name,
                primary_key: String::new(),
                columns: Vec::new(),
                foreign_keys: Vec::new(),
                lookups: Vec::new(),
            },
        }
    }

    fn column(mut self, name: &str, column_type: ColumnType) -> Self {
        if self.table.columns.is_empty() {
            self.table.primary_key = name.to_string();
        }
        let ordinal_position = self.table.columns.len() as u16 + 1;
        self.table.columns.push(Column {
            ordinal_position,
            name: name.to_string(),
            column_type,
        });
        self
    }

    fn references(self, column: &str, table: TableName, referenced_column: &str) -> Self {
        self.push_fk(column, table, referenced_column, None)
    }

    fn references_via(
        self,
        column: &str,
        table: TableName,
        referenced_column: &str,
        sourced_from: TableName,
    ) -> Self {
        self.push_fk(column, table, referenced_column, Some(sourced_from))
    }

    fn push_fk(
        mut self,
        column: &str,
        table: TableName,
        referenced_column: &str,
        sourced_from: Option<TableName>,
    ) -> Self {
        self.table.foreign_keys.push(ForeignKey {
            column: column.to_string(),
            referenced_table: table,
            referenced_column: referenced_column.to_string(),
            sourced_from,
        });
        self
    }

    fn lookup(mut self, table: TableName) -> Self {
        self.table.lookups.push(table);
        self
    }

    fn build(self) -> Table {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_round_trip_through_parse() {
        for table in TableName::ALL {
            assert_eq!(TableName::parse(table.as_str()), Some(table));
        }
        assert_eq!(TableName::parse("users"), None);
    }

    #[test]
    fn ecommerce_declares_every_table_once() {
        let schema = DatasetSchema::ecommerce();
        let names: Vec<TableName> = schema.tables.iter().map(|table| table.name).collect();
        assert_eq!(names, TableName::ALL.to_vec());
    }

    #[test]
    fn dependencies_follow_sourcing_table() {
        let schema = DatasetSchema::ecommerce();
        let returns = schema.table(TableName::Returns).expect("returns table");
        assert_eq!(
            returns.dependencies(),
            vec![TableName::Orders, TableName::OrderItems]
        );

        let addresses = schema
            .table(TableName::CustomerAddresses)
            .expect("addresses table");
        assert_eq!(
            addresses.dependencies(),
            vec![TableName::Customers, TableName::Locations]
        );
    }

    #[test]
    fn first_column_is_primary_key() {
        let schema = DatasetSchema::ecommerce();
        for table in &schema.tables {
            assert_eq!(table.columns[0].name, table.primary_key);
            assert_eq!(table.columns[0].column_type, ColumnType::Integer);
        }
    }
}
