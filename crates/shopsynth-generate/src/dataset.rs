use shopsynth_core::TableName;

use crate::records::{
    Customer, CustomerAddress, Delivery, DeliveryPartner, Location, Order, OrderItem, Payment,
    Product, Record, Return,
};
use crate::value::GeneratedValue;

/// The ten in-memory tables of a generation run.
///
/// Rows are only appended by [`crate::DatasetBuilder`]; consumers get
/// read-only access.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub(crate) locations: Vec<Location>,
    pub(crate) customers: Vec<Customer>,
    pub(crate) customer_addresses: Vec<CustomerAddress>,
    pub(crate) products: Vec<Product>,
    pub(crate) delivery_partners: Vec<DeliveryPartner>,
    pub(crate) orders: Vec<Order>,
    pub(crate) order_items: Vec<OrderItem>,
    pub(crate) payments: Vec<Payment>,
    pub(crate) deliveries: Vec<Delivery>,
    pub(crate) returns: Vec<Return>,
}

impl Dataset {
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn customer_addresses(&self) -> &[CustomerAddress] {
        &self.customer_addresses
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn delivery_partners(&self) -> &[DeliveryPartner] {
        &self.delivery_partners
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order_items(&self) -> &[OrderItem] {
        &self.order_items
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn returns(&self) -> &[Return] {
        &self.returns
    }

    pub fn len(&self, table: TableName) -> usize {
        match table {
            TableName::Locations => self.locations.len(),
            TableName::Customers => self.customers.len(),
            TableName::CustomerAddresses => self.customer_addresses.len(),
            TableName::Products => self.products.len(),
            TableName::DeliveryPartners => self.delivery_partners.len(),
            TableName::Orders => self.orders.len(),
            TableName::OrderItems => self.order_items.len(),
            TableName::Payments => self.payments.len(),
            TableName::Deliveries => self.deliveries.len(),
            TableName::Returns => self.returns.len(),
        }
    }

    pub fn is_empty(&self, table: TableName) -> bool {
        self.len(table) == 0
    }

    /// Primary keys of a table in creation order.
    pub fn ids(&self, table: TableName) -> Vec<i64> {
        match table {
            TableName::Locations => ids(&self.locations),
            TableName::Customers => ids(&self.customers),
            TableName::CustomerAddresses => ids(&self.customer_addresses),
            TableName::Products => ids(&self.products),
            TableName::DeliveryPartners => ids(&self.delivery_partners),
            TableName::Orders => ids(&self.orders),
            TableName::OrderItems => ids(&self.order_items),
            TableName::Payments => ids(&self.payments),
            TableName::Deliveries => ids(&self.deliveries),
            TableName::Returns => ids(&self.returns),
        }
    }

    /// Every row of a table as values in column order.
    pub fn rows(&self, table: TableName) -> Vec<Vec<GeneratedValue>> {
        match table {
            TableName::Locations => rows(&self.locations),
            TableName::Customers => rows(&self.customers),
            TableName::CustomerAddresses => rows(&self.customer_addresses),
            TableName::Products => rows(&self.products),
            TableName::DeliveryPartners => rows(&self.delivery_partners),
            TableName::Orders => rows(&self.orders),
            TableName::OrderItems => rows(&self.order_items),
            TableName::Payments => rows(&self.payments),
            TableName::Deliveries => rows(&self.deliveries),
            TableName::Returns => rows(&self.returns),
        }
    }
}

fn ids<T: Record>(records: &[T]) -> Vec<i64> {
    records.iter().map(Record::id).collect()
}

fn rows<T: Record>(records: &[T]) -> Vec<Vec<GeneratedValue>> {
    records.iter().map(Record::values).collect()
}
