//! Typed records for the ten dataset tables.
//!
//! Field order in [`Record::values`] is the export column order declared by
//! [`shopsynth_core::DatasetSchema::ecommerce`].

use chrono::NaiveDate;
use serde::Serialize;
use shopsynth_core::TableName;
use uuid::Uuid;

use crate::value::GeneratedValue;

/// A row of one dataset table.
pub trait Record {
    const TABLE: TableName;

    /// Primary key.
    fn id(&self) -> i64;

    /// Field values in column order.
    fn values(&self) -> Vec<GeneratedValue>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub location_id: i64,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Record for Location {
    const TABLE: TableName = TableName::Locations;

    fn id(&self) -> i64 {
        self.location_id
    }

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.location_id.into(),
            (&self.city).into(),
            (&self.state).into(),
            (&self.country).into(),
            self.latitude.into(),
            self.longitude.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    pub gender: String,
    pub email: String,
    pub dob: NaiveDate,
    pub phone_number: String,
    pub joining_date: NaiveDate,
}

impl Record for Customer {
    const TABLE: TableName = TableName::Customers;

    fn id(&self) -> i64 {
        self.customer_id
    }

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.customer_id.into(),
            (&self.name).into(),
            (&self.gender).into(),
            (&self.email).into(),
            self.dob.into(),
            (&self.phone_number).into(),
            self.joining_date.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerAddress {
    pub address_id: i64,
    pub customer_id: i64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: u32,
    pub country: String,
}

impl Record for CustomerAddress {
    const TABLE: TableName = TableName::CustomerAddresses;

    fn id(&self) -> i64 {
        self.address_id
    }

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.address_id.into(),
            self.customer_id.into(),
            (&self.address).into(),
            (&self.city).into(),
            (&self.state).into(),
            self.zip_code.into(),
            (&self.country).into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub product_id: i64,
    pub product_name: String,
    pub category: String,
    pub price: f64,
    pub stock_quantity: u32,
}

impl Record for Product {
    const TABLE: TableName = TableName::Products;

    fn id(&self) -> i64 {
        self.product_id
    }

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.product_id.into(),
            (&self.product_name).into(),
            (&self.category).into(),
            self.price.into(),
            self.stock_quantity.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryPartner {
    pub delivery_partner_id: i64,
    pub partner_name: String,
    pub contact_number: String,
    pub service_area: String,
}

impl Record for DeliveryPartner {
    const TABLE: TableName = TableName::DeliveryPartners;

    fn id(&self) -> i64 {
        self.delivery_partner_id
    }

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.delivery_partner_id.into(),
            (&self.partner_name).into(),
            (&self.contact_number).into(),
            (&self.service_area).into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub order_id: i64,
    pub customer_id: i64,
    pub order_date: NaiveDate,
    pub order_status: String,
    pub total_value: f64,
    pub address_id: i64,
}

impl Record for Order {
    const TABLE: TableName = TableName::Orders;

    fn id(&self) -> i64 {
        self.order_id
    }

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.order_id.into(),
            self.customer_id.into(),
            self.order_date.into(),
            (&self.order_status).into(),
            self.total_value.into(),
            self.address_id.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub order_item_id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: u32,
    pub price_per_unit: f64,
}

impl Record for OrderItem {
    const TABLE: TableName = TableName::OrderItems;

    fn id(&self) -> i64 {
        self.order_item_id
    }

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.order_item_id.into(),
            self.order_id.into(),
            self.product_id.into(),
            self.quantity.into(),
            self.price_per_unit.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    pub payment_id: i64,
    pub order_id: i64,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    pub payment_status: String,
    pub payment_amount: f64,
}

impl Record for Payment {
    const TABLE: TableName = TableName::Payments;

    fn id(&self) -> i64 {
        self.payment_id
    }

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.payment_id.into(),
            self.order_id.into(),
            self.payment_date.into(),
            (&self.payment_method).into(),
            (&self.payment_status).into(),
            self.payment_amount.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delivery {
    pub delivery_id: i64,
    pub order_id: i64,
    pub delivery_date: NaiveDate,
    pub delivery_status: String,
    pub delivery_partner_id: i64,
    pub tracking_number: Uuid,
}

impl Record for Delivery {
    const TABLE: TableName = TableName::Deliveries;

    fn id(&self) -> i64 {
        self.delivery_id
    }

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.delivery_id.into(),
            self.order_id.into(),
            self.delivery_date.into(),
            (&self.delivery_status).into(),
            self.delivery_partner_id.into(),
            self.tracking_number.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Return {
    pub return_id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub return_date: NaiveDate,
    pub return_reason: String,
}

impl Record for Return {
    const TABLE: TableName = TableName::Returns;

    fn id(&self) -> i64 {
        self.return_id
    }

    fn values(&self) -> Vec<GeneratedValue> {
        vec![
            self.return_id.into(),
            self.order_id.into(),
            self.product_id.into(),
            self.return_date.into(),
            (&self.return_reason).into(),
        ]
    }
}
