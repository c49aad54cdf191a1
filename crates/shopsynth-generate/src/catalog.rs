//! Fixed lookup values and numeric bounds used by the generators.

use std::ops::RangeInclusive;

/// Ordered (city, state) pairs seeding the location table.
pub const LOCATION_CATALOG: &[(&str, &str)] = &[
    ("Delhi", "Delhi"),
    ("Jaipur", "Rajasthan"),
    ("Chandigarh", "Chandigarh"),
    ("Lucknow", "Uttar Pradesh"),
    ("Bengaluru", "Karnataka"),
    ("Chennai", "Tamil Nadu"),
    ("Hyderabad", "Telangana"),
    ("Kochi", "Kerala"),
    ("Kolkata", "West Bengal"),
    ("Bhubaneswar", "Odisha"),
    ("Patna", "Bihar"),
    ("Ranchi", "Jharkhand"),
    ("Mumbai", "Maharashtra"),
    ("Ahmedabad", "Gujarat"),
    ("Pune", "Maharashtra"),
    ("Goa", "Goa"),
];

pub const COUNTRY: &str = "India";

pub const LATITUDE: RangeInclusive<f64> = 8.0..=37.0;
pub const LONGITUDE: RangeInclusive<f64> = 68.0..=97.0;
pub const COORDINATE_DECIMALS: i32 = 6;

pub const GENDERS: &[&str] = &["Male", "Female"];
pub const CUSTOMER_AGE: RangeInclusive<u32> = 18..=80;

pub const ZIP_CODE: RangeInclusive<u32> = 100_000..=999_999;

pub const PRODUCT_CATEGORIES: &[&str] = &["Electronics", "Clothing", "Groceries", "Beverages"];
pub const STOCK_QUANTITY: RangeInclusive<u32> = 10..=100;

pub const SERVICE_AREAS: &[&str] = &["North India", "South India", "East India", "West India"];

pub const ORDER_STATUSES: &[&str] = &["Pending", "Shipped", "Delivered", "Cancelled"];
pub const ORDER_TOTAL: RangeInclusive<f64> = 500.0..=20_000.0;

/// Largest configurable product price.
pub const MAX_PRICE: f64 = 1_000_000_000_000.0;

pub const ITEM_QUANTITY: RangeInclusive<u32> = 1..=3;

pub const PAYMENT_METHODS: &[&str] = &["Credit Card", "Debit Card", "UPI", "Cash on Delivery"];
pub const PAYMENT_STATUSES: &[&str] = &["Completed", "Failed", "Pending"];

pub const DELIVERY_STATUSES: &[&str] = &["Shipped", "In Transit", "Delivered"];

pub const RETURN_REASONS: &[&str] = &["Damaged", "Wrong Item", "Not Satisfied"];

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn round_currency(value: f64) -> f64 {
    round_to(value, 2)
}
