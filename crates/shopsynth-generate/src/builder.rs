use chrono::{Local, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shopsynth_core::{DatasetSchema, TableName};
use tracing::debug;

use crate::catalog::{self, round_currency, round_to};
use crate::dataset::Dataset;
use crate::errors::GenerationError;
use crate::faker::{self, DateWindow};
use crate::foreign::{pick_parent, pick_value};
use crate::model::{GenerateOptions, PriceRange};
use crate::records::{
    Customer, CustomerAddress, Delivery, DeliveryPartner, Location, Order, OrderItem, Payment,
    Product, Return,
};

/// Builds the dataset one table at a time.
///
/// Each `generate_*` call fills exactly one table and refuses to run while
/// any table it depends on is empty, or when its own table is already
/// populated. A table is only stored once all of its rows were built, so a
/// failed call leaves the dataset unchanged.
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    schema: DatasetSchema,
    seed: u64,
    reference_date: NaiveDate,
    price_range: PriceRange,
    dataset: Dataset,
}

impl DatasetBuilder {
    /// Builder configured from generation options. A missing seed is drawn
    /// from OS entropy, a missing reference date becomes today.
    pub fn new(options: &GenerateOptions) -> Result<Self, GenerationError> {
        options.price_range.validate()?;
        let seed = options.seed.unwrap_or_else(|| rand::rng().random());
        let reference_date = options
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());

        Ok(Self {
            schema: DatasetSchema::ecommerce(),
            seed,
            reference_date,
            price_range: options.price_range,
            dataset: Dataset::default(),
        })
    }

    /// Builder with default options and a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            schema: DatasetSchema::ecommerce(),
            seed,
            reference_date: Local::now().date_naive(),
            price_range: PriceRange::default(),
            dataset: Dataset::default(),
        }
    }

    pub fn reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    pub fn price_range(mut self, range: PriceRange) -> Result<Self, GenerationError> {
        range.validate()?;
        self.price_range = range;
        Ok(self)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn today(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    /// Run the generator for `table`. `count` is ignored for locations.
    pub fn generate(&mut self, table: TableName, count: usize) -> Result<usize, GenerationError> {
        match table {
            TableName::Locations => self.generate_locations(),
            TableName::Customers => self.generate_customers(count),
            TableName::CustomerAddresses => self.generate_customer_addresses(count),
            TableName::Products => self.generate_products(count),
            TableName::DeliveryPartners => self.generate_delivery_partners(count),
            TableName::Orders => self.generate_orders(count),
            TableName::OrderItems => self.generate_order_items(count),
            TableName::Payments => self.generate_payments(count),
            TableName::Deliveries => self.generate_deliveries(count),
            TableName::Returns => self.generate_returns(count),
        }
    }

    /// One location per catalog entry, in catalog order.
    pub fn generate_locations(&mut self) -> Result<usize, GenerationError> {
        let mut rng = self.begin(TableName::Locations, catalog::LOCATION_CATALOG.len())?;

        let rows: Vec<Location> = catalog::LOCATION_CATALOG
            .iter()
            .enumerate()
            .map(|(idx, (city, state))| Location {
                location_id: row_id(idx),
                city: city.to_string(),
                state: state.to_string(),
                country: catalog::COUNTRY.to_string(),
                latitude: round_to(
                    rng.random_range(catalog::LATITUDE),
                    catalog::COORDINATE_DECIMALS,
                ),
                longitude: round_to(
                    rng.random_range(catalog::LONGITUDE),
                    catalog::COORDINATE_DECIMALS,
                ),
            })
            .collect();

        Ok(store(&mut self.dataset.locations, rows))
    }

    pub fn generate_customers(&mut self, count: usize) -> Result<usize, GenerationError> {
        let mut rng = self.begin(TableName::Customers, count)?;
        let ages = catalog::CUSTOMER_AGE;
        let birth_dates =
            DateWindow::birth_dates(self.reference_date, *ages.start(), *ages.end())?;
        let joined = DateWindow::this_decade(self.reference_date)?;

        let mut rows = Vec::with_capacity(count);
        for idx in 0..count {
            rows.push(Customer {
                customer_id: row_id(idx),
                name: faker::person_name(&mut rng),
                gender: pick_value(catalog::GENDERS, &mut rng),
                email: faker::email(&mut rng),
                dob: birth_dates.sample(&mut rng),
                phone_number: faker::phone_number(&mut rng),
                joining_date: joined.sample(&mut rng),
            });
        }

        Ok(store(&mut self.dataset.customers, rows))
    }

    /// Addresses pick a location and a customer independently; a customer
    /// may end up with several addresses or none.
    pub fn generate_customer_addresses(&mut self, count: usize) -> Result<usize, GenerationError> {
        const TABLE: TableName = TableName::CustomerAddresses;
        let mut rng = self.begin(TABLE, count)?;
        let locations = &self.dataset.locations;
        let customers = &self.dataset.customers;

        let mut rows = Vec::with_capacity(count);
        for idx in 0..count {
            let location = pick_parent(locations, TABLE, &mut rng)?;
            let customer = pick_parent(customers, TABLE, &mut rng)?;
            rows.push(CustomerAddress {
                address_id: row_id(idx),
                customer_id: customer.customer_id,
                address: faker::address_line(&mut rng),
                city: location.city.clone(),
                state: location.state.clone(),
                zip_code: rng.random_range(catalog::ZIP_CODE),
                country: location.country.clone(),
            });
        }

        Ok(store(&mut self.dataset.customer_addresses, rows))
    }

    pub fn generate_products(&mut self, count: usize) -> Result<usize, GenerationError> {
        let mut rng = self.begin(TableName::Products, count)?;
        let PriceRange { min, max } = self.price_range;

        let mut rows = Vec::with_capacity(count);
        for idx in 0..count {
            rows.push(Product {
                product_id: row_id(idx),
                product_name: faker::word(&mut rng),
                category: pick_value(catalog::PRODUCT_CATEGORIES, &mut rng),
                price: round_currency(rng.random_range(min..=max)),
                stock_quantity: rng.random_range(catalog::STOCK_QUANTITY),
            });
        }

        Ok(store(&mut self.dataset.products, rows))
    }

    pub fn generate_delivery_partners(&mut self, count: usize) -> Result<usize, GenerationError> {
        let mut rng = self.begin(TableName::DeliveryPartners, count)?;

        let mut rows = Vec::with_capacity(count);
        for idx in 0..count {
            rows.push(DeliveryPartner {
                delivery_partner_id: row_id(idx),
                partner_name: faker::company_name(&mut rng),
                contact_number: faker::phone_number(&mut rng),
                service_area: pick_value(catalog::SERVICE_AREAS, &mut rng),
            });
        }

        Ok(store(&mut self.dataset.delivery_partners, rows))
    }

    /// Customer and address are sampled independently: the address is not
    /// required to belong to the customer.
    pub fn generate_orders(&mut self, count: usize) -> Result<usize, GenerationError> {
        const TABLE: TableName = TableName::Orders;
        let mut rng = self.begin(TABLE, count)?;
        let dates = DateWindow::this_year(self.reference_date)?;
        let customers = &self.dataset.customers;
        let addresses = &self.dataset.customer_addresses;

        let mut rows = Vec::with_capacity(count);
        for idx in 0..count {
            let customer = pick_parent(customers, TABLE, &mut rng)?;
            let address = pick_parent(addresses, TABLE, &mut rng)?;
            rows.push(Order {
                order_id: row_id(idx),
                customer_id: customer.customer_id,
                order_date: dates.sample(&mut rng),
                order_status: pick_value(catalog::ORDER_STATUSES, &mut rng),
                total_value: round_currency(rng.random_range(catalog::ORDER_TOTAL)),
                address_id: address.address_id,
            });
        }

        Ok(store(&mut self.dataset.orders, rows))
    }

    /// The unit price is copied from the product.
    pub fn generate_order_items(&mut self, count: usize) -> Result<usize, GenerationError> {
        const TABLE: TableName = TableName::OrderItems;
        let mut rng = self.begin(TABLE, count)?;
        let orders = &self.dataset.orders;
        let products = &self.dataset.products;

        let mut rows = Vec::with_capacity(count);
        for idx in 0..count {
            let order = pick_parent(orders, TABLE, &mut rng)?;
            let product = pick_parent(products, TABLE, &mut rng)?;
            rows.push(OrderItem {
                order_item_id: row_id(idx),
                order_id: order.order_id,
                product_id: product.product_id,
                quantity: rng.random_range(catalog::ITEM_QUANTITY),
                price_per_unit: product.price,
            });
        }

        Ok(store(&mut self.dataset.order_items, rows))
    }

    /// The amount is always the order's total value.
    pub fn generate_payments(&mut self, count: usize) -> Result<usize, GenerationError> {
        const TABLE: TableName = TableName::Payments;
        let mut rng = self.begin(TABLE, count)?;
        let dates = DateWindow::this_year(self.reference_date)?;
        let orders = &self.dataset.orders;

        let mut rows = Vec::with_capacity(count);
        for idx in 0..count {
            let order = pick_parent(orders, TABLE, &mut rng)?;
            rows.push(Payment {
                payment_id: row_id(idx),
                order_id: order.order_id,
                payment_date: dates.sample(&mut rng),
                payment_method: pick_value(catalog::PAYMENT_METHODS, &mut rng),
                payment_status: pick_value(catalog::PAYMENT_STATUSES, &mut rng),
                payment_amount: order.total_value,
            });
        }

        Ok(store(&mut self.dataset.payments, rows))
    }

    pub fn generate_deliveries(&mut self, count: usize) -> Result<usize, GenerationError> {
        const TABLE: TableName = TableName::Deliveries;
        let mut rng = self.begin(TABLE, count)?;
        let dates = DateWindow::this_year(self.reference_date)?;
        let orders = &self.dataset.orders;
        let partners = &self.dataset.delivery_partners;

        let mut rows = Vec::with_capacity(count);
        for idx in 0..count {
            let order = pick_parent(orders, TABLE, &mut rng)?;
            let delivery_date = dates.sample(&mut rng);
            let delivery_status = pick_value(catalog::DELIVERY_STATUSES, &mut rng);
            let partner = pick_parent(partners, TABLE, &mut rng)?;
            rows.push(Delivery {
                delivery_id: row_id(idx),
                order_id: order.order_id,
                delivery_date,
                delivery_status,
                delivery_partner_id: partner.delivery_partner_id,
                tracking_number: uuid::Builder::from_random_bytes(rng.random()).into_uuid(),
            });
        }

        Ok(store(&mut self.dataset.deliveries, rows))
    }

    /// The product id comes from a randomly chosen order item, independent of
    /// the chosen order.
    pub fn generate_returns(&mut self, count: usize) -> Result<usize, GenerationError> {
        const TABLE: TableName = TableName::Returns;
        let mut rng = self.begin(TABLE, count)?;
        let dates = DateWindow::this_year(self.reference_date)?;
        let orders = &self.dataset.orders;
        let items = &self.dataset.order_items;

        let mut rows = Vec::with_capacity(count);
        for idx in 0..count {
            let order = pick_parent(orders, TABLE, &mut rng)?;
            let item = pick_parent(items, TABLE, &mut rng)?;
            rows.push(Return {
                return_id: row_id(idx),
                order_id: order.order_id,
                product_id: item.product_id,
                return_date: dates.sample(&mut rng),
                return_reason: pick_value(catalog::RETURN_REASONS, &mut rng),
            });
        }

        Ok(store(&mut self.dataset.returns, rows))
    }

    /// Check the count, that the table is still empty and that every
    /// dependency is populated, then hand out the table's RNG.
    fn begin(&self, table: TableName, count: usize) -> Result<ChaCha8Rng, GenerationError> {
        if count == 0 {
            return Err(GenerationError::InvalidConfig(format!(
                "record count for {table} must be positive"
            )));
        }
        if !self.dataset.is_empty(table) {
            return Err(GenerationError::InvalidConfig(format!(
                "{table} has already been generated"
            )));
        }

        let definition = self.schema.table(table).ok_or_else(|| {
            GenerationError::InvalidConfig(format!("table {table} missing from schema"))
        })?;
        for missing in definition.dependencies() {
            if self.dataset.is_empty(missing) {
                return Err(GenerationError::Precondition { table, missing });
            }
        }

        debug!(table = %table, rows = count, seed = self.seed, "table generator started");
        Ok(ChaCha8Rng::seed_from_u64(hash_seed(self.seed, table.as_str())))
    }
}

/// Derive a per-table seed so tables draw from independent streams.
fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

fn row_id(idx: usize) -> i64 {
    idx as i64 + 1
}

fn store<T>(table: &mut Vec<T>, rows: Vec<T>) -> usize {
    *table = rows;
    table.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> DatasetBuilder {
        DatasetBuilder::with_seed(42)
            .reference_date(NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date"))
    }

    #[test]
    fn locations_follow_catalog_order() {
        let mut builder = builder();
        assert_eq!(builder.generate_locations().expect("locations"), 16);

        let locations = builder.dataset().locations();
        for (idx, location) in locations.iter().enumerate() {
            let (city, state) = catalog::LOCATION_CATALOG[idx];
            assert_eq!(location.location_id, idx as i64 + 1);
            assert_eq!(location.city, city);
            assert_eq!(location.state, state);
            assert_eq!(location.country, "India");
            assert!(catalog::LATITUDE.contains(&location.latitude));
            assert!(catalog::LONGITUDE.contains(&location.longitude));
            assert_eq!(round_to(location.latitude, 6), location.latitude);
        }
    }

    #[test]
    fn addresses_reference_existing_customers() {
        let mut builder = builder();
        builder.generate_locations().expect("locations");
        builder.generate_customers(5).expect("customers");
        builder.generate_customer_addresses(3).expect("addresses");

        let addresses = builder.dataset().customer_addresses();
        assert_eq!(addresses.len(), 3);
        for address in addresses {
            assert!((1..=5).contains(&address.customer_id));
            assert!(catalog::ZIP_CODE.contains(&address.zip_code));
            assert!(builder.dataset().locations().iter().any(|location| {
                location.city == address.city
                    && location.state == address.state
                    && location.country == address.country
            }));
        }
    }

    #[test]
    fn addresses_before_parents_fail_without_rows() {
        let mut builder = builder();
        let err = builder
            .generate_customer_addresses(3)
            .expect_err("no parents yet");
        assert!(matches!(
            err,
            GenerationError::Precondition {
                table: TableName::CustomerAddresses,
                ..
            }
        ));
        assert!(builder.dataset().customer_addresses().is_empty());

        builder.generate_customers(2).expect("customers");
        let err = builder
            .generate_customer_addresses(3)
            .expect_err("locations still missing");
        assert!(matches!(
            err,
            GenerationError::Precondition {
                missing: TableName::Locations,
                ..
            }
        ));
        assert!(builder.dataset().customer_addresses().is_empty());
    }

    #[test]
    fn payments_copy_order_totals() {
        let mut builder = builder();
        builder.generate_locations().expect("locations");
        builder.generate_customers(4).expect("customers");
        builder.generate_customer_addresses(4).expect("addresses");
        builder.generate_orders(10).expect("orders");
        builder.generate_payments(10).expect("payments");

        let dataset = builder.dataset();
        for payment in dataset.payments() {
            let order = &dataset.orders()[(payment.order_id - 1) as usize];
            assert_eq!(order.order_id, payment.order_id);
            assert_eq!(payment.payment_amount, order.total_value);
        }
    }

    #[test]
    fn zero_count_is_a_configuration_error() {
        let mut builder = builder();
        assert!(matches!(
            builder.generate_customers(0),
            Err(GenerationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn tables_are_generated_once() {
        let mut builder = builder();
        builder.generate_products(3).expect("products");
        assert!(matches!(
            builder.generate_products(3),
            Err(GenerationError::InvalidConfig(_))
        ));
        assert_eq!(builder.dataset().products().len(), 3);
    }

    #[test]
    fn default_price_range_is_degenerate() {
        let mut builder = builder();
        builder.generate_products(10).expect("products");
        assert!(
            builder
                .dataset()
                .products()
                .iter()
                .all(|product| product.price == 100.0)
        );
    }

    #[test]
    fn configured_price_range_bounds_prices() {
        let mut builder = builder()
            .price_range(PriceRange {
                min: 10.0,
                max: 20.0,
            })
            .expect("valid range");
        builder.generate_products(50).expect("products");
        for product in builder.dataset().products() {
            assert!((10.0..=20.0).contains(&product.price));
            assert!(catalog::STOCK_QUANTITY.contains(&product.stock_quantity));
        }
    }

    #[test]
    fn huge_prices_are_refused_before_generation() {
        let err = builder()
            .price_range(PriceRange {
                min: 1e307,
                max: 1e307,
            })
            .expect_err("overflowing range");
        assert!(matches!(err, GenerationError::InvalidConfig(_)));

        let mut builder = builder()
            .price_range(PriceRange {
                min: 0.0,
                max: catalog::MAX_PRICE,
            })
            .expect("largest valid range");
        builder.generate_products(20).expect("products");
        assert!(
            builder
                .dataset()
                .products()
                .iter()
                .all(|product| product.price.is_finite() && product.price <= catalog::MAX_PRICE)
        );
    }

    #[test]
    fn same_seed_gives_same_table() {
        let mut first = builder();
        let mut second = builder();
        first.generate_customers(20).expect("customers");
        second.generate_customers(20).expect("customers");
        assert_eq!(first.dataset().customers(), second.dataset().customers());
    }

    #[test]
    fn table_stream_is_independent_of_other_tables() {
        let mut alone = builder();
        alone.generate_products(5).expect("products");

        let mut after_customers = builder();
        after_customers.generate_customers(30).expect("customers");
        after_customers.generate_products(5).expect("products");

        assert_eq!(
            alone.dataset().products(),
            after_customers.dataset().products()
        );
    }

    #[test]
    fn tracking_numbers_are_version_four_uuids() {
        let mut builder = builder();
        builder.generate_locations().expect("locations");
        builder.generate_customers(2).expect("customers");
        builder.generate_customer_addresses(2).expect("addresses");
        builder.generate_delivery_partners(2).expect("partners");
        builder.generate_orders(3).expect("orders");
        builder.generate_deliveries(20).expect("deliveries");

        let mut seen = std::collections::HashSet::new();
        for delivery in builder.dataset().deliveries() {
            assert_eq!(delivery.tracking_number.get_version_num(), 4);
            assert!(seen.insert(delivery.tracking_number));
            assert!((1..=2).contains(&delivery.delivery_partner_id));
        }
    }
}
