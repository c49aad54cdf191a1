//! Dataset generation engine for shopsynth.
//!
//! The [`DatasetBuilder`] materializes the ten e-commerce tables in
//! dependency order, keeping every foreign key pointed at an existing parent
//! row. [`GenerationEngine`] drives a full pass: build, check, export to CSV.

pub mod builder;
pub mod catalog;
pub mod checks;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod faker;
pub mod foreign;
pub mod model;
pub mod output;
pub mod records;
pub mod value;

pub use builder::DatasetBuilder;
pub use checks::{IntegrityReport, check_dataset};
pub use dataset::Dataset;
pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use model::{GenerateOptions, GenerationReport, PriceRange, RecordCounts, TableReport};
