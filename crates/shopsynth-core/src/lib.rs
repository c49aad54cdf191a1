//! Core contracts for shopsynth.
//!
//! This crate defines the dataset schema (tables, columns, foreign keys),
//! the dependency graph that fixes generation order, and schema validation.

pub mod error;
pub mod graph;
pub mod schema;
pub mod validation;

pub use error::{Error, Result};
pub use graph::{DependencyGraphReport, build_dependency_graph_report};
pub use schema::{Column, ColumnType, DatasetSchema, ForeignKey, Table, TableName};
pub use validation::validate_schema;

/// Current schema contract version reported by `shopsynth schema`.
pub const SCHEMA_VERSION: &str = "0.1";
