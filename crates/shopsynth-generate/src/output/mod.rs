pub mod csv;

pub use self::csv::{export_dataset, write_table_csv};
