use chrono::NaiveDate;
use shopsynth_core::{Column, ColumnType};
use uuid::Uuid;

/// A single field value of a generated record.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(Uuid),
    Date(NaiveDate),
}

impl GeneratedValue {
    /// Render the value for CSV, using the column type for decimal scale.
    pub fn to_csv(&self, column: &Column) -> String {
        match self {
            GeneratedValue::Int(value) => value.to_string(),
            GeneratedValue::Float(value) => match column.column_type {
                ColumnType::Decimal { scale } => {
                    let scale = scale as usize;
                    format!("{value:.scale$}")
                }
                _ => value.to_string(),
            },
            GeneratedValue::Text(value) => value.clone(),
            GeneratedValue::Uuid(value) => value.hyphenated().to_string(),
            GeneratedValue::Date(value) => value.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            GeneratedValue::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<i64> for GeneratedValue {
    fn from(value: i64) -> Self {
        GeneratedValue::Int(value)
    }
}

impl From<u32> for GeneratedValue {
    fn from(value: u32) -> Self {
        GeneratedValue::Int(i64::from(value))
    }
}

impl From<f64> for GeneratedValue {
    fn from(value: f64) -> Self {
        GeneratedValue::Float(value)
    }
}

impl From<&str> for GeneratedValue {
    fn from(value: &str) -> Self {
        GeneratedValue::Text(value.to_string())
    }
}

impl From<&String> for GeneratedValue {
    fn from(value: &String) -> Self {
        GeneratedValue::Text(value.clone())
    }
}

impl From<NaiveDate> for GeneratedValue {
    fn from(value: NaiveDate) -> Self {
        GeneratedValue::Date(value)
    }
}

impl From<Uuid> for GeneratedValue {
    fn from(value: Uuid) -> Self {
        GeneratedValue::Uuid(value)
    }
}
