use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use shopsynth_core::{DatasetSchema, Table, TableName};
use tracing::info;

use crate::dataset::Dataset;
use crate::errors::GenerationError;
use crate::value::GeneratedValue;

/// Write a table as CSV in schema column order. Returns bytes written.
pub fn write_table_csv(
    path: &Path,
    table: &Table,
    rows: &[Vec<GeneratedValue>],
) -> Result<u64, csv::Error> {
    let writer = BufWriter::new(File::create(path)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(table.column_names())?;

    for row in rows {
        let record: Vec<String> = table
            .columns
            .iter()
            .zip(row)
            .map(|(column, value)| value.to_csv(column))
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    let mut counting = writer.into_inner().map_err(|err| err.into_error())?;
    counting.flush()?;
    Ok(counting.bytes_written())
}

/// Write every table of the dataset as `<out_dir>/<table>.csv`, creating
/// the directory when missing. Tables written before a failure stay on disk.
pub fn export_dataset(
    out_dir: &Path,
    schema: &DatasetSchema,
    dataset: &Dataset,
) -> Result<Vec<(TableName, u64)>, GenerationError> {
    std::fs::create_dir_all(out_dir)
        .map_err(|err| GenerationError::export(out_dir.display().to_string(), err))?;

    let mut written = Vec::with_capacity(schema.tables.len());
    for table in &schema.tables {
        let path = out_dir.join(format!("{}.csv", table.name));
        let bytes = write_table_csv(&path, table, &dataset.rows(table.name))
            .map_err(|err| GenerationError::export(table.name.to_string(), err))?;
        info!(table = %table.name, path = %path.display(), bytes, "table exported");
        written.push((table.name, bytes));
    }

    Ok(written)
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use shopsynth_core::{Column, ColumnType};

    use super::*;

    #[test]
    fn quotes_embedded_delimiters() {
        let table = Table {
            name: TableName::CustomerAddresses,
            primary_key: "address_id".to_string(),
            columns: vec![
                Column {
                    ordinal_position: 1,
                    name: "address_id".to_string(),
                    column_type: ColumnType::Integer,
                },
                Column {
                    ordinal_position: 2,
                    name: "address".to_string(),
                    column_type: ColumnType::Text,
                },
                Column {
                    ordinal_position: 3,
                    name: "price".to_string(),
                    column_type: ColumnType::Decimal { scale: 2 },
                },
            ],
            foreign_keys: Vec::new(),
            lookups: Vec::new(),
        };
        let rows = vec![vec![
            GeneratedValue::Int(1),
            GeneratedValue::Text("12 Main Street, Springfield 12345".to_string()),
            GeneratedValue::Float(7.5),
        ]];

        let path = std::env::temp_dir().join(format!(
            "shopsynth_csv_{}.csv",
            uuid::Uuid::new_v4()
        ));
        let bytes = write_table_csv(&path, &table, &rows).expect("write csv");
        let contents = std::fs::read_to_string(&path).expect("read csv");
        assert_eq!(
            contents,
            "address_id,address,price\n1,\"12 Main Street, Springfield 12345\",7.50\n"
        );
        assert_eq!(bytes, contents.len() as u64);
        let _ = std::fs::remove_file(&path);
    }
}
