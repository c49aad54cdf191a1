use std::path::PathBuf;
use std::time::Instant;

use shopsynth_core::{TableName, build_dependency_graph_report, validate_schema};
use tracing::{info, warn};

use crate::builder::DatasetBuilder;
use crate::checks::{check_dataset, failing_tables};
use crate::dataset::Dataset;
use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationReport, TableReport};
use crate::output::export_dataset;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub out_dir: PathBuf,
    pub report: GenerationReport,
    pub dataset: Dataset,
}

/// Entry point for generating and exporting the full dataset.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();

        self.options.counts.validate()?;
        let mut builder = DatasetBuilder::new(&self.options)?;
        validate_schema(builder.schema())?;

        let order = build_dependency_graph_report(builder.schema())
            .topo_order
            .ok_or_else(|| {
                GenerationError::InvalidConfig("table dependencies contain a cycle".to_string())
            })?;

        info!(
            run_id = %run_id,
            seed = builder.seed(),
            reference_date = %builder.today(),
            out_dir = %self.options.out_dir.display(),
            tables = order.len(),
            "generation started"
        );

        let mut tables = Vec::with_capacity(order.len());
        for table in order {
            let table_start = Instant::now();
            let requested = self.requested_rows(table);
            info!(table = %table, rows = requested, "generating table");

            let generated = builder.generate(table, requested).inspect_err(|err| {
                warn!(run_id = %run_id, table = %table, error = %err, "generation failed");
            })?;

            info!(
                table = %table,
                rows_generated = generated,
                duration_ms = table_start.elapsed().as_millis() as u64,
                "table generated"
            );
            tables.push(TableReport {
                table,
                rows_requested: requested as u64,
                rows_generated: generated as u64,
                bytes_written: 0,
            });
        }

        let integrity = check_dataset(builder.schema(), builder.dataset());
        if !integrity.is_clean() {
            warn!(
                run_id = %run_id,
                violations = integrity.violations(),
                tables = ?failing_tables(&integrity),
                "integrity check failed"
            );
            return Err(GenerationError::IntegrityViolation(integrity));
        }

        let written = export_dataset(&self.options.out_dir, builder.schema(), builder.dataset())
            .inspect_err(|err| {
                warn!(run_id = %run_id, error = %err, "export failed");
            })?;
        for (table, bytes) in &written {
            if let Some(entry) = tables.iter_mut().find(|entry| entry.table == *table) {
                entry.bytes_written = *bytes;
            }
        }

        let report = GenerationReport {
            run_id: run_id.clone(),
            seed: builder.seed(),
            reference_date: builder.today(),
            out_dir: self.options.out_dir.clone(),
            bytes_written: written.iter().map(|(_, bytes)| bytes).sum(),
            tables,
            duration_ms: start.elapsed().as_millis() as u64,
            integrity,
        };

        if let Some(path) = &self.options.report_path {
            if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, serde_json::to_vec_pretty(&report)?)?;
            info!(path = %path.display(), "report written");
        }

        info!(
            run_id = %run_id,
            tables = report.tables.len(),
            bytes_written = report.bytes_written,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult {
            out_dir: self.options.out_dir.clone(),
            report,
            dataset: builder.into_dataset(),
        })
    }

    fn requested_rows(&self, table: TableName) -> usize {
        self.options
            .counts
            .get(table)
            .unwrap_or(crate::catalog::LOCATION_CATALOG.len())
    }
}
