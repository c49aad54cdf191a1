use std::path::Path;

use shopsynth_generate::GenerateOptions;

use crate::CliError;

/// Read generation options from a TOML file. Missing keys keep their
/// defaults.
///
/// ```toml
/// out_dir = "data"
/// seed = 42
/// reference_date = "2026-01-31"
///
/// [counts]
/// orders = 250
///
/// [price_range]
/// min = 99.0
/// max = 4999.0
/// ```
pub fn load_config(path: &Path) -> Result<GenerateOptions, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<GenerateOptions, CliError> {
    let options: GenerateOptions = toml::from_str(content)?;
    Ok(options)
}
