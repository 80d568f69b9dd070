//! Config file loading for CLI handlers, with rich diagnostics.

use std::path::Path;

use miette::{miette, IntoDiagnostic};

use super::diagnostic;
use crate::infrastructure::config::settings::Config;

/// Load and validate `path`, applying `overrides` before validation.
///
/// # Errors
///
/// Returns a diagnostic pointing into the file when parsing or validation
/// fails.
pub fn load_config<F>(path: &Path, overrides: F) -> miette::Result<Config>
where
    F: FnOnce(&mut Config),
{
    let content = std::fs::read_to_string(path).map_err(|e| {
        miette!(
            help = "copy config.toml.example to config.toml and set source.url",
            "failed to read config file {}: {e}",
            path.display()
        )
    })?;

    match Config::parse_toml_with(&content, overrides) {
        Ok(config) => Ok(config),
        Err(err) => match diagnostic::from_config_error(&err, path, &content) {
            Some(diagnostic) => Err(diagnostic.into()),
            None => Err(err).into_diagnostic(),
        },
    }
}
