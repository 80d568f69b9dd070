//! Miette-based error diagnostics for CLI error presentation.
//!
//! Configuration failures are rendered against the file content with a
//! label on the offending key when it can be located.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(pricebeacon::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    #[must_use]
    pub fn new(message: impl Into<String>, path: &Path, src: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(path.display().to_string(), src.into()),
            span: None,
            help: None,
        }
    }

    #[must_use]
    pub fn with_span(mut self, offset: usize, len: usize) -> Self {
        self.span = Some((offset, len).into());
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Turn a config load failure into a diagnostic over `src`.
///
/// Returns `None` for errors that have no useful location in the file.
#[must_use]
pub fn from_config_error(err: &Error, path: &Path, src: &str) -> Option<ConfigDiagnostic> {
    let Error::Config(config_err) = err else {
        return None;
    };
    match config_err {
        ConfigError::Parse(e) => {
            let diagnostic = ConfigDiagnostic::new(
                format!("failed to parse config: {}", e.message()),
                path,
                src,
            );
            Some(match e.span() {
                Some(span) => diagnostic.with_span(span.start, span.len().max(1)),
                None => diagnostic,
            })
        }
        ConfigError::InvalidValue { field, reason } => {
            let diagnostic =
                ConfigDiagnostic::new(format!("invalid value for {field}: {reason}"), path, src);
            Some(match find_key_span(src, field) {
                Some((offset, len)) => diagnostic.with_span(offset, len),
                None => diagnostic,
            })
        }
        ConfigError::MissingField { field } => Some(
            ConfigDiagnostic::new(format!("missing required field: {field}"), path, src)
                .with_help(missing_field_help(field)),
        ),
        ConfigError::ReadFile(_) => None,
    }
}

fn missing_field_help(field: &str) -> String {
    if field.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
        format!("set the {field} environment variable (a .env file is also read)")
    } else {
        format!("add `{field}` to the config file")
    }
}

/// Locate `key = ...` for the last segment of a dotted field name.
fn find_key_span(src: &str, field: &str) -> Option<(usize, usize)> {
    let key = field.rsplit('.').next()?;
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(key) {
            if rest.trim_start().starts_with('=') {
                let start = offset + (line.len() - trimmed.len());
                return Some((start, line.trim_end().len() - (line.len() - trimmed.len())));
            }
        }
        offset += line.len();
    }
    None
}
