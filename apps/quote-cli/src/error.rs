//! Error types for the freight-quote CLI.

use std::path::PathBuf;

use freight_core::{CoreError, ValidationError};

/// CLI errors.
///
/// Core errors pass through unchanged; everything else is I/O or
/// (de)serialization at the edges.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read request from stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to render tables: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    #[error("Invalid request: {0}")]
    RequestParse(#[source] serde_json::Error),

    #[error("Failed to render quote: {0}")]
    Render(#[source] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Rejected request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Rate tables rejected: {0}")]
    Tables(#[from] CoreError),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_passes_through() {
        let err: CliError = ValidationError::MustBePositive {
            field: "fx_rate".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Rejected request: fx_rate must be positive");
    }

    #[test]
    fn test_read_error_names_the_path() {
        let err = CliError::Read {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("Failed to read missing.json"));
    }
}
