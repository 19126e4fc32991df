use crate::model::Parameter;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SoilError {
    #[error("missing value for {field}. Please fill in all soil parameters")]
    MissingField { field: Parameter },

    #[error("invalid {field} value '{value}': expected {expected}")]
    OutOfRange {
        field: Parameter,
        value: String,
        expected: String,
    },

    #[error("failed to load policy from {path}: {reason}")]
    PolicyLoad { path: PathBuf, reason: String },

    #[error("invalid policy: {0}")]
    PolicyInvalid(String),

    #[error("sample #{index} ({label}): {source}")]
    Sample {
        index: usize,
        label: String,
        #[source]
        source: Box<SoilError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SoilError {
    /// The parameter a validation error refers to, looking through batch wrappers.
    pub fn field(&self) -> Option<Parameter> {
        match self {
            SoilError::MissingField { field } | SoilError::OutOfRange { field, .. } => Some(*field),
            SoilError::Sample { source, .. } => source.field(),
            _ => None,
        }
    }
}
