//! Error handling for the ECG service crates
//!
//! One error type shared by the core, processing, and model crates so the
//! server can map failures onto HTTP responses in a single place.

use std::fmt;

/// Result type alias for ECG operations
pub type EcgResult<T> = Result<T, EcgError>;

/// Error type for all ECG signal, record, and model operations
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EcgError {
    /// Signal data failed a structural check
    InvalidSignalData {
        /// Description of what was wrong with the samples
        reason: String,
    },

    /// Record files could not be located (or the name was rejected)
    RecordNotFound {
        /// Requested record name
        record: String,
    },

    /// Record header or data file could not be interpreted
    RecordParse {
        /// Description of the parse failure
        reason: String,
    },

    /// Record uses a WFDB signal format this reader does not decode
    UnsupportedFormat {
        /// Format code from the header
        format: String,
    },

    /// Generative model is not available (missing file, not loaded)
    ModelUnavailable {
        /// Why the model could not be used
        reason: String,
    },

    /// Generative model file was found but its contents are unusable
    ModelInvalid {
        /// Description of the validation failure
        reason: String,
    },

    /// Underlying I/O failure while reading record or model files
    Io {
        /// Stringified I/O error
        reason: String,
    },
}

impl fmt::Display for EcgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcgError::InvalidSignalData { reason } => {
                write!(f, "Invalid signal data: {}", reason)
            }
            EcgError::RecordNotFound { record } => {
                write!(f, "Record not found: {}", record)
            }
            EcgError::RecordParse { reason } => {
                write!(f, "Record parse error: {}", reason)
            }
            EcgError::UnsupportedFormat { format } => {
                write!(f, "Unsupported WFDB signal format: {}", format)
            }
            EcgError::ModelUnavailable { reason } => {
                write!(f, "Generative model unavailable: {}", reason)
            }
            EcgError::ModelInvalid { reason } => {
                write!(f, "Generative model invalid: {}", reason)
            }
            EcgError::Io { reason } => {
                write!(f, "I/O error: {}", reason)
            }
        }
    }
}

impl std::error::Error for EcgError {}

impl From<std::io::Error> for EcgError {
    fn from(err: std::io::Error) -> Self {
        EcgError::Io {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EcgError::UnsupportedFormat {
            format: "212".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unsupported"));
        assert!(display.contains("212"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: EcgError = io_err.into();
        assert!(matches!(err, EcgError::Io { .. }));
        assert!(format!("{}", err).contains("missing"));
    }
}
