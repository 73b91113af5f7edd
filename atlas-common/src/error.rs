//! Error types for the atlas-route toolkit.

use std::fmt;

/// Main error type for atlas-route operations
#[derive(Debug)]
pub enum Error {
    /// No vehicle model available for a (vehicle type, country) pair
    MissingModel { vehicle: String, country: String },

    /// File I/O error
    IoError(std::io::Error),

    /// A serialised section or file failed to parse
    FormatError(String),

    /// A tile container has no section under the requested tag
    SectionNotFound(String),

    /// Invalid configuration or parameters
    InvalidInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingModel { vehicle, country } => {
                write!(f, "No {vehicle} model for country '{country}'")
            }
            Error::IoError(err) => {
                write!(f, "I/O error: {err}")
            }
            Error::FormatError(msg) => {
                write!(f, "Format error: {msg}")
            }
            Error::SectionNotFound(tag) => {
                write!(f, "Section '{tag}' not found in tile container")
            }
            Error::InvalidInput(msg) => {
                write!(f, "Invalid input: {msg}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

/// Convenience result type for atlas-route operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_missing_model() {
        let err = Error::MissingModel {
            vehicle: "car".to_string(),
            country: "atlantis".to_string(),
        };
        assert_eq!(err.to_string(), "No car model for country 'atlantis'");
    }

    #[test]
    fn test_io_error_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::from(io);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_section_not_found() {
        let err = Error::SectionNotFound("routing".to_string());
        assert!(err.to_string().contains("routing"));
        assert!(std::error::Error::source(&err).is_none());
    }
}
