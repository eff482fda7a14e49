//! Error types for unit conversion
//!
//! Every failure in this crate is a programming or schema-authoring defect,
//! so nothing here is recoverable: callers get the error and stop.
//!
//! Copyright (c) 2025 Geounits Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Errors raised while synthesizing a converter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// A system identifier was not `si_units` or `ip_units`
    #[error("expected {param} to be 'si_units' or 'ip_units'. received {received}")]
    InvalidSystem { param: String, received: String },

    /// The factor table has no entry for this unit pair
    #[error("Unable to find conversion from {from} to {to}")]
    MissingFactor { from: String, to: String },

    /// A scalar descriptor lacks the label for one of the systems
    #[error("Path {path} declares no {system} label")]
    MissingUnitLabel { path: String, system: String },

    /// The path walked through a leaf descriptor
    #[error("Path {path} did not lead to a useful spot in the unit map")]
    UnresolvablePath { path: String },

    /// Reference or array indirection re-entered a path being resolved
    #[error("Circular unit reference detected: {chain}")]
    CircularReference { chain: String },
}

impl ConversionError {
    /// Create an invalid system error for the named parameter
    pub fn invalid_system(param: impl Into<String>, received: impl Into<String>) -> Self {
        Self::InvalidSystem {
            param: param.into(),
            received: received.into(),
        }
    }

    /// Create a missing factor error
    pub fn missing_factor(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::MissingFactor {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create an unresolvable path error
    pub fn unresolvable_path(path: impl Into<String>) -> Self {
        Self::UnresolvablePath { path: path.into() }
    }

    /// Create a circular reference error from the resolution stack
    pub fn circular_reference(chain: &[String]) -> Self {
        Self::CircularReference {
            chain: chain.join(" -> "),
        }
    }

    /// Get the unit map path associated with this error, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::MissingUnitLabel { path, .. } => Some(path),
            Self::UnresolvablePath { path } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_inputs() {
        let err = ConversionError::invalid_system("fromSystem", "xx");
        assert_eq!(
            err.to_string(),
            "expected fromSystem to be 'si_units' or 'ip_units'. received xx"
        );

        let err = ConversionError::missing_factor("m", "lux");
        assert!(err.to_string().contains("from m to lux"));
        assert_eq!(err.path(), None);
    }

    #[test]
    fn test_circular_reference_chain() {
        let chain = vec!["A".to_string(), "B".to_string(), "A".to_string()];
        let err = ConversionError::circular_reference(&chain);
        assert_eq!(
            err,
            ConversionError::CircularReference {
                chain: "A -> B -> A".to_string()
            }
        );
    }

    #[test]
    fn test_error_path() {
        let err = ConversionError::unresolvable_path("Room.area.si_units");
        assert_eq!(err.path(), Some("Room.area.si_units"));
    }
}
