//! Core error types for diagram conversion
//!
//! The conversion pipeline has exactly two failure modes. Everything else a
//! parser meets (odd lines, unmatched closers, dangling references) is
//! tolerated and skipped.

use thiserror::Error;

/// Core error types for diagram conversion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagramError {
    /// The classifier could not place the input in a supported diagram kind
    #[error("Unsupported diagram: {diagram_type}")]
    UnsupportedDiagram { diagram_type: String },

    /// A construct that the model requires could not be built
    #[error("Malformed construct: {message}")]
    MalformedConstruct { message: String },
}

impl DiagramError {
    /// Create a new unsupported-diagram error
    pub fn unsupported(diagram_type: impl Into<String>) -> Self {
        Self::UnsupportedDiagram {
            diagram_type: diagram_type.into(),
        }
    }

    /// Create a new malformed-construct error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedConstruct {
            message: message.into(),
        }
    }

    /// Returns true if this error means no supported diagram was found
    pub fn is_unsupported(&self) -> bool {
        matches!(self, DiagramError::UnsupportedDiagram { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_error() {
        let error = DiagramError::unsupported("state");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Unsupported diagram"));
        assert!(error_msg.contains("state"));
        assert!(error.is_unsupported());
    }

    #[test]
    fn test_malformed_error() {
        let error = DiagramError::malformed("empty identifier");
        let error_msg = format!("{}", error);
        assert_eq!(error_msg, "Malformed construct: empty identifier");
        assert!(!error_msg.contains("line"));
        assert!(!error.is_unsupported());
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = DiagramError::unsupported("unknown").into();
        let typed = err.downcast_ref::<DiagramError>();
        assert_eq!(typed, Some(&DiagramError::unsupported("unknown")));
    }
}
