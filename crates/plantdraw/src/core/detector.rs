//! Core detector trait for diagram kind identification
//!
//! This trait defines the interface for recognizing one diagram kind from
//! the vocabulary used in the text.

use super::DiagramKind;

/// Core trait for diagram kind detectors
///
/// Detectors only look at keywords. They are consulted in a fixed order by
/// [`NotationClassifier`](crate::plugins::NotationClassifier), because the
/// vocabularies overlap across kinds; a detector may therefore match input
/// that a more specific detector earlier in the list already claimed.
///
/// # Example
/// ```
/// use plantdraw::core::Detector;
/// use plantdraw::plugins::sequence::SequenceDetector;
///
/// let detector = SequenceDetector::new();
/// assert!(detector.detect("participant Alice\nAlice -> Bob: hi"));
/// ```
pub trait Detector: Send + Sync {
    /// Detect if the input uses this detector's vocabulary
    fn detect(&self, input: &str) -> bool;

    /// Get the notation name reported by this detector
    fn name(&self) -> &'static str;

    /// Get the diagram kind this detector classifies input as
    fn kind(&self) -> DiagramKind;

    /// Get key patterns that this detector looks for
    fn patterns(&self) -> Vec<&'static str>;
}
