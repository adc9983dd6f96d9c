//! Notation classifier
//!
//! Chooses the diagram kind of a text by consulting an ordered list of
//! detectors. The vocabularies of the kinds overlap, so order decides:
//! use case before class before sequence before activity, then the kinds
//! that are recognized but not converted, then bare message arrows.

use std::sync::Arc;

use tracing::{debug, span, trace, Level};

use crate::core::{Detector, DiagramKind};
use crate::plugins::activity::ActivityDetector;
use crate::plugins::class::ClassDetector;
use crate::plugins::sequence::{SequenceArrowDetector, SequenceDetector};
use crate::plugins::usecase::UseCaseDetector;

/// Detector for state diagrams, which are recognized but not converted
pub struct StateDetector;

impl Detector for StateDetector {
    fn detect(&self, input: &str) -> bool {
        let lower = input.to_lowercase();
        lower.contains("state ") || lower.contains("[*]")
    }

    fn name(&self) -> &'static str {
        "state"
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::Unsupported
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["state ", "[*]"]
    }
}

/// Detector for component diagrams, which are recognized but not converted
pub struct ComponentDetector;

impl Detector for ComponentDetector {
    fn detect(&self, input: &str) -> bool {
        let lower = input.to_lowercase();
        self.patterns().iter().any(|p| lower.contains(p))
    }

    fn name(&self) -> &'static str {
        "component"
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::Unsupported
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["component", "package", "node"]
    }
}

/// Ordered notation classifier
///
/// # Example
/// ```
/// use plantdraw::core::DiagramKind;
/// use plantdraw::plugins::NotationClassifier;
///
/// let classifier = NotationClassifier::new();
/// assert_eq!(classifier.classify("@startuml\nstart\n:work;\nstop\n@enduml"), DiagramKind::Activity);
/// assert_eq!(classifier.classify("start\n:work;\nstop"), DiagramKind::Unsupported);
/// ```
#[derive(Clone)]
pub struct NotationClassifier {
    detectors: Vec<Arc<dyn Detector>>,
}

impl NotationClassifier {
    /// Classifier with the built-in detectors in precedence order
    pub fn new() -> Self {
        Self {
            detectors: vec![
                Arc::new(UseCaseDetector::new()),
                Arc::new(ClassDetector::new()),
                Arc::new(SequenceDetector::new()),
                Arc::new(ActivityDetector::new()),
                Arc::new(StateDetector),
                Arc::new(ComponentDetector),
                Arc::new(SequenceArrowDetector::new()),
            ],
        }
    }

    /// Classifier over an explicit detector list, consulted in order
    pub fn with_detectors(detectors: Vec<Arc<dyn Detector>>) -> Self {
        Self { detectors }
    }

    /// Detector names in precedence order
    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    fn has_start_marker(input: &str) -> bool {
        input.to_lowercase().contains("@startuml")
    }

    fn first_match(&self, input: &str) -> Option<&Arc<dyn Detector>> {
        if !Self::has_start_marker(input) {
            debug!("Input has no @startuml marker");
            return None;
        }
        self.detectors.iter().find(|detector| {
            let matched = detector.detect(input);
            trace!(detector = detector.name(), matched, "Checking detector");
            matched
        })
    }

    /// Diagram kind of the input; `Unsupported` when nothing matches
    pub fn classify(&self, input: &str) -> DiagramKind {
        let classify_span = span!(Level::DEBUG, "classify", input_len = input.len());
        let _enter = classify_span.enter();

        let kind = self
            .first_match(input)
            .map(|detector| detector.kind())
            .unwrap_or_default();
        debug!(kind = %kind, "Classified input");
        kind
    }

    /// Name of the detector that claims the input
    pub fn detect_notation(&self, input: &str) -> Option<&'static str> {
        self.first_match(input).map(|detector| detector.name())
    }
}

impl Default for NotationClassifier {
    fn default() -> Self {
        Self::new()
    }
}
