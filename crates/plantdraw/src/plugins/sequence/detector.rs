//! Sequence diagram detector
//!
//! Identifies sequence diagram vocabulary in input text.

use crate::core::{Detector, DiagramKind};

/// Declaration keywords that only sequence diagrams use at line start
const LIFELINE_PREFIXES: &[&str] = &[
    "database ",
    "boundary ",
    "control ",
    "entity ",
    "collections ",
    "queue ",
];

/// Detector for sequence diagram syntax
pub struct SequenceDetector;

impl SequenceDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SequenceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for SequenceDetector {
    fn detect(&self, input: &str) -> bool {
        let lower = input.to_lowercase();

        if lower.contains("participant") || (lower.contains("actor") && lower.contains("->")) {
            return true;
        }

        lower
            .lines()
            .map(str::trim)
            .any(|line| LIFELINE_PREFIXES.iter().any(|p| line.starts_with(p)))
    }

    fn name(&self) -> &'static str {
        "sequence"
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::Sequence
    }

    fn patterns(&self) -> Vec<&'static str> {
        let mut patterns = vec!["participant", "actor + ->"];
        patterns.extend(LIFELINE_PREFIXES.iter().map(|p| p.trim_end()));
        patterns
    }
}

/// Fallback detector: bare message arrows and activation keywords
pub struct SequenceArrowDetector;

impl SequenceArrowDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SequenceArrowDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for SequenceArrowDetector {
    fn detect(&self, input: &str) -> bool {
        let lower = input.to_lowercase();
        self.patterns().iter().any(|p| lower.contains(p))
    }

    fn name(&self) -> &'static str {
        "sequence-arrows"
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::Sequence
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["->", "<-", "activate", "deactivate"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_participant() {
        let detector = SequenceDetector::new();
        assert!(detector.detect("@startuml\nparticipant Alice\n@enduml"));
        assert!(detector.detect("@startuml\nPARTICIPANT Alice\n@enduml"));
    }

    #[test]
    fn test_actor_needs_arrow() {
        let detector = SequenceDetector::new();
        assert!(detector.detect("actor User\nUser -> Api: go"));
        assert!(!detector.detect("actor User"));
    }

    #[test]
    fn test_detects_lifeline_keywords_at_line_start() {
        let detector = SequenceDetector::new();
        assert!(detector.detect("@startuml\n  database Store\n@enduml"));
        assert!(detector.detect("queue Jobs"));
        assert!(!detector.detect(":load database ;"));
    }

    #[test]
    fn test_arrow_fallback() {
        let detector = SequenceArrowDetector::new();
        assert!(detector.detect("A -> B"));
        assert!(detector.detect("B <- A"));
        assert!(detector.detect("activate A"));
        assert!(!detector.detect("just text"));
        assert_eq!(detector.kind(), DiagramKind::Sequence);
    }
}
