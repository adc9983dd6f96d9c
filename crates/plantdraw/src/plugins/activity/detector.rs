//! Activity diagram detector

use crate::core::{normalize_lines, Detector, DiagramKind};

/// Detector for activity diagram syntax
///
/// Matches a `start`/`stop` line or an action line `:text;`.
pub struct ActivityDetector;

impl ActivityDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ActivityDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn is_activity_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    matches!(lower.as_str(), "start" | "stop")
        || lower.starts_with("start ")
        || lower.starts_with("stop ")
        || (line.len() > 1 && line.starts_with(':') && line.ends_with(';'))
}

impl Detector for ActivityDetector {
    fn detect(&self, input: &str) -> bool {
        normalize_lines(input).iter().any(|line| is_activity_line(line))
    }

    fn name(&self) -> &'static str {
        "activity"
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::Activity
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["start", "stop", ":...;"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_markers_and_actions() {
        let detector = ActivityDetector::new();
        assert!(detector.detect("@startuml\nstart\n@enduml"));
        assert!(detector.detect("@startuml\n:work;\n@enduml"));
        assert!(detector.detect("@startuml\nSTOP\n@enduml"));
    }

    #[test]
    fn test_start_marker_is_not_a_start_line() {
        let detector = ActivityDetector::new();
        assert!(!detector.detect("@startuml\nA -> B\n@enduml"));
        assert!(!detector.detect("@startuml\nstarting -> B\n@enduml"));
    }

    #[test]
    fn test_fragment_end_is_not_activity() {
        let detector = ActivityDetector::new();
        assert!(!detector.detect("@startuml\nalt ok\nA -> B\nend\n@enduml"));
    }
}
