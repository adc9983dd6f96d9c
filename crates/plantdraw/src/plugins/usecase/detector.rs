//! Use-case diagram detector

use crate::core::{normalize_lines, Detector, DiagramKind};

/// Detector for use-case diagram syntax
pub struct UseCaseDetector;

impl UseCaseDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UseCaseDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// `(Text)` optionally followed by `as Alias`
fn is_shorthand_use_case(line: &str) -> bool {
    let Some(inner) = line.strip_prefix('(') else {
        return false;
    };
    let Some(close) = inner.find(')') else {
        return false;
    };
    let rest = inner[close + 1..].trim();
    rest.is_empty() || rest.starts_with("as ")
}

impl Detector for UseCaseDetector {
    fn detect(&self, input: &str) -> bool {
        if input.to_lowercase().contains("usecase") {
            return true;
        }
        normalize_lines(input)
            .iter()
            .any(|line| is_shorthand_use_case(line))
    }

    fn name(&self) -> &'static str {
        "usecase"
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::UseCase
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["usecase", "(...)", "(...) as"]
    }
}
