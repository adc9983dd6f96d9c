//! Class diagram detector
//!
//! Identifies class diagram vocabulary in input text.

use crate::core::{Detector, DiagramKind};

/// Detector for class diagram syntax
pub struct ClassDetector;

impl ClassDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClassDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ClassDetector {
    fn detect(&self, input: &str) -> bool {
        let lower = input.to_lowercase();
        self.patterns().iter().any(|p| lower.contains(p))
    }

    fn name(&self) -> &'static str {
        "class"
    }

    fn kind(&self) -> DiagramKind {
        DiagramKind::Class
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec![
            "class ",
            "interface ",
            "abstract class",
            "enum ",
            "extends",
            "implements",
        ]
    }
}
