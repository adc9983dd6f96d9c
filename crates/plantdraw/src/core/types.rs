//! Core type definitions for diagram conversion
//!
//! This module contains the types shared by every plugin: the diagram kind
//! enumeration and the geometry attached to positioned entities.

use serde::Serialize;
use std::fmt;

/// Diagram kinds the classifier can report
///
/// Determined once per input; everything that is not one of the four
/// supported kinds is `Unsupported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    /// Lifelines exchanging messages
    Sequence,
    /// Classes, interfaces and enums with their relations
    Class,
    /// Actors and use cases
    UseCase,
    /// Activities, decisions and forks
    Activity,
    /// Anything else (state, component, unknown)
    #[default]
    Unsupported,
}

impl DiagramKind {
    /// Returns true if a conversion pipeline exists for this kind
    pub fn is_supported(&self) -> bool {
        !matches!(self, DiagramKind::Unsupported)
    }

    /// Page name used for the emitted document
    pub fn page_name(&self) -> &'static str {
        match self {
            DiagramKind::Sequence => "Sequence Diagram",
            DiagramKind::Class => "Class Diagram",
            DiagramKind::UseCase => "Use Case Diagram",
            DiagramKind::Activity => "Activity Diagram",
            DiagramKind::Unsupported => "Diagram",
        }
    }

    /// All kinds that can be converted
    pub fn supported() -> &'static [DiagramKind] {
        &[
            DiagramKind::Sequence,
            DiagramKind::Class,
            DiagramKind::UseCase,
            DiagramKind::Activity,
        ]
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramKind::Sequence => write!(f, "sequence"),
            DiagramKind::Class => write!(f, "class"),
            DiagramKind::UseCase => write!(f, "usecase"),
            DiagramKind::Activity => write!(f, "activity"),
            DiagramKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Axis-aligned box in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a box of the given size centred horizontally on `center_x`
    pub fn centered(center_x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(center_x - width / 2.0, y, width, height)
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagram_kind_display() {
        assert_eq!(DiagramKind::Sequence.to_string(), "sequence");
        assert_eq!(DiagramKind::Class.to_string(), "class");
        assert_eq!(DiagramKind::UseCase.to_string(), "usecase");
        assert_eq!(DiagramKind::Activity.to_string(), "activity");
        assert_eq!(DiagramKind::Unsupported.to_string(), "unsupported");
    }

    #[test]
    fn test_diagram_kind_support() {
        assert!(DiagramKind::Activity.is_supported());
        assert!(!DiagramKind::Unsupported.is_supported());
        assert_eq!(DiagramKind::supported().len(), 4);
        assert_eq!(DiagramKind::default(), DiagramKind::Unsupported);
    }

    #[test]
    fn test_page_names() {
        assert_eq!(DiagramKind::UseCase.page_name(), "Use Case Diagram");
        assert_eq!(DiagramKind::Activity.page_name(), "Activity Diagram");
    }

    #[test]
    fn test_bounds_helpers() {
        let b = Bounds::centered(100.0, 10.0, 40.0, 20.0);
        assert_eq!(b.x, 80.0);
        assert_eq!(b.center_x(), 100.0);
        assert_eq!(b.center_y(), 20.0);
        assert_eq!(b.right(), 120.0);
        assert_eq!(b.bottom(), 30.0);
    }

    #[test]
    fn test_bounds_union() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(20.0, 5.0, 10.0, 30.0);
        let u = a.union(&b);
        assert_eq!(u, Bounds::new(0.0, 0.0, 30.0, 35.0));
    }
}
