//! Plantdraw - Convert PlantUML diagrams to draw.io documents
//!
//! A library for parsing PlantUML sequence, class, use-case and activity
//! diagrams and laying them out as draw.io (`mxfile`) documents.
//!
//! # Quick Start
//!
//! ```rust
//! use plantdraw::render;
//!
//! let input = "@startuml\nAlice -> Bob: hello\n@enduml";
//! let xml = render(input).unwrap();
//! assert!(xml.starts_with("<mxfile"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use plantdraw::prelude::*;
//!
//! let input = "@startuml\nclass Animal\nclass Dog\nAnimal <|-- Dog\n@enduml";
//!
//! // Parse into a database
//! let parser = ClassParser::new();
//! let mut database = ClassDatabase::new();
//! parser.parse(input, &mut database).unwrap();
//!
//! // Access the parsed data
//! assert_eq!(database.node_count(), 2);
//! assert_eq!(database.relations()[0].kind, RelationKind::Inheritance);
//!
//! // Emit a document
//! let renderer = ClassRenderer::new();
//! let document = renderer.render(&database).unwrap();
//! assert_eq!(document.edges.len(), 1);
//! ```

pub mod core;
pub mod plugins;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Bounds, Database, Detector, Diagram, DiagramError, DiagramKind, Document, LayoutAlgorithm,
        Parser, RenderConfig, Renderer, ShapeKind,
    };
    pub use crate::plugins::activity::{ActivityDatabase, ActivityParser, ActivityRenderer};
    pub use crate::plugins::class::{ClassDatabase, ClassParser, ClassRenderer, RelationKind};
    pub use crate::plugins::sequence::{SequenceDatabase, SequenceParser, SequenceRenderer};
    pub use crate::plugins::usecase::{UseCaseDatabase, UseCaseParser, UseCaseRenderer};
    pub use crate::plugins::{NotationClassifier, Orchestrator};
}

/// Convert PlantUML text into a draw.io document
///
/// The diagram kind is detected from the text. Fails with
/// [`DiagramError::UnsupportedDiagram`] when the text carries no
/// `@startuml` marker or is not one of the supported kinds.
///
/// # Example
/// ```rust
/// use plantdraw::{convert, DiagramError};
///
/// let document = convert("@startuml\nstart\n:work;\nstop\n@enduml").unwrap();
/// assert_eq!(document.nodes.len(), 3);
///
/// let err = convert("graph TD; A-->B").unwrap_err();
/// assert!(err.downcast_ref::<DiagramError>().unwrap().is_unsupported());
/// ```
pub fn convert(input: &str) -> anyhow::Result<Document> {
    convert_with_config(input, RenderConfig::default())
}

/// Convert PlantUML text with explicit layout configuration
pub fn convert_with_config(input: &str, config: RenderConfig) -> anyhow::Result<Document> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::new(config).process(input)
}

/// Convert PlantUML text straight to draw.io XML
///
/// # Example
/// ```rust
/// use plantdraw::render;
///
/// let xml = render("@startuml\nusecase (Browse)\n@enduml").unwrap();
/// assert!(xml.contains("Use Case Diagram"));
/// assert!(xml.contains("Browse"));
/// ```
pub fn render(input: &str) -> anyhow::Result<String> {
    Ok(convert(input)?.to_xml())
}

/// Detect the diagram kind of PlantUML text
///
/// # Example
/// ```rust
/// use plantdraw::{classify, DiagramKind};
///
/// assert_eq!(classify("@startuml\nclass A\n@enduml"), DiagramKind::Class);
/// assert_eq!(classify("class A"), DiagramKind::Unsupported);
/// ```
pub fn classify(input: &str) -> DiagramKind {
    plugins::classifier::NotationClassifier::new().classify(input)
}
