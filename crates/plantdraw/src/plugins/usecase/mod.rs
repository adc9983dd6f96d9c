//! Use-case diagram plugin
//!
//! Actors and the use cases they take part in, with include, extend and
//! generalization relations.
//!
//! Syntax examples:
//! ```text
//! @startuml
//! actor Customer
//! actor Bank <<secondary>>
//! rectangle "Online Shop" {
//!   usecase "Place\nOrder" as UC1
//!   (Pay) as UC2
//! }
//! Customer --> UC1
//! UC1 ..> UC2 : <<include>>
//! UC2 -- Bank
//! @enduml
//! ```

mod chumsky_parser;
mod database;
mod detector;
mod layout;
mod parser;
mod renderer;

pub use chumsky_parser::{parse_relation as parse_usecase_relation, Endpoint, ParsedRelation};
pub use database::{Entity, EntityKind, UseCaseDatabase, UseCaseRelation, UseCaseRelationKind};
pub use detector::UseCaseDetector;
pub use layout::{Column, PositionedEntity, UseCaseLayoutAlgorithm, UseCaseLayoutResult};
pub use parser::UseCaseParser;
pub use renderer::UseCaseRenderer;

use crate::core::{Detector, Diagram, DiagramKind, RenderConfig};
use std::sync::Arc;

/// Use-case diagram implementation
pub struct UseCaseDiagram;

impl Diagram for UseCaseDiagram {
    type Database = UseCaseDatabase;
    type Parser = UseCaseParser;
    type Renderer = UseCaseRenderer;

    fn detector() -> Arc<dyn Detector> {
        Arc::new(UseCaseDetector::new())
    }

    fn create_parser() -> Self::Parser {
        UseCaseParser::new()
    }

    fn create_database() -> Self::Database {
        UseCaseDatabase::new()
    }

    fn create_renderer(config: &RenderConfig) -> Self::Renderer {
        UseCaseRenderer::with_config(config)
    }

    fn kind() -> DiagramKind {
        DiagramKind::UseCase
    }

    fn version() -> &'static str {
        "0.1.0"
    }
}
