//! Pipeline orchestrator
//!
//! Runs one conversion end to end:
//! Classifier → Parser → Database → Layout → Renderer → Document

use anyhow::Result;
use tracing::{debug, info, span, warn, Level};

use crate::core::{
    Database, Diagram, DiagramError, DiagramKind, Document, Parser, RenderConfig, Renderer,
};
use crate::plugins::activity::ActivityDiagram;
use crate::plugins::class::ClassDiagram;
use crate::plugins::classifier::NotationClassifier;
use crate::plugins::sequence::SequenceDiagram;
use crate::plugins::usecase::UseCaseDiagram;

/// Orchestrator for the conversion pipeline
///
/// Holds only configuration; every call builds its own parser state, so
/// one orchestrator can serve several threads.
///
/// # Example
/// ```
/// use plantdraw::core::RenderConfig;
/// use plantdraw::plugins::Orchestrator;
///
/// let orchestrator = Orchestrator::new(RenderConfig::default());
/// let document = orchestrator
///     .process("@startuml\nclass A\nclass B\nA <|-- B\n@enduml")
///     .unwrap();
/// assert_eq!(document.nodes.len(), 2);
/// assert_eq!(document.edges.len(), 1);
/// ```
pub struct Orchestrator {
    config: RenderConfig,
    classifier: NotationClassifier,
}

impl Orchestrator {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            classifier: NotationClassifier::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn classifier(&self) -> &NotationClassifier {
        &self.classifier
    }

    /// Classify the input, failing when the kind is not supported
    pub fn detect_diagram_type(&self, input: &str) -> Result<DiagramKind> {
        let detect_span = span!(Level::INFO, "detect_diagram_type", input_len = input.len());
        let _enter = detect_span.enter();

        let kind = self.classifier.classify(input);
        if !kind.is_supported() {
            let notation = self.classifier.detect_notation(input).unwrap_or("unknown");
            warn!(notation, "Unsupported diagram type");
            return Err(DiagramError::unsupported(notation).into());
        }

        info!(kind = %kind, "Detected diagram type");
        Ok(kind)
    }

    /// Convert input of any supported kind into a document
    pub fn process(&self, input: &str) -> Result<Document> {
        let process_span = span!(Level::INFO, "process_diagram", input_len = input.len());
        let _enter = process_span.enter();

        let kind = self.detect_diagram_type(input)?;
        self.process_kind(kind, input)
    }

    /// Convert input as a known kind, skipping classification
    pub fn process_kind(&self, kind: DiagramKind, input: &str) -> Result<Document> {
        match kind {
            DiagramKind::Sequence => self.run::<SequenceDiagram>(input),
            DiagramKind::Class => self.run::<ClassDiagram>(input),
            DiagramKind::UseCase => self.run::<UseCaseDiagram>(input),
            DiagramKind::Activity => self.run::<ActivityDiagram>(input),
            DiagramKind::Unsupported => Err(DiagramError::unsupported(kind.to_string()).into()),
        }
    }

    fn run<D: Diagram>(&self, input: &str) -> Result<Document> {
        let kind = D::kind();
        let pipeline_span = span!(Level::INFO, "pipeline", kind = %kind);
        let _enter = pipeline_span.enter();

        let parse_span = span!(Level::DEBUG, "pipeline_parse");
        let parse_enter = parse_span.enter();
        let parser = D::create_parser();
        let mut database = D::create_database();
        parser.parse(input, &mut database)?;
        debug!(
            node_count = database.node_count(),
            edge_count = database.edge_count(),
            parser = parser.name(),
            "Parsing completed"
        );
        drop(parse_enter);

        let render_span = span!(Level::DEBUG, "pipeline_render");
        let render_enter = render_span.enter();
        let renderer = D::create_renderer(&self.config);
        let document = renderer.render(&database)?;
        debug!(
            nodes = document.nodes.len(),
            edges = document.edges.len(),
            renderer = renderer.name(),
            "Rendering completed"
        );
        drop(render_enter);

        info!(kind = %kind, "Pipeline completed successfully");
        Ok(document)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}
