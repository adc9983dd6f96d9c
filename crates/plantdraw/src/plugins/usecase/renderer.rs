//! Use-case diagram emitter

use anyhow::Result;
use tracing::{span, Level};

use super::database::{UseCaseDatabase, UseCaseRelation, UseCaseRelationKind};
use super::layout::{Column, UseCaseLayoutAlgorithm};
use crate::core::{
    DiagramKind, Document, DocumentBuilder, LayoutAlgorithm, RenderConfig, Renderer, ShapeKind,
};

const USE_CASE_STYLE: &str = "fillColor=#d5e8d4;strokeColor=#82b366;";
const BOUNDARY_STYLE: &str = "rounded=0;fillColor=none;verticalAlign=top;fontStyle=1;";

fn relation_style(relation: &UseCaseRelation) -> &'static str {
    match relation.kind {
        UseCaseRelationKind::Include | UseCaseRelationKind::Extend => {
            "dashed=1;endArrow=open;endFill=0;"
        }
        UseCaseRelationKind::Generalization => "endArrow=block;endFill=0;endSize=12;",
        UseCaseRelationKind::Association if relation.directed => "endArrow=open;endFill=0;",
        UseCaseRelationKind::Association => "endArrow=none;endFill=0;",
    }
}

/// Include and extend edges are always labelled with their stereotype
fn relation_label(relation: &UseCaseRelation) -> String {
    match relation.kind {
        UseCaseRelationKind::Include => "<<include>>".to_string(),
        UseCaseRelationKind::Extend => "<<extend>>".to_string(),
        _ => relation.label.clone(),
    }
}

/// Use-case diagram renderer
pub struct UseCaseRenderer {
    layout: UseCaseLayoutAlgorithm,
    page_name: String,
}

impl UseCaseRenderer {
    pub fn new() -> Self {
        Self::with_config(&RenderConfig::default())
    }

    pub fn with_config(config: &RenderConfig) -> Self {
        Self {
            layout: UseCaseLayoutAlgorithm::with_spacing(config.usecase.clone()),
            page_name: config
                .page_name(DiagramKind::UseCase.page_name())
                .to_string(),
        }
    }
}

impl Default for UseCaseRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<UseCaseDatabase> for UseCaseRenderer {
    type Output = Document;

    fn render(&self, database: &UseCaseDatabase) -> Result<Self::Output> {
        let render_span = span!(Level::INFO, "render_usecase");
        let _enter = render_span.enter();

        let layout = self.layout.layout(database)?;
        let mut builder = DocumentBuilder::new(&self.page_name);

        if let Some((label, bounds)) = &layout.boundary {
            builder.add_node(ShapeKind::Container, label.as_str(), *bounds, BOUNDARY_STYLE);
        }

        for entity in &layout.entities {
            let (shape, style) = match entity.column {
                Column::UseCases => (ShapeKind::Ellipse, USE_CASE_STYLE),
                Column::PrimaryActors | Column::SecondaryActors => (ShapeKind::Actor, ""),
            };
            builder.add_entity(&entity.id, shape, entity.label.as_str(), entity.bounds, style);
        }

        for relation in database.relations() {
            builder.connect(
                &relation.from,
                &relation.to,
                relation_label(relation),
                relation_style(relation),
            );
        }

        Ok(builder.finish())
    }

    fn name(&self) -> &'static str {
        "usecase"
    }

    fn format(&self) -> &'static str {
        "drawio"
    }
}
