//! Class diagram emitter

use anyhow::Result;
use tracing::{span, Level};

use super::database::{ClassDatabase, ClassKind, Relation, RelationKind};
use super::layout::ClassLayoutAlgorithm;
use crate::core::{
    DiagramKind, Document, DocumentBuilder, LayoutAlgorithm, RenderConfig, Renderer, ShapeKind,
};

fn class_style(kind: ClassKind) -> &'static str {
    match kind {
        ClassKind::Class => "rounded=0;fillColor=#dae8fc;strokeColor=#6c8ebf;",
        ClassKind::Abstract => "rounded=0;fillColor=#dae8fc;strokeColor=#6c8ebf;fontStyle=2;",
        ClassKind::Interface => "rounded=0;fillColor=#fff2cc;strokeColor=#d6b656;fontStyle=2;",
        ClassKind::Enum => "rounded=0;fillColor=#e1d5e7;strokeColor=#9673a6;",
    }
}

/// Arrowhead and line style for a relation
fn relation_style(relation: &Relation) -> &'static str {
    match (relation.kind, relation.dotted) {
        (RelationKind::Inheritance, _) => "endArrow=block;endFill=0;endSize=12;",
        (RelationKind::Realization, _) => "dashed=1;endArrow=block;endFill=0;endSize=12;",
        (RelationKind::Composition, _) => "endArrow=diamond;endFill=1;endSize=12;",
        (RelationKind::Aggregation, _) => "endArrow=diamond;endFill=0;endSize=12;",
        (RelationKind::Association, _) => "endArrow=open;endFill=0;",
        (RelationKind::Dependency, _) => "dashed=1;endArrow=open;endFill=0;",
        (RelationKind::Link, true) => "dashed=1;endArrow=none;endFill=0;",
        (RelationKind::Link, false) => "endArrow=none;endFill=0;",
    }
}

/// Relation label with multiplicities on either side
fn relation_label(relation: &Relation) -> String {
    [
        relation.from_multiplicity.as_deref(),
        Some(relation.label.as_str()),
        relation.to_multiplicity.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join("  ")
}

/// Class diagram renderer
pub struct ClassRenderer {
    layout: ClassLayoutAlgorithm,
    page_name: String,
}

impl ClassRenderer {
    pub fn new() -> Self {
        Self::with_config(&RenderConfig::default())
    }

    pub fn with_config(config: &RenderConfig) -> Self {
        Self {
            layout: ClassLayoutAlgorithm::with_spacing(config.class.clone()),
            page_name: config.page_name(DiagramKind::Class.page_name()).to_string(),
        }
    }
}

impl Default for ClassRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<ClassDatabase> for ClassRenderer {
    type Output = Document;

    fn render(&self, database: &ClassDatabase) -> Result<Self::Output> {
        let render_span = span!(Level::INFO, "render_class");
        let _enter = render_span.enter();

        let layout = self.layout.layout(database)?;
        let mut builder = DocumentBuilder::new(&self.page_name);

        for class in &layout.classes {
            builder.add_entity(
                &class.id,
                ShapeKind::Rectangle,
                class.label.as_str(),
                class.bounds,
                class_style(class.kind),
            );
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
        "class"
    }

    fn format(&self) -> &'static str {
        "drawio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Parser;
    use crate::plugins::class::ClassParser;

    fn render(input: &str) -> Document {
        let mut db = ClassDatabase::new();
        ClassParser::new().parse(input, &mut db).unwrap();
        ClassRenderer::new().render(&db).unwrap()
    }

    #[test]
    fn test_inheritance_edge_points_at_parent() {
        let doc = render("@startuml\nclass Animal\nclass Dog\nAnimal <|-- Dog\n@enduml");
        assert_eq!(doc.name, "Class Diagram");
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.edges.len(), 1);

        let parent = doc.node_by_label("Animal").unwrap();
        let edge = &doc.edges[0];
        assert_eq!(edge.target.node_id(), Some(parent.id.as_str()));
        assert!(edge.style.contains("endArrow=block;endFill=0;"));
    }

    #[test]
    fn test_interface_style() {
        let doc = render("@startuml\ninterface Shape\n@enduml");
        assert!(doc.nodes[0].style.contains("fontStyle=2"));
        assert!(doc.nodes[0].label.contains("<<interface>>"));
    }

    #[test]
    fn test_dangling_relation_dropped() {
        let doc = render("@startuml\nclass A\nA --> Missing\nMissing --> A\n@enduml");
        assert!(doc.edges.is_empty());
    }

    #[test]
    fn test_relation_label_with_multiplicities() {
        let doc = render("@startuml\nclass A\nclass B\nA \"1\" --> \"*\" B : owns\n@enduml");
        assert_eq!(doc.edges[0].label, "1  owns  *");
    }

    #[test]
    fn test_composition_style() {
        let doc = render("@startuml\nclass Car\nclass Wheel\nCar *-- Wheel\n@enduml");
        assert!(doc.edges[0].style.contains("endArrow=diamond;endFill=1;"));
    }
}
