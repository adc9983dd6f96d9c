//! Activity diagram emitter

use anyhow::Result;
use tracing::{span, Level};

use super::database::{ActivityDatabase, ActivityKind};
use super::layout::ActivityLayoutAlgorithm;
use crate::core::{
    DiagramKind, Document, DocumentBuilder, LayoutAlgorithm, RenderConfig, Renderer, ShapeKind,
};

const START_STYLE: &str = "aspect=fixed;fillColor=#000000;";
const STOP_STYLE: &str = "shape=doubleEllipse;aspect=fixed;fillColor=#000000;";
const ACTION_STYLE: &str = "rounded=1;fillColor=#dae8fc;strokeColor=#6c8ebf;";
const DECISION_STYLE: &str = "fillColor=#fff2cc;strokeColor=#d6b656;";
const BAR_STYLE: &str = "fillColor=#000000;strokeColor=none;";
const TRANSITION_STYLE: &str = "endArrow=block;endFill=1;";

fn node_shape(kind: ActivityKind) -> (ShapeKind, &'static str) {
    match kind {
        ActivityKind::Start => (ShapeKind::Ellipse, START_STYLE),
        ActivityKind::Stop => (ShapeKind::Ellipse, STOP_STYLE),
        ActivityKind::Action => (ShapeKind::Rectangle, ACTION_STYLE),
        ActivityKind::Decision | ActivityKind::Merge => (ShapeKind::Rhombus, DECISION_STYLE),
        ActivityKind::Fork | ActivityKind::Join => (ShapeKind::Rectangle, BAR_STYLE),
    }
}

fn lane_style(color: Option<&str>) -> String {
    let fill = color.unwrap_or("none");
    format!("swimlane;startSize=30;fillColor={};", fill)
}

/// Activity diagram renderer
pub struct ActivityRenderer {
    layout: ActivityLayoutAlgorithm,
    page_name: String,
}

impl ActivityRenderer {
    pub fn new() -> Self {
        Self::with_config(&RenderConfig::default())
    }

    pub fn with_config(config: &RenderConfig) -> Self {
        Self {
            layout: ActivityLayoutAlgorithm::with_spacing(config.activity.clone()),
            page_name: config
                .page_name(DiagramKind::Activity.page_name())
                .to_string(),
        }
    }
}

impl Default for ActivityRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<ActivityDatabase> for ActivityRenderer {
    type Output = Document;

    fn render(&self, database: &ActivityDatabase) -> Result<Self::Output> {
        let render_span = span!(Level::INFO, "render_activity");
        let _enter = render_span.enter();

        let layout = self.layout.layout(database)?;
        let mut builder = DocumentBuilder::new(&self.page_name);

        // Lanes first so they sit behind the nodes
        for lane in &layout.lanes {
            builder.add_node(
                ShapeKind::Container,
                lane.label.as_str(),
                lane.bounds,
                &lane_style(lane.color.as_deref()),
            );
        }

        for node in &layout.nodes {
            let (shape, style) = node_shape(node.kind);
            builder.add_entity(&node.id, shape, node.label.as_str(), node.bounds, style);
        }

        for transition in database.transitions() {
            builder.connect(
                &transition.from,
                &transition.to,
                transition.label.as_str(),
                TRANSITION_STYLE,
            );
        }

        Ok(builder.finish())
    }

    fn name(&self) -> &'static str {
        "activity"
    }

    fn format(&self) -> &'static str {
        "drawio"
    }
}
