//! Sequence diagram emitter
//!
//! Projects the positioned lifelines, messages and fragments onto document
//! primitives. Messages and lifelines are anchored to points so that every
//! message sits on its own row.

use anyhow::Result;
use tracing::{debug, span, Level};

use super::database::{LifelineKind, SequenceDatabase};
use super::layout::SequenceLayoutAlgorithm;
use crate::core::{
    DiagramKind, Document, DocumentBuilder, EdgeEnd, LayoutAlgorithm, RenderConfig, Renderer,
    ShapeKind,
};

const PARTICIPANT_STYLE: &str = "rounded=0;fillColor=#dae8fc;strokeColor=#6c8ebf;";
const ACTOR_STYLE: &str = "";
const DATABASE_STYLE: &str =
    "shape=cylinder3;boundedLbl=1;backgroundOutline=1;size=8;fillColor=#dae8fc;strokeColor=#6c8ebf;";
const QUEUE_STYLE: &str =
    "shape=cylinder3;direction=south;boundedLbl=1;size=8;fillColor=#dae8fc;strokeColor=#6c8ebf;";
const COLLECTIONS_STYLE: &str = "rounded=0;shadow=1;fillColor=#dae8fc;strokeColor=#6c8ebf;";
const BOUNDARY_STYLE: &str = "shape=umlBoundary;verticalLabelPosition=bottom;verticalAlign=top;";
const CONTROL_STYLE: &str = "shape=umlControl;verticalLabelPosition=bottom;verticalAlign=top;";
const ENTITY_STYLE: &str = "shape=umlEntity;verticalLabelPosition=bottom;verticalAlign=top;";

const LIFELINE_STYLE: &str = "dashed=1;html=1;strokeColor=#666666;endArrow=none;";
const FRAGMENT_STYLE: &str = "shape=umlFrame;width=100;height=20;fillColor=none;align=left;verticalAlign=top;";
const SEPARATOR_STYLE: &str =
    "dashed=1;html=1;endArrow=none;strokeColor=#000000;align=left;verticalAlign=bottom;";

const SYNC_STYLE: &str = "endArrow=block;endFill=1;";
const ASYNC_STYLE: &str = "endArrow=open;endFill=0;";
const REPLY_STYLE: &str = "dashed=1;endArrow=open;endFill=0;";
const REPLY_SYNC_STYLE: &str = "dashed=1;endArrow=block;endFill=1;";

/// Height of the hook drawn for a message to self
const SELF_MESSAGE_DROP: f64 = 20.0;

fn head_shape(kind: LifelineKind) -> (ShapeKind, &'static str) {
    match kind {
        LifelineKind::Participant => (ShapeKind::Rectangle, PARTICIPANT_STYLE),
        LifelineKind::Actor => (ShapeKind::Actor, ACTOR_STYLE),
        LifelineKind::Database => (ShapeKind::Rectangle, DATABASE_STYLE),
        LifelineKind::Queue => (ShapeKind::Rectangle, QUEUE_STYLE),
        LifelineKind::Collections => (ShapeKind::Rectangle, COLLECTIONS_STYLE),
        LifelineKind::Boundary => (ShapeKind::Ellipse, BOUNDARY_STYLE),
        LifelineKind::Control => (ShapeKind::Ellipse, CONTROL_STYLE),
        LifelineKind::Entity => (ShapeKind::Ellipse, ENTITY_STYLE),
    }
}

/// Edge style for a message: dashed replies, open heads for async
fn message_style(reply: bool, is_async: bool) -> &'static str {
    match (reply, is_async) {
        (false, false) => SYNC_STYLE,
        (false, true) => ASYNC_STYLE,
        (true, true) => REPLY_STYLE,
        (true, false) => REPLY_SYNC_STYLE,
    }
}

/// Sequence diagram renderer
pub struct SequenceRenderer {
    layout: SequenceLayoutAlgorithm,
    page_name: String,
}

impl SequenceRenderer {
    pub fn new() -> Self {
        Self::with_config(&RenderConfig::default())
    }

    pub fn with_config(config: &RenderConfig) -> Self {
        Self {
            layout: SequenceLayoutAlgorithm::with_spacing(config.sequence.clone()),
            page_name: config
                .page_name(DiagramKind::Sequence.page_name())
                .to_string(),
        }
    }
}

impl Default for SequenceRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<SequenceDatabase> for SequenceRenderer {
    type Output = Document;

    fn render(&self, database: &SequenceDatabase) -> Result<Self::Output> {
        let render_span = span!(Level::INFO, "render_sequence");
        let _enter = render_span.enter();

        let layout = self.layout.layout(database)?;
        let mut builder = DocumentBuilder::new(&self.page_name);

        // Fragment frames first so they sit behind everything else
        for fragment in &layout.fragments {
            builder.add_node(
                ShapeKind::Container,
                fragment.label.as_str(),
                fragment.bounds,
                FRAGMENT_STYLE,
            );
            for separator in &fragment.separators {
                builder.add_plain_edge(
                    EdgeEnd::point(fragment.bounds.x, separator.y),
                    EdgeEnd::point(fragment.bounds.right(), separator.y),
                    separator.label.as_str(),
                    SEPARATOR_STYLE,
                );
            }
        }

        for lifeline in &layout.lifelines {
            let (shape, style) = head_shape(lifeline.kind);
            let head = builder.add_entity(
                &lifeline.id,
                shape,
                lifeline.label.as_str(),
                lifeline.bounds,
                style,
            );
            builder.add_plain_edge(
                EdgeEnd::Node(head),
                EdgeEnd::point(lifeline.center_x, lifeline.line_end_y),
                "",
                LIFELINE_STYLE,
            );
        }

        for positioned in &layout.messages {
            let (Some(from_x), Some(to_x)) = (positioned.from_x, positioned.to_x) else {
                debug!(
                    index = positioned.index,
                    from = %positioned.message.from,
                    to = %positioned.message.to,
                    "Dropping message with unresolved endpoint"
                );
                continue;
            };

            let message = &positioned.message;
            let target_y = if from_x == to_x {
                positioned.y + SELF_MESSAGE_DROP
            } else {
                positioned.y
            };
            builder.add_edge(
                EdgeEnd::point(from_x, positioned.y),
                EdgeEnd::point(to_x, target_y),
                message.label.as_str(),
                message_style(message.reply, message.is_async),
            );
        }

        Ok(builder.finish())
    }

    fn name(&self) -> &'static str {
        "sequence"
    }

    fn format(&self) -> &'static str {
        "drawio"
    }
}
