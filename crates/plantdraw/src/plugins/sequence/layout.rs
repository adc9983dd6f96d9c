//! Sequence diagram layout algorithm
//!
//! Lifelines go left to right at a fixed pitch, messages top to bottom one
//! row each. Fragment boxes are derived from the message rows of their
//! sections.

use anyhow::Result;

use super::database::{Fragment, FragmentKind, LifelineKind, Message, SequenceDatabase};
use crate::core::{Bounds, LayoutAlgorithm, SequenceSpacing};

/// Positioned lifeline head and line
#[derive(Debug, Clone)]
pub struct PositionedLifeline {
    pub id: String,
    pub label: String,
    pub kind: LifelineKind,
    /// The head glyph
    pub bounds: Bounds,
    pub center_x: f64,
    pub line_end_y: f64,
}

/// Positioned message row
///
/// Endpoints that do not name a lifeline have no x coordinate.
#[derive(Debug, Clone)]
pub struct PositionedMessage {
    pub index: usize,
    pub from_x: Option<f64>,
    pub to_x: Option<f64>,
    pub y: f64,
    pub message: Message,
}

/// Dashed line between two fragment sections
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSeparator {
    pub y: f64,
    pub label: String,
}

/// Positioned fragment box
#[derive(Debug, Clone)]
pub struct PositionedFragment {
    pub kind: FragmentKind,
    pub label: String,
    pub bounds: Bounds,
    pub depth: usize,
    pub separators: Vec<SectionSeparator>,
}

/// Layout result containing all positioned elements
#[derive(Debug, Default)]
pub struct SequenceLayoutResult {
    pub lifelines: Vec<PositionedLifeline>,
    pub messages: Vec<PositionedMessage>,
    /// Outermost first
    pub fragments: Vec<PositionedFragment>,
}

/// Sequence diagram layout algorithm
pub struct SequenceLayoutAlgorithm {
    spacing: SequenceSpacing,
}

impl SequenceLayoutAlgorithm {
    pub fn new() -> Self {
        Self::with_spacing(SequenceSpacing::default())
    }

    pub fn with_spacing(spacing: SequenceSpacing) -> Self {
        Self { spacing }
    }

    fn message_y(&self, index: usize) -> f64 {
        self.spacing.first_message_y + index as f64 * self.spacing.message_spacing
    }

    fn head_size(&self, kind: LifelineKind) -> (f64, f64) {
        match kind {
            LifelineKind::Actor => (self.spacing.actor_width, self.spacing.actor_height),
            LifelineKind::Boundary | LifelineKind::Control | LifelineKind::Entity => (40.0, 40.0),
            _ => (self.spacing.head_width, self.spacing.head_height),
        }
    }

    fn center_x(&self, index: usize) -> f64 {
        self.spacing.origin_x
            + index as f64 * self.spacing.lifeline_spacing
            + self.spacing.head_width / 2.0
    }

    fn place_fragment(
        &self,
        fragment: &Fragment,
        database: &SequenceDatabase,
    ) -> PositionedFragment {
        let s = &self.spacing;
        let (start, end) = fragment.span();

        let top = self.message_y(start) - s.fragment_padding;
        let bottom = if end > start {
            self.message_y(end - 1) + s.fragment_padding
        } else {
            top + 2.0 * s.fragment_padding
        };

        // Lifelines touched by the fragment's messages, else all of them
        let mut touched: Vec<usize> = database.messages()[start..end]
            .iter()
            .flat_map(|m| [database.lifeline_index(&m.from), database.lifeline_index(&m.to)])
            .flatten()
            .collect();
        if touched.is_empty() {
            touched = (0..database.lifelines().len()).collect();
        }
        let first = touched.iter().copied().min().unwrap_or(0);
        let last = touched.iter().copied().max().unwrap_or(0);

        let inset = fragment.depth as f64 * s.fragment_inset;
        let left = self.center_x(first) - s.head_width / 2.0 - s.fragment_padding + inset;
        let right = self.center_x(last) + s.head_width / 2.0 + s.fragment_padding - inset;

        let separators = fragment
            .sections
            .iter()
            .skip(1)
            .map(|section| SectionSeparator {
                y: self.message_y(section.start) - s.message_spacing / 2.0,
                label: format!("[{}]", section.label),
            })
            .collect();

        let guard = fragment
            .sections
            .first()
            .map(|section| section.label.as_str())
            .unwrap_or("");
        let label = if guard.is_empty() {
            fragment.kind.keyword().to_string()
        } else {
            format!("{} [{}]", fragment.kind.keyword(), guard)
        };

        PositionedFragment {
            kind: fragment.kind,
            label,
            bounds: Bounds::new(left, top, (right - left).max(0.0), bottom - top),
            depth: fragment.depth,
            separators,
        }
    }
}

impl Default for SequenceLayoutAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm<SequenceDatabase> for SequenceLayoutAlgorithm {
    type Output = SequenceLayoutResult;

    fn layout(&self, database: &SequenceDatabase) -> Result<Self::Output> {
        let s = &self.spacing;
        let message_count = database.messages().len();
        let last_row = self.message_y(message_count.saturating_sub(1));
        let line_end_y = last_row + s.tail;

        let lifelines = database
            .lifelines()
            .iter()
            .enumerate()
            .map(|(i, lifeline)| {
                let center_x = self.center_x(i);
                let (width, height) = self.head_size(lifeline.kind);
                PositionedLifeline {
                    id: lifeline.id.clone(),
                    label: lifeline.label.clone(),
                    kind: lifeline.kind,
                    bounds: Bounds::centered(center_x, s.head_y, width, height),
                    center_x,
                    line_end_y,
                }
            })
            .collect();

        let messages = database
            .messages()
            .iter()
            .enumerate()
            .map(|(index, message)| PositionedMessage {
                index,
                from_x: database.lifeline_index(&message.from).map(|i| self.center_x(i)),
                to_x: database.lifeline_index(&message.to).map(|i| self.center_x(i)),
                y: self.message_y(index),
                message: message.clone(),
            })
            .collect();

        let mut fragments: Vec<PositionedFragment> = database
            .fragments()
            .iter()
            .map(|fragment| self.place_fragment(fragment, database))
            .collect();
        fragments.sort_by_key(|fragment| fragment.depth);

        Ok(SequenceLayoutResult {
            lifelines,
            messages,
            fragments,
        })
    }

    fn name(&self) -> &'static str {
        "sequence-rows"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}
