//! Render configuration
//!
//! Placement constants for every diagram kind, grouped per kind. The
//! defaults reproduce the stock layout; the CLI overrides individual fields.

use serde::{Deserialize, Serialize};

/// Sequence diagram placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceSpacing {
    pub origin_x: f64,
    pub lifeline_spacing: f64,
    pub head_y: f64,
    pub head_width: f64,
    pub head_height: f64,
    pub actor_width: f64,
    pub actor_height: f64,
    pub first_message_y: f64,
    pub message_spacing: f64,
    /// Lifeline length past the last message
    pub tail: f64,
    pub fragment_padding: f64,
    /// Horizontal inset per fragment nesting level
    pub fragment_inset: f64,
}

impl Default for SequenceSpacing {
    fn default() -> Self {
        Self {
            origin_x: 50.0,
            lifeline_spacing: 180.0,
            head_y: 100.0,
            head_width: 120.0,
            head_height: 40.0,
            actor_width: 30.0,
            actor_height: 60.0,
            first_message_y: 200.0,
            message_spacing: 50.0,
            tail: 60.0,
            fragment_padding: 20.0,
            fragment_inset: 10.0,
        }
    }
}

/// Class diagram grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassSpacing {
    pub origin_x: f64,
    pub origin_y: f64,
    pub columns: usize,
    pub column_spacing: f64,
    pub row_gap: f64,
    pub box_width: f64,
    pub base_height: f64,
    pub line_height: f64,
}

impl Default for ClassSpacing {
    fn default() -> Self {
        Self {
            origin_x: 50.0,
            origin_y: 50.0,
            columns: 3,
            column_spacing: 250.0,
            row_gap: 60.0,
            box_width: 200.0,
            base_height: 40.0,
            line_height: 20.0,
        }
    }
}

/// Use-case diagram columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UseCaseSpacing {
    pub primary_x: f64,
    pub usecase_x: f64,
    pub secondary_x: f64,
    pub origin_y: f64,
    pub row_spacing: f64,
    pub usecase_width: f64,
    pub usecase_height: f64,
    pub actor_width: f64,
    pub actor_height: f64,
    pub boundary_padding: f64,
}

impl Default for UseCaseSpacing {
    fn default() -> Self {
        Self {
            primary_x: 50.0,
            usecase_x: 250.0,
            secondary_x: 450.0,
            origin_y: 100.0,
            row_spacing: 120.0,
            usecase_width: 140.0,
            usecase_height: 70.0,
            actor_width: 30.0,
            actor_height: 60.0,
            boundary_padding: 30.0,
        }
    }
}

/// Activity diagram rows and lanes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivitySpacing {
    pub origin_y: f64,
    pub row_spacing: f64,
    pub base_x: f64,
    pub else_offset: f64,
    pub lane_origin_x: f64,
    pub lane_width: f64,
    pub action_width: f64,
    pub action_height: f64,
    pub marker_size: f64,
    pub decision_size: f64,
    pub merge_size: f64,
    pub bar_width: f64,
    pub bar_height: f64,
}

impl Default for ActivitySpacing {
    fn default() -> Self {
        Self {
            origin_y: 60.0,
            row_spacing: 100.0,
            base_x: 300.0,
            else_offset: 200.0,
            lane_origin_x: 40.0,
            lane_width: 250.0,
            action_width: 160.0,
            action_height: 60.0,
            marker_size: 30.0,
            decision_size: 80.0,
            merge_size: 30.0,
            bar_width: 160.0,
            bar_height: 10.0,
        }
    }
}

/// Configuration shared by all layouts and emitters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Page name; each kind has its own default
    pub name: Option<String>,
    pub sequence: SequenceSpacing,
    pub class: ClassSpacing,
    pub usecase: UseCaseSpacing,
    pub activity: ActivitySpacing,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the class grid column count (at least one)
    pub fn with_class_columns(mut self, columns: usize) -> Self {
        self.class.columns = columns.max(1);
        self
    }

    pub fn with_sequence(mut self, sequence: SequenceSpacing) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_activity(mut self, activity: ActivitySpacing) -> Self {
        self.activity = activity;
        self
    }

    /// Page name to use for a document of the given default name
    pub fn page_name<'a>(&'a self, default: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(default)
    }
}
