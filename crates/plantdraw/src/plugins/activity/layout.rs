//! Activity diagram layout algorithm
//!
//! One row per node in creation order. Nodes are centred on the base column
//! or on their swim-lane column, and `else` branch nodes shift right.

use anyhow::Result;

use super::database::{ActivityDatabase, ActivityKind, ActivityNode, Side};
use crate::core::{ActivitySpacing, Bounds, LayoutAlgorithm};

/// Height of a swim-lane header above the first row
const LANE_HEADER: f64 = 40.0;

/// Positioned activity node
#[derive(Debug, Clone)]
pub struct PositionedActivity {
    pub id: String,
    pub kind: ActivityKind,
    pub label: String,
    pub row: usize,
    pub bounds: Bounds,
}

/// Positioned swim-lane column
#[derive(Debug, Clone)]
pub struct PositionedLane {
    pub label: String,
    pub color: Option<String>,
    pub bounds: Bounds,
}

/// Layout result
#[derive(Debug, Default)]
pub struct ActivityLayoutResult {
    pub lanes: Vec<PositionedLane>,
    pub nodes: Vec<PositionedActivity>,
}

/// Activity diagram row layout
pub struct ActivityLayoutAlgorithm {
    spacing: ActivitySpacing,
}

impl ActivityLayoutAlgorithm {
    pub fn new() -> Self {
        Self::with_spacing(ActivitySpacing::default())
    }

    pub fn with_spacing(spacing: ActivitySpacing) -> Self {
        Self { spacing }
    }

    fn size(&self, kind: ActivityKind) -> (f64, f64) {
        let s = &self.spacing;
        match kind {
            ActivityKind::Start | ActivityKind::Stop => (s.marker_size, s.marker_size),
            ActivityKind::Action => (s.action_width, s.action_height),
            ActivityKind::Decision => (s.decision_size, s.decision_size),
            ActivityKind::Merge => (s.merge_size, s.merge_size),
            ActivityKind::Fork | ActivityKind::Join => (s.bar_width, s.bar_height),
        }
    }

    fn lane_center(&self, index: usize) -> f64 {
        let s = &self.spacing;
        s.lane_origin_x + index as f64 * s.lane_width + s.lane_width / 2.0
    }

    fn center_x(&self, node: &ActivityNode, database: &ActivityDatabase) -> f64 {
        let base = node
            .lane
            .as_deref()
            .and_then(|lane| database.lane_index(lane))
            .map(|index| self.lane_center(index))
            .unwrap_or(self.spacing.base_x);
        match node.side {
            Side::Center => base,
            Side::Else => base + self.spacing.else_offset,
        }
    }
}

impl Default for ActivityLayoutAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm<ActivityDatabase> for ActivityLayoutAlgorithm {
    type Output = ActivityLayoutResult;

    fn layout(&self, database: &ActivityDatabase) -> Result<Self::Output> {
        let s = &self.spacing;

        let nodes: Vec<PositionedActivity> = database
            .activities()
            .iter()
            .enumerate()
            .map(|(row, node)| {
                let (width, height) = self.size(node.kind);
                let y = s.origin_y + row as f64 * s.row_spacing;
                PositionedActivity {
                    id: node.id.clone(),
                    kind: node.kind,
                    label: node.label.clone(),
                    row,
                    bounds: Bounds::centered(self.center_x(node, database), y, width, height),
                }
            })
            .collect();

        let rows = database.activities().len().max(1) as f64;
        let top = s.origin_y - LANE_HEADER;
        let height = LANE_HEADER + rows * s.row_spacing;
        let lanes = database
            .lanes()
            .iter()
            .enumerate()
            .map(|(i, lane)| PositionedLane {
                label: lane.label.clone(),
                color: lane.color.clone(),
                bounds: Bounds::new(
                    s.lane_origin_x + i as f64 * s.lane_width,
                    top,
                    s.lane_width,
                    height,
                ),
            })
            .collect();

        Ok(ActivityLayoutResult { lanes, nodes })
    }

    fn name(&self) -> &'static str {
        "activity-rows"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Parser;
    use crate::plugins::activity::ActivityParser;

    fn layout(input: &str) -> ActivityLayoutResult {
        let mut db = ActivityDatabase::new();
        ActivityParser::new().parse(input, &mut db).unwrap();
        ActivityLayoutAlgorithm::new().layout(&db).unwrap()
    }

    fn node<'a>(result: &'a ActivityLayoutResult, id: &str) -> &'a PositionedActivity {
        result.nodes.iter().find(|n| n.id == id).unwrap()
    }

    #[test]
    fn test_rows_in_creation_order() {
        let result = layout("@startuml\nstart\n:a;\nstop\n@enduml");
        let ys: Vec<f64> = result.nodes.iter().map(|n| n.bounds.y).collect();
        assert_eq!(ys, vec![60.0, 160.0, 260.0]);
        assert!(result.nodes.iter().all(|n| n.bounds.center_x() == 300.0));
        assert_eq!(node(&result, "action_1").bounds.width, 160.0);
    }

    #[test]
    fn test_else_branch_shifts_right() {
        let result = layout("@startuml\nstart\nif (c) then\n:a;\nelse\n:b;\nendif\n@enduml");
        assert_eq!(node(&result, "action_1").bounds.center_x(), 300.0);
        assert_eq!(node(&result, "action_2").bounds.center_x(), 500.0);
        assert_eq!(node(&result, "merge_1").bounds.center_x(), 300.0);
    }

    #[test]
    fn test_nodes_snap_to_lane_columns() {
        let result = layout("@startuml\n|A|\nstart\n:a;\n|B|\n:b;\n|A|\n:c;\n@enduml");
        assert_eq!(result.lanes.len(), 2);
        assert_eq!(result.lanes[1].bounds.x, 290.0);
        assert_eq!(node(&result, "action_1").bounds.center_x(), 165.0);
        assert_eq!(node(&result, "action_2").bounds.center_x(), 415.0);
        assert_eq!(node(&result, "action_3").bounds.center_x(), 165.0);

        let lane = result.lanes[0].bounds;
        for positioned in &result.nodes {
            assert!(positioned.bounds.y >= lane.y);
            assert!(positioned.bounds.bottom() <= lane.bottom());
        }
    }

    #[test]
    fn test_bar_and_marker_sizes() {
        let result = layout("@startuml\nstart\nfork\n:a;\nend fork\nstop\n@enduml");
        assert_eq!(node(&result, "fork_1").bounds.height, 10.0);
        assert_eq!(node(&result, "join_1").bounds.width, 160.0);
        assert_eq!(node(&result, "stop_1").bounds.width, 30.0);
    }
}
