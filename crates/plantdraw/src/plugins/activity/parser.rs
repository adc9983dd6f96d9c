//! Activity diagram parser
//!
//! A line-driven state machine. Open `if` and `fork` blocks live on two
//! explicit frame stacks; the cursor marks where the next transition
//! leaves from. All mutable state lives in an [`ActivitySession`] created
//! per call to [`Parser::parse`].

use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::database::{ActivityDatabase, ActivityKind, ActivityNode, Side, Transition};
use super::frames::{Cursor, DecisionFrame, ForkFrame};
use crate::core::text::{encode_line_breaks, LINE_BREAK};
use crate::core::{normalize_lines, Parser};

/// One classified activity line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityLine {
    Start,
    Stop,
    /// `kill` / `detach`: the path ends without a node
    Detach,
    Action(String),
    If { condition: String, label: String },
    Else(Option<String>),
    EndIf,
    Fork,
    ForkAgain,
    EndFork,
    Lane { label: String, color: Option<String> },
}

/// Text between the first `(` and its matching `)`, and the rest
fn parenthesized(text: &str) -> Option<(&str, &str)> {
    let open = text.find('(')?;
    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let close = open + i;
                    return Some((text[open + 1..close].trim(), text[close + 1..].trim()));
                }
            }
            _ => {}
        }
    }
    None
}

/// `|Lane|` or `|#color|Lane|`; other pipe-framed lines are table rows
fn parse_lane(line: &str) -> Option<(String, Option<String>)> {
    let inner = line.strip_prefix('|')?.strip_suffix('|')?;
    let parts: Vec<&str> = inner.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [label] if !label.is_empty() => Some((label.to_string(), None)),
        [color, label] if color.starts_with('#') && !label.is_empty() => {
            Some((label.to_string(), Some(color.to_string())))
        }
        _ => None,
    }
}

/// Classify a complete (already accumulated) line
pub fn classify_line(line: &str) -> Option<ActivityLine> {
    let lower = line.to_lowercase();

    match lower.as_str() {
        "start" => return Some(ActivityLine::Start),
        "stop" | "end" => return Some(ActivityLine::Stop),
        "kill" | "detach" => return Some(ActivityLine::Detach),
        "endif" | "end if" => return Some(ActivityLine::EndIf),
        "fork" => return Some(ActivityLine::Fork),
        "fork again" => return Some(ActivityLine::ForkAgain),
        "end fork" | "end merge" | "endfork" => return Some(ActivityLine::EndFork),
        "else" => return Some(ActivityLine::Else(None)),
        _ => {}
    }

    if let Some(text) = line.strip_prefix(':').and_then(|t| t.strip_suffix(';')) {
        return Some(ActivityLine::Action(encode_line_breaks(text.trim())));
    }

    if lower.starts_with("if ") || lower.starts_with("if(") {
        let (condition, rest) = parenthesized(&line[2..])?;
        let label = rest
            .strip_prefix("then")
            .and_then(parenthesized)
            .map(|(label, _)| label)
            .unwrap_or("");
        return Some(ActivityLine::If {
            condition: encode_line_breaks(condition),
            label: label.to_string(),
        });
    }

    if lower.starts_with("else ") || lower.starts_with("else(") {
        let label = parenthesized(&line[4..]).map(|(label, _)| label.to_string());
        return Some(ActivityLine::Else(label));
    }

    if let Some((label, color)) = parse_lane(line) {
        return Some(ActivityLine::Lane { label, color });
    }

    None
}

/// Per-conversion parser state
#[derive(Debug, Default)]
pub struct ActivitySession {
    cursor: Cursor,
    decisions: Vec<DecisionFrame>,
    forks: Vec<ForkFrame>,
    lane: Option<String>,
    /// Lines of an action whose `;` has not been seen yet
    pending_action: Option<Vec<String>>,
    counters: HashMap<ActivityKind, usize>,
}

impl ActivitySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn open_decisions(&self) -> usize {
        self.decisions.len()
    }

    pub fn open_forks(&self) -> usize {
        self.forks.len()
    }

    fn next_id(&mut self, kind: ActivityKind) -> String {
        let counter = self.counters.entry(kind).or_insert(0);
        *counter += 1;
        format!("{}_{}", kind.id_prefix(), counter)
    }

    fn side(&self) -> Side {
        match self.decisions.last() {
            Some(frame) if frame.in_else => Side::Else,
            _ => Side::Center,
        }
    }

    /// Create a node positioned by the current frame context
    fn create(
        &mut self,
        kind: ActivityKind,
        label: &str,
        database: &mut ActivityDatabase,
    ) -> Result<String> {
        let id = self.next_id(kind);
        let node = ActivityNode::new(&id, kind).with_label(label).placed(
            self.decisions.len(),
            self.side(),
            self.lane.clone(),
        );
        trace!(id = %id, kind = ?kind, "Created activity node");
        database.add_activity(node)?;
        Ok(id)
    }

    /// Transition from a cursor into `to`, if the cursor is live
    fn connect(&self, from: &Cursor, to: &str, database: &mut ActivityDatabase) -> Result<()> {
        if let Some(node) = &from.node {
            let label = from.pending_label.clone().unwrap_or_default();
            database.add_transition(Transition::new(node, to, label))?;
        }
        Ok(())
    }

    /// Create a node and link it from the cursor
    fn step(
        &mut self,
        kind: ActivityKind,
        label: &str,
        database: &mut ActivityDatabase,
    ) -> Result<String> {
        let id = self.create(kind, label, database)?;
        self.connect(&self.cursor, &id, database)?;
        Ok(id)
    }

    /// Feed one normalized line
    pub fn feed(&mut self, line: &str, database: &mut ActivityDatabase) -> Result<()> {
        if let Some(mut lines) = self.pending_action.take() {
            match line.strip_suffix(';') {
                Some(last) => {
                    lines.push(last.trim().to_string());
                    let text = encode_line_breaks(&lines.join(LINE_BREAK));
                    return self.apply(ActivityLine::Action(text), database);
                }
                None => {
                    lines.push(line.to_string());
                    self.pending_action = Some(lines);
                    return Ok(());
                }
            }
        }

        if let Some(first) = line.strip_prefix(':') {
            if !line.ends_with(';') {
                self.pending_action = Some(vec![first.trim().to_string()]);
                return Ok(());
            }
        }

        match classify_line(line) {
            Some(parsed) => self.apply(parsed, database),
            None => {
                trace!(line = %line, "Skipping unrecognized line");
                Ok(())
            }
        }
    }

    fn apply(&mut self, line: ActivityLine, database: &mut ActivityDatabase) -> Result<()> {
        match line {
            ActivityLine::Start => {
                let id = self.create(ActivityKind::Start, "", database)?;
                self.cursor = Cursor::at(id);
            }
            ActivityLine::Stop => {
                self.step(ActivityKind::Stop, "", database)?;
                self.cursor = Cursor::terminated();
            }
            ActivityLine::Detach => {
                self.cursor = Cursor::terminated();
            }
            ActivityLine::Action(text) => {
                let id = self.step(ActivityKind::Action, &text, database)?;
                self.cursor = Cursor::at(id);
            }
            ActivityLine::If { condition, label } => {
                let id = self.step(ActivityKind::Decision, &condition, database)?;
                let frame = DecisionFrame::open(id, label);
                self.cursor = frame.then_start();
                self.decisions.push(frame);
            }
            ActivityLine::Else(label) => {
                let Some(frame) = self.decisions.pop() else {
                    trace!("Ignoring else outside of if");
                    return Ok(());
                };
                let then_end = std::mem::take(&mut self.cursor);
                let frame = frame.with_else(label, then_end);
                self.cursor = frame.else_start();
                self.decisions.push(frame);
            }
            ActivityLine::EndIf => {
                let Some(frame) = self.decisions.pop() else {
                    trace!("Ignoring unmatched endif");
                    return Ok(());
                };
                let current = std::mem::take(&mut self.cursor);
                let ends = frame.branch_ends(current);
                if ends.iter().any(Cursor::is_live) {
                    let merge = self.create(ActivityKind::Merge, "", database)?;
                    for end in &ends {
                        self.connect(end, &merge, database)?;
                    }
                    self.cursor = Cursor::at(merge);
                } else {
                    debug!(decision = %frame.decision_id, "Both branches terminated, no merge");
                    self.cursor = Cursor::terminated();
                }
            }
            ActivityLine::Fork => {
                let id = self.step(ActivityKind::Fork, "", database)?;
                let frame = ForkFrame::open(id);
                self.cursor = frame.branch_start();
                self.forks.push(frame);
            }
            ActivityLine::ForkAgain => {
                let Some(frame) = self.forks.pop() else {
                    trace!("Ignoring fork again outside of fork");
                    return Ok(());
                };
                let end = std::mem::take(&mut self.cursor);
                let frame = frame.with_branch(end);
                self.cursor = frame.branch_start();
                self.forks.push(frame);
            }
            ActivityLine::EndFork => {
                let Some(frame) = self.forks.pop() else {
                    trace!("Ignoring unmatched end fork");
                    return Ok(());
                };
                let end = std::mem::take(&mut self.cursor);
                let frame = frame.with_branch(end);
                let join = self.create(ActivityKind::Join, "", database)?;
                for end in &frame.branch_ends {
                    self.connect(end, &join, database)?;
                }
                self.cursor = Cursor::at(join);
            }
            ActivityLine::Lane { label, color } => {
                trace!(lane = %label, "Switching swim-lane");
                database.add_lane(label.as_str(), color);
                self.lane = Some(label);
            }
        }
        Ok(())
    }

    /// End of input: open frames and unterminated actions are dropped
    pub fn finish(self) {
        if self.pending_action.is_some() || !self.decisions.is_empty() || !self.forks.is_empty() {
            debug!(
                decisions = self.decisions.len(),
                forks = self.forks.len(),
                pending_action = self.pending_action.is_some(),
                "Discarding unclosed constructs"
            );
        }
    }
}

/// Activity diagram parser
pub struct ActivityParser;

impl ActivityParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ActivityParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<ActivityDatabase> for ActivityParser {
    fn parse(&self, input: &str, database: &mut ActivityDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_activity", input_len = input.len());
        let _enter = parse_span.enter();

        let mut session = ActivitySession::new();
        for line in normalize_lines(input) {
            session.feed(&line, database)?;
        }
        session.finish();

        debug!(
            nodes = database.activities().len(),
            transitions = database.transitions().len(),
            lanes = database.lanes().len(),
            "Parsed activity diagram"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "activity"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Database;

    fn parse(input: &str) -> ActivityDatabase {
        let mut db = ActivityDatabase::new();
        ActivityParser::new().parse(input, &mut db).unwrap();
        db
    }

    fn edges(db: &ActivityDatabase) -> Vec<(&str, &str, &str)> {
        db.transitions()
            .iter()
            .map(|t| (t.from.as_str(), t.to.as_str(), t.label.as_str()))
            .collect()
    }

    #[test]
    fn test_classify_lines() {
        assert_eq!(classify_line("start"), Some(ActivityLine::Start));
        assert_eq!(classify_line("end"), Some(ActivityLine::Stop));
        assert_eq!(
            classify_line(":Load (file);"),
            Some(ActivityLine::Action("Load (file)".into()))
        );
        assert_eq!(
            classify_line("if (valid (strict)?) then (yes)"),
            Some(ActivityLine::If {
                condition: "valid (strict)?".into(),
                label: "yes".into()
            })
        );
        assert_eq!(
            classify_line("if (ok?) then"),
            Some(ActivityLine::If {
                condition: "ok?".into(),
                label: String::new()
            })
        );
        assert_eq!(classify_line("else (no way)"), Some(ActivityLine::Else(Some("no way".into()))));
        assert_eq!(classify_line("End If"), Some(ActivityLine::EndIf));
        assert_eq!(classify_line("elseif (x) then"), None);
    }

    #[test]
    fn test_lane_lines() {
        assert_eq!(
            classify_line("|Customer|"),
            Some(ActivityLine::Lane {
                label: "Customer".into(),
                color: None
            })
        );
        assert_eq!(
            classify_line("|#AntiqueWhite|Shop|"),
            Some(ActivityLine::Lane {
                label: "Shop".into(),
                color: Some("#AntiqueWhite".into())
            })
        );
        assert_eq!(classify_line("| a | b | c |"), None);
    }

    #[test]
    fn test_linear_flow() {
        let db = parse("@startuml\nstart\n:one;\n:two;\nstop\n@enduml");
        assert_eq!(
            edges(&db),
            vec![
                ("start_1", "action_1", ""),
                ("action_1", "action_2", ""),
                ("action_2", "stop_1", ""),
            ]
        );
    }

    #[test]
    fn test_branch_labels_travel_with_cursor() {
        let db = parse(
            "@startuml\nstart\nif (ok?) then (yes)\n:a;\nelse (no)\n:b;\nendif\n:after;\n@enduml",
        );
        let e = edges(&db);
        assert!(e.contains(&("decision_1", "action_1", "yes")));
        assert!(e.contains(&("decision_1", "action_2", "no")));
        assert!(e.contains(&("action_1", "merge_1", "")));
        assert!(e.contains(&("action_2", "merge_1", "")));
        assert!(e.contains(&("merge_1", "action_3", "")));
        assert_eq!(db.transitions_into("merge_1").count(), 2);
    }

    #[test]
    fn test_empty_branch_carries_label_to_merge() {
        let db = parse("@startuml\nstart\nif (skip?) then (yes)\nelse (no)\n:work;\nendif\n@enduml");
        let e = edges(&db);
        assert!(e.contains(&("decision_1", "merge_1", "yes")));
        assert!(e.contains(&("action_1", "merge_1", "")));
    }

    #[test]
    fn test_missing_else_uses_default_label() {
        let db = parse("@startuml\nstart\nif (c) then (yes)\n:a;\nendif\n@enduml");
        assert!(edges(&db).contains(&("decision_1", "merge_1", "no")));
    }

    #[test]
    fn test_both_branches_stop_no_merge() {
        let db = parse(
            "@startuml\nstart\nif (c) then (yes)\n:a;\nstop\nelse (no)\n:b;\nstop\nendif\n:orphan;\n@enduml",
        );
        assert_eq!(db.count_kind(ActivityKind::Merge), 0);
        assert_eq!(db.count_kind(ActivityKind::Stop), 2);
        assert!(db.get_node("stop_1").is_some());
        assert!(db.get_node("stop_2").is_some());
        assert_eq!(db.transitions_into("action_3").count(), 0);
    }

    #[test]
    fn test_one_branch_stops() {
        let db = parse("@startuml\nstart\nif (c) then (yes)\nstop\nelse (no)\n:b;\nendif\n@enduml");
        assert_eq!(db.count_kind(ActivityKind::Merge), 1);
        assert_eq!(db.transitions_into("merge_1").count(), 1);
    }

    #[test]
    fn test_side_and_depth() {
        let db = parse(
            "@startuml\nstart\nif (a) then\n:x;\nelse\nif (b) then\n:y;\nendif\nendif\n@enduml",
        );
        let x = db.get_node("action_1").unwrap();
        assert_eq!((x.depth, x.side), (1, Side::Center));
        let inner = db.get_node("decision_2").unwrap();
        assert_eq!((inner.depth, inner.side), (1, Side::Else));
        let y = db.get_node("action_2").unwrap();
        assert_eq!((y.depth, y.side), (2, Side::Center));
    }

    #[test]
    fn test_fork_join() {
        let db = parse(
            "@startuml\nstart\nfork\n:a;\nfork again\n:b;\nfork again\n:c;\nend fork\n:d;\n@enduml",
        );
        let into_join: Vec<&str> = db.transitions_into("join_1").map(|t| t.from.as_str()).collect();
        assert_eq!(into_join, vec!["action_1", "action_2", "action_3"]);
        assert_eq!(db.transitions_from("fork_1").count(), 3);
        assert!(edges(&db).contains(&("join_1", "action_4", "")));
    }

    #[test]
    fn test_multiline_action() {
        let db = parse("@startuml\nstart\n:first line\nsecond line;\nstop\n@enduml");
        let action = db.get_node("action_1").unwrap();
        assert_eq!(action.label, format!("first line{}second line", LINE_BREAK));
    }

    #[test]
    fn test_lanes_attach_to_nodes() {
        let db = parse("@startuml\n|Customer|\nstart\n:order;\n|#pink|Shop|\n:ship;\nstop\n@enduml");
        assert_eq!(db.lanes().len(), 2);
        assert_eq!(db.get_node("action_1").unwrap().lane.as_deref(), Some("Customer"));
        assert_eq!(db.get_node("action_2").unwrap().lane.as_deref(), Some("Shop"));
    }

    #[test]
    fn test_unmatched_closers_ignored() {
        let db = parse("@startuml\nstart\nendif\nend fork\nelse\nfork again\n:a;\n@enduml");
        assert_eq!(db.node_count(), 2);
        assert_eq!(edges(&db), vec![("start_1", "action_1", "")]);
    }

    #[test]
    fn test_detach_ends_path() {
        let db = parse("@startuml\nstart\n:a;\ndetach\n:b;\n@enduml");
        assert_eq!(db.transitions_into("action_2").count(), 0);
    }

    #[test]
    fn test_sessions_are_independent() {
        let input = "@startuml\nstart\nstop\n@enduml";
        let first = parse(input);
        let second = parse(input);
        assert_eq!(first.activities(), second.activities());
    }
}
