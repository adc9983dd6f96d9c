//! Control-flow frames of the activity parser
//!
//! Frames are immutable records kept on explicit stacks. Updating the
//! innermost frame means popping it and pushing the record returned by one
//! of the `with_*` builders.

/// Position from which the next transition leaves
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Last node on the path; `None` once the path has terminated
    pub node: Option<String>,
    /// Label for the next transition leaving `node`
    pub pending_label: Option<String>,
}

impl Cursor {
    pub fn at(node: impl Into<String>) -> Self {
        Self {
            node: Some(node.into()),
            pending_label: None,
        }
    }

    /// A cursor at `node` whose next transition carries `label`
    pub fn labelled(node: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            node: Some(node.into()),
            pending_label: (!label.is_empty()).then_some(label),
        }
    }

    pub fn terminated() -> Self {
        Self::default()
    }

    pub fn is_live(&self) -> bool {
        self.node.is_some()
    }
}

/// An open `if` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionFrame {
    pub decision_id: String,
    pub then_label: String,
    pub else_label: String,
    /// Where the `then` branch ended, recorded on `else`
    pub then_end: Option<Cursor>,
    pub in_else: bool,
}

/// Label of the `else` branch when none is written
pub const DEFAULT_ELSE_LABEL: &str = "no";

impl DecisionFrame {
    pub fn open(decision_id: impl Into<String>, then_label: impl Into<String>) -> Self {
        Self {
            decision_id: decision_id.into(),
            then_label: then_label.into(),
            else_label: DEFAULT_ELSE_LABEL.to_string(),
            then_end: None,
            in_else: false,
        }
    }

    /// The frame after `else`: the then branch is closed at `then_end`
    pub fn with_else(&self, label: Option<String>, then_end: Cursor) -> Self {
        Self {
            decision_id: self.decision_id.clone(),
            then_label: self.then_label.clone(),
            else_label: label.unwrap_or_else(|| self.else_label.clone()),
            then_end: Some(then_end),
            in_else: true,
        }
    }

    /// Cursor at the start of the `then` branch
    pub fn then_start(&self) -> Cursor {
        Cursor::labelled(&self.decision_id, &self.then_label)
    }

    /// Cursor at the start of the `else` branch
    pub fn else_start(&self) -> Cursor {
        Cursor::labelled(&self.decision_id, &self.else_label)
    }

    /// Both branch ends when the block closes with `current` as the cursor.
    ///
    /// Without an `else`, the implicit else branch is empty and leaves the
    /// decision directly.
    pub fn branch_ends(&self, current: Cursor) -> [Cursor; 2] {
        match &self.then_end {
            Some(then_end) if self.in_else => [then_end.clone(), current],
            _ => [current, self.else_start()],
        }
    }
}

/// An open `fork` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkFrame {
    pub fork_id: String,
    /// Ends of the branches closed so far, in branch order
    pub branch_ends: Vec<Cursor>,
}

impl ForkFrame {
    pub fn open(fork_id: impl Into<String>) -> Self {
        Self {
            fork_id: fork_id.into(),
            branch_ends: Vec::new(),
        }
    }

    /// The frame with one more closed branch
    pub fn with_branch(&self, end: Cursor) -> Self {
        let mut branch_ends = self.branch_ends.clone();
        branch_ends.push(end);
        Self {
            fork_id: self.fork_id.clone(),
            branch_ends,
        }
    }

    /// Cursor at the start of a new parallel branch
    pub fn branch_start(&self) -> Cursor {
        Cursor::at(&self.fork_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_label_is_not_pending() {
        assert_eq!(Cursor::labelled("d", "").pending_label, None);
        assert_eq!(Cursor::labelled("d", "yes").pending_label.as_deref(), Some("yes"));
        assert!(!Cursor::terminated().is_live());
    }

    #[test]
    fn test_else_keeps_original_frame() {
        let frame = DecisionFrame::open("decision_1", "yes");
        let updated = frame.with_else(None, Cursor::at("action_1"));

        assert!(!frame.in_else);
        assert!(frame.then_end.is_none());
        assert!(updated.in_else);
        assert_eq!(updated.else_label, DEFAULT_ELSE_LABEL);
        assert_eq!(updated.then_end, Some(Cursor::at("action_1")));
    }

    #[test]
    fn test_branch_ends_without_else() {
        let frame = DecisionFrame::open("decision_1", "yes");
        let [then_end, else_end] = frame.branch_ends(Cursor::at("action_1"));
        assert_eq!(then_end, Cursor::at("action_1"));
        assert_eq!(else_end, Cursor::labelled("decision_1", "no"));
    }

    #[test]
    fn test_branch_ends_with_else() {
        let frame = DecisionFrame::open("decision_1", "yes")
            .with_else(Some("other".into()), Cursor::terminated());
        let [then_end, else_end] = frame.branch_ends(Cursor::at("action_2"));
        assert!(!then_end.is_live());
        assert_eq!(else_end, Cursor::at("action_2"));
        assert_eq!(frame.else_start().pending_label.as_deref(), Some("other"));
    }

    #[test]
    fn test_fork_branches_accumulate() {
        let frame = ForkFrame::open("fork_1")
            .with_branch(Cursor::at("a"))
            .with_branch(Cursor::at("b"));
        assert_eq!(frame.branch_ends.len(), 2);
        assert_eq!(frame.branch_start(), Cursor::at("fork_1"));
    }
}
