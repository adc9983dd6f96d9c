//! Sequence diagram parser
//!
//! Declarations and fragment keywords are recognized by their first word;
//! message lines go through the chumsky grammar in `chumsky_parser`.

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::chumsky_parser::parse_message;
use super::database::{
    Fragment, FragmentKind, FragmentSection, Lifeline, LifelineKind, Message, SequenceDatabase,
};
use crate::core::text::unquote;
use crate::core::{normalize_lines, Parser};

/// Directives that carry no structure for the model, matched as whole words
const IGNORED_KEYWORDS: &[&str] = &[
    "activate",
    "deactivate",
    "autonumber",
    "return",
    "destroy",
    "create",
    "ref",
    "newpage",
    "box",
    "end box",
];

/// Separator and spacing lines, matched as prefixes
const IGNORED_SYMBOLS: &[&str] = &["==", "...", "||"];

/// An open combined fragment
///
/// Frames are immutable; adding a section builds a new frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentFrame {
    pub kind: FragmentKind,
    pub sections: Vec<FragmentSection>,
}

impl FragmentFrame {
    pub fn open(kind: FragmentKind, label: impl Into<String>, start: usize) -> Self {
        Self {
            kind,
            sections: vec![FragmentSection {
                label: label.into(),
                start,
            }],
        }
    }

    /// A copy of this frame with one more section starting at `start`
    pub fn with_section(&self, label: impl Into<String>, start: usize) -> Self {
        let mut sections = self.sections.clone();
        sections.push(FragmentSection {
            label: label.into(),
            start,
        });
        Self {
            kind: self.kind,
            sections,
        }
    }

    pub fn close(self, end: usize, depth: usize) -> Fragment {
        Fragment {
            kind: self.kind,
            sections: self.sections,
            end,
            depth,
        }
    }
}

/// Sequence diagram parser
pub struct SequenceParser;

impl SequenceParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a declaration like `participant "Long Name" as L` or `actor User`
    fn parse_declaration(&self, line: &str) -> Option<Lifeline> {
        let (keyword, rest) = split_keyword(line);
        let kind = LifelineKind::from_keyword(keyword)?;
        if rest.is_empty() || rest.starts_with("->") {
            return None;
        }

        let lifeline = match rest.find(" as ") {
            Some(pos) => {
                let left = rest[..pos].trim();
                let right = rest[pos + 4..].trim();
                if right.starts_with('"') {
                    // Alias as "Display"
                    let label = leading_name(right)?;
                    Lifeline::with_label(unquote(left), label)
                } else {
                    // "Display" as Alias
                    let id = leading_name(right)?;
                    Lifeline::with_label(id, unquote(left))
                }
            }
            None => Lifeline::new(leading_name(rest)?),
        };

        Some(lifeline.with_kind(kind))
    }
}

impl Default for SequenceParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Split off the first word (lowercased comparison is left to the caller)
fn split_keyword(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    }
}

/// The quoted string or first bare token at the start of `text`
fn leading_name(text: &str) -> Option<String> {
    let name = if let Some(quoted) = text.strip_prefix('"') {
        quoted.split('"').next()?
    } else {
        text.split_whitespace().next()?
    };
    (!name.is_empty()).then(|| name.to_string())
}

/// True when `lower` is `keyword` alone or followed by whitespace
fn starts_with_word(lower: &str, keyword: &str) -> bool {
    lower
        .strip_prefix(keyword)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

fn is_ignored(lower: &str) -> bool {
    IGNORED_KEYWORDS.iter().any(|k| starts_with_word(lower, k))
        || IGNORED_SYMBOLS.iter().any(|s| lower.starts_with(s))
}

fn is_end_line(lower: &str) -> bool {
    if lower == "end" {
        return true;
    }
    match lower.strip_prefix("end ") {
        Some(rest) => FragmentKind::from_keyword(rest.trim()).is_some(),
        None => false,
    }
}

impl Parser<SequenceDatabase> for SequenceParser {
    fn parse(&self, input: &str, database: &mut SequenceDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_sequence", input_len = input.len());
        let _enter = parse_span.enter();

        let mut frames: Vec<FragmentFrame> = Vec::new();

        for line in normalize_lines(input) {
            let lower = line.to_lowercase();
            let index = database.messages().len();

            if is_ignored(&lower) {
                trace!(line = %line, "Ignoring line");
                continue;
            }

            if let Some(lifeline) = self.parse_declaration(&line) {
                trace!(id = %lifeline.id, kind = ?lifeline.kind, "Declared lifeline");
                database.add_lifeline(lifeline)?;
                continue;
            }

            let (keyword, rest) = split_keyword(&line);

            if let Some(kind) = FragmentKind::from_keyword(keyword) {
                trace!(kind = ?kind, label = rest, index, "Opening fragment");
                frames.push(FragmentFrame::open(kind, rest, index));
                continue;
            }

            if keyword.eq_ignore_ascii_case("else") {
                match frames.pop() {
                    Some(frame) => frames.push(frame.with_section(rest, index)),
                    None => debug!("Ignoring else outside a fragment"),
                }
                continue;
            }

            if is_end_line(&lower) {
                match frames.pop() {
                    Some(frame) => {
                        let depth = frames.len();
                        trace!(kind = ?frame.kind, depth, end = index, "Closing fragment");
                        database.add_fragment(frame.close(index, depth));
                    }
                    None => debug!("Ignoring unmatched end"),
                }
                continue;
            }

            if let Some(parsed) = parse_message(&line) {
                trace!(from = %parsed.from, to = %parsed.to, "Parsed message");
                database.add_message(
                    Message::new(parsed.from, parsed.to, parsed.label)
                        .with_reply(parsed.reply)
                        .with_async(parsed.is_async),
                )?;
                continue;
            }

            trace!(line = %line, "Skipping unrecognized line");
        }

        if !frames.is_empty() {
            debug!(open = frames.len(), "Discarding unclosed fragments");
        }

        database.infer_lifelines();

        debug!(
            lifelines = database.lifelines().len(),
            messages = database.messages().len(),
            fragments = database.fragments().len(),
            "Parsed sequence diagram"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sequence"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}
