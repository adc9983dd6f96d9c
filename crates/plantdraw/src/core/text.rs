//! Shared text utilities for diagram conversion
//!
//! Line normalization used by every parser, the line-break placeholder that
//! keeps `\n` escapes out of structural parsing, and the escaping needed to
//! put labels into a draw.io document.

use unicode_width::UnicodeWidthStr;

/// Placeholder standing for an escaped line break inside a label.
///
/// Parsers substitute it for `\n` escapes; it is turned into a real break
/// only when the document is serialized.
pub const LINE_BREAK: &str = "\u{2029}";

/// Replace literal `\n` escapes with [`LINE_BREAK`]
pub fn encode_line_breaks(text: &str) -> String {
    text.replace("\\n", LINE_BREAK)
}

/// Replace [`LINE_BREAK`] placeholders with `with`
pub fn resolve_line_breaks(text: &str, with: &str) -> String {
    text.replace(LINE_BREAK, with)
}

/// Prefixes of lines that carry no structure for any supported kind
const IGNORED_PREFIXES: &[&str] = &[
    "skinparam",
    "title ",
    "header ",
    "footer ",
    "caption ",
    "hide ",
    "show ",
    "scale ",
    "!",
    "left to right direction",
    "top to bottom direction",
];

/// Normalize notation text into the lines parsers work on.
///
/// Lines are trimmed; blank lines, start/end markers, comments, notes,
/// legends and styling directives are removed.
///
/// # Example
/// ```
/// use plantdraw::core::normalize_lines;
///
/// let lines = normalize_lines("@startuml\n' comment\n  A -> B\n@enduml");
/// assert_eq!(lines, vec!["A -> B"]);
/// ```
pub fn normalize_lines(input: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut skip_until: Option<&'static [&'static str]> = None;
    let mut in_block_comment = false;

    for raw in input.lines() {
        let line = raw.trim();

        if in_block_comment {
            if line.contains("'/") {
                in_block_comment = false;
            }
            continue;
        }

        let lower = line.to_lowercase();

        if let Some(terminators) = skip_until {
            if terminators.iter().any(|t| lower == *t) {
                skip_until = None;
            }
            continue;
        }

        if line.is_empty() || lower.starts_with("@start") || lower.starts_with("@end") {
            continue;
        }

        if line.starts_with("/'") {
            if !line[2..].contains("'/") {
                in_block_comment = true;
            }
            continue;
        }

        if line.starts_with('\'') {
            continue;
        }

        if is_note_start(&lower) {
            if !line.contains(':') {
                skip_until = Some(&["end note", "endnote", "end hnote", "end rnote"]);
            }
            continue;
        }

        if lower == "legend" || lower.starts_with("legend ") {
            skip_until = Some(&["endlegend", "end legend"]);
            continue;
        }

        if lower.starts_with("skinparam") && line.ends_with('{') {
            skip_until = Some(&["}"]);
            continue;
        }

        if IGNORED_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            continue;
        }

        lines.push(line.to_string());
    }

    lines
}

fn is_note_start(lower: &str) -> bool {
    ["note ", "hnote ", "rnote ", "floating note "]
        .iter()
        .any(|p| lower.starts_with(p))
        || lower == "note"
}

/// Strip one pair of surrounding double quotes, if present
pub fn unquote(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

/// Escape the characters that HTML labels treat as markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for use inside a double-quoted XML attribute
pub fn escape_xml_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#xa;"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Display width of the widest line of a label
pub fn label_width(label: &str) -> usize {
    label
        .split(LINE_BREAK)
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0)
}

/// Number of display lines in a label
pub fn label_lines(label: &str) -> usize {
    label.split(LINE_BREAK).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_markers_and_blanks() {
        let lines = normalize_lines("@startuml\n\n   start  \n:work;\n@enduml\n");
        assert_eq!(lines, vec!["start", ":work;"]);
    }

    #[test]
    fn test_normalize_drops_comments() {
        let input = "' single\nA -> B\n/' block\nstill block\n'/\nB -> C\n/' inline '/\nC -> D";
        assert_eq!(normalize_lines(input), vec!["A -> B", "B -> C", "C -> D"]);
    }

    #[test]
    fn test_normalize_drops_notes() {
        let input = "A -> B\nnote left of A : short\nnote over B\nlong\ntext\nend note\nB -> A";
        assert_eq!(normalize_lines(input), vec!["A -> B", "B -> A"]);
    }

    #[test]
    fn test_normalize_drops_styling() {
        let input = "skinparam monochrome true\nskinparam class {\nBackgroundColor red\n}\ntitle Hello\nclass A";
        assert_eq!(normalize_lines(input), vec!["class A"]);
    }

    #[test]
    fn test_normalize_drops_legend_block() {
        let input = "start\nlegend\n| a | b |\nendlegend\nstop";
        assert_eq!(normalize_lines(input), vec!["start", "stop"]);
    }

    #[test]
    fn test_line_break_placeholder_round_trip() {
        let encoded = encode_line_breaks("Place\\nOrder");
        assert!(!encoded.contains("\\n"));
        assert_eq!(resolve_line_breaks(&encoded, "<br>"), "Place<br>Order");
        assert_eq!(label_lines(&encoded), 2);
        assert_eq!(label_width(&encoded), 5);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"Long Name\""), "Long Name");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("\"half"), "\"half");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_html("<<include>> & co"), "&lt;&lt;include&gt;&gt; &amp; co");
        assert_eq!(escape_xml_attr("a \"b\"\nc"), "a &quot;b&quot;&#xa;c");
    }
}
