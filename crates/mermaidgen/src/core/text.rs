//! Shared text utilities for diagram emission

/// Characters that end a node title early or open a new construct
const RESERVED: &[char] = &['[', ']', '(', ')', '{', '}', '<', '>', '|', '"', ';'];

/// Characters that split a gantt line
const GANTT_BREAKERS: &[char] = &['\n', '\r', ':', ';', '#'];

/// Prepare a title for use between shape delimiters
///
/// Plain titles are returned unchanged. Titles containing Mermaid
/// delimiter characters are wrapped in double quotes, with embedded quotes
/// written as the `#quot;` entity. Line breaks become `<br/>`, which
/// forces quoting.
///
/// # Example
/// ```
/// use mermaidgen::core::escape_label;
///
/// assert_eq!(escape_label("i-123"), "i-123");
/// assert_eq!(escape_label("f(x)"), "\"f(x)\"");
/// ```
pub fn escape_label(label: &str) -> String {
    let label = label.replace("\r\n", "\n").replace(['\r', '\n'], "<br/>");
    if !label.contains(RESERVED) {
        return label;
    }
    format!("\"{}\"", label.replace('"', "#quot;"))
}

/// Prepare free text for a gantt title, section or task line
///
/// Gantt lines have no quoting, so line breaks and the `:`, `;` and `#`
/// markers are replaced with spaces.
///
/// # Example
/// ```
/// use mermaidgen::core::flatten_text;
///
/// assert_eq!(flatten_text("Phase 1: build"), "Phase 1  build");
/// ```
pub fn flatten_text(text: &str) -> String {
    text.replace(GANTT_BREAKERS, " ")
}

/// Prepare free text for a quoted `click` argument
pub fn escape_quoted(text: &str) -> String {
    text.replace('"', "#quot;")
}
