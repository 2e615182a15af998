//! Inline tokenizer and its inverse.
//!
//! A line of text is scanned left to right with one pattern that recognises,
//! at each position, a bold span `**…**`, an italic span `*…*` or a code span
//! `` `…` ``. A span's interior never contains its own delimiter, so spans are
//! flat and non-overlapping; every span carries exactly one mark. Delimiters
//! without a partner stay literal text.
//!
//! Tokenizing partitions the input, so `serialize_inlines(&tokenize(s)) == s`
//! for any single line `s`.

use crate::ir::nodes::{Inline, Mark, Marks};
use once_cell::sync::Lazy;
use regex::Regex;

static SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^*]+)\*\*|\*([^*]+)\*|`([^`]+)`").expect("valid regex for inline spans")
});

/// Split a line of text into text runs.
pub fn tokenize(line: &str) -> Vec<Inline> {
    let mut nodes = Vec::new();
    let mut plain = String::new();
    let mut cursor = 0;

    for captures in SPAN.captures_iter(line) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        plain.push_str(&line[cursor..whole.start()]);
        cursor = whole.end();

        let (mark, inner) = if let Some(bold) = captures.get(1) {
            (Mark::Bold, bold.as_str())
        } else if let Some(italic) = captures.get(2) {
            (Mark::Italic, italic.as_str())
        } else if let Some(code) = captures.get(3) {
            (Mark::Code, code.as_str())
        } else {
            continue;
        };

        if !plain.is_empty() {
            nodes.push(Inline::text(std::mem::take(&mut plain)));
        }
        nodes.push(Inline::marked(inner, mark));
    }

    plain.push_str(&line[cursor..]);
    if !plain.is_empty() {
        nodes.push(Inline::text(plain));
    }
    nodes
}

/// Render inline nodes back to markup.
///
/// Marks wrap the text innermost-first in application order (bold, italic,
/// code). A hard break renders as two trailing spaces and a newline.
pub fn serialize_inlines(content: &[Inline]) -> String {
    let mut out = String::new();
    for node in content {
        match node {
            Inline::Text { text, marks } => out.push_str(&wrap_marks(text, marks)),
            Inline::HardBreak => out.push_str("  \n"),
        }
    }
    out
}

fn wrap_marks(text: &str, marks: &Marks) -> String {
    marks.iter().fold(text.to_string(), |inner, mark| {
        let delimiter = match mark {
            Mark::Bold => "**",
            Mark::Italic => "*",
            Mark::Code => "`",
        };
        format!("{delimiter}{inner}{delimiter}")
    })
}

/// Concatenated text of the inline nodes, without any markup.
pub fn plain_text(content: &[Inline]) -> String {
    content
        .iter()
        .map(|node| match node {
            Inline::Text { text, .. } => text.as_str(),
            Inline::HardBreak => " ",
        })
        .collect()
}
