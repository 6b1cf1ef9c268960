//! Text helpers shared by the diagnostic and fix code
//!
//! Editor columns are UTF-16 offsets while Rust strings are indexed by byte,
//! so every splice goes through [`utf16_to_byte`].

use crate::types::Position;
use regex::Regex;
use std::sync::LazyLock;

/// Any of the three line terminators markdownlint recognizes
static NEWLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n?|\n").expect("valid regex"));

/// Split text into lines on `\r\n`, `\r` or `\n`
///
/// A trailing terminator produces a final empty line, so joining the result
/// with one terminator round-trips single-ending documents.
///
/// # Examples
/// ```
/// use mdlint_bridge::helpers::split_lines;
/// assert_eq!(split_lines("a\r\nb\n"), vec!["a", "b", ""]);
/// ```
pub fn split_lines(text: &str) -> Vec<&str> {
    NEWLINE_RE.split(text).collect()
}

/// The document's dominant line ending
///
/// `\n` wins ties and is used when the text has no line breaks at all.
pub fn preferred_line_ending(text: &str) -> &'static str {
    let (mut cr, mut lf, mut crlf) = (0usize, 0usize, 0usize);
    for ending in NEWLINE_RE.find_iter(text) {
        match ending.as_str() {
            "\r\n" => crlf += 1,
            "\r" => cr += 1,
            _ => lf += 1,
        }
    }

    if lf >= crlf && lf >= cr {
        "\n"
    } else if crlf >= cr {
        "\r\n"
    } else {
        "\r"
    }
}

/// Length of a string in UTF-16 code units
#[inline]
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Byte offset for a UTF-16 offset, clamped to the string
///
/// An offset landing inside a surrogate pair rounds up to the next character
/// boundary.
pub fn utf16_to_byte(s: &str, offset: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in s.char_indices() {
        if units >= offset {
            return idx;
        }
        units += ch.len_utf16();
    }
    s.len()
}

/// Replace `delete` UTF-16 units at `start` with `insert`
///
/// `None` deletes through the end of the line. Offsets past the end clamp.
pub fn splice_utf16(line: &str, start: usize, delete: Option<usize>, insert: &str) -> String {
    let from = utf16_to_byte(line, start);
    let to = match delete {
        Some(count) => utf16_to_byte(line, start.saturating_add(count)),
        None => line.len(),
    };

    let mut out = String::with_capacity(line.len() + insert.len());
    out.push_str(&line[..from]);
    out.push_str(insert);
    out.push_str(&line[to..]);
    out
}

/// Position just past the last character of the text
pub fn end_position(text: &str) -> Position {
    let lines = split_lines(text);
    let last = lines.last().copied().unwrap_or("");
    Position::new(
        lines.len().saturating_sub(1) as u32,
        utf16_len(last) as u32,
    )
}
