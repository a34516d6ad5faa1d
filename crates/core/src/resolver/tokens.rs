use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}_$.]+").expect("identifier pattern is valid"));

/// A piece of raw type text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    /// Maximal run of identifier characters (any letter or digit, `_`, `$`) and dots.
    Token(&'t str),
    /// Anything between tokens (`<`, `>`, `,`, `[]`, `?`, whitespace), kept verbatim.
    Verbatim(&'t str),
}

/// Splits type text so that concatenating all segments yields the input again.
pub fn split(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for m in IDENTIFIER_RUN.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::Verbatim(&text[last..m.start()]));
        }
        segments.push(Segment::Token(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::Verbatim(&text[last..]));
    }
    segments
}
