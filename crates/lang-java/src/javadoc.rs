//! Splitting `/** ... */` comments into description and block tags.

use once_cell::sync::Lazy;
use regex::Regex;
use typemine_core::model::Javadoc;

static BLOCK_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@(\w+)(?:\s+(.*))?$").expect("valid block tag pattern"));

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

pub fn is_javadoc(comment: &str) -> bool {
    comment.starts_with("/**") && comment != "/**/"
}

/// Parses a documentation comment.
///
/// Only `@param` and `@return` tags are kept; the first occurrence of a parameter wins.
/// All text has its leading `*` gutter removed and whitespace collapsed.
pub fn parse_javadoc(comment: &str) -> Javadoc {
    let body = comment.strip_prefix("/**").unwrap_or(comment);
    let body = body.strip_suffix("*/").unwrap_or(body);

    let mut doc = Javadoc::default();
    let mut description = Vec::new();
    // (tag, text lines) of the tag being read
    let mut current: Option<(String, Vec<String>)> = None;

    for line in body.lines() {
        let line = strip_gutter(line);
        if let Some(caps) = BLOCK_TAG.captures(line) {
            if let Some((tag, lines)) = current.take() {
                apply_tag(&mut doc, &tag, &lines);
            }
            let rest = caps.get(2).map_or("", |m| m.as_str());
            current = Some((caps[1].to_string(), vec![rest.to_string()]));
            continue;
        }
        match current.as_mut() {
            Some((_, lines)) => lines.push(line.to_string()),
            None => description.push(line),
        }
    }
    if let Some((tag, lines)) = current {
        apply_tag(&mut doc, &tag, &lines);
    }

    doc.description = normalize(&description.join(" "));
    doc
}

fn strip_gutter(line: &str) -> &str {
    let line = line.trim();
    line.trim_start_matches('*').trim()
}

fn apply_tag(doc: &mut Javadoc, tag: &str, lines: &[String]) {
    let text = normalize(&lines.join(" "));
    match tag {
        "param" => {
            let (name, rest) = text.split_once(' ').unwrap_or((text.as_str(), ""));
            if !name.is_empty() {
                doc.params
                    .entry(name.to_string())
                    .or_insert_with(|| rest.to_string());
            }
        }
        "return" if doc.returns.is_none() => doc.returns = Some(text),
        _ => {}
    }
}

fn normalize(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}
