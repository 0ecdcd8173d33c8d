//! Minimal CSS selector matching.
//!
//! Supports a single compound selector: an optional tag (or `*`) followed
//! by any number of `.class`, `#id`, `[attr]` and `[attr=value]` parts.
//! Combinators and pseudo-classes are rejected.

use indexmap::IndexMap;
use rz_dom::{DomError, DomResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, Option<String>)>,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(input: &str, start: usize) -> (&str, usize) {
    let end = input[start..]
        .char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map_or(input.len(), |(i, _)| start + i);
    (&input[start..end], end)
}

impl SimpleSelector {
    pub fn parse(input: &str) -> DomResult<Self> {
        let invalid = || DomError::InvalidSelector(input.to_string());
        let source = input.trim();
        if source.is_empty() {
            return Err(invalid());
        }

        let mut selector = SimpleSelector::default();
        let mut pos = 0;

        if source.starts_with('*') {
            pos = 1;
        } else if source.starts_with(|c: char| c.is_ascii_alphabetic()) {
            let (tag, end) = read_ident(source, 0);
            selector.tag = Some(tag.to_ascii_lowercase());
            pos = end;
        }

        while pos < source.len() {
            let marker = source[pos..].chars().next().ok_or_else(invalid)?;
            pos += marker.len_utf8();
            match marker {
                '.' | '#' => {
                    let (ident, end) = read_ident(source, pos);
                    if ident.is_empty() {
                        return Err(invalid());
                    }
                    if marker == '.' {
                        selector.classes.push(ident.to_string());
                    } else {
                        selector.id = Some(ident.to_string());
                    }
                    pos = end;
                }
                '[' => {
                    let close = source[pos..].find(']').ok_or_else(invalid)? + pos;
                    let body = &source[pos..close];
                    let (name, value) = match body.split_once('=') {
                        Some((name, value)) => {
                            let value = value.trim();
                            let value = value
                                .strip_prefix('"')
                                .and_then(|v| v.strip_suffix('"'))
                                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                                .unwrap_or(value);
                            (name.trim(), Some(value.to_string()))
                        }
                        None => (body.trim(), None),
                    };
                    if name.is_empty() || !name.chars().all(is_ident_char) {
                        return Err(invalid());
                    }
                    selector
                        .attributes
                        .push((name.to_ascii_lowercase(), value));
                    pos = close + 1;
                }
                _ => return Err(invalid()),
            }
        }

        Ok(selector)
    }

    /// Check an element given its lower-case tag and attributes.
    pub fn matches(&self, tag: &str, attributes: &IndexMap<String, String>) -> bool {
        if let Some(ref expected) = self.tag
            && expected != tag
        {
            return false;
        }
        if let Some(ref id) = self.id
            && attributes.get("id") != Some(id)
        {
            return false;
        }
        if !self.classes.is_empty() {
            let class_list = attributes.get("class").map(String::as_str).unwrap_or("");
            if !self
                .classes
                .iter()
                .all(|class| class_list.split_whitespace().any(|c| c == class))
            {
                return false;
            }
        }
        self.attributes.iter().all(|(name, value)| match (attributes.get(name), value) {
            (Some(actual), Some(expected)) => actual == expected,
            (Some(_), None) => true,
            (None, _) => false,
        })
    }
}
