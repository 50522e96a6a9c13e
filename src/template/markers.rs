//! Scanning helpers for `@…@` markers and open/close block pairs.
//!
//! All passes run left to right over the text once. Inserted values are
//! never rescanned, so field data cannot inject markers.

use std::ops::Range;

/// An `open … close` region. The close is the first one after the open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block {
    pub start: usize,
    pub body: Range<usize>,
    pub end: usize,
}

/// Names usable inside `@NAME@` placeholders and conditional headers.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub(crate) fn is_word(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_word_char)
}

/// Finds the first complete block starting at or after `from`.
pub(crate) fn find_block(text: &str, open: &str, close: &str, from: usize) -> Option<Block> {
    let start = from + text[from..].find(open)?;
    let body_start = start + open.len();
    let body_end = body_start + text[body_start..].find(close)?;
    Some(Block { start, body: body_start..body_end, end: body_end + close.len() })
}

/// Replaces every complete block with `expand(body)`.
///
/// Scanning resumes after each inserted expansion. Text after an unpaired
/// open marker is kept as is.
pub(crate) fn expand_blocks<F>(text: &str, open: &str, close: &str, mut expand: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(block) = find_block(text, open, close, cursor) {
        result.push_str(&text[cursor..block.start]);
        result.push_str(&expand(&text[block.body.clone()]));
        cursor = block.end;
    }
    result.push_str(&text[cursor..]);
    result
}

/// Replaces `@NAME@` placeholders for which `lookup` returns a value.
///
/// Unknown names and anything that is not a placeholder stay untouched. A
/// closing `@` that did not complete a placeholder may open the next one.
pub(crate) fn substitute<F>(text: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('@') {
        result.push_str(&rest[..open]);
        result.push('@');
        let after = &rest[open + 1..];
        if let Some(close) = after.find('@') {
            let name = &after[..close];
            if is_word(name) {
                if let Some(value) = lookup(name) {
                    result.pop();
                    result.push_str(&value);
                    rest = &after[close + 1..];
                    continue;
                }
            }
        }
        rest = after;
    }
    result.push_str(rest);
    result
}
