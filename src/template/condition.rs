//! Conditional blocks inside entry templates.
//!
//! Two forms are recognized, both with an optional else branch:
//!
//! ```text
//! @?FIELD@ then @:FIELD@ else @;FIELD@
//! @?FIELD<OP>VALUE@ then @:FIELD@ else @;FIELD@
//! ```
//!
//! where `OP` is one of `==`, `!=`, `<=`, `>=` or `~`. A missing or falsy
//! field makes every condition false.

use super::markers::is_word_char;
use crate::constants::MAX_CONDITION_DEPTH;
use crate::entry::Entry;
use log::warn;
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;

/// Patterns kept per thread before the regex cache is flushed.
const REGEX_CACHE_LIMIT: usize = 256;

thread_local! {
    /// Compiled `~` patterns; `None` marks a pattern that failed to compile.
    static REGEX_CACHE: RefCell<HashMap<String, Option<Regex>>> = RefCell::new(HashMap::new());
}

/// Compiles `pattern` once per thread and hands out the cached result.
fn cached_regex(pattern: &str) -> Option<Regex> {
    REGEX_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(compiled) = cache.get(pattern) {
            return compiled.clone();
        }
        if cache.len() >= REGEX_CACHE_LIMIT {
            cache.clear();
        }
        let compiled = Regex::new(pattern)
            .map_err(|e| warn!("Invalid pattern '{pattern}' in conditional: {e}"))
            .ok();
        cache.insert(pattern.to_string(), compiled.clone());
        compiled
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    AtMost,
    AtLeast,
    Matches,
}

impl Operator {
    const ALL: [(&'static str, Operator); 5] = [
        ("<=", Operator::AtMost),
        (">=", Operator::AtLeast),
        ("==", Operator::Equal),
        ("!=", Operator::NotEqual),
        ("~", Operator::Matches),
    ];

    fn strip_prefix(text: &str) -> Option<(Self, &str)> {
        Self::ALL
            .iter()
            .find_map(|(token, op)| text.strip_prefix(*token).map(|rest| (*op, rest)))
    }

    /// Compares a present, non-empty field value against `expected`.
    pub fn evaluate(self, value: &str, expected: &str) -> bool {
        match self {
            Self::Equal => value == expected,
            Self::NotEqual => value != expected,
            Self::AtMost => compare_numbers(value, expected, |a, b| a <= b),
            Self::AtLeast => compare_numbers(value, expected, |a, b| a >= b),
            Self::Matches => cached_regex(expected).is_some_and(|re| re.is_match(value)),
        }
    }
}

/// Integer value of a numeric string, truncating decimals and exponents.
fn parse_number(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(number) = value.parse::<i64>() {
        return Some(number);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .map(|number| number.trunc() as i64)
}

fn compare_numbers(value: &str, expected: &str, cmp: fn(i64, i64) -> bool) -> bool {
    match (parse_number(value), parse_number(expected)) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

/// Empty values and `"0"` count as absent.
fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0"
}

#[derive(Debug)]
struct Conditional<'t> {
    field: &'t str,
    test: Option<(Operator, &'t str)>,
    then: &'t str,
    otherwise: Option<&'t str>,
    end: usize,
}

impl Conditional<'_> {
    fn holds(&self, entry: &Entry) -> bool {
        let Some(value) = entry.get(self.field).filter(|value| is_truthy(value)) else {
            return false;
        };
        match self.test {
            None => true,
            Some((op, expected)) => op.evaluate(value, expected),
        }
    }

    fn branch(&self, entry: &Entry) -> &str {
        if self.holds(entry) {
            self.then
        } else {
            self.otherwise.unwrap_or_default()
        }
    }
}

/// Parses a conditional block whose `@?` opener sits at `start`.
fn parse_conditional(text: &str, start: usize) -> Option<Conditional<'_>> {
    let header_start = start + 2;
    let header = &text[header_start..];
    let name_len = header.find(|c: char| !is_word_char(c)).unwrap_or(header.len());
    if name_len == 0 {
        return None;
    }
    let field = &header[..name_len];
    let rest = &header[name_len..];

    let (test, body_start) = if rest.starts_with('@') {
        (None, header_start + name_len + 1)
    } else {
        let (op, after_op) = Operator::strip_prefix(rest)?;
        let value_len = after_op.find('@')?;
        let value_start = text.len() - after_op.len();
        (Some((op, &after_op[..value_len])), value_start + value_len + 1)
    };

    let close = format!("@;{field}@");
    let separator = format!("@:{field}@");
    let body_end = body_start + text[body_start..].find(&close)?;
    let body = &text[body_start..body_end];
    let (then, otherwise) = match body.find(&separator) {
        Some(idx) => (&body[..idx], Some(&body[idx + separator.len()..])),
        None => (body, None),
    };

    Some(Conditional { field, test, then, otherwise, end: body_end + close.len() })
}

fn resolve(entry: &Entry, text: &str, depth: usize) -> String {
    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut search = 0;

    while let Some(offset) = text[search..].find("@?") {
        let start = search + offset;
        let Some(conditional) = parse_conditional(text, start) else {
            search = start + 2;
            continue;
        };

        result.push_str(&text[cursor..start]);
        if depth >= MAX_CONDITION_DEPTH {
            warn!("Conditional on '{}' nested too deeply, left unresolved", conditional.field);
            result.push_str(&text[start..conditional.end]);
        } else {
            result.push_str(&resolve(entry, conditional.branch(entry), depth + 1));
        }
        cursor = conditional.end;
        search = conditional.end;
    }

    result.push_str(&text[cursor..]);
    result
}

/// Resolves every conditional block in `template` against `entry`.
///
/// Blocks are resolved outermost first, left to right; the chosen branch is
/// resolved recursively. Openers without a matching `@;FIELD@` stay literal.
pub fn resolve_conditions(entry: &Entry, template: &str) -> String {
    resolve(entry, template, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> Entry {
        Entry::new(
            "doe21",
            [("year", "2021"), ("volume", "3"), ("number", "10"), ("pages", "0"), ("isbn", "")],
        )
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42));
        assert_eq!(parse_number(" 7 "), Some(7));
        assert_eq!(parse_number("3.9"), Some(3));
        assert_eq!(parse_number("1e3"), Some(1000));
        assert_eq!(parse_number("apple"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_falsy_values() {
        assert_eq!(resolve_conditions(&entry(), "@?pages@P@:pages@N@;pages@"), "N");
        assert_eq!(resolve_conditions(&entry(), "@?isbn@I@;isbn@"), "");
    }

    #[test]
    fn test_header_without_operator_or_close_is_literal() {
        let text = "@?year<2000@x@;year@";
        assert_eq!(resolve_conditions(&entry(), text), text);
        let text = "@?year@never closed";
        assert_eq!(resolve_conditions(&entry(), text), text);
    }

    #[test]
    fn test_empty_comparison_value() {
        assert_eq!(resolve_conditions(&entry(), "@?volume==@E@:volume@F@;volume@"), "F");
    }

    #[test]
    fn test_invalid_regex_is_false() {
        assert_eq!(resolve_conditions(&entry(), "@?year~(20@Y@:year@N@;year@"), "N");
    }

    #[test]
    fn test_pattern_compiled_once_across_entries() {
        let pattern = "^(19|20)[0-9]{2}$";
        let template = format!("@?year~{pattern}@Y@:year@N@;year@");
        let entries = [
            Entry::new("a", [("year", "2021")]),
            Entry::new("b", [("year", "1999")]),
            Entry::new("c", [("year", "in press")]),
        ];
        let rendered: Vec<_> =
            entries.iter().map(|entry| resolve_conditions(entry, &template)).collect();
        assert_eq!(rendered, ["Y", "Y", "N"]);

        let compiled = REGEX_CACHE.with(|cache| cache.borrow().get(pattern).cloned());
        assert!(matches!(compiled, Some(Some(_))));
    }

    #[test]
    fn test_invalid_pattern_is_cached_as_failure() {
        for key in ["a", "b"] {
            let entry = Entry::new(key, [("title", "Rust")]);
            assert_eq!(resolve_conditions(&entry, "@?title~[R@Y@:title@N@;title@"), "N");
        }
        let compiled = REGEX_CACHE.with(|cache| cache.borrow().get("[R").cloned());
        assert!(matches!(compiled, Some(None)));
    }

    #[test]
    fn test_cache_is_bounded() {
        for i in 0..=REGEX_CACHE_LIMIT {
            assert!(cached_regex(&format!("^x{i}$")).is_some());
        }
        assert!(REGEX_CACHE.with(|cache| cache.borrow().len()) <= REGEX_CACHE_LIMIT);
    }

    #[test]
    fn test_depth_cap_leaves_innermost_block() {
        let fields: Vec<_> = (0..=MAX_CONDITION_DEPTH).map(|i| (format!("f{i}"), "1")).collect();
        let deep = Entry::new("deep", fields);
        let mut text = String::from("X");
        for i in 0..=MAX_CONDITION_DEPTH {
            text = format!("@?f{i}@{text}@;f{i}@");
        }
        assert_eq!(resolve_conditions(&deep, &text), "@?f0@X@;f0@");
    }
}
