//! Bibliography entries as handed over by the bibliography parser.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashSet;

const MONTHS: [&str; 12] =
    ["jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec"];

/// One bibliography record: a unique key plus a sparse set of string fields.
///
/// Absent fields are simply missing from the map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndexMap<String, serde_json::Value>")]
pub struct Entry {
    key: String,
    fields: IndexMap<String, String>,
}

impl Entry {
    pub fn new<K, I, F, V>(key: K, fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (F, V)>,
        F: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            fields: fields.into_iter().map(|(f, v)| (f.into(), v.into())).collect(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Looks up a field by name. `key` answers the entry key.
    pub fn get(&self, name: &str) -> Option<&str> {
        if name == "key" {
            return Some(&self.key);
        }
        self.fields.get(name).map(String::as_str)
    }

    pub fn year(&self) -> Option<&str> {
        self.get("year")
    }

    pub fn month(&self) -> Option<&str> {
        self.get("month")
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn author(&self) -> Option<&str> {
        self.get("author")
    }

    /// Last name of the first author in a BibTeX author list.
    ///
    /// Handles both `Last, First` and `First Last` spellings; surrounding
    /// braces are stripped.
    pub fn first_author_last_name(&self) -> Option<&str> {
        let first = self.author()?.split(" and ").next()?.trim();
        let last = match first.split_once(',') {
            Some((last, _)) => last.trim(),
            None => first.split_whitespace().last()?,
        };
        let last = last.trim_matches(|c: char| c == '{' || c == '}');
        (!last.is_empty()).then_some(last)
    }

    fn year_number(&self) -> Option<i64> {
        self.year()?.trim().parse().ok()
    }

    fn month_number(&self) -> Option<u32> {
        let month = self.month()?.trim().to_lowercase();
        if let Ok(number) = month.parse() {
            return Some(number);
        }
        let prefix = month.get(..3)?;
        MONTHS.iter().position(|m| *m == prefix).map(|idx| idx as u32 + 1)
    }
}

impl TryFrom<IndexMap<String, serde_json::Value>> for Entry {
    type Error = Error;

    fn try_from(map: IndexMap<String, serde_json::Value>) -> Result<Self> {
        let mut key = None;
        let mut fields = IndexMap::new();

        for (name, value) in map {
            let value = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    return Err(Error::EntryError(format!(
                        "field '{name}' must be a plain value, got {other}"
                    )));
                }
            };
            if name == "key" {
                key = Some(value);
            } else {
                fields.insert(name, value);
            }
        }

        let key = key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::EntryError("entry without a key".to_string()))?;
        Ok(Self { key, fields })
    }
}

/// Parses a list of entries, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::EntryError` if the content is not a list of flat maps with
///   unique, non-empty keys
pub fn parse_entries(content: &str) -> Result<Vec<Entry>> {
    let entries: Vec<Entry> = match serde_json::from_str(content) {
        Ok(entries) => entries,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::EntryError(format!("Invalid entry data: {e}")))?,
    };

    let mut seen = HashSet::new();
    for entry in &entries {
        if !seen.insert(entry.key()) {
            return Err(Error::EntryError(format!("duplicate entry key '{}'", entry.key())));
        }
    }

    debug!("Parsed {} entries", entries.len());
    Ok(entries)
}

/// Sorts entries newest first by year, then by month.
///
/// The sort is stable; entries without a numeric year go last.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| match (a.year_number(), b.year_number()) {
        (Some(x), Some(y)) => {
            y.cmp(&x).then_with(|| b.month_number().cmp(&a.month_number()))
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
