//! Partitioning of sorted entries into ordered groups.

use crate::config::{GroupBy, Order};
use crate::constants::NO_GROUP_KEY;
use crate::entry::Entry;
use indexmap::IndexMap;
use log::debug;
use std::cmp::Ordering;

/// Group key to entries, in display order.
pub type Groups = IndexMap<String, Vec<Entry>>;

fn first_char(value: Option<&str>) -> String {
    value
        .map(|v| v.trim_start_matches(|c: char| c == '{' || c.is_whitespace()))
        .and_then(|v| v.chars().next())
        .map(String::from)
        .unwrap_or_default()
}

/// Derives the key of the group an entry belongs to.
///
/// Missing fields yield an empty key.
pub fn group_key(entry: &Entry, groupby: GroupBy) -> String {
    match groupby {
        GroupBy::None => NO_GROUP_KEY.to_string(),
        GroupBy::Year => entry.year().unwrap_or_default().to_string(),
        GroupBy::Author => first_char(entry.first_author_last_name()),
        GroupBy::Title => first_char(entry.title()),
    }
}

/// Orders group keys: integer keys first, numerically, then all other keys
/// lexically.
pub fn compare_group_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Partitions entries into groups and orders the groups.
///
/// Entries keep their relative order inside each group. Groups are sorted by
/// key ascending and reversed as a whole for [`Order::Descending`].
pub fn group_entries(entries: &[Entry], groupby: GroupBy, order: Order) -> Groups {
    let mut groups = Groups::new();
    for entry in entries {
        groups.entry(group_key(entry, groupby)).or_default().push(entry.clone());
    }

    groups.sort_by(|a, _, b, _| compare_group_keys(a, b));
    if order == Order::Descending {
        groups.reverse();
    }

    debug!("Built {} groups from {} entries by {}", groups.len(), entries.len(), groupby);
    groups
}
