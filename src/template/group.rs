//! Group-level rendering of the body of a `@{group@ … @}group@` block.

use super::entry::render_entry;
use super::markers::{expand_blocks, substitute};
use crate::constants::{ENTRY_CLOSE, ENTRY_OPEN};
use crate::entry::Entry;

/// Renders one group into a group-level template fragment.
///
/// `@groupkey@`, `@groupid@` and `@groupcount@` are substituted, then every
/// `@{entry@ … @}entry@` block is replaced by its body rendered once per
/// entry, in entry order.
pub fn render_group(key: &str, id: usize, entries: &[Entry], template: &str) -> String {
    let result = substitute(template, |name| match name {
        "groupkey" => Some(key.to_string()),
        "groupid" => Some(id.to_string()),
        "groupcount" => Some(entries.len().to_string()),
        _ => None,
    });

    expand_blocks(&result, ENTRY_OPEN, ENTRY_CLOSE, |body| {
        entries.iter().map(|entry| render_entry(entry, body)).collect()
    })
}
