//! Entry-level rendering of the body of an `@{entry@ … @}entry@` block.

use super::condition::resolve_conditions;
use super::markers::substitute;
use crate::entry::Entry;

/// Renders one entry into an entry-level template fragment.
///
/// `@entrykey@` is substituted first and conditionals are resolved before
/// plain `@FIELD@` placeholders, since conditional delimiters use the same
/// `@` marker. Placeholders of absent fields are left in the output.
pub fn render_entry(entry: &Entry, template: &str) -> String {
    let keyed = substitute(template, |name| {
        (name == "entrykey").then(|| entry.key().to_string())
    });
    let resolved = resolve_conditions(entry, &keyed);
    substitute(&resolved, |name| entry.get(name).map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entrykey_and_key_are_equivalent() {
        let entry = Entry::new("knuth84", [("title", "Literate Programming")]);
        assert_eq!(render_entry(&entry, "@entrykey@/@key@"), "knuth84/knuth84");
    }

    #[test]
    fn test_entrykey_inside_conditional() {
        let entry = Entry::new("knuth84", [("year", "1984")]);
        assert_eq!(render_entry(&entry, "@?year@[@entrykey@]@;year@"), "[knuth84]");
        assert_eq!(render_entry(&entry, "@?doi@[@entrykey@]@;doi@"), "");
    }

    #[test]
    fn test_field_values_are_not_rescanned() {
        let entry = Entry::new("k", [("title", "@year@"), ("year", "1999")]);
        assert_eq!(render_entry(&entry, "@title@ @year@"), "@year@ 1999");
    }
}
