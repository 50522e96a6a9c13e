//! Top-level template processing.

use super::group::render_group;
use super::markers::{expand_blocks, find_block, substitute};
use crate::config::Config;
use crate::constants::{ENTRY_CLOSE, ENTRY_OPEN, GROUP_CLOSE, GROUP_OPEN};
use crate::error::{Error, Result};
use crate::grouping::Groups;
use log::debug;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template against grouped entries.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `groups` - Groups in display order
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, groups: &Groups) -> Result<String>;
}

/// Renderer for `@`-marker publication-list templates.
pub struct BibTemplateRenderer {
    config: Config,
}

impl BibTemplateRenderer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for BibTemplateRenderer {
    fn default() -> Self {
        BibTemplateRenderer::new(Config::default())
    }
}

impl TemplateRenderer for BibTemplateRenderer {
    fn render(&self, template: &str, groups: &Groups) -> Result<String> {
        process_template(&self.config, groups, template)
    }
}

/// Rejects group blocks whose markers cross or nest.
fn check_group_nesting(template: &str) -> Result<()> {
    let mut cursor = 0;
    while let Some(group) = find_block(template, GROUP_OPEN, GROUP_CLOSE, cursor) {
        let body = &template[group.body.clone()];
        if let Some(nested) = body.find(GROUP_OPEN) {
            return Err(Error::TemplateError(format!(
                "nested {GROUP_OPEN} at offset {}",
                group.body.start + nested
            )));
        }

        let mut entry_cursor = 0;
        while let Some(entry) = find_block(body, ENTRY_OPEN, ENTRY_CLOSE, entry_cursor) {
            entry_cursor = entry.end;
        }
        if body[entry_cursor..].contains(ENTRY_OPEN) {
            return Err(Error::TemplateError(format!(
                "{ENTRY_OPEN} is not closed before {GROUP_CLOSE} at offset {}",
                group.body.end
            )));
        }
        cursor = group.end;
    }
    Ok(())
}

/// Renders `template` against `groups`.
///
/// Global placeholders are substituted first: `@globalcount@` always renders
/// `0`, `@globalgroupcount@` the number of groups and `@globalkey@` the
/// grouping mode. With `usegroup` set, each `@{group@ … @}group@` block is
/// replaced by its body rendered once per group in order; otherwise group
/// markers are left for the caller.
///
/// # Errors
/// * `Error::TemplateError` if a group block nests another group block or
///   crosses an entry block
pub fn process_template(config: &Config, groups: &Groups, template: &str) -> Result<String> {
    let result = substitute(template, |name| match name {
        "globalcount" => Some("0".to_string()),
        "globalgroupcount" => Some(groups.len().to_string()),
        "globalkey" => Some(config.groupby.name().to_string()),
        _ => None,
    });

    if !config.usegroup {
        debug!("Group expansion disabled, leaving group markers");
        return Ok(result);
    }

    check_group_nesting(&result)?;

    Ok(expand_blocks(&result, GROUP_OPEN, GROUP_CLOSE, |body| {
        debug!("Expanding group block over {} groups", groups.len());
        groups
            .iter()
            .enumerate()
            .map(|(id, (key, entries))| render_group(key, id, entries, body))
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;

    fn groups() -> Groups {
        let mut groups = Groups::new();
        groups.insert("2021".to_string(), vec![Entry::new("a", [("year", "2021")])]);
        groups.insert("2020".to_string(), vec![Entry::new("b", [("year", "2020")])]);
        groups
    }

    #[test]
    fn test_globals() {
        let template = "@globalcount@/@globalgroupcount@/@globalkey@";
        let result = process_template(&Config::default(), &groups(), template).unwrap();
        assert_eq!(result, "0/2/year");
    }

    #[test]
    fn test_group_ids_follow_group_order() {
        let template = "@{group@@groupid@=@groupkey@;@}group@";
        let result = process_template(&Config::default(), &groups(), template).unwrap();
        assert_eq!(result, "0=2021;1=2020;");
    }

    #[test]
    fn test_nested_group_is_rejected() {
        let template = "@{group@ @{group@ @}group@ @}group@";
        let err = process_template(&Config::default(), &groups(), template).unwrap_err();
        assert!(matches!(err, Error::TemplateError(_)));
    }

    #[test]
    fn test_crossed_entry_block_is_rejected() {
        let template = "@{group@ @{entry@ @key@ @}group@ @}entry@";
        let err = process_template(&Config::default(), &groups(), template).unwrap_err();
        assert!(matches!(err, Error::TemplateError(_)));
    }

    #[test]
    fn test_unclosed_group_is_literal() {
        let template = "@{group@ @groupkey@";
        let result = process_template(&Config::default(), &groups(), template).unwrap();
        assert_eq!(result, template);
    }

    #[test]
    fn test_renderer_trait_uses_config() {
        let config = Config { usegroup: false, ..Config::default() };
        let renderer = BibTemplateRenderer::new(config);
        let template = "@{group@x@}group@";
        assert_eq!(renderer.render(template, &groups()).unwrap(), template);
        assert!(!renderer.config().usegroup);
    }
}
