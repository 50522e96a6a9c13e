//! Common constants used throughout bibplate.

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] = ["bibplate.json", "bibplate.yml", "bibplate.yaml"];

/// Group key used when entries are not grouped
pub const NO_GROUP_KEY: &str = "all";

/// Deepest conditional nesting that is still resolved
pub const MAX_CONDITION_DEPTH: usize = 64;

pub const GROUP_OPEN: &str = "@{group@";
pub const GROUP_CLOSE: &str = "@}group@";
pub const ENTRY_OPEN: &str = "@{entry@";
pub const ENTRY_CLOSE: &str = "@}entry@";

/// Template used when the caller does not supply one.
pub const DEFAULT_TEMPLATE: &str = r#"@{group@
=== @groupkey@ ===
@{entry@
  * @?summary@<popover placement="top" trigger="hover" title="@title@" content="@summary@">@;summary@ **@title@** @author@ (@?year@@?month@@month@ @;month@@year@@;year@). @?booktitle@In //@booktitle@//.@;booktitle@ @?journal@//@journal@//@?volume@ @volume@@?number@ (@number@)@;number@@;volume@ @;journal@ @?pages@ pp. @pages@.@;pages@ @?institution@ //@institution@//.@;institution@@?publisher@ @publisher@.@;publisher@ @?address@ @address@.@;address@@?summary@</popover>@;summary@ @?doi@<button type="link" size="xs" icon="fa fa-book">[[http://dx.doi.org/@doi@|DOI]]</button>@;doi@@?url@{{publications:pdf:@url@?linkonly}}@;url@ @?bibtex@<button collapse="b_@globalkey@_@groupid@_@key@" type="link" size="xs" icon="fa fa-file-text">BibTex</button>@;bibtex@@?abstract@<button collapse="a_@globalkey@_@groupid@_@key@" type="link" size="xs" icon="fa fa-comment">Abstract</button>@;abstract@ @?bibtex@<collapse id="b_@globalkey@_@groupid@_@key@" collapsed="true"><code bibtex>@bibtex@</code></collapse>@;bibtex@ @?abstract@<collapse id="a_@globalkey@_@groupid@_@key@" collapsed="true"><well size="sm">@abstract@</well></collapse>@;abstract@
@}entry@
@}group@
"#;
