//! Rendering of `@`-marker templates.
//!
//! A template is plain text with markers delimited by `@`:
//!
//! ```text
//! @{group@
//! === @groupkey@ ===
//! @{entry@
//!   * @title@ @?year@(@year@)@;year@
//! @}entry@
//! @}group@
//! ```
//!
//! A group block is expanded once per group and the entry block inside it
//! once per entry of that group. Markers that name nothing known are left in
//! the output untouched.

pub mod condition;
pub mod engine;
pub mod entry;
pub mod group;
mod markers;

pub use condition::resolve_conditions;
pub use engine::{process_template, BibTemplateRenderer, TemplateRenderer};
pub use entry::render_entry;
pub use group::render_group;
