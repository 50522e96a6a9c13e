//! bibplate renders bibliography entries into formatted text through a small
//! `@`-marker template language. Entries are grouped and ordered, then every
//! group and every entry of a group is expanded into the template, with
//! per-entry conditional fragments keyed by field names.

/// Command-line interface module for the bibplate binary
pub mod cli;

/// Rendering options: grouping mode, group order, output target
/// Loaded from bibplate.json, bibplate.yml, bibplate.yaml or an option string
pub mod config;

/// Marker strings, the default template and processing limits
pub mod constants;

/// Bibliography entries and their derived accessors
pub mod entry;

/// Error types and handling for bibplate
pub mod error;

/// Partitioning of entries into ordered groups
pub mod grouping;

/// Logger setup for the binary
pub mod logger;

/// Template processing: conditionals, entry, group and top-level rendering
pub mod template;
