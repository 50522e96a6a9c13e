//! Rendering configuration for bibplate.
//! This module provides the typed options that drive grouping, ordering and
//! group expansion, together with loaders for config files and inline
//! option strings.

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Where the rendered output is headed. The engine itself ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Target {
    /// Output is wiki markup to be re-parsed by the host
    #[default]
    Wiki,
    /// Output is used as-is
    Text,
}

/// How entries are partitioned into groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum GroupBy {
    None,
    /// First letter of the first author's last name
    Author,
    /// First letter of the title
    Title,
    #[default]
    Year,
}

/// Display order of the groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Order {
    Ascending,
    #[default]
    Descending,
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "wiki" => Ok(Self::Wiki),
            "text" => Ok(Self::Text),
            other => Err(Error::ConfigError(format!("unknown target '{other}'"))),
        }
    }
}

impl FromStr for GroupBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "none" => Ok(Self::None),
            "author" => Ok(Self::Author),
            "title" => Ok(Self::Title),
            "year" => Ok(Self::Year),
            other => Err(Error::ConfigError(format!(
                "unknown groupby '{other}' (expected none, author, title or year)"
            ))),
        }
    }
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "newest" | "descending" => Ok(Self::Descending),
            "oldest" | "ascending" => Ok(Self::Ascending),
            other => Err(Error::ConfigError(format!("unknown order '{other}'"))),
        }
    }
}

impl TryFrom<String> for Target {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<String> for GroupBy {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<String> for Order {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl GroupBy {
    /// Mode name as rendered by `@globalkey@`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Author => "author",
            Self::Title => "title",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wiki => f.write_str("wiki"),
            Self::Text => f.write_str("text"),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("ascending"),
            Self::Descending => f.write_str("descending"),
        }
    }
}

/// The recognized rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub target: Target,
    /// Whether `@{group@ … @}group@` blocks are expanded
    pub usegroup: bool,
    pub groupby: GroupBy,
    pub order: Order,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: Target::Wiki,
            usegroup: true,
            groupby: GroupBy::Year,
            order: Order::Descending,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match normalize(value).as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(Error::ConfigError(format!("'{other}' is not a boolean"))),
    }
}

impl Config {
    /// Builds a configuration from an inline option string such as
    /// `groupby=author; order=ascending`.
    pub fn from_options(options: &str) -> Result<Self> {
        let mut config = Self::default();
        config.apply_options(options)?;
        Ok(config)
    }

    /// Applies `key=value` pairs separated by `;` or `,` on top of this
    /// configuration.
    ///
    /// # Errors
    /// * `Error::ConfigError` for items without `=`, unknown keys or
    ///   unparsable values
    pub fn apply_options(&mut self, options: &str) -> Result<()> {
        for item in options.split([';', ',']).map(str::trim).filter(|item| !item.is_empty()) {
            let (key, value) = item.split_once('=').ok_or_else(|| {
                Error::ConfigError(format!("option '{item}' is not a key=value pair"))
            })?;
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Sets a single option by name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match normalize(key).as_str() {
            "target" => self.target = value.parse()?,
            "usegroup" => self.usegroup = parse_bool(value)?,
            "groupby" => self.groupby = value.parse()?,
            "order" => self.order = value.parse()?,
            other => {
                return Err(Error::ConfigError(format!("unknown option '{other}'")));
            }
        }
        debug!("Option {} set to '{}'", key.trim(), value.trim());
        Ok(())
    }
}

/// Loads configuration from a directory, trying multiple file formats.
///
/// # Arguments
/// * `config_dir` - Directory containing the configuration file
/// * `config_files` - List of configuration files to try
///
/// # Returns
/// * `Result<String>` - Contents of the first found configuration file
///
/// # Errors
/// * `Error::ConfigError` if no config file exists
pub fn load_config<P: AsRef<Path>>(config_dir: P, config_files: &[&str]) -> Result<String> {
    for file in config_files {
        let config_path = config_dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(std::fs::read_to_string(&config_path)?);
        }
    }

    Err(Error::ConfigError(format!(
        "No configuration file found (tried: {})",
        config_files.join(", ")
    )))
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither, or holds unknown keys
///   or values
pub fn parse_config(content: &str) -> Result<Config> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Reads and parses the configuration file found in `config_dir`.
pub fn get_config<P: AsRef<Path>>(config_dir: P) -> Result<Config> {
    let content = load_config(config_dir, &CONFIG_FILES)?;
    parse_config(&content)
}
