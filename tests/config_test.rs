use bibplate::config::{get_config, parse_config, Config, GroupBy, Order, Target};
use bibplate::constants::CONFIG_FILES;
use bibplate::error::Error;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_inline_options() {
    let config = Config::from_options("groupby=author; order=ascending,usegroup=no").unwrap();
    assert_eq!(config.groupby, GroupBy::Author);
    assert_eq!(config.order, Order::Ascending);
    assert!(!config.usegroup);
    assert_eq!(config.target, Target::Wiki);
}

#[test]
fn test_empty_options_keep_defaults() {
    assert_eq!(Config::from_options("").unwrap(), Config::default());
    assert_eq!(Config::from_options(" ;; ").unwrap(), Config::default());
}

#[test]
fn test_unknown_groupby_aborts() {
    let err = Config::from_options("groupby=venue").unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn test_malformed_options() {
    assert!(matches!(Config::from_options("groupby").unwrap_err(), Error::ConfigError(_)));
    assert!(matches!(Config::from_options("colour=red").unwrap_err(), Error::ConfigError(_)));
    assert!(matches!(Config::from_options("usegroup=perhaps").unwrap_err(), Error::ConfigError(_)));
}

#[test]
fn test_apply_options_on_top_of_config() {
    let mut config = Config { groupby: GroupBy::Title, ..Config::default() };
    config.apply_options("order=oldest").unwrap();
    assert_eq!(config.groupby, GroupBy::Title);
    assert_eq!(config.order, Order::Ascending);
}

#[test]
fn test_parse_json_config() {
    let config = parse_config(r#"{"groupby": "none", "target": "text"}"#).unwrap();
    assert_eq!(config.groupby, GroupBy::None);
    assert_eq!(config.target, Target::Text);
    assert!(config.usegroup);
    assert_eq!(config.order, Order::Descending);
}

#[test]
fn test_parse_yaml_config() {
    let config = parse_config("usegroup: false\norder: ascending\n").unwrap();
    assert!(!config.usegroup);
    assert_eq!(config.order, Order::Ascending);
}

#[test]
fn test_parse_config_rejects_unknown_values() {
    assert!(matches!(parse_config("groupby: journal\n").unwrap_err(), Error::ConfigError(_)));
    assert!(matches!(parse_config("colour: red\n").unwrap_err(), Error::ConfigError(_)));
}

#[test]
fn test_get_config_from_directory() {
    let temp_dir = TempDir::new().unwrap();
    assert!(matches!(get_config(temp_dir.path()).unwrap_err(), Error::ConfigError(_)));

    fs::write(temp_dir.path().join(CONFIG_FILES[1]), "groupby: title\n").unwrap();
    let config = get_config(temp_dir.path()).unwrap();
    assert_eq!(config.groupby, GroupBy::Title);
}
