use std::io;

use bibplate::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::TemplateError("nested group".to_string());
    assert_eq!(err.to_string(), "Template error: nested group.");
}

#[test]
fn test_syntax_errors_map_to_domain_variants() {
    let err = bibplate::config::parse_config("groupby: [unclosed").unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
    assert!(err.to_string().starts_with("Configuration error: Invalid configuration format"));

    let err = bibplate::entry::parse_entries("- key: [unclosed").unwrap_err();
    assert!(matches!(err, Error::EntryError(_)));
    assert!(err.to_string().starts_with("Entry error: Invalid entry data"));
}
