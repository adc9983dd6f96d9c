//! Tests for logging functionality
//!
//! Initialization can only succeed once per process, so these tests check
//! that repeated calls fail gracefully rather than panic.

use plantdraw::core::logging::{init_default_logging, init_logging, LogFormat};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("xml").is_err());
}

#[test]
fn test_log_format_variants_round_trip() {
    for name in LogFormat::variants() {
        let format = LogFormat::from_str(name).unwrap();
        assert_eq!(format.to_string(), *name);
    }
}

#[test]
fn test_repeated_initialization_is_graceful() {
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("trace"), Some("json"));
    let _ = init_logging(Some("off"), Some("pretty"));
    let _ = init_default_logging();
}

#[test]
fn test_pipeline_runs_with_logging_enabled() {
    let _ = init_logging(Some("trace"), Some("compact"));
    let document =
        plantdraw::convert("@startuml\nstart\nfork\n:a;\nfork again\n:b;\nend fork\nstop\n@enduml")
            .unwrap();
    assert_eq!(document.edges.len(), 6);
}
