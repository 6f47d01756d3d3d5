use integration_tests::harness::{Workspace, capture_events};
use logloom_core::conf::{ConfigError, discover, load_config};
use logloom_core::demux::MemorySink;
use logloom_core::error::EngineError;
use logloom_core::pipeline::Pipeline;
use logloom_core::record::EntityKey;

use pretty_assertions::assert_eq;
use tracing::Level;

#[test]
fn unavailable_source_is_logged_and_excluded() {
    // Arrange
    let ws = Workspace::with_corpus();
    let cfg = load_config(ws.root()).unwrap();
    let mut paths = discover(&cfg.sources.dir, &cfg.sources.pattern).unwrap();
    let missing = ws.root().join("logs").join("rotated-away.log");
    paths.push(missing.clone());

    // Act
    let (result, events) = capture_events(|| {
        Pipeline::from_config(&cfg).sanitize_paths(&paths, MemorySink::new())
    });
    let (_, outcome) = result.unwrap();

    // Assert
    assert_eq!(outcome.records(), 11);
    assert_eq!(outcome.failures.len(), 1);
    assert!(matches!(
        outcome.failures[0].error,
        EngineError::SourceUnavailable { .. }
    ));

    let missing = missing.display().to_string();
    let warning = events
        .iter()
        .find(|e| e.message() == Some("excluding unavailable source"))
        .expect("missing warning for the unavailable source");
    assert_eq!(warning.level, Level::WARN);
    assert_eq!(warning.field("path"), Some(missing.as_str()));
}

#[test]
fn malformed_source_is_logged_and_the_rest_still_merge() {
    // Arrange
    let ws = Workspace::with_corpus();
    ws.add_source(
        "producer-4.log",
        "4:req-5::cron 2019-05-14 10:00:03,000 - **START**\n4:req-5::cron 14/05/2019 - **END**\n",
    );
    let cfg = load_config(ws.root()).unwrap();
    let paths = discover(&cfg.sources.dir, &cfg.sources.pattern).unwrap();

    // Act
    let (result, events) = capture_events(|| {
        Pipeline::from_config(&cfg).sanitize_paths(&paths, MemorySink::new())
    });
    let (sink, outcome) = result.unwrap();

    // Assert
    assert_eq!(outcome.failures.len(), 1);
    assert!(matches!(
        outcome.failures[0].error,
        EngineError::MalformedRecord { line: 2, .. }
    ));
    // The well-formed record before the bad line is kept.
    assert_eq!(sink.logs()[&EntityKey::from("req-5")].len(), 1);
    assert_eq!(outcome.records(), 12);

    let aborted = events
        .iter()
        .find(|e| e.message() == Some("source aborted"))
        .expect("missing warning for the aborted source");
    assert_eq!(aborted.level, Level::WARN);
    assert!(aborted.field("source").unwrap().ends_with("producer-4.log"));
}

#[test]
fn sanitize_summary_is_logged() {
    let ws = Workspace::with_corpus();
    let cfg = load_config(ws.root()).unwrap();
    let paths = discover(&cfg.sources.dir, &cfg.sources.pattern).unwrap();

    let (_, events) = capture_events(|| {
        Pipeline::from_config(&cfg)
            .sanitize_paths(&paths, MemorySink::new())
            .unwrap()
    });

    let summary = events
        .iter()
        .find(|e| e.message() == Some("sanitize finished"))
        .expect("missing sanitize summary");
    assert_eq!(summary.level, Level::INFO);
    assert_eq!(summary.field("records"), Some("11"));
    assert_eq!(summary.field("entities"), Some("4"));
    assert_eq!(summary.field("failed_sources"), Some("0"));
}

#[test]
fn config_warnings_are_logged_and_errors_fail_the_load() {
    // Arrange
    let warned = Workspace::new("sources {\n  dir = \"nowhere\"\n}\n");
    let invalid = Workspace::new("sources {\n  pattern = \"\"\n}\n");

    // Act
    let (ok, events) = capture_events(|| load_config(warned.root()));
    let err = load_config(invalid.root()).unwrap_err();

    // Assert
    assert!(ok.is_ok());
    let warning = events
        .iter()
        .find(|e| e.field("field") == Some("sources.dir"))
        .expect("missing warning for the missing source dir");
    assert_eq!(warning.level, Level::WARN);
    assert!(matches!(err, ConfigError::Invalid { .. }));
}
