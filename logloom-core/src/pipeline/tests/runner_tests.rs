use crate::concurrency::TrailingBucket;
use crate::demux::{FileSink, MemorySink};
use crate::error::EngineError;
use crate::interval::{IntervalBuilder, Markers};
use crate::pipeline::Pipeline;
use crate::query::{TimeWindow, parse_instant};
use crate::record::{EntityKey, LineSource, StreamKey};
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Cursor;
use tempfile::tempdir;

// ---------------------------
// Helpers
// ---------------------------

type MemSource = LineSource<Cursor<Vec<u8>>>;

fn source(name: &str, text: &str) -> MemSource {
    LineSource::new(name, Cursor::new(text.as_bytes().to_vec()))
}

fn corpus() -> Vec<MemSource> {
    vec![
        source(
            "producer-1.log",
            "\
1:A::worker 2019-05-14 10:00:00,100 - **START**
1:A::worker 2019-05-14 10:00:01,500 - processing
failed once
1:A::worker 2019-05-14 10:00:04,900 - **END**
",
        ),
        source(
            "producer-2.log",
            "\
2:B::worker 2019-05-14 10:00:00,200 - **START**
2:C::worker 2019-05-14 10:00:00,300 - **START**
2:B::worker 2019-05-14 10:00:02,000 - **END**
",
        ),
    ]
}

fn window(a: &str, b: &str) -> TimeWindow {
    TimeWindow::new(parse_instant(a).unwrap(), parse_instant(b).unwrap())
}

// ---------------------------
// Tests
// ---------------------------

#[test]
fn sanitize_groups_records_per_entity_and_tracks_peak() {
    // Arrange
    let pipeline = Pipeline::default();

    // Act
    let (sink, outcome) = pipeline.sanitize(corpus(), MemorySink::new()).unwrap();

    // Assert
    assert!(outcome.is_clean());
    assert_eq!(outcome.records(), 6);
    assert_eq!(outcome.peak.max_concurrent, 3);
    assert_eq!(outcome.peak.epoch, parse_instant("2019-05-14 10:00:00").ok());

    let a: Vec<_> = sink.logs()[&EntityKey::from("A")]
        .iter()
        .map(|r| r.payload.as_str())
        .collect();
    assert_eq!(a, vec!["**START**", "processing\nfailed once", "**END**"]);
}

#[test]
fn failing_source_does_not_stop_the_others() {
    // Arrange
    let mut sources = corpus();
    sources.push(source(
        "broken.log",
        "3:D::worker 2019-05-14 10:00:00,000 - **START**\n3:D::worker yesterday - **END**\n",
    ));

    // Act
    let (sink, outcome) = Pipeline::default()
        .sanitize(sources, MemorySink::new())
        .unwrap();

    // Assert
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].name, "broken.log");
    assert!(matches!(
        outcome.failures[0].error,
        EngineError::MalformedRecord { line: 2, .. }
    ));
    assert_eq!(sink.logs().len(), 4);
    assert_eq!(sink.logs()[&EntityKey::from("D")].len(), 1);
}

#[test]
fn unopenable_paths_are_reported_first() {
    // Arrange
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.log");
    fs::write(&good, "1:A::w 2019-05-14 10:00:00,000 - **START**\n").unwrap();
    let missing = dir.path().join("missing.log");

    // Act
    let (_, outcome) = Pipeline::default()
        .sanitize_paths(&[missing.clone(), good], MemorySink::new())
        .unwrap();

    // Assert
    assert_eq!(outcome.records(), 1);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].name, missing.display().to_string());
    assert!(matches!(
        outcome.failures[0].error,
        EngineError::SourceUnavailable { .. }
    ));
}

#[test]
fn run_answers_both_questions() {
    // Arrange
    let pipeline = Pipeline::default();

    // Act
    let outcome = pipeline
        .run(corpus(), window("2019-05-14 10:00:03", "2019-05-14 10:00:10"))
        .unwrap();

    // Assert
    assert_eq!(outcome.intervals.closed, 2);
    assert_eq!(outcome.intervals.open, 1);

    // A is still running at 10:00:03 and C never ended; B ended at 10:00:02.
    let active: Vec<_> = outcome.analysis.active.entities.keys().cloned().collect();
    assert_eq!(active, vec![EntityKey::from("A"), EntityKey::from("C")]);
    assert_eq!(
        outcome.analysis.active.entities[&EntityKey::from("C")]
            .iter()
            .copied()
            .collect::<Vec<_>>(),
        vec![StreamKey(2)]
    );

    // A lasted 4.8s -> 4, B lasted 1.8s -> 1.
    let lifetimes = outcome.analysis.lifetimes.unwrap();
    assert_eq!(lifetimes.count, 2);
    assert_eq!(lifetimes.mean, 2.5);
    assert_eq!(lifetimes.stddev, 1.5);
}

#[test]
fn run_without_closed_intervals_reports_empty_aggregation() {
    let only_starts = vec![source(
        "p.log",
        "1:A::w 2019-05-14 10:00:00,000 - **START**\n",
    )];

    let outcome = Pipeline::default()
        .run(only_starts, window("2019-05-14 09:00:00", "2019-05-14 11:00:00"))
        .unwrap();

    assert!(matches!(
        outcome.analysis.lifetimes,
        Err(EngineError::EmptyAggregation)
    ));
    assert_eq!(outcome.analysis.active.count, 1);
}

#[test]
fn strict_pipeline_rejects_repeated_start() {
    // Arrange
    let pipeline = Pipeline::new(
        IntervalBuilder::new(Markers::default()).strict(true),
        TrailingBucket::Discard,
    );
    let sources = vec![source(
        "p.log",
        "\
1:A::w 2019-05-14 10:00:00,000 - **START**
1:A::w 2019-05-14 10:00:01,000 - **START**
",
    )];

    // Act
    let err = pipeline
        .run(sources, window("2019-05-14 09:00:00", "2019-05-14 11:00:00"))
        .unwrap_err();

    // Assert
    assert!(matches!(err, EngineError::OrderingViolation { .. }));
}

#[test]
fn repeated_runs_over_files_are_identical() {
    // Arrange
    let out = tempdir().unwrap();
    let pipeline = Pipeline::default();
    let read_all = |dir: &std::path::Path| {
        let mut files: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        files.sort();
        files
            .into_iter()
            .map(|p| (p.clone(), fs::read_to_string(p).unwrap()))
            .collect::<Vec<_>>()
    };

    // Act
    let (_, first) = pipeline
        .sanitize(corpus(), FileSink::create(out.path()).unwrap())
        .unwrap();
    let first_files = read_all(out.path());
    let first_index = pipeline.index_dir(out.path()).unwrap();

    let (_, second) = pipeline
        .sanitize(corpus(), FileSink::create(out.path()).unwrap())
        .unwrap();
    let second_files = read_all(out.path());
    let second_index = pipeline.index_dir(out.path()).unwrap();

    // Assert
    assert_eq!(first.peak, second.peak);
    assert_eq!(first.demux, second.demux);
    assert_eq!(first_files, second_files);
    assert_eq!(first_index, second_index);
    assert_eq!(first_index.len(), 3);
}
