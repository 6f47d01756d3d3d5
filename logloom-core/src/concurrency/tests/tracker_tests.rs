use crate::concurrency::{ConcurrencyPeak, ConcurrencyTracker, TrailingBucket};
use crate::record::{EntityKey, Record, StreamKey};
use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;

fn at(secs: u32, ms: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 5, 14)
        .unwrap()
        .and_hms_milli_opt(10, 0, secs, ms)
        .unwrap()
}

fn rec(entity: &str, secs: u32, ms: u32) -> Record {
    Record {
        entity: EntityKey(entity.into()),
        stream: StreamKey(1),
        producer: "main".into(),
        timestamp: at(secs, ms),
        payload: String::new(),
    }
}

fn run(policy: TrailingBucket, records: &[Record]) -> ConcurrencyPeak {
    let mut tracker = ConcurrencyTracker::new(policy);
    for r in records {
        tracker.observe(r);
    }
    tracker.finish()
}

#[test]
fn peak_is_reported_on_transition() {
    // Arrange
    let records = [rec("A", 1, 0), rec("B", 1, 100), rec("C", 1, 900), rec("A", 2, 0)];

    // Act
    let peak = run(TrailingBucket::Discard, &records);

    // Assert
    assert_eq!(
        peak,
        ConcurrencyPeak {
            epoch: Some(at(1, 0)),
            max_concurrent: 3,
        }
    );
}

#[test]
fn repeated_entities_in_a_second_count_once() {
    let records = [rec("A", 1, 0), rec("A", 1, 10), rec("B", 1, 20), rec("A", 2, 0)];

    let peak = run(TrailingBucket::Discard, &records);

    assert_eq!(peak.max_concurrent, 2);
}

#[test]
fn new_bucket_is_seeded_with_the_transition_record() {
    // Second 2 holds A (the transition record) and B; second 1 holds only C.
    let records = [rec("C", 1, 0), rec("A", 2, 0), rec("B", 2, 500), rec("C", 3, 0)];

    let peak = run(TrailingBucket::Discard, &records);

    assert_eq!(peak.epoch, Some(at(2, 0)));
    assert_eq!(peak.max_concurrent, 2);
}

#[test]
fn ties_keep_the_earliest_epoch() {
    let records = [
        rec("A", 1, 0),
        rec("B", 1, 0),
        rec("C", 2, 0),
        rec("D", 2, 0),
        rec("E", 3, 0),
    ];

    let peak = run(TrailingBucket::Discard, &records);

    assert_eq!(peak.epoch, Some(at(1, 0)));
    assert_eq!(peak.max_concurrent, 2);
}

#[test]
fn trailing_bucket_policy_changes_the_result() {
    // Arrange: the largest bucket is the last one and is never superseded.
    let records = [rec("A", 1, 0), rec("A", 2, 0), rec("B", 2, 0), rec("C", 2, 0)];

    // Act
    let discarded = run(TrailingBucket::Discard, &records);
    let flushed = run(TrailingBucket::Flush, &records);

    // Assert
    assert_eq!(
        discarded,
        ConcurrencyPeak {
            epoch: Some(at(1, 0)),
            max_concurrent: 1,
        }
    );
    assert_eq!(
        flushed,
        ConcurrencyPeak {
            epoch: Some(at(2, 0)),
            max_concurrent: 3,
        }
    );
}

#[test]
fn single_second_stream_has_no_epoch_unless_flushed() {
    let records = [rec("A", 1, 0), rec("B", 1, 0)];

    assert_eq!(run(TrailingBucket::Discard, &records), ConcurrencyPeak::default());
    assert_eq!(run(TrailingBucket::Flush, &records).max_concurrent, 2);
}

#[test]
fn empty_stream_has_no_epoch() {
    assert_eq!(run(TrailingBucket::Flush, &[]), ConcurrencyPeak::default());
}
