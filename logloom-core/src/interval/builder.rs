use crate::error::{EngineError, OrderingReason};
use crate::interval::{EntityIntervals, Interval, Markers};
use crate::record::Record;

enum Marker {
    Start,
    End,
}

/// Derives lifetime intervals from one entity's ordered log.
///
/// By default the input is trusted: an end closes the most recently opened
/// interval of its stream and a start always opens a new one. Only an end for
/// a stream that has never started is rejected. Strict mode also rejects a
/// start over an open interval and an end over a closed one.
#[derive(Debug, Clone, Default)]
pub struct IntervalBuilder {
    markers: Markers,
    strict: bool,
}

impl IntervalBuilder {
    pub fn new(markers: Markers) -> Self {
        Self {
            markers,
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn classify(&self, record: &Record) -> Option<Marker> {
        let payload = record.payload.trim();
        if payload == self.markers.start {
            Some(Marker::Start)
        } else if payload == self.markers.end {
            Some(Marker::End)
        } else {
            None
        }
    }

    pub fn build<'a>(
        &self,
        records: impl IntoIterator<Item = &'a Record>,
    ) -> Result<EntityIntervals, EngineError> {
        let mut streams = EntityIntervals::new();

        for record in records {
            match self.classify(record) {
                Some(Marker::Start) => {
                    let intervals = streams.entry(record.stream).or_default();
                    if self.strict && intervals.last().is_some_and(Interval::is_open) {
                        return Err(violation(record, OrderingReason::StartWhileOpen));
                    }
                    intervals.push(Interval::open(
                        record.entity.clone(),
                        record.stream,
                        record.timestamp,
                    ));
                }
                Some(Marker::End) => {
                    let Some(last) = streams.get_mut(&record.stream).and_then(|v| v.last_mut())
                    else {
                        return Err(violation(record, OrderingReason::EndWithoutStart));
                    };
                    if self.strict && !last.is_open() {
                        return Err(violation(record, OrderingReason::EndAfterClose));
                    }
                    last.end = Some(record.timestamp);
                }
                None => {}
            }
        }

        Ok(streams)
    }
}

fn violation(record: &Record, reason: OrderingReason) -> EngineError {
    EngineError::OrderingViolation {
        entity: record.entity.clone(),
        stream: record.stream,
        at: record.timestamp,
        reason,
    }
}
