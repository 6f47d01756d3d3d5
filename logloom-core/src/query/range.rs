use crate::interval::{Interval, IntervalIndex};
use crate::query::TimeWindow;
use crate::record::{EntityKey, StreamKey};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Whether an interval counts as active in the window.
///
/// An interval qualifies when it starts strictly inside the window, or when it
/// starts strictly before the window and is still running strictly after the
/// window start. An interval starting exactly on either bound never qualifies.
pub fn overlaps(interval: &Interval, window: &TimeWindow) -> bool {
    let starts_inside = interval.start > window.start && interval.start < window.end;
    let runs_into = interval.start < window.start
        && interval.end.is_none_or(|end| end > window.start);

    starts_inside || runs_into
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveEntities {
    pub window: TimeWindow,
    /// Entities with at least one overlapping interval, and the streams it was found on.
    pub entities: BTreeMap<EntityKey, BTreeSet<StreamKey>>,
    pub count: usize,
}

pub fn active_entities(index: &IntervalIndex, window: TimeWindow) -> ActiveEntities {
    let mut entities = BTreeMap::new();

    for (entity, streams) in index.entities() {
        let active: BTreeSet<StreamKey> = streams
            .iter()
            .filter(|(_, intervals)| intervals.iter().any(|i| overlaps(i, &window)))
            .map(|(stream, _)| *stream)
            .collect();

        if !active.is_empty() {
            entities.insert(entity.clone(), active);
        }
    }

    ActiveEntities {
        window,
        count: entities.len(),
        entities,
    }
}
