use crate::error::EngineError;
use crate::interval::{EntityIntervals, Interval, IntervalBuilder};
use crate::record::{EntityKey, Record};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IntervalCounts {
    pub open: usize,
    pub closed: usize,
}

/// Intervals of every entity in the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IntervalIndex {
    entities: BTreeMap<EntityKey, EntityIntervals>,
}

impl IntervalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds intervals for every entity log. Stops at the first ordering violation.
    pub fn build(
        builder: &IntervalBuilder,
        logs: &BTreeMap<EntityKey, Vec<Record>>,
    ) -> Result<Self, EngineError> {
        let mut index = Self::new();
        for (entity, records) in logs {
            index.insert(entity.clone(), builder.build(records)?);
        }

        let counts = index.counts();
        tracing::debug!(
            entities = index.len(),
            open = counts.open,
            closed = counts.closed,
            "interval index built"
        );
        Ok(index)
    }

    pub fn insert(&mut self, entity: EntityKey, intervals: EntityIntervals) {
        self.entities.insert(entity, intervals);
    }

    pub fn get(&self, entity: &EntityKey) -> Option<&EntityIntervals> {
        self.entities.get(entity)
    }

    pub fn entities(&self) -> impl Iterator<Item = (&EntityKey, &EntityIntervals)> {
        self.entities.iter()
    }

    /// Every interval across all entities and streams.
    pub fn intervals(&self) -> impl Iterator<Item = &Interval> {
        self.entities
            .values()
            .flat_map(|streams| streams.values())
            .flatten()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn counts(&self) -> IntervalCounts {
        self.intervals().fold(IntervalCounts::default(), |mut c, i| {
            if i.is_open() {
                c.open += 1;
            } else {
                c.closed += 1;
            }
            c
        })
    }
}
