use crate::demux::EntitySink;
use crate::error::EngineError;
use crate::record::{EntityKey, Record};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DemuxSummary {
    pub records: usize,
    pub per_entity: BTreeMap<EntityKey, usize>,
}

/// Routes each record to its entity's log without reordering or buffering.
pub struct Demultiplexer<S> {
    sink: S,
    summary: DemuxSummary,
}

impl<S: EntitySink> Demultiplexer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            summary: DemuxSummary::default(),
        }
    }

    pub fn route(&mut self, record: &Record) -> Result<(), EngineError> {
        self.sink.append(record)?;
        self.summary.records += 1;
        *self
            .summary
            .per_entity
            .entry(record.entity.clone())
            .or_insert(0) += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<(S, DemuxSummary), EngineError> {
        self.sink.finish()?;
        Ok((self.sink, self.summary))
    }
}
