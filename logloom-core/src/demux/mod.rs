//! Per-entity demultiplexing of the merged stream.
//!
//! Records are forwarded to an [`EntitySink`] in arrival order; the sink owns the
//! resulting per-entity sequence. Payloads are never interpreted here.

mod demultiplexer;
mod load;
mod sink;


pub use demultiplexer::*;
pub use load::*;
pub use sink::*;
