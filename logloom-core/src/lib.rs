pub mod cli;
pub mod concurrency;
pub mod conf;
pub mod demux;
pub mod error;
pub mod interval;
pub mod logging;
pub mod merge;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod report;
pub mod stats;
