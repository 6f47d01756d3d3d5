//! K-way chronological merge of independently sorted record sources.
//!
//! Every source is already ascending by timestamp. The merger keeps exactly one
//! pending record per live source in a min-heap, so the output is globally
//! non-decreasing and each source's internal order survives.

mod merger;


pub use merger::*;
