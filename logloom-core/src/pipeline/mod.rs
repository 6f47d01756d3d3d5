//! Run orchestration.
//!
//! A [`Pipeline`] carries only settings. Every call builds its own merger,
//! tracker and demultiplexer, so repeated runs over the same input produce the
//! same outcome.

mod outcome;
mod runner;

#[cfg(test)]
mod tests;

pub use outcome::*;
pub use runner::*;
