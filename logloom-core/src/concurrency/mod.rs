mod tracker;

#[cfg(test)]
mod tests;

pub use tracker::*;
