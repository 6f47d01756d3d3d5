mod builder;
mod index;
mod types;


pub use builder::*;
pub use index::*;
pub use types::*;
