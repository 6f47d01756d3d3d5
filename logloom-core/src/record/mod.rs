mod parse;
mod source;
mod types;


pub use parse::*;
pub use source::*;
pub use types::*;
