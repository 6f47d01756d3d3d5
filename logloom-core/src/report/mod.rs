//! Plain text and JSON renderings of pipeline outcomes.

mod json;
mod text;


pub use json::*;
pub use text::*;
