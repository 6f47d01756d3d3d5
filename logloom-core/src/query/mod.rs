mod range;
mod window;


pub use range::*;
pub use window::*;
