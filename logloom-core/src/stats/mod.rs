mod lifetime;


pub use lifetime::*;
