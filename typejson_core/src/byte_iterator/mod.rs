//! Byte-level cursor and the token helpers the JSON parser is built from.

mod basics;
mod iterator;

pub use basics::*;
pub use iterator::*;
