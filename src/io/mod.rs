//! I/O modules
//!
//! Text sources and destinations, delimited text parsing/formatting, the
//! numeric array type, and audio decoding using Symphonia.

pub mod array;
pub mod audio;
pub mod source;
pub mod text;
