//! File I/O for 2.5D maps.
//!
//! Loading always produces a fully compiled map; the two-phase
//! add-then-compile protocol is internal to the readers.

pub mod json;
pub mod rmap;

pub use json::{from_json_string, read_map, to_json_string, write_map};
pub use rmap::{read_rmap, write_rmap};
