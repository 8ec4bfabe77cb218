//! The 2.5D building map: rooms made of floor polygons, connected across
//! shared edges into a walkable graph.

pub mod building;
pub mod floor_poly;
pub mod furniture;
pub mod records;
pub mod room;

/// Loader-assigned identifier of a room or floor polygon. Unique within
/// one map.
pub type Uid = u32;
