use crate::map::Uid;
use thiserror::Error;

/// Errors raised while constructing polygons or assembling a map.
///
/// Lookup misses are not errors (those queries return `Option`), and a
/// connector pointing at a uid that is absent from the map degrades to a
/// wall during compilation instead of failing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("all polygon vertices are collinear")]
    CollinearVertices,

    #[error("connector array length {connectors} does not match vertex count {vertices}")]
    ConnectorCountMismatch { vertices: usize, connectors: usize },

    #[error("room uid {0} is already registered")]
    DuplicateRoomUid(Uid),

    #[error("floor polygon uid {0} is already registered")]
    DuplicatePolyUid(Uid),

    #[error("map is already compiled")]
    AlreadyCompiled,
}
