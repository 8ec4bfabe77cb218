pub mod error;
pub mod geom;
pub mod io;
pub mod map;

// Prelude
pub use error::MapError;
pub use geom::bounds::Bounds3;
pub use geom::point::Point;
pub use geom::poly::PlanarPoly;
pub use geom::vector::Vector;
pub use map::Uid;
pub use map::building::{Map25, PolySlot};
pub use map::floor_poly::FloorPoly;
pub use map::furniture::Furniture;
pub use map::records::{EdgeKind, FurnitureRecord, MapRecord, PolyRecord, RoomRecord, VertexRecord};
pub use map::room::Room;
