//! Persisted/wire shapes for maps.
//!
//! A polygon is persisted as an ordered vertex list; each vertex carries an
//! edge classification for the edge it starts: a wall, or a connector with
//! the target polygon's uid. Loaders (database, file, network) produce these
//! records; `Map25::from_records` turns them into a compiled map.

use crate::MapError;
use crate::Point;
use crate::map::Uid;
use crate::map::building::Map25;
use crate::map::floor_poly::FloorPoly;
use crate::map::furniture::Furniture;
use crate::map::room::Room;
use serde::{Deserialize, Serialize};

/// Classification of the edge starting at a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "edge", rename_all = "lowercase")]
pub enum EdgeKind {
    Wall,
    Connector { target: Uid },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(flatten)]
    pub edge: EdgeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub vertices: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyRecord {
    pub uid: Uid,
    pub vertices: Vec<VertexRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub furniture: Vec<FurnitureRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub uid: Uid,
    pub name: String,
    pub access_level: i32,
    pub polys: Vec<PolyRecord>,
}

/// Top-level persisted map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRecord {
    pub version: String,
    pub rooms: Vec<RoomRecord>,
}

impl MapRecord {
    pub const VERSION: &'static str = "1.0";

    pub fn new(rooms: Vec<RoomRecord>) -> Self {
        Self {
            version: Self::VERSION.to_string(),
            rooms,
        }
    }
}

impl Furniture {
    pub fn from_record(record: FurnitureRecord) -> Result<Self, MapError> {
        Furniture::new(&record.name, record.description.as_deref(), record.vertices)
    }

    pub fn to_record(&self) -> FurnitureRecord {
        FurnitureRecord {
            name: self.name().to_string(),
            description: self.description().map(str::to_string),
            vertices: self.geometry().vertices().to_vec(),
        }
    }
}

impl FloorPoly {
    pub fn from_record(record: PolyRecord) -> Result<Self, MapError> {
        let pts: Vec<Point> = record
            .vertices
            .iter()
            .map(|v| Point::new(v.x, v.y, v.z))
            .collect();
        let connectors: Vec<Option<Uid>> = record
            .vertices
            .iter()
            .map(|v| match v.edge {
                EdgeKind::Wall => None,
                EdgeKind::Connector { target } => Some(target),
            })
            .collect();
        let furniture = record
            .furniture
            .into_iter()
            .map(Furniture::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        FloorPoly::new(record.uid, pts, connectors, furniture)
    }

    /// Emits the stored (clockwise) form, so loading the record back yields
    /// bit-identical vertices and connectors.
    pub fn to_record(&self) -> PolyRecord {
        let vertices = self
            .vertices()
            .iter()
            .zip(self.connector_uids())
            .map(|(pt, connector)| VertexRecord {
                x: pt.x,
                y: pt.y,
                z: pt.z,
                edge: match connector {
                    Some(target) => EdgeKind::Connector { target: *target },
                    None => EdgeKind::Wall,
                },
            })
            .collect();
        PolyRecord {
            uid: self.uid(),
            vertices,
            furniture: self.furniture().iter().map(Furniture::to_record).collect(),
        }
    }
}

impl Room {
    pub fn from_record(record: RoomRecord) -> Result<Self, MapError> {
        let polys = record
            .polys
            .into_iter()
            .map(FloorPoly::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Room::new(record.uid, &record.name, record.access_level, polys))
    }

    pub fn to_record(&self) -> RoomRecord {
        RoomRecord {
            uid: self.uid(),
            name: self.name().to_string(),
            access_level: self.access_level(),
            polys: self.floor_polys().iter().map(FloorPoly::to_record).collect(),
        }
    }
}

impl Map25 {
    pub fn to_records(&self) -> Vec<RoomRecord> {
        self.rooms().iter().map(Room::to_record).collect()
    }
}
