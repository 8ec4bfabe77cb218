//! The map aggregate: rooms, uid indices, connectivity compilation and
//! map-wide sampling.
//!
//! A map is built in two phases. Rooms are registered with `add_room` while
//! connectors are still raw uids; `compile_map` then resolves every
//! connector against the finished uid index. After compilation the map is
//! read-only: every query takes `&self` and the frozen map is safe to share
//! across threads.

use crate::MapError;
use crate::Point;
use crate::geom::bounds::Bounds3;
use crate::map::Uid;
use crate::map::floor_poly::FloorPoly;
use crate::map::records::RoomRecord;
use crate::map::room::Room;
use rand::Rng;
use std::collections::HashMap;

/// Index of a floor polygon inside the map: the owning room's slot and the
/// polygon's position within that room.
///
/// Cross-references between polygons are stored as slots (or uids before
/// compilation), never as owning pointers, so the ownership graph stays a
/// tree: map -> rooms -> polygons.
///
/// Slots are only ever minted by the owning map during registration, so a
/// `PolySlot` held by a caller is always valid for the map it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolySlot {
    pub(crate) room: usize,
    pub(crate) poly: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Map25 {
    rooms: Vec<Room>,
    room_index: HashMap<Uid, usize>,
    poly_index: HashMap<Uid, PolySlot>,
    /// Polygon slots in registration order; sampling iterates this.
    poly_order: Vec<PolySlot>,
    bounds: Bounds3,
    total_area: f64,
    compiled: bool,
}

impl Map25 {
    pub fn new() -> Self {
        Self {
            rooms: Vec::new(),
            room_index: HashMap::new(),
            poly_index: HashMap::new(),
            poly_order: Vec::new(),
            bounds: Bounds3::new(),
            total_area: 0.0,
            compiled: false,
        }
    }

    /// Registers a room and all of its floor polygons.
    ///
    /// Rooms may be added in any order, but only before `compile_map`.
    pub fn add_room(&mut self, mut room: Room) -> Result<(), MapError> {
        if self.compiled {
            return Err(MapError::AlreadyCompiled);
        }
        if self.room_index.contains_key(&room.uid()) {
            return Err(MapError::DuplicateRoomUid(room.uid()));
        }
        let mut incoming: Vec<Uid> = Vec::with_capacity(room.floor_polys().len());
        for poly in room.floor_polys() {
            if self.poly_index.contains_key(&poly.uid()) || incoming.contains(&poly.uid()) {
                return Err(MapError::DuplicatePolyUid(poly.uid()));
            }
            incoming.push(poly.uid());
        }

        let slot = self.rooms.len();
        self.total_area += room.area();
        self.bounds.expand(room.bounds());
        self.room_index.insert(room.uid(), slot);
        for (i, poly) in room.floor_polys_mut().iter_mut().enumerate() {
            poly.set_room_slot(slot);
            let poly_slot = PolySlot { room: slot, poly: i };
            self.poly_index.insert(poly.uid(), poly_slot);
            self.poly_order.push(poly_slot);
        }
        self.rooms.push(room);
        Ok(())
    }

    /// Resolves every connector uid in the map to its neighbour slot.
    ///
    /// Must run exactly once, after the last `add_room`. Connectors whose
    /// target is absent from the map degrade to walls.
    pub fn compile_map(&mut self) -> Result<(), MapError> {
        if self.compiled {
            return Err(MapError::AlreadyCompiled);
        }
        let index = &self.poly_index;
        for room in &mut self.rooms {
            for poly in room.floor_polys_mut() {
                poly.compile_connections(|uid| index.get(&uid).copied());
            }
        }
        self.compiled = true;
        Ok(())
    }

    /// Builds and compiles a map from loader records in one step.
    pub fn from_records(records: Vec<RoomRecord>) -> Result<Self, MapError> {
        let mut map = Self::new();
        for record in records {
            map.add_room(Room::from_record(record)?)?;
        }
        map.compile_map()?;
        Ok(map)
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Floor polygons in registration order.
    pub fn floor_polys(&self) -> impl Iterator<Item = &FloorPoly> {
        self.poly_order.iter().map(move |&slot| self.poly(slot))
    }

    /// Resolves a slot handed out by this map (via [`FloorPoly::link`],
    /// [`FloorPoly::links`] or registration order).
    pub fn poly(&self, slot: PolySlot) -> &FloorPoly {
        &self.rooms[slot.room].floor_polys()[slot.poly]
    }

    /// Looks up a floor polygon by uid. Misses return None, never an error.
    pub fn floor_poly(&self, uid: Uid) -> Option<&FloorPoly> {
        self.poly_index.get(&uid).map(|&slot| self.poly(slot))
    }

    /// Looks up a room by uid. Misses return None, never an error.
    pub fn room(&self, uid: Uid) -> Option<&Room> {
        self.room_index.get(&uid).map(|&slot| &self.rooms[slot])
    }

    /// Looks up a room by name (linear scan; names are few).
    pub fn room_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.name() == name)
    }

    /// Room owning the given floor polygon.
    pub fn owning_room(&self, poly: &FloorPoly) -> Option<&Room> {
        poly.room_slot().map(|slot| &self.rooms[slot])
    }

    /// Neighbour of `poly` across edge `edge`, if that edge is a resolved
    /// connector.
    pub fn neighbor(&self, poly: &FloorPoly, edge: usize) -> Option<&FloorPoly> {
        poly.link(edge).map(|slot| self.poly(slot))
    }

    pub fn bounds(&self) -> &Bounds3 {
        &self.bounds
    }

    /// Total floor area over all rooms.
    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    /// Draws a position uniformly distributed over the entire map surface,
    /// together with the floor polygon it landed on.
    ///
    /// Polygons are weighted by area. Returns None iff the map's total
    /// area is 0.
    pub fn sample_uniform_point(&self, rng: &mut impl Rng) -> Option<(Point, &FloorPoly)> {
        let target = rng.gen::<f64>() * self.total_area;
        let mut acc = 0.0;
        for &slot in &self.poly_order {
            let poly = self.poly(slot);
            acc += poly.area();
            if target < acc {
                return Some((poly.random_interior(rng), poly));
            }
        }
        // The map has a surface area of 0.
        None
    }

    /// Reports connectors that have no reciprocal connector back from the
    /// target polygon, as (from uid, to uid) pairs.
    ///
    /// Diagnostic only: one-way transitions are legal map data, so nothing
    /// is repaired or rejected here.
    pub fn check_connector_symmetry(&self) -> Vec<(Uid, Uid)> {
        let mut unmatched = Vec::new();
        for poly in self.floor_polys() {
            for connector in poly.connector_uids().iter().flatten() {
                let reciprocal = self.floor_poly(*connector).map(|target| {
                    target
                        .connector_uids()
                        .iter()
                        .any(|back| *back == Some(poly.uid()))
                });
                if reciprocal != Some(true) {
                    unmatched.push((poly.uid(), *connector));
                }
            }
        }
        unmatched
    }
}
