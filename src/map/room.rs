use crate::Point;
use crate::geom::bounds::Bounds3;
use crate::map::Uid;
use crate::map::floor_poly::FloorPoly;

/// A room of the building: one or more floor polygons sharing a name and
/// an access level.
///
/// Union bounds, total area and the area-weighted centroid are derived once
/// at construction. A room with zero total area is valid; its centroid is
/// non-finite.
#[derive(Debug, Clone)]
pub struct Room {
    uid: Uid,
    name: String,
    access_level: i32,
    polys: Vec<FloorPoly>,
    bounds: Bounds3,
    area: f64,
    centroid: Point,
}

impl Room {
    pub fn new(uid: Uid, name: &str, access_level: i32, polys: Vec<FloorPoly>) -> Self {
        let mut bounds = Bounds3::new();
        let mut area = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut cz = 0.0;
        for poly in &polys {
            bounds.expand(poly.bounds());
            area += poly.area();
            let c = poly.centroid();
            cx += c.x * poly.area();
            cy += c.y * poly.area();
            cz += c.z * poly.area();
        }

        Self {
            uid,
            name: name.to_string(),
            access_level,
            polys,
            bounds,
            area,
            centroid: Point::new(cx / area, cy / area, cz / area),
        }
    }

    pub fn uid(&self) -> Uid {
        self.uid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Access level required to enter the room.
    pub fn access_level(&self) -> i32 {
        self.access_level
    }

    pub fn floor_polys(&self) -> &[FloorPoly] {
        &self.polys
    }

    pub(crate) fn floor_polys_mut(&mut self) -> &mut [FloorPoly] {
        &mut self.polys
    }

    pub fn bounds(&self) -> &Bounds3 {
        &self.bounds
    }

    /// Total floor area (sum over the room's polygons).
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Area-weighted centroid of the room's polygons.
    pub fn centroid(&self) -> Point {
        self.centroid
    }
}
