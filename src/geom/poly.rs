//! Planar polygon geometry.
//!
//! A `PlanarPoly` is an immutable polygon in 3D whose vertices are coplanar.
//! All derived attributes (normal, area, centroid, bounds, flatness) are
//! computed once at construction and cached. The same geometry value is
//! embedded by floor polygons and furniture alike.

use crate::MapError;
use crate::geom::EPS;
use crate::geom::bounds::Bounds3;
use crate::{Point, Vector};
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanarPoly {
    pts: Vec<Point>,
    normal: Vector,
    area: f64,
    centroid: Point,
    bounds: Bounds3,
    flat: bool,
}

impl PlanarPoly {
    /// Builds a polygon from an ordered vertex sequence.
    ///
    /// Fails if fewer than 3 vertices are given or if every vertex lies on
    /// one line (no plane normal exists).
    pub fn new(pts: Vec<Point>) -> Result<Self, MapError> {
        if pts.len() < 3 {
            return Err(MapError::TooFewVertices(pts.len()));
        }
        let normal = compute_normal(&pts)?;
        let bounds = Bounds3::from_points(&pts);
        // Exact comparison: a floor stored with one shared z value is flat,
        // anything else takes the tilted-plane path.
        let flat = bounds.min_z() == bounds.max_z();
        let area = compute_area(&pts, normal);
        let centroid = compute_centroid(&pts);

        Ok(Self {
            pts,
            normal,
            area,
            centroid,
            bounds,
            flat,
        })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.pts
    }

    /// Unit vector normal to the polygon's supporting plane.
    pub fn normal(&self) -> Vector {
        self.normal
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    /// Area-weighted centroid. Non-finite for zero-area polygons.
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    pub fn bounds(&self) -> &Bounds3 {
        &self.bounds
    }

    /// True iff all vertices share one z value.
    pub fn is_flat(&self) -> bool {
        self.flat
    }

    /// Height of the polygon's supporting plane at (x, y).
    ///
    /// Callers must pass a position whose vertical ray actually meets the
    /// plane: a plane parallel to the z axis (normal.dz == 0) has no height
    /// and the division yields a non-finite value.
    pub fn height_at(&self, x: f64, y: f64) -> f64 {
        if self.flat {
            return self.pts[0].z;
        }
        let v0 = self.pts[0];
        let top = Vector::new(v0.x - x, v0.y - y, v0.z);
        let up = Vector::new(0., 0., 1.);
        self.normal.dot(top) / self.normal.dot(up)
    }

    /// Even-odd point containment test projected onto the xy plane.
    pub fn is_inside_2d(&self, x: f64, y: f64) -> bool {
        let n = self.pts.len();
        let mut crossings = 0;
        for i in 0..n {
            let a = self.pts[i];
            let b = self.pts[(i + 1) % n];
            crossings += crossings_for_edge(x, y, a.x, a.y, b.x, b.y);
        }
        crossings % 2 == 1
    }

    /// Draws a uniformly distributed point on the polygon surface by
    /// rejection sampling over the xy bounding box.
    ///
    /// Expected iterations are roughly bbox area over polygon area, so
    /// sliver polygons sample slowly (but correctly).
    pub fn random_interior(&self, rng: &mut impl Rng) -> Point {
        let min = self.bounds.min();
        let max = self.bounds.max();
        loop {
            let x = rng.gen::<f64>() * (max.x - min.x) + min.x;
            let y = rng.gen::<f64>() * (max.y - min.y) + min.y;
            if self.is_inside_2d(x, y) {
                return Point::new(x, y, self.height_at(x, y));
            }
        }
    }
}

/// Counts crossings of the edge (x0,y0)->(x1,y1) with the ray extending to
/// the right from (px,py).
///
/// The half-open comparisons (>= on one side, < on the other) keep a vertex
/// lying exactly on the ray from being counted by both edges that meet in
/// it.
fn crossings_for_edge(px: f64, py: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> u32 {
    if py < y0 && py < y1 {
        return 0;
    }
    if py >= y0 && py >= y1 {
        return 0;
    }
    if px >= x0 && px >= x1 {
        return 0;
    }
    if px < x0 && px < x1 {
        return 1;
    }
    let xintercept = x0 + (py - y0) * (x1 - x0) / (y1 - y0);
    if px >= xintercept { 0 } else { 1 }
}

/// Normal from the cross product of the first edge and the closing edge.
///
/// When the chosen vertex pair is collinear with vertex 0 the closing edge
/// walks backward through the vertex list until a non-degenerate pair is
/// found; exhausting the list means every vertex is collinear.
fn compute_normal(pts: &[Point]) -> Result<Vector, MapError> {
    let first_edge = Vector::from_points(pts[0], pts[1]);
    let mut step = 0;
    loop {
        let idx = pts.len() - 1 - step;
        if idx < 2 {
            return Err(MapError::CollinearVertices);
        }
        let last_edge = Vector::from_points(pts[0], pts[idx]);
        let vn = first_edge.cross(last_edge);
        if vn.length() > EPS {
            if let Some(unit) = vn.normalize() {
                return Ok(unit);
            }
        }
        step += 1;
    }
}

/// Newell's method: accumulate cross products of consecutive position
/// vectors (wrapping), project onto the unit normal and halve.
fn compute_area(pts: &[Point], normal: Vector) -> f64 {
    let mut acc = Vector::new(0., 0., 0.);
    let n = pts.len();
    for i in 0..n {
        let vi = Vector::from_a_point(pts[i]);
        let vj = Vector::from_a_point(pts[(i + 1) % n]);
        acc = acc + vi.cross(vj);
    }
    (normal.dot(acc) / 2.).abs()
}

/// Area-weighted centroid of the triangle fan rooted at vertex 0.
///
/// A zero total fan area divides through to non-finite components; that is
/// the documented degenerate output, not an error.
fn compute_centroid(pts: &[Point]) -> Point {
    let mut area_acc = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut cz = 0.0;
    for i in 1..pts.len() - 1 {
        let e1 = Vector::from_points(pts[0], pts[i]);
        let e2 = Vector::from_points(pts[0], pts[i + 1]);
        let area = e1.cross(e2).length() / 2.;
        if area != 0.0 {
            area_acc += area;
            cx += area * (pts[0].x + pts[i].x + pts[i + 1].x) / 3.;
            cy += area * (pts[0].y + pts[i].y + pts[i + 1].y) / 3.;
            cz += area * (pts[0].z + pts[i].z + pts[i + 1].z) / 3.;
        }
    }
    Point::new(cx / area_acc, cy / area_acc, cz / area_acc)
}
