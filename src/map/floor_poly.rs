//! Floor polygons: the walkable segments of a room.
//!
//! Each edge of a floor polygon is either a wall or a connector to a
//! neighbouring floor polygon, which can sit in the same room, a different
//! room, or another level. Connectors are loaded as target uids and resolved
//! to arena slots in a second pass, once every polygon of the map is
//! registered.

use crate::MapError;
use crate::Point;
use crate::geom::poly::PlanarPoly;
use crate::map::Uid;
use crate::map::building::PolySlot;
use crate::map::furniture::Furniture;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct FloorPoly {
    uid: Uid,
    poly: PlanarPoly,
    /// Connector target uids; entry i describes the edge from vertex i to
    /// vertex (i + 1) mod n. None is a wall.
    connector_uids: Vec<Option<Uid>>,
    /// Resolved neighbour slots, same indexing. Empty until the owning map
    /// compiles its connections.
    links: Vec<Option<PolySlot>>,
    /// Slot of the owning room, set at registration.
    room: Option<usize>,
    furniture: Vec<Furniture>,
}

impl FloorPoly {
    /// Builds a floor polygon from loader data.
    ///
    /// The connector array must have one entry per vertex. Vertices given in
    /// counter-clockwise order are reversed to the clockwise convention,
    /// remapping each connector so it stays attached to the same physical
    /// edge.
    pub fn new(
        uid: Uid,
        mut pts: Vec<Point>,
        mut connectors: Vec<Option<Uid>>,
        furniture: Vec<Furniture>,
    ) -> Result<Self, MapError> {
        if connectors.len() != pts.len() {
            return Err(MapError::ConnectorCountMismatch {
                vertices: pts.len(),
                connectors: connectors.len(),
            });
        }
        // Checked before the winding repair, which assumes a non-degenerate
        // vertex list.
        if pts.len() < 3 {
            return Err(MapError::TooFewVertices(pts.len()));
        }
        make_clockwise(&mut pts, &mut connectors);
        let poly = PlanarPoly::new(pts)?;

        Ok(Self {
            uid,
            poly,
            connector_uids: connectors,
            links: Vec::new(),
            room: None,
            furniture,
        })
    }

    pub fn uid(&self) -> Uid {
        self.uid
    }

    pub fn geometry(&self) -> &PlanarPoly {
        &self.poly
    }

    pub fn vertices(&self) -> &[Point] {
        self.poly.vertices()
    }

    pub fn area(&self) -> f64 {
        self.poly.area()
    }

    pub fn centroid(&self) -> Point {
        self.poly.centroid()
    }

    pub fn bounds(&self) -> &crate::Bounds3 {
        self.poly.bounds()
    }

    pub fn is_inside_2d(&self, x: f64, y: f64) -> bool {
        self.poly.is_inside_2d(x, y)
    }

    pub fn height_at(&self, x: f64, y: f64) -> f64 {
        self.poly.height_at(x, y)
    }

    pub fn random_interior(&self, rng: &mut impl Rng) -> Point {
        self.poly.random_interior(rng)
    }

    pub fn connector_uids(&self) -> &[Option<Uid>] {
        &self.connector_uids
    }

    /// Resolved neighbour of edge `edge`, if the map has been compiled and
    /// the edge is a connector with a known target.
    pub fn link(&self, edge: usize) -> Option<PolySlot> {
        self.links.get(edge).copied().flatten()
    }

    pub fn links(&self) -> &[Option<PolySlot>] {
        &self.links
    }

    /// Slot of the owning room within the map.
    pub fn room_slot(&self) -> Option<usize> {
        self.room
    }

    pub fn furniture(&self) -> &[Furniture] {
        &self.furniture
    }

    pub(crate) fn set_room_slot(&mut self, slot: usize) {
        self.room = Some(slot);
    }

    /// Resolves connector uids into neighbour slots.
    ///
    /// A connector whose target uid is unknown to the resolver degrades to
    /// a wall; the map may reference polygons that were filtered out of the
    /// loaded subset, and that is tolerated, not fatal.
    pub(crate) fn compile_connections<F>(&mut self, resolve: F)
    where
        F: Fn(Uid) -> Option<PolySlot>,
    {
        self.links = self
            .connector_uids
            .iter()
            .map(|connector| match connector {
                Some(target_uid) => {
                    let target = resolve(*target_uid);
                    if target.is_none() {
                        log::warn!(
                            "floor polygon {}: connector to unknown uid {} treated as wall",
                            self.uid,
                            target_uid
                        );
                    }
                    target
                }
                None => None,
            })
            .collect();
    }

    /// Position along edge `edge` (vertex `edge` -> vertex `edge + 1 mod n`)
    /// at which the segment p1 -> p2 crosses it, projected onto the xy
    /// plane. 0 is the edge start, 1 the edge end. None if the segment
    /// misses the edge or runs parallel to it.
    pub fn intersect_edge(&self, edge: usize, p1: Point, p2: Point) -> Option<f64> {
        let pts = self.poly.vertices();
        let w1 = pts[edge];
        let w2 = pts[(edge + 1) % pts.len()];

        let min_x = w1.x.min(w2.x);
        let min_y = w1.y.min(w2.y);
        let max_x = w1.x.max(w2.x);
        let max_y = w1.y.max(w2.y);
        if (p1.x < min_x && p2.x < min_x)
            || (p1.x > max_x && p2.x > max_x)
            || (p1.y < min_y && p2.y < min_y)
            || (p1.y > max_y && p2.y > max_y)
        {
            // Segment bbox misses the edge bbox
            return None;
        }

        let edge_dx = w2.x - w1.x;
        let edge_dy = w2.y - w1.y;
        let seg_dx = p2.x - p1.x;
        let seg_dy = p2.y - p1.y;
        let denominator = seg_dy * edge_dx - seg_dx * edge_dy;
        if denominator == 0.0 {
            // Lines are parallel
            return None;
        }

        let dx2 = w1.x - p1.x;
        let dy2 = w1.y - p1.y;
        // num_edge / denominator is the position along w1 -> w2,
        // num_seg / denominator the position along p1 -> p2.
        let num_edge = seg_dx * dy2 - seg_dy * dx2;
        let num_seg = edge_dx * dy2 - edge_dy * dx2;

        if denominator < 0.0 {
            if num_edge > 0.0 || num_seg > 0.0 || num_edge < denominator || num_seg < denominator {
                // Segments do not overlap
                return None;
            }
        } else if num_edge < 0.0 || num_seg < 0.0 || num_edge > denominator || num_seg > denominator
        {
            // Segments do not overlap
            return None;
        }

        Some(num_edge / denominator)
    }
}

/// 2D signed-area test: clockwise in the xy projection iff the shoelace sum
/// is negative.
fn is_clockwise(pts: &[Point]) -> bool {
    let n = pts.len();
    let mut area = 0.0;
    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        area += a.x * b.y - a.y * b.x;
    }
    area < 0.0
}

/// Reverses counter-clockwise vertex lists into clockwise order.
///
/// Connectors are remapped so that each one stays on the same physical edge
/// (the same vertex pair) after the reversal: edge i takes the connector of
/// old edge n - 2 - i, and the last edge keeps its own. Downstream consumers
/// index edges by this exact convention, so the mapping is kept verbatim.
fn make_clockwise(pts: &mut [Point], connectors: &mut [Option<Uid>]) {
    if is_clockwise(pts) {
        return;
    }
    log::warn!("polygon vertices not in clockwise order - repaired");

    pts.reverse();

    let n = connectors.len();
    let mut remapped: Vec<Option<Uid>> = vec![None; n];
    for (i, slot) in remapped.iter_mut().enumerate().take(n - 1) {
        *slot = connectors[n - i - 2];
    }
    remapped[n - 1] = connectors[n - 1];
    connectors.copy_from_slice(&remapped);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn square_cw() -> Vec<Point> {
        vec![
            Point::new(0., 0., 0.),
            Point::new(0., 5., 0.),
            Point::new(5., 5., 0.),
            Point::new(5., 0., 0.),
        ]
    }

    fn square_ccw() -> Vec<Point> {
        vec![
            Point::new(0., 0., 0.),
            Point::new(5., 0., 0.),
            Point::new(5., 5., 0.),
            Point::new(0., 5., 0.),
        ]
    }

    /// Maps each physical edge (unordered vertex pair) to its connector.
    fn edges_by_vertex_pair(poly: &FloorPoly) -> Vec<(HashSet<(i64, i64)>, Option<Uid>)> {
        let pts = poly.vertices();
        let n = pts.len();
        (0..n)
            .map(|i| {
                let a = pts[i];
                let b = pts[(i + 1) % n];
                let pair: HashSet<(i64, i64)> = [(a.x as i64, a.y as i64), (b.x as i64, b.y as i64)]
                    .into_iter()
                    .collect();
                (pair, poly.connector_uids()[i])
            })
            .collect()
    }

    #[test]
    fn test_empty_vertex_list_rejected() {
        let result = FloorPoly::new(1, Vec::new(), Vec::new(), Vec::new());
        assert_eq!(result.unwrap_err(), MapError::TooFewVertices(0));
    }

    #[test]
    fn test_connector_count_mismatch() {
        let result = FloorPoly::new(1, square_cw(), vec![None, None], Vec::new());
        assert_eq!(
            result.unwrap_err(),
            MapError::ConnectorCountMismatch {
                vertices: 4,
                connectors: 2
            }
        );
    }

    #[test]
    fn test_clockwise_input_kept_verbatim() {
        let pts = square_cw();
        let connectors = vec![Some(10), None, Some(11), None];
        let poly = FloorPoly::new(1, pts.clone(), connectors.clone(), Vec::new()).unwrap();
        assert_eq!(poly.vertices(), &pts[..]);
        assert_eq!(poly.connector_uids(), &connectors[..]);
    }

    #[test]
    fn test_ccw_input_reversed_to_clockwise() {
        let poly = FloorPoly::new(1, square_ccw(), vec![None; 4], Vec::new()).unwrap();
        assert!(is_clockwise(poly.vertices()));
    }

    #[test]
    fn test_winding_repair_preserves_physical_edges() {
        // Tag every edge of the ccw square with a distinct connector, then
        // check each connector still sits on the same vertex pair after the
        // repair.
        let connectors = vec![Some(100), Some(101), Some(102), Some(103)];
        let ccw = FloorPoly::new(1, square_ccw(), connectors.clone(), Vec::new()).unwrap();

        // Build the expected pair -> connector mapping from the ccw input
        // directly.
        let input_pts = square_ccw();
        let mut expected = Vec::new();
        for i in 0..4 {
            let a = input_pts[i];
            let b = input_pts[(i + 1) % 4];
            let pair: HashSet<(i64, i64)> = [(a.x as i64, a.y as i64), (b.x as i64, b.y as i64)]
                .into_iter()
                .collect();
            expected.push((pair, connectors[i]));
        }

        for (pair, connector) in edges_by_vertex_pair(&ccw) {
            let matching = expected.iter().find(|(p, _)| *p == pair).unwrap();
            assert_eq!(connector, matching.1, "connector moved off its edge");
        }
    }

    #[test]
    fn test_winding_repair_preserves_physical_edges_pentagon() {
        // Odd vertex count exercises the special-cased last edge.
        let pts = vec![
            Point::new(0., 0., 0.),
            Point::new(4., 0., 0.),
            Point::new(5., 3., 0.),
            Point::new(2., 5., 0.),
            Point::new(-1., 3., 0.),
        ];
        assert!(!is_clockwise(&pts));
        let connectors = vec![Some(20), Some(21), None, Some(23), Some(24)];

        let mut expected = Vec::new();
        for i in 0..5 {
            let a = pts[i];
            let b = pts[(i + 1) % 5];
            let pair: HashSet<(i64, i64)> = [(a.x as i64, a.y as i64), (b.x as i64, b.y as i64)]
                .into_iter()
                .collect();
            expected.push((pair, connectors[i]));
        }

        let poly = FloorPoly::new(1, pts, connectors, Vec::new()).unwrap();
        assert!(is_clockwise(poly.vertices()));
        for (pair, connector) in edges_by_vertex_pair(&poly) {
            let matching = expected.iter().find(|(p, _)| *p == pair).unwrap();
            assert_eq!(connector, matching.1, "connector moved off its edge");
        }
    }

    #[test]
    fn test_intersect_edge_crossing() {
        // Edge 0 runs from (0,0) to (0,5).
        let poly = FloorPoly::new(1, square_cw(), vec![None; 4], Vec::new()).unwrap();
        let hit = poly.intersect_edge(0, Point::new(-1., 2., 0.), Point::new(1., 2., 0.));
        assert!((hit.unwrap() - 0.4).abs() < 1e-10);
    }

    #[test]
    fn test_intersect_edge_fraction_is_along_the_edge() {
        // Edge 2 runs from (5,5) to (5,0); crossing at y = 4 is 20% along it.
        let poly = FloorPoly::new(1, square_cw(), vec![None; 4], Vec::new()).unwrap();
        let hit = poly.intersect_edge(2, Point::new(4., 4., 0.), Point::new(6., 4., 0.));
        assert!((hit.unwrap() - 0.2).abs() < 1e-10);
    }

    #[test]
    fn test_intersect_edge_parallel() {
        let poly = FloorPoly::new(1, square_cw(), vec![None; 4], Vec::new()).unwrap();
        // Collinear segment overlapping edge 0's bbox: zero denominator.
        let hit = poly.intersect_edge(0, Point::new(0., -3., 0.), Point::new(0., 3., 0.));
        assert_eq!(hit, None);
    }

    #[test]
    fn test_intersect_edge_bbox_rejection() {
        let poly = FloorPoly::new(1, square_cw(), vec![None; 4], Vec::new()).unwrap();
        let hit = poly.intersect_edge(0, Point::new(10., 10., 0.), Point::new(11., 11., 0.));
        assert_eq!(hit, None);
    }

    #[test]
    fn test_intersect_edge_non_overlapping_segments() {
        let poly = FloorPoly::new(1, square_cw(), vec![None; 4], Vec::new()).unwrap();
        // Bboxes overlap, but the segment's line crosses edge 0's line at
        // y = 6, past the edge's end: rejected by the range checks.
        let hit = poly.intersect_edge(0, Point::new(-1., 3., 0.), Point::new(0.5, 7.5, 0.));
        assert_eq!(hit, None);
    }

    #[test]
    fn test_intersect_edge_endpoints() {
        let poly = FloorPoly::new(1, square_cw(), vec![None; 4], Vec::new()).unwrap();
        // Crossing right at the edge start yields 0.
        let hit = poly.intersect_edge(0, Point::new(-1., 0., 0.), Point::new(1., 0., 0.));
        assert!((hit.unwrap() - 0.).abs() < 1e-10);
    }
}
