use crate::Point;

/// Axis-aligned 3D bounding box used as an accumulator during map
/// construction and as a read-only snapshot afterwards.
///
/// A reset box carries the sentinel min = +INFINITY, max = -INFINITY per
/// axis, meaning "no geometry yet". Once any point has been expanded into
/// it, min <= max holds on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    min: Point,
    max: Point,
}

impl Bounds3 {
    pub fn new() -> Self {
        Self {
            min: Point::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(pts: &[Point]) -> Self {
        let mut bounds = Self::new();
        bounds.expand_points(pts);
        bounds
    }

    /// Resets the box back to the empty sentinel.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns true if nothing has been expanded into the box yet.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn expand_point(&mut self, pt: Point) {
        self.min.x = self.min.x.min(pt.x);
        self.min.y = self.min.y.min(pt.y);
        self.min.z = self.min.z.min(pt.z);
        self.max.x = self.max.x.max(pt.x);
        self.max.y = self.max.y.max(pt.y);
        self.max.z = self.max.z.max(pt.z);
    }

    pub fn expand_points(&mut self, pts: &[Point]) {
        for &pt in pts {
            self.expand_point(pt);
        }
    }

    /// Merges another box into this one (per-axis min/max).
    ///
    /// Mins and maxes are merged separately so that an empty box is the
    /// identity on either side.
    pub fn expand(&mut self, other: &Bounds3) {
        self.min.x = self.min.x.min(other.min.x);
        self.min.y = self.min.y.min(other.min.y);
        self.min.z = self.min.z.min(other.min.z);
        self.max.x = self.max.x.max(other.max.x);
        self.max.y = self.max.y.max(other.max.y);
        self.max.z = self.max.z.max(other.max.z);
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn min_x(&self) -> f64 {
        self.min.x
    }

    pub fn min_y(&self) -> f64 {
        self.min.y
    }

    pub fn min_z(&self) -> f64 {
        self.min.z
    }

    pub fn max_x(&self) -> f64 {
        self.max.x
    }

    pub fn max_y(&self) -> f64 {
        self.max.y
    }

    pub fn max_z(&self) -> f64 {
        self.max.z
    }
}

impl Default for Bounds3 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sentinel() {
        let b = Bounds3::new();
        assert!(b.is_empty());
        assert_eq!(b.min_x(), f64::INFINITY);
        assert_eq!(b.max_x(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_expand_points() {
        let mut b = Bounds3::new();
        b.expand_points(&[Point::new(1., -2., 3.), Point::new(-1., 5., 0.)]);
        assert!(!b.is_empty());
        assert!(b.min().is_close(&Point::new(-1., -2., 0.)));
        assert!(b.max().is_close(&Point::new(1., 5., 3.)));
    }

    #[test]
    fn test_merge() {
        let a = Bounds3::from_points(&[Point::new(0., 0., 0.), Point::new(1., 1., 1.)]);
        let mut b = Bounds3::from_points(&[Point::new(2., 2., 2.), Point::new(3., 3., 3.)]);
        b.expand(&a);
        assert!(b.min().is_close(&Point::new(0., 0., 0.)));
        assert!(b.max().is_close(&Point::new(3., 3., 3.)));
    }

    #[test]
    fn test_merge_with_empty_keeps_other() {
        let mut b = Bounds3::new();
        let a = Bounds3::from_points(&[Point::new(1., 2., 3.)]);
        b.expand(&a);
        assert!(b.min().is_close(&Point::new(1., 2., 3.)));
        assert!(b.max().is_close(&Point::new(1., 2., 3.)));
    }

    #[test]
    fn test_reset() {
        let mut b = Bounds3::from_points(&[Point::new(1., 1., 1.)]);
        b.reset();
        assert!(b.is_empty());
    }
}
