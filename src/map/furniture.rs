use crate::MapError;
use crate::Point;
use crate::geom::poly::PlanarPoly;

/// A decoration polygon overlapping a floor polygon (a desk, a cupboard).
///
/// Furniture has no connectivity and no uid; it shares the planar geometry
/// value with floor polygons instead of being a polygon subtype.
#[derive(Debug, Clone, PartialEq)]
pub struct Furniture {
    name: String,
    description: Option<String>,
    poly: PlanarPoly,
}

impl Furniture {
    pub fn new(name: &str, description: Option<&str>, pts: Vec<Point>) -> Result<Self, MapError> {
        Ok(Self {
            name: name.to_string(),
            description: description.map(str::to_string),
            poly: PlanarPoly::new(pts)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn geometry(&self) -> &PlanarPoly {
        &self.poly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_furniture_geometry() {
        let desk = Furniture::new(
            "desk",
            Some("corner desk"),
            vec![
                Point::new(0., 0., 0.),
                Point::new(2., 0., 0.),
                Point::new(2., 1., 0.),
                Point::new(0., 1., 0.),
            ],
        )
        .unwrap();
        assert_eq!(desk.name(), "desk");
        assert_eq!(desk.description(), Some("corner desk"));
        assert!((desk.geometry().area() - 2.).abs() < 1e-10);
    }

    #[test]
    fn test_furniture_rejects_degenerate_outline() {
        let result = Furniture::new("line", None, vec![Point::new(0., 0., 0.), Point::new(1., 0., 0.)]);
        assert_eq!(result.unwrap_err(), MapError::TooFewVertices(2));
    }
}
