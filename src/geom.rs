pub mod bounds;
pub mod point;
pub mod poly;
pub mod vector;

/// Geometric precision
pub(crate) const EPS: f64 = 1e-13;
