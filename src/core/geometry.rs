use serde::{Deserialize, Serialize};

/// 2D point in canvas pixels.
///
/// `#[repr(C)]` so a `&[Point]` can be handed to JS as an interleaved
/// `Float32Array` of `x, y` pairs.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned bounding box of a point set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Bounds of `points`, or a zero box at the origin for an empty slice.
    pub fn from_points(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return Self { min_x: 0.0, max_x: 0.0, min_y: 0.0, max_y: 0.0 };
        };
        let mut bounds = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        bounds
    }

    pub fn center_x(&self) -> f32 {
        (self.min_x + self.max_x) * 0.5
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_points() {
        let pts = [Point::new(4.0, -2.0), Point::new(-1.0, 9.0), Point::new(3.0, 3.0)];
        let b = Bounds::from_points(&pts);
        assert_eq!(b.min_x, -1.0);
        assert_eq!(b.max_x, 4.0);
        assert_eq!(b.min_y, -2.0);
        assert_eq!(b.max_y, 9.0);
        assert_eq!(b.center_x(), 1.5);
    }

    #[test]
    fn empty_bounds_sit_at_origin() {
        let b = Bounds::from_points(&[]);
        assert_eq!(b.height(), 0.0);
        assert_eq!(b.center_x(), 0.0);
    }

    #[test]
    fn point_deserializes_from_js_shape() {
        let p: Point = serde_json::from_str(r#"{"x": 12, "y": 3.5}"#).unwrap();
        assert_eq!(p, Point::new(12.0, 3.5));
    }
}
