use std::fmt;

use glam::Vec2;
use imageproc::point::Point;
use serde::Deserialize;

use crate::consts::POLYGON_VERTICES;

/// A quadrilateral marking a detected text region, in image pixel space.
///
/// Vertices are kept in the order the service returns them, which is
/// clockwise starting from the top-left corner of the text.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "WirePolygon")]
pub struct Polygon {
    vertices: [Vec2; POLYGON_VERTICES],
}

impl Polygon {
    /// Creates a polygon from its four vertices.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use cogdemo_core::analysis::polygon::Polygon;
    /// let polygon = Polygon::new([
    ///     Vec2::new(0.0, 0.0),
    ///     Vec2::new(10.0, 0.0),
    ///     Vec2::new(10.0, 5.0),
    ///     Vec2::new(0.0, 5.0),
    /// ]);
    /// assert_eq!(polygon.vertices()[2], Vec2::new(10.0, 5.0));
    /// ```
    pub fn new(vertices: [Vec2; POLYGON_VERTICES]) -> Self {
        Self { vertices }
    }

    /// Creates a polygon from the flat `[x0, y0, x1, y1, x2, y2, x3, y3]`
    /// form. Returns `None` unless exactly 8 numbers are given.
    ///
    /// # Example
    /// ```
    /// use cogdemo_core::analysis::polygon::Polygon;
    /// let polygon = Polygon::from_flat(&[1.0, 2.0, 9.0, 2.0, 9.0, 6.0, 1.0, 6.0]).unwrap();
    /// assert_eq!(polygon.to_string(), "((1, 2), (9, 2), (9, 6), (1, 6))");
    /// assert!(Polygon::from_flat(&[1.0, 2.0]).is_none());
    /// ```
    pub fn from_flat(values: &[f32]) -> Option<Self> {
        if values.len() != POLYGON_VERTICES * 2 {
            return None;
        }

        let mut vertices = [Vec2::ZERO; POLYGON_VERTICES];
        for (vertex, pair) in vertices.iter_mut().zip(values.chunks_exact(2)) {
            *vertex = Vec2::new(pair[0], pair[1]);
        }

        Some(Self { vertices })
    }

    pub fn vertices(&self) -> &[Vec2; POLYGON_VERTICES] {
        &self.vertices
    }

    /// Returns this polygon moved by `delta`.
    pub fn translate(&self, delta: Vec2) -> Self {
        Self {
            vertices: self.vertices.map(|vertex| vertex + delta),
        }
    }

    /// Converts the vertices into imageproc points for drawing.
    ///
    /// Repeated consecutive vertices are merged and trailing vertices equal
    /// to the first are dropped, so a degenerate polygon yields fewer than
    /// four points: two for a segment, one for a single point.
    ///
    /// # Example
    /// ```
    /// use cogdemo_core::analysis::polygon::Polygon;
    /// let closed = Polygon::from_flat(&[1.0, 1.0, 8.0, 1.0, 8.0, 6.0, 1.0, 1.0]).unwrap();
    /// assert_eq!(closed.to_points().len(), 3);
    /// let dot = Polygon::from_flat(&[5.0; 8]).unwrap();
    /// assert_eq!(dot.to_points().len(), 1);
    /// ```
    pub fn to_points(&self) -> Vec<Point<f32>> {
        let mut points: Vec<Point<f32>> = Vec::with_capacity(POLYGON_VERTICES);
        for vertex in &self.vertices {
            let point = Point::new(vertex.x, vertex.y);
            if points.last() != Some(&point) {
                points.push(point);
            }
        }
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        points
    }
}

/// Prints the vertices as a tuple of `(x, y)` pairs, e.g.
/// `((1, 2), (9, 2), (9, 6), (1, 6))`.
impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (idx, vertex) in self.vertices.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", vertex.x, vertex.y)?;
        }
        write!(f, ")")
    }
}

/// Wire forms accepted for a bounding polygon.
#[derive(Deserialize)]
#[serde(untagged)]
enum WirePolygon {
    Flat(Vec<f32>),
    Points(Vec<WirePoint>),
}

#[derive(Deserialize)]
struct WirePoint {
    x: f32,
    y: f32,
}

impl TryFrom<WirePolygon> for Polygon {
    type Error = String;

    fn try_from(wire: WirePolygon) -> Result<Self, Self::Error> {
        match wire {
            WirePolygon::Flat(values) => Polygon::from_flat(&values).ok_or_else(|| {
                format!(
                    "bounding polygon has {} numbers, expected {}",
                    values.len(),
                    POLYGON_VERTICES * 2
                )
            }),
            WirePolygon::Points(points) => {
                let vertices: Vec<Vec2> = points.iter().map(|p| Vec2::new(p.x, p.y)).collect();
                let count = vertices.len();
                vertices
                    .try_into()
                    .map(Polygon::new)
                    .map_err(|_| {
                        format!("bounding polygon has {count} vertices, expected {POLYGON_VERTICES}")
                    })
            }
        }
    }
}
