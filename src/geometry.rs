//! 2D geometry primitives for the spatial partition and blend queries.
//!
//! Triangle containment and edge-distance tests are the hot path of every
//! blend query, so everything here is allocation-free and operates on plain
//! `f32` coordinates.

use serde::{Deserialize, Serialize};

/// A point in world coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn distance_squared(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Axis-aligned bounding rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Tight bounds of a point set. Empty input yields an inverted rectangle
    /// that overlaps nothing.
    pub fn from_points(points: &[Point]) -> Self {
        let mut bounds = Bounds {
            min_x: f32::MAX,
            min_y: f32::MAX,
            max_x: f32::MIN,
            max_y: f32::MIN,
        };
        for point in points {
            bounds.min_x = bounds.min_x.min(point.x);
            bounds.min_y = bounds.min_y.min(point.y);
            bounds.max_x = bounds.max_x.max(point.x);
            bounds.max_y = bounds.max_y.max(point.y);
        }
        bounds
    }

    /// Square box of half-extent `half` centred on `centre`.
    pub fn around(centre: Point, half: f32) -> Self {
        Bounds {
            min_x: centre.x - half,
            min_y: centre.y - half,
            max_x: centre.x + half,
            max_y: centre.y + half,
        }
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

/// One triangle of a region's fan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Triangle { a, b, c }
    }

    /// Point-in-triangle test via signed areas, inclusive of edges and
    /// vertices. A query point exactly on a shared edge therefore tests
    /// positive for both triangles; callers resolve the tie by scan order.
    pub fn contains(&self, p: Point) -> bool {
        let d1 = edge_sign(p, self.a, self.b);
        let d2 = edge_sign(p, self.b, self.c);
        let d3 = edge_sign(p, self.c, self.a);

        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

        !(has_neg && has_pos)
    }

    /// Minimum distance from `p` to the triangle's three edges.
    pub fn dist_to_closest_edge(&self, p: Point) -> f32 {
        let s1 = dist_to_segment(p, self.a, self.b);
        let s2 = dist_to_segment(p, self.b, self.c);
        let s3 = dist_to_segment(p, self.c, self.a);
        s1.min(s2).min(s3)
    }
}

/// Signed area of the parallelogram spanned by (b - a) and (p - a).
/// Positive when `p` lies to the left of the directed edge a -> b.
fn edge_sign(p: Point, a: Point, b: Point) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Distance from `p` to the segment a-b: the distance to the projection of
/// `p` onto the segment's supporting line, with the projection parameter
/// clamped to [0, 1].
fn dist_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let len_sq = a.distance_squared(&b);
    if len_sq == 0.0 {
        return p.distance(&a);
    }
    let t = ((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let projection = Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
    p.distance(&projection)
}
