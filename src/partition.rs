//! Voronoi/Delaunay spatial partitioning of a 2D point set.
//!
//! Thin wrapper over `voronoice` that extracts, per site, the cell polygon
//! clipped to the domain box, a triangle fan rooted at the site, and the
//! Voronoi neighbour indices. The geometry itself is treated as a trusted
//! library; everything downstream works with the extracted [`SiteCell`]s.

use voronoice::{BoundingBox, Point as SitePoint, VoronoiBuilder};

use crate::geometry::{Bounds, Point, Triangle};

/// Geometry extracted for one Voronoi site.
///
/// The cell index in the output vector equals the site index in the input
/// point set, so `neighbours` doubles as a list of cell indices.
#[derive(Clone, Debug)]
pub struct SiteCell {
    pub centre: Point,
    pub polygon: Vec<Point>,
    pub bounds: Bounds,
    pub fan: Vec<Triangle>,
    pub neighbours: Vec<usize>,
}

/// Build the Voronoi diagram of `points` clipped to `[-size, size]^2` and
/// extract per-site geometry.
///
/// Degenerate point sets (fewer than three sites, or all collinear) cannot
/// be triangulated and produce an empty cell list rather than an error.
pub fn build_cells(points: &[Point], size: f32) -> Vec<SiteCell> {
    if points.len() < 3 {
        return Vec::new();
    }

    let sites: Vec<SitePoint> = points
        .iter()
        .map(|p| SitePoint {
            x: p.x as f64,
            y: p.y as f64,
        })
        .collect();

    let diagram = VoronoiBuilder::default()
        .set_sites(sites)
        .set_bounding_box(BoundingBox::new_centered(size as f64 * 2.0, size as f64 * 2.0))
        .build();

    let diagram = match diagram {
        Some(d) => d,
        None => return Vec::new(),
    };

    diagram
        .iter_cells()
        .map(|cell| {
            // keep the caller's f32 coordinate as the canonical centre
            let centre = points[cell.site()];
            let polygon: Vec<Point> = cell
                .iter_vertices()
                .map(|v| Point::new(v.x as f32, v.y as f32))
                .collect();
            let bounds = Bounds::from_points(&polygon);
            let fan = triangle_fan(centre, &polygon);
            let neighbours: Vec<usize> = cell.iter_neighbors().collect();

            SiteCell {
                centre,
                polygon,
                bounds,
                fan,
                neighbours,
            }
        })
        .collect()
}

/// Fan of triangles joining the site to each pair of consecutive cell
/// polygon vertices. Together the fans of all cells tile the domain box.
fn triangle_fan(centre: Point, polygon: &[Point]) -> Vec<Triangle> {
    (0..polygon.len())
        .map(|i| Triangle::new(centre, polygon[i], polygon[(i + 1) % polygon.len()]))
        .collect()
}
