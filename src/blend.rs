//! Classified region tiers and proportional blending across their borders.
//!
//! Both the macro terrain tier and the biome tier are a [`Tier`]: a set of
//! classified Voronoi regions sharing one blend distance. The blend query
//! walks every region whose bounds come near the query point and scores each
//! fan triangle with a cosine ease over the signed distance to its nearest
//! edge, yielding smooth transitions in a halo band around region borders
//! and a hard single-region answer everywhere else.

use std::f32::consts::PI;

use crate::geometry::{Bounds, Point, Triangle};
use crate::partition::SiteCell;

/// One classified Voronoi region of a tier.
///
/// Polygon, fan and neighbour list are immutable after generation; regions
/// carry no back-references (roads attach through the road network's
/// per-region index arena instead).
#[derive(Clone, Debug)]
pub struct Region<C> {
    pub centre: Point,
    pub polygon: Vec<Point>,
    pub bounds: Bounds,
    pub fan: Vec<Triangle>,
    pub class: C,
    /// Indices of Voronoi-adjacent regions within the same tier.
    pub neighbours: Vec<usize>,
}

/// A full tier of regions sharing one blend distance.
#[derive(Clone, Debug)]
pub struct Tier<C> {
    pub regions: Vec<Region<C>>,
    pub blend_distance: f32,
}

/// Result of a blend query against one tier.
///
/// `Exact` is the deep-interior short circuit: the query point sits inside a
/// triangle and further than the blend distance from all of its edges, so no
/// other region can contribute. Any candidates accumulated from regions
/// scanned earlier are discarded, not merged; the two variants keep that
/// behaviour explicit.
#[derive(Clone, Debug, PartialEq)]
pub enum BlendResult {
    /// Single region at proportion 1.
    Exact(usize),
    /// Normalized (region, proportion) candidates; empty means the point is
    /// outside the tier's domain.
    Blended(Vec<(usize, f32)>),
}

impl BlendResult {
    /// Normalized (region, weight) pairs; `Exact` becomes one entry at 1.0.
    pub fn weights(&self) -> Vec<(usize, f32)> {
        match self {
            BlendResult::Exact(region) => vec![(*region, 1.0)],
            BlendResult::Blended(list) => list.clone(),
        }
    }

    /// True when the query fell outside the tier's domain.
    pub fn is_empty(&self) -> bool {
        match self {
            BlendResult::Exact(_) => false,
            BlendResult::Blended(list) => list.is_empty(),
        }
    }

    /// The region with the largest proportion, if any.
    pub fn dominant(&self) -> Option<usize> {
        match self {
            BlendResult::Exact(region) => Some(*region),
            BlendResult::Blended(list) => list
                .iter()
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(region, _)| *region),
        }
    }
}

impl<C> Tier<C> {
    /// Assemble a tier from partition cells and their classifications.
    /// `cells` and `classes` are index-aligned.
    pub fn from_cells(cells: Vec<SiteCell>, classes: Vec<C>, blend_distance: f32) -> Self {
        debug_assert_eq!(cells.len(), classes.len());
        let regions = cells
            .into_iter()
            .zip(classes)
            .map(|(cell, class)| Region {
                centre: cell.centre,
                polygon: cell.polygon,
                bounds: cell.bounds,
                fan: cell.fan,
                class,
                neighbours: cell.neighbours,
            })
            .collect();
        Tier {
            regions,
            blend_distance,
        }
    }

    /// Proportional blend of regions around `point`.
    ///
    /// Every region whose bounds overlap a `2d x 2d` box around the point is
    /// scanned triangle by triangle. A triangle within the blend distance
    /// contributes `cos(pi * p) / 2 + 0.5` where `p` is the normalized signed
    /// edge distance: 1.0 at the triangle's interior centreline, 0.0 at the
    /// outer rim of the halo. A deep-interior hit returns immediately.
    pub fn blend_at(&self, point: Point) -> BlendResult {
        let d = self.blend_distance;
        let query = Bounds::around(point, d);
        let mut candidates: Vec<(usize, f32)> = Vec::new();

        for (index, region) in self.regions.iter().enumerate() {
            if !region.bounds.overlaps(&query) {
                continue;
            }
            for triangle in &region.fan {
                let within = triangle.contains(point);
                let edge_dist = triangle.dist_to_closest_edge(point);

                if edge_dist <= d {
                    let signed = if within { -edge_dist } else { edge_dist };
                    let p = signed / d / 2.0 + 0.5;
                    let proportion = (p * PI).cos() / 2.0 + 0.5;
                    candidates.push((index, proportion));
                } else if within {
                    return BlendResult::Exact(index);
                }
            }
        }

        let sum: f32 = candidates.iter().map(|(_, w)| w).sum();
        if sum > 0.0 {
            for candidate in &mut candidates {
                candidate.1 /= sum;
            }
        }

        BlendResult::Blended(candidates)
    }

    /// Containing-region lookup: the first region whose fan contains the
    /// point, in region scan order. The inclusive triangle test means a
    /// point exactly on a cell edge resolves to the lower-indexed adjacent
    /// region, consistently across calls.
    pub fn region_at(&self, point: Point) -> Option<usize> {
        for (index, region) in self.regions.iter().enumerate() {
            if !region.bounds.contains(point) {
                continue;
            }
            if region.fan.iter().any(|t| t.contains(point)) {
                return Some(index);
            }
        }
        None
    }

    /// Region whose centre is nearest to `point`.
    pub fn nearest_region(&self, point: Point) -> Option<usize> {
        (0..self.regions.len()).min_by(|&a, &b| {
            self.regions[a]
                .centre
                .distance_squared(&point)
                .total_cmp(&self.regions[b].centre.distance_squared(&point))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::build_cells;

    /// Tier over a 3x3 grid of sites with unit classifications.
    fn square_tier(blend_distance: f32) -> Tier<u8> {
        let mut points = Vec::new();
        for i in -1..=1 {
            for j in -1..=1 {
                points.push(Point::new(i as f32 * 40.0, j as f32 * 40.0));
            }
        }
        let cells = build_cells(&points, 60.0);
        let classes = (0..cells.len() as u8).collect();
        Tier::from_cells(cells, classes, blend_distance)
    }

    #[test]
    fn test_deep_interior_is_exact() {
        let tier = square_tier(4.0);
        // mid-band of one fan triangle of the origin cell: more than the
        // blend distance from the cell border and from both fan spokes
        let result = tier.blend_at(Point::new(0.0, 13.0));
        match result {
            BlendResult::Exact(region) => {
                assert_eq!(tier.regions[region].centre, Point::new(0.0, 0.0));
            }
            other => panic!("expected exact result, got {:?}", other),
        }
        assert_eq!(tier.blend_at(Point::new(0.0, 13.0)).weights(), vec![(4, 1.0)]);
    }

    #[test]
    fn test_border_blend_is_normalized() {
        let tier = square_tier(15.0);
        // halfway between the origin site and its right neighbour
        let result = tier.blend_at(Point::new(20.0, 3.0));
        let weights = result.weights();
        assert!(weights.len() > 1, "expected a multi-region blend");
        let sum: f32 = weights.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-4, "weights sum to {}", sum);
    }

    #[test]
    fn test_out_of_domain_is_empty() {
        let tier = square_tier(10.0);
        let result = tier.blend_at(Point::new(500.0, 500.0));
        assert!(result.is_empty());
        assert_eq!(result.dominant(), None);
    }

    #[test]
    fn test_dominant_matches_containing_region() {
        let tier = square_tier(15.0);
        // clearly inside the origin cell, slightly off-centre
        let point = Point::new(6.0, -4.0);
        let containing = tier.region_at(point).unwrap();
        assert_eq!(tier.blend_at(point).dominant(), Some(containing));
    }

    #[test]
    fn test_region_at_covers_the_domain() {
        let tier = square_tier(10.0);
        for i in 0..20 {
            for j in 0..20 {
                let p = Point::new(-55.0 + i as f32 * 5.5, -55.0 + j as f32 * 5.5);
                assert!(
                    tier.region_at(p).is_some(),
                    "no containing region for {}",
                    p
                );
            }
        }
    }

    #[test]
    fn test_region_at_is_stable_on_cell_edges() {
        let tier = square_tier(10.0);
        // exactly on the Voronoi border between two sites
        let edge_point = Point::new(20.0, 0.0);
        let first = tier.region_at(edge_point);
        assert!(first.is_some());
        for _ in 0..10 {
            assert_eq!(tier.region_at(edge_point), first);
        }
    }
}
