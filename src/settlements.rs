//! Settlement placement over the sparsest sample tier.
//!
//! Settlements are blue-noise samples resolved against the biome tier.
//! Their own Voronoi partition supplies the adjacency used by the road
//! planner, filtered by distance because clipping against the domain
//! boundary produces spuriously long adjacency edges between far-apart
//! border cells.

use crate::biomes::Biome;
use crate::blend::Tier;
use crate::config::GeneratorConfig;
use crate::geometry::Point;
use crate::partition;

/// One placed settlement.
///
/// `region`, `neighbours` and `roads` are arena indices (biome tier,
/// settlement list and road network respectively).
#[derive(Clone, Debug)]
pub struct Settlement {
    pub centre: Point,
    /// Owning biome region.
    pub region: usize,
    /// Neighbouring settlements within twice the settlement separation.
    pub neighbours: Vec<usize>,
    /// Roads touching this settlement; empty until the road pass runs.
    pub roads: Vec<usize>,
}

/// Place settlements on the given point set and resolve each against the
/// biome tier. An empty biome tier yields no settlements, since nothing
/// downstream could anchor to them.
pub fn build_settlements(
    points: &[Point],
    biome_tier: &Tier<Biome>,
    config: &GeneratorConfig,
) -> Vec<Settlement> {
    if biome_tier.regions.is_empty() {
        return Vec::new();
    }

    let cells = partition::build_cells(points, config.half_size);
    let max_neighbour_dist = config.settlement_separation * 2.0;

    points
        .iter()
        .enumerate()
        .map(|(index, &centre)| {
            // containment is the blend query's deep-interior fast path;
            // the nearest-centre fallback only fires for points the
            // tessellation misses by floating error at the domain rim
            let region = biome_tier
                .region_at(centre)
                .or_else(|| biome_tier.nearest_region(centre))
                .expect("non-empty biome tier always has a nearest region");

            let neighbours = match cells.get(index) {
                Some(cell) => cell
                    .neighbours
                    .iter()
                    .copied()
                    .filter(|&n| points[n].distance(&centre) <= max_neighbour_dist)
                    .collect(),
                None => Vec::new(),
            };

            Settlement {
                centre,
                region,
                neighbours,
                roads: Vec::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::Tier;
    use crate::partition::build_cells;

    fn biome_tier() -> Tier<Biome> {
        let mut points = Vec::new();
        for i in -2..=2 {
            for j in -2..=2 {
                points.push(Point::new(i as f32 * 40.0, j as f32 * 40.0));
            }
        }
        let cells = build_cells(&points, 100.0);
        let classes = vec![Biome::Grassland; cells.len()];
        Tier::from_cells(cells, classes, 10.0)
    }

    fn test_config() -> GeneratorConfig {
        GeneratorConfig {
            half_size: 100.0,
            settlement_separation: 50.0,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_settlements_resolve_owning_region() {
        let tier = biome_tier();
        let points = vec![
            Point::new(1.0, 2.0),
            Point::new(-75.0, 38.0),
            Point::new(60.0, -60.0),
        ];
        let settlements = build_settlements(&points, &tier, &test_config());

        assert_eq!(settlements.len(), 3);
        for settlement in &settlements {
            let region = &tier.regions[settlement.region];
            // the owning region actually contains the settlement
            assert!(region.fan.iter().any(|t| t.contains(settlement.centre)));
        }
    }

    #[test]
    fn test_neighbours_filtered_by_distance() {
        let tier = biome_tier();
        // a tight pair plus one far-away outlier sharing a clipped border
        let points = vec![
            Point::new(-80.0, -80.0),
            Point::new(-30.0, -80.0),
            Point::new(80.0, 80.0),
        ];
        let settlements = build_settlements(&points, &tier, &test_config());

        assert!(settlements[0].neighbours.contains(&1));
        assert!(settlements[1].neighbours.contains(&0));
        // the outlier is Voronoi-adjacent to both but beyond the cutoff
        assert!(!settlements[0].neighbours.contains(&2));
        assert!(settlements[2].neighbours.is_empty());
    }

    #[test]
    fn test_too_few_settlements_have_no_neighbours() {
        let tier = biome_tier();
        let points = vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)];
        let settlements = build_settlements(&points, &tier, &test_config());
        assert_eq!(settlements.len(), 2);
        assert!(settlements.iter().all(|s| s.neighbours.is_empty()));
    }

    #[test]
    fn test_empty_biome_tier_yields_no_settlements() {
        let tier = Tier::<Biome> {
            regions: Vec::new(),
            blend_distance: 10.0,
        };
        let points = vec![Point::new(0.0, 0.0)];
        assert!(build_settlements(&points, &tier, &test_config()).is_empty());
    }
}
