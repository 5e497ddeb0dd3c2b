//! Road planning over the biome adjacency graph.
//!
//! Roads connect neighbouring settlements by walking region to region
//! toward the target, always stepping to the adjacent biome region nearest
//! the target centre. The walk is a local greedy heuristic, not a shortest
//! path search, and generated output depends on keeping it that way. A road
//! that already reaches the current region is joined instead of duplicated,
//! and each unordered settlement pair owns at most one road.

use std::collections::HashMap;

use serde::Serialize;

use crate::biomes::Biome;
use crate::blend::Tier;
use crate::geometry::Point;
use crate::settlements::Settlement;

/// A road between two settlements with its waypoint polyline.
/// Waypoints are biome region centres, except for a trailing raw target
/// coordinate appended when the walk runs out of hops.
#[derive(Clone, Debug, Serialize)]
pub struct Road {
    /// Endpoint settlement indices.
    pub a: usize,
    pub b: usize,
    pub points: Vec<Point>,
}

/// How a road walk terminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WalkOutcome {
    /// Spliced onto an existing road reaching the current region.
    EarlyFinish,
    /// Stepped onto the target region.
    ReachedTarget,
    /// Hop budget exhausted; jumped straight to the target coordinate.
    ForcedFinish,
}

/// All roads plus the per-region attachment arena.
#[derive(Clone, Debug, Default)]
pub struct RoadNetwork {
    pub roads: Vec<Road>,
    /// Road indices attached to each biome region, index-aligned with the
    /// biome tier's region list.
    region_roads: Vec<Vec<usize>>,
    /// Unordered settlement pair -> road index.
    by_pair: HashMap<(usize, usize), usize>,
}

impl RoadNetwork {
    /// The road between two settlements, in either order.
    pub fn road_between(&self, a: usize, b: usize) -> Option<usize> {
        self.by_pair.get(&pair_key(a, b)).copied()
    }

    /// Roads registered against a biome region.
    pub fn roads_through(&self, region: usize) -> &[usize] {
        self.region_roads
            .get(region)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Build the road network for every (settlement, neighbour) pair.
///
/// This pass is inherently sequential: it mutates the shared per-region
/// road lists, and reuse is first-writer-wins.
pub fn build_road_network(
    settlements: &mut [Settlement],
    biome_tier: &Tier<Biome>,
    hop_limit: usize,
) -> RoadNetwork {
    let mut network = RoadNetwork {
        roads: Vec::new(),
        region_roads: vec![Vec::new(); biome_tier.regions.len()],
        by_pair: HashMap::new(),
    };

    for settlement in 0..settlements.len() {
        for n in 0..settlements[settlement].neighbours.len() {
            let neighbour = settlements[settlement].neighbours[n];

            // reuse the road laid when this pair was visited from the
            // other side
            if let Some(existing) = network.road_between(settlement, neighbour) {
                if !settlements[settlement].roads.contains(&existing) {
                    settlements[settlement].roads.push(existing);
                }
                continue;
            }

            let start = settlements[settlement].region;
            let target = settlements[neighbour].region;
            let (points, traversed, outcome) =
                walk(start, target, biome_tier, &network, hop_limit);

            let road = network.roads.len();
            network.roads.push(Road {
                a: settlement,
                b: neighbour,
                points,
            });
            network.by_pair.insert(pair_key(settlement, neighbour), road);

            // register against interior regions: never the start region,
            // and not the final region either when the walk reached the
            // target's own region
            let interior = match outcome {
                WalkOutcome::ReachedTarget => &traversed[1..traversed.len() - 1],
                WalkOutcome::EarlyFinish | WalkOutcome::ForcedFinish => &traversed[1..],
            };
            for &region in interior {
                network.region_roads[region].push(road);
            }

            settlements[settlement].roads.push(road);
            settlements[neighbour].roads.push(road);
        }
    }

    network
}

/// Greedy walk from `start` to `target` over region adjacency.
///
/// Returns the waypoint polyline, the traversed region indices (one per
/// region-centre waypoint, in order) and the terminal outcome.
fn walk(
    start: usize,
    target: usize,
    tier: &Tier<Biome>,
    network: &RoadNetwork,
    hop_limit: usize,
) -> (Vec<Point>, Vec<usize>, WalkOutcome) {
    let regions = &tier.regions;
    let target_centre = regions[target].centre;

    let mut points = vec![regions[start].centre];
    let mut traversed = vec![start];
    let mut current = start;

    for _ in 0..hop_limit {
        // splice onto an existing road that already ends at the current
        // region: step to the neighbour carrying it and stop there
        let junction = regions[current].neighbours.iter().copied().find(|&n| {
            network
                .roads_through(n)
                .iter()
                .any(|&road| road_ends_at(&network.roads[road], regions[current].centre))
        });
        if let Some(junction) = junction {
            points.push(regions[junction].centre);
            traversed.push(junction);
            return (points, traversed, WalkOutcome::EarlyFinish);
        }

        // greedy step: the neighbour nearest the target centre
        let next = regions[current]
            .neighbours
            .iter()
            .copied()
            .min_by(|&l, &r| {
                regions[l]
                    .centre
                    .distance_squared(&target_centre)
                    .total_cmp(&regions[r].centre.distance_squared(&target_centre))
            });
        let next = match next {
            Some(next) => next,
            None => break, // isolated region, nowhere to go
        };

        points.push(regions[next].centre);
        traversed.push(next);
        current = next;

        if current == target {
            return (points, traversed, WalkOutcome::ReachedTarget);
        }
    }

    // hop budget exhausted (or no adjacency at all): degrade to a straight
    // final segment onto the target coordinate
    points.push(target_centre);
    (points, traversed, WalkOutcome::ForcedFinish)
}

/// True when the road's polyline terminates at the given region centre,
/// in either direction. Waypoints are exact copies of region centres, so
/// float equality is sound here.
fn road_ends_at(road: &Road, centre: Point) -> bool {
    road.points.first() == Some(&centre) || road.points.last() == Some(&centre)
}
