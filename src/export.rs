//! JSON snapshot export of a generated world.
//!
//! The snapshot is the machine-readable contract with external
//! terrain-building tools: region polygons and classes, settlements and
//! road polylines, but no rasterized data of any kind. It also doubles as
//! the canonical byte representation for determinism checks.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::biomes::Biome;
use crate::blend::{Region, Tier};
use crate::geometry::Point;
use crate::macro_terrain::MacroClass;
use crate::world::GeneratedWorld;

/// Serializable view of one region.
#[derive(Serialize)]
pub struct RegionSnapshot<C> {
    pub class: C,
    pub centre: Point,
    pub polygon: Vec<Point>,
    pub neighbours: Vec<usize>,
}

/// Serializable view of one settlement.
#[derive(Serialize)]
pub struct SettlementSnapshot {
    pub centre: Point,
    pub region: usize,
    pub neighbours: Vec<usize>,
    pub roads: Vec<usize>,
}

/// Serializable view of one road.
#[derive(Serialize)]
pub struct RoadSnapshot {
    pub a: usize,
    pub b: usize,
    pub points: Vec<Point>,
}

/// Complete world snapshot.
#[derive(Serialize)]
pub struct WorldSnapshot {
    pub seed: u64,
    pub half_size: f32,
    pub macro_regions: Vec<RegionSnapshot<MacroClass>>,
    pub biome_regions: Vec<RegionSnapshot<Biome>>,
    pub settlements: Vec<SettlementSnapshot>,
    pub roads: Vec<RoadSnapshot>,
}

/// Build the serializable snapshot of a generated world.
pub fn snapshot(world: &GeneratedWorld) -> WorldSnapshot {
    WorldSnapshot {
        seed: world.seeds.master,
        half_size: world.config.half_size,
        macro_regions: tier_snapshot(&world.macro_tier),
        biome_regions: tier_snapshot(&world.biome_tier),
        settlements: world
            .settlements
            .iter()
            .map(|s| SettlementSnapshot {
                centre: s.centre,
                region: s.region,
                neighbours: s.neighbours.clone(),
                roads: s.roads.clone(),
            })
            .collect(),
        roads: world
            .roads
            .roads
            .iter()
            .map(|r| RoadSnapshot {
                a: r.a,
                b: r.b,
                points: r.points.clone(),
            })
            .collect(),
    }
}

fn tier_snapshot<C: Copy + Serialize>(tier: &Tier<C>) -> Vec<RegionSnapshot<C>> {
    tier.regions.iter().map(region_snapshot).collect()
}

fn region_snapshot<C: Copy>(region: &Region<C>) -> RegionSnapshot<C> {
    RegionSnapshot {
        class: region.class,
        centre: region.centre,
        polygon: region.polygon.clone(),
        neighbours: region.neighbours.clone(),
    }
}

/// Write the snapshot as pretty-printed JSON.
pub fn save_snapshot(world: &GeneratedWorld, path: &Path) -> io::Result<()> {
    let snapshot = snapshot(world);
    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("serialization failed: {}", e)))?;
    fs::write(path, json)
}
