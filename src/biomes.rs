//! Biome tier: climate classes nested inside the macro terrain tier.
//!
//! Each biome sample first asks the macro tier which class dominates at its
//! location. Lake and mountain regions pass straight through; everything
//! else reads the temperature and rainfall channels and walks a fixed
//! decision tree. Classification is a pure function of immutable macro
//! state, so the per-sample work fans out across a rayon pool.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::blend::Tier;
use crate::config::GeneratorConfig;
use crate::geometry::Point;
use crate::macro_terrain::MacroClass;
use crate::noise_field::NoiseField;
use crate::partition;

// Decision-tree thresholds over [0, 1] temperature/rainfall samples.
// These are the reference constants; generated output is only compatible
// with consumers when they match exactly.
const TUNDRA_MAX_TEMP: f32 = 0.125;
const TEMPERATE_MAX_TEMP: f32 = 0.671875;
const TAIGA_MAX_TEMP: f32 = 0.296875;
const GRASSLAND_MAX_RAIN: f32 = 0.21875;
const WOODLANDS_MAX_RAIN: f32 = 0.421875;
const TEMPERATE_FOREST_MAX_RAIN: f32 = 0.703125;
const DESERT_MAX_RAIN: f32 = 0.3125;
const TROPICAL_FOREST_MAX_RAIN: f32 = 0.34375;

/// Biome classification: nine climate classes plus the lake and mountain
/// classes carried down from the macro tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Lake,
    Mountain,
    Tundra,
    Taiga,
    Grassland,
    Desert,
    Woodlands,
    TemperateForest,
    TropicalForest,
    TemperateRainForest,
    TropicalRainForest,
}

impl Biome {
    pub fn all() -> &'static [Self] {
        &[
            Self::Lake,
            Self::Mountain,
            Self::Tundra,
            Self::Taiga,
            Self::Grassland,
            Self::Desert,
            Self::Woodlands,
            Self::TemperateForest,
            Self::TropicalForest,
            Self::TemperateRainForest,
            Self::TropicalRainForest,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Biome::Lake => "Lake",
            Biome::Mountain => "Mountain",
            Biome::Tundra => "Tundra",
            Biome::Taiga => "Taiga",
            Biome::Grassland => "Grassland",
            Biome::Desert => "Desert",
            Biome::Woodlands => "Woodlands",
            Biome::TemperateForest => "Temperate Forest",
            Biome::TropicalForest => "Tropical Forest",
            Biome::TemperateRainForest => "Temperate Rain Forest",
            Biome::TropicalRainForest => "Tropical Rain Forest",
        }
    }

    /// Static attribute record for this biome.
    pub fn descriptor(&self) -> BiomeDescriptor {
        let (height, splat_index) = match self {
            Biome::Lake => (0.0, 7),
            Biome::Mountain => (0.0, 0),
            Biome::Tundra => (0.0, 5),
            Biome::Taiga => (0.0, 6),
            Biome::Grassland => (0.0, 1),
            Biome::Desert => (0.0, 7),
            Biome::Woodlands => (0.0, 1),
            Biome::TemperateForest => (0.0, 3),
            Biome::TropicalForest => (0.0, 4),
            Biome::TemperateRainForest => (0.0, 2),
            Biome::TropicalRainForest => (0.0, 4),
        };
        BiomeDescriptor {
            biome: *self,
            height,
            splat_index,
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Static per-biome attributes for terrain-building consumers: a flat
/// height contribution and the ground-texture layer the biome paints into.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeDescriptor {
    pub biome: Biome,
    pub height: f32,
    pub splat_index: u8,
}

/// Classify temperature and rainfall samples, both in [0, 1].
pub fn classify_climate(temp: f32, rain: f32) -> Biome {
    if temp < TUNDRA_MAX_TEMP {
        Biome::Tundra
    } else if temp < TEMPERATE_MAX_TEMP {
        if rain < GRASSLAND_MAX_RAIN {
            Biome::Grassland
        } else if rain < WOODLANDS_MAX_RAIN {
            Biome::Woodlands
        } else if temp < TAIGA_MAX_TEMP {
            Biome::Taiga
        } else if rain < TEMPERATE_FOREST_MAX_RAIN {
            Biome::TemperateForest
        } else {
            Biome::TemperateRainForest
        }
    } else if rain < DESERT_MAX_RAIN {
        Biome::Desert
    } else if rain < TROPICAL_FOREST_MAX_RAIN {
        Biome::TropicalForest
    } else {
        Biome::TropicalRainForest
    }
}

/// Build the biome tier from its blue-noise point set, nesting it inside
/// the already-built macro tier.
pub fn build_biome_tier(
    points: &[Point],
    noise: &NoiseField,
    macro_tier: &Tier<MacroClass>,
    config: &GeneratorConfig,
) -> Tier<Biome> {
    let cells = partition::build_cells(points, config.half_size);
    let classes: Vec<Biome> = cells
        .par_iter()
        .map(|cell| classify_sample(cell.centre, noise, macro_tier, config))
        .collect();
    Tier::from_cells(cells, classes, config.biome_blend_distance)
}

/// Classify one biome sample.
fn classify_sample(
    centre: Point,
    noise: &NoiseField,
    macro_tier: &Tier<MacroClass>,
    config: &GeneratorConfig,
) -> Biome {
    let dominant = macro_tier
        .blend_at(centre)
        .dominant()
        .map(|region| macro_tier.regions[region].class);

    match dominant {
        Some(MacroClass::Lake) => Biome::Lake,
        Some(MacroClass::Mountain) => Biome::Mountain,
        _ => {
            let temp = noise.sample(config.temperature_channel, centre.x, centre.y);
            let rain = noise.sample(config.rainfall_channel, centre.x, centre.y);
            classify_climate(temp, rain)
        }
    }
}
