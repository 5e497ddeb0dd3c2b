//! Macro terrain tier: coarse lake / plains / mountain regions.
//!
//! The macro tier is the outermost classification layer. Each blue-noise
//! sample reads the height channel once and becomes a Voronoi region tagged
//! with one of the three macro classes; the biome tier nests inside it.

use serde::{Deserialize, Serialize};

use crate::blend::Tier;
use crate::config::GeneratorConfig;
use crate::geometry::Point;
use crate::noise_field::NoiseField;
use crate::partition;

/// Height sample above which a region becomes mountain.
const MOUNTAIN_MIN_HEIGHT: f32 = 0.75;

/// Height sample below which a region becomes lake.
const LAKE_MAX_HEIGHT: f32 = 0.3;

/// Coarse terrain classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MacroClass {
    Lake,
    Plains,
    Mountain,
}

impl MacroClass {
    pub fn all() -> &'static [Self] {
        &[Self::Lake, Self::Plains, Self::Mountain]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MacroClass::Lake => "Lake",
            MacroClass::Plains => "Plains",
            MacroClass::Mountain => "Mountain",
        }
    }

    /// Static attribute record for this class.
    pub fn descriptor(&self) -> MacroDescriptor {
        match self {
            MacroClass::Lake => MacroDescriptor {
                class: MacroClass::Lake,
                base_height: 0.00,
                relief: 0.002,
            },
            MacroClass::Plains => MacroDescriptor {
                class: MacroClass::Plains,
                base_height: 0.03,
                relief: 0.005,
            },
            MacroClass::Mountain => MacroDescriptor {
                class: MacroClass::Mountain,
                base_height: 0.10,
                relief: 0.020,
            },
        }
    }
}

impl std::fmt::Display for MacroClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Height contribution of a macro class, combined by terrain-building
/// consumers as `base_height + raw_noise * relief`. The generator itself
/// never rasterizes heights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MacroDescriptor {
    pub class: MacroClass,
    pub base_height: f32,
    pub relief: f32,
}

/// Classify a height sample remapped to [0, 1].
pub fn classify_height(height: f32) -> MacroClass {
    if height > MOUNTAIN_MIN_HEIGHT {
        MacroClass::Mountain
    } else if height < LAKE_MAX_HEIGHT {
        MacroClass::Lake
    } else {
        MacroClass::Plains
    }
}

/// Build the macro tier from its blue-noise point set.
pub fn build_macro_tier(
    points: &[Point],
    noise: &NoiseField,
    config: &GeneratorConfig,
) -> Tier<MacroClass> {
    let cells = partition::build_cells(points, config.half_size);
    let classes: Vec<MacroClass> = cells
        .iter()
        .map(|cell| {
            let height = noise.sample(config.height_channel, cell.centre.x, cell.centre.y);
            classify_height(height)
        })
        .collect();
    Tier::from_cells(cells, classes, config.macro_blend_distance)
}
