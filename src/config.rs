//! Generation-time configuration.
//!
//! All parameters have reference defaults; a fixed configuration plus a
//! fixed master seed reproduces a world byte for byte.

use serde::{Deserialize, Serialize};

use crate::noise_field::NoiseChannel;

/// Full parameter set for one generation pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Domain half-size: the world covers `[-half_size, half_size]^2`.
    pub half_size: f32,

    /// Minimum separation of macro tier samples.
    pub macro_separation: f32,
    /// Minimum separation of biome tier samples.
    pub biome_separation: f32,
    /// Minimum separation of settlement samples.
    pub settlement_separation: f32,

    /// Width of the blend halo around macro region borders.
    pub macro_blend_distance: f32,
    /// Width of the blend halo around biome region borders.
    pub biome_blend_distance: f32,

    /// Height noise parameters (macro classification).
    pub height_channel: NoiseChannel,
    /// Temperature noise parameters (biome classification).
    pub temperature_channel: NoiseChannel,
    /// Rainfall noise parameters (biome classification).
    pub rainfall_channel: NoiseChannel,

    /// Candidate offspring attempted per active Poisson point.
    pub poisson_candidates: usize,
    /// Safety bound on the greedy road walk.
    pub road_hop_limit: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            half_size: 2048.0,
            macro_separation: 300.0,
            biome_separation: 100.0,
            settlement_separation: 800.0,
            macro_blend_distance: 300.0,
            biome_blend_distance: 50.0,
            height_channel: NoiseChannel::new(1024.0, 53.0),
            temperature_channel: NoiseChannel::new(512.0, -258.0),
            rainfall_channel: NoiseChannel::new(512.0, 654.0),
            poisson_candidates: 20,
            road_hop_limit: 100,
        }
    }
}

impl GeneratorConfig {
    /// A shrunken configuration for fast generation in tests and previews:
    /// same structure, much smaller domain and separations.
    pub fn preview() -> Self {
        GeneratorConfig {
            half_size: 400.0,
            macro_separation: 120.0,
            biome_separation: 45.0,
            settlement_separation: 150.0,
            macro_blend_distance: 120.0,
            biome_blend_distance: 20.0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reference_values() {
        let config = GeneratorConfig::default();
        assert_eq!(config.macro_separation, 300.0);
        assert_eq!(config.biome_separation, 100.0);
        assert_eq!(config.settlement_separation, 800.0);
        assert_eq!(config.macro_blend_distance, 300.0);
        assert_eq!(config.biome_blend_distance, 50.0);
        assert_eq!(config.height_channel, NoiseChannel::new(1024.0, 53.0));
        assert_eq!(config.temperature_channel, NoiseChannel::new(512.0, -258.0));
        assert_eq!(config.rainfall_channel, NoiseChannel::new(512.0, 654.0));
        assert_eq!(config.poisson_candidates, 20);
        assert_eq!(config.road_hop_limit, 100);
    }
}
