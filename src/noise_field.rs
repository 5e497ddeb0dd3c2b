//! Seeded coherent-noise sampling for height, temperature and rainfall.
//!
//! One noise source serves every tier; channels differ only in their
//! scale/offset parameters, so height, temperature and rainfall read
//! decorrelated slices of the same field.

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Scale/offset parameters for one sampled quantity.
///
/// A sample at world position (x, y) reads the noise field at
/// `(x / scale + offset, y / scale + offset)`; larger scales give broader
/// features, and the offset keeps channels out of each other's territory.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseChannel {
    pub scale: f32,
    pub offset: f32,
}

impl NoiseChannel {
    pub fn new(scale: f32, offset: f32) -> Self {
        NoiseChannel { scale, offset }
    }
}

/// Deterministic 2D noise field.
#[derive(Clone, Debug)]
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        NoiseField {
            perlin: Perlin::new(seed),
        }
    }

    /// Raw noise value in [-1, 1] at field coordinates (u, v).
    pub fn raw(&self, u: f32, v: f32) -> f32 {
        self.perlin.get([u as f64, v as f64]) as f32
    }

    /// Channel sample at world position (x, y), remapped to [0, 1].
    pub fn sample(&self, channel: NoiseChannel, x: f32, y: f32) -> f32 {
        let u = x / channel.scale + channel.offset;
        let v = y / channel.scale + channel.offset;
        self.raw(u, v) / 2.0 + 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stays_in_unit_range() {
        let field = NoiseField::new(7);
        let channel = NoiseChannel::new(512.0, 53.0);
        for i in 0..100 {
            let x = i as f32 * 37.3 - 1800.0;
            let y = i as f32 * 91.7 - 1800.0;
            let s = field.sample(channel, x, y);
            assert!((0.0..=1.0).contains(&s), "sample {} out of range", s);
        }
    }

    #[test]
    fn test_same_seed_same_samples() {
        let a = NoiseField::new(1234);
        let b = NoiseField::new(1234);
        let channel = NoiseChannel::new(1024.0, -258.0);
        assert_eq!(a.sample(channel, 101.5, -77.25), b.sample(channel, 101.5, -77.25));
    }

    #[test]
    fn test_channels_decorrelate() {
        let field = NoiseField::new(5);
        let height = NoiseChannel::new(1024.0, 53.0);
        let rain = NoiseChannel::new(512.0, 654.0);
        // same world position, different channels, different values
        assert_ne!(field.sample(height, 333.4, 210.9), field.sample(rain, 333.4, 210.9));
    }
}
