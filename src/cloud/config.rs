use std::time::Duration;

use bevy::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

pub const DEFAULT_POINT_COUNT: usize = 64;
pub const DEFAULT_SPREAD_MULTIPLIER: f32 = 2.0;
pub const DEFAULT_EDGE_DELAY: Duration = Duration::from_millis(16);

/// Candidate edges grow quadratically, so the cloud is capped.
pub const MAX_POINTS: usize = 4096;
/// Keeps `2 * spread_bound` and the camera range finite.
pub const MAX_SPREAD: f32 = 1.0e6;

const MIN_CAMERA_DISTANCE: f32 = 10.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("spread bound must be within [0, {max}], got {0}", max = MAX_SPREAD)]
    InvalidSpread(f32),
    #[error("point count {0} exceeds the maximum of {max}", max = MAX_POINTS)]
    TooManyPoints(usize),
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CloudConfig {
    pub point_count: usize,
    /// Every coordinate lies in `[-spread_bound, spread_bound]`.
    pub spread_bound: f32,
    pub edge_delay: Duration,
    pub seed: Option<u64>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            spread_bound: default_spread(DEFAULT_POINT_COUNT),
            edge_delay: DEFAULT_EDGE_DELAY,
            seed: None,
        }
    }
}

impl CloudConfig {
    /// A missing `spread_bound` falls back to `point_count * 2`.
    pub fn new(
        point_count: usize,
        spread_bound: Option<f32>,
        edge_delay: Duration,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if point_count > MAX_POINTS {
            return Err(ConfigError::TooManyPoints(point_count));
        }
        let spread_bound = spread_bound.unwrap_or_else(|| default_spread(point_count));
        if !(0.0..=MAX_SPREAD).contains(&spread_bound) {
            return Err(ConfigError::InvalidSpread(spread_bound));
        }

        Ok(Self {
            point_count,
            spread_bound,
            edge_delay,
            seed,
        })
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn camera_distance(&self) -> f32 {
        (self.spread_bound * 2.0).max(MIN_CAMERA_DISTANCE)
    }
}

fn default_spread(point_count: usize) -> f32 {
    point_count as f32 * DEFAULT_SPREAD_MULTIPLIER
}
