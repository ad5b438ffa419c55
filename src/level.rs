//! Level (wave) definitions
//!
//! A level is the starting layout of one wave: where the ship spawns and which
//! asteroids exist. Levels arrive as JSON from a loader or are generated from a
//! seed. Malformed data is rejected here, before any entity is built from it.

use std::path::Path;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::facing_from_degrees;
use crate::tuning::Tuning;

/// Errors surfaced to whoever supplies level data
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed level data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("non-finite {what} in {}", location(.index))]
    NonFinite {
        what: &'static str,
        /// Asteroid index, or `None` for the ship
        index: Option<usize>,
    },
}

fn location(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!("asteroid {i}"),
        None => "ship".to_string(),
    }
}

/// Asteroid size category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    /// Size of the fragments this asteroid breaks into (None for small)
    pub fn fragment_size(self) -> Option<Self> {
        match self {
            AsteroidSize::Small => None,
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Large => Some(AsteroidSize::Medium),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AsteroidSize::Small => "small",
            AsteroidSize::Medium => "medium",
            AsteroidSize::Large => "large",
        }
    }
}

/// Ship spawn point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipData {
    pub position: Vec2,
    /// Heading in degrees
    pub angle: f32,
}

/// One starting asteroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidData {
    pub size: AsteroidSize,
    pub position: Vec2,
    /// Travel direction; any length, zero means stationary
    pub direction: Vec2,
}

/// Starting layout of a wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub ship: ShipData,
    pub asteroids: Vec<AsteroidData>,
}

impl LevelData {
    /// Parse and validate level JSON
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: LevelData = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Read a level file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject NaN/infinite coordinates
    pub fn validate(&self) -> Result<(), LevelError> {
        if !self.ship.position.is_finite() {
            return Err(LevelError::NonFinite { what: "position", index: None });
        }
        if !self.ship.angle.is_finite() {
            return Err(LevelError::NonFinite { what: "angle", index: None });
        }
        for (i, asteroid) in self.asteroids.iter().enumerate() {
            if !asteroid.position.is_finite() {
                return Err(LevelError::NonFinite { what: "position", index: Some(i) });
            }
            if !asteroid.direction.is_finite() {
                return Err(LevelError::NonFinite { what: "direction", index: Some(i) });
            }
        }
        Ok(())
    }

    /// Generate a level from a seed: ship at the center facing up, `count`
    /// large asteroids scattered away from it with random headings.
    pub fn generate(seed: u64, count: usize, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let center = Vec2::new(tuning.width / 2.0, tuning.height / 2.0);
        // Keep a clear ring around the spawn point
        let safe_radius = (tuning.large.radius + tuning.ship_radius) * 2.0;

        let mut asteroids = Vec::with_capacity(count);
        for _ in 0..count {
            let mut position = center;
            for _ in 0..64 {
                position = Vec2::new(
                    rng.random_range(0.0..tuning.width),
                    rng.random_range(0.0..tuning.height),
                );
                if position.distance(center) > safe_radius {
                    break;
                }
            }
            let heading = rng.random_range(0.0..360.0f32);
            asteroids.push(AsteroidData {
                size: AsteroidSize::Large,
                position,
                direction: facing_from_degrees(heading),
            });
        }

        log::debug!("Generated level from seed {}: {} asteroids", seed, count);

        Self {
            ship: ShipData {
                position: center,
                angle: 90.0,
            },
            asteroids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "ship": { "position": [400, 350], "angle": 90 },
        "asteroids": [
            { "size": "large", "position": [100, 100], "direction": [1, 0] },
            { "size": "small", "position": [600, 500], "direction": [0, 0] }
        ]
    }"#;

    #[test]
    fn test_parse_sample_level() {
        let level = LevelData::from_json(SAMPLE).unwrap();
        assert_eq!(level.ship.position, Vec2::new(400.0, 350.0));
        assert_eq!(level.ship.angle, 90.0);
        assert_eq!(level.asteroids.len(), 2);
        assert_eq!(level.asteroids[0].size, AsteroidSize::Large);
        assert_eq!(level.asteroids[1].direction, Vec2::ZERO);
    }

    #[test]
    fn test_unknown_size_is_rejected() {
        let json = r#"{
            "ship": { "position": [0, 0], "angle": 0 },
            "asteroids": [{ "size": "huge", "position": [0, 0], "direction": [1, 0] }]
        }"#;
        assert!(matches!(LevelData::from_json(json), Err(LevelError::Parse(_))));
    }

    #[test]
    fn test_missing_ship_is_rejected() {
        let json = r#"{ "asteroids": [] }"#;
        assert!(matches!(LevelData::from_json(json), Err(LevelError::Parse(_))));
    }

    #[test]
    fn test_non_finite_asteroid_is_rejected() {
        let mut level = LevelData::from_json(SAMPLE).unwrap();
        level.asteroids[1].direction = Vec2::new(f32::NAN, 0.0);
        let err = level.validate().unwrap_err();
        assert!(matches!(
            err,
            LevelError::NonFinite { what: "direction", index: Some(1) }
        ));
        assert_eq!(err.to_string(), "non-finite direction in asteroid 1");
    }

    #[test]
    fn test_generate_is_deterministic() {
        let tuning = Tuning::default();
        let a = LevelData::generate(42, 5, &tuning);
        let b = LevelData::generate(42, 5, &tuning);
        assert_eq!(a, b);

        let c = LevelData::generate(43, 5, &tuning);
        assert_ne!(a, c);
    }

    #[test]
    fn test_generate_keeps_spawn_clear() {
        let tuning = Tuning::default();
        let level = LevelData::generate(7, 8, &tuning);
        let safe = (tuning.large.radius + tuning.ship_radius) * 2.0;
        assert_eq!(level.asteroids.len(), 8);
        for asteroid in &level.asteroids {
            assert!(asteroid.position.distance(level.ship.position) > safe);
            assert!((asteroid.direction.length() - 1.0).abs() < 1e-4);
        }
        assert!(level.validate().is_ok());
    }

    #[test]
    fn test_fragment_sizes() {
        assert_eq!(AsteroidSize::Large.fragment_size(), Some(AsteroidSize::Medium));
        assert_eq!(AsteroidSize::Medium.fragment_size(), Some(AsteroidSize::Small));
        assert_eq!(AsteroidSize::Small.fragment_size(), None);
    }
}
