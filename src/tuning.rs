//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads goes through [`Tuning`]. The
//! defaults mirror [`crate::consts`]; a JSON file may override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::level::AsteroidSize;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Per-size asteroid balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidStats {
    pub radius: f32,
    pub speed: f32,
    /// Score awarded when an asteroid of this size is broken
    pub points: u64,
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub width: f32,
    pub height: f32,
    pub dead_zone: f32,
    pub large_extra_margin: f32,

    pub ship_radius: f32,
    pub ship_impulse: f32,
    pub ship_max_speed: f32,
    pub ship_turn_rate: f32,
    pub ship_lives: u8,

    pub bullet_radius: f32,
    pub bullet_speed: f32,
    pub bullet_rate: u32,
    /// Also despawn bullets that leave through the left/bottom edges.
    /// Off by default: only the right/top bounds are checked.
    pub symmetric_bullet_bounds: bool,

    pub small: AsteroidStats,
    pub medium: AsteroidStats,
    pub large: AsteroidStats,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
            dead_zone: DEAD_ZONE,
            large_extra_margin: LARGE_EXTRA_MARGIN,

            ship_radius: SHIP_RADIUS,
            ship_impulse: SHIP_IMPULSE,
            ship_max_speed: SHIP_MAX_SPEED,
            ship_turn_rate: SHIP_TURN_RATE,
            ship_lives: SHIP_LIVES,

            bullet_radius: BULLET_RADIUS,
            bullet_speed: BULLET_SPEED,
            bullet_rate: BULLET_RATE,
            symmetric_bullet_bounds: false,

            small: AsteroidStats {
                radius: SMALL_RADIUS,
                speed: SMALL_SPEED,
                points: SMALL_POINTS,
            },
            medium: AsteroidStats {
                radius: MEDIUM_RADIUS,
                speed: MEDIUM_SPEED,
                points: MEDIUM_POINTS,
            },
            large: AsteroidStats {
                radius: LARGE_RADIUS,
                speed: LARGE_SPEED,
                points: LARGE_POINTS,
            },
        }
    }
}

impl Tuning {
    /// Parse and validate tuning JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(TuningError::Invalid("playfield size must be positive"));
        }
        if !(self.dead_zone >= 0.0 && self.large_extra_margin >= 0.0) {
            return Err(TuningError::Invalid("margins must not be negative"));
        }
        if !(self.ship_radius > 0.0 && self.bullet_radius > 0.0) {
            return Err(TuningError::Invalid("ship and bullet radii must be positive"));
        }
        if !(self.bullet_speed > 0.0 && self.ship_max_speed > 0.0) {
            return Err(TuningError::Invalid("ship and bullet speeds must be positive"));
        }
        if !(self.ship_impulse.is_finite() && self.ship_impulse >= 0.0) {
            return Err(TuningError::Invalid("ship impulse must be finite and not negative"));
        }
        if !(self.ship_turn_rate.is_finite() && self.ship_turn_rate >= 0.0) {
            return Err(TuningError::Invalid("ship turn rate must be finite and not negative"));
        }
        if self.ship_lives == 0 {
            return Err(TuningError::Invalid("ship needs at least one life"));
        }
        for stats in [&self.small, &self.medium, &self.large] {
            if !(stats.radius > 0.0 && stats.speed >= 0.0) {
                return Err(TuningError::Invalid(
                    "asteroid radius must be positive and speed not negative",
                ));
            }
        }
        Ok(())
    }

    /// Balance for one asteroid size
    pub fn asteroid(&self, size: AsteroidSize) -> &AsteroidStats {
        match size {
            AsteroidSize::Small => &self.small,
            AsteroidSize::Medium => &self.medium,
            AsteroidSize::Large => &self.large,
        }
    }

    /// Wrap margin for an asteroid of the given size
    pub fn asteroid_margin(&self, size: AsteroidSize) -> f32 {
        match size {
            AsteroidSize::Large => self.dead_zone + self.large_extra_margin,
            _ => self.dead_zone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "ship_lives": 5, "bullet_rate": 3 }"#).unwrap();
        assert_eq!(tuning.ship_lives, 5);
        assert_eq!(tuning.bullet_rate, 3);
        assert_eq!(tuning.width, GAME_WIDTH);
        assert_eq!(tuning.large.points, LARGE_POINTS);
    }

    #[test]
    fn test_rejects_zero_field() {
        let err = Tuning::from_json(r#"{ "width": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_lives() {
        let err = Tuning::from_json(r#"{ "ship_lives": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_ship_handling() {
        for json in [r#"{ "ship_impulse": -0.5 }"#, r#"{ "ship_turn_rate": -5.0 }"#] {
            let err = Tuning::from_json(json).unwrap_err();
            assert!(matches!(err, TuningError::Invalid(_)), "{json}");
        }
        let tuning = Tuning {
            ship_turn_rate: f32::NAN,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
        let tuning = Tuning {
            ship_impulse: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_asteroid_check_names_radius_and_speed() {
        let mut tuning = Tuning::default();
        tuning.medium.speed = -1.0;
        let err = tuning.validate().unwrap_err();
        assert!(err.to_string().contains("speed"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json(r#"{ "width": "wide" }"#).unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_large_margin_is_enlarged() {
        let tuning = Tuning::default();
        assert_eq!(tuning.asteroid_margin(AsteroidSize::Small), DEAD_ZONE);
        assert_eq!(tuning.asteroid_margin(AsteroidSize::Medium), DEAD_ZONE);
        assert_eq!(
            tuning.asteroid_margin(AsteroidSize::Large),
            DEAD_ZONE + LARGE_EXTRA_MARGIN
        );
    }
}
