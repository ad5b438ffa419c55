//! Planetoids - a wrap-around asteroids arcade game
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (motion, collisions, break-up, waves)
//! - `app`: Top-level application state machine and HUD
//! - `level`: Level definitions and seeded level generation
//! - `input`: Logical key queries
//! - `render`: Drawable capability and render sink hand-off
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod app;
pub mod input;
pub mod level;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::{AppState, Application};
pub use input::{FrameInput, InputSource, Key};
pub use level::{AsteroidData, AsteroidSize, LevelData, LevelError, ShipData};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Default game balance. All speeds are in pixels per frame.
pub mod consts {
    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 700.0;
    /// Margin beyond the playfield edges before wrap/despawn kicks in
    pub const DEAD_ZONE: f32 = 50.0;
    /// Large asteroids wrap later so they never pop at the edge
    pub const LARGE_EXTRA_MARGIN: f32 = 20.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 16.0;
    pub const SHIP_IMPULSE: f32 = 0.25;
    pub const SHIP_MAX_SPEED: f32 = 10.0;
    /// Degrees per frame
    pub const SHIP_TURN_RATE: f32 = 5.0;
    pub const SHIP_LIVES: u8 = 3;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 5.0;
    pub const BULLET_SPEED: f32 = 10.0;
    /// Frames between shots
    pub const BULLET_RATE: u32 = 10;

    /// Asteroid defaults, per size
    pub const SMALL_RADIUS: f32 = 15.0;
    pub const SMALL_SPEED: f32 = 4.0;
    pub const SMALL_POINTS: u64 = 20;
    pub const MEDIUM_RADIUS: f32 = 25.0;
    pub const MEDIUM_SPEED: f32 = 3.0;
    pub const MEDIUM_POINTS: u64 = 10;
    pub const LARGE_RADIUS: f32 = 40.0;
    pub const LARGE_SPEED: f32 = 2.0;
    pub const LARGE_POINTS: u64 = 5;

    /// Angular spacing between break-up fragments (degrees)
    pub const FRAGMENT_SPREAD: f32 = 120.0;
}

/// Unit vector for a heading in degrees (counter-clockwise from +x)
#[inline]
pub fn facing_from_degrees(angle: f32) -> Vec2 {
    let rad = angle.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Rotate a vector counter-clockwise by `degrees`
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_facing_cardinal_directions() {
        let east = facing_from_degrees(0.0);
        assert!((east - Vec2::X).length() < 1e-6);

        let north = facing_from_degrees(90.0);
        assert!((north - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let rotated = rotate_degrees(Vec2::new(1.0, 0.0), 90.0);
        assert!(rotated.x.abs() < 1e-6);
        assert!((rotated.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_normalizes_to_zero() {
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn facing_is_unit_length(angle in -10_000.0f32..10_000.0) {
            let facing = facing_from_degrees(angle);
            prop_assert!((facing.length() - 1.0).abs() < 1e-4);
        }

        #[test]
        fn rotation_preserves_length(
            x in -100.0f32..100.0,
            y in -100.0f32..100.0,
            deg in -720.0f32..720.0,
        ) {
            let v = Vec2::new(x, y);
            let rotated = rotate_degrees(v, deg);
            prop_assert!((rotated.length() - v.length()).abs() < 1e-3);
        }
    }
}
