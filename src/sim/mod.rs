//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame, velocities in pixels per frame
//! - Stable iteration order (insertion order of entities)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod fragment;
pub mod wave;

pub use collision::{Collider, circles_overlap, collides, first_hit};
pub use entity::{Asteroid, Bullet, Ship, wrap_coord, wrap_position};
pub use fragment::{Fragmentation, break_up, fragment_directions};
pub use wave::{Wave, WaveEvent, WaveStatus};
