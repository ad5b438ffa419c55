//! Entity motion model
//!
//! Ships and asteroids live on a torus: once they drift past the dead-zone
//! margin on one side they reappear just beyond the opposite edge. Bullets do
//! not wrap; they fly straight until they leave the field and are dropped.

use glam::Vec2;

use super::collision::Collider;
use crate::facing_from_degrees;
use crate::level::{AsteroidData, AsteroidSize, ShipData};
use crate::render::{Drawable, Visual, colors};
use crate::tuning::Tuning;

/// Wrap one coordinate into `[-margin, extent + margin]`.
/// Past the low bound jumps to the high bound and vice versa.
#[inline]
pub fn wrap_coord(value: f32, extent: f32, margin: f32) -> f32 {
    let margin = margin.abs();
    if value < -margin {
        extent + margin
    } else if value > extent + margin {
        -margin
    } else {
        value
    }
}

/// Toroidal wrap on both axes
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_coord(pos.x, width, margin),
        wrap_coord(pos.y, height, margin),
    )
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub(crate) pos: Vec2,
    pub(crate) vel: Vec2,
    /// Heading in degrees
    angle: f32,
    /// Unit vector for `angle`, kept in sync by `turn`
    facing: Vec2,
    radius: f32,
}

impl Ship {
    pub fn new(data: &ShipData, tuning: &Tuning) -> Self {
        Self {
            pos: data.position,
            vel: Vec2::ZERO,
            angle: data.angle,
            facing: facing_from_degrees(data.angle),
            radius: tuning.ship_radius,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    /// Rotate the heading by `delta` degrees
    pub fn turn(&mut self, delta: f32) {
        self.angle += delta;
        self.facing = facing_from_degrees(self.angle);
    }

    /// Advance one frame. With thrust the ship accelerates along its facing,
    /// unless it is already over the speed cap, in which case it is slowed to
    /// exactly the cap instead.
    pub fn advance(&mut self, thrust: bool, tuning: &Tuning) {
        if thrust {
            if self.vel.length() > tuning.ship_max_speed {
                self.vel = self.vel.normalize_or_zero() * tuning.ship_max_speed;
            } else {
                self.vel += self.facing * tuning.ship_impulse;
            }
        }
        self.pos = wrap_position(
            self.pos + self.vel,
            tuning.width,
            tuning.height,
            tuning.dead_zone,
        );
    }

    /// Tip of the ship, where bullets spawn
    pub fn nose(&self) -> Vec2 {
        self.pos + self.facing * self.radius
    }

    /// Direction used to break an asteroid the ship flew into
    pub fn impact_direction(&self) -> Vec2 {
        if self.vel == Vec2::ZERO {
            self.facing
        } else {
            self.vel.normalize_or_zero()
        }
    }
}

impl Collider for Ship {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn collision_radius(&self) -> f32 {
        self.radius
    }
}

impl Drawable for Ship {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn rotation(&self) -> f32 {
        self.angle
    }

    fn visual(&self) -> Visual {
        Visual::Sprite { source: "ship.png" }
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub(crate) pos: Vec2,
    vel: Vec2,
    size: AsteroidSize,
    radius: f32,
}

impl Asteroid {
    /// Build an asteroid moving along `direction` at its size's fixed speed.
    /// A zero direction gives a stationary asteroid.
    pub fn spawn(size: AsteroidSize, position: Vec2, direction: Vec2, tuning: &Tuning) -> Self {
        let stats = tuning.asteroid(size);
        Self {
            pos: position,
            vel: direction.normalize_or_zero() * stats.speed,
            size,
            radius: stats.radius,
        }
    }

    pub fn new(data: &AsteroidData, tuning: &Tuning) -> Self {
        Self::spawn(data.size, data.position, data.direction, tuning)
    }

    pub fn size(&self) -> AsteroidSize {
        self.size
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn advance(&mut self, tuning: &Tuning) {
        let margin = tuning.asteroid_margin(self.size);
        self.pos = wrap_position(self.pos + self.vel, tuning.width, tuning.height, margin);
    }
}

impl Collider for Asteroid {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn collision_radius(&self) -> f32 {
        self.radius
    }
}

impl Drawable for Asteroid {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn visual(&self) -> Visual {
        let source = match self.size {
            AsteroidSize::Small => "asteroid-small.png",
            AsteroidSize::Medium => "asteroid-medium.png",
            AsteroidSize::Large => "asteroid-large.png",
        };
        Visual::Sprite { source }
    }
}

/// A bullet; its velocity is fixed when fired
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub(crate) pos: Vec2,
    vel: Vec2,
    radius: f32,
}

impl Bullet {
    /// Fire from the ship's nose along its facing
    pub fn fire(ship: &Ship, tuning: &Tuning) -> Self {
        Self {
            pos: ship.nose(),
            vel: ship.facing() * tuning.bullet_speed,
            radius: tuning.bullet_radius,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Past the right or top dead-zone bound. The left/bottom bounds are only
    /// checked when `symmetric_bullet_bounds` is set.
    pub fn is_out(&self, tuning: &Tuning) -> bool {
        let dz = tuning.dead_zone;
        if self.pos.x > tuning.width + dz || self.pos.y > tuning.height + dz {
            return true;
        }
        tuning.symmetric_bullet_bounds && (self.pos.x < -dz || self.pos.y < -dz)
    }
}

impl Collider for Bullet {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn collision_radius(&self) -> f32 {
        self.radius
    }
}

impl Drawable for Bullet {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn visual(&self) -> Visual {
        Visual::Ellipse { color: colors::BULLET }
    }
}
