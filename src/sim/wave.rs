//! Wave simulator
//!
//! A [`Wave`] is one playable level instance. It owns the ship, asteroids and
//! bullets and advances them one frame per [`Wave::update`].
//!
//! Collision policy: each frame resolves at most one bullet/asteroid hit and at
//! most one ship/asteroid hit, taking the first qualifying pair in iteration
//! order (bullets in firing order, asteroids in list order). Other overlapping
//! pairs are left alone and picked up on later frames.

use glam::Vec2;

use super::collision::first_hit;
use super::entity::{Asteroid, Bullet, Ship};
use super::fragment::break_up;
use crate::input::{InputSource, Key};
use crate::level::{AsteroidSize, LevelData, LevelError};
use crate::render::{Drawable, RenderSink};
use crate::tuning::Tuning;

/// Aggregate state reported after each frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveStatus {
    /// Ship lost with lives remaining; waiting for a respawn
    pub paused: bool,
    /// Out of lives, or every asteroid destroyed
    pub ended: bool,
}

/// Something notable that happened during the last frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaveEvent {
    BulletFired,
    AsteroidDestroyed {
        size: AsteroidSize,
        points: u64,
        at: Vec2,
    },
    ShipLost {
        lives_left: u8,
    },
}

/// One level instance
#[derive(Debug, Clone)]
pub struct Wave {
    /// Starting layout, kept for respawns
    level: LevelData,
    tuning: Tuning,
    ship: Option<Ship>,
    asteroids: Vec<Asteroid>,
    bullets: Vec<Bullet>,
    lives: u8,
    score: u64,
    /// Frames until the ship may fire again
    cooldown: u32,
    events: Vec<WaveEvent>,
}

impl Wave {
    /// Build a wave from a level definition. Invalid levels are rejected
    /// before any entity is created.
    pub fn new(level: LevelData, tuning: Tuning) -> Result<Self, LevelError> {
        level.validate()?;

        let ship = Ship::new(&level.ship, &tuning);
        let asteroids = level
            .asteroids
            .iter()
            .map(|data| Asteroid::new(data, &tuning))
            .collect::<Vec<_>>();

        log::info!(
            "Wave started: {} asteroids, {} lives",
            asteroids.len(),
            tuning.ship_lives
        );

        Ok(Self {
            lives: tuning.ship_lives,
            level,
            tuning,
            ship: Some(ship),
            asteroids,
            bullets: Vec::new(),
            score: 0,
            cooldown: 0,
            events: Vec::new(),
        })
    }

    /// Advance one frame
    pub fn update(&mut self, input: &impl InputSource) -> WaveStatus {
        self.events.clear();

        let Some(ship) = self.ship.as_mut() else {
            return self.status();
        };

        if self.cooldown > 0 {
            self.cooldown -= 1;
        }

        if input.is_key_down(Key::TurnLeft) {
            ship.turn(self.tuning.ship_turn_rate);
        }
        if input.is_key_down(Key::TurnRight) {
            ship.turn(-self.tuning.ship_turn_rate.abs());
        }
        ship.advance(input.is_key_down(Key::Thrust), &self.tuning);

        for asteroid in &mut self.asteroids {
            asteroid.advance(&self.tuning);
        }

        if input.is_key_down(Key::Fire) && self.cooldown == 0 {
            self.bullets.push(Bullet::fire(ship, &self.tuning));
            self.cooldown = self.tuning.bullet_rate;
            self.events.push(WaveEvent::BulletFired);
        }

        for bullet in &mut self.bullets {
            bullet.advance();
        }
        let tuning = &self.tuning;
        self.bullets.retain(|bullet| !bullet.is_out(tuning));

        self.resolve_bullet_hit();
        self.resolve_ship_hit();

        let status = self.status();
        if status.ended {
            log::info!(
                "Wave over: {} (score {}, lives {})",
                if self.has_won() { "cleared" } else { "out of lives" },
                self.score,
                self.lives
            );
        }
        status
    }

    /// Resolve the first bullet/asteroid overlap, if any
    fn resolve_bullet_hit(&mut self) -> bool {
        let hit = self
            .bullets
            .iter()
            .enumerate()
            .find_map(|(b, bullet)| first_hit(bullet, &self.asteroids).map(|a| (b, a)));
        let Some((b, a)) = hit else {
            return false;
        };

        let bullet = self.bullets.remove(b);
        let asteroid = self.asteroids.remove(a);
        // Fragments spawn at the asteroid's center, flying along the shot
        self.destroy(&asteroid, asteroid.pos, bullet.velocity().normalize_or_zero());
        true
    }

    /// Resolve the first ship/asteroid overlap, if any
    fn resolve_ship_hit(&mut self) -> bool {
        let Some(ship) = self.ship.as_ref() else {
            return false;
        };
        let Some(a) = first_hit(ship, &self.asteroids) else {
            return false;
        };

        let point = ship.pos;
        let impact = ship.impact_direction();
        let asteroid = self.asteroids.remove(a);
        self.destroy(&asteroid, point, impact);

        self.ship = None;
        self.lives = self.lives.saturating_sub(1);
        self.events.push(WaveEvent::ShipLost {
            lives_left: self.lives,
        });
        log::debug!("Ship destroyed, {} lives left", self.lives);
        true
    }

    /// Score an asteroid that has already been removed and add its fragments
    fn destroy(&mut self, asteroid: &Asteroid, point: Vec2, impact: Vec2) {
        let result = break_up(point, impact, asteroid.size(), &self.tuning);
        self.score = self.score.saturating_add(result.points);
        self.asteroids.extend(result.fragments);
        self.events.push(WaveEvent::AsteroidDestroyed {
            size: asteroid.size(),
            points: result.points,
            at: point,
        });
    }

    /// Rebuild the ship at the level's starting position and heading.
    /// Does nothing once lives are exhausted.
    pub fn reset_ship(&mut self) -> bool {
        if self.lives == 0 {
            log::warn!("Respawn requested with no lives left");
            return false;
        }
        self.ship = Some(Ship::new(&self.level.ship, &self.tuning));
        log::debug!("Ship respawned ({} lives)", self.lives);
        true
    }

    pub fn status(&self) -> WaveStatus {
        WaveStatus {
            paused: self.is_paused(),
            ended: self.is_ended(),
        }
    }

    /// Ship lost while lives remain
    pub fn is_paused(&self) -> bool {
        self.ship.is_none() && self.lives > 0
    }

    pub fn is_ended(&self) -> bool {
        self.lives == 0 || self.asteroids.is_empty()
    }

    /// Field cleared with lives to spare
    pub fn has_won(&self) -> bool {
        self.lives > 0 && self.asteroids.is_empty()
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// Events from the most recent update
    pub fn events(&self) -> &[WaveEvent] {
        &self.events
    }

    pub fn level(&self) -> &LevelData {
        &self.level
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Hand every live entity to the sink
    pub fn draw(&self, sink: &mut dyn RenderSink) {
        if let Some(ship) = &self.ship {
            ship.draw(sink);
        }
        for asteroid in &self.asteroids {
            asteroid.draw(sink);
        }
        for bullet in &self.bullets {
            bullet.draw(sink);
        }
    }
}
