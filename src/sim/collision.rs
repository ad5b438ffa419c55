//! Collision detection for circular entities
//!
//! Every entity is a circle. Checks are pairwise and brute force; a wave
//! holds tens of entities, never thousands.

use glam::Vec2;

/// Anything that collides as a circle
pub trait Collider {
    fn center(&self) -> Vec2;
    fn collision_radius(&self) -> f32;
}

/// True iff the circles overlap. Touching exactly is not a hit.
#[inline]
pub fn circles_overlap(a_center: Vec2, a_radius: f32, b_center: Vec2, b_radius: f32) -> bool {
    a_center.distance(b_center) < a_radius + b_radius
}

/// Circle test between two colliders
#[inline]
pub fn collides(a: &impl Collider, b: &impl Collider) -> bool {
    circles_overlap(a.center(), a.collision_radius(), b.center(), b.collision_radius())
}

/// Index of the first collider in `others` that overlaps `subject`
pub fn first_hit<C: Collider>(subject: &impl Collider, others: &[C]) -> Option<usize> {
    others.iter().position(|other| collides(subject, other))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dot(Vec2, f32);

    impl Collider for Dot {
        fn center(&self) -> Vec2 {
            self.0
        }

        fn collision_radius(&self) -> f32 {
            self.1
        }
    }

    #[test]
    fn test_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(8.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(20.0, 0.0), 5.0));
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.999, 0.0), 5.0));
    }

    #[test]
    fn test_first_hit_respects_order() {
        let subject = Dot(Vec2::ZERO, 5.0);
        let others = [
            Dot(Vec2::new(100.0, 0.0), 5.0),
            Dot(Vec2::new(3.0, 0.0), 1.0),
            Dot(Vec2::new(0.0, 2.0), 1.0),
        ];
        assert_eq!(first_hit(&subject, &others), Some(1));
        assert_eq!(first_hit(&subject, &others[..1]), None);
    }
}
