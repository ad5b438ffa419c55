//! Asteroid break-up
//!
//! A destroyed asteroid scores points and, unless it was small, leaves three
//! fragments one size down at the impact point. Fragments fly along the impact
//! direction and that direction rotated by +120 and +240 degrees.

use glam::Vec2;

use super::entity::Asteroid;
use crate::consts::FRAGMENT_SPREAD;
use crate::level::AsteroidSize;
use crate::rotate_degrees;
use crate::tuning::Tuning;

/// Outcome of breaking one asteroid
#[derive(Debug, Clone, PartialEq)]
pub struct Fragmentation {
    pub points: u64,
    /// Empty for small asteroids, otherwise exactly three
    pub fragments: Vec<Asteroid>,
}

/// The three fragment headings for an impact direction
pub fn fragment_directions(impact: Vec2) -> [Vec2; 3] {
    [
        impact,
        rotate_degrees(impact, FRAGMENT_SPREAD),
        rotate_degrees(impact, FRAGMENT_SPREAD * 2.0),
    ]
}

/// Break an asteroid of `size` hit at `point` travelling along `impact`
pub fn break_up(point: Vec2, impact: Vec2, size: AsteroidSize, tuning: &Tuning) -> Fragmentation {
    let points = tuning.asteroid(size).points;
    let fragments = match size.fragment_size() {
        Some(child) => fragment_directions(impact)
            .into_iter()
            .map(|dir| Asteroid::spawn(child, point, dir, tuning))
            .collect(),
        None => Vec::new(),
    };

    log::debug!(
        "Broke {} asteroid at ({:.1}, {:.1}): +{} points, {} fragments",
        size.as_str(),
        point.x,
        point.y,
        points,
        fragments.len()
    );

    Fragmentation { points, fragments }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Drawable;
    use proptest::prelude::*;

    fn assert_spread(fragments: &[Asteroid]) {
        let dirs: Vec<Vec2> = fragments.iter().map(|a| a.velocity().normalize()).collect();
        for i in 0..3 {
            let a = dirs[i];
            let b = dirs[(i + 1) % 3];
            // cos(120°) between each neighbour
            assert!((a.dot(b) + 0.5).abs() < 1e-4, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn test_small_scores_and_vanishes() {
        let result = break_up(Vec2::ZERO, Vec2::X, AsteroidSize::Small, &Tuning::default());
        assert_eq!(result.points, 20);
        assert!(result.fragments.is_empty());
    }

    #[test]
    fn test_medium_splits_into_three_small() {
        let tuning = Tuning::default();
        let point = Vec2::new(120.0, 80.0);
        let result = break_up(point, Vec2::new(0.0, 1.0), AsteroidSize::Medium, &tuning);
        assert_eq!(result.points, 10);
        assert_eq!(result.fragments.len(), 3);
        for fragment in &result.fragments {
            assert_eq!(fragment.size(), AsteroidSize::Small);
            assert_eq!(fragment.position(), point);
            assert!((fragment.velocity().length() - tuning.small.speed).abs() < 1e-4);
        }
        assert_spread(&result.fragments);
        // First fragment keeps the impact heading
        assert!((result.fragments[0].velocity().normalize() - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_large_splits_into_three_medium() {
        let tuning = Tuning::default();
        let result = break_up(
            Vec2::new(1.0, 2.0),
            Vec2::new(-1.0, 0.0),
            AsteroidSize::Large,
            &tuning,
        );
        assert_eq!(result.points, 5);
        assert_eq!(result.fragments.len(), 3);
        assert!(result.fragments.iter().all(|a| a.size() == AsteroidSize::Medium));
        assert_spread(&result.fragments);
    }

    #[test]
    fn test_unnormalized_impact_gives_fixed_speed() {
        let tuning = Tuning::default();
        let result = break_up(Vec2::ZERO, Vec2::new(30.0, 40.0), AsteroidSize::Large, &tuning);
        for fragment in &result.fragments {
            assert!((fragment.velocity().length() - tuning.medium.speed).abs() < 1e-4);
        }
    }

    proptest! {
        #[test]
        fn directions_are_evenly_spaced(angle in 0.0f32..360.0) {
            let impact = crate::facing_from_degrees(angle);
            let [a, b, c] = fragment_directions(impact);
            prop_assert!((a.dot(b) + 0.5).abs() < 1e-4);
            prop_assert!((b.dot(c) + 0.5).abs() < 1e-4);
            prop_assert!((c.dot(a) + 0.5).abs() < 1e-4);
        }
    }
}
