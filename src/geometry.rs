//! Star placement: pivot, concentric rings, and randomized attributes.
//!
//! Stars orbit a fixed pivot point on a quantized set of ring radii. Rings
//! use square-root spacing so each pair of adjacent rings bounds an annulus
//! of equal area, which keeps the field's visual density uniform instead of
//! clumping near the pivot.

use std::f64::consts::TAU;

use crate::config::StarfieldConfig;
use crate::rng::Rng;

/// One orbiting trail element. Immutable after creation; the only thing that
/// moves per frame is the engine's global rotation angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Distance from the pivot
    pub radius: f64,
    /// Fixed phase offset in radians
    pub angle_offset: f64,
    /// Arc length in radians the trail spans behind the head
    pub trail_arc: f64,
    /// Stroke width
    pub thickness: f64,
    /// Special stars render in the accent color, optionally with a glow
    pub is_special: bool,
}

/// Resolve the pivot fraction to a point in viewport coordinates.
pub fn pivot_point(width: f64, height: f64, config: &StarfieldConfig) -> (f64, f64) {
    (width * config.pivot.x, height * config.pivot.y)
}

/// Distance from the pivot to the farthest viewport corner.
///
/// This is the largest orbit radius that can still intersect the viewport;
/// no star needs to be placed beyond it.
pub fn max_radius(width: f64, height: f64, pivot: (f64, f64)) -> f64 {
    let (px, py) = pivot;
    let dx2 = (px * px).max((width - px) * (width - px));
    let dy2 = (py * py).max((height - py) * (height - py));
    (dx2 + dy2).sqrt()
}

/// Ring radii partitioning `[0, max_radius]` into equal-area annuli:
/// `ring[i] = sqrt((i + 1) / n) * max_radius`.
pub fn ring_radii(rings: usize, max_radius: f64) -> Vec<f64> {
    (0..rings)
        .map(|i| ((i + 1) as f64 / rings as f64).sqrt() * max_radius)
        .collect()
}

/// Generate the full star field for a viewport.
///
/// Stars are assigned rings cyclically (`i % ring_count`), so the star count
/// does not need to be a multiple of the ring count. Angle, trail length,
/// and thickness are drawn independently per star; thickness bounds depend
/// on the special flag. The generator is a pure function of its inputs, so a
/// seeded [`Rng`] reproduces the exact same field.
pub fn generate(width: f64, height: f64, config: &StarfieldConfig, rng: &mut Rng) -> Vec<Star> {
    let pivot = pivot_point(width, height, config);
    let rings = ring_radii(config.orbital_rings, max_radius(width, height, pivot));
    if rings.is_empty() {
        return Vec::new();
    }

    (0..config.star_count)
        .map(|i| {
            let is_special = rng.chance(config.special_chance);
            let thickness_range = if is_special {
                config.special_thickness
            } else {
                config.normal_thickness
            };
            Star {
                radius: rings[i % rings.len()],
                angle_offset: rng.range(0.0, TAU),
                trail_arc: rng.range(config.trail_length.min, config.trail_length.max),
                thickness: rng.range(thickness_range.min, thickness_range.max),
                is_special,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PivotFraction;

    fn test_config(count: usize, rings: usize) -> StarfieldConfig {
        StarfieldConfig {
            star_count: count,
            orbital_rings: rings,
            ..StarfieldConfig::default()
        }
    }

    #[test]
    fn test_generate_returns_exact_count() {
        let mut rng = Rng::new(1);
        for count in [0, 1, 7, 600] {
            let stars = generate(800.0, 600.0, &test_config(count, 100), &mut rng);
            assert_eq!(stars.len(), count);
        }
    }

    #[test]
    fn test_all_radii_within_max() {
        let config = test_config(250, 40);
        let mut rng = Rng::new(2);
        let stars = generate(1024.0, 768.0, &config, &mut rng);
        let pivot = pivot_point(1024.0, 768.0, &config);
        let max_r = max_radius(1024.0, 768.0, pivot);
        for star in &stars {
            assert!(star.radius >= 0.0);
            assert!(star.radius <= max_r + 1e-9, "radius {} exceeds {}", star.radius, max_r);
        }
    }

    #[test]
    fn test_ring_membership_is_cyclic() {
        let config = test_config(25, 10);
        let mut rng = Rng::new(3);
        let stars = generate(640.0, 480.0, &config, &mut rng);
        let pivot = pivot_point(640.0, 480.0, &config);
        let rings = ring_radii(10, max_radius(640.0, 480.0, pivot));
        for (i, star) in stars.iter().enumerate() {
            assert_eq!(star.radius, rings[i % 10], "star {} not on its cyclic ring", i);
        }
    }

    #[test]
    fn test_rings_bound_equal_area_annuli() {
        let radii = ring_radii(100, 500.0);
        assert_eq!(radii.len(), 100);
        let first_area = radii[0] * radii[0];
        for pair in radii.windows(2) {
            let annulus = pair[1] * pair[1] - pair[0] * pair[0];
            assert!(
                (annulus - first_area).abs() < 1e-6,
                "annulus area {} differs from {}",
                annulus,
                first_area
            );
        }
        // Outermost ring sits exactly at the maximum radius
        assert!((radii[99] - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_offscreen_pivot_scenario() {
        // Pivot fraction y > 1 puts the orbit center below the viewport
        let config = StarfieldConfig {
            star_count: 10,
            pivot: PivotFraction { x: 0.5, y: 1.2 },
            ..StarfieldConfig::default()
        };
        let pivot = pivot_point(800.0, 600.0, &config);
        assert_eq!(pivot.0, 400.0);
        assert!((pivot.1 - 720.0).abs() < 1e-9);

        // max(400^2, 400^2) + max(720^2, 120^2)
        let expected = (400.0f64 * 400.0 + 720.0 * 720.0).sqrt();
        let max_r = max_radius(800.0, 600.0, pivot);
        assert!((max_r - expected).abs() < 1e-9);

        let mut rng = Rng::new(4);
        let stars = generate(800.0, 600.0, &config, &mut rng);
        assert_eq!(stars.len(), 10);
        for star in &stars {
            assert!(star.radius <= max_r);
        }
    }

    #[test]
    fn test_angles_and_trails_within_bounds() {
        let config = test_config(300, 50);
        let mut rng = Rng::new(5);
        for star in generate(800.0, 600.0, &config, &mut rng) {
            assert!((0.0..TAU).contains(&star.angle_offset));
            assert!(star.trail_arc >= config.trail_length.min);
            assert!(star.trail_arc < config.trail_length.max);
        }
    }

    #[test]
    fn test_thickness_ranges_by_kind() {
        let config = StarfieldConfig {
            star_count: 400,
            special_chance: 0.5,
            ..StarfieldConfig::default()
        };
        let mut rng = Rng::new(6);
        let stars = generate(800.0, 600.0, &config, &mut rng);
        assert!(stars.iter().any(|s| s.is_special));
        assert!(stars.iter().any(|s| !s.is_special));
        for star in &stars {
            let range = if star.is_special {
                config.special_thickness
            } else {
                config.normal_thickness
            };
            assert!(star.thickness >= range.min && star.thickness < range.max);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = test_config(120, 30);
        let a = generate(800.0, 600.0, &config, &mut Rng::new(42));
        let b = generate(800.0, 600.0, &config, &mut Rng::new(42));
        assert_eq!(a, b);

        let c = generate(800.0, 600.0, &config, &mut Rng::new(43));
        assert_ne!(a, c);
    }

    #[test]
    fn test_special_chance_zero_and_one() {
        let mut rng = Rng::new(7);
        let none = generate(
            800.0,
            600.0,
            &StarfieldConfig { star_count: 50, special_chance: 0.0, ..StarfieldConfig::default() },
            &mut rng,
        );
        assert!(none.iter().all(|s| !s.is_special));

        let all = generate(
            800.0,
            600.0,
            &StarfieldConfig { star_count: 50, special_chance: 1.0, ..StarfieldConfig::default() },
            &mut rng,
        );
        assert!(all.iter().all(|s| s.is_special));
    }
}
