//! Procedural platform generation, fading and eviction
//!
//! Spacing adapts to the jump envelope at the current speed so every gap is
//! reachable with a single grounded jump. Levels drift at most one tier per
//! platform from wherever the player currently is.

use rand::Rng;

use super::state::{Platform, World};
use crate::tuning::Tuning;

/// Upper bound for the distance between consecutive platform x positions
/// at `speed`
///
/// 80% of the single-jump distance, capped at the maximum spacing and never
/// below the minimum spacing.
pub fn safe_spacing(tuning: &Tuning, speed: f32) -> f32 {
    let reach = tuning.max_jump_distance(speed) * 0.8;
    reach
        .min(tuning.max_platform_distance)
        .max(tuning.min_platform_distance)
}

/// Level whose standing height is closest to `player_y` (ties go to the
/// lower level)
pub fn nearest_level(tuning: &Tuning, player_y: f32) -> usize {
    let mut best = 0;
    let mut best_dist = f32::MAX;
    for (i, level_y) in tuning.levels.iter().enumerate() {
        let dist = (player_y - (level_y - tuning.player_size)).abs();
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}

/// Pick the next level from {one down, same, one up}, clamped to the table
pub fn next_level<R: Rng + ?Sized>(rng: &mut R, current: usize, max_level: usize) -> usize {
    match rng.random_range(0..3) {
        0 => current.saturating_sub(1),
        2 => (current + 1).min(max_level),
        _ => current,
    }
}

/// Does the world need another platform ahead of the player?
pub fn needs_platform(world: &World, tuning: &Tuning) -> bool {
    world.last_platform_x <= world.player.pos.x + world.screen_width - tuning.generation_margin
}

/// Append one platform if the last one is no longer far enough ahead
///
/// Returns the new platform's index.
pub fn generate(world: &mut World, tuning: &Tuning) -> Option<usize> {
    if !needs_platform(world, tuning) {
        return None;
    }

    let safe = safe_spacing(tuning, world.speed);
    let current = nearest_level(tuning, world.player.pos.y);
    let level = next_level(&mut world.rng, current, tuning.max_level());

    let spacing = if safe > tuning.min_platform_distance {
        world.rng.random_range(tuning.min_platform_distance..safe)
    } else {
        tuning.min_platform_distance
    };
    let width = if tuning.max_platform_width > tuning.min_platform_width {
        world
            .rng
            .random_range(tuning.min_platform_width..tuning.max_platform_width)
    } else {
        tuning.min_platform_width
    };

    let x = world.last_platform_x + spacing;
    world.platforms.push_back(Platform::new(
        x,
        tuning.levels[level],
        width,
        tuning.platform_height,
        level,
    ));
    world.last_platform_x = x;

    log::debug!(
        "Platform at x={:.0} level {} width {:.0} (spacing {:.0}/{:.0})",
        x,
        level,
        width,
        spacing,
        safe
    );
    Some(world.platforms.len() - 1)
}

/// Fade platforms the player has passed
///
/// Opacity falls linearly from 1 to 0 over the fade distance past the
/// platform's trailing edge.
pub fn update_fade(world: &mut World, tuning: &Tuning) {
    let player_x = world.player.pos.x;
    for platform in world.platforms.iter_mut() {
        let dist = player_x - platform.trailing_edge();
        platform.alpha = if dist > 0.0 {
            1.0 - (dist / tuning.fade_distance).min(1.0)
        } else {
            1.0
        };
    }
}

/// Drop platforms that scrolled out behind the camera, oldest first
///
/// Each eviction scores one point. Returns the number evicted.
pub fn evict_passed(world: &mut World, tuning: &Tuning) -> u64 {
    let limit = world.camera_x - tuning.eviction_margin;
    let mut evicted = 0;
    while world
        .platforms
        .front()
        .is_some_and(|p| p.trailing_edge() < limit)
    {
        world.platforms.pop_front();
        evicted += 1;
    }
    world.score += evicted;
    evicted
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::tuning::Resolution;

    fn world(seed: u64) -> World {
        World::new(Arc::new(Tuning::default()), Resolution::new(800, 600), seed)
    }

    #[test]
    fn test_safe_spacing_band() {
        let tuning = Tuning::default();
        // Base speed: reach 144 * 0.8 = 115.2, raised to the minimum
        assert_eq!(safe_spacing(&tuning, 3.0), 150.0);
        // 4.5 px/tick: 216 * 0.8 = 172.8
        assert!((safe_spacing(&tuning, 4.5) - 172.8).abs() < 1e-3);
        // Very fast: capped at the maximum
        assert_eq!(safe_spacing(&tuning, 20.0), 250.0);
    }

    #[test]
    fn test_nearest_level() {
        let tuning = Tuning::default();
        // Standing on the ground
        assert_eq!(nearest_level(&tuning, 520.0), 0);
        // Standing on level 2 (top 410)
        assert_eq!(nearest_level(&tuning, 380.0), 2);
        // Exactly halfway between levels 0 and 1 picks the lower level
        assert_eq!(nearest_level(&tuning, 485.0), 0);
        // Far above the table
        assert_eq!(nearest_level(&tuning, -500.0), 4);
    }

    #[test]
    fn test_next_level_clamped() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let low = next_level(&mut rng, 0, 4);
            assert!(low <= 1);
            let high = next_level(&mut rng, 4, 4);
            assert!(high >= 3 && high <= 4);
            let mid = next_level(&mut rng, 2, 4);
            assert!((1..=3).contains(&mid));
        }
    }

    #[test]
    fn test_generate_only_when_needed() {
        let mut world = world(5);
        let tuning = Tuning::default();
        // Second seeded platform at 470, threshold 320 + 800 - 200 = 920
        assert!(needs_platform(&world, &tuning));
        world.last_platform_x = 1000.0;
        assert_eq!(generate(&mut world, &tuning), None);
        assert_eq!(world.platforms.len(), 2);
    }

    #[test]
    fn test_generated_platform_shape() {
        let mut world = world(11);
        let tuning = Tuning::default();
        let idx = generate(&mut world, &tuning).unwrap();
        let platform = &world.platforms[idx];

        assert_eq!(idx, 2);
        assert_eq!(platform.alpha, 1.0);
        assert!(platform.level <= 2);
        assert_eq!(platform.top(), tuning.levels[platform.level]);
        assert!(platform.width >= 80.0 && platform.width < 150.0);
        // Base speed pins the spacing to the minimum
        assert_eq!(platform.pos.x, 470.0 + 150.0);
        assert_eq!(world.last_platform_x, platform.pos.x);
    }

    #[test]
    fn test_fade() {
        let mut world = world(1);
        let tuning = Tuning::default();
        world.player.pos.x = 520.0;
        update_fade(&mut world, &tuning);
        // Ground trailing edge at 420: 100 past, half faded
        assert!((world.platforms[0].alpha - 0.5).abs() < 1e-6);
        // Second platform trailing edge at 570: not passed yet
        assert_eq!(world.platforms[1].alpha, 1.0);

        world.player.pos.x = 1000.0;
        update_fade(&mut world, &tuning);
        assert_eq!(world.platforms[0].alpha, 0.0);
    }

    #[test]
    fn test_evict_scores_once_per_platform() {
        let mut world = world(1);
        let tuning = Tuning::default();

        // Ground trailing edge 420; needs camera beyond 520
        world.camera_x = 520.0;
        assert_eq!(evict_passed(&mut world, &tuning), 0);
        assert_eq!(world.score, 0);

        world.camera_x = 521.0;
        assert_eq!(evict_passed(&mut world, &tuning), 1);
        assert_eq!(world.score, 1);
        assert_eq!(world.platforms.len(), 1);
        assert_eq!(world.platforms[0].level, 1);

        // Nothing left to evict at the same camera position
        assert_eq!(evict_passed(&mut world, &tuning), 0);
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_evict_several_keeps_order() {
        let mut world = world(2);
        let tuning = Tuning::default();
        for _ in 0..4 {
            world.player.pos.x += 300.0;
            generate(&mut world, &tuning);
        }
        let survivors: Vec<f32> = world.platforms.iter().skip(3).map(|p| p.pos.x).collect();
        world.camera_x = world.platforms[2].trailing_edge() + tuning.eviction_margin + 1.0;

        assert_eq!(evict_passed(&mut world, &tuning), 3);
        let remaining: Vec<f32> = world.platforms.iter().map(|p| p.pos.x).collect();
        assert_eq!(remaining, survivors);
    }

    const EPS: f32 = 1e-2;

    proptest! {
        #[test]
        fn prop_gaps_are_jumpable(
            seed in any::<u64>(),
            speed in 3.0f32..12.0,
            ticks in 1usize..60,
        ) {
            let tuning = Tuning::default();
            let mut world = world(seed);
            world.speed = speed;
            let reach = tuning.max_jump_distance(speed) * 0.8;

            for _ in 0..ticks {
                let before = world.platforms.back().cloned().unwrap();
                if generate(&mut world, &tuning).is_some() {
                    let after = world.platforms.back().unwrap();
                    let spacing = after.pos.x - before.pos.x;
                    let gap = after.pos.x - before.trailing_edge();
                    // Allow for f32 rounding at large x
                    prop_assert!(spacing >= tuning.min_platform_distance - EPS);
                    prop_assert!(spacing <= tuning.max_platform_distance + EPS);
                    prop_assert!(gap <= reach + EPS);
                    prop_assert!(after.width > 0.0);
                }
                world.player.pos.x += speed * 10.0;
            }
        }
    }
}
