//! Player integration
//!
//! One call to [`step_player`] is one simulation tick of movement: jump
//! impulses, gravity, forward motion and landing. It never changes game
//! state; a fall below the playfield is only reported.

use super::collision::{find_landing, land_on};
use super::state::World;
use crate::tuning::Tuning;

/// What happened to the player this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// Index of the platform landed on, if any
    pub landed_on: Option<usize>,
    /// Player dropped below the bottom of the playfield
    pub fell: bool,
}

/// Which jump (if any) a jump request produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Grounded,
    Double,
}

/// Apply a jump request to the player's vertical velocity
///
/// A grounded jump also arms the double-jump charges; an airborne jump spends
/// one. Returns None when the request had no effect.
pub fn apply_jump(world: &mut World, tuning: &Tuning) -> Option<JumpKind> {
    let player = &mut world.player;
    if !player.airborne {
        player.vel.y = tuning.jump_impulse;
        player.airborne = true;
        player.double_jumps = tuning.max_double_jumps;
        Some(JumpKind::Grounded)
    } else if player.double_jumps > 0 {
        player.vel.y = tuning.double_jump_impulse;
        player.double_jumps -= 1;
        Some(JumpKind::Double)
    } else {
        None
    }
}

/// Advance the player by one tick
pub fn step_player(world: &mut World, tuning: &Tuning, jump_requested: bool) -> StepOutcome {
    if jump_requested {
        if let Some(kind) = apply_jump(world, tuning) {
            log::trace!("{:?} jump at x={:.1}", kind, world.player.pos.x);
        }
    }

    let speed = world.speed;
    let player = &mut world.player;
    player.vel.y += tuning.gravity;
    player.vel.x = speed;
    player.pos += player.vel;

    // No coyote time: unsupported means airborne
    player.airborne = true;
    let landed_on = find_landing(player, &world.platforms, tuning.landing_band);
    if let Some(idx) = landed_on {
        land_on(player, &world.platforms[idx], tuning.max_double_jumps);
    }

    StepOutcome {
        landed_on,
        fell: player.pos.y > world.screen_height,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::sim::state::Platform;
    use crate::tuning::Resolution;

    fn world() -> World {
        World::new(Arc::new(Tuning::default()), Resolution::new(800, 600), 1)
    }

    #[test]
    fn test_grounded_jump_sets_impulse() {
        let mut world = world();
        let tuning = Tuning::default();
        assert_eq!(apply_jump(&mut world, &tuning), Some(JumpKind::Grounded));
        assert_eq!(world.player.vel.y, tuning.jump_impulse);
        assert!(world.player.airborne);
        assert_eq!(world.player.double_jumps, tuning.max_double_jumps);
    }

    #[test]
    fn test_jump_tick_from_rest() {
        let mut world = world();
        let tuning = Tuning::default();
        let outcome = step_player(&mut world, &tuning, true);
        assert_eq!(outcome.landed_on, None);
        assert!(world.player.airborne);
        assert_eq!(world.player.vel.y, tuning.jump_impulse + tuning.gravity);
        assert_eq!(world.player.pos.y, 520.0 + tuning.jump_impulse + tuning.gravity);
    }

    #[test]
    fn test_double_jump_spends_charge() {
        let mut world = world();
        let tuning = Tuning::default();
        step_player(&mut world, &tuning, true);
        step_player(&mut world, &tuning, false);

        assert_eq!(apply_jump(&mut world, &tuning), Some(JumpKind::Double));
        assert_eq!(world.player.vel.y, tuning.double_jump_impulse);
        assert_eq!(world.player.double_jumps, 0);

        // Out of charges: further requests do nothing
        let vel_before = world.player.vel.y;
        assert_eq!(apply_jump(&mut world, &tuning), None);
        assert_eq!(world.player.vel.y, vel_before);
    }

    #[test]
    fn test_resting_player_stays_grounded() {
        let mut world = world();
        let tuning = Tuning::default();
        let outcome = step_player(&mut world, &tuning, false);
        assert_eq!(outcome.landed_on, Some(0));
        assert!(!world.player.airborne);
        assert_eq!(world.player.bottom(), world.platforms[0].top());
        assert_eq!(world.player.vel.y, 0.0);
        assert_eq!(world.player.pos.x, 323.0);
    }

    #[test]
    fn test_walking_off_edge_becomes_airborne() {
        let mut world = world();
        let tuning = Tuning::default();
        // Ground platform ends at x=420
        world.player.pos.x = 420.0;
        let outcome = step_player(&mut world, &tuning, false);
        assert_eq!(outcome.landed_on, None);
        assert!(world.player.airborne);
        assert_eq!(world.player.vel.y, tuning.gravity);
    }

    #[test]
    fn test_landing_restores_double_jump() {
        let mut world = world();
        let tuning = Tuning::default();
        world.player.pos = Vec2::new(480.0, 448.0);
        world.player.vel.y = 5.0;
        world.player.airborne = true;
        world.player.double_jumps = 0;

        let outcome = step_player(&mut world, &tuning, false);
        assert_eq!(outcome.landed_on, Some(1));
        assert_eq!(world.player.bottom(), 480.0);
        assert_eq!(world.player.double_jumps, 1);
        assert!(!world.player.airborne);
    }

    #[test]
    fn test_no_landing_while_rising_through_platform() {
        let mut world = world();
        let tuning = Tuning::default();
        world.platforms.push_back(Platform::new(300.0, 500.0, 100.0, 20.0, 0));
        world.player.pos = Vec2::new(320.0, 485.0);
        world.player.vel.y = -8.0;
        world.player.airborne = true;

        let outcome = step_player(&mut world, &tuning, false);
        assert_eq!(outcome.landed_on, None);
        assert!(world.player.vel.y < 0.0);
    }

    #[test]
    fn test_fall_signal() {
        let mut world = world();
        let tuning = Tuning::default();
        world.player.pos = Vec2::new(0.0, 598.0);
        world.player.vel.y = 10.0;
        world.player.airborne = true;
        let outcome = step_player(&mut world, &tuning, false);
        assert!(outcome.fell);
    }

    proptest! {
        #[test]
        fn prop_gravity_then_land(
            vel_y in -15.0f32..15.0,
            y in 300.0f32..560.0,
            jump in any::<bool>(),
        ) {
            let tuning = Tuning::default();
            let mut world = world();
            world.player.pos.y = y;
            world.player.vel.y = vel_y;
            world.player.airborne = true;
            world.player.double_jumps = 0;

            let outcome = step_player(&mut world, &tuning, jump);
            match outcome.landed_on {
                Some(idx) => {
                    prop_assert_eq!(world.player.bottom(), world.platforms[idx].top());
                    prop_assert_eq!(world.player.vel.y, 0.0);
                    prop_assert_eq!(world.player.double_jumps, tuning.max_double_jumps);
                }
                None => {
                    // No charge to spend, so velocity is pure gravity
                    prop_assert_eq!(world.player.vel.y, vel_y + tuning.gravity);
                    prop_assert!(world.player.airborne);
                }
            }
        }

        #[test]
        fn prop_double_jumps_bounded(jumps in prop::collection::vec(any::<bool>(), 1..200)) {
            let tuning = Tuning::default();
            let mut world = world();
            for jump in jumps {
                step_player(&mut world, &tuning, jump);
                prop_assert!(world.player.double_jumps <= tuning.max_double_jumps);
                if !world.player.airborne {
                    prop_assert_eq!(world.player.double_jumps, tuning.max_double_jumps);
                }
            }
        }
    }
}
