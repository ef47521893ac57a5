//! Demo-mode AI
//!
//! Decides when to press jump so the game can play itself (attract mode and
//! the headless binary). It only reads the world; the decision goes through
//! the normal input path.

use crate::sim::World;

/// Ticks of travel before a ledge's end at which a grounded runner jumps
const EDGE_LOOKAHEAD_TICKS: f32 = 3.0;
/// How far ahead (in ticks of travel) a falling runner looks for somewhere
/// to land before spending a double jump
const LANDING_LOOKAHEAD_TICKS: f32 = 20.0;

/// Should the jump key be pressed this tick?
pub fn wants_jump(world: &World) -> bool {
    // Skip the grace period
    if world.in_countdown() {
        return true;
    }

    let player = &world.player;
    let speed = world.speed;

    if !player.airborne {
        // Jump just before running off the supporting ledge
        let support = world.platforms.iter().find(|p| {
            player.rect().overlaps_x(&p.rect()) && (player.bottom() - p.top()).abs() < 0.5
        });
        return match support {
            Some(ledge) => player.pos.x + speed * EDGE_LOOKAHEAD_TICKS >= ledge.trailing_edge(),
            None => false,
        };
    }

    if player.vel.y <= 0.0 || player.double_jumps == 0 {
        return false;
    }

    // Falling: spend the double jump only if nothing below is in reach
    let reach = player.right() + speed * LANDING_LOOKAHEAD_TICKS;
    let landing_ahead = world
        .platforms
        .iter()
        .any(|p| p.top() >= player.bottom() && p.trailing_edge() > player.pos.x && p.pos.x < reach);
    !landing_ahead
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec2;

    use super::*;
    use crate::sim::{PlayOutcome, TickInput, tick};
    use crate::tuning::{Resolution, Tuning};

    fn world() -> World {
        let mut world = World::new(Arc::new(Tuning::default()), Resolution::new(800, 600), 21);
        world.start_timer = 0;
        world
    }

    #[test]
    fn test_dismisses_countdown() {
        let mut world = world();
        world.start_timer = 10;
        assert!(wants_jump(&world));
    }

    #[test]
    fn test_runs_along_ledge() {
        let world = world();
        // Ground ledge 220..420, player at 320
        assert!(!wants_jump(&world));
    }

    #[test]
    fn test_jumps_at_ledge_end() {
        let mut world = world();
        world.player.pos.x = 412.0;
        assert!(wants_jump(&world));
    }

    #[test]
    fn test_double_jumps_over_void() {
        let mut world = world();
        world.player.pos = Vec2::new(3000.0, 500.0);
        world.player.vel.y = 2.0;
        world.player.airborne = true;
        assert!(wants_jump(&world));

        world.player.double_jumps = 0;
        assert!(!wants_jump(&world));
    }

    #[test]
    fn test_no_double_jump_above_ledge() {
        let mut world = world();
        // Falling onto the second seeded ledge (470..570, top 480)
        world.player.pos = Vec2::new(480.0, 400.0);
        world.player.vel.y = 2.0;
        world.player.airborne = true;
        assert!(!wants_jump(&world));
    }

    #[test]
    fn test_plays_a_round() {
        let mut world = world();
        let mut ticks = 0;
        while ticks < 600 {
            let input = TickInput {
                jump: wants_jump(&world),
            };
            if tick(&mut world, &input) == PlayOutcome::Fell {
                break;
            }
            ticks += 1;
        }
        // Survives well past the first ledge
        assert!(ticks > 60);
    }
}
