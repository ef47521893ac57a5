//! Fixed timestep simulation tick
//!
//! Advances a round by one tick while the game is in the Playing state.
//! Pausing and state changes are handled by the caller.

use super::generator::{evict_passed, generate, update_fade};
use super::physics::{StepOutcome, step_player};
use super::state::World;
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key went down this tick
    pub jump: bool,
}

/// Result of one Playing tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Still in the start-of-round grace period; nothing moved
    Countdown,
    /// World advanced normally
    Running(StepOutcome),
    /// Player fell below the playfield; the rest of the tick was skipped
    Fell,
}

/// Step the forward speed once the score reaches each interval
pub fn update_speed(world: &mut World, tuning: &Tuning) {
    let interval = u64::from(tuning.speed_interval);
    if world.score == 0 || world.score % interval != 0 {
        return;
    }
    let steps = (world.score / interval) as f32;
    let speed = tuning.base_speed * (1.0 + tuning.speed_increase * steps);
    if speed > world.speed {
        log::debug!(
            "Speed {:.2} -> {:.2} at score {}",
            world.speed,
            speed,
            world.score
        );
        world.speed = speed;
    }
}

/// Advance the round by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput) -> PlayOutcome {
    let tuning = world.shared_tuning();

    if world.start_timer > 0 {
        world.start_timer -= 1;
        if input.jump {
            world.start_timer = 0;
        }
        return PlayOutcome::Countdown;
    }

    update_speed(world, &tuning);

    let step = step_player(world, &tuning, input.jump);
    if step.fell {
        log::info!("Player fell at x={:.0} with score {}", world.player.pos.x, world.score);
        return PlayOutcome::Fell;
    }

    generate(world, &tuning);
    update_fade(world, &tuning);
    world.camera_x = world.camera_target();
    evict_passed(world, &tuning);

    PlayOutcome::Running(step)
}
