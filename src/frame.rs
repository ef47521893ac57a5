//! Frame driver
//!
//! [`tick`] and [`render_data`] are the whole per-tick surface a host needs.
//! [`FixedStep`] turns variable frame times into whole simulation ticks.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::flow::{Flow, Game};
use crate::input::InputSnapshot;
use crate::snapshot::RenderSnapshot;

/// Run one simulation tick: dispatch the active state's update
pub fn tick(game: &mut Game, input: &InputSnapshot) -> Flow {
    game.update(input)
}

/// Capture what the renderer should draw for the current state
pub fn render_data(game: &Game) -> RenderSnapshot {
    RenderSnapshot::capture(game)
}

/// Outcome of feeding one rendered frame's time to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Ticks run this frame
    pub steps: u32,
    pub flow: Flow,
}

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    /// Longest frame time credited at once, caps catch-up after a stall
    pub max_frame_dt: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self {
            accumulator: 0.0,
            max_frame_dt: 0.25,
        }
    }
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `frame_dt` seconds and run as many whole ticks as fit
    ///
    /// Edge-triggered input (presses, typed text) is handed to the first tick
    /// only; later ticks of the same frame see held keys alone. At most
    /// `MAX_SUBSTEPS` ticks run per frame.
    pub fn advance(&mut self, game: &mut Game, frame_dt: f32, input: &InputSnapshot) -> FrameReport {
        self.accumulator += frame_dt.clamp(0.0, self.max_frame_dt);

        let held_only = input.without_edges();
        let mut steps = 0;
        let mut flow = Flow::Continue;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            let step_input = if steps == 0 { input } else { &held_only };
            self.accumulator -= SIM_DT;
            steps += 1;
            flow = tick(game, step_input);
            if flow == Flow::Exit {
                break;
            }
        }

        if steps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::warn!(
                "Simulation behind by {:.1}ms, dropping backlog",
                self.accumulator * 1000.0
            );
            self.accumulator = 0.0;
        }

        FrameReport { steps, flow }
    }

    /// Fraction of a tick left in the accumulator, for interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}
