//! Ledge Runner - an endless-runner platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, platform generation)
//! - `flow`: Menu/settings/play/name entry/leaderboard state machine
//! - `frame`: Per-tick entry point, render snapshots, fixed-step accumulator
//! - `highscores` / `persistence`: Top-10 leaderboard and its storage
//! - `tuning`: Data-driven game balance

pub mod autopilot;
pub mod error;
pub mod flow;
pub mod frame;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use error::{PersistError, TuningError};
pub use flow::{Flow, Game, GameState};
pub use highscores::{HighScoreEntry, Leaderboard, LeaderboardStore};
pub use input::{InputSnapshot, Key};
pub use settings::Settings;
pub use snapshot::RenderSnapshot;
pub use tuning::Tuning;

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; tuning values are per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
