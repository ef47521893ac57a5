//! Deterministic simulation module
//!
//! All gameplay logic for a round lives here. This module must be pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (platforms in creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod generator;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Rect, find_landing, is_landing};
pub use generator::{evict_passed, generate, nearest_level, safe_spacing, update_fade};
pub use physics::{JumpKind, StepOutcome, apply_jump, step_player};
pub use state::{Platform, Player, World};
pub use tick::{PlayOutcome, TickInput, tick};
