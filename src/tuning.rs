//! Data-driven game balance
//!
//! Every physics and generation constant lives in [`Tuning`], which is built
//! once and handed to the world and generator. Nothing here is mutated after
//! construction.

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// A selectable window resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Display label, e.g. `1280x720`
    pub fn label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Physics, generation and presentation constants
///
/// All values are per tick: velocities are in pixels/tick and gravity in
/// pixels/tick². Partial JSON overrides are accepted because every field
/// falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity set by a grounded jump (negative is up)
    pub jump_impulse: f32,
    /// Vertical velocity set by an airborne jump
    pub double_jump_impulse: f32,
    /// Airborne jumps available after leaving the ground
    pub max_double_jumps: u8,
    /// Side length of the player's square bounding box
    pub player_size: f32,
    /// Platform thickness
    pub platform_height: f32,
    /// How far below a platform top the player's bottom edge may be and
    /// still land on it
    pub landing_band: f32,
    /// Forward speed at round start
    pub base_speed: f32,
    /// Fractional speed gain per completed interval
    pub speed_increase: f32,
    /// Score interval between speed steps
    pub speed_interval: u32,
    /// Grace countdown at round start
    pub start_countdown_ticks: u32,
    pub min_platform_distance: f32,
    pub max_platform_distance: f32,
    pub min_platform_width: f32,
    pub max_platform_width: f32,
    /// Distance over which a passed platform fades out
    pub fade_distance: f32,
    /// How far behind the camera a platform's trailing edge must be before
    /// it is evicted
    pub eviction_margin: f32,
    /// New platforms are generated once the last one is closer than
    /// `screen_width - generation_margin` ahead of the player
    pub generation_margin: f32,
    /// Fraction of the screen width kept between the camera and the player
    pub camera_lead: f32,
    /// Canonical platform top y per level, ground first
    pub levels: Vec<f32>,
    /// Selectable resolutions, first is the default
    pub resolutions: Vec<Resolution>,
    /// Longest accepted high score name
    pub max_name_len: usize,
}

/// Height the level table is laid out against
const LEVEL_BASE_HEIGHT: f32 = 600.0;

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_impulse: -12.0,
            double_jump_impulse: -10.0,
            max_double_jumps: 1,
            player_size: 30.0,
            platform_height: 20.0,
            landing_band: 20.0,
            base_speed: 3.0,
            speed_increase: 0.2,
            speed_interval: 20,
            start_countdown_ticks: 180,
            min_platform_distance: 150.0,
            max_platform_distance: 250.0,
            min_platform_width: 80.0,
            max_platform_width: 150.0,
            fade_distance: 200.0,
            eviction_margin: 100.0,
            generation_margin: 200.0,
            camera_lead: 0.4,
            levels: [50.0, 120.0, 190.0, 260.0, 330.0]
                .iter()
                .map(|offset| LEVEL_BASE_HEIGHT - offset)
                .collect(),
            resolutions: vec![
                Resolution::new(800, 600),
                Resolution::new(1280, 720),
                Resolution::new(1920, 1080),
                Resolution::new(2560, 1440),
            ],
            max_name_len: 16,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: &str| Err(TuningError::Invalid(msg.to_string()));

        if self.gravity <= 0.0 {
            return invalid("gravity must be positive");
        }
        if self.jump_impulse >= 0.0 || self.double_jump_impulse >= 0.0 {
            return invalid("jump impulses must be negative (upward)");
        }
        if self.player_size <= 0.0 || self.platform_height <= 0.0 {
            return invalid("player and platform sizes must be positive");
        }
        if self.base_speed <= 0.0 {
            return invalid("base speed must be positive");
        }
        if self.speed_interval == 0 {
            return invalid("speed interval must be non-zero");
        }
        if self.min_platform_distance <= 0.0
            || self.min_platform_distance > self.max_platform_distance
        {
            return invalid("platform distance band is empty");
        }
        if self.min_platform_width <= 0.0 || self.min_platform_width > self.max_platform_width {
            return invalid("platform width band is empty");
        }
        if self.fade_distance <= 0.0 {
            return invalid("fade distance must be positive");
        }
        if self.levels.len() < 2 {
            return invalid("at least two platform levels are required");
        }
        if self.resolutions.is_empty() {
            return invalid("resolution list is empty");
        }
        Ok(())
    }

    /// Highest valid level index
    #[inline]
    pub fn max_level(&self) -> usize {
        self.levels.len() - 1
    }

    /// Ticks spent airborne by a single grounded jump that lands at take-off
    /// height
    #[inline]
    pub fn airtime(&self) -> f32 {
        2.0 * self.jump_impulse.abs() / self.gravity
    }

    /// Forward distance covered by one grounded jump at `speed`
    #[inline]
    pub fn max_jump_distance(&self, speed: f32) -> f32 {
        speed * self.airtime()
    }
}
