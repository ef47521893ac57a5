//! Game world and core simulation types
//!
//! Everything a round mutates lives in [`World`]. It is replaced wholesale by
//! [`World::reset`], so no platform from a previous round survives a restart.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::tuning::{Resolution, Tuning};

/// The runner
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner in world coordinates (y grows downward)
    pub pos: Vec2,
    /// x mirrors the forward speed, y is vertical velocity
    pub vel: Vec2,
    /// Not supported by a platform this tick
    pub airborne: bool,
    /// Airborne jumps left
    pub double_jumps: u8,
    /// Side length of the bounding square
    pub size: f32,
}

impl Player {
    /// Player standing still at `pos` with a full double-jump charge
    pub fn new(pos: Vec2, size: f32, double_jumps: u8) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            airborne: false,
            double_jumps,
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size
    }
}

/// A ledge the player can land on
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Height tier, 0 is the ground level
    pub level: usize,
    /// Opacity in [0, 1], fades once the player has passed
    pub alpha: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32, level: usize) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height,
            level,
            alpha: 1.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    /// Right edge, the last part of the platform the camera passes
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.pos.x + self.width
    }
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    /// Platforms in creation order (oldest first)
    pub platforms: VecDeque<Platform>,
    /// Left edge of the visible area
    pub camera_x: f32,
    /// Platforms passed this round
    pub score: u64,
    /// Forward speed in pixels/tick
    pub speed: f32,
    /// x of the most recently generated platform
    pub last_platform_x: f32,
    /// Grace ticks remaining before the round starts moving
    pub start_timer: u32,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Rounds started, mixed into the round seed
    pub round: u64,
    pub(crate) rng: Pcg32,
    seed: u64,
    tuning: Arc<Tuning>,
}

impl World {
    /// Create a world and seed the first round
    pub fn new(tuning: Arc<Tuning>, resolution: Resolution, seed: u64) -> Self {
        let player = Player::new(Vec2::ZERO, tuning.player_size, tuning.max_double_jumps);
        let mut world = Self {
            player,
            platforms: VecDeque::new(),
            camera_x: 0.0,
            score: 0,
            speed: tuning.base_speed,
            last_platform_x: 0.0,
            start_timer: 0,
            screen_width: resolution.width as f32,
            screen_height: resolution.height as f32,
            round: 0,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            tuning,
        };
        world.reset(resolution);
        world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Shared handle, for callers that mutate the world while reading tuning
    pub fn shared_tuning(&self) -> Arc<Tuning> {
        Arc::clone(&self.tuning)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Start a fresh round at the given resolution
    ///
    /// The player stands on a wide ground platform with a second, higher
    /// platform already in reach.
    pub fn reset(&mut self, resolution: Resolution) {
        let tuning = Arc::clone(&self.tuning);
        self.screen_width = resolution.width as f32;
        self.screen_height = resolution.height as f32;
        self.round += 1;

        // Deterministic per-round stream derived from the run seed
        let round_seed = self.seed.wrapping_add(self.round.wrapping_mul(2654435761));
        self.rng = Pcg32::seed_from_u64(round_seed);

        let ground = tuning.levels[0];
        let start_x = self.screen_width * tuning.camera_lead;
        self.player = Player::new(
            Vec2::new(start_x, ground - tuning.player_size),
            tuning.player_size,
            tuning.max_double_jumps,
        );

        let second_x = start_x + 150.0;
        self.platforms.clear();
        self.platforms.push_back(Platform::new(
            start_x - 100.0,
            ground,
            200.0,
            tuning.platform_height,
            0,
        ));
        self.platforms.push_back(Platform::new(
            second_x,
            tuning.levels[1],
            100.0,
            tuning.platform_height,
            1,
        ));

        self.last_platform_x = second_x;
        self.camera_x = self.camera_target();
        self.score = 0;
        self.speed = tuning.base_speed;
        self.start_timer = tuning.start_countdown_ticks;

        log::info!(
            "Round {} reset at {}x{}",
            self.round,
            resolution.width,
            resolution.height
        );
    }

    /// Camera position that keeps the player at the lead fraction of the
    /// screen
    pub fn camera_target(&self) -> f32 {
        self.player.pos.x - self.screen_width * self.tuning.camera_lead
    }

    /// Current speed relative to the round's starting speed
    pub fn speed_ratio(&self) -> f32 {
        self.speed / self.tuning.base_speed
    }

    /// Grace countdown still running
    pub fn in_countdown(&self) -> bool {
        self.start_timer > 0
    }
}
