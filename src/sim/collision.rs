//! Axis-aligned collision between the player and platforms
//!
//! Platforms are one-way: the player lands on a top edge only while falling
//! or resting, and passes through from below.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Platform, Player};

/// Axis-aligned rectangle, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Horizontal extents overlap (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.right() > other.x && self.x < other.right()
    }

    /// Full overlap test (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.bottom() > other.y && self.y < other.bottom()
    }

    /// Same rectangle shifted by `-offset` along x (world → screen)
    pub fn offset_x(&self, offset: f32) -> Rect {
        Rect::new(self.x - offset, self.y, self.w, self.h)
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Would the player land on `platform` this tick?
///
/// True when the player overlaps the platform horizontally, its bottom edge
/// is within `landing_band` below the platform top, and it is not moving
/// upward.
pub fn is_landing(player: &Player, platform: &Platform, landing_band: f32) -> bool {
    let bottom = player.bottom();
    let top = platform.top();
    player.vel.y >= 0.0
        && bottom >= top
        && bottom <= top + landing_band
        && player.rect().overlaps_x(&platform.rect())
}

/// Index of the first platform (in sequence order) the player lands on
pub fn find_landing<'a, I>(player: &Player, platforms: I, landing_band: f32) -> Option<usize>
where
    I: IntoIterator<Item = &'a Platform>,
{
    platforms
        .into_iter()
        .position(|p| is_landing(player, p, landing_band))
}

/// Snap the player onto a platform top and restore its jumps
pub fn land_on(player: &mut Player, platform: &Platform, max_double_jumps: u8) {
    player.pos.y = platform.top() - player.size;
    player.vel.y = 0.0;
    player.airborne = false;
    player.double_jumps = max_double_jumps;
}
