//! Player-selectable settings
//!
//! The core tracks the chosen resolution only for its own coordinate math;
//! actually resizing the window is the host's job.

use serde::{Deserialize, Serialize};

use crate::input::Key;
use crate::tuning::Resolution;

/// Rows of the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsItem {
    Resolution,
    JumpKey,
    Back,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 3] = [
        SettingsItem::Resolution,
        SettingsItem::JumpKey,
        SettingsItem::Back,
    ];

    /// Item at a (wrapped) cursor position
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Index into the resolution list
    pub resolution_idx: usize,
    /// Key that triggers jumps
    pub jump_key: Key,
    /// Selected resolution, cached from the list
    resolution: Resolution,
}

impl Settings {
    /// Settings using the first listed resolution and Space to jump
    pub fn new(resolutions: &[Resolution]) -> Self {
        let resolution = resolutions
            .first()
            .copied()
            .unwrap_or(Resolution::new(800, 600));
        Self {
            resolution_idx: 0,
            jump_key: Key::Space,
            resolution,
        }
    }

    pub fn screen_width(&self) -> f32 {
        self.resolution.width as f32
    }

    pub fn screen_height(&self) -> f32 {
        self.resolution.height as f32
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Advance to the next resolution, wrapping at the end of the list
    pub fn cycle_resolution(&mut self, resolutions: &[Resolution]) {
        if resolutions.is_empty() {
            return;
        }
        self.resolution_idx = (self.resolution_idx + 1) % resolutions.len();
        self.resolution = resolutions[self.resolution_idx];
        log::info!("Resolution set to {}", self.resolution.label());
    }

    /// Bind a new jump key
    pub fn rebind_jump(&mut self, key: Key) {
        if self.jump_key != key {
            log::info!("Jump key bound to {}", key.name());
        }
        self.jump_key = key;
    }

    /// Display label for a settings row
    pub fn label(&self, item: SettingsItem) -> String {
        match item {
            SettingsItem::Resolution => format!("RESOLUTION: {}", self.resolution.label()),
            SettingsItem::JumpKey => format!("JUMP KEY: {}", self.jump_key.name()),
            SettingsItem::Back => "BACK TO MENU".to_string(),
        }
    }
}
