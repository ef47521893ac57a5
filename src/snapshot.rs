//! Read-only render data
//!
//! [`RenderSnapshot`] is everything an external renderer needs to draw any
//! screen. It is rebuilt from the game after each tick and never aliases
//! mutable game state.

use serde::Serialize;

use crate::flow::{Game, GameState, MenuItem};
use crate::highscores::HighScoreEntry;
use crate::settings::SettingsItem;
use crate::sim::{Platform, Rect};
use crate::tuning::Resolution;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Same color with alpha scaled by `alpha` in [0, 1]
    pub fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, a] = self.0;
        let scaled = (f32::from(a) * alpha.clamp(0.0, 1.0)).round() as u8;
        Self([r, g, b, scaled])
    }
}

const PLAYER_COLOR: Rgba = Rgba::rgb(255, 100, 100);

/// Fill color per platform level, ground first
const LEVEL_COLORS: [Rgba; 5] = [
    Rgba::rgb(0, 255, 0),
    Rgba::rgb(0, 200, 255),
    Rgba::rgb(255, 255, 0),
    Rgba::rgb(255, 165, 0),
    Rgba::rgb(255, 0, 0),
];

fn level_color(level: usize) -> Rgba {
    LEVEL_COLORS[level % LEVEL_COLORS.len()]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    /// World-space rectangle
    pub rect: Rect,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformView {
    /// World-space rectangle
    pub rect: Rect,
    pub level: usize,
    /// Opaque level color
    pub color: Rgba,
    pub alpha: f32,
}

impl PlatformView {
    fn from_platform(platform: &Platform) -> Self {
        Self {
            rect: platform.rect(),
            level: platform.level,
            color: level_color(platform.level),
            alpha: platform.alpha,
        }
    }

    /// Level color with the fade applied
    pub fn faded_color(&self) -> Rgba {
        self.color.with_alpha(self.alpha)
    }
}

/// In-round heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    /// Current speed over base speed
    pub speed_ratio: f32,
    pub double_jumps: u8,
    /// Start-of-round grace period still running
    pub countdown: bool,
    /// Name of the bound jump key, for the "press jump" prompt
    pub jump_key: &'static str,
}

/// A list of selectable rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuView {
    pub items: Vec<String>,
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub state: GameState,
    pub resolution: Resolution,
    /// Subtract from world x to get screen x
    pub camera_x: f32,
    pub player: PlayerView,
    /// Oldest first
    pub platforms: Vec<PlatformView>,
    pub hud: Hud,
    pub menu: MenuView,
    pub settings: MenuView,
    pub name_input: String,
    pub leaderboard: Vec<HighScoreEntry>,
    /// Rank of the most recent name entry
    pub last_rank: Option<usize>,
}

impl RenderSnapshot {
    pub fn capture(game: &Game) -> Self {
        let world = game.world();
        let settings = game.settings();

        Self {
            state: game.state(),
            resolution: settings.resolution(),
            camera_x: world.camera_x,
            player: PlayerView {
                rect: world.player.rect(),
                color: PLAYER_COLOR,
            },
            platforms: world.platforms.iter().map(PlatformView::from_platform).collect(),
            hud: Hud {
                score: world.score,
                speed_ratio: world.speed_ratio(),
                double_jumps: world.player.double_jumps,
                countdown: world.in_countdown(),
                jump_key: settings.jump_key.name(),
            },
            menu: MenuView {
                items: MenuItem::ALL.iter().map(|m| m.label().to_string()).collect(),
                selected: game.menu_index(),
            },
            settings: MenuView {
                items: SettingsItem::ALL.iter().map(|s| settings.label(*s)).collect(),
                selected: game.settings_index(),
            },
            name_input: game.name_input().to_string(),
            leaderboard: game.leaderboard().entries().to_vec(),
            last_rank: game.last_rank(),
        }
    }

    /// Player rectangle in screen space
    pub fn player_screen_rect(&self) -> Rect {
        self.player.rect.offset_x(self.camera_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputSnapshot, Key};
    use crate::persistence::MemoryStore;
    use crate::tuning::Tuning;

    fn game() -> Game {
        Game::new(Tuning::default(), Box::new(MemoryStore::new()), 3).unwrap()
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(Rgba::rgb(10, 20, 30).with_alpha(0.5).0, [10, 20, 30, 128]);
        assert_eq!(Rgba::rgb(10, 20, 30).with_alpha(2.0).0[3], 255);
    }

    #[test]
    fn test_level_colors() {
        assert_eq!(level_color(0), Rgba::rgb(0, 255, 0));
        assert_eq!(level_color(4), Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn test_capture_menu() {
        let game = game();
        let snap = RenderSnapshot::capture(&game);
        assert_eq!(snap.state, GameState::Menu);
        assert_eq!(snap.menu.items[0], "START GAME");
        assert_eq!(snap.menu.selected, 0);
        assert_eq!(snap.settings.items[1], "JUMP KEY: SPACE");
        assert!(snap.leaderboard.is_empty());
    }

    #[test]
    fn test_capture_round() {
        let mut game = game();
        game.update(&InputSnapshot::press(Key::Enter));
        let snap = RenderSnapshot::capture(&game);

        assert_eq!(snap.state, GameState::Playing);
        assert_eq!(snap.platforms.len(), 2);
        assert_eq!(snap.platforms[1].color, Rgba::rgb(0, 200, 255));
        assert_eq!(snap.platforms[0].faded_color().0[3], 255);
        assert!(snap.hud.countdown);
        assert_eq!(snap.hud.speed_ratio, 1.0);
        assert_eq!(snap.hud.double_jumps, 1);
        assert_eq!(snap.player_screen_rect().x, 320.0);
        assert_eq!(snap.resolution, Resolution::new(800, 600));
    }
}
