//! Game flow state machine
//!
//! [`Game`] owns the world, settings and leaderboard and runs exactly one
//! state's update per tick. A transition made during a tick only takes
//! effect when the next tick is dispatched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::TuningError;
use crate::highscores::LeaderboardStore;
use crate::input::{Action, InputSnapshot};
use crate::persistence::ScoreStore;
use crate::settings::{Settings, SettingsItem};
use crate::sim::{self, PlayOutcome, TickInput, World};
use crate::tuning::Tuning;

/// Active screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Menu,
    Settings,
    Playing,
    Paused,
    GameOver,
    NameInput,
    Leaderboard,
}

/// Rows of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    Start,
    Leaderboard,
    Settings,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Start,
        MenuItem::Leaderboard,
        MenuItem::Settings,
        MenuItem::Exit,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Start => "START GAME",
            MenuItem::Leaderboard => "LEADERBOARD",
            MenuItem::Settings => "SETTINGS",
            MenuItem::Exit => "EXIT",
        }
    }
}

/// Whether the host should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Cursor movement with wraparound over `count` rows
fn navigate(index: usize, count: usize, input: &InputSnapshot) -> usize {
    let mut index = index % count;
    if input.action(Action::NavigateDown) {
        index = (index + 1) % count;
    }
    if input.action(Action::NavigateUp) {
        index = (index + count - 1) % count;
    }
    index
}

/// The whole game: world, settings, leaderboard and the active state
#[derive(Debug)]
pub struct Game {
    tuning: Arc<Tuning>,
    state: GameState,
    world: World,
    settings: Settings,
    leaderboard: LeaderboardStore,
    menu_index: usize,
    settings_index: usize,
    name_input: String,
    last_rank: Option<usize>,
}

impl Game {
    /// Default name offered on the first name entry
    pub const DEFAULT_NAME: &'static str = "Player";

    /// Build a game in the Menu state, loading saved high scores from `store`
    pub fn new(tuning: Tuning, store: Box<dyn ScoreStore>, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let tuning = Arc::new(tuning);
        let settings = Settings::new(&tuning.resolutions);
        let world = World::new(Arc::clone(&tuning), settings.resolution(), seed);

        Ok(Self {
            tuning,
            state: GameState::Menu,
            world,
            settings,
            leaderboard: LeaderboardStore::load(store),
            menu_index: 0,
            settings_index: 0,
            name_input: Self::DEFAULT_NAME.to_string(),
            last_rank: None,
        })
    }

    /// Run the active state's update for one tick
    pub fn update(&mut self, input: &InputSnapshot) -> Flow {
        match self.state {
            GameState::Menu => return self.update_menu(input),
            GameState::Settings => self.update_settings(input),
            GameState::Playing => self.update_playing(input),
            GameState::Paused => self.update_paused(input),
            GameState::GameOver => self.update_game_over(input),
            GameState::NameInput => self.update_name_input(input),
            GameState::Leaderboard => self.update_leaderboard(input),
        }
        Flow::Continue
    }

    fn set_state(&mut self, next: GameState) {
        if self.state != next {
            log::debug!("{:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn start_round(&mut self) {
        self.world.reset(self.settings.resolution());
        self.set_state(GameState::Playing);
    }

    fn update_menu(&mut self, input: &InputSnapshot) -> Flow {
        self.menu_index = navigate(self.menu_index, MenuItem::ALL.len(), input);

        if input.action(Action::Confirm) {
            match MenuItem::from_index(self.menu_index) {
                MenuItem::Start => self.start_round(),
                MenuItem::Leaderboard => self.set_state(GameState::Leaderboard),
                MenuItem::Settings => {
                    self.settings_index = 0;
                    self.set_state(GameState::Settings);
                }
                MenuItem::Exit => return Flow::Exit,
            }
            return Flow::Continue;
        }

        if input.action(Action::Cancel) {
            return Flow::Exit;
        }
        Flow::Continue
    }

    fn update_settings(&mut self, input: &InputSnapshot) {
        self.settings_index = navigate(self.settings_index, SettingsItem::ALL.len(), input);

        if input.action(Action::Confirm) {
            match SettingsItem::from_index(self.settings_index) {
                SettingsItem::Resolution => self.settings.cycle_resolution(&self.tuning.resolutions),
                SettingsItem::JumpKey => {
                    if let Some(key) = input.first_bindable_held() {
                        self.settings.rebind_jump(key);
                    }
                }
                SettingsItem::Back => {
                    self.set_state(GameState::Menu);
                    return;
                }
            }
        }

        if input.action(Action::Cancel) {
            self.set_state(GameState::Menu);
        }
    }

    fn update_playing(&mut self, input: &InputSnapshot) {
        if input.action(Action::Cancel) {
            self.set_state(GameState::Paused);
            return;
        }

        let tick_input = TickInput {
            jump: input.is_just_pressed(self.settings.jump_key),
        };
        if sim::tick(&mut self.world, &tick_input) == PlayOutcome::Fell {
            self.set_state(GameState::NameInput);
        }
    }

    fn update_paused(&mut self, input: &InputSnapshot) {
        if input.action(Action::Cancel) {
            self.set_state(GameState::Playing);
        } else if input.action(Action::ToMenu) {
            self.set_state(GameState::Menu);
        }
    }

    fn update_name_input(&mut self, input: &InputSnapshot) {
        if input.action(Action::Backspace) {
            self.name_input.pop();
        }

        if input.action(Action::Confirm) {
            if !self.name_input.is_empty() {
                let score = self.world.score;
                self.last_rank = self.leaderboard.insert(&self.name_input, score);
                log::info!(
                    "{} scored {} (rank {:?})",
                    self.name_input,
                    score,
                    self.last_rank
                );
                self.set_state(GameState::GameOver);
            }
            return;
        }

        let room = self
            .tuning
            .max_name_len
            .saturating_sub(self.name_input.chars().count());
        self.name_input
            .extend(input.text.chars().filter(|c| !c.is_control()).take(room));
    }

    fn update_game_over(&mut self, input: &InputSnapshot) {
        if input.action(Action::Restart) {
            self.start_round();
        } else if input.action(Action::Cancel) {
            self.set_state(GameState::Menu);
        }
    }

    fn update_leaderboard(&mut self, input: &InputSnapshot) {
        if input.action(Action::Cancel) || input.action(Action::Confirm) {
            self.set_state(GameState::Menu);
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn leaderboard(&self) -> &LeaderboardStore {
        &self.leaderboard
    }

    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    pub fn settings_index(&self) -> usize {
        self.settings_index
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    /// Rank achieved by the most recent name entry
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: GameState) {
        self.state = state;
    }
}
