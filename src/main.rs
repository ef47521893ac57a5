//! Ledge Runner headless demo
//!
//! Plays one round with the autopilot, enters a name, records the score in
//! the default high-score store and returns to the menu. A `tuning.json` in
//! the working directory overrides the default balance.

use std::time::{SystemTime, UNIX_EPOCH};

use ledge_runner::autopilot;
use ledge_runner::consts::SIM_DT;
use ledge_runner::frame::{FixedStep, render_data};
use ledge_runner::persistence;
use ledge_runner::{Flow, Game, GameState, InputSnapshot, Key, Tuning};

const TUNING_PATH: &str = "tuning.json";
const DEMO_NAME: &str = "AUTO";
/// Give up after this many frames (about ten minutes at 60 fps)
const MAX_FRAMES: u32 = 60 * 60 * 10;

fn load_tuning() -> Tuning {
    match std::fs::read_to_string(TUNING_PATH) {
        Ok(json) => match Tuning::from_json_str(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", TUNING_PATH);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", TUNING_PATH, e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    }
}

/// Scripted key presses standing in for a player at the keyboard
#[derive(Default)]
struct DemoScript {
    left_round: bool,
}

impl DemoScript {
    fn input_for(&mut self, game: &Game) -> InputSnapshot {
        match game.state() {
            GameState::Menu if !self.left_round => InputSnapshot::press(Key::Enter),
            GameState::Menu => InputSnapshot::press(Key::Escape),
            GameState::Playing => {
                if autopilot::wants_jump(game.world()) {
                    InputSnapshot::press(game.settings().jump_key)
                } else {
                    InputSnapshot::new()
                }
            }
            // Clear the suggested name, type ours, confirm
            GameState::NameInput => match game.name_input() {
                DEMO_NAME => InputSnapshot::press(Key::Enter),
                "" => InputSnapshot::typed(DEMO_NAME),
                _ => InputSnapshot::press(Key::Backspace),
            },
            GameState::GameOver => {
                self.left_round = true;
                InputSnapshot::press(Key::Escape)
            }
            GameState::Settings | GameState::Leaderboard | GameState::Paused => {
                InputSnapshot::press(Key::Escape)
            }
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let mut game = match Game::new(load_tuning(), persistence::default_store(), seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            std::process::exit(1);
        }
    };

    let mut clock = FixedStep::new();
    let mut script = DemoScript::default();

    for frame in 0..MAX_FRAMES {
        let input = script.input_for(&game);
        let report = clock.advance(&mut game, SIM_DT, &input);
        if report.flow == Flow::Exit {
            log::info!("Exited after {} frames", frame + 1);
            break;
        }
    }

    let snapshot = render_data(&game);
    log::info!(
        "Final score {} at {:.1}x speed",
        snapshot.hud.score,
        snapshot.hud.speed_ratio
    );
    for (i, entry) in snapshot.leaderboard.iter().enumerate() {
        log::info!("{:>2}. {:<16} {}", i + 1, entry.name, entry.score);
    }
}
