//! Browser bindings
//!
//! The page owns the canvas, the keyboard and the audio. Each animation
//! frame it feeds input in, calls [`WebGame::frame`], and reads the state
//! and events back out as JSON to draw and play sounds from.

use wasm_bindgen::prelude::*;

use crate::highscores::HighScores;
use crate::persistence::{self, SAVE_KEY, Storage};
use crate::platform::storage::{LocalStorage, MemoryStorage};
use crate::platform::time::{now_ms, seed_or_clock, time_seed};
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Breaking Bricks starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    settings: Settings,
    storage: Box<dyn Storage>,
    high_scores: HighScores,
    last_phase: GamePhase,
}

#[wasm_bindgen]
impl WebGame {
    /// New game using saved settings. Pass a seed to replay a run,
    /// or nothing to seed from the clock.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> WebGame {
        let storage: Box<dyn Storage> = match LocalStorage::open() {
            Some(s) => Box::new(s),
            None => {
                log::warn!("LocalStorage unavailable, nothing will be saved");
                Box::new(MemoryStorage::default())
            }
        };
        let settings = Settings::load(storage.as_ref());
        let high_scores = HighScores::load(storage.as_ref());
        let seed = seed_or_clock(seed);
        let mut session = Session::new(seed, settings.tuning());
        session.input.autoplay = settings.autoplay;
        log::info!("Game initialized with seed: {}", seed);

        WebGame {
            session,
            settings,
            storage,
            high_scores,
            last_phase: GamePhase::Serve,
        }
    }

    /// Keyboard/gamepad paddle direction in [-1, 1]
    pub fn set_axis(&mut self, axis: f32) {
        self.session.input.paddle_axis = self.settings.scale_axis(axis);
        self.session.input.target_x = None;
    }

    /// Mouse/touch x in field pixels, or a negative value to release
    pub fn set_target_x(&mut self, x: f32) {
        self.session.input.target_x = if x >= 0.0 { Some(x) } else { None };
    }

    pub fn serve(&mut self) {
        self.session.input.serve = true;
    }

    pub fn pause(&mut self) {
        self.session.input.pause = true;
    }

    /// Page lost focus or visibility
    pub fn blur(&mut self) {
        let phase = self.session.state.phase;
        if self.settings.pause_on_blur && matches!(phase, GamePhase::Playing | GamePhase::Serve) {
            self.session.input.pause = true;
            log::info!("Auto-paused (window blur)");
        }
    }

    pub fn set_autoplay(&mut self, on: bool) {
        self.settings.autoplay = on;
        self.session.input.autoplay = on;
        self.save_settings();
    }

    /// Advance by the real frame time. Returns the number of ticks run.
    pub fn frame(&mut self, dt_ms: f64) -> u32 {
        let ticks = self.session.advance((dt_ms / 1000.0) as f32);

        let phase = self.session.state.phase;
        if phase != self.last_phase {
            // Auto-save on reaching a safe point, record the run when it ends
            match phase {
                GamePhase::LevelCleared | GamePhase::Paused => self.save_game(),
                GamePhase::GameOver => {
                    self.record_high_score();
                    self.clear_saved_game();
                }
                _ => {}
            }
            self.last_phase = phase;
        }
        ticks
    }

    pub fn state_json(&self) -> String {
        serde_json::to_string(&self.session.state).unwrap_or_default()
    }

    /// Events since the last call, as a JSON array
    pub fn events_json(&mut self) -> String {
        serde_json::to_string(&self.session.drain_events()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn high_scores_json(&self) -> String {
        serde_json::to_string(&self.high_scores).unwrap_or_default()
    }

    pub fn has_saved_game(&self) -> bool {
        matches!(self.storage.get(SAVE_KEY), Ok(Some(_)))
    }

    pub fn save_game(&mut self) {
        match persistence::save(self.storage.as_mut(), SAVE_KEY, &self.session.state) {
            Ok(()) => log::info!("Game saved (level {})", self.session.state.level),
            Err(e) => log::warn!("Save failed: {}", e),
        }
    }

    /// Load the saved game. Returns false when there is none or it's unreadable.
    pub fn continue_game(&mut self) -> bool {
        match persistence::load::<GameState>(self.storage.as_ref(), SAVE_KEY) {
            Ok(Some(state)) => {
                self.session.load(state);
                self.session.input.autoplay = self.settings.autoplay;
                self.last_phase = self.session.state.phase;
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::warn!("Saved game unreadable: {}", e);
                false
            }
        }
    }

    pub fn restart(&mut self) {
        self.clear_saved_game();
        self.session.restart_with(time_seed(), self.settings.tuning());
        self.session.input.autoplay = self.settings.autoplay;
        self.last_phase = GamePhase::Serve;
    }

    /// Rank achieved by the current score, or 0 when it doesn't place or
    /// this run was already recorded (`frame` records it on game over)
    pub fn record_high_score(&mut self) -> u32 {
        let Some(rank) = self.session.record_score(&mut self.high_scores, now_ms()) else {
            return 0;
        };
        if let Err(e) = self.high_scores.save(self.storage.as_mut()) {
            log::warn!("High score not saved: {}", e);
        }
        rank as u32
    }
}

impl WebGame {
    fn clear_saved_game(&mut self) {
        if let Err(e) = persistence::clear(self.storage.as_mut(), SAVE_KEY) {
            log::warn!("Could not clear saved game: {}", e);
        }
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(self.storage.as_mut()) {
            log::warn!("Settings not saved: {}", e);
        }
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new(None)
    }
}
