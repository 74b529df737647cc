//! Fixed-timestep runner
//!
//! Hosts call [`Session::advance`] once per rendered frame with the real
//! frame time. The session turns that into whole simulation ticks.

use crate::consts::*;
use crate::highscores::HighScores;
use crate::sim::{GameEvent, GameState, TickInput, generate_wall, tick};
use crate::tuning::Tuning;

pub struct Session {
    pub state: GameState,
    /// Input applied to every tick until the host changes it
    pub input: TickInput,
    accumulator: f32,
    /// This run's score is already on the board
    recorded: bool,
}

impl Session {
    /// Start a fresh game with its first wall built
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: new_game(seed, tuning),
            input: TickInput::default(),
            accumulator: 0.0,
            recorded: false,
        }
    }

    /// Run as many fixed ticks as `frame_dt` seconds covers.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.clear_one_shots();
        }

        // Drop time we could not catch up on rather than snowballing
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        substeps
    }

    /// Reset game state for restart, keeping the current balance
    pub fn restart(&mut self, seed: u64) {
        let tuning = self.state.tuning.clone();
        self.restart_with(seed, tuning);
    }

    pub fn restart_with(&mut self, seed: u64, tuning: Tuning) {
        self.state = new_game(seed, tuning);
        self.recorded = false;
        self.reset_clock();
        log::info!("Game restarted with seed: {}", seed);
    }

    /// Continue from a saved game
    pub fn load(&mut self, mut state: GameState) {
        state.normalize_order();
        self.state = state;
        self.recorded = false;
        self.reset_clock();
        log::info!("Loaded saved game at level {}", self.state.level);
    }

    /// Put this run on the leaderboard. Only the first call per run counts;
    /// returns the rank when the score placed.
    pub fn record_score(&mut self, high_scores: &mut HighScores, timestamp: f64) -> Option<usize> {
        if self.recorded {
            return None;
        }
        self.recorded = true;
        high_scores.add_score(self.state.score, self.state.level, timestamp)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.take_events()
    }

    fn reset_clock(&mut self) {
        self.accumulator = 0.0;
        self.input = TickInput::default();
    }
}

fn new_game(seed: u64, tuning: Tuning) -> GameState {
    let mut state = GameState::with_tuning(seed, tuning);
    generate_wall(&mut state);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    #[test]
    fn test_new_session_has_wall() {
        let session = Session::new(1, Tuning::default());
        assert_eq!(session.state.bricks.len(), 50);
        assert_eq!(session.state.phase, GamePhase::Serve);
    }

    #[test]
    fn test_advance_runs_whole_ticks() {
        let mut session = Session::new(1, Tuning::default());
        assert_eq!(session.advance(SIM_DT * 0.5), 0);
        assert_eq!(session.advance(SIM_DT * 0.6), 1);
        assert_eq!(session.state.time_ticks, 1);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut session = Session::new(1, Tuning::default());
        // A long stall is clamped and capped
        assert_eq!(session.advance(5.0), MAX_SUBSTEPS);
        assert!(session.advance(0.0) <= 1);
    }

    #[test]
    fn test_one_shot_inputs_fire_once() {
        let mut session = Session::new(3, Tuning::default());
        session.input.serve = true;
        session.input.pause = true;
        session.advance(SIM_DT * 2.5);
        assert!(!session.input.serve);
        assert!(!session.input.pause);
        // Paused on the first tick, and the second tick did not unpause
        assert_eq!(session.state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut session = Session::new(3, Tuning::default());
        session.input.autoplay = true;
        for _ in 0..120 {
            session.advance(1.0 / 60.0);
        }
        assert!(session.state.time_ticks > 0);

        session.restart(4);
        assert_eq!(session.state.time_ticks, 0);
        assert_eq!(session.state.seed, 4);
        assert!(!session.input.autoplay);
    }

    #[test]
    fn test_score_recorded_once_per_run() {
        let mut session = Session::new(5, Tuning::default());
        let mut scores = HighScores::new();
        session.state.score = 500;

        assert_eq!(session.record_score(&mut scores, 1.0), Some(1));
        assert_eq!(session.record_score(&mut scores, 2.0), None);
        assert_eq!(scores.entries.len(), 1);

        session.restart(6);
        session.state.score = 300;
        assert_eq!(session.record_score(&mut scores, 3.0), Some(2));

        let saved = session.state.clone();
        session.load(saved);
        assert_eq!(session.record_score(&mut scores, 4.0), Some(3));
        assert_eq!(scores.entries.len(), 3);
    }
}
