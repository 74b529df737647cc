//! Breaking Bricks entry point
//!
//! On the web the page drives the game through `breaking_bricks::web`.
//! Natively there is no window: the binary runs the simulation headless,
//! playing itself, and reports what happened.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;

    use breaking_bricks::consts::*;
    use breaking_bricks::persistence::{self, PersistError, SAVE_KEY};
    use breaking_bricks::platform::storage::FileStorage;
    use breaking_bricks::platform::time::{format_date, now_ms, time_seed};
    use breaking_bricks::sim::{GameEvent, GamePhase, GameState};
    use breaking_bricks::{Difficulty, HighScores, Session, Settings};

    #[derive(Parser)]
    #[command(name = "breaking-bricks", about = "Run the Breaking Bricks game.")]
    struct Cli {
        /// Log every game event, not just milestones
        #[arg(long)]
        show_all_events: bool,
        /// Seed for the run (defaults to the clock)
        #[arg(long)]
        seed: Option<u64>,
        /// Simulated seconds to play before stopping
        #[arg(long, default_value_t = 120.0)]
        seconds: f32,
        /// Easy, normal or hard (overrides saved settings)
        #[arg(long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,
        /// Where settings, saves and high scores live
        #[arg(long, default_value = ".breaking-bricks")]
        data_dir: PathBuf,
        /// Continue the saved game instead of starting fresh
        #[arg(long)]
        resume: bool,
        /// No autoplay: serve every ball and leave the paddle still
        #[arg(long)]
        manual: bool,
    }

    fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
        Difficulty::parse(s).ok_or_else(|| format!("unknown difficulty '{}'", s))
    }

    pub fn run() -> Result<(), PersistError> {
        let cli = Cli::parse();
        let mut storage = FileStorage::new(&cli.data_dir);

        let mut settings = Settings::load(&storage);
        if let Some(difficulty) = cli.difficulty {
            settings.difficulty = difficulty;
        }

        let seed = cli.seed.unwrap_or_else(time_seed);
        let mut session = Session::new(seed, settings.tuning());

        if cli.resume {
            match persistence::load::<GameState>(&storage, SAVE_KEY)? {
                Some(state) => session.load(state),
                None => log::warn!("No saved game in {}", storage.dir().display()),
            }
        }

        log::info!(
            "Breaking Bricks (headless) starting: seed {}, {} difficulty{}",
            session.state.seed,
            settings.difficulty.as_str(),
            if cli.manual { ", manual" } else { "" }
        );
        let total_ticks = (cli.seconds.max(0.0) / SIM_DT).round() as u64;
        let ticks = play(&mut session, total_ticks, cli.manual, cli.show_all_events);

        let mut high_scores = HighScores::load(&storage);
        let rank = session.record_score(&mut high_scores, now_ms());

        let state = &session.state;
        log::info!(
            "Stopped after {:.1}s: level {}, score {}, {} tokens left",
            ticks as f32 * SIM_DT,
            state.level,
            state.score,
            state.tokens.count()
        );

        if state.phase == GamePhase::GameOver {
            persistence::clear(&mut storage, SAVE_KEY)?;
        } else {
            persistence::save(&mut storage, SAVE_KEY, state)?;
            log::info!("Game saved (level {})", state.level);
        }

        if let Some(rank) = rank {
            log::info!("New high score! Rank #{}", rank);
            high_scores.save(&mut storage)?;
        }
        for (i, entry) in high_scores.entries.iter().enumerate() {
            log::info!(
                "{:>2}. {:>8}  level {:<3} {}",
                i + 1,
                entry.score,
                entry.level,
                format_date(entry.timestamp)
            );
        }

        settings.save(&mut storage)?;
        Ok(())
    }

    /// Run up to `total_ticks` ticks or until the game ends.
    /// Returns the ticks actually run.
    fn play(session: &mut Session, total_ticks: u64, manual: bool, show_all_events: bool) -> u64 {
        session.input.autoplay = !manual;
        let mut ticks = 0u64;
        while ticks < total_ticks && session.state.phase != GamePhase::GameOver {
            if manual && session.state.phase == GamePhase::Serve {
                session.input.serve = true;
            }
            ticks += u64::from(session.advance(SIM_DT));
            for event in session.drain_events() {
                report(&event, show_all_events);
            }
        }
        ticks
    }

    fn report(event: &GameEvent, show_all: bool) {
        match event {
            GameEvent::LevelCleared { level, bonus } => {
                log::info!("Level {} cleared (+{})", level, bonus)
            }
            GameEvent::BallLost { tokens_left, .. } => {
                log::info!("Ball lost, {} tokens left", tokens_left)
            }
            GameEvent::GameOver { score, level } => {
                log::info!("Game Over - score {} on level {}", score, level)
            }
            other if show_all => log::info!("{:?}", other),
            _ => {}
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use breaking_bricks::Tuning;

        #[test]
        fn test_cli_flags() {
            let cli = Cli::try_parse_from(["breaking-bricks", "--manual", "--seed", "7"]).unwrap();
            assert!(cli.manual);
            assert!(!cli.resume);
            assert_eq!(cli.seed, Some(7));
            assert!(Cli::try_parse_from(["breaking-bricks", "--difficulty", "brutal"]).is_err());
        }

        #[test]
        fn test_manual_run_serves_without_steering() {
            let mut session = Session::new(11, Tuning::default());
            let paddle = session.state.paddle.rect;
            let ticks = play(&mut session, 120 * 120, true, false);

            assert!(ticks > 0);
            assert!(!session.input.autoplay);
            assert_eq!(session.state.paddle.rect, paddle);
            assert!(session.state.time_ticks > 0);
        }

        #[test]
        fn test_autoplay_run_stops_at_tick_limit() {
            let mut session = Session::new(11, Tuning::default());
            let ticks = play(&mut session, 240, false, false);
            assert!(session.input.autoplay);
            assert_eq!(ticks, 240);
            assert_eq!(session.state.time_ticks, 240);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is breaking_bricks::web::start, this is just to satisfy the compiler
}
