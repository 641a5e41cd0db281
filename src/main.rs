//! Asteroids entry point
//!
//! On the web the library's `WebSession` is driven by the page. Natively this
//! runs a headless session flown by the demo pilot and reports the outcome.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use asteroids::sim::{Session, SessionState, autopilot};
    use asteroids::{Tuning, platform};
    use clap::Parser;

    #[derive(Parser, Debug)]
    #[command(name = "asteroids")]
    #[command(about = "Run a headless Asteroids session flown by the demo pilot")]
    struct Cli {
        /// RNG seed (defaults to the clock)
        #[arg(long)]
        seed: Option<u64>,
        /// JSON tuning file overriding the classic constants
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Frames to simulate before giving up
        #[arg(long, default_value_t = 36_000)]
        max_frames: u64,
        /// Print the final snapshot as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();

        let tuning = match &cli.tuning {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::default(),
        };
        let seed = cli.seed.unwrap_or_else(platform::clock_seed);

        let mut session = Session::with_tuning(seed, tuning).context("rejected tuning")?;
        let mut frames = 0;
        let mut last_state = session.state();

        while frames < cli.max_frames && !session.state().is_terminal() {
            let controls = autopilot(&session);
            session.apply_controls(&controls);
            session.update();
            frames += 1;

            if session.state() != last_state {
                log::debug!("Frame {}: {:?} -> {:?}", frames, last_state, session.state());
                last_state = session.state();
            }
        }

        let outcome = match session.state() {
            SessionState::Won => "cleared the field",
            SessionState::GameOver => "ran out of lives",
            SessionState::Playing | SessionState::ShipDestroyed => "ran out of frames",
        };
        log::info!(
            "Seed {} {} after {} frames: score {}, lives {}",
            seed,
            outcome,
            frames,
            session.ship().score,
            session.ship().lives
        );

        if cli.json {
            let json = session
                .snapshot()
                .to_json()
                .context("serializing final snapshot")?;
            println!("{json}");
        } else {
            println!(
                "seed={} outcome=\"{}\" frames={} score={} lives={}",
                seed,
                outcome,
                frames,
                session.ship().score,
                session.ship().lives
            );
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Asteroids (native, headless) starting...");
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the library's start function
}
