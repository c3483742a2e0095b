use std::{path::Path, process::exit};

use anyhow::{Context, Result};
use log::{error, info};

use snake_remastered::clock::FrameClock;
use snake_remastered::config::GameConfig;
use snake_remastered::game::GameSession;
use snake_remastered::logging;
use snake_remastered::term::{TermInput, TermRenderer};

// The terminal shows the game, so logs go to a file
const LOG_FILE: &str = "snake_remastered.log";

fn main() {
    if let Err(err) = run() {
        error!("{:#}", err);
        eprintln!("{:#}", err);
        exit(1);
    }

    println!("Thank you for playing!");
}

fn run() -> Result<()> {
    logging::init(Path::new(LOG_FILE));

    let config = GameConfig::default();
    let renderer = TermRenderer::new(&config).context("Error while initializing game.")?;
    info!("Game initialized.");

    let input = TermInput::new(renderer.reports_key_releases());
    let ticker = FrameClock::new(config.base_tick_rate);

    // The session owns the terminal; dropping it puts the terminal back
    let mut game = GameSession::new(config, renderer, input, ticker, rand::thread_rng());
    game.run()
}
