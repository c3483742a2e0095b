use std::time::Duration;

use anyhow::Result;
use log::info;
use rand::Rng;

use crate::clock::Ticker;
use crate::config::GameConfig;
use crate::input::InputSource;
use crate::render::{Prompt, Renderer, Rgb, GRAY, RED, WHITE};
use crate::simulation::SnakeSimulation;

pub const TITLE: &str = "Snake Remastered";
pub const PLAY_PROMPT: &str = "Click Anywhere to Play!";
pub const REPLAY_PROMPT: &str = "Click to Play Again!";

const TITLE_FLASH_INTERVAL: Duration = Duration::from_millis(500);
// Vertical distance of the headline and the prompt from the window centre
const TEXT_OFFSET: i32 = 100;

/// Which screen the session is on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Title,
    Playing,
    GameOver(u32),
    Exit,
}

/// Runs games back to back: title screen, play, game over, play again.
pub struct GameSession<D, I, T, R> {
    config: GameConfig,
    renderer: D,
    input: I,
    ticker: T,
    sim: SnakeSimulation<R>,
    screen: Screen,
}

impl<D: Renderer, I: InputSource, T: Ticker, R: Rng> GameSession<D, I, T, R> {
    pub fn new(config: GameConfig, renderer: D, input: I, ticker: T, rng: R) -> Self {
        let sim = SnakeSimulation::with_rng(config.clone(), rng);
        GameSession { config, renderer, input, ticker, sim, screen: Screen::Title }
    }

    /// Runs until the player quits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.screen = match self.screen {
                Screen::Title => self.show_title()?,
                Screen::Playing => self.play()?,
                Screen::GameOver(score) => self.show_game_over(score)?,
                Screen::Exit => break,
            };
        }

        info!("Thank you for playing!");
        Ok(())
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn renderer(&self) -> &D {
        &self.renderer
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    ///////////////////////////////////////////////////////////////////////////

    fn show_title(&mut self) -> Result<Screen> {
        let mut bright = true;

        loop {
            let title_color = if bright { WHITE } else { GRAY };
            self.renderer.clear_frame();
            self.draw_centered(TITLE, title_color, -TEXT_OFFSET);
            self.draw_centered(PLAY_PROMPT, WHITE, TEXT_OFFSET);
            self.renderer.present()?;
            bright = !bright;

            match self.renderer.poll_click_or_quit(TITLE_FLASH_INTERVAL)? {
                Some(Prompt::Click) => return Ok(Screen::Playing),
                Some(Prompt::Quit) => return Ok(Screen::Exit),
                None => {}
            }
        }
    }

    fn play(&mut self) -> Result<Screen> {
        self.sim.initialize();
        self.input.reset();
        info!("New game");

        loop {
            if self.input.poll_quit()? {
                return Ok(Screen::Exit);
            }

            let keys = self.input.sample_keys()?;
            let outcome = self.sim.step(keys);

            if outcome.is_crash() {
                let score = self.sim.score();
                info!("Game over ({:?}), score {}", outcome, score);

                return Ok(if self.config.exit_on_crash { Screen::Exit } else { Screen::GameOver(score) });
            }

            self.draw_board()?;
            self.ticker.set_rate(self.sim.tick_rate());
            self.ticker.wait_for_next_tick();
        }
    }

    fn show_game_over(&mut self, score: u32) -> Result<Screen> {
        self.renderer.clear_frame();
        self.draw_centered(&format!("Game Over! Score: {}", score), WHITE, -TEXT_OFFSET);
        self.draw_centered(REPLAY_PROMPT, WHITE, TEXT_OFFSET);
        self.renderer.present()?;

        match self.renderer.wait_for_click_or_quit()? {
            Prompt::Click => Ok(Screen::Playing),
            Prompt::Quit => Ok(Screen::Exit),
        }
    }

    fn draw_board(&mut self) -> Result<()> {
        let size = self.config.box_size;

        self.renderer.clear_frame();
        self.renderer.draw_rect(self.sim.food(), RED, size);
        for cell in self.sim.body() {
            self.renderer.draw_rect(*cell, GRAY, size);
        }
        self.renderer.draw_text(&format!("Score: {}", self.sim.score()), WHITE, (0, 0));
        self.renderer.present()
    }

    fn draw_centered(&mut self, text: &str, color: Rgb, dy: i32) {
        let (cx, cy) = self.config.center();
        let width = text.chars().count() as i32 * self.config.box_size;
        self.renderer.draw_text(text, color, (cx - width / 2, cy + dy));
    }
}
