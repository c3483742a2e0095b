use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::input::{resolve_direction, KeyState};
use crate::snake::{Direction, Snake};
use crate::Coords;

/// What a single step of the simulation led to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Running,
    OutOfBounds,
    SelfCollision,
}

impl Outcome {
    pub fn is_crash(self) -> bool {
        !matches!(self, Outcome::Running)
    }
}

/// One game of Snake: the snake, the food, the score and the current speed.
///
/// Food placement draws from the injected RNG, so a seeded generator makes a
/// whole game reproducible.
pub struct SnakeSimulation<R> {
    config: GameConfig,
    rng: R,
    snake: Snake,
    food: Coords,
    score: u32,
    tick_rate: u32,
    // Highest score that has already raised the tick rate
    rewarded_score: u32,
}

impl<R: Rng> SnakeSimulation<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let mut sim = SnakeSimulation {
            snake: Snake::new(config.center()),
            food: (0, 0),
            score: 0,
            tick_rate: config.base_tick_rate,
            rewarded_score: 0,
            config,
            rng,
        };
        sim.initialize();
        sim
    }

    /// Starts a fresh game: head in the middle of the grid, standing still, no
    /// body, new food and the base speed.
    pub fn initialize(&mut self) {
        self.snake = Snake::new(self.config.center());
        self.food = self.spawn_food();
        self.score = 0;
        self.tick_rate = self.config.base_tick_rate;
        self.rewarded_score = 0;

        debug!("New game: head at {:?}, food at {:?}", self.snake.head(), self.food);
    }

    /// Advances the game by one tick.
    pub fn step(&mut self, keys: KeyState) -> Outcome {
        if let Some(requested) = resolve_direction(keys) {
            self.snake.steer(requested, self.config.prevent_reversal);
        }

        // The bounds check looks at the head from the previous tick, so a snake
        // that just left the grid still gets one more frame.
        if !self.config.contains(self.snake.head()) {
            return Outcome::OutOfBounds;
        }

        self.snake.advance(self.config.box_size);
        self.snake.truncate(self.score as usize + 1);

        if self.snake.bites_itself() {
            return Outcome::SelfCollision;
        }

        if self.snake.head() == self.food {
            self.eat();
        }

        Outcome::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn head(&self) -> Coords {
        self.snake.head()
    }

    pub fn body(&self) -> &[Coords] {
        self.snake.body()
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    /// Movement per tick in logical units.
    pub fn velocity(&self) -> Coords {
        self.snake.direction().velocity(self.config.box_size)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    ///////////////////////////////////////////////////////////////////////////

    fn eat(&mut self) {
        self.score += 1;
        // Not checked against the body: food may land under the snake
        self.food = self.spawn_food();
        info!("Score: {}", self.score);

        if self.config.speed_up {
            self.speed_up();
        }
    }

    fn speed_up(&mut self) {
        let step = self.config.speed_step_score;
        if step == 0 || self.score == 0 || self.score % step != 0 {
            return;
        }

        if self.score > self.rewarded_score {
            self.rewarded_score = self.score;
            self.tick_rate += self.config.speed_step_rate;
            info!("Speed up: {} ticks per second", self.tick_rate);
        }
    }

    fn spawn_food(&mut self) -> Coords {
        let size = self.config.box_size;
        let x = self.rng.gen_range(1..self.config.columns()) * size;
        let y = self.rng.gen_range(1..self.config.rows()) * size;
        (x, y)
    }
}
