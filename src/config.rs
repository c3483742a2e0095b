use crate::Coords;

pub const WINDOW_WIDTH: i32 = 720;
pub const WINDOW_HEIGHT: i32 = 480;
pub const BOX_SIZE: i32 = 10;

pub const BASE_TICK_RATE: u32 = 10;
pub const SPEED_STEP_SCORE: u32 = 5;
pub const SPEED_STEP_RATE: u32 = 5;

/// Dimensions and rule switches for a game.
///
/// The rule switches select between the variants of the game: the classic
/// rules allow the snake to turn straight back on itself and never speed up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Width of the play field in logical units
    pub grid_width: i32,
    /// Height of the play field in logical units
    pub grid_height: i32,
    /// Side of one grid cell in logical units
    pub box_size: i32,
    /// Ticks per second at the start of every game
    pub base_tick_rate: u32,
    /// The tick rate goes up every time the score reaches a multiple of this
    pub speed_step_score: u32,
    /// How many ticks per second each speed step adds
    pub speed_step_rate: u32,
    /// Ignore requests to turn to the exact opposite direction
    pub prevent_reversal: bool,
    /// Raise the tick rate as the score grows
    pub speed_up: bool,
    /// Quit right away on a crash instead of showing the game over screen
    pub exit_on_crash: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::enhanced()
    }
}

impl GameConfig {
    /// The first version of the game: free turning, constant speed.
    pub fn classic() -> Self {
        Self {
            grid_width: WINDOW_WIDTH,
            grid_height: WINDOW_HEIGHT,
            box_size: BOX_SIZE,
            base_tick_rate: BASE_TICK_RATE,
            speed_step_score: SPEED_STEP_SCORE,
            speed_step_rate: SPEED_STEP_RATE,
            prevent_reversal: false,
            speed_up: false,
            exit_on_crash: false,
        }
    }

    pub fn no_reverse() -> Self {
        Self {
            prevent_reversal: true,
            ..Self::classic()
        }
    }

    pub fn enhanced() -> Self {
        Self {
            prevent_reversal: true,
            speed_up: true,
            ..Self::classic()
        }
    }

    /// Number of grid cells across.
    pub fn columns(&self) -> i32 {
        self.grid_width / self.box_size
    }

    /// Number of grid cells down.
    pub fn rows(&self) -> i32 {
        self.grid_height / self.box_size
    }

    pub fn center(&self) -> Coords {
        (self.grid_width / 2, self.grid_height / 2)
    }

    pub fn contains(&self, pos: Coords) -> bool {
        (0..self.grid_width).contains(&pos.0) && (0..self.grid_height).contains(&pos.1)
    }
}
