//! Snake Remastered: the classic single-player Snake, played in a terminal.
//!
//! The per-tick simulation lives in [`simulation`]; [`game`] drives it through
//! the title, play and game-over screens using the [`render::Renderer`],
//! [`input::InputSource`] and [`clock::Ticker`] collaborators. The crossterm
//! implementations of those live in [`term`] and [`clock`].

pub mod clock;
pub mod config;
pub mod game;
pub mod input;
pub mod logging;
pub mod render;
pub mod simulation;
pub mod snake;
pub mod term;

/// A position in logical window units. Grid positions are multiples of the box size.
pub type Coords = (i32, i32);
