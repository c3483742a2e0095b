use std::time::Duration;

use anyhow::Result;

use crate::Coords;

pub type Rgb = (u8, u8, u8);

pub const BLACK: Rgb = (0, 0, 0);
pub const WHITE: Rgb = (255, 255, 255);
pub const GRAY: Rgb = (192, 192, 192);
pub const RED: Rgb = (255, 0, 0);

/// How often a blocking wait checks for clicks.
pub const CLICK_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What ended a wait on one of the click-to-continue screens.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    Click,
    Quit,
}

/// Draws frames in logical window units.
///
/// Drawing calls only build up the next frame; nothing is visible until
/// [`Renderer::present`].
pub trait Renderer {
    /// Starts a new, all-black frame.
    fn clear_frame(&mut self);

    /// Fills the `size` x `size` square whose top-left corner is `cell`.
    fn draw_rect(&mut self, cell: Coords, color: Rgb, size: i32);

    /// Writes `text` starting at `position`. One character is one box wide.
    fn draw_text(&mut self, text: &str, color: Rgb, position: Coords);

    fn present(&mut self) -> Result<()>;

    /// Waits up to `timeout` for a click or a quit request.
    fn poll_click_or_quit(&mut self, timeout: Duration) -> Result<Option<Prompt>>;

    /// Blocks until the player clicks or asks to quit.
    fn wait_for_click_or_quit(&mut self) -> Result<Prompt> {
        loop {
            if let Some(prompt) = self.poll_click_or_quit(CLICK_POLL_INTERVAL)? {
                return Ok(prompt);
            }
        }
    }
}
