use std::io::{stdout, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, KeyboardEnhancementFlags, MouseEventKind, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};
use log::{info, warn};

use crate::config::GameConfig;
use crate::input::{InputSource, KeyState};
use crate::render::{Prompt, Renderer, Rgb, BLACK};
use crate::Coords;

// Upper half of a character cell; the lower half shows the background colour
const PIXEL_CHAR: char = '▀';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Glyph {
    ch: char,
    fg: Rgb,
    bg: Rgb,
}

/// The frame being drawn: one colour per grid box, plus a text layer on top.
///
/// Two boxes stacked vertically share one terminal character, so the text layer
/// has half as many rows as the box grid.
struct Canvas {
    columns: u16,
    pixel_rows: u16,
    box_size: i32,
    pixels: Vec<Rgb>,
    text: Vec<Option<(char, Rgb)>>,
}

impl Canvas {
    fn new(config: &GameConfig) -> Self {
        let columns = config.columns().max(0) as u16;
        let pixel_rows = config.rows().max(0) as u16;
        let text_rows = (pixel_rows + 1) / 2;

        Canvas {
            columns,
            pixel_rows,
            box_size: config.box_size,
            pixels: vec![BLACK; columns as usize * pixel_rows as usize],
            text: vec![None; columns as usize * text_rows as usize],
        }
    }

    fn text_rows(&self) -> u16 {
        (self.pixel_rows + 1) / 2
    }

    fn clear(&mut self) {
        self.pixels.fill(BLACK);
        self.text.fill(None);
    }

    fn fill(&mut self, cell: Coords, color: Rgb, size: i32) {
        let boxes = (size / self.box_size).max(1);
        let (left, top) = (cell.0.div_euclid(self.box_size), cell.1.div_euclid(self.box_size));

        for y in top..top + boxes {
            for x in left..left + boxes {
                if let Some(idx) = self.pixel_index(x, y) {
                    self.pixels[idx] = color;
                }
            }
        }
    }

    fn write(&mut self, text: &str, color: Rgb, position: Coords) {
        let row = position.1.div_euclid(self.box_size * 2);
        let left = position.0.div_euclid(self.box_size);
        if row < 0 || row >= self.text_rows() as i32 {
            return;
        }

        for (i, ch) in text.chars().enumerate() {
            let col = left + i as i32;
            if (0..self.columns as i32).contains(&col) {
                self.text[row as usize * self.columns as usize + col as usize] = Some((ch, color));
            }
        }
    }

    fn glyph(&self, col: u16, row: u16) -> Glyph {
        let cols = self.columns as usize;
        if let Some((ch, fg)) = self.text[row as usize * cols + col as usize] {
            return Glyph { ch, fg, bg: BLACK };
        }

        let upper = self.pixels[2 * row as usize * cols + col as usize];
        let lower = self.pixel_index(col as i32, 2 * row as i32 + 1).map_or(BLACK, |idx| self.pixels[idx]);
        Glyph { ch: PIXEL_CHAR, fg: upper, bg: lower }
    }

    fn pixel_index(&self, x: i32, y: i32) -> Option<usize> {
        if (0..self.columns as i32).contains(&x) && (0..self.pixel_rows as i32).contains(&y) {
            Some(y as usize * self.columns as usize + x as usize)
        } else {
            None
        }
    }
}

/// Draws the game in the terminal and reads clicks from it.
///
/// Entering the alternate screen, raw mode and mouse capture happens in
/// [`TermRenderer::new`]; all of it is undone when the renderer is dropped.
pub struct TermRenderer {
    stdout: Stdout,
    canvas: Canvas,
    shown: Vec<Option<Glyph>>,
    key_releases: bool,
    active: bool,
}

impl TermRenderer {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let canvas = Canvas::new(config);
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        if width < canvas.columns || height < canvas.text_rows() {
            bail!(
                "terminal is {}x{}, the game needs at least {}x{}",
                width,
                height,
                canvas.columns,
                canvas.text_rows()
            );
        }

        let shown = vec![None; canvas.columns as usize * canvas.text_rows() as usize];
        let mut renderer = TermRenderer { stdout: stdout(), canvas, shown, key_releases: false, active: false };
        renderer.setup()?;
        Ok(renderer)
    }

    /// Whether the terminal reports key releases, so held keys can be tracked.
    pub fn reports_key_releases(&self) -> bool {
        self.key_releases
    }

    ///////////////////////////////////////////////////////////////////////////

    fn setup(&mut self) -> Result<()> {
        self.active = true;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(
            self.stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )
        .context("Error entering alt screen")?;

        self.key_releases = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.key_releases {
            execute!(self.stdout, PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
                .context("Error enabling key release events")?;
        }

        info!("Terminal ready, key releases reported: {}", self.key_releases);
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        if self.key_releases {
            execute!(self.stdout, PopKeyboardEnhancementFlags)?;
        }
        execute!(self.stdout, style::ResetColor, DisableMouseCapture, cursor::Show, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        terminal::disable_raw_mode().context("Error setting raw mode")?;
        Ok(())
    }

    fn invalidate(&mut self) -> Result<()> {
        self.shown.fill(None);
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        Ok(())
    }
}

impl Renderer for TermRenderer {
    fn clear_frame(&mut self) {
        self.canvas.clear();
    }

    fn draw_rect(&mut self, cell: Coords, color: Rgb, size: i32) {
        self.canvas.fill(cell, color, size);
    }

    fn draw_text(&mut self, text: &str, color: Rgb, position: Coords) {
        self.canvas.write(text, color, position);
    }

    fn present(&mut self) -> Result<()> {
        let columns = self.canvas.columns;

        for row in 0..self.canvas.text_rows() {
            for col in 0..columns {
                let glyph = self.canvas.glyph(col, row);
                let idx = row as usize * columns as usize + col as usize;
                if self.shown[idx] == Some(glyph) {
                    continue;
                }

                queue!(
                    self.stdout,
                    cursor::MoveTo(col, row),
                    style::SetForegroundColor(color(glyph.fg)),
                    style::SetBackgroundColor(color(glyph.bg)),
                    style::Print(glyph.ch)
                )?;
                self.shown[idx] = Some(glyph);
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush().context("Error flushing")?;
        Ok(())
    }

    fn poll_click_or_quit(&mut self, timeout: Duration) -> Result<Option<Prompt>> {
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(None);
            }

            match event::read()? {
                Event::Mouse(ev) if matches!(ev.kind, MouseEventKind::Down(_)) => return Ok(Some(Prompt::Click)),
                Event::Key(ev) if is_quit(&ev) => return Ok(Some(Prompt::Quit)),
                Event::Resize(..) => self.invalidate()?,
                _ => {}
            }
        }
    }
}

impl Drop for TermRenderer {
    fn drop(&mut self) {
        if !self.active {
            return;
        }

        self.active = false;
        if let Err(err) = self.restore() {
            warn!("Error restoring terminal: {:#}", err);
        }
    }
}

/// Arrow keys or WASD from the terminal, with Ctrl+C or Esc to quit.
pub struct TermInput {
    held: KeyState,
    key_releases: bool,
    quit: bool,
}

impl TermInput {
    /// Without key release events a key only counts for the tick in which it
    /// was pressed (or auto-repeated).
    pub fn new(key_releases: bool) -> Self {
        TermInput { held: KeyState::NONE, key_releases, quit: false }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn pump(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(ev) = event::read()? {
                self.apply(ev);
            }
        }
        Ok(())
    }

    fn apply(&mut self, ev: KeyEvent) {
        if is_quit(&ev) {
            self.quit = true;
            return;
        }

        let down = ev.kind != KeyEventKind::Release;
        match ev.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => self.held.up = down,
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => self.held.down = down,
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => self.held.left = down,
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => self.held.right = down,
            _ => {}
        }
    }

    fn take_keys(&mut self) -> KeyState {
        let keys = self.held;
        if !self.key_releases {
            self.held = KeyState::NONE;
        }
        keys
    }
}

impl InputSource for TermInput {
    fn poll_quit(&mut self) -> Result<bool> {
        self.pump()?;
        Ok(std::mem::take(&mut self.quit))
    }

    fn sample_keys(&mut self) -> Result<KeyState> {
        self.pump()?;
        Ok(self.take_keys())
    }

    fn reset(&mut self) {
        self.held = KeyState::NONE;
        self.quit = false;
    }
}

fn is_quit(ev: &KeyEvent) -> bool {
    if ev.kind == KeyEventKind::Release {
        return false;
    }

    match ev.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => ev.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn color((r, g, b): Rgb) -> style::Color {
    style::Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{GRAY, RED, WHITE};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn test_canvas_size() {
        let canvas = Canvas::new(&GameConfig::default());
        assert_eq!(canvas.columns, 72);
        assert_eq!(canvas.pixel_rows, 48);
        assert_eq!(canvas.text_rows(), 24);
    }

    #[test]
    fn test_boxes_share_a_character() {
        let mut canvas = Canvas::new(&GameConfig::default());
        canvas.fill((0, 0), GRAY, 10);
        canvas.fill((10, 10), RED, 10);

        assert_eq!(canvas.glyph(0, 0), Glyph { ch: PIXEL_CHAR, fg: GRAY, bg: BLACK });
        assert_eq!(canvas.glyph(1, 0), Glyph { ch: PIXEL_CHAR, fg: BLACK, bg: RED });

        canvas.clear();
        assert_eq!(canvas.glyph(0, 0), Glyph { ch: PIXEL_CHAR, fg: BLACK, bg: BLACK });
    }

    #[test]
    fn test_fill_off_grid_is_ignored() {
        let mut canvas = Canvas::new(&GameConfig::default());
        canvas.fill((-10, 240), GRAY, 10);
        canvas.fill((720, 240), GRAY, 10);
        canvas.fill((0, 480), GRAY, 10);

        assert!(canvas.pixels.iter().all(|p| *p == BLACK));
    }

    #[test]
    fn test_text_covers_pixels() {
        let mut canvas = Canvas::new(&GameConfig::default());
        canvas.fill((0, 0), GRAY, 10);
        canvas.write("Score: 3", WHITE, (0, 0));

        assert_eq!(canvas.glyph(0, 0), Glyph { ch: 'S', fg: WHITE, bg: BLACK });
        assert_eq!(canvas.glyph(7, 0), Glyph { ch: '3', fg: WHITE, bg: BLACK });
        assert_eq!(canvas.glyph(8, 0).ch, PIXEL_CHAR);
    }

    #[test]
    fn test_text_is_clipped() {
        let mut canvas = Canvas::new(&GameConfig::default());
        canvas.write("abc", WHITE, (700, 470));
        canvas.write("xyz", WHITE, (-10, 0));
        canvas.write("below", WHITE, (0, 480));

        assert_eq!(canvas.glyph(70, 23).ch, 'a');
        assert_eq!(canvas.glyph(71, 23).ch, 'b');
        assert_eq!(canvas.glyph(0, 0).ch, 'y');
    }

    #[test]
    fn test_held_keys() {
        let mut input = TermInput::new(true);
        input.apply(key(KeyCode::Char('a'), KeyEventKind::Press));
        input.apply(key(KeyCode::Up, KeyEventKind::Press));

        assert_eq!(input.take_keys(), KeyState::new(true, false, true, false));
        assert_eq!(input.take_keys(), KeyState::new(true, false, true, false));

        input.apply(key(KeyCode::Char('a'), KeyEventKind::Release));
        assert_eq!(input.take_keys(), KeyState::UP);
    }

    #[test]
    fn test_pressed_keys_last_one_tick() {
        let mut input = TermInput::new(false);
        input.apply(key(KeyCode::Char('D'), KeyEventKind::Press));
        input.apply(key(KeyCode::Down, KeyEventKind::Repeat));

        assert_eq!(input.take_keys(), KeyState::new(false, true, false, true));
        assert_eq!(input.take_keys(), KeyState::NONE);
    }

    #[test]
    fn test_reset_drops_held_keys() {
        let mut input = TermInput::new(true);
        input.apply(key(KeyCode::Right, KeyEventKind::Press));
        input.reset();

        assert_eq!(input.take_keys(), KeyState::NONE);
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&key(KeyCode::Esc, KeyEventKind::Press)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&key(KeyCode::Char('c'), KeyEventKind::Press)));
        assert!(!is_quit(&key(KeyCode::Esc, KeyEventKind::Release)));

        let mut input = TermInput::new(false);
        input.apply(key(KeyCode::Esc, KeyEventKind::Press));
        assert!(input.quit);
        assert_eq!(input.take_keys(), KeyState::NONE);
    }
}
