//! Player — the terminal host.
//!
//! Resolves a surface on the terminal, switches to the alternate screen and
//! hands the script to [`playback::start`]. The terminal is restored on exit
//! (even on error).

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, queue, style, terminal};
use tracing::{debug, info};
use unicode_width::UnicodeWidthChar;

use crate::error::SurfaceError;
use crate::menubar::print_menu_item;
use crate::playback::{self, Outcome};
use crate::surface::{SurfaceHost, TextSurface};
use crate::timer::{Timer, Wake};
use crate::types::{Markup, RevealConfig, Script};

/// Rows reserved above the canvas for the menu bar.
const CANVAS_OFFSET: u16 = 1;

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// Draws buffers on a terminal canvas below the menu bar.
///
/// Lines wider than the terminal are cut at the last whole glyph that fits,
/// measured in columns, so the canvas keeps a fixed height.
pub struct TerminalSurface<W: Write> {
    out: W,
    width: u16,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, width: u16) -> Self {
        Self { out, width }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TextSurface for TerminalSurface<W> {
    fn replace(&mut self, content: &str) -> Result<(), SurfaceError> {
        queue!(
            self.out,
            cursor::MoveTo(0, CANVAS_OFFSET),
            terminal::Clear(terminal::ClearType::FromCursorDown),
        )?;
        for (y, line) in content.split('\n').enumerate() {
            queue!(
                self.out,
                cursor::MoveTo(0, y as u16 + CANVAS_OFFSET),
                style::Print(fit_columns(line, self.width as usize)),
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// The longest prefix of `line` that occupies at most `columns` cells.
fn fit_columns(line: &str, columns: usize) -> &str {
    let mut used = 0;
    for (i, ch) in line.char_indices() {
        used += UnicodeWidthChar::width(ch).unwrap_or(0);
        if used > columns {
            return &line[..i];
        }
    }
    line
}

/// The terminal offers one surface, available when it is tall enough for
/// the menu bar, the scroll window, the active line and a status line.
pub struct TerminalHost {
    rows_needed: u16,
}

impl TerminalHost {
    pub fn new(config: &RevealConfig) -> Self {
        let rows = config.scroll_window.saturating_add(2 + CANVAS_OFFSET as usize);
        Self {
            rows_needed: u16::try_from(rows).unwrap_or(u16::MAX),
        }
    }
}

impl SurfaceHost for TerminalHost {
    type Surface = TerminalSurface<io::Stdout>;

    fn resolve(&mut self, target: &str) -> Option<Self::Surface> {
        let (width, height) = match terminal::size() {
            Ok(size) => size,
            Err(e) => {
                debug!(surface = target, "no terminal ({e})");
                return None;
            }
        };
        if height < self.rows_needed {
            debug!(surface = target, height, needed = self.rows_needed, "terminal too short");
            return None;
        }
        Some(TerminalSurface::new(io::stdout(), width))
    }
}

// ---------------------------------------------------------------------------
// Timer
// ---------------------------------------------------------------------------

/// Waits by polling for key events, so `q`, `Esc` or `Ctrl-c` can end
/// playback early.
#[derive(Debug, Default)]
pub struct KeyTimer;

impl Timer for KeyTimer {
    fn wait(&mut self, delay: Duration) -> Wake {
        let deadline = Instant::now() + delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match event::poll(remaining) {
                Ok(false) => return Wake::Elapsed,
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if is_quit(&key) => return Wake::Interrupted,
                    Ok(_) => {}
                    Err(e) => {
                        debug!("event read failed ({e})");
                        return Wake::Interrupted;
                    }
                },
                Err(e) => {
                    debug!("event poll failed ({e})");
                    std::thread::sleep(remaining);
                    return Wake::Elapsed;
                }
            }
            if Instant::now() >= deadline {
                return Wake::Elapsed;
            }
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

pub struct Player {
    script: Script,
    config: RevealConfig,
}

impl Player {
    /// The terminal only understands plain text, so HTML markup is dropped.
    pub fn new(script: Script, config: RevealConfig) -> Self {
        let config = RevealConfig {
            markup: Markup::Plain,
            ..config
        };
        Self { script, config }
    }

    /// Play the script in the terminal.
    ///
    /// Returns `Outcome::Unresolved` without touching the terminal when no
    /// surface is available. Scripts with control characters are rejected
    /// before anything is drawn.
    pub fn play(self) -> Result<Outcome> {
        self.script.validate()?;
        let mut host = TerminalHost::new(&self.config);
        let Some(surface) = host.resolve(&self.config.target) else {
            info!(surface = %self.config.target, "terminal unavailable, nothing to play");
            return Ok(Outcome::Unresolved);
        };

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.run(&mut stdout, surface);

        // Always restore terminal state.
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        result
    }

    fn run(self, stdout: &mut io::Stdout, surface: TerminalSurface<io::Stdout>) -> Result<Outcome> {
        render_menubar(stdout)?;

        let status_y = self.status_row();
        let outcome = playback::start(self.script, self.config, Some(surface), KeyTimer);
        debug!(?outcome, "playback ended");

        if let Outcome::Finished { .. } = outcome {
            render_status(stdout, status_y, " done | press any key to exit ")?;
            wait_for_key()?;
        }
        Ok(outcome)
    }

    fn status_row(&self) -> u16 {
        let rows = self.config.scroll_window.saturating_add(1 + CANVAS_OFFSET as usize);
        u16::try_from(rows).unwrap_or(u16::MAX)
    }
}

fn render_menubar(stdout: &mut io::Stdout) -> Result<()> {
    queue!(
        stdout,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(" "),
    )?;
    print_menu_item(stdout, "[q][Esc] quit")?;
    stdout.flush()?;
    Ok(())
}

fn render_status(stdout: &mut io::Stdout, y: u16, status: &str) -> Result<()> {
    let mut cs = style::ContentStyle::default();
    cs.attributes.set(style::Attribute::Dim);
    queue!(
        stdout,
        cursor::MoveTo(0, y),
        style::PrintStyledContent(style::StyledContent::new(cs, status)),
    )?;
    stdout.flush()?;
    Ok(())
}

fn wait_for_key() -> Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
