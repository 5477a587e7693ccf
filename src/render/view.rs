use std::io::{self, Write};

use crossterm::terminal;

use super::board::board_lines;
use super::screen::compose;
use super::style::{Palette, Role, line};
use crate::life::Snapshot;
use crate::session::View;

/// Draws board snapshots to a terminal writer, one flush per frame.
pub struct TerminalView<'a, W: Write> {
    out: &'a mut W,
    palette: Palette,
    message: Option<String>,
    force_full: bool,
}

impl<'a, W: Write> TerminalView<'a, W> {
    pub fn new(out: &'a mut W, palette: Palette) -> Self {
        TerminalView {
            out,
            palette,
            message: None,
            force_full: true,
        }
    }
}

impl<W: Write> View for TerminalView<'_, W> {
    fn draw(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        let mut lines = board_lines(snapshot, Some(&self.palette));
        if let Some(msg) = &self.message {
            lines.push(line(Some(&self.palette), Role::Banner, msg));
        }
        let (_, rows) = terminal::size().unwrap_or((80, 24));
        if self.force_full {
            self.out.write_all(b"\x1b[2J")?;
            self.force_full = false;
        }
        self.out.write_all(compose(&lines, rows as usize).as_bytes())?;
        self.out.flush()?;
        // Messages last until the next redraw
        self.message = None;
        Ok(())
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        self.message = Some(message.to_string());
        Ok(())
    }

    fn invalidate(&mut self) {
        self.force_full = true;
    }
}
