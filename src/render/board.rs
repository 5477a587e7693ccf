use super::style::{Painter, Palette, Role, line};
use crate::life::{Grid, Mode, Snapshot};

pub const LIVE: &str = "@";
pub const DEAD: &str = ".";
pub const EDGE: &str = "~";

/// Draw a grid framed by a `~` border, two columns per cell.
/// `cursor` marks one cell in reverse video.
pub fn grid_lines(
    grid: &Grid,
    cursor: Option<(usize, usize)>,
    palette: Option<&Palette>,
) -> Vec<String> {
    let border = {
        let mut p = Painter::new(palette);
        for _ in 0..grid.width() + 2 {
            p.paint(Role::Border, EDGE).paint(Role::Border, " ");
        }
        p.finish()
    };

    let mut lines = Vec::with_capacity(grid.height() + 2);
    lines.push(border.clone());
    for (y, row) in grid.rows().enumerate() {
        let mut p = Painter::new(palette);
        p.paint(Role::Border, EDGE).paint(Role::Border, " ");
        for (x, &alive) in row.iter().enumerate() {
            let glyph = if alive { LIVE } else { DEAD };
            if cursor == Some((x, y)) {
                p.paint(Role::Highlight, glyph);
            } else {
                p.paint(if alive { Role::Live } else { Role::Dead }, glyph);
            }
            p.paint(Role::Text, " ");
        }
        p.paint(Role::Border, EDGE).paint(Role::Border, " ");
        lines.push(p.finish());
    }
    lines.push(border);
    lines
}

fn mode_label(mode: Mode, auto_advance: bool) -> &'static str {
    match mode {
        Mode::Editing => "EDIT",
        Mode::Running if auto_advance => "RUN",
        Mode::Running => "PAUSED",
        Mode::Stable => "STABLE",
    }
}

fn help_text(snapshot: &Snapshot<'_>) -> &'static str {
    match snapshot.mode {
        Mode::Editing => {
            "[arrows] move  [space] toggle  [r]andom  [c]lear  [enter] run  [esc] menu  [q]uit"
        }
        Mode::Running | Mode::Stable if !snapshot.auto_advance => {
            "[enter] step  [a] resume  [e/esc] edit  [q] quit"
        }
        Mode::Running | Mode::Stable => "[enter] menu  [a] pause  [e/esc] edit  [q] quit",
    }
}

/// Full board screen: status line, framed grid, optional banner, key help.
pub fn board_lines(snapshot: &Snapshot<'_>, palette: Option<&Palette>) -> Vec<String> {
    let status = format!(
        "Generation {} | Population {} | {} | tick {:.2}s | {}x{}",
        snapshot.generation,
        snapshot.population,
        mode_label(snapshot.mode, snapshot.auto_advance),
        snapshot.tick_interval,
        snapshot.grid.height(),
        snapshot.grid.width(),
    );
    let mut lines = vec![line(palette, Role::Text, &status)];
    lines.extend(grid_lines(snapshot.grid, snapshot.cursor, palette));
    if snapshot.stable {
        let banner = format!(
            "Stable: the board stopped changing at generation {}",
            snapshot.generation
        );
        lines.push(line(palette, Role::Banner, &banner));
    }
    lines.push(line(palette, Role::Text, help_text(snapshot)));
    lines
}
