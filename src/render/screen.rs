use super::style::{Painter, Palette, Role, line};
use crate::life::Grid;

/// Menu entries with a `>` marker on the selected one, under an optional title board.
pub fn menu_lines(
    heading: &str,
    items: &[&str],
    selected: usize,
    title: Option<&Grid>,
    palette: Option<&Palette>,
) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(grid) = title {
        lines.extend(title_lines(grid, palette));
        lines.push(String::new());
    }
    if !heading.is_empty() {
        lines.push(line(palette, Role::Banner, heading));
    }
    for (i, item) in items.iter().enumerate() {
        let mut p = Painter::new(palette);
        if i == selected {
            p.paint(Role::Text, ">").paint(Role::Highlight, item);
        } else {
            p.paint(Role::Text, " ").paint(Role::Text, item);
        }
        lines.push(p.finish());
    }
    lines
}

/// Title board without the frame: live cells only, dead cells blank.
pub fn title_lines(grid: &Grid, palette: Option<&Palette>) -> Vec<String> {
    grid.rows()
        .map(|row| {
            let mut p = Painter::new(palette);
            for &alive in row {
                if alive {
                    p.paint(Role::Live, "@ ");
                } else {
                    p.paint(Role::Text, "  ");
                }
            }
            p.finish()
        })
        .collect()
}

/// A static page of text followed by the "press any key" footer.
pub fn text_page(body: &str, palette: Option<&Palette>) -> Vec<String> {
    let mut lines: Vec<String> = body.lines().map(|l| line(palette, Role::Text, l)).collect();
    lines.push(String::new());
    lines.push(line(palette, Role::Text, "Press any key..."));
    lines
}

/// A prompt with the text typed so far and an optional message underneath.
pub fn prompt_lines(
    label: &str,
    typed: &str,
    message: Option<&str>,
    palette: Option<&Palette>,
) -> Vec<String> {
    let mut p = Painter::new(palette);
    p.paint(Role::Text, label).paint(Role::Text, typed).paint(Role::Highlight, " ");
    let mut lines = vec![p.finish()];
    if let Some(msg) = message {
        lines.push(line(palette, Role::Banner, msg));
    }
    lines.push(line(palette, Role::Text, "[enter] accept  [esc] cancel"));
    lines
}

/// Position every line on its own terminal row, clearing leftovers from the previous frame.
pub fn compose(lines: &[String], term_rows: usize) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 12).sum());
    for (row, text) in lines.iter().enumerate().take(term_rows.max(1)) {
        out.push_str("\x1b[");
        out.push_str(&(row + 1).to_string());
        out.push_str(";1H\x1b[2K");
        out.push_str(text);
    }
    // Clear below the last line
    out.push_str("\x1b[0m\x1b[J");
    out
}
