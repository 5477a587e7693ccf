use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal;

use crate::config::{Settings, Theme};
use crate::input::TerminalInput;
use crate::life::{Command, InteractionController, LifeError, SimulationEngine};
use crate::render::screen::{compose, menu_lines, prompt_lines, text_page};
use crate::render::{Palette, TerminalView};
use crate::session::{self, Clock, Pacing, SessionEnd, SystemClock};
use crate::title::{TITLE_GLYPHS, TitleAnimator};

const TITLE_STEP_SECS: f64 = 0.15;
const PROMPT_MAX_LEN: usize = 16;

pub const TUTORIAL: &str = "\
This is Conway's Game of Life.

Each cell is either alive (@) or dead (.). Every generation, all cells
update at once from the previous generation:
  - a dead cell with exactly 3 live neighbours comes to life
  - a live cell with 2 or 3 live neighbours stays alive
  - every other cell dies or stays dead
The board wraps around: the left edge touches the right, the top touches the bottom.

Editing: arrows move the cursor, space or End toggles a cell,
r fills the board randomly, c clears it, Enter starts the run.
Running: a pauses and resumes, Enter steps while paused or returns to the menu,
e or Esc goes back to editing, q quits.";

pub const CREDITS: &str = "\
termlife

Rules of the Game of Life by John Horton Conway, 1970.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Options,
    Tutorial,
    Credits,
    Exit,
}

pub const MAIN_ITEMS: &[MenuItem] = &[
    MenuItem::Start,
    MenuItem::Options,
    MenuItem::Tutorial,
    MenuItem::Credits,
    MenuItem::Exit,
];

impl MenuItem {
    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Start => "Start",
            MenuItem::Options => "Options",
            MenuItem::Tutorial => "Tutorial",
            MenuItem::Credits => "Credits",
            MenuItem::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionItem {
    GridSize,
    TickInterval,
    Theme,
    TitleAnimation,
    ResetBoard,
    Back,
}

pub const OPTION_ITEMS: &[OptionItem] = &[
    OptionItem::GridSize,
    OptionItem::TickInterval,
    OptionItem::Theme,
    OptionItem::TitleAnimation,
    OptionItem::ResetBoard,
    OptionItem::Back,
];

/// Label for an options entry, showing its current value.
pub fn option_label(item: OptionItem, settings: &Settings) -> String {
    match item {
        OptionItem::GridSize => format!("Grid size ({}x{})", settings.height, settings.width),
        OptionItem::TickInterval => format!("Tick interval ({:.2}s)", settings.tick_interval),
        OptionItem::Theme => match settings.theme {
            Theme::Dark => "Theme (dark)".to_string(),
            Theme::Light => "Theme (light)".to_string(),
        },
        OptionItem::TitleAnimation => {
            let state = if settings.title_animation { "on" } else { "off" };
            format!("Title animation ({state})")
        }
        OptionItem::ResetBoard => "Reset board".to_string(),
        OptionItem::Back => "Back".to_string(),
    }
}

/// Vertical list selection. Moving past either end stays put.
#[derive(Debug)]
pub struct Menu<T: Copy + 'static> {
    items: &'static [T],
    selected: usize,
}

impl<T: Copy + 'static> Menu<T> {
    pub fn new(items: &'static [T]) -> Self {
        Menu { items, selected: 0 }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> T {
        self.items[self.selected]
    }

    pub fn items(&self) -> &'static [T] {
        self.items
    }
}

/// Read a grid size as "H W", "HxW" or a single "N" for a square grid.
pub fn parse_size(text: &str) -> Result<(usize, usize), LifeError> {
    let parts: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == 'x' || c == 'X' || c == ',')
        .filter(|p| !p.is_empty())
        .collect();
    fn number(p: &str) -> Result<usize, LifeError> {
        p.parse::<usize>()
            .map_err(|_| LifeError::Unparsable(p.to_string()))
    }
    match parts.as_slice() {
        [n] => {
            let n = number(n)?;
            Ok((n, n))
        }
        [h, w] => Ok((number(h)?, number(w)?)),
        _ => Err(LifeError::Unparsable(text.trim().to_string())),
    }
}

/// Read a duration in seconds. Range checks are left to the controller.
pub fn parse_seconds(text: &str) -> Result<f64, LifeError> {
    let text = text.trim();
    text.parse::<f64>()
        .map_err(|_| LifeError::Unparsable(text.to_string()))
}

/// Parse, bound-check and apply a resize typed by the user.
pub fn apply_resize(
    controller: &mut InteractionController,
    settings: &mut Settings,
    text: &str,
    now: f64,
) -> Result<(usize, usize), LifeError> {
    let (height, width) = parse_size(text)?;
    settings.check_size(height, width)?;
    controller.handle(Command::ResizeRequest { height, width }, now)?;
    settings.height = height;
    settings.width = width;
    Ok((height, width))
}

/// Parse and apply a tick interval typed by the user.
pub fn apply_tick_interval(
    controller: &mut InteractionController,
    settings: &mut Settings,
    text: &str,
    now: f64,
) -> Result<f64, LifeError> {
    let secs = parse_seconds(text)?;
    controller.handle(Command::SetTickInterval(secs), now)?;
    settings.tick_interval = secs;
    Ok(secs)
}

/// The menu-driven program: title screen, options, and board sessions.
pub struct Shell<'a, W: Write> {
    out: &'a mut W,
    settings: Settings,
    controller: InteractionController,
    title: TitleAnimator,
    clock: SystemClock,
    palette: Palette,
}

impl<'a, W: Write> Shell<'a, W> {
    pub fn new(out: &'a mut W, settings: Settings) -> Result<Self, LifeError> {
        let engine = SimulationEngine::new(settings.height, settings.width)?;
        let controller =
            InteractionController::new(engine, settings.tick_interval)?.with_seed(settings.seed);
        Ok(Shell {
            out,
            title: TitleAnimator::new(TITLE_GLYPHS, TITLE_STEP_SECS, settings.title_animation),
            palette: Palette::for_theme(settings.theme),
            settings,
            controller,
            clock: SystemClock::new(),
        })
    }

    fn frame(&self) -> Duration {
        Pacing::from_fps(self.settings.fps).frame
    }

    fn show(&mut self, lines: &[String]) -> io::Result<()> {
        let (_, rows) = terminal::size()?;
        self.out.write_all(compose(lines, rows as usize).as_bytes())?;
        self.out.flush()
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x1b[2J\x1b[H")?;
        self.out.flush()
    }

    /// Main menu loop. Returns when the user confirms they want to leave.
    pub fn run(&mut self) -> io::Result<()> {
        let mut menu = Menu::new(MAIN_ITEMS);
        let labels: Vec<&str> = MAIN_ITEMS.iter().map(|i| i.label()).collect();
        self.clear_screen()?;
        let mut dirty = true;

        loop {
            if dirty {
                let lines = menu_lines(
                    "",
                    &labels,
                    menu.index(),
                    Some(self.title.grid()),
                    Some(&self.palette),
                );
                self.show(&lines)?;
                dirty = false;
            }

            let frame = self.frame();
            let Some(key) = poll_key(frame)? else {
                dirty = self.title.update(self.clock.now());
                continue;
            };
            dirty = true;
            match key.code {
                KeyCode::Up => menu.up(),
                KeyCode::Down => menu.down(),
                KeyCode::Char('a') => {
                    self.settings.title_animation = !self.settings.title_animation;
                    self.title.set_enabled(self.settings.title_animation);
                }
                KeyCode::Esc | KeyCode::Char('q') => {
                    if self.confirm_exit()? {
                        return Ok(());
                    }
                }
                KeyCode::Enter => {
                    let leave = match menu.selected() {
                        MenuItem::Start => self.start()? == SessionEnd::Exited,
                        MenuItem::Options => {
                            self.options()?;
                            false
                        }
                        MenuItem::Tutorial => {
                            self.page(TUTORIAL)?;
                            false
                        }
                        MenuItem::Credits => {
                            self.page(CREDITS)?;
                            false
                        }
                        MenuItem::Exit => self.confirm_exit()?,
                    };
                    if leave {
                        return Ok(());
                    }
                    self.clear_screen()?;
                }
                _ => {}
            }
        }
    }

    fn start(&mut self) -> io::Result<SessionEnd> {
        let pacing = Pacing::from_fps(self.settings.fps);
        let mut view = TerminalView::new(&mut *self.out, self.palette);
        let end = session::run(
            &mut self.controller,
            &mut TerminalInput,
            &self.clock,
            &mut view,
            pacing,
        )?;
        log::debug!("session ended: {end:?}");
        Ok(end)
    }

    fn page(&mut self, body: &str) -> io::Result<()> {
        self.clear_screen()?;
        let lines = text_page(body, Some(&self.palette));
        self.show(&lines)?;
        wait_key()?;
        Ok(())
    }

    fn confirm_exit(&mut self) -> io::Result<bool> {
        self.clear_screen()?;
        self.show(&[String::from("Do you want to exit? Y/N")])?;
        loop {
            match wait_key()?.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.clear_screen()?;
                    return Ok(false);
                }
                _ => {}
            }
        }
    }

    fn options(&mut self) -> io::Result<()> {
        let mut menu = Menu::new(OPTION_ITEMS);
        self.clear_screen()?;
        loop {
            let labels: Vec<String> = menu
                .items()
                .iter()
                .map(|&i| option_label(i, &self.settings))
                .collect();
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            let lines = menu_lines("Options", &labels, menu.index(), None, Some(&self.palette));
            self.show(&lines)?;

            match wait_key()?.code {
                KeyCode::Up => menu.up(),
                KeyCode::Down => menu.down(),
                KeyCode::Esc => return Ok(()),
                KeyCode::Enter => match menu.selected() {
                    OptionItem::GridSize => {
                        let max = format!(
                            "max {}x{}",
                            self.settings.max_height, self.settings.max_width
                        );
                        if let Some(text) = self.prompt("Set the grid size (rows cols): ", &max)? {
                            let now = self.clock.now();
                            let applied =
                                apply_resize(&mut self.controller, &mut self.settings, &text, now);
                            let msg = match applied {
                                Ok((h, w)) => format!("New grid size: {h}x{w}"),
                                Err(e) => self.rejected(e),
                            };
                            self.page(&msg)?;
                        }
                    }
                    OptionItem::TickInterval => {
                        let label = "Seconds between generations: ";
                        let answer = self.prompt(label, "greater than 0")?;
                        if let Some(text) = answer {
                            let now = self.clock.now();
                            let applied = apply_tick_interval(
                                &mut self.controller,
                                &mut self.settings,
                                &text,
                                now,
                            );
                            let msg = match applied {
                                Ok(secs) => format!("New tick interval: {secs}s"),
                                Err(e) => self.rejected(e),
                            };
                            self.page(&msg)?;
                        }
                    }
                    OptionItem::Theme => {
                        self.settings.theme = self.settings.theme.toggled();
                        self.palette = Palette::for_theme(self.settings.theme);
                    }
                    OptionItem::TitleAnimation => {
                        self.settings.title_animation = !self.settings.title_animation;
                        self.title.set_enabled(self.settings.title_animation);
                    }
                    OptionItem::ResetBoard => {
                        self.controller.reset();
                        self.page("Board cleared, generation and population reset to 0")?;
                    }
                    OptionItem::Back => return Ok(()),
                },
                _ => {}
            }
            self.clear_screen()?;
        }
    }

    fn rejected(&self, error: LifeError) -> String {
        log::debug!("option rejected: {error}");
        format!("Not changed: {error}")
    }

    /// Blocking single-line input. `None` when the user cancels with Esc.
    fn prompt(&mut self, label: &str, hint: &str) -> io::Result<Option<String>> {
        let mut typed = String::new();
        self.clear_screen()?;
        loop {
            let lines = prompt_lines(label, &typed, Some(hint), Some(&self.palette));
            self.show(&lines)?;
            match wait_key()?.code {
                KeyCode::Enter => return Ok(Some(typed)),
                KeyCode::Esc => return Ok(None),
                KeyCode::Backspace => {
                    typed.pop();
                }
                KeyCode::Char(c) if is_prompt_char(c) && typed.len() < PROMPT_MAX_LEN => {
                    typed.push(c)
                }
                _ => {}
            }
        }
    }
}

fn is_prompt_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, ' ' | 'x' | 'X' | '.' | ',' | '-')
}

fn key_press(event: Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(key),
        _ => None,
    }
}

fn poll_key(timeout: Duration) -> io::Result<Option<KeyEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(key_press(event::read()?))
}

/// Block until a key is pressed. Modal prompts use an unbounded wait.
fn wait_key() -> io::Result<KeyEvent> {
    loop {
        if let Some(key) = key_press(event::read()?) {
            return Ok(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::Direction;

    fn controller() -> InteractionController {
        InteractionController::new(SimulationEngine::new(10, 10).unwrap(), 0.5).unwrap()
    }

    #[test]
    fn test_menu_clamps_at_ends() {
        let mut menu = Menu::new(MAIN_ITEMS);
        menu.up();
        assert_eq!(menu.selected(), MenuItem::Start);
        for _ in 0..10 {
            menu.down();
        }
        assert_eq!(menu.selected(), MenuItem::Exit);
        menu.up();
        assert_eq!(menu.selected(), MenuItem::Credits);
    }

    #[test]
    fn test_parse_size_forms() {
        assert_eq!(parse_size("12"), Ok((12, 12)));
        assert_eq!(parse_size(" 8 20 "), Ok((8, 20)));
        assert_eq!(parse_size("8x20"), Ok((8, 20)));
        assert_eq!(parse_size("8, 20"), Ok((8, 20)));
        assert_eq!(parse_size("0"), Ok((0, 0)));
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(matches!(parse_size(""), Err(LifeError::Unparsable(_))));
        assert!(matches!(parse_size("ten"), Err(LifeError::Unparsable(_))));
        assert!(matches!(parse_size("-3"), Err(LifeError::Unparsable(_))));
        assert!(matches!(parse_size("1 2 3"), Err(LifeError::Unparsable(_))));
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds(" 0.25 "), Ok(0.25));
        assert!(matches!(parse_seconds("fast"), Err(LifeError::Unparsable(_))));
    }

    #[test]
    fn test_apply_resize() {
        let mut c = controller();
        let mut settings = Settings::default();
        c.handle(Command::RandomFill, 0.0).unwrap();
        assert_eq!(apply_resize(&mut c, &mut settings, "5 7", 0.0), Ok((5, 7)));
        assert_eq!((settings.height, settings.width), (5, 7));
        assert_eq!(c.engine().grid().width(), 7);
        assert_eq!(c.engine().grid().live_count(), 0);
    }

    #[test]
    fn test_rejected_resize_changes_nothing() {
        let mut c = controller();
        let mut settings = Settings::default();
        c.handle(Command::MoveCursor(Direction::Right), 0.0).unwrap();
        c.handle(Command::ToggleCell, 0.0).unwrap();

        for bad in ["0 5", "abc", "101 5", "5 201"] {
            assert!(apply_resize(&mut c, &mut settings, bad, 0.0).is_err(), "{bad}");
            assert_eq!((settings.height, settings.width), (10, 10));
            assert_eq!(c.engine().grid().height(), 10);
            assert!(c.engine().grid().get(1, 0));
        }
    }

    #[test]
    fn test_apply_tick_interval() {
        let mut c = controller();
        let mut settings = Settings::default();
        assert_eq!(apply_tick_interval(&mut c, &mut settings, "0.1", 0.0), Ok(0.1));
        assert_eq!(c.tick_interval(), 0.1);
        assert_eq!(settings.tick_interval, 0.1);

        for bad in ["0", "-1", "soon", "nan"] {
            assert!(apply_tick_interval(&mut c, &mut settings, bad, 0.0).is_err(), "{bad}");
        }
        assert_eq!(c.tick_interval(), 0.1);
        assert_eq!(settings.tick_interval, 0.1);
    }

    #[test]
    fn test_option_labels_show_values() {
        let settings = Settings::default();
        assert_eq!(option_label(OptionItem::GridSize, &settings), "Grid size (10x10)");
        assert_eq!(option_label(OptionItem::TickInterval, &settings), "Tick interval (0.50s)");
        assert_eq!(option_label(OptionItem::Theme, &settings), "Theme (dark)");
        assert_eq!(option_label(OptionItem::TitleAnimation, &settings), "Title animation (on)");
    }

    #[test]
    fn test_prompt_accepts_numeric_characters_only() {
        assert!(is_prompt_char('7'));
        assert!(is_prompt_char('x'));
        assert!(is_prompt_char('.'));
        assert!(!is_prompt_char('a'));
    }
}
