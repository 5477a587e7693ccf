use super::{Grid, LifeError, SimulationEngine, validate_tick_interval};

/// Cursor movement, wrapping at every edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Abstract input the controller understands. The terminal layer maps keys onto these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    MoveCursor(Direction),
    ToggleCell,
    RandomFill,
    Clear,
    Confirm,
    Cancel,
    /// Pause or resume timed auto-advance while running
    ToggleAutoAnimation,
    ResizeRequest { height: usize, width: usize },
    /// Terminal size changed. Nothing for the simulation to do.
    ResizeConsole,
    SetTickInterval(f64),
    /// Go back to editing from a run
    Edit,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Editing,
    Running,
    /// Running, but a fixed point was reached so auto-advance is suspended
    Stable,
}

/// What the caller should do after a command was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Editing was abandoned without running
    Cancelled,
    /// Run ended and control returns to the caller
    Finished,
    Exited,
}

/// Render-ready view of the controller state.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub generation: u64,
    pub population: usize,
    /// Only present while editing
    pub cursor: Option<(usize, usize)>,
    pub mode: Mode,
    pub stable: bool,
    pub auto_advance: bool,
    pub tick_interval: f64,
}

/// Edit/run state machine that drives a [`SimulationEngine`].
#[derive(Debug)]
pub struct InteractionController {
    engine: SimulationEngine,
    mode: Mode,
    cursor: (usize, usize),
    tick_interval: f64,
    // None right after entering a run, so the first tick advances immediately
    last_tick: Option<f64>,
    auto_advance: bool,
    seed: Option<u64>,
}

impl InteractionController {
    pub fn new(engine: SimulationEngine, tick_interval: f64) -> Result<Self, LifeError> {
        let tick_interval = validate_tick_interval(tick_interval)?;
        Ok(InteractionController {
            engine,
            mode: Mode::Editing,
            cursor: (0, 0),
            tick_interval,
            last_tick: None,
            auto_advance: true,
            seed: None,
        })
    }

    /// Seed used for random fills. Each fill derives a fresh seed from it.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_stable(&self) -> bool {
        self.mode == Mode::Stable
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn tick_interval(&self) -> f64 {
        self.tick_interval
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.engine.grid(),
            generation: self.engine.generation(),
            population: self.engine.population(),
            cursor: (self.mode == Mode::Editing).then_some(self.cursor),
            mode: self.mode,
            stable: self.is_stable(),
            auto_advance: self.auto_advance,
            tick_interval: self.tick_interval,
        }
    }

    /// Put the controller back into editing with a fresh timer and stability flag.
    pub fn begin_editing(&mut self) {
        if self.mode != Mode::Editing {
            log::debug!("{:?} -> Editing", self.mode);
        }
        self.mode = Mode::Editing;
        self.last_tick = None;
        self.auto_advance = true;
    }

    /// Clear the board and counters and return to editing at the origin.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.cursor = (0, 0);
        self.begin_editing();
    }

    /// Apply one command at time `now` (seconds). A rejected command leaves state untouched.
    pub fn handle(&mut self, command: Command, now: f64) -> Result<Flow, LifeError> {
        match command {
            Command::Exit => {
                log::debug!("exit requested in {:?}", self.mode);
                return Ok(Flow::Exited);
            }
            Command::ResizeConsole => {}
            Command::ResizeRequest { height, width } => {
                self.engine.resize(height, width)?;
                self.cursor = (0, 0);
                self.last_tick = None;
                if self.mode == Mode::Stable {
                    self.mode = Mode::Running;
                }
            }
            Command::SetTickInterval(secs) => {
                self.tick_interval = validate_tick_interval(secs)?;
                log::debug!("tick interval set to {secs}s");
            }
            _ => {
                return Ok(match self.mode {
                    Mode::Editing => self.handle_editing(command),
                    Mode::Running | Mode::Stable => self.handle_running(command, now),
                });
            }
        }
        Ok(Flow::Continue)
    }

    fn handle_editing(&mut self, command: Command) -> Flow {
        match command {
            Command::MoveCursor(dir) => self.move_cursor(dir),
            Command::ToggleCell => {
                let (x, y) = self.cursor;
                self.engine.toggle(x, y);
            }
            Command::RandomFill => {
                let seed = self.seed;
                self.seed = seed.map(|s| s.wrapping_add(1));
                self.engine.fill_random(seed);
            }
            Command::Clear => self.engine.clear(),
            Command::Confirm => {
                log::debug!("Editing -> Running");
                self.mode = Mode::Running;
                self.last_tick = None;
                self.auto_advance = true;
            }
            Command::Cancel => return Flow::Cancelled,
            _ => {}
        }
        Flow::Continue
    }

    fn handle_running(&mut self, command: Command, now: f64) -> Flow {
        match command {
            Command::Edit | Command::Cancel => self.begin_editing(),
            Command::ToggleAutoAnimation => self.auto_advance = !self.auto_advance,
            Command::Confirm if self.auto_advance => return Flow::Finished,
            Command::Confirm => {
                if self.mode == Mode::Running {
                    self.step(now);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Auto-advance if a run is active and the interval has elapsed.
    /// Returns whether a generation was computed.
    pub fn tick(&mut self, now: f64) -> bool {
        if self.mode != Mode::Running || !self.auto_advance {
            return false;
        }
        if let Some(last) = self.last_tick
            && now - last < self.tick_interval
        {
            return false;
        }
        self.step(now);
        true
    }

    fn step(&mut self, now: f64) {
        let stable = self.engine.advance();
        self.last_tick = Some(now);
        if stable {
            log::debug!("Running -> Stable");
            self.mode = Mode::Stable;
        }
    }

    fn move_cursor(&mut self, dir: Direction) {
        let grid = self.engine.grid();
        let (w, h) = (grid.width(), grid.height());
        let (x, y) = self.cursor;
        self.cursor = match dir {
            Direction::Left => ((x + w - 1) % w, y),
            Direction::Right => ((x + 1) % w, y),
            Direction::Up => (x, (y + h - 1) % h),
            Direction::Down => (x, (y + 1) % h),
        };
    }

    /// Seconds until the next auto-advance is due, if one can happen.
    pub fn time_to_next_tick(&self, now: f64) -> Option<f64> {
        if self.mode != Mode::Running || !self.auto_advance {
            return None;
        }
        Some(match self.last_tick {
            None => 0.0,
            Some(last) => (last + self.tick_interval - now).max(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(height: usize, width: usize) -> InteractionController {
        InteractionController::new(SimulationEngine::new(height, width).unwrap(), 0.5).unwrap()
    }

    fn press(c: &mut InteractionController, command: Command) -> Flow {
        c.handle(command, 0.0).unwrap()
    }

    fn toggle_at(c: &mut InteractionController, cells: &[(usize, usize)]) {
        for &(x, y) in cells {
            while c.cursor().0 != x {
                press(c, Command::MoveCursor(Direction::Right));
            }
            while c.cursor().1 != y {
                press(c, Command::MoveCursor(Direction::Down));
            }
            press(c, Command::ToggleCell);
        }
    }

    #[test]
    fn test_rejects_bad_tick_interval_on_construction() {
        let engine = SimulationEngine::new(3, 3).unwrap();
        assert!(InteractionController::new(engine, 0.0).is_err());
    }

    #[test]
    fn test_cursor_wraps_both_axes() {
        let mut c = controller(4, 6);
        press(&mut c, Command::MoveCursor(Direction::Left));
        assert_eq!(c.cursor(), (5, 0));
        press(&mut c, Command::MoveCursor(Direction::Up));
        assert_eq!(c.cursor(), (5, 3));
        press(&mut c, Command::MoveCursor(Direction::Right));
        assert_eq!(c.cursor(), (0, 3));
        press(&mut c, Command::MoveCursor(Direction::Down));
        assert_eq!(c.cursor(), (0, 0));
    }

    #[test]
    fn test_toggle_at_cursor() {
        let mut c = controller(5, 5);
        toggle_at(&mut c, &[(2, 3)]);
        assert!(c.engine().grid().get(2, 3));
        assert_eq!(c.engine().grid().live_count(), 1);
    }

    #[test]
    fn test_confirm_starts_run_and_first_tick_advances() {
        let mut c = controller(5, 5);
        toggle_at(&mut c, &[(1, 2), (2, 2), (3, 2)]);
        assert_eq!(press(&mut c, Command::Confirm), Flow::Continue);
        assert_eq!(c.mode(), Mode::Running);
        assert!(c.snapshot().cursor.is_none());

        assert!(c.tick(10.0));
        assert_eq!(c.engine().generation(), 1);
    }

    #[test]
    fn test_tick_respects_interval() {
        let mut c = controller(5, 5);
        toggle_at(&mut c, &[(1, 2), (2, 2), (3, 2)]);
        press(&mut c, Command::Confirm);
        assert!(c.tick(1.0));
        assert!(!c.tick(1.2));
        assert!(!c.tick(1.49));
        assert!(c.tick(1.5));
        assert!(!c.tick(1.6));
        assert_eq!(c.engine().generation(), 2);
    }

    #[test]
    fn test_no_ticks_while_editing() {
        let mut c = controller(5, 5);
        assert!(!c.tick(100.0));
        assert_eq!(c.engine().generation(), 0);
    }

    #[test]
    fn test_stable_stops_auto_advance() {
        let mut c = controller(6, 6);
        toggle_at(&mut c, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        press(&mut c, Command::Confirm);
        assert!(c.tick(0.0));
        assert!(c.is_stable());
        assert!(c.snapshot().stable);
        assert!(!c.tick(5.0));
        assert!(!c.tick(50.0));
        assert_eq!(c.engine().generation(), 1);
        assert_eq!(c.time_to_next_tick(60.0), None);
    }

    #[test]
    fn test_edit_from_stable_resets_flag_and_timer() {
        let mut c = controller(6, 6);
        press(&mut c, Command::Confirm);
        c.tick(0.0);
        assert!(c.is_stable());

        press(&mut c, Command::Edit);
        assert_eq!(c.mode(), Mode::Editing);
        assert!(!c.is_stable());

        toggle_at(&mut c, &[(1, 2), (2, 2), (3, 2)]);
        press(&mut c, Command::Confirm);
        // Timer was reset, so even an early timestamp advances right away
        assert!(c.tick(0.1));
        assert!(!c.is_stable());
    }

    #[test]
    fn test_cancel_while_running_returns_to_editing() {
        let mut c = controller(5, 5);
        press(&mut c, Command::Confirm);
        assert_eq!(press(&mut c, Command::Cancel), Flow::Continue);
        assert_eq!(c.mode(), Mode::Editing);
    }

    #[test]
    fn test_cancel_while_editing_abandons() {
        let mut c = controller(5, 5);
        assert_eq!(press(&mut c, Command::Cancel), Flow::Cancelled);
    }

    #[test]
    fn test_exit_from_any_mode() {
        let mut c = controller(5, 5);
        assert_eq!(press(&mut c, Command::Exit), Flow::Exited);
        press(&mut c, Command::Confirm);
        assert_eq!(press(&mut c, Command::Exit), Flow::Exited);
    }

    #[test]
    fn test_confirm_while_running_finishes() {
        let mut c = controller(5, 5);
        press(&mut c, Command::Confirm);
        assert_eq!(press(&mut c, Command::Confirm), Flow::Finished);
    }

    #[test]
    fn test_paused_run_steps_manually() {
        let mut c = controller(5, 5);
        toggle_at(&mut c, &[(1, 2), (2, 2), (3, 2)]);
        press(&mut c, Command::Confirm);
        press(&mut c, Command::ToggleAutoAnimation);
        assert!(!c.auto_advance());
        assert!(!c.tick(100.0));
        assert_eq!(c.engine().generation(), 0);

        assert_eq!(press(&mut c, Command::Confirm), Flow::Continue);
        assert_eq!(c.engine().generation(), 1);

        press(&mut c, Command::ToggleAutoAnimation);
        assert!(c.tick(100.0));
        assert_eq!(c.engine().generation(), 2);
    }

    #[test]
    fn test_pause_and_resume_keep_the_interval() {
        let mut c = controller(5, 5);
        toggle_at(&mut c, &[(1, 2), (2, 2), (3, 2)]);
        press(&mut c, Command::Confirm);
        assert!(c.tick(1.0));

        c.handle(Command::ToggleAutoAnimation, 1.05).unwrap();
        c.handle(Command::ToggleAutoAnimation, 1.1).unwrap();
        assert!(c.auto_advance());
        assert!(!c.tick(1.1));
        assert!(!c.tick(1.45));
        assert!(c.tick(1.5));
        assert_eq!(c.engine().generation(), 2);
    }

    #[test]
    fn test_resume_after_manual_step_waits_an_interval() {
        let mut c = controller(5, 5);
        toggle_at(&mut c, &[(1, 2), (2, 2), (3, 2)]);
        press(&mut c, Command::Confirm);
        c.handle(Command::ToggleAutoAnimation, 0.0).unwrap();
        c.handle(Command::Confirm, 2.0).unwrap();
        assert_eq!(c.engine().generation(), 1);

        c.handle(Command::ToggleAutoAnimation, 2.1).unwrap();
        assert!(!c.tick(2.2));
        assert!(c.tick(2.5));
        assert_eq!(c.engine().generation(), 2);
    }

    #[test]
    fn test_editing_commands_ignored_while_running() {
        let mut c = controller(5, 5);
        press(&mut c, Command::Confirm);
        press(&mut c, Command::ToggleCell);
        press(&mut c, Command::RandomFill);
        press(&mut c, Command::MoveCursor(Direction::Right));
        assert_eq!(c.engine().grid().live_count(), 0);
        assert_eq!(c.cursor(), (0, 0));
    }

    #[test]
    fn test_resize_request() {
        let mut c = controller(10, 10);
        press(&mut c, Command::RandomFill);
        press(&mut c, Command::MoveCursor(Direction::Down));
        press(&mut c, Command::ResizeRequest { height: 5, width: 5 });
        let snap = c.snapshot();
        assert_eq!((snap.grid.height(), snap.grid.width()), (5, 5));
        assert_eq!(snap.grid.live_count(), 0);
        assert_eq!((snap.generation, snap.population), (0, 0));
        assert_eq!(snap.cursor, Some((0, 0)));
    }

    #[test]
    fn test_invalid_resize_request_is_rejected() {
        let mut c = controller(10, 10);
        toggle_at(&mut c, &[(3, 3)]);
        let before = c.engine().grid().clone();
        let err = c
            .handle(Command::ResizeRequest { height: 0, width: 10 }, 0.0)
            .unwrap_err();
        assert_eq!(err, LifeError::InvalidSize { height: 0, width: 10 });
        assert_eq!(c.engine().grid(), &before);
        assert_eq!(c.cursor(), (3, 3));
    }

    #[test]
    fn test_set_tick_interval() {
        let mut c = controller(5, 5);
        press(&mut c, Command::SetTickInterval(0.1));
        assert_eq!(c.tick_interval(), 0.1);
        assert!(c.handle(Command::SetTickInterval(-2.0), 0.0).is_err());
        assert_eq!(c.tick_interval(), 0.1);
    }

    #[test]
    fn test_seeded_random_fill_is_reproducible() {
        let engine = SimulationEngine::new(8, 8).unwrap();
        let mut a = InteractionController::new(engine.clone(), 0.5)
            .unwrap()
            .with_seed(Some(4));
        let mut b = InteractionController::new(engine, 0.5)
            .unwrap()
            .with_seed(Some(4));
        press(&mut a, Command::RandomFill);
        press(&mut b, Command::RandomFill);
        assert_eq!(a.engine().grid(), b.engine().grid());
    }

    #[test]
    fn test_reset_returns_to_clean_editing() {
        let mut c = controller(5, 5);
        toggle_at(&mut c, &[(1, 2), (2, 2), (3, 2)]);
        press(&mut c, Command::Confirm);
        c.tick(0.0);
        c.reset();
        let snap = c.snapshot();
        assert_eq!(snap.mode, Mode::Editing);
        assert_eq!(snap.cursor, Some((0, 0)));
        assert_eq!((snap.generation, snap.population), (0, 0));
        assert_eq!(snap.grid.live_count(), 0);
    }

    #[test]
    fn test_resize_console_is_ignored() {
        let mut c = controller(5, 5);
        toggle_at(&mut c, &[(1, 1)]);
        assert_eq!(press(&mut c, Command::ResizeConsole), Flow::Continue);
        assert_eq!(c.engine().grid().live_count(), 1);
        assert_eq!(c.mode(), Mode::Editing);
    }
}
