use std::io;
use std::time::{Duration, Instant};

use crate::input::InputSource;
use crate::life::{Command, Flow, InteractionController, LifeError, Mode, Snapshot};

/// Monotonic time source in seconds.
pub trait Clock {
    fn now(&self) -> f64;

    /// Idle between loop turns.
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Wall clock measured from creation.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Where a session draws its state.
pub trait View {
    fn draw(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()>;

    /// Show a one-line message, e.g. a rejected command.
    fn notify(&mut self, message: &str) -> io::Result<()>;

    /// The next draw must repaint everything.
    fn invalidate(&mut self) {}
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Editing was cancelled
    Cancelled,
    /// The run was confirmed finished
    Finished,
    /// Quit requested
    Exited,
}

/// Frame pacing for the loop: how long to wait for input each turn.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    pub frame: Duration,
}

impl Pacing {
    pub fn from_fps(fps: u32) -> Self {
        Pacing {
            frame: Duration::from_secs_f64(1.0 / fps.clamp(1, 120) as f64),
        }
    }
}

/// Drive the controller until the user leaves. One command is pulled per turn,
/// then the timer is checked for an auto-advance.
pub fn run<I, C, V>(
    controller: &mut InteractionController,
    input: &mut I,
    clock: &C,
    view: &mut V,
    pacing: Pacing,
) -> io::Result<SessionEnd>
where
    I: InputSource,
    C: Clock,
    V: View,
{
    controller.begin_editing();
    let mut dirty = true;

    loop {
        if dirty {
            view.draw(&controller.snapshot())?;
            dirty = false;
        }

        let timeout = match controller.mode() {
            Mode::Editing => pacing.frame,
            Mode::Running | Mode::Stable => Duration::ZERO,
        };
        let mut idle = true;
        if let Some(command) = input.next_command(timeout)? {
            match controller.handle(command, clock.now()) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Cancelled) => return Ok(SessionEnd::Cancelled),
                Ok(Flow::Finished) => return Ok(SessionEnd::Finished),
                Ok(Flow::Exited) => return Ok(SessionEnd::Exited),
                Err(e) => report(view, &e)?,
            }
            if command == Command::ResizeConsole {
                view.invalidate();
            }
            dirty = true;
            idle = false;
        }

        if controller.tick(clock.now()) {
            dirty = true;
            idle = false;
        }

        // Nothing happened during a run: sleep until the next tick or frame, whichever is first
        if idle && controller.mode() != Mode::Editing {
            let wait = controller
                .time_to_next_tick(clock.now())
                .map_or(pacing.frame, |secs| {
                    // Clamp before converting: huge intervals overflow Duration
                    Duration::from_secs_f64(secs.min(pacing.frame.as_secs_f64()))
                });
            clock.sleep(wait);
        }
    }
}

fn report<V: View>(view: &mut V, error: &LifeError) -> io::Result<()> {
    log::debug!("rejected: {error}");
    view.notify(&error.to_string())
}
