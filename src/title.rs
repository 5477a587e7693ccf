use crate::life::{Grid, SimulationEngine};

/// Letters that seed the title board. `#` is a live cell.
pub const TITLE_GLYPHS: &[&str] = &[
    "#     ###  ####  ####",
    "#      #   #     #   ",
    "#      #   ###   ### ",
    "#      #   #     #   ",
    "####  ###  #     ####",
];

const MARGIN: usize = 3;
const HOLD_SECS: f64 = 1.5;
const MAX_GENERATIONS: u64 = 150;

/// Decorative Game of Life that starts from a bitmap and restarts when it settles.
pub struct TitleAnimator {
    engine: SimulationEngine,
    glyphs: &'static [&'static str],
    interval: f64,
    last_step: Option<f64>,
    // Time the seeded letters were first shown, so they stay readable for a moment
    seeded_at: Option<f64>,
    enabled: bool,
}

impl TitleAnimator {
    pub fn new(glyphs: &'static [&'static str], interval: f64, enabled: bool) -> Self {
        TitleAnimator {
            engine: SimulationEngine::from_grid(seed_grid(glyphs)),
            glyphs,
            interval,
            last_step: None,
            seeded_at: None,
            enabled,
        }
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.reseed();
        }
    }

    /// Restore the letters.
    pub fn reseed(&mut self) {
        self.engine = SimulationEngine::from_grid(seed_grid(self.glyphs));
        self.last_step = None;
        self.seeded_at = None;
    }

    /// Advance if due. Returns whether the board changed.
    pub fn update(&mut self, now: f64) -> bool {
        if !self.enabled {
            return false;
        }
        let shown = *self.seeded_at.get_or_insert(now);
        if now - shown < HOLD_SECS {
            return false;
        }
        if let Some(last) = self.last_step
            && now - last < self.interval
        {
            return false;
        }
        let stable = self.engine.advance();
        self.last_step = Some(now);
        if stable || self.engine.population() == 0 || self.engine.generation() >= MAX_GENERATIONS {
            self.reseed();
        }
        true
    }
}

/// Build a grid that fits the glyph bitmap plus a dead margin on every side.
pub fn seed_grid(glyphs: &[&str]) -> Grid {
    let rows = glyphs.len();
    let cols = glyphs.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let mut grid = match Grid::new(rows + MARGIN * 2, cols + MARGIN * 2) {
        Ok(grid) => grid,
        Err(_) => unreachable!("margin keeps both sides non-zero"),
    };
    for (y, row) in glyphs.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            if ch == '#' {
                grid.set_alive(x + MARGIN, y + MARGIN);
            }
        }
    }
    grid
}
