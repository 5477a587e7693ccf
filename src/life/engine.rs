use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{Grid, LifeError};

/// Owns a grid and the generation/population counters that describe it.
///
/// Counters are only resynchronised by [`advance`](Self::advance), [`reset`](Self::reset)
/// and [`resize`](Self::resize). Edits (toggle, random fill, clear) leave them as they were
/// until the next generation is computed.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    grid: Grid,
    generation: u64,
    population: usize,
}

impl SimulationEngine {
    pub fn new(height: usize, width: usize) -> Result<Self, LifeError> {
        Ok(Self::from_grid(Grid::new(height, width)?))
    }

    /// Wrap an existing grid. Population is counted from it, generation starts at 0.
    pub fn from_grid(grid: Grid) -> Self {
        let population = grid.live_count();
        SimulationEngine {
            grid,
            generation: 0,
            population,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.population
    }

    /// Compute one generation. Returns `true` when nothing changed (a fixed point).
    pub fn advance(&mut self) -> bool {
        let stable = self.grid.step();
        self.population = self.grid.live_count();
        self.generation += 1;
        if stable {
            log::debug!(
                "fixed point at generation {} with population {}",
                self.generation,
                self.population
            );
        }
        stable
    }

    /// Kill every cell and zero both counters.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.generation = 0;
        self.population = 0;
    }

    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        self.grid.toggle(x, y)
    }

    pub fn set_alive(&mut self, x: usize, y: usize) {
        self.grid.set_alive(x, y);
    }

    /// Randomise the board. With a seed the result is reproducible.
    pub fn fill_random(&mut self, seed: Option<u64>) {
        match seed {
            Some(seed) => self.grid.fill_random(&mut StdRng::seed_from_u64(seed)),
            None => self.grid.fill_random(&mut rand::rng()),
        }
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Replace the board with an empty one of the new size and zero the counters.
    /// Invalid sizes leave grid and counters untouched.
    pub fn resize(&mut self, height: usize, width: usize) -> Result<(), LifeError> {
        self.grid.resize(height, width)?;
        self.generation = 0;
        self.population = 0;
        log::debug!("grid resized to {height}x{width}");
        Ok(())
    }
}
