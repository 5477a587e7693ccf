use rand::RngExt;

use super::LifeError;

/// Toroidal board of cells with a second buffer for computing the next generation.
/// Storage is row-major with the origin at the top-left.
#[derive(Debug, Clone)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<bool>,
    // Written during a step, then swapped with `cells`. Never read mid-pass.
    next: Vec<bool>,
}

impl Grid {
    /// Create a fully dead grid. Both dimensions must be at least 1.
    pub fn new(height: usize, width: usize) -> Result<Self, LifeError> {
        if height == 0 || width == 0 {
            return Err(LifeError::InvalidSize { height, width });
        }
        let size = height * width;
        Ok(Grid {
            height,
            width,
            cells: vec![false; size],
            next: vec![false; size],
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Cell state at column `x`, row `y`. Coordinates outside the grid read as dead.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.contains(x, y) && self.cells[self.index(x, y)]
    }

    /// Flip one cell. Returns `false` and leaves the grid alone when out of range.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = !self.cells[idx];
        true
    }

    /// Make one cell live. Out-of-range coordinates are ignored.
    pub fn set_alive(&mut self, x: usize, y: usize) {
        if self.contains(x, y) {
            let idx = self.index(x, y);
            self.cells[idx] = true;
        }
    }

    /// Each cell independently live with probability one half.
    pub fn fill_random<R: RngExt>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = rng.random_bool(0.5);
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Reallocate to new dimensions with every cell dead. Prior content is dropped.
    /// On invalid dimensions the grid is left exactly as it was.
    pub fn resize(&mut self, height: usize, width: usize) -> Result<(), LifeError> {
        *self = Grid::new(height, width)?;
        Ok(())
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Live neighbours among the eight surrounding cells, wrapping at every edge.
    pub fn count_neighbors(&self, x: usize, y: usize) -> u8 {
        let w = self.width as isize;
        let h = self.height as isize;
        let mut count = 0u8;
        for dy in [-1isize, 0, 1] {
            for dx in [-1isize, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = (x as isize + dx).rem_euclid(w) as usize;
                let ny = (y as isize + dy).rem_euclid(h) as usize;
                if self.cells[ny * self.width + nx] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Compute the next B3/S23 generation into the spare buffer and swap it in.
    /// Returns `true` when the new generation equals the one it replaced.
    pub(crate) fn step(&mut self) -> bool {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.index(x, y);
                let neighbors = self.count_neighbors(x, y);
                self.next[idx] = matches!(
                    (self.cells[idx], neighbors),
                    (true, 2) | (true, 3) | (false, 3)
                );
            }
        }
        let unchanged = self.cells == self.next;
        std::mem::swap(&mut self.cells, &mut self.next);
        unchanged
    }

    /// Iterate rows of cell states, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.height == other.height && self.width == other.width && self.cells == other.cells
    }
}

impl Eq for Grid {}
