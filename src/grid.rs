use crate::CellPos;
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("invalid pattern on line {line}: {reason}")]
    InvalidPattern { line: usize, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    Alive,
    #[default]
    Dead,
}
impl CellState {
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Self::Alive => Self::Dead,
            Self::Dead => Self::Alive,
        }
    }
}
impl From<bool> for CellState {
    #[inline]
    fn from(alive: bool) -> Self {
        if alive { Self::Alive } else { Self::Dead }
    }
}

/// Largest number of cells a single [`Grid`] may hold
pub const MAX_CELLS: usize = 1 << 28;

/// A fixed-size field of cells surrounded by an implicit halo of dead cells
///
/// Reads outside of the grid always return [`CellState::Dead`] and writes
/// outside of it are ignored, so callers never have to bounds-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates a grid with every cell dead
    ///
    /// Both sides must be positive and the grid may hold at most
    /// [`MAX_CELLS`] cells.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let len = rows
            .checked_mul(cols)
            .filter(|&len| len > 0 && len <= MAX_CELLS)
            .ok_or(GridError::InvalidDimensions { rows, cols })?;

        Ok(Self {
            rows,
            cols,
            cells: vec![CellState::Dead; len],
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }
    #[inline]
    pub fn same_size(&self, other: &Grid) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    fn index(&self, pos: CellPos) -> Option<usize> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    #[inline]
    pub fn contains(&self, pos: impl Into<CellPos>) -> bool {
        self.index(pos.into()).is_some()
    }

    #[inline]
    pub fn get(&self, pos: impl Into<CellPos>) -> CellState {
        self.index(pos.into()).map_or(CellState::Dead, |i| self.cells[i])
    }

    #[inline]
    pub fn set(&mut self, pos: impl Into<CellPos>, state: CellState) {
        if let Some(i) = self.index(pos.into()) {
            self.cells[i] = state;
        }
    }

    pub fn toggle(&mut self, pos: impl Into<CellPos>) {
        if let Some(i) = self.index(pos.into()) {
            self.cells[i] = self.cells[i].toggled();
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(CellState::Dead);
    }

    /// Independently makes each cell alive with probability `live_probability`
    ///
    /// Probabilities at or below zero (and NaN) leave every cell dead, while
    /// probabilities at or above one make every cell alive.
    pub fn randomize<R: rand::Rng + ?Sized>(&mut self, rng: &mut R, live_probability: f64) {
        for cell in self.cells.iter_mut() {
            *cell = CellState::from(rng.random::<f64>() < live_probability);
        }
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Live cells in row-major order
    pub fn iter_alive(&self) -> impl Iterator<Item = CellPos> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(move |(i, _)| CellPos::new((i / cols) as i32, (i % cols) as i32))
    }

    /// Every coordinate of the grid in row-major order
    pub(crate) fn positions(&self) -> impl Iterator<Item = CellPos> + use<> {
        let (rows, cols) = (self.rows as i32, self.cols as i32);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| CellPos::new(row, col)))
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [CellState] {
        &mut self.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.chunks(self.cols).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for cell in row {
                f.write_str(if cell.is_alive() { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parses rows of `#` or `O` (alive) and `.` (dead)
    ///
    /// Blank lines are skipped and every remaining line must be the same width.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<(usize, &str)> = s
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();

        let cols = lines.first().map_or(0, |(_, line)| line.chars().count());
        let mut grid = Grid::new(lines.len(), cols)?;
        for (row, (line_no, line)) in lines.into_iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(GridError::InvalidPattern {
                    line: line_no,
                    reason: format!("expected {} cells, found {}", cols, width),
                });
            }
            for (col, c) in line.chars().enumerate() {
                let state = match c {
                    '#' | 'O' => CellState::Alive,
                    '.' => CellState::Dead,
                    other => {
                        return Err(GridError::InvalidPattern {
                            line: line_no,
                            reason: format!("unexpected character {:?}", other),
                        });
                    }
                };
                grid.set((row as i32, col as i32), state);
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(3, 4).unwrap();

        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.alive_count(), 0);
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(GridError::InvalidDimensions { rows: 0, cols: 5 })
        );
        assert_eq!(
            Grid::new(5, 0),
            Err(GridError::InvalidDimensions { rows: 5, cols: 0 })
        );
    }

    #[test]
    fn rejects_oversized_dimensions() {
        assert_eq!(
            Grid::new(2_000_000_000, 2_000_000_000),
            Err(GridError::InvalidDimensions {
                rows: 2_000_000_000,
                cols: 2_000_000_000,
            })
        );
        assert!(Grid::new(MAX_CELLS + 1, 1).is_err());
        assert!(Grid::new(usize::MAX, 2).is_err());
    }


    #[test]
    fn out_of_bounds_reads_dead() {
        let mut grid = Grid::new(2, 2).unwrap();
        for row in 0..2 {
            for col in 0..2 {
                grid.set((row, col), CellState::Alive);
            }
        }

        assert_eq!(grid.get((-1, 0)), CellState::Dead);
        assert_eq!(grid.get((0, -1)), CellState::Dead);
        assert_eq!(grid.get((2, 0)), CellState::Dead);
        assert_eq!(grid.get((0, 2)), CellState::Dead);
        assert_eq!(grid.get((1, 1)), CellState::Alive);
    }

    #[test]
    fn out_of_bounds_writes_ignored() {
        let mut grid = Grid::new(3, 3).unwrap();
        let before = grid.clone();

        grid.set((-1, 0), CellState::Alive);
        grid.set((3, 0), CellState::Alive);
        grid.set((0, 3), CellState::Alive);
        grid.toggle((0, -1));

        assert_eq!(grid, before);
    }

    #[test]
    fn toggle_flips_cell() {
        let mut grid = Grid::new(2, 2).unwrap();

        grid.toggle((1, 0));
        assert!(grid.get((1, 0)).is_alive());
        grid.toggle((1, 0));
        assert!(!grid.get((1, 0)).is_alive());
    }

    #[test]
    fn randomize_is_reproducible() {
        let mut a = Grid::new(16, 16).unwrap();
        let mut b = Grid::new(16, 16).unwrap();

        a.randomize(&mut StdRng::seed_from_u64(7), 0.3);
        b.randomize(&mut StdRng::seed_from_u64(7), 0.3);

        assert_eq!(a, b);
    }

    #[test]
    fn randomize_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new(8, 8).unwrap();

        grid.randomize(&mut rng, 1.0);
        assert_eq!(grid.alive_count(), 64);
        grid.randomize(&mut rng, 0.0);
        assert_eq!(grid.alive_count(), 0);
        grid.randomize(&mut rng, f64::NAN);
        assert_eq!(grid.alive_count(), 0);
    }

    #[test]
    fn iter_alive_is_row_major() {
        let grid: Grid = "
            .#.
            #..
            ..#
        "
        .parse()
        .unwrap();

        let alive: Vec<_> = grid.iter_alive().collect();
        assert_eq!(
            alive,
            vec![CellPos::new(0, 1), CellPos::new(1, 0), CellPos::new(2, 2)]
        );
    }

    #[test]
    fn display_matches_pattern() {
        let pattern = "#..\n.O.\n..#";
        let grid: Grid = pattern.parse().unwrap();

        assert_eq!(grid.to_string(), "#..\n.#.\n..#");
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = "##\n#".parse::<Grid>().unwrap_err();

        assert!(matches!(err, GridError::InvalidPattern { line: 2, .. }));
    }

    #[test]
    fn parse_rejects_unknown_cells() {
        let err = "#x".parse::<Grid>().unwrap_err();

        assert!(matches!(err, GridError::InvalidPattern { line: 1, .. }));
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert!(matches!(
            "".parse::<Grid>(),
            Err(GridError::InvalidDimensions { rows: 0, cols: 0 })
        ));
    }
}
