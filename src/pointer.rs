use crate::{CellPos, CellState, Grid};

/// Size of one grid cell in pointer units (pixels, terminal columns, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: i32,
    pub height: i32,
}
impl CellSize {
    /// Returns [`None`] unless both sides are positive
    pub fn new(width: i32, height: i32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }
}
impl Default for CellSize {
    /// Two terminal columns by one row, which is roughly square
    fn default() -> Self {
        Self {
            width: 2,
            height: 1,
        }
    }
}

/// What a drag gesture does to the cells it passes over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintMode {
    Paint,
    Erase,
}
impl PaintMode {
    /// Erase when pressing a live cell, otherwise paint
    #[inline]
    pub fn for_cell(state: CellState) -> Self {
        match state {
            CellState::Alive => Self::Erase,
            CellState::Dead => Self::Paint,
        }
    }

    #[inline]
    pub fn state(self) -> CellState {
        match self {
            Self::Paint => CellState::Alive,
            Self::Erase => CellState::Dead,
        }
    }
}

/// Turns pointer gestures into cell edits
///
/// The preview cell only tracks what is under the pointer for the renderer;
/// it never changes the grid.
#[derive(Debug)]
pub struct PointerEditor {
    cell_size: CellSize,
    mode: Option<PaintMode>,
    preview: Option<CellPos>,
}

impl PointerEditor {
    pub fn new(cell_size: CellSize) -> Self {
        Self {
            cell_size,
            mode: None,
            preview: None,
        }
    }

    #[inline]
    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }
    /// The paint mode of the gesture in progress
    #[inline]
    pub fn mode(&self) -> Option<PaintMode> {
        self.mode
    }
    #[inline]
    pub fn preview(&self) -> Option<CellPos> {
        self.preview
    }

    /// Maps a pointer coordinate to the cell underneath it
    ///
    /// Uses euclidean division so points left of or above the origin land on
    /// negative (out of bounds) cells instead of being folded onto row/col 0.
    pub fn cell_at(&self, x: i32, y: i32) -> CellPos {
        CellPos {
            row: y.div_euclid(self.cell_size.height),
            col: x.div_euclid(self.cell_size.width),
        }
    }

    /// Starts a gesture, picking its paint mode from the pressed cell
    pub fn press(&mut self, x: i32, y: i32, grid: &mut Grid) {
        let cell = self.cell_at(x, y);
        let mode = PaintMode::for_cell(grid.get(cell));
        self.mode = Some(mode);
        grid.set(cell, mode.state());
        self.hover(x, y, grid);
    }

    /// Applies the current gesture's paint mode to the cell under the pointer
    pub fn drag(&mut self, x: i32, y: i32, grid: &mut Grid) {
        if let Some(mode) = self.mode {
            grid.set(self.cell_at(x, y), mode.state());
        }
        self.hover(x, y, grid);
    }

    pub fn release(&mut self) {
        self.mode = None;
    }

    /// Moves the preview cell, clearing it when the pointer leaves the grid
    pub fn hover(&mut self, x: i32, y: i32, grid: &Grid) {
        let cell = self.cell_at(x, y);
        self.preview = grid.contains(cell).then_some(cell);
    }

    pub fn leave(&mut self) {
        self.preview = None;
        self.mode = None;
    }
}
