/// A `(row, col)` coordinate on a [`Grid`](crate::Grid)
///
/// Signed so that coordinates just off the edge of a grid can be expressed
/// and then rejected by the grid's bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: i32,
    pub col: i32,
}
impl CellPos {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Offsets this coordinate, or [`None`] if either axis leaves the `i32` range
    #[inline]
    pub fn checked_add(self, offset: CellPos) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(offset.row)?,
            col: self.col.checked_add(offset.col)?,
        })
    }
}
impl From<(i32, i32)> for CellPos {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_add_offsets() {
        let p = CellPos::from((2, 3));

        assert_eq!(p.checked_add(CellPos::new(-1, 1)), Some(CellPos::new(1, 4)));
    }

    #[test]
    fn checked_add_stops_at_i32_limits() {
        assert_eq!(CellPos::new(i32::MAX, 0).checked_add(CellPos::new(1, 0)), None);
        assert_eq!(CellPos::new(0, i32::MIN).checked_add(CellPos::new(0, -1)), None);
    }
}
