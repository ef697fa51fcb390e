//! Generation advance for a [`Grid`]
//!
//! Every next state is computed from an untouched snapshot of the current
//! generation and written into a separate grid, so updates are simultaneous.

mod index;

use crate::{CellPos, CellState, Grid};

/// Row/column offsets of the 3x3 block around a cell, in neighborhood bit order
const OFFSETS: [CellPos; 9] = [
    CellPos::new(-1, -1),
    CellPos::new(-1, 0),
    CellPos::new(-1, 1),
    CellPos::new(0, -1),
    CellPos::new(0, 0),
    CellPos::new(0, 1),
    CellPos::new(1, -1),
    CellPos::new(1, 0),
    CellPos::new(1, 1),
];

/// Packs the 3x3 block centered on `pos` into a 9-bit mask
///
/// Cells off the grid read as dead, so edges have no wraparound. Offsets
/// that would leave the `i32` coordinate range are dead as well.
fn neighborhood(grid: &Grid, pos: CellPos) -> u16 {
    OFFSETS
        .iter()
        .enumerate()
        .filter(|&(_, &offset)| {
            pos.checked_add(offset).is_some_and(|cell| grid.get(cell).is_alive())
        })
        .fold(0u16, |mask, (bit, _)| mask | 1u16 << bit)
}

/// Number of live cells in the Moore neighborhood of `pos`
pub fn live_neighbors(grid: &Grid, pos: impl Into<CellPos>) -> u8 {
    (neighborhood(grid, pos.into()) & !index::CENTER).count_ones() as u8
}

/// Computes the next generation of `current` into a fresh grid
pub fn step(current: &Grid) -> Grid {
    let mut next = current.clone();
    step_into(current, &mut next);
    next
}

/// Computes the next generation of `current` into `next`
///
/// `next` is used as a scratch buffer and is resized to match `current` when
/// the dimensions differ. Its previous contents are never read.
pub fn step_into(current: &Grid, next: &mut Grid) {
    if !next.same_size(current) {
        *next = current.clone();
    }

    for (pos, cell) in current.positions().zip(next.cells_mut()) {
        *cell = CellState::from(index::next_alive(neighborhood(current, pos)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn grid(pattern: &str) -> Grid {
        pattern.parse().expect("valid pattern")
    }

    #[test]
    fn counts_neighbors() {
        let g = grid(
            "
            ###
            #.#
            ###
            ",
        );

        assert_eq!(live_neighbors(&g, (1, 1)), 8);
        assert_eq!(live_neighbors(&g, (0, 0)), 2);
        assert_eq!(live_neighbors(&g, (0, 1)), 4);
    }

    #[test]
    fn center_not_counted() {
        let g = grid(
            "
            ...
            .#.
            ...
            ",
        );

        assert_eq!(live_neighbors(&g, (1, 1)), 0);
    }

    #[test]
    fn corner_has_no_wraparound() {
        let g = grid(
            "
            #...#
            .....
            .....
            #...#
            ",
        );

        assert_eq!(live_neighbors(&g, (0, 0)), 0);
        assert_eq!(live_neighbors(&g, (3, 4)), 0);
    }

    #[test]
    fn extreme_coordinates_have_no_neighbors() {
        let g = grid(
            "
            ##
            ##
            ",
        );

        assert_eq!(live_neighbors(&g, (i32::MAX, 0)), 0);
        assert_eq!(live_neighbors(&g, (i32::MIN, i32::MIN)), 0);
        assert_eq!(live_neighbors(&g, (i32::MAX, i32::MAX)), 0);
        assert_eq!(live_neighbors(&g, (-1, -1)), 1);
    }

    #[test]
    fn glider_moves() {
        let g = grid(
            "
            .#....
            ..#...
            ###...
            ......
            ......
            ......
            ",
        );
        let expected = grid(
            "
            ......
            ..#...
            ...#..
            .###..
            ......
            ......
            ",
        );

        let mut next = g.clone();
        for _ in 0..4 {
            next = step(&next);
        }
        assert_eq!(next, expected);
    }

    #[test]
    fn step_into_overwrites_scratch() {
        let g = grid(
            "
            .....
            ..#..
            ..#..
            ..#..
            .....
            ",
        );
        let mut scratch = Grid::new(5, 5).unwrap();
        scratch.randomize(&mut StdRng::seed_from_u64(17), 0.5);

        step_into(&g, &mut scratch);

        assert_eq!(scratch, step(&g));
    }

    #[test]
    fn step_into_resizes_scratch() {
        let g = grid(
            "
            ##
            ##
            ",
        );
        let mut scratch = Grid::new(7, 3).unwrap();

        step_into(&g, &mut scratch);

        assert_eq!(scratch, g);
    }
}
