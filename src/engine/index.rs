use std::sync::OnceLock;

/// Every arrangement of a cell and its 8 neighbors
const NEIGHBORHOODS: usize = 1 << 9;
/// Bit of the cell being decided within a neighborhood mask
pub(super) const CENTER: u16 = 0b000_010_000;

type RuleIndex = [bool; NEIGHBORHOODS];

/// Returns the shared B3/S23 lookup table, building it on first use
pub(super) fn rule_index() -> &'static RuleIndex {
    static INDEX: OnceLock<RuleIndex> = OnceLock::new();
    INDEX.get_or_init(build_rule_index)
}

/// Decides whether the center cell of `neighborhood` is alive next generation
#[inline]
pub(super) fn next_alive(neighborhood: u16) -> bool {
    rule_index()[neighborhood as usize & (NEIGHBORHOODS - 1)]
}

/// Builds the lookup table for the Game of Life rule
///
/// A neighborhood is a 9-bit mask read top row first, left to right, so
/// `(row - 1, col - 1)` is bit 0 and `(row + 1, col + 1)` is bit 8. The cell
/// itself sits on [`CENTER`].
fn build_rule_index() -> RuleIndex {
    let mut index = [false; NEIGHBORHOODS];
    for (mask, next) in index.iter_mut().enumerate() {
        let alive = mask as u16 & CENTER != 0;
        let neighbors = (mask as u16 & !CENTER).count_ones();
        *next = matches!((alive, neighbors), (true, 2 | 3) | (false, 3));
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mask with the center set as requested and the first `neighbors` ring bits set
    fn neighborhood(alive: bool, neighbors: usize) -> u16 {
        const RING: [u16; 8] = [
            0b000_000_001,
            0b000_000_010,
            0b000_000_100,
            0b000_001_000,
            0b000_100_000,
            0b001_000_000,
            0b010_000_000,
            0b100_000_000,
        ];

        let center = if alive { CENTER } else { 0 };
        RING.iter().take(neighbors).fold(center, |acc, bit| acc | bit)
    }

    #[test]
    fn survival() {
        assert!(next_alive(neighborhood(true, 2)));
        assert!(next_alive(neighborhood(true, 3)));
    }

    #[test]
    fn death() {
        for n in [0, 1, 4, 5, 6, 7, 8] {
            assert!(!next_alive(neighborhood(true, n)), "alive with {n}");
        }
    }

    #[test]
    fn birth_only_on_three() {
        for n in 0..=8 {
            assert_eq!(next_alive(neighborhood(false, n)), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn table_is_shared() {
        assert!(std::ptr::eq(rule_index(), rule_index()));
    }
}
