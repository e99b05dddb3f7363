use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform placement by rejection sampling: draw a random cell, keep it unless it is
/// already mined or is the first click, repeat until enough mines are down.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectionPlacer<R = SmallRng> {
    rng: R,
}

impl RejectionPlacer<SmallRng> {
    /// Reproducible placer, the same seed always yields the same sequence of boards.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RejectionPlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> MinePlacer for RejectionPlacer<R> {
    fn place(&mut self, mask: &mut Array2<bool>, mines: CellCount, exclude: Coord2) {
        let (rows, cols) = mask.dim();
        if rows == 0 || cols == 0 {
            return;
        }
        let (rows, cols) = (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        );

        let already_mined = mask.iter().filter(|&&is_mine| is_mine).count();
        let exclude_blocks = exclude.0 < rows && exclude.1 < cols && !mask[exclude.to_nd_index()];
        let free = usize::from(mult(rows, cols))
            .saturating_sub(already_mined)
            .saturating_sub(usize::from(exclude_blocks));

        // sampling could never finish otherwise
        let mines = if usize::from(mines) > free {
            log::warn!(
                "Minefield too small, requested {} mines but only {} cells are free",
                mines,
                free
            );
            free as CellCount
        } else {
            mines
        };

        let mut placed: CellCount = 0;
        let mut draws: u32 = 0;
        while placed < mines {
            let coords = (
                self.rng.random_range(0..rows),
                self.rng.random_range(0..cols),
            );
            draws += 1;

            if coords == exclude {
                continue;
            }
            let cell = &mut mask[coords.to_nd_index()];
            if *cell {
                continue;
            }
            *cell = true;
            placed += 1;
        }

        log::debug!(
            "Placed {} mines in {} draws, first click at {:?}",
            placed,
            draws,
            exclude
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mined_cells(mask: &Array2<bool>) -> usize {
        mask.iter().filter(|&&is_mine| is_mine).count()
    }

    #[test]
    fn places_exact_count_and_avoids_first_click() {
        for seed in 0..50 {
            let mut mask: Array2<bool> = Array2::default((9, 9));
            RejectionPlacer::seeded(seed).place(&mut mask, 10, (4, 4));

            assert_eq!(mined_cells(&mask), 10);
            assert!(!mask[[4, 4]]);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let mut first: Array2<bool> = Array2::default((16, 30));
        let mut second: Array2<bool> = Array2::default((16, 30));

        RejectionPlacer::seeded(7).place(&mut first, 99, (0, 0));
        RejectionPlacer::seeded(7).place(&mut second, 99, (0, 0));

        assert_eq!(first, second);
    }

    #[test]
    fn fills_every_cell_but_the_first_click() {
        let mut mask: Array2<bool> = Array2::default((3, 3));
        RejectionPlacer::seeded(1).place(&mut mask, 8, (1, 2));

        assert_eq!(mined_cells(&mask), 8);
        assert!(!mask[[1, 2]]);
    }

    #[test]
    fn clamps_impossible_requests() {
        let mut mask: Array2<bool> = Array2::default((2, 2));
        RejectionPlacer::seeded(3).place(&mut mask, 10, (0, 0));

        assert_eq!(mined_cells(&mask), 3);
        assert!(!mask[[0, 0]]);
    }

    #[test]
    fn zero_mines_leaves_grid_clear() {
        let mut mask: Array2<bool> = Array2::default((4, 4));
        RejectionPlacer::seeded(9).place(&mut mask, 0, (0, 0));

        assert_eq!(mined_cells(&mask), 0);
    }
}
