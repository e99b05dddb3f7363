use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;
pub use random::*;

mod random;

/// Strategy deciding where mines go once the first cell is known.
pub trait MinePlacer {
    /// Sets exactly `mines` cells of `mask`, never `exclude`, when the grid allows it.
    fn place(&mut self, mask: &mut Array2<bool>, mines: CellCount, exclude: Coord2);
}

impl<P: MinePlacer + ?Sized> MinePlacer for &mut P {
    fn place(&mut self, mask: &mut Array2<bool>, mines: CellCount, exclude: Coord2) {
        (**self).place(mask, mines, exclude)
    }
}

/// Places mines on a fixed list of positions, skipping the first click.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedPlacer {
    mines: Vec<Coord2>,
}

impl FixedPlacer {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MinePlacer for FixedPlacer {
    fn place(&mut self, mask: &mut Array2<bool>, mines: CellCount, exclude: Coord2) {
        let (rows, cols) = mask.dim();
        let mut placed: CellCount = 0;
        for &coords in &self.mines {
            if placed >= mines {
                break;
            }
            if coords == exclude {
                log::warn!("Skipping fixed mine at {:?}, it is the first click", coords);
                continue;
            }
            if usize::from(coords.0) >= rows || usize::from(coords.1) >= cols {
                log::warn!("Skipping fixed mine at {:?}, outside the grid", coords);
                continue;
            }
            let cell = &mut mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }
    }
}

/// Number of mines around `coords` in `mask`.
pub fn count_adjacent(mask: &Array2<bool>, coords: Coord2) -> u8 {
    let count = mask
        .iter_neighbors(coords)
        .filter(|&pos| mask[pos.to_nd_index()])
        .count();
    // at most 8 neighbours
    count as u8
}

/// Adjacency count for every non-mine cell; mined cells stay 0.
pub fn adjacency_counts(mask: &Array2<bool>) -> Array2<u8> {
    let mut counts = Array2::zeros(mask.dim());
    for ((row, col), &is_mine) in mask.indexed_iter() {
        if is_mine {
            continue;
        }
        // indices come from a grid built with `Coord` dimensions
        let coords = (row as Coord, col as Coord);
        counts[(row, col)] = count_adjacent(mask, coords);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(size: Coord2, mines: &[Coord2]) -> Array2<bool> {
        let mut mask = Array2::default(size.to_nd_index());
        for &coords in mines {
            mask[coords.to_nd_index()] = true;
        }
        mask
    }

    #[test]
    fn adjacency_counts_match_neighbourhood() {
        let mask = mask_from((3, 3), &[(0, 0), (2, 2)]);
        let counts = adjacency_counts(&mask);

        assert_eq!(counts[[0, 0]], 0);
        assert_eq!(counts[[2, 2]], 0);
        assert_eq!(counts[[1, 1]], 2);
        assert_eq!(counts[[0, 1]], 1);
        assert_eq!(counts[[0, 2]], 0);
        assert_eq!(counts[[2, 0]], 0);
        assert_eq!(counts[[1, 2]], 1);
    }

    #[test]
    fn surrounded_cell_counts_eight() {
        let mut mines = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                if (row, col) != (1, 1) {
                    mines.push((row, col));
                }
            }
        }
        let mask = mask_from((3, 3), &mines);
        assert_eq!(count_adjacent(&mask, (1, 1)), 8);
    }

    #[test]
    fn fixed_placer_skips_first_click_and_out_of_bounds() {
        let mut mask: Array2<bool> = Array2::default((2, 2));
        let mut placer = FixedPlacer::new([(0, 0), (1, 1), (5, 5)]);

        placer.place(&mut mask, 3, (0, 0));

        assert!(!mask[[0, 0]]);
        assert!(mask[[1, 1]]);
        assert_eq!(mask.iter().filter(|&&m| m).count(), 1);
    }

    #[test]
    fn fixed_placer_stops_at_requested_count() {
        let mut mask: Array2<bool> = Array2::default((2, 2));
        let mut placer = FixedPlacer::new([(0, 1), (1, 0), (1, 1)]);

        placer.place(&mut mask, 2, (0, 0));

        assert!(mask[[0, 1]]);
        assert!(mask[[1, 0]]);
        assert!(!mask[[1, 1]]);
    }
}
