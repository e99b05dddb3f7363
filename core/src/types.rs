use ndarray::Array2;

/// Single grid axis, used for row/column counts and positions.
pub type Coord = u8;

/// Count type used for mine, flag and cell totals.
pub type CellCount = u16;

/// Grid position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        // grids are built from `Coord` sizes, so both dimensions fit
        let bounds = (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, bounds)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the up-to-8 grid neighbours of a cell, clipped at the grid edge.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn neighbors(center: Coord2, bounds: Coord2) -> Vec<Coord2> {
        NeighborIter::new(center, bounds).collect()
    }

    #[test]
    fn corner_edge_and_interior_counts() {
        assert_eq!(neighbors((0, 0), (9, 9)).len(), 3);
        assert_eq!(neighbors((8, 8), (9, 9)).len(), 3);
        assert_eq!(neighbors((0, 4), (9, 9)).len(), 5);
        assert_eq!(neighbors((4, 8), (9, 9)).len(), 5);
        assert_eq!(neighbors((4, 4), (9, 9)).len(), 8);
    }

    #[test]
    fn neighbors_exclude_center_and_stay_in_bounds() {
        let found = neighbors((1, 0), (3, 2));
        assert_eq!(found, [(0, 0), (0, 1), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert!(neighbors((0, 0), (1, 1)).is_empty());
    }

    #[test]
    fn extension_trait_uses_array_shape() {
        let grid: Array2<bool> = Array2::default((2, 5));
        assert_eq!(grid.iter_neighbors((1, 4)).count(), 3);
    }
}
