/// Single grid axis index, used for columns, rows and grid dimensions.
///
/// Signed so that world points left of or below the origin map to negative indices instead of
/// wrapping around.
pub type Coord = i32;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional cell coordinates `(col, row)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Only meaningful for coordinates that passed a bounds check.
    fn to_nd_index(self) -> Self::Output {
        [self.0 as usize, self.1 as usize]
    }
}

/// Number of cells in a `width` by `height` grid, zero for degenerate dimensions.
pub const fn mult(width: Coord, height: Coord) -> CellCount {
    if width <= 0 || height <= 0 {
        return 0;
    }
    (width as CellCount).saturating_mul(height as CellCount)
}

const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (Coord, Coord), bounds: Coord2) -> Option<Coord2> {
    let (col, row) = coords;
    let (dc, dr) = delta;
    let (width, height) = bounds;

    let next_col = col.checked_add(dc)?;
    if next_col < 0 || next_col >= width {
        return None;
    }

    let next_row = row.checked_add(dr)?;
    if next_row < 0 || next_row >= height {
        return None;
    }

    Some((next_col, next_row))
}

/// Iterates the in-bounds 8-neighbors of a cell.
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
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
