use crate::agent::Position;

/// Offsets of the eight cells around a cell, row by row.
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Grid shape plus edge behaviour. Resolves relative moves to cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    /// Width in cells. Always positive.
    pub width: u32,
    /// Height in cells. Always positive.
    pub height: u32,
    /// Wrap around edges instead of clamping to them.
    pub toroidal: bool,
}

impl Topology {
    /// Describe a grid of the given size.
    pub fn new(width: u32, height: u32, toroidal: bool) -> Self {
        Self {
            width,
            height,
            toroidal,
        }
    }

    /// The cell reached from `pos` by moving `(dx, dy)`: wrapped on a torus,
    /// clamped to the border otherwise.
    pub fn offset(&self, pos: Position, dx: i64, dy: i64) -> Position {
        Position {
            x: self.resolve(pos.x, dx, self.width),
            y: self.resolve(pos.y, dy, self.height),
        }
    }

    /// The eight surrounding cells, in [`NEIGHBOR_OFFSETS`] order. Near a
    /// clamped border some entries repeat or equal `pos` itself.
    pub fn neighbors(&self, pos: Position) -> [Position; 8] {
        NEIGHBOR_OFFSETS.map(|(dx, dy)| self.offset(pos, dx, dy))
    }

    fn resolve(&self, coord: u32, delta: i64, extent: u32) -> u32 {
        let extent = i64::from(extent);
        let target = i64::from(coord) + delta;
        let resolved = if self.toroidal {
            target.rem_euclid(extent)
        } else {
            target.clamp(0, extent - 1)
        };
        // `resolved` lies in 0..extent, which fits in u32.
        resolved as u32
    }
}

/// Food available in every cell, stored row-major.
///
/// Values are kept in `[0, 1]` by the resource system; other writers
/// (foraging) only ever lower them.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceGrid {
    width: u32,
    height: u32,
    cells: Vec<f32>,
}

impl ResourceGrid {
    /// A grid filled with a single value.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width as usize * height as usize],
        }
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Food at a cell. Panics if the position lies outside the grid.
    pub fn get(&self, pos: Position) -> f32 {
        self.cells[self.index(pos)]
    }

    /// Overwrite the food at a cell.
    pub fn set(&mut self, pos: Position, value: f32) {
        let idx = self.index(pos);
        self.cells[idx] = value;
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    /// All cells, row-major, for bulk updates.
    pub fn cells_mut(&mut self) -> &mut [f32] {
        &mut self.cells
    }

    /// Clamp every cell into `[0, 1]`.
    pub fn clamp_unit(&mut self) {
        for cell in &mut self.cells {
            *cell = cell.clamp(0.0, 1.0);
        }
    }

    /// Average food per cell.
    pub fn mean(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.cells.iter().map(|&c| f64::from(c)).sum::<f64>() / self.cells.len() as f64
    }

    /// Total food on the grid.
    pub fn total(&self) -> f64 {
        self.cells.iter().map(|&c| f64::from(c)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toroidal_offset_wraps() {
        let topo = Topology::new(10, 4, true);
        assert_eq!(topo.offset(Position::new(0, 0), -1, -1), Position::new(9, 3));
        assert_eq!(topo.offset(Position::new(9, 3), 1, 1), Position::new(0, 0));
    }

    #[test]
    fn bounded_offset_clamps() {
        let topo = Topology::new(10, 4, false);
        assert_eq!(topo.offset(Position::new(0, 0), -1, -1), Position::new(0, 0));
        assert_eq!(topo.offset(Position::new(9, 3), 1, 1), Position::new(9, 3));
        assert_eq!(topo.offset(Position::new(5, 2), 1, -1), Position::new(6, 1));
    }

    #[test]
    fn neighbors_exclude_center_in_open_grid() {
        let topo = Topology::new(5, 5, false);
        let center = Position::new(2, 2);
        let neighbors = topo.neighbors(center);
        assert!(!neighbors.contains(&center));
        assert!(neighbors.contains(&Position::new(1, 1)));
        assert!(neighbors.contains(&Position::new(3, 3)));
    }

    #[test]
    fn neighbors_at_clamped_corner_fold_back() {
        let topo = Topology::new(5, 5, false);
        let corner = Position::new(0, 0);
        assert!(topo.neighbors(corner).contains(&corner));
    }

    #[test]
    fn grid_get_set_row_major() {
        let mut grid = ResourceGrid::filled(3, 2, 0.0);
        grid.set(Position::new(2, 1), 0.5);
        assert_eq!(grid.cells()[5], 0.5);
        assert_eq!(grid.get(Position::new(2, 1)), 0.5);
        assert_eq!(grid.cells().len(), 6);
    }

    #[test]
    fn clamp_unit_bounds_values() {
        let mut grid = ResourceGrid::filled(2, 1, 0.0);
        grid.cells_mut().copy_from_slice(&[-0.5, 1.5]);
        grid.clamp_unit();
        assert_eq!(grid.cells(), &[0.0, 1.0]);
    }

    #[test]
    fn mean_and_total() {
        let grid = ResourceGrid::filled(4, 4, 0.25);
        assert!((grid.mean() - 0.25).abs() < 1e-9);
        assert!((grid.total() - 4.0).abs() < 1e-9);
    }

    proptest::proptest! {
        #[test]
        fn offset_stays_on_grid(
            width in 1u32..50,
            height in 1u32..50,
            x in 0u32..50,
            y in 0u32..50,
            dx in -3i64..=3,
            dy in -3i64..=3,
            toroidal in proptest::bool::ANY,
        ) {
            let topo = Topology::new(width, height, toroidal);
            let start = Position::new(x % width, y % height);
            let end = topo.offset(start, dx, dy);
            proptest::prop_assert!(end.x < width);
            proptest::prop_assert!(end.y < height);
        }
    }
}
