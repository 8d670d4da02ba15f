use ndarray::Array2;

use crate::*;

/// A 2D grid placed in world space, holding one `T` per cell.
///
/// Every coordinate-accepting method computes a result for out-of-range input: reads return the
/// content type's default and writes report `false`. [`Grid::is_valid`] is the guard to call
/// before trusting a result.
#[derive(Debug)]
pub struct Grid<T> {
    geometry: GridGeometry,
    store: CellStore<T>,
}

impl<T: Default> Grid<T> {
    pub fn new(config: GridConfig) -> Self {
        Self::from_fn(config, |_| T::default())
    }
}

impl<T> Grid<T> {
    /// Creates a grid, initializing each cell from its coordinates.
    pub fn from_fn(config: GridConfig, mut init: impl FnMut(Coord2) -> T) -> Self {
        Self::from_geometry_fn(config, |_, coords| init(coords))
    }

    /// Creates a grid, initializing each cell with access to the grid's geometry, for contents
    /// that need to know their own world placement.
    pub fn from_geometry_fn(
        config: GridConfig,
        mut init: impl FnMut(&GridGeometry, Coord2) -> T,
    ) -> Self {
        let geometry = GridGeometry::new(config);
        let store = CellStore::from_fn(config.size(), |coords| init(&geometry, coords));
        Self { geometry, store }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &GridConfig {
        self.geometry.config()
    }

    pub fn width(&self) -> Coord {
        self.geometry.width()
    }

    pub fn height(&self) -> Coord {
        self.geometry.height()
    }

    pub fn size(&self) -> Coord2 {
        self.geometry.size()
    }

    pub fn total_cells(&self) -> CellCount {
        self.config().total_cells()
    }

    pub fn is_valid(&self, coords: Coord2) -> bool {
        self.geometry.is_valid(coords)
    }

    pub fn cells(&self) -> &Array2<T> {
        self.store.cells()
    }

    pub fn get_ref(&self, coords: Coord2) -> Option<&T> {
        self.is_valid(coords).then(|| self.store.get(coords))
    }

    /// Stores `value` at `coords` and notifies subscribers, or returns `false` leaving the grid
    /// untouched when `coords` is out of bounds.
    pub fn set(&mut self, coords: Coord2, value: T) -> bool {
        if !self.is_valid(coords) {
            return false;
        }
        self.store.set(coords, value);
        true
    }

    pub fn set_at_world(&mut self, point: Point3, value: T) -> bool {
        self.set(self.geometry.to_grid(point), value)
    }

    /// Registers a callback run synchronously after every content change.
    pub fn subscribe(&mut self, subscriber: impl FnMut(Coord2) + 'static) -> SubscriptionId {
        self.store.notifier().subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.notifier().unsubscribe(id)
    }

    /// Notifies subscribers about `coords` without changing anything, e.g. after mutating
    /// interior state of a cell.
    pub fn notify_changed(&mut self, coords: Coord2) {
        self.store.notifier().notify(coords);
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// All in-bounds coordinates, column-major.
    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<T> {
        let (width, height) = self.size();
        (0..width).flat_map(move |col| (0..height).map(move |row| (col, row)))
    }
}

impl<T: Clone + Default> Grid<T> {
    /// Content at `coords`, or the default value when out of bounds.
    pub fn get(&self, coords: Coord2) -> T {
        self.get_ref(coords).cloned().unwrap_or_default()
    }

    pub fn get_at_world(&self, point: Point3) -> T {
        self.get(self.geometry.to_grid(point))
    }
}
