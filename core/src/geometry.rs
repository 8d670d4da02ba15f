use core::ops::{Add, AddAssign, Index, IndexMut, Mul, Sub};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Margin added by default to the camera half extent so the grid is not flush with the viewport.
pub const DEFAULT_CAMERA_MARGIN: f32 = 1.5;

/// Default distance of the camera from the grid plane, along the depth axis.
pub const DEFAULT_CAMERA_DEPTH: f32 = -10.0;

/// A point in world space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A point with `value` on `axis` and zero elsewhere.
    pub fn along(axis: Axis, value: f32) -> Self {
        let mut point = Self::ZERO;
        point[axis] = value;
        point
    }
}

impl Index<Axis> for Point3 {
    type Output = f32;

    fn index(&self, axis: Axis) -> &Self::Output {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl IndexMut<Axis> for Point3 {
    fn index_mut(&mut self, axis: Axis) -> &mut Self::Output {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Point3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Point3 {
    type Output = Point3;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Which world axes carry the grid's width and height.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// Width along X, height along Y.
    #[default]
    Vertical,
    /// Width along X, height along Z, the "map" layout.
    Horizontal,
    /// Width along Z, height along Y.
    VerticalDepth,
}

impl Layout {
    pub const fn axis_map(self) -> AxisMap {
        use Axis::*;
        match self {
            Self::Vertical => AxisMap::new(X, Y, Z),
            Self::Horizontal => AxisMap::new(X, Z, Y),
            Self::VerticalDepth => AxisMap::new(Z, Y, X),
        }
    }
}

/// Assignment of the grid's width, height and depth to world axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AxisMap {
    pub width: Axis,
    pub height: Axis,
    pub depth: Axis,
}

impl AxisMap {
    const fn new(width: Axis, height: Axis, depth: Axis) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Builds a world-space offset from grid-plane components.
    pub fn plane(&self, along_width: f32, along_height: f32) -> Point3 {
        let mut point = Point3::ZERO;
        point[self.width] = along_width;
        point[self.height] = along_height;
        point
    }
}

/// Reference point within a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    BottomLeft,
    TopLeft,
    BottomRight,
    TopRight,
    LeftEdge,
    BottomEdge,
    RightEdge,
    TopEdge,
    Center,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Self::BottomLeft,
        Self::TopLeft,
        Self::BottomRight,
        Self::TopRight,
        Self::LeftEdge,
        Self::BottomEdge,
        Self::RightEdge,
        Self::TopEdge,
        Self::Center,
    ];

    /// Offset from the bottom-left corner, in cell sizes along (width, height).
    const fn factors(self) -> (f32, f32) {
        match self {
            Self::BottomLeft => (0.0, 0.0),
            Self::TopLeft => (0.0, 1.0),
            Self::BottomRight => (1.0, 0.0),
            Self::TopRight => (1.0, 1.0),
            Self::LeftEdge => (0.0, 0.5),
            Self::BottomEdge => (0.5, 0.0),
            Self::RightEdge => (1.0, 0.5),
            Self::TopEdge => (0.5, 1.0),
            Self::Center => (0.5, 0.5),
        }
    }
}

/// Placement and dimensions of a grid in world space.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: Coord,
    pub height: Coord,
    pub cell_size: f32,
    pub cell_spacing: f32,
    pub origin: Point3,
    pub layout: Layout,
}

impl GridConfig {
    /// Unit cells without spacing, at the world origin, in the default layout.
    ///
    /// Dimensions are not validated, callers must pass `width > 0` and `height > 0`.
    pub const fn new(width: Coord, height: Coord) -> Self {
        Self {
            width,
            height,
            cell_size: 1.0,
            cell_spacing: 0.0,
            origin: Point3::ZERO,
            layout: Layout::Vertical,
        }
    }

    pub const fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub const fn with_cell_spacing(mut self, cell_spacing: f32) -> Self {
        self.cell_spacing = cell_spacing;
        self
    }

    pub const fn with_origin(mut self, origin: Point3) -> Self {
        self.origin = origin;
        self
    }

    pub const fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Distance between the bottom-left corners of two adjacent cells.
    pub fn step(&self) -> f32 {
        if self.cell_spacing > 0.0 {
            self.cell_size + self.cell_spacing
        } else {
            self.cell_size
        }
    }
}

/// Coordinate math of a grid: conversions between cells and world points.
///
/// Everything layout-dependent is resolved once at construction into an [`AxisMap`] and a table
/// of anchor offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct GridGeometry {
    config: GridConfig,
    axes: AxisMap,
    anchor_offsets: [Point3; 9],
}

impl GridGeometry {
    pub fn new(config: GridConfig) -> Self {
        let axes = config.layout.axis_map();
        let anchor_offsets = Anchor::ALL.map(|anchor| {
            let (along_width, along_height) = anchor.factors();
            axes.plane(along_width * config.cell_size, along_height * config.cell_size)
        });
        Self {
            config,
            axes,
            anchor_offsets,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn axes(&self) -> AxisMap {
        self.axes
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn is_valid(&self, (col, row): Coord2) -> bool {
        col >= 0 && col < self.config.width && row >= 0 && row < self.config.height
    }

    pub fn is_valid_world(&self, point: Point3) -> bool {
        self.is_valid(self.to_grid(point))
    }

    /// World position of `anchor` within the cell at `coords`.
    ///
    /// Computed for any coordinates, in bounds or not. A nonzero `depth` is added along the depth
    /// axis.
    pub fn to_world(&self, (col, row): Coord2, anchor: Anchor, depth: f32) -> Point3 {
        let step = self.config.step();
        let mut position = self.config.origin
            + self.axes.plane(col as f32 * step, row as f32 * step)
            + self.anchor_offsets[anchor as usize];
        if depth != 0.0 {
            position += self.depth_offset(depth);
        }
        position
    }

    /// Bottom-left corner of the cell, on the grid plane.
    pub fn world_position(&self, coords: Coord2) -> Point3 {
        self.to_world(coords, Anchor::BottomLeft, 0.0)
    }

    /// Cell containing `point`, which may lie outside the grid.
    pub fn to_grid(&self, point: Point3) -> Coord2 {
        let local = point - self.config.origin;
        let step = self.config.step();
        (
            (local[self.axes.width] / step).floor() as Coord,
            (local[self.axes.height] / step).floor() as Coord,
        )
    }

    /// Snaps `point` to `anchor` of the cell containing it.
    pub fn snap(&self, point: Point3, anchor: Anchor, depth: f32) -> Point3 {
        self.to_world(self.to_grid(point), anchor, depth)
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Coord2 {
        (
            rng.random_range(0..self.config.width),
            rng.random_range(0..self.config.height),
        )
    }

    /// World position of the middle of the grid.
    ///
    /// An even dimension puts the center on a cell boundary, an odd one in the middle of a cell.
    pub fn grid_center(&self, depth: f32) -> Point3 {
        let (width, height) = self.size();
        let anchor = match (width % 2 == 0, height % 2 == 0) {
            (true, true) => Anchor::BottomLeft,
            (true, false) => Anchor::LeftEdge,
            (false, true) => Anchor::BottomEdge,
            (false, false) => Anchor::Center,
        };
        self.to_world((width / 2, height / 2), anchor, depth)
    }

    /// Half of the visible height an orthographic camera needs to show the whole grid.
    pub fn camera_half_extent(&self, margin: f32) -> f32 {
        (self.config.height as f32 * self.config.cell_size) / 2.0 + margin
    }

    /// Camera placement over the grid, `depth` away from the grid plane.
    pub fn camera_position(&self, depth: f32) -> Point3 {
        let step = self.config.step();
        self.config.origin
            + self.axes.plane(
                (self.config.width / 2) as f32 * step,
                (self.config.height / 2) as f32 * step,
            )
            + self.depth_offset(depth)
    }

    fn depth_offset(&self, depth: f32) -> Point3 {
        Point3::along(self.axes.depth, depth)
    }
}
