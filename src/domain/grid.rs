//! Grid geometry and cell calculations
//!
//! This module handles the logical grid representation for window positioning.
//! It maps grid coordinates to screen rectangles and validates grid positions.
//!
//! Cell sizes use integer division: the remainder along the last row and
//! column is dropped, never redistributed.

use thiserror::Error;

use crate::domain::core::Rect;

/// Errors that can occur during grid operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Screen rectangle has a non-positive width or height
    #[error("invalid screen rectangle {rect:?}: width and height must be positive")]
    InvalidRect { rect: Rect },

    /// Grid dimensions are invalid (zero)
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: u32, cols: u32 },

    /// Grid coordinates are outside the valid range
    #[error("cell ({}, {}) is outside a {rows}x{cols} grid", .coords.row, .coords.col)]
    InvalidCoordinates {
        coords: GridCoords,
        rows: u32,
        cols: u32,
    },

    /// Grid is finer than the screen has pixels
    #[error("a {rows}x{cols} grid does not fit in {rect:?}")]
    InvalidCellSize { rect: Rect, rows: u32, cols: u32 },

    /// Name does not match any preset
    #[error("unknown position '{name}'")]
    UnknownPreset { name: String },

    /// Geometry string could not be parsed
    #[error("cannot parse geometry '{input}', expected WxH+X+Y or X,Y,W,H")]
    InvalidGeometry { input: String },
}

/// Zero-based (row, col) coordinates of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoords {
    pub row: u32,
    pub col: u32,
}

impl GridCoords {
    /// Creates new grid coordinates
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// A single cell addressed inside an `rows` x `cols` grid
///
/// This is the tuple every preset resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub rows: u32,
    pub cols: u32,
    pub coords: GridCoords,
}

impl GridPosition {
    /// Creates a validated grid position
    pub fn new(rows: u32, cols: u32, row: u32, col: u32) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }

        let coords = GridCoords::new(row, col);
        if row >= rows || col >= cols {
            return Err(GridError::InvalidCoordinates { coords, rows, cols });
        }

        Ok(Self { rows, cols, coords })
    }

    /// Resolves this position against a screen area
    pub fn cell_rect(&self, screen_area: Rect) -> Result<Rect, GridError> {
        Grid::new(self.rows, self.cols, screen_area)?.cell_rect(self.coords)
    }
}

/// Represents a logical grid laid over a screen area
///
/// The grid divides a rectangular screen area into a grid of cells.
/// Each cell can be identified by grid coordinates (row, col) and
/// converted to screen pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows in the grid
    rows: u32,
    /// Number of columns in the grid
    cols: u32,
    /// The screen area this grid covers (in screen coordinates)
    screen_area: Rect,
    /// Width of each cell in pixels
    cell_width: u32,
    /// Height of each cell in pixels
    cell_height: u32,
}

impl Grid {
    /// Creates a new grid for the specified screen area
    ///
    /// # Arguments
    /// * `rows` - Number of grid rows (must be > 0)
    /// * `cols` - Number of grid columns (must be > 0)
    /// * `screen_area` - Screen rectangle this grid will cover
    ///
    /// # Example
    /// ```rust
    /// use figman::domain::{grid::Grid, core::Rect};
    ///
    /// let screen = Rect::new(0, 0, 1920, 1080);
    /// let grid = Grid::new(3, 2, screen).unwrap();
    /// assert_eq!(grid.cell_size(), (960, 360));
    /// ```
    pub fn new(rows: u32, cols: u32, screen_area: Rect) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }

        screen_area.validate_screen()?;

        let cell_width = screen_area.w as u32 / cols;
        let cell_height = screen_area.h as u32 / rows;

        if cell_width == 0 || cell_height == 0 {
            return Err(GridError::InvalidCellSize {
                rect: screen_area,
                rows,
                cols,
            });
        }

        Ok(Self {
            rows,
            cols,
            screen_area,
            cell_width,
            cell_height,
        })
    }

    /// Returns the grid dimensions as (rows, cols)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    /// Returns the screen area this grid covers
    pub fn screen_area(&self) -> Rect {
        self.screen_area
    }

    /// Returns the pixel dimensions of each cell as (width, height)
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// Checks if the given grid coordinates are valid for this grid
    pub fn contains_coords(&self, coords: GridCoords) -> bool {
        coords.row < self.rows && coords.col < self.cols
    }

    /// Converts grid coordinates to a screen rectangle
    ///
    /// # Example
    /// ```rust
    /// use figman::domain::{grid::{Grid, GridCoords}, core::Rect};
    ///
    /// let screen = Rect::new(0, 0, 1920, 1080);
    /// let grid = Grid::new(2, 2, screen).unwrap();
    /// let cell = grid.cell_rect(GridCoords::new(1, 0)).unwrap();
    /// assert_eq!(cell, Rect::new(0, 540, 960, 540));
    /// ```
    pub fn cell_rect(&self, coords: GridCoords) -> Result<Rect, GridError> {
        if !self.contains_coords(coords) {
            return Err(GridError::InvalidCoordinates {
                coords,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let x = self.screen_area.x + ((coords.col * self.cell_width) as i32);
        let y = self.screen_area.y + ((coords.row * self.cell_height) as i32);

        Ok(Rect::new(x, y, self.cell_width as i32, self.cell_height as i32))
    }

    /// Returns every cell rectangle in row-major order
    pub fn cells(&self) -> Vec<Rect> {
        let mut cells = Vec::with_capacity(self.rows as usize * self.cols as usize);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let x = self.screen_area.x + ((col * self.cell_width) as i32);
                let y = self.screen_area.y + ((row * self.cell_height) as i32);
                cells.push(Rect::new(x, y, self.cell_width as i32, self.cell_height as i32));
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_screen() -> Rect {
        Rect::new(0, 0, 1920, 1080)
    }

    #[test]
    fn grid_creation_valid() {
        let screen = create_test_screen();
        let grid = Grid::new(3, 2, screen).unwrap();

        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(grid.screen_area(), screen);
        assert_eq!(grid.cell_size(), (960, 360)); // 1920/2, 1080/3
    }

    #[test]
    fn grid_creation_invalid_dimensions() {
        let screen = create_test_screen();

        let result = Grid::new(0, 2, screen);
        assert!(matches!(result, Err(GridError::InvalidDimensions { rows: 0, cols: 2 })));

        let result = Grid::new(3, 0, screen);
        assert!(matches!(result, Err(GridError::InvalidDimensions { rows: 3, cols: 0 })));
    }

    #[test]
    fn grid_creation_rejects_degenerate_screen() {
        let result = Grid::new(2, 2, Rect::new(0, 0, 0, 1080));
        assert!(matches!(result, Err(GridError::InvalidRect { .. })));

        // More columns than pixels
        let result = Grid::new(1, 4, Rect::new(0, 0, 3, 100));
        assert!(matches!(result, Err(GridError::InvalidCellSize { .. })));
    }

    #[test]
    fn cell_rect_calculation() {
        let grid = Grid::new(2, 2, create_test_screen()).unwrap();

        assert_eq!(grid.cell_rect(GridCoords::new(0, 0)).unwrap(), Rect::new(0, 0, 960, 540));
        assert_eq!(grid.cell_rect(GridCoords::new(0, 1)).unwrap(), Rect::new(960, 0, 960, 540));
        assert_eq!(grid.cell_rect(GridCoords::new(1, 0)).unwrap(), Rect::new(0, 540, 960, 540));
        assert_eq!(grid.cell_rect(GridCoords::new(1, 1)).unwrap(), Rect::new(960, 540, 960, 540));
    }

    #[test]
    fn right_half_of_screen() {
        let position = GridPosition::new(1, 2, 0, 1).unwrap();
        let rect = position.cell_rect(create_test_screen()).unwrap();
        assert_eq!(rect, Rect::new(960, 0, 960, 1080));
    }

    #[test]
    fn cell_rect_invalid_coordinates() {
        let grid = Grid::new(3, 2, create_test_screen()).unwrap();

        let result = grid.cell_rect(GridCoords::new(3, 0));
        assert!(matches!(result, Err(GridError::InvalidCoordinates { .. })));

        let result = grid.cell_rect(GridCoords::new(0, 2));
        assert!(matches!(result, Err(GridError::InvalidCoordinates { .. })));
    }

    #[test]
    fn grid_position_validation() {
        assert!(GridPosition::new(2, 2, 1, 1).is_ok());
        assert!(matches!(
            GridPosition::new(0, 2, 0, 0),
            Err(GridError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            GridPosition::new(2, 2, 2, 0),
            Err(GridError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn remainder_is_dropped() {
        // 1000 / 3 = 333 rem 1, 701 / 2 = 350 rem 1
        let grid = Grid::new(2, 3, Rect::new(0, 0, 1000, 701)).unwrap();
        assert_eq!(grid.cell_size(), (333, 350));

        let last = grid.cell_rect(GridCoords::new(1, 2)).unwrap();
        assert_eq!(last, Rect::new(666, 350, 333, 350));
        assert_eq!(last.right(), 999);
        assert_eq!(last.bottom(), 700);
    }

    #[test]
    fn cells_are_contained_and_sized_by_floor_division() {
        let screens = [
            Rect::new(0, 0, 1920, 1080),
            Rect::new(0, 23, 1920, 1017),
            Rect::new(-1280, 40, 1279, 997),
        ];

        for screen in screens {
            for rows in 1..=4u32 {
                for cols in 1..=4u32 {
                    let grid = Grid::new(rows, cols, screen).unwrap();
                    for cell in grid.cells() {
                        assert!(screen.contains_rect(&cell), "{cell:?} escapes {screen:?}");
                        assert_eq!(cell.w, screen.w / cols as i32);
                        assert_eq!(cell.h, screen.h / rows as i32);
                    }
                }
            }
        }
    }

    #[test]
    fn two_by_two_cells_do_not_overlap() {
        let grid = Grid::new(2, 2, Rect::new(0, 0, 1921, 1081)).unwrap();
        let cells = grid.cells();
        assert_eq!(cells.len(), 4);

        for (i, a) in cells.iter().enumerate() {
            for b in cells.iter().skip(i + 1) {
                assert!(a.intersection(b).is_none(), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn screen_at_coordinate_limit() {
        // Rightmost representable screen: last cell ends exactly at i32::MAX
        let screen = Rect::new(i32::MAX - 1000, 0, 1000, 1000);
        let grid = Grid::new(1, 2, screen).unwrap();
        assert_eq!(
            grid.cell_rect(GridCoords::new(0, 1)).unwrap(),
            Rect::new(i32::MAX - 500, 0, 500, 1000)
        );
        assert_eq!(grid.cells()[1].right(), i32::MAX);

        let result = Grid::new(1, 2, Rect::new(i32::MAX - 100, 0, 1000, 1000));
        assert!(matches!(result, Err(GridError::InvalidRect { .. })));
    }

    #[test]
    fn grid_with_offset_screen() {
        // Secondary monitor to the right of the primary
        let screen = Rect::new(1920, 0, 1920, 1080);
        let grid = Grid::new(3, 2, screen).unwrap();

        let rect = grid.cell_rect(GridCoords::new(0, 0)).unwrap();
        assert_eq!(rect, Rect::new(1920, 0, 960, 360));

        let rect = grid.cell_rect(GridCoords::new(2, 1)).unwrap();
        assert_eq!(rect, Rect::new(2880, 720, 960, 360));
    }
}
