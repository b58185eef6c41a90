use kurbo::Point;

/// Sampling grid for one pass over a `width x height` source.
///
/// Dimensions must be positive; buffers and surfaces enforce this at
/// construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    width: u32,
    height: u32,
    resolution: f64,
    offset_x: f64,
    offset_y: f64,
}

/// One grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Row index.
    pub row: u32,
    /// Column index.
    pub col: u32,
    /// Unclamped draw position; boundary cells fall outside the surface so
    /// edge shapes still receive color.
    pub center: Point,
    /// Source read position, clamped into `[0, dim - 1]` per axis. Used
    /// only to index the raster buffer, never to draw.
    pub pixel: (u32, u32),
}

impl Grid {
    /// Grid over a source of the given dimensions.
    pub fn new(width: u32, height: u32, resolution: f64, offset: (f64, f64)) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            width,
            height,
            resolution,
            offset_x: offset.0,
            offset_y: offset.1,
        }
    }

    /// Row-major cells. Restartable: every call walks the full grid again.
    pub fn cells(&self) -> Cells {
        Cells {
            grid: *self,
            rows: f64::from(self.height) / self.resolution + 1.0,
            cols: f64::from(self.width) / self.resolution + 1.0,
            row: 0,
            col: 0,
        }
    }

    fn cell(&self, row: u32, col: u32) -> Cell {
        let x = (f64::from(col) - 0.5) * self.resolution + self.offset_x;
        let y = (f64::from(row) - 0.5) * self.resolution + self.offset_y;
        let pixel_x = x.clamp(0.0, f64::from(self.width - 1)) as u32;
        let pixel_y = y.clamp(0.0, f64::from(self.height - 1)) as u32;
        Cell {
            row,
            col,
            center: Point::new(x, y),
            pixel: (pixel_x, pixel_y),
        }
    }
}

/// Row-major iterator over grid cells.
///
/// The bounds use the float comparison `index < dimension/resolution + 1`,
/// which for non-integral ratios yields one extra row/column beyond a pure
/// ceiling. Fractional clamped centers truncate toward zero when converted
/// to pixel coordinates.
#[derive(Clone, Debug)]
pub struct Cells {
    grid: Grid,
    rows: f64,
    cols: f64,
    row: u32,
    col: u32,
}

impl Iterator for Cells {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        loop {
            if f64::from(self.row) >= self.rows {
                return None;
            }
            if f64::from(self.col) >= self.cols {
                self.col = 0;
                self.row += 1;
                continue;
            }
            let cell = self.grid.cell(self.row, self.col);
            self.col += 1;
            return Some(cell);
        }
    }
}
