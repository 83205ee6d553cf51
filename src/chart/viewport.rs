use glam::DVec2;

/// Side length of the logical chart surface
pub const SURFACE_SIZE: f64 = 800.0;

/// Fits the square logical chart surface into a terminal area.
///
/// Braille gives 2x4 pixels per character cell; pixels are roughly square,
/// so the surface is scaled uniformly and centered in the pixel area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartViewport {
    /// Terminal column of the chart area's left edge
    pub col: u16,
    /// Terminal row of the chart area's top edge
    pub row: u16,
    /// Chart area width in characters
    pub cols: u16,
    /// Chart area height in characters
    pub rows: u16,
    pub surface: f64,
}

impl ChartViewport {
    pub fn new(col: u16, row: u16, cols: u16, rows: u16) -> Self {
        Self {
            col,
            row,
            cols,
            rows,
            surface: SURFACE_SIZE,
        }
    }

    /// Canvas pixel width
    pub fn pixel_width(&self) -> usize {
        self.cols as usize * 2
    }

    /// Canvas pixel height
    pub fn pixel_height(&self) -> usize {
        self.rows as usize * 4
    }

    /// Braille pixels per surface unit
    pub fn scale(&self) -> f64 {
        let side = self.pixel_width().min(self.pixel_height()) as f64;
        side / self.surface
    }

    fn offset(&self) -> DVec2 {
        let used = self.surface * self.scale();
        DVec2::new(
            (self.pixel_width() as f64 - used) / 2.0,
            (self.pixel_height() as f64 - used) / 2.0,
        )
    }

    /// Project a surface point to canvas pixel coordinates
    pub fn project(&self, point: DVec2) -> (i32, i32) {
        let p = point * self.scale() + self.offset();
        (p.x.round() as i32, p.y.round() as i32)
    }

    /// Canvas pixel back to surface coordinates
    pub fn unproject(&self, px: i32, py: i32) -> DVec2 {
        let scale = self.scale();
        if scale == 0.0 {
            return DVec2::ZERO;
        }
        (DVec2::new(px as f64, py as f64) - self.offset()) / scale
    }

    /// Terminal cell (absolute column/row) to surface coordinates, using the
    /// center of the cell. `None` outside the chart area.
    pub fn unproject_cell(&self, col: u16, row: u16) -> Option<DVec2> {
        if col < self.col || row < self.row {
            return None;
        }
        let cx = col - self.col;
        let cy = row - self.row;
        if cx >= self.cols || cy >= self.rows {
            return None;
        }
        let px = cx as i32 * 2 + 1;
        let py = cy as i32 * 4 + 2;
        Some(self.unproject(px, py))
    }

    /// Check if a projected circle might touch the canvas (bounding box check)
    pub fn circle_might_be_visible(&self, px: i32, py: i32, radius: i32) -> bool {
        px + radius >= 0
            && px - radius < self.pixel_width() as i32
            && py + radius >= 0
            && py - radius < self.pixel_height() as i32
    }
}
