/// Off-screen bitmap drawn with Unicode Braille patterns (U+2800..U+28FF).
///
/// Every terminal cell holds a 2 wide by 4 tall block of dots, so a canvas of
/// `cols` × `rows` cells addresses `2*cols` × `4*rows` pixels.
pub struct BrailleCanvas {
    cols: usize,
    rows: usize,
    /// Dot pattern per cell, row-major
    dots: Vec<u8>,
}

const BLANK: u32 = 0x2800;

/// Pattern bit for pixel column `x % 2` and pixel row `y % 4` in a cell
const DOT_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

impl BrailleCanvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            dots: vec![0; cols * rows],
        }
    }

    /// Width in character cells
    pub fn width(&self) -> usize {
        self.cols
    }

    /// Height in character cells
    pub fn height(&self) -> usize {
        self.rows
    }

    /// Light one pixel. Anything off the canvas, negative included, is clipped.
    pub fn plot(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let (col, row) = (x / 2, y / 4);
        if col < self.cols && row < self.rows {
            self.dots[row * self.cols + col] |= DOT_BITS[x & 1][y & 3];
        }
    }

    /// Whether any dot is lit in cell (`col`, `row`)
    pub fn cell_is_set(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows && self.dots[row * self.cols + col] != 0
    }

    /// Braille glyph for a cell; `None` for blank or out-of-range cells
    pub fn glyph(&self, col: usize, row: usize) -> Option<char> {
        if !self.cell_is_set(col, row) {
            return None;
        }
        char::from_u32(BLANK + u32::from(self.dots[row * self.cols + col]))
    }

    /// Total number of lit pixels
    #[cfg(test)]
    pub fn dot_count(&self) -> u32 {
        self.dots.iter().map(|d| d.count_ones()).sum()
    }

    #[cfg(test)]
    pub fn is_blank(&self) -> bool {
        self.dots.iter().all(|&d| d == 0)
    }

    /// Whole canvas as text, one line per cell row
    #[cfg(test)]
    pub fn render_text(&self) -> String {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| self.glyph(col, row).unwrap_or('\u{2800}'))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
