use crate::grid::Grid;

/// Hex values of braille dots
///
/// ```text
///      1   8
///      2  10
///      4  20
///     40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Draws a [`Grid`] as braille characters, one dot per cell.
///
/// The camera only ever reads the grid it is given; it keeps its own copy of which dots are lit.
pub struct Camera {
    /// The cell buffer
    cb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width of the cell buffer, in dots
    w: usize,

    /// Height of the cell buffer, in dots
    h: usize,
}

impl Camera {
    pub fn new(w: usize, h: usize) -> Self {
        // Let `w` and `h` refer to width and height of the cell buffer. Then `bw = ceil(w / 2)`
        // and `bh = ceil(h / 4)` are the width and height of braille characters of our framebuffer
        // (that is, not accounting for the trailing newlines expected at the end of each line).
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        // Each braille character is 3 bytes, and newlines one byte.
        let fb = String::with_capacity(3 * (bw * bh) + bh);

        let mut cam = Self {
            cb: vec![false; w * h],
            fb,
            cp: vec![BRAILLE_EMPTY; bw * bh],
            w,
            h,
        };
        cam.render();

        cam
    }

    /// A camera sized to show all of `grid`.
    pub fn fit(grid: &Grid) -> Self {
        Self::new(grid.cols(), grid.rows())
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// `(columns, lines)` of braille characters in a rendered frame.
    pub fn frame_size(&self) -> (usize, usize) {
        (self.width().div_ceil(2), self.height().div_ceil(4))
    }

    /// Turns on a single pixel of the framebuffer
    pub fn draw_pixel(&mut self, x: usize, y: usize) {
        assert!(x < self.w, "x is out of bounds");
        assert!(y < self.h, "y is out of bounds");

        let i = self.xy_from(x, y);

        self.cb[i] = true;
    }

    /// Light one dot per live cell of `grid`. Column `c` maps to `x`, row `r` to `y`.
    pub fn draw(&mut self, grid: &Grid) {
        assert!(
            grid.cols() <= self.w && grid.rows() <= self.h,
            "grid does not fit in the camera"
        );

        for (row, col) in grid.iter_alive() {
            self.draw_pixel(col, row);
        }
    }

    /// Reset the cell buffer
    pub fn reset(&mut self) {
        self.cb.fill(false);
    }

    /// Build the frame from the lit dots. Every line, including the last, ends with `\n`.
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(2);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.cb.iter().enumerate() {
            if !px {
                continue;
            }

            let (x, y) = self.xy_to(n);
            self.cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
        }

        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            self.fb.push(braille(c));
        }
        self.fb.push('\n');

        &self.fb
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

// Codepoints only ever range over U+2800..=U+28FF
fn braille(cp: u32) -> char {
    char::from_u32(cp).unwrap_or(' ')
}
