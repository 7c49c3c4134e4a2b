//! Page-organised pixel buffer
//!
//! Rows are grouped into pages of eight; each page is a run of column bytes
//! with bit `y % 8` holding row `y`. This is the controller's own memory
//! layout, so a frame goes out page by page without any repacking.

use core::fmt::Write;

use heapless::String;

use super::font::{Font5x7, Glyph, GlyphSource, GLYPH_ADVANCE};

/// Rows per page
pub const PAGE_HEIGHT: usize = 8;

/// Pages the controller's 4-bit page address can reach
pub const MAX_PAGES: usize = 16;

/// Longest line `write_fmt` will format
pub const MAX_LINE_CHARS: usize = 32;

/// 128x64 panel, 8 pages
pub type Matrix128x64 = PixelBuffer<128, 8>;

/// Monochrome frame buffer, `COLS` wide and `PAGES * 8` tall
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer<const COLS: usize, const PAGES: usize> {
    pages: [[u8; COLS]; PAGES],
}

impl<const COLS: usize, const PAGES: usize> Default for PixelBuffer<COLS, PAGES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLS: usize, const PAGES: usize> PixelBuffer<COLS, PAGES> {
    /// Width in pixels
    pub const WIDTH: usize = COLS;

    /// Height in pixels
    pub const HEIGHT: usize = PAGES * PAGE_HEIGHT;

    /// Compile-time check that every page has a controller page address
    pub(crate) const PAGE_ADDRESSABLE: () = assert!(
        PAGES <= MAX_PAGES,
        "page addresses are 4 bits wide"
    );

    /// Create an all-off buffer
    pub const fn new() -> Self {
        Self {
            pages: [[0; COLS]; PAGES],
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    /// Set or clear one pixel; coordinates outside the panel are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= COLS || y >= Self::HEIGHT {
            return;
        }

        let mask = 1 << (y % PAGE_HEIGHT);
        let column = &mut self.pages[y / PAGE_HEIGHT][x];
        if on {
            *column |= mask;
        } else {
            *column &= !mask;
        }
    }

    /// Read one pixel; off outside the panel
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= COLS || y >= Self::HEIGHT {
            return false;
        }
        self.pages[y / PAGE_HEIGHT][x] & (1 << (y % PAGE_HEIGHT)) != 0
    }

    /// Copy a glyph's columns into `page`, left edge at column `x`
    ///
    /// Whole columns are overwritten. Columns past the right edge are
    /// dropped.
    pub fn blit_glyph(&mut self, x: usize, page: usize, glyph: &Glyph) {
        let Some(row) = self.pages.get_mut(page) else {
            return;
        };

        for (dst, &src) in row.iter_mut().skip(x).zip(glyph.iter()) {
            *dst = src;
        }
    }

    /// Render ASCII text into `page` with the built-in font
    pub fn write_str(&mut self, page: usize, x: usize, text: &str) {
        self.write_str_with(&Font5x7, page, x, text);
    }

    /// Render ASCII text into `page` with a custom font
    ///
    /// Characters advance by six columns. Rendering stops at the end of the
    /// string or once the next character would start within the last six
    /// columns.
    pub fn write_str_with<G: GlyphSource>(&mut self, font: &G, page: usize, x: usize, text: &str) {
        let limit = COLS.saturating_sub(GLYPH_ADVANCE);
        let mut x = x;

        for code in text.bytes() {
            if x >= limit {
                break;
            }
            self.blit_glyph(x, page, font.glyph(code));
            x += GLYPH_ADVANCE;
        }
    }

    /// Format and render a line of text into `page`
    ///
    /// The line holds [`MAX_LINE_CHARS`] characters. Formatting stops at the
    /// first piece (literal text or one formatted argument) that does not
    /// fit; that piece and everything after it are dropped whole.
    pub fn write_fmt(&mut self, page: usize, x: usize, args: core::fmt::Arguments<'_>) {
        let mut line: String<MAX_LINE_CHARS> = String::new();
        let _ = line.write_fmt(args);
        self.write_str(page, x, line.as_str());
    }

    /// Column byte of a page
    pub fn column(&self, page: usize, col: usize) -> u8 {
        self.pages[page][col]
    }

    /// All column bytes of a page
    pub fn page(&self, page: usize) -> &[u8; COLS] {
        &self.pages[page]
    }

    /// Pages from top to bottom
    pub fn pages(&self) -> impl Iterator<Item = &[u8; COLS]> {
        self.pages.iter()
    }

    /// Number of pages
    pub const fn page_count(&self) -> usize {
        PAGES
    }
}
