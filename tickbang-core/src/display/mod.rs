//! Display side: pixel buffer, font and controller protocol

pub mod font;
pub mod framebuffer;
pub mod panel;

pub use font::{glyph, Font5x7, Glyph, GlyphSource, GLYPH_ADVANCE, GLYPH_WIDTH};
pub use framebuffer::{Matrix128x64, PixelBuffer, PAGE_HEIGHT};
pub use panel::{cmd, Panel};
