//! Core types for the 1-bit rasterizer

use super::math::{Vec2, Vec2i};

/// The two inks a 1-bit panel can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    White,
    Black,
}

/// A triangle vertex: pixel position plus texture coordinate
#[derive(Debug, Clone, Copy, Default)]
pub struct TexVertex {
    pub pos: Vec2i,
    pub uv: Vec2,
}

impl TexVertex {
    pub fn new(pos: Vec2i, uv: Vec2) -> Self {
        Self { pos, uv }
    }
}

/// Destination for rasterized pixels.
///
/// Drawing routines clip against `width`/`height` and never call `set_pixel`
/// out of range, but implementations should still tolerate stray coordinates
/// quietly. `begin_batch`/`end_batch` bracket every public drawing operation
/// exactly once; targets with transactional updates hook them, plain memory
/// targets leave the no-op defaults.
pub trait PixelSurface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn set_pixel(&mut self, x: i32, y: i32, ink: Ink);

    fn fill(&mut self, ink: Ink) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.set_pixel(x, y, ink);
            }
        }
    }

    fn begin_batch(&mut self) {}
    fn end_batch(&mut self) {}
}

/// In-memory 1-bit surface, rows packed MSB-first
#[derive(Debug, Clone)]
pub struct Canvas {
    width: i32,
    height: i32,
    bits: Vec<u8>,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        let stride = Self::stride(width);
        Self {
            width,
            height,
            bits: vec![0; stride * height.max(0) as usize],
        }
    }

    /// Bytes per packed row
    fn stride(width: i32) -> usize {
        ((width.max(0) + 7) / 8) as usize
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Ink {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Ink::Black;
        }
        let idx = y as usize * Self::stride(self.width) + (x / 8) as usize;
        if self.bits[idx] & (0x80 >> (x & 7)) != 0 {
            Ink::White
        } else {
            Ink::Black
        }
    }

    /// Copy of the packed rows (stride `(width + 7) / 8`)
    pub fn packed_bits(&self) -> Vec<u8> {
        self.bits.clone()
    }

    /// Expand to RGBA8 bytes for uploading as a preview texture
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for y in 0..self.height {
            for x in 0..self.width {
                let v = match self.get_pixel(x, y) {
                    Ink::White => 255,
                    Ink::Black => 0,
                };
                out.extend_from_slice(&[v, v, v, 255]);
            }
        }
        out
    }

    /// Expand to one luma byte per pixel for image export
    pub fn to_luma(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(match self.get_pixel(x, y) {
                    Ink::White => 255,
                    Ink::Black => 0,
                });
            }
        }
        out
    }
}

impl PixelSurface for Canvas {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, ink: Ink) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * Self::stride(self.width) + (x / 8) as usize;
        match ink {
            Ink::White => self.bits[idx] |= 0x80 >> (x & 7),
            Ink::Black => self.bits[idx] &= !(0x80 >> (x & 7)),
        }
    }

    fn fill(&mut self, ink: Ink) {
        let byte = match ink {
            Ink::White => 0xff,
            Ink::Black => 0x00,
        };
        self.bits.fill(byte);
    }
}

/// Immutable 1-bit bitmap, rows packed MSB-first with stride `(width + 7) / 8`
#[derive(Debug, Clone)]
pub struct BitTexture {
    pub width: i32,
    pub height: i32,
    data: Vec<u8>,
}

impl BitTexture {
    pub fn from_packed(width: i32, height: i32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), ((width + 7) / 8) as usize * height as usize);
        Self { width, height, data }
    }

    /// Threshold a gray texture against a dither matrix, texel by texel.
    /// A set bit marks a texel that won its threshold comparison.
    pub fn dithered(gray: &GrayTexture, matrix: &DitherMatrix) -> Self {
        let stride = ((gray.width + 7) / 8) as usize;
        let mut data = vec![0u8; stride * gray.height.max(0) as usize];
        for y in 0..gray.height {
            for x in 0..gray.width {
                if gray.get(x, y) > matrix.threshold(x, y) {
                    data[y as usize * stride + (x / 8) as usize] |= 0x80 >> (x & 7);
                }
            }
        }
        Self {
            width: gray.width,
            height: gray.height,
            data,
        }
    }

    /// Sample one texel; out of range reads as Black
    pub fn sample(&self, x: i32, y: i32) -> Ink {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Ink::Black;
        }
        let stride = ((self.width + 7) / 8) as usize;
        if self.data[y as usize * stride + (x / 8) as usize] & (0x80 >> (x & 7)) != 0 {
            Ink::White
        } else {
            Ink::Black
        }
    }
}

/// 8-bit grayscale texture
#[derive(Debug, Clone)]
pub struct GrayTexture {
    pub width: i32,
    pub height: i32,
    data: Vec<u8>,
}

impl GrayTexture {
    pub fn from_luma(width: i32, height: i32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width.max(0) as usize * height.max(0) as usize);
        Self { width, height, data }
    }

    /// Sample one texel; out of range reads as 0
    pub fn get(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }
}

/// Square threshold matrix for ordered dithering, indexed by screen
/// position and tiled across the surface
#[derive(Debug, Clone)]
pub struct DitherMatrix {
    pub size: i32,
    data: Vec<u8>,
}

impl DitherMatrix {
    pub fn from_luma(size: i32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), size.max(0) as usize * size.max(0) as usize);
        Self { size, data }
    }

    /// Threshold at a screen position, wrapping both axes
    pub fn threshold(&self, x: i32, y: i32) -> u8 {
        let tx = x.rem_euclid(self.size) as usize;
        let ty = y.rem_euclid(self.size) as usize;
        self.data[ty * self.size as usize + tx]
    }
}
