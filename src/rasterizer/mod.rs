//! Software rasterizer for 1-bit surfaces
//!
//! Features:
//! - Scanline triangle fill with exact integer edge walking
//! - Affine UV interpolation via barycentric weights
//! - Pluggable texel sampling (bitmap lookup, ordered dither, dither mask)

mod fill;
mod math;
mod types;

pub use fill::*;
pub use math::*;
pub use types::*;

/// Panel dimensions
pub const WIDTH: i32 = 200;
pub const HEIGHT: i32 = 200;
