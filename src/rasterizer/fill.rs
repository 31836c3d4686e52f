//! Scanline triangle fill and line drawing over a `PixelSurface`

use super::math::{barycentric, Vec2, Vec2i};
use super::types::{BitTexture, DitherMatrix, GrayTexture, Ink, PixelSurface, TexVertex};

/// Decides the ink for one pixel of a textured span.
///
/// `sx`/`sy` are the pixel's screen position, `uv` the interpolated texture
/// coordinate in texel units. Returning `None` leaves the pixel untouched.
pub trait TexelSampler {
    fn resolve(&self, sx: i32, sy: i32, uv: Vec2) -> Option<Ink>;
}

/// Reads a packed 1-bit bitmap: set bits paint White, clear bits Black
pub struct BitLookup<'a> {
    pub bitmap: &'a BitTexture,
}

impl TexelSampler for BitLookup<'_> {
    fn resolve(&self, _sx: i32, _sy: i32, uv: Vec2) -> Option<Ink> {
        Some(self.bitmap.sample(uv.x as i32, uv.y as i32))
    }
}

/// Thresholds a gray texel against the dither matrix at the screen
/// position: a texel brighter than the threshold paints White, anything
/// else Black
pub struct DitherLookup<'a> {
    pub texture: &'a GrayTexture,
    pub matrix: &'a DitherMatrix,
}

impl TexelSampler for DitherLookup<'_> {
    fn resolve(&self, sx: i32, sy: i32, uv: Vec2) -> Option<Ink> {
        let texel = self.texture.get(uv.x as i32, uv.y as i32);
        if texel > self.matrix.threshold(sx, sy) {
            Some(Ink::White)
        } else {
            Some(Ink::Black)
        }
    }
}

/// Same threshold test, but a winning texel leaves the surface alone and
/// a losing one paints the configured ink. Stamps shadows over art that
/// is already on the surface.
pub struct MaskedPaint<'a> {
    pub texture: &'a GrayTexture,
    pub matrix: &'a DitherMatrix,
    pub ink: Ink,
}

impl TexelSampler for MaskedPaint<'_> {
    fn resolve(&self, sx: i32, sy: i32, uv: Vec2) -> Option<Ink> {
        let texel = self.texture.get(uv.x as i32, uv.y as i32);
        if texel > self.matrix.threshold(sx, sy) {
            None
        } else {
            Some(self.ink)
        }
    }
}

/// Fill a textured triangle with the split-scanline walk.
///
/// Vertices are sorted by row, then the triangle splits at the middle
/// vertex: the upper part walks edges 0-1 and 0-2, the lower part edges
/// 1-2 and 0-2. Edge crossings advance by integer slope accumulators, so
/// coverage is exact and repeatable regardless of vertex order. Rows and
/// spans are clipped to the surface; every covered pixel asks the sampler
/// for its ink.
pub fn fill_textured_triangle<S, T>(
    surface: &mut S,
    v0: TexVertex,
    v1: TexVertex,
    v2: TexVertex,
    sampler: &T,
) where
    S: PixelSurface,
    T: TexelSampler,
{
    let (mut v0, mut v1, mut v2) = (v0, v1, v2);

    // Sort by ascending row; each vertex keeps its own UV
    if v0.pos.y > v1.pos.y {
        std::mem::swap(&mut v0, &mut v1);
    }
    if v1.pos.y > v2.pos.y {
        std::mem::swap(&mut v1, &mut v2);
    }
    if v0.pos.y > v1.pos.y {
        std::mem::swap(&mut v0, &mut v1);
    }

    surface.begin_batch();

    if v0.pos.y == v2.pos.y {
        // All three vertices share one row: span the X extremes and lerp
        // UVs straight across. First listed vertex wins a tied extreme.
        let (mut left, mut right) = (v0, v0);
        if v1.pos.x < left.pos.x {
            left = v1;
        } else if v1.pos.x > right.pos.x {
            right = v1;
        }
        if v2.pos.x < left.pos.x {
            left = v2;
        } else if v2.pos.x > right.pos.x {
            right = v2;
        }
        span_lerp(
            surface,
            left.pos.x,
            v0.pos.y,
            right.pos.x - left.pos.x + 1,
            left.uv,
            right.uv,
            sampler,
        );
        surface.end_batch();
        return;
    }

    let dx01 = v1.pos.x - v0.pos.x;
    let dy01 = v1.pos.y - v0.pos.y;
    let dx02 = v2.pos.x - v0.pos.x;
    let dy02 = v2.pos.y - v0.pos.y;
    let dx12 = v2.pos.x - v1.pos.x;
    let dy12 = v2.pos.y - v1.pos.y;

    // One barycentric setup serves both halves. Collinear vertices that
    // still span rows give a zero cross product; the weights then blow up
    // to inf/NaN and the truncating casts clamp, so the few pixels such a
    // sliver covers read a clamped texel rather than faulting.
    let edge_a = v1.pos - v0.pos;
    let edge_b = v2.pos - v0.pos;
    let inv_den = 1.0 / edge_a.cross(edge_b) as f32;
    let uvs = (v0.uv, v1.uv, v2.uv);

    // A flat-bottom triangle keeps the middle row in the upper half so
    // the lower loop (and its zero dy12) never runs; otherwise the middle
    // row moves to the lower half, which likewise keeps a flat-top
    // triangle away from a zero dy01 here.
    let last = if v1.pos.y == v2.pos.y {
        v1.pos.y
    } else {
        v1.pos.y - 1
    };

    let mut sa: i32 = 0;
    let mut sb: i32 = 0;
    let mut y = v0.pos.y;
    if y < 0 {
        // Rows above the surface still advance the accumulators
        sa += -y * dx01;
        sb += -y * dx02;
        y = 0;
    }

    while y <= last && y < surface.height() {
        let a = v0.pos.x + sa / dy01;
        let b = v0.pos.x + sb / dy02;
        sa += dx01;
        sb += dx02;
        span_textured(surface, a, b, y, v0.pos, edge_a, edge_b, inv_den, uvs, sampler);
        y += 1;
    }

    // Lower half restarts the accumulators at its first row
    let mut y = (last + 1).max(0);
    let mut sa: i32 = dx12 * (y - v1.pos.y);
    let mut sb: i32 = dx02 * (y - v0.pos.y);
    let end = v2.pos.y.min(surface.height() - 1);

    while y <= end {
        let a = v1.pos.x + sa / dy12;
        let b = v0.pos.x + sb / dy02;
        sa += dx12;
        sb += dx02;
        span_textured(surface, a, b, y, v0.pos, edge_a, edge_b, inv_den, uvs, sampler);
        y += 1;
    }

    surface.end_batch();
}

/// One row of the triangle fill. Span ends may arrive in either order;
/// each covered pixel resolves through the barycentric weights at its
/// own position, so clipping the span never shifts the texture.
#[allow(clippy::too_many_arguments)]
fn span_textured<S, T>(
    surface: &mut S,
    a: i32,
    b: i32,
    y: i32,
    origin: Vec2i,
    edge_a: Vec2i,
    edge_b: Vec2i,
    inv_den: f32,
    uvs: (Vec2, Vec2, Vec2),
    sampler: &T,
) where
    S: PixelSurface,
    T: TexelSampler,
{
    let (a, b) = if a > b { (b, a) } else { (a, b) };
    let x0 = a.max(0);
    let x1 = b.min(surface.width() - 1);

    for x in x0..=x1 {
        let (u, v, w) = barycentric(Vec2i::new(x, y), origin, edge_a, edge_b, inv_den);
        let uv = uvs.0 * u + uvs.1 * v + uvs.2 * w;
        if let Some(ink) = sampler.resolve(x, y, uv) {
            surface.set_pixel(x, y, ink);
        }
    }
}

/// Single-row fill for a triangle collapsed onto one scanline.
///
/// The UV blend steps by `1 / (w + 1)` and starts at `uv_b`, so the
/// leftmost pixel samples the right extreme's UV and the blend never
/// quite reaches `uv_a`.
fn span_lerp<S, T>(surface: &mut S, x: i32, y: i32, w: i32, uv_a: Vec2, uv_b: Vec2, sampler: &T)
where
    S: PixelSurface,
    T: TexelSampler,
{
    if y < 0 || y >= surface.height() {
        return;
    }
    let x0 = x.max(0);
    let x1 = (x + w - 1).min(surface.width() - 1);

    for px in x0..=x1 {
        let t = (px - x) as f32 / (w + 1) as f32;
        let uv = uv_a * t + uv_b * (1.0 - t);
        if let Some(ink) = sampler.resolve(px, y, uv) {
            surface.set_pixel(px, y, ink);
        }
    }
}

/// Draw a straight line with Bresenham stepping
pub fn draw_line<S: PixelSurface>(surface: &mut S, from: Vec2i, to: Vec2i, ink: Ink) {
    surface.begin_batch();
    line_span(surface, from, to, ink);
    surface.end_batch();
}

/// Outline a triangle edge by edge
pub fn draw_triangle<S: PixelSurface>(surface: &mut S, v0: Vec2i, v1: Vec2i, v2: Vec2i, ink: Ink) {
    surface.begin_batch();
    line_span(surface, v0, v1, ink);
    line_span(surface, v1, v2, ink);
    line_span(surface, v2, v0, ink);
    surface.end_batch();
}

fn line_span<S: PixelSurface>(surface: &mut S, from: Vec2i, to: Vec2i, ink: Ink) {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut x = from.x;
    let mut y = from.y;

    loop {
        if x >= 0 && x < surface.width() && y >= 0 && y < surface.height() {
            surface.set_pixel(x, y, ink);
        }

        if x == to.x && y == to.y {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
