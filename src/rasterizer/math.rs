//! Vector math for face-space geometry and pixel-space rasterization
//!
//! Two value types: `Vec2` for continuous face-space points/directions and
//! `Vec2i` for pixel-space triangle vertices, so scanline walking stays in
//! exact integer arithmetic.

use std::ops::{Add, Mul, Sub};

/// 2D float vector (face-space point or direction)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D scalar cross product (z component of the 3D cross)
    pub fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Divide by magnitude; identity when the magnitude is not positive
    pub fn normalize(self) -> Vec2 {
        let l = self.len();
        if l <= 0.0 {
            return self;
        }
        Vec2 {
            x: self.x / l,
            y: self.y / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }

    /// Rotate by an angle in degrees
    pub fn rotate(self, degrees: f32) -> Vec2 {
        let radians = degrees.to_radians();
        self.rotate_by(radians.sin(), radians.cos())
    }

    /// Rotate by a precomputed sin/cos pair.
    /// Use this when many vectors share one rotation so the trig runs once.
    pub fn rotate_by(self, sin: f32, cos: f32) -> Vec2 {
        Vec2 {
            x: cos * self.x - sin * self.y,
            y: sin * self.x + cos * self.y,
        }
    }

    /// Exact rotation by `quarters` right angles via coordinate swap/negation.
    /// No trig, no float error; negative counts rotate the other way.
    pub fn rotate_right_angle(self, quarters: i32) -> Vec2 {
        match quarters.rem_euclid(4) {
            1 => Vec2 { x: -self.y, y: self.x },
            2 => Vec2 { x: -self.x, y: -self.y },
            3 => Vec2 { x: self.y, y: -self.x },
            _ => self,
        }
    }

    /// Narrow to pixel coordinates, truncating toward zero
    pub fn to_pixel(self) -> Vec2i {
        Vec2i {
            x: self.x as i32,
            y: self.y as i32,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        self.scale(s)
    }
}

/// 2D integer vector (pixel-space vertex)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub const ZERO: Vec2i = Vec2i { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2i) -> i32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D scalar cross product, exact in i32
    pub fn cross(self, other: Vec2i) -> i32 {
        self.x * other.y - self.y * other.x
    }

    pub fn len(self) -> f32 {
        (self.dot(self) as f32).sqrt()
    }

    /// Divide by magnitude, truncating each component; identity when the
    /// magnitude is not positive. Mostly collapses to a unit step direction.
    pub fn normalize(self) -> Vec2i {
        let l = self.len();
        if l <= 0.0 {
            return self;
        }
        Vec2i {
            x: (self.x as f32 / l) as i32,
            y: (self.y as f32 / l) as i32,
        }
    }

    /// Scale by a float factor, truncating back to integer components
    pub fn scale(self, s: f32) -> Vec2i {
        Vec2i {
            x: (self.x as f32 * s) as i32,
            y: (self.y as f32 * s) as i32,
        }
    }

    /// Rotate by an angle in degrees, truncating back to integer components
    pub fn rotate(self, degrees: f32) -> Vec2i {
        let radians = degrees.to_radians();
        let (sin, cos) = (radians.sin(), radians.cos());
        Vec2i {
            x: (cos * self.x as f32 - sin * self.y as f32) as i32,
            y: (sin * self.x as f32 + cos * self.y as f32) as i32,
        }
    }

    /// Exact rotation by `quarters` right angles via coordinate swap/negation
    pub fn rotate_right_angle(self, quarters: i32) -> Vec2i {
        match quarters.rem_euclid(4) {
            1 => Vec2i { x: -self.y, y: self.x },
            2 => Vec2i { x: -self.x, y: -self.y },
            3 => Vec2i { x: self.y, y: -self.x },
            _ => self,
        }
    }

    pub fn to_float(self) -> Vec2 {
        Vec2 {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}

impl Add for Vec2i {
    type Output = Vec2i;
    fn add(self, other: Vec2i) -> Vec2i {
        Vec2i {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2i {
    type Output = Vec2i;
    fn sub(self, other: Vec2i) -> Vec2i {
        Vec2i {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Barycentric weights of pixel `p` in the triangle with vertex `origin` and
/// edge vectors `a = v1 - origin`, `b = v2 - origin`.
///
/// `inv_den` is `1 / cross(a, b)`, computed once per triangle. All-on-one-row
/// triangles never get here (the scanline fill routes them to its horizontal
/// path), but collinear vertices spanning several rows do; those give an
/// infinite `inv_den` and non-finite weights, which the caller's truncating
/// casts absorb. For a proper triangle the returned `(u, v, w)` sum to 1 and
/// weight the attributes of `origin`, `v1`, `v2` respectively:
/// `uv0*u + uv1*v + uv2*w` reproduces the affine texture map at `p`.
pub fn barycentric(p: Vec2i, origin: Vec2i, a: Vec2i, b: Vec2i, inv_den: f32) -> (f32, f32, f32) {
    let rel = p - origin;
    let v = (rel.x * b.y - b.x * rel.y) as f32 * inv_den;
    let w = (a.x * rel.y - rel.x * a.y) as f32 * inv_den;
    let u = 1.0 - v - w;
    (u, v, w)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_vec2_dot_cross() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.dot(b) - 11.0).abs() < EPS);
        assert!((a.cross(b) - (-2.0)).abs() < EPS);
    }

    #[test]
    fn test_rotate_preserves_magnitude() {
        let v = Vec2::new(3.0, -4.0);
        for deg in [0.0, 17.5, 90.0, 133.0, 270.0, 359.0] {
            let r = v.rotate(deg);
            assert!((r.len() - v.len()).abs() < EPS, "deg {}", deg);
        }
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let v = Vec2::new(0.25, -7.5);
        let r = v.rotate(0.0);
        assert!((r.x - v.x).abs() < EPS);
        assert!((r.y - v.y).abs() < EPS);
    }

    #[test]
    fn test_rotate_composes() {
        let v = Vec2::new(1.0, 2.0);
        let twice = v.rotate(40.0).rotate(25.0);
        let once = v.rotate(65.0);
        assert!((twice.x - once.x).abs() < EPS);
        assert!((twice.y - once.y).abs() < EPS);
    }

    #[test]
    fn test_right_angle_matches_trig() {
        let v = Vec2::new(2.0, 5.0);
        for k in 0..4 {
            let exact = v.rotate_right_angle(k);
            let trig = v.rotate(90.0 * k as f32);
            assert!((exact.x - trig.x).abs() < EPS, "k {}", k);
            assert!((exact.y - trig.y).abs() < EPS, "k {}", k);
        }
        // Negative counts rotate the other way
        assert_eq!(v.rotate_right_angle(-1), v.rotate_right_angle(3));
    }

    #[test]
    fn test_normalize_guards_zero() {
        let z = Vec2::ZERO.normalize();
        assert_eq!(z, Vec2::ZERO);
        let v = Vec2::new(3.0, 4.0).normalize();
        assert!((v.len() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_to_pixel_truncates_toward_zero() {
        assert_eq!(Vec2::new(99.9, 99.1).to_pixel(), Vec2i::new(99, 99));
        assert_eq!(Vec2::new(-0.7, -1.2).to_pixel(), Vec2i::new(0, -1));
    }

    #[test]
    fn test_vec2i_cross_is_exact() {
        let a = Vec2i::new(240, 0);
        let b = Vec2i::new(0, 240);
        assert_eq!(a.cross(b), 240 * 240);
        assert_eq!(b.cross(a), -(240 * 240));
    }

    #[test]
    fn test_vec2i_dot_and_scale() {
        let a = Vec2i::new(3, 4);
        assert_eq!(a.dot(Vec2i::new(2, -1)), 2);
        assert_eq!(a.dot(Vec2i::ZERO), 0);
        assert!((a.len() - 5.0).abs() < EPS);

        // Scale truncates toward zero, like the pixel narrowing
        assert_eq!(a.scale(2.0), Vec2i::new(6, 8));
        assert_eq!(Vec2i::new(5, -5).scale(0.5), Vec2i::new(2, -2));
    }

    #[test]
    fn test_vec2i_rotate_truncates() {
        let v = Vec2i::new(7, -3);
        assert_eq!(v.rotate(0.0), v);
        // A 45-degree turn lands well clear of the truncation boundaries
        assert_eq!(Vec2i::new(100, 0).rotate(45.0), Vec2i::new(70, 70));
        assert_eq!(Vec2i::new(0, 100).rotate(45.0), Vec2i::new(-70, 70));
    }

    #[test]
    fn test_vec2i_right_angle_is_exact() {
        let v = Vec2i::new(3, 4);
        assert_eq!(v.rotate_right_angle(1), Vec2i::new(-4, 3));
        assert_eq!(v.rotate_right_angle(2), Vec2i::new(-3, -4));
        assert_eq!(v.rotate_right_angle(3), Vec2i::new(4, -3));
        assert_eq!(v.rotate_right_angle(4), v);
        // Negative counts rotate the other way
        assert_eq!(v.rotate_right_angle(-1), v.rotate_right_angle(3));
    }

    #[test]
    fn test_vec2i_normalize_collapses_to_step() {
        assert_eq!(Vec2i::new(0, 7).normalize(), Vec2i::new(0, 1));
        assert_eq!(Vec2i::new(-5, 0).normalize(), Vec2i::new(-1, 0));
        // Off-axis components truncate away
        assert_eq!(Vec2i::new(3, 4).normalize(), Vec2i::ZERO);
        assert_eq!(Vec2i::ZERO.normalize(), Vec2i::ZERO);
    }

    #[test]
    fn test_vec2i_to_float_round_trip() {
        let v = Vec2i::new(12, -7);
        assert_eq!(v.to_float(), Vec2::new(12.0, -7.0));
        assert_eq!(v.to_float().to_pixel(), v);
    }

    #[test]
    fn test_barycentric_at_vertices() {
        let v0 = Vec2i::new(10, 10);
        let v1 = Vec2i::new(50, 12);
        let v2 = Vec2i::new(25, 60);
        let a = v1 - v0;
        let b = v2 - v0;
        let inv_den = 1.0 / a.cross(b) as f32;

        let (u, v, w) = barycentric(v0, v0, a, b, inv_den);
        assert!((u - 1.0).abs() < EPS && v.abs() < EPS && w.abs() < EPS);

        let (u, v, w) = barycentric(v1, v0, a, b, inv_den);
        assert!(u.abs() < EPS && (v - 1.0).abs() < EPS && w.abs() < EPS);

        let (u, v, w) = barycentric(v2, v0, a, b, inv_den);
        assert!(u.abs() < EPS && v.abs() < EPS && (w - 1.0).abs() < EPS);
    }

    #[test]
    fn test_barycentric_partition_of_unity_inside() {
        let v0 = Vec2i::new(0, 0);
        let v1 = Vec2i::new(40, 4);
        let v2 = Vec2i::new(12, 36);
        let a = v1 - v0;
        let b = v2 - v0;
        let inv_den = 1.0 / a.cross(b) as f32;

        for p in [Vec2i::new(15, 10), Vec2i::new(20, 15), Vec2i::new(10, 12)] {
            let (u, v, w) = barycentric(p, v0, a, b, inv_den);
            assert!((u + v + w - 1.0).abs() < EPS);
            assert!((0.0..=1.0).contains(&u), "u {}", u);
            assert!((0.0..=1.0).contains(&v), "v {}", v);
            assert!((0.0..=1.0).contains(&w), "w {}", w);
        }
    }

    #[test]
    fn test_barycentric_reproduces_affine_map() {
        let v0 = Vec2i::new(0, 0);
        let v1 = Vec2i::new(100, 0);
        let v2 = Vec2i::new(0, 100);
        let a = v1 - v0;
        let b = v2 - v0;
        let inv_den = 1.0 / a.cross(b) as f32;

        // Identity UV assignment: interpolated UV equals the pixel itself
        let uv0 = Vec2::new(0.0, 0.0);
        let uv1 = Vec2::new(100.0, 0.0);
        let uv2 = Vec2::new(0.0, 100.0);

        let p = Vec2i::new(30, 20);
        let (u, v, w) = barycentric(p, v0, a, b, inv_den);
        let uv = uv0 * u + uv1 * v + uv2 * w;
        assert!((uv.x - 30.0).abs() < EPS);
        assert!((uv.y - 20.0).abs() < EPS);
    }
}
