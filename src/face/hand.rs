//! Clock hand mesh and drawing
//!
//! One hand shape serves both hands; it is modeled in a unit space with
//! the tip at (0, -1) and a short counterweight tail past the pivot.
//! Each vertex carries a matcap normal that rotates with the mesh, so the
//! shading wraps around the hand as it turns.

use super::geometry::{CENTER, RADIUS};
use crate::rasterizer::{
    draw_line, fill_textured_triangle, DitherLookup, DitherMatrix, GrayTexture, Ink, PixelSurface,
    TexVertex, Vec2,
};

const HAND_POINTS: [Vec2; 7] = [
    Vec2 { x: 0.0, y: -1.0 },
    Vec2 { x: 0.0, y: -0.8 },
    Vec2 { x: 0.1, y: -0.8 },
    Vec2 { x: 0.0, y: 0.0 },
    Vec2 { x: 0.05, y: 0.15 },
    Vec2 { x: -0.05, y: 0.15 },
    Vec2 { x: -0.1, y: -0.8 },
];

const HAND_NORMALS: [Vec2; 17] = [
    Vec2 { x: 0.5, y: -0.85 },
    Vec2 { x: 0.2, y: -0.2 },
    Vec2 { x: 0.85, y: -0.5 },
    Vec2 { x: 0.3, y: -0.1 },
    Vec2 { x: 0.96, y: -0.1 },
    Vec2 { x: 0.3, y: 0.1 },
    Vec2 { x: 0.96, y: 0.1 },
    Vec2 { x: 0.0, y: 0.3 },
    Vec2 { x: 0.1, y: 0.96 },
    Vec2 { x: -0.1, y: 0.96 },
    Vec2 { x: -0.3, y: -0.1 },
    Vec2 { x: -0.96, y: -0.1 },
    Vec2 { x: -0.3, y: 0.1 },
    Vec2 { x: -0.96, y: 0.1 },
    Vec2 { x: -0.5, y: -0.85 },
    Vec2 { x: -0.2, y: -0.2 },
    Vec2 { x: -0.85, y: -0.5 },
];

const HAND_TRIANGLES: [[usize; 3]; 7] = [
    [0, 1, 2],
    [1, 2, 3],
    [2, 3, 4],
    [3, 4, 5],
    [3, 5, 6],
    [3, 6, 1],
    [6, 1, 0],
];

const HAND_NORMAL_TRIANGLES: [[usize; 3]; 7] = [
    [0, 1, 2],
    [3, 4, 5],
    [4, 5, 6],
    [7, 8, 9],
    [10, 11, 13],
    [10, 13, 12],
    [14, 15, 16],
];

/// Silhouette vertices, traced in order
const HAND_OUTLINE: [usize; 5] = [0, 2, 4, 5, 6];

/// Draw one hand at `angle` degrees clockwise from twelve o'clock,
/// `length` pixels from pivot to tip, shaded through the matcap and
/// outlined in black.
pub fn draw_hand<S: PixelSurface>(
    surface: &mut S,
    angle: f32,
    length: f32,
    matcap: &GrayTexture,
    noise: &DitherMatrix,
) {
    let radians = angle.to_radians();
    let (sin, cos) = (radians.sin(), radians.cos());
    let shade = DitherLookup { texture: matcap, matrix: noise };

    let vertex = |point: usize, normal: usize| {
        let pos = HAND_POINTS[point].rotate_by(sin, cos) * length + CENTER;
        let uv = HAND_NORMALS[normal].rotate_by(sin, cos) * RADIUS + CENTER;
        TexVertex::new(pos.to_pixel(), uv)
    };

    for (tri, normals) in HAND_TRIANGLES.iter().zip(HAND_NORMAL_TRIANGLES.iter()) {
        fill_textured_triangle(
            surface,
            vertex(tri[0], normals[0]),
            vertex(tri[1], normals[1]),
            vertex(tri[2], normals[2]),
            &shade,
        );
    }

    let silhouette = |i: usize| {
        (HAND_POINTS[HAND_OUTLINE[i % HAND_OUTLINE.len()]].rotate_by(sin, cos) * length + CENTER)
            .to_pixel()
    };

    let mut current = silhouette(0);
    for i in 0..HAND_OUTLINE.len() {
        let next = silhouette(i + 1);
        draw_line(surface, current, next, Ink::Black);
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{Canvas, HEIGHT, WIDTH};

    fn bright_matcap() -> GrayTexture {
        GrayTexture::from_luma(200, 200, vec![255; 200 * 200])
    }

    fn permissive_noise() -> DitherMatrix {
        DitherMatrix::from_luma(2, vec![0, 0, 0, 0])
    }

    #[test]
    fn test_mesh_indices_in_range() {
        for tri in &HAND_TRIANGLES {
            assert!(tri.iter().all(|&i| i < HAND_POINTS.len()));
        }
        for tri in &HAND_NORMAL_TRIANGLES {
            assert!(tri.iter().all(|&i| i < HAND_NORMALS.len()));
        }
        assert!(HAND_OUTLINE.iter().all(|&i| i < HAND_POINTS.len()));
    }

    #[test]
    fn test_hand_at_twelve_points_up() {
        let mut canvas = Canvas::new(WIDTH, HEIGHT);
        draw_hand(&mut canvas, 0.0, 90.0, &bright_matcap(), &permissive_noise());

        let white_in = |y0: i32, y1: i32| {
            (y0..y1).any(|y| (0..WIDTH).any(|x| canvas.get_pixel(x, y) == Ink::White))
        };
        // Blade reaches up toward the top of the panel
        assert!(white_in(10, 100));
        // Nothing below the counterweight tail
        assert!(!white_in(150, 200));
    }

    #[test]
    fn test_hand_rotates_with_angle() {
        let mut canvas = Canvas::new(WIDTH, HEIGHT);
        draw_hand(&mut canvas, 180.0, 90.0, &bright_matcap(), &permissive_noise());

        let white_in = |y0: i32, y1: i32| {
            (y0..y1).any(|y| (0..WIDTH).any(|x| canvas.get_pixel(x, y) == Ink::White))
        };
        // Mirrored: blade hangs down, top quarter stays clear
        assert!(white_in(100, 190));
        assert!(!white_in(0, 50));
    }

    #[test]
    fn test_hands_differ_by_length() {
        let mut short = Canvas::new(WIDTH, HEIGHT);
        draw_hand(&mut short, 0.0, 70.0, &bright_matcap(), &permissive_noise());
        let mut long = Canvas::new(WIDTH, HEIGHT);
        draw_hand(&mut long, 0.0, 90.0, &bright_matcap(), &permissive_noise());
        assert_ne!(short.packed_bits(), long.packed_bits());
    }
}
