//! Full face composition
//!
//! Draw order, back to front:
//! 1. White background
//! 2. Three textured spiral turns, each step filling the band between a
//!    turn and the turn one loop further in, plus its shaded rim band
//! 3. A fourth turn of outline-only rim triangles
//! 4. The center shadow, stamped in black over the spiral
//! 5. Hour and minute hands
//! 6. The low-battery badge, when the gauge says so

use super::battery::BatteryGauge;
use super::geometry::{FaceGeometry, CENTER, RADIUS};
use super::hand::draw_hand;
use crate::assets::FaceAssets;
use crate::rasterizer::{
    draw_line, draw_triangle, fill_textured_triangle, BitLookup, DitherLookup, Ink, MaskedPaint,
    PixelSurface, TexVertex, Vec2, Vec2i,
};

/// Wall-clock time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
        }
    }
}

/// Hour hand angle in degrees, swept smoothly by the minutes
pub fn hour_angle(time: ClockTime) -> f32 {
    ((time.hour % 12) as f32 + time.minute as f32 / 60.0) * 30.0
}

/// Minute hand angle in degrees
pub fn minute_angle(time: ClockTime) -> f32 {
    time.minute as f32 * 6.0
}

/// Center shadow quad, stamped with UVs equal to its pixel positions
const SHADOW_CORNERS: [Vec2; 4] = [
    Vec2 { x: 66.0, y: 66.0 },
    Vec2 { x: 133.0, y: 66.0 },
    Vec2 { x: 133.0, y: 133.0 },
    Vec2 { x: 66.0, y: 133.0 },
];

/// Where the low-battery badge lands, just above six o'clock
const BADGE_ORIGIN: Vec2i = Vec2i { x: 92, y: 168 };

fn tex(pos: Vec2, uv: Vec2) -> TexVertex {
    TexVertex::new(pos.to_pixel(), uv)
}

/// Render the complete face for one moment in time
pub fn draw_face<S: PixelSurface>(
    surface: &mut S,
    geometry: &FaceGeometry,
    assets: &FaceAssets,
    gauge: &BatteryGauge,
    time: ClockTime,
    voltage: f32,
) {
    surface.fill(Ink::White);

    let steps = geometry.steps_per_turn();
    let phase = geometry.minute_phase(time.minute);
    let rim = geometry.rim_size() * gauge.rim_scale(voltage);
    let inset = geometry.loop_scale();

    let face_shade = DitherLookup {
        texture: &assets.face,
        matrix: &assets.noise,
    };
    let rim_shade = DitherLookup {
        texture: &assets.matcap,
        matrix: &assets.noise,
    };

    // Three textured turns, the seam rotated to the current minute
    for i in phase..steps * 3 + phase {
        let step = i - phase;
        let normal = geometry.edge_normal(i);
        let next_normal = geometry.edge_normal(i + 1);

        let scale1 = geometry.face_radius() * geometry.loop_scale_at(step);
        let v1 = normal * scale1 + CENTER;
        let uv1 = normal * RADIUS + CENTER;

        let scale2 = geometry.face_radius() * geometry.loop_scale_at(step + 1);
        let v2 = next_normal * scale2 + CENTER;
        let uv2 = next_normal * RADIUS + CENTER;

        // Matching edge one full turn further in
        let v1a = normal * (scale1 * inset) + CENTER;
        let uv1a = normal * (RADIUS * inset) + CENTER;
        let v2a = next_normal * (scale2 * inset) + CENTER;
        let uv2a = next_normal * (RADIUS * inset) + CENTER;

        fill_textured_triangle(surface, tex(v1a, uv1a), tex(v1, uv1), tex(v2, uv2), &face_shade);
        fill_textured_triangle(surface, tex(v2a, uv2a), tex(v1a, uv1a), tex(v2, uv2), &face_shade);

        // Rim band outside the spiral edge. Inner vertices take the far
        // side of the matcap so the band reads as a lit ridge.
        let v4 = normal * (scale1 + rim * geometry.loop_scale_at(step)) + CENTER;
        let uv3 = normal * -RADIUS + CENTER;
        let uv4 = normal * RADIUS + CENTER;
        let v6 = next_normal * (scale2 + rim * geometry.loop_scale_at(step + 1)) + CENTER;
        let uv5 = next_normal * -RADIUS + CENTER;
        let uv6 = next_normal * RADIUS + CENTER;

        fill_textured_triangle(surface, tex(v1, uv3), tex(v4, uv4), tex(v2, uv5), &rim_shade);
        fill_textured_triangle(surface, tex(v4, uv4), tex(v2, uv5), tex(v6, uv6), &rim_shade);

        draw_line(surface, v1.to_pixel(), v2.to_pixel(), Ink::Black);
        draw_line(surface, v4.to_pixel(), v6.to_pixel(), Ink::Black);
    }

    // Fourth turn: rim outlines only, stopping one edge short of the seam
    for i in steps * 3 + phase..steps * 4 + phase - 1 {
        let step = i - phase;
        let normal = geometry.edge_normal(i);
        let next_normal = geometry.edge_normal(i + 1);

        let scale1 = geometry.face_radius() * geometry.loop_scale_at(step);
        let v1 = normal * scale1 + CENTER;
        let scale2 = geometry.face_radius() * geometry.loop_scale_at(step + 1);
        let v2 = next_normal * scale2 + CENTER;
        let v4 = normal * (scale1 + rim * geometry.loop_scale_at(step)) + CENTER;
        let v6 = next_normal * (scale2 + rim * geometry.loop_scale_at(step + 1)) + CENTER;

        draw_triangle(surface, v1.to_pixel(), v4.to_pixel(), v2.to_pixel(), Ink::Black);
        draw_triangle(surface, v4.to_pixel(), v2.to_pixel(), v6.to_pixel(), Ink::Black);
    }

    // Center shadow darkens the spiral around the pivot
    let shadow = MaskedPaint {
        texture: &assets.center_shadow,
        matrix: &assets.noise,
        ink: Ink::Black,
    };
    fill_textured_triangle(
        surface,
        tex(SHADOW_CORNERS[0], SHADOW_CORNERS[0]),
        tex(SHADOW_CORNERS[1], SHADOW_CORNERS[1]),
        tex(SHADOW_CORNERS[2], SHADOW_CORNERS[2]),
        &shadow,
    );
    fill_textured_triangle(
        surface,
        tex(SHADOW_CORNERS[2], SHADOW_CORNERS[2]),
        tex(SHADOW_CORNERS[3], SHADOW_CORNERS[3]),
        tex(SHADOW_CORNERS[0], SHADOW_CORNERS[0]),
        &shadow,
    );

    draw_hand(surface, hour_angle(time), 70.0, &assets.matcap, &assets.noise);
    draw_hand(surface, minute_angle(time), 90.0, &assets.matcap, &assets.noise);

    if gauge.is_low(voltage) {
        draw_low_battery_badge(surface, assets);
    }
}

/// Stamp the battery glyph as two bitmap-textured triangles
fn draw_low_battery_badge<S: PixelSurface>(surface: &mut S, assets: &FaceAssets) {
    let lookup = BitLookup {
        bitmap: &assets.low_battery,
    };

    let (w, h) = (assets.low_battery.width, assets.low_battery.height);
    let tl = TexVertex::new(BADGE_ORIGIN, Vec2::new(0.0, 0.0));
    let tr = TexVertex::new(BADGE_ORIGIN + Vec2i::new(w, 0), Vec2::new(w as f32, 0.0));
    let br = TexVertex::new(BADGE_ORIGIN + Vec2i::new(w, h), Vec2::new(w as f32, h as f32));
    let bl = TexVertex::new(BADGE_ORIGIN + Vec2i::new(0, h), Vec2::new(0.0, h as f32));

    fill_textured_triangle(surface, tl, tr, br, &lookup);
    fill_textured_triangle(surface, br, bl, tl, &lookup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::FaceAssets;
    use crate::rasterizer::{Canvas, HEIGHT, WIDTH};

    fn render(time: ClockTime, voltage: f32) -> Canvas {
        let mut canvas = Canvas::new(WIDTH, HEIGHT);
        let geometry = FaceGeometry::default();
        let assets = FaceAssets::synthetic();
        let gauge = BatteryGauge::default();
        draw_face(&mut canvas, &geometry, &assets, &gauge, time, voltage);
        canvas
    }

    #[test]
    fn test_hour_angle() {
        assert!((hour_angle(ClockTime::new(3, 30)) - 105.0).abs() < 1e-4);
        assert!((hour_angle(ClockTime::new(15, 30)) - 105.0).abs() < 1e-4);
        assert!((hour_angle(ClockTime::new(0, 0)) - 0.0).abs() < 1e-4);
        assert!((hour_angle(ClockTime::new(11, 59)) - 359.5).abs() < 1e-3);
    }

    #[test]
    fn test_minute_angle() {
        assert!((minute_angle(ClockTime::new(0, 0)) - 0.0).abs() < 1e-4);
        assert!((minute_angle(ClockTime::new(0, 45)) - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_clock_time_wraps() {
        let t = ClockTime::new(26, 75);
        assert_eq!(t.hour, 2);
        assert_eq!(t.minute, 15);
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = render(ClockTime::new(10, 8), 4.0);
        let b = render(ClockTime::new(10, 8), 4.0);
        assert_eq!(a.packed_bits(), b.packed_bits());
    }

    #[test]
    fn test_render_uses_both_inks() {
        let canvas = render(ClockTime::new(10, 8), 4.0);
        let luma = canvas.to_luma();
        let white = luma.iter().filter(|&&v| v == 255).count();
        let black = luma.len() - white;
        assert!(white > 1000, "white pixels: {}", white);
        assert!(black > 1000, "black pixels: {}", black);
    }

    #[test]
    fn test_minute_moves_the_face() {
        let a = render(ClockTime::new(10, 0), 4.0);
        let b = render(ClockTime::new(10, 30), 4.0);
        assert_ne!(a.packed_bits(), b.packed_bits());
    }

    #[test]
    fn test_battery_changes_rim() {
        let full = render(ClockTime::new(10, 8), 4.2);
        let half = render(ClockTime::new(10, 8), 3.85);
        assert_ne!(full.packed_bits(), half.packed_bits());
    }

    #[test]
    fn test_low_battery_badge_appears() {
        let low = render(ClockTime::new(10, 8), 3.55);
        let ok = render(ClockTime::new(10, 8), 3.7);

        // Glyph border pixel goes white, hollow interior goes black
        assert_eq!(low.get_pixel(BADGE_ORIGIN.x + 1, BADGE_ORIGIN.y + 4), Ink::White);
        assert_eq!(low.get_pixel(BADGE_ORIGIN.x + 8, BADGE_ORIGIN.y + 8), Ink::Black);

        // The badge area differs from a healthy render
        let differs = (0..16).any(|dy| {
            (0..16).any(|dx| {
                low.get_pixel(BADGE_ORIGIN.x + dx, BADGE_ORIGIN.y + dy)
                    != ok.get_pixel(BADGE_ORIGIN.x + dx, BADGE_ORIGIN.y + dy)
            })
        });
        assert!(differs);
    }
}
