//! Precomputed spiral geometry
//!
//! The face is a logarithmic spiral built from straight edges. Every turn
//! reuses the same ring of edge directions; only the radius shrinks, by
//! the configured loop scale per full turn. The direction ring and the
//! per-step radius scales are computed once and shared by every frame.

use crate::config::FaceConfig;
use crate::rasterizer::Vec2;

/// Panel midpoint, between the two center pixels
pub const CENTER: Vec2 = Vec2 { x: 99.5, y: 99.5 };

/// Radius used for texture-space UV offsets
pub const RADIUS: f32 = 99.0;

/// Spiral extent plus rim, before any turn scaling
const OUTER_RADIUS: f32 = 260.0;

/// Edge directions and radius scales for one face layout.
///
/// `density` multiplies the sixty base steps per turn; the minute phase
/// scales with it so a full hour still sweeps exactly one turn.
pub struct FaceGeometry {
    steps_per_turn: usize,
    phase_per_minute: usize,
    loop_scale: f32,
    rim_size: f32,
    face_radius: f32,
    edge_normals: Vec<Vec2>,
    loop_scales: Vec<f32>,
}

impl FaceGeometry {
    pub fn new(config: &FaceConfig) -> Self {
        let density = config.density.max(1) as usize;
        let steps = 60 * density;
        let step_angle = 360.0 / steps as f32;

        let up = Vec2::new(-1.0, 0.0);
        let edge_normals = (0..steps)
            .map(|i| up.rotate(i as f32 * step_angle).normalize())
            .collect();

        // Four turns of radius scales: three textured plus the outline turn
        let loop_scales = (0..steps * 4)
            .map(|i| config.loop_scale.powf(i as f32 / steps as f32))
            .collect();

        Self {
            steps_per_turn: steps,
            phase_per_minute: density,
            loop_scale: config.loop_scale,
            rim_size: config.rim_size,
            face_radius: OUTER_RADIUS - config.rim_size,
            edge_normals,
            loop_scales,
        }
    }

    pub fn steps_per_turn(&self) -> usize {
        self.steps_per_turn
    }

    /// Spiral step offset that rotates the seam to the current minute
    pub fn minute_phase(&self, minute: u32) -> usize {
        minute as usize * self.phase_per_minute
    }

    /// Edge direction for a step, wrapping past the end of the ring
    pub fn edge_normal(&self, step: usize) -> Vec2 {
        self.edge_normals[step % self.steps_per_turn]
    }

    /// Radius scale for a step; valid through all four turns
    pub fn loop_scale_at(&self, step: usize) -> f32 {
        self.loop_scales[step]
    }

    /// Radial shrink factor per full turn, also the inner-ring inset
    pub fn loop_scale(&self) -> f32 {
        self.loop_scale
    }

    /// Rim band thickness at full battery
    pub fn rim_size(&self) -> f32 {
        self.rim_size
    }

    /// Outermost spiral radius
    pub fn face_radius(&self) -> f32 {
        self.face_radius
    }
}

impl Default for FaceGeometry {
    fn default() -> Self {
        Self::new(&FaceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn with_density(density: u32) -> FaceGeometry {
        let config = FaceConfig {
            density,
            ..FaceConfig::default()
        };
        FaceGeometry::new(&config)
    }

    #[test]
    fn test_table_sizes() {
        let g = with_density(1);
        assert_eq!(g.steps_per_turn(), 60);
        assert_eq!(g.loop_scales.len(), 240);

        let g = with_density(3);
        assert_eq!(g.steps_per_turn(), 180);
        assert_eq!(g.loop_scales.len(), 720);
    }

    #[test]
    fn test_config_constants_carry_over() {
        let g = FaceGeometry::default();
        assert!((g.loop_scale() - 0.45).abs() < EPS);
        assert!((g.rim_size() - 20.0).abs() < EPS);
        assert!((g.face_radius() - 240.0).abs() < EPS);
    }

    #[test]
    fn test_edge_normals_are_unit() {
        let g = with_density(1);
        for step in 0..g.steps_per_turn() {
            let n = g.edge_normal(step);
            assert!((n.len() - 1.0).abs() < EPS, "step {}", step);
        }
    }

    #[test]
    fn test_edge_normal_ring() {
        let g = with_density(1);
        // Step zero points along negative X
        let first = g.edge_normal(0);
        assert!((first.x - -1.0).abs() < EPS);
        assert!(first.y.abs() < EPS);

        // A quarter turn later the direction has rotated ninety degrees
        let quarter = g.edge_normal(15);
        assert!(quarter.x.abs() < EPS);
        assert!((quarter.y - -1.0).abs() < EPS);

        // Indexing wraps
        let wrapped = g.edge_normal(60);
        assert!((wrapped.x - first.x).abs() < EPS);
        assert!((wrapped.y - first.y).abs() < EPS);
    }

    #[test]
    fn test_loop_scales_shrink_per_turn() {
        let g = with_density(1);
        assert!((g.loop_scale_at(0) - 1.0).abs() < EPS);
        assert!((g.loop_scale_at(60) - 0.45).abs() < EPS);
        assert!((g.loop_scale_at(120) - 0.45 * 0.45).abs() < 1e-3);
        for step in 1..240 {
            assert!(g.loop_scale_at(step) < g.loop_scale_at(step - 1));
        }
    }

    #[test]
    fn test_minute_phase_scales_with_density() {
        assert_eq!(with_density(1).minute_phase(17), 17);
        assert_eq!(with_density(2).minute_phase(17), 34);
    }

    #[test]
    fn test_denser_ring_keeps_step_angle() {
        let g = with_density(2);
        // 120 steps per turn, so step 30 is the quarter turn
        let quarter = g.edge_normal(30);
        assert!(quarter.x.abs() < EPS);
        assert!((quarter.y - -1.0).abs() < EPS);
    }
}
