//! Watch face assembly
//!
//! Owns everything above the rasterizer: the spiral geometry tables, the
//! battery gauge, the hand meshes, and the composer that stacks them into
//! one frame.

mod battery;
mod compose;
mod geometry;
mod hand;

pub use battery::*;
pub use compose::*;
pub use geometry::*;
