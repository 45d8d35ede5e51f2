//! Rasterization and the retained scene.
//!
//! # Algorithms
//!
//! - **Wu's Anti-aliased Line**: thin strokes with sub-pixel accuracy
//! - **Bresenham's Line**: one-pixel grid lines
//! - **Midpoint Circle**: filled and outlined scatter markers
//! - **Scanline Fill**: violin bodies and thick strokes
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;
mod scene;

pub use primitives::{
    draw_circle, draw_circle_outline, draw_line, draw_line_aa, draw_polyline, draw_rect,
    draw_rect_outline, draw_thick_line, fill_polygon,
};
pub use scene::{Label, Scene, Shape, Stroke};
