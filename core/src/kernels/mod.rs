//! Robust primitive predicates: orientation, point location and the line
//! intersector. Every higher-level module in this crate (noding, relate,
//! validity, overlay) is built strictly on top of these — nowhere else does
//! the crate compute a cross product or compare floating-point coordinates
//! for order directly.

pub mod line_intersector;
pub mod orientation;
pub mod point_location;

pub use line_intersector::{intersect, LineIntersection, Segment};
pub use orientation::{is_ccw, orient2d, Orientation};
pub use point_location::{is_in_ring, is_on_line, is_on_segment, locate_in_ring, Location};
