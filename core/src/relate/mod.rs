//! The DE-9IM relate engine: a [`IntersectionMatrix`] between any two
//! geometries, and the named OGC predicates (`intersects`, `contains`,
//! `touches`, ...) built on top of it as matrix-pattern tests.

pub mod boundary_node_rule;
pub mod dimensions;
pub mod intersection_matrix;
pub mod locate;
pub mod predicates;
pub mod relate_computer;

pub use boundary_node_rule::BoundaryNodeRule;
pub use dimensions::Dimensions;
pub use intersection_matrix::IntersectionMatrix;
pub use predicates::{contains, covered_by, covers, crosses, disjoint, equals, intersects, overlaps, relate, touches, within};
pub use relate_computer::RelateComputer;
