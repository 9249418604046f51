//! Spatial indices consumed by noding, relate and validity: monotone
//! chains, the bulk-loaded STR-tree, the sort-packed interval tree, the
//! adaptive quadtree, and the arena-based half-edge graph.

pub mod half_edge_graph;
pub mod interval_rtree;
pub mod monotone_chain;
pub mod quadtree;
pub mod str_tree;

pub use half_edge_graph::{HalfEdgeGraph, HalfEdgeId};
pub use interval_rtree::{Interval, SortedPackedIntervalRTree};
pub use monotone_chain::MonotoneChain;
pub use quadtree::Quadtree;
pub use str_tree::StrTree;
