//! `topo2d` provides the robust numeric and topological core of a planar
//! geometry engine: the predicates and spatial indices that every
//! higher-level geometric operation is built from, plus the three
//! operations that are hardest to get right without them — noding,
//! DE-9IM relate, and validity/overlay.
//!
//! # Modules
//!
//! - **[`kernels`]**: robust orientation, point-location and line
//!   intersection predicates. Every other module in this crate is built
//!   strictly on top of these.
//! - **[`index`]**: the spatial indices used by noding, relate and
//!   validity — monotone chains, an STR-tree, a sort-packed interval tree,
//!   an adaptive quadtree, and an arena-based half-edge graph.
//! - **[`noding`]**: turns raw, possibly self-intersecting or mutually
//!   crossing linework into a noded arrangement.
//! - **[`relate`]**: the DE-9IM relate engine and the named OGC predicates
//!   built on top of it.
//! - **[`valid`]**: OGC Simple Features validity checking for polygons and
//!   multi-polygons.
//! - **[`overlay`]**: polygon set operations (intersection, union,
//!   difference, symmetric difference) over a noded arrangement.
//!
//! Re-exported from [`topo2d_types`]: the geometry data model
//! (`Coord`, `Geometry`, `Envelope`, `PrecisionModel`, ...) that every
//! algorithm here operates on.

#![warn(missing_debug_implementations)]

pub mod cancellation;
pub mod error;
pub mod index;
pub mod kernels;
pub mod noding;
pub mod overlay;
pub mod relate;
pub mod valid;

pub use cancellation::CancellationToken;
pub use error::{Error, Result};

pub use topo2d_types as types;
