#![warn(missing_debug_implementations)]
//! Data model for the `topo2d` planar geometry engine.
//!
//! This crate defines the value types that the topology core builds on:
//! [`Coord`], [`Envelope`], [`PrecisionModel`], [`CoordinateSequence`], and
//! the [`Geometry`] tagged union. It is deliberately small — no algorithms
//! live here, only the shapes and invariants every algorithm crate in the
//! workspace shares.
//!
//! Coordinates are always `f64`; there is no generic numeric-type parameter.
//! The topology core this crate supports is specified directly against
//! IEEE-754 doubles, so a `CoordNum`-style abstraction would only add
//! indirection without a second concrete instantiation to justify it.

mod coord;
mod coordinate_sequence;
mod envelope;
mod error;
mod geometry;
mod precision_model;

pub use coord::Coord;
pub use coordinate_sequence::{CoordinateSequence, Dimension};
pub use envelope::Envelope;
pub use error::Error;
pub use geometry::{
    CurvedGeometry, Geometry, GeometryCollection, GeometryDimension, LinearRing, LineString,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
pub use precision_model::PrecisionModel;
