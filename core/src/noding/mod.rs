//! Turns raw, possibly self-intersecting or mutually-crossing linework into
//! a noded arrangement: segments split at every crossing and touch so no
//! two result segments intersect except at a shared endpoint.

pub mod noder;
pub mod segment_string;
pub mod validator;

pub use noder::{IteratedNoder, McIndexNoder, Noder, SegmentExtractingNoder, SimpleNoder, SnapRoundingNoder, SnappingNoder};
pub use segment_string::{NodedSegmentString, SegmentNode, SegmentString};
pub use validator::{FastNodingValidator, NodingStatus};
