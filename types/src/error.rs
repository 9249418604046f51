use std::fmt;

/// Data-model level errors: malformed construction requests against the
/// types in this crate. This mirrors the lightweight, manual-impl error
/// style used for data-model errors; the richer topology/algorithm error
/// taxonomy lives in the `topo2d` core crate.
#[derive(Debug)]
pub enum Error {
    InvalidRing { reason: &'static str },
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidRing { reason } => write!(f, "invalid linear ring: {reason}"),
        }
    }
}
