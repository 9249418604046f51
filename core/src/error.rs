use topo2d_types::Coord;

/// The error taxonomy for every fallible operation in the topology core.
///
/// `TopologyError` and `NonConvergence` are the two numerically recoverable
/// kinds: callers are expected to retry the same operation under a
/// [`topo2d_types::PrecisionModel::Fixed`] model. `InvalidArgument` and
/// `ParseError` are caller errors that bubble up untouched.
/// `InternalAssertion` indicates a violated invariant and should never be
/// caught and retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("parse error at offset {offset:?}: {message}")]
    ParseError {
        message: String,
        offset: Option<usize>,
    },

    #[error("topology exception at ({x}, {y}): {message}", x = .coordinate.x, y = .coordinate.y)]
    TopologyError { message: String, coordinate: Coord },

    #[error("noding did not converge after {iterations} iterations")]
    NonConvergence { iterations: usize },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("operation interrupted")]
    Interrupted,

    #[error("internal assertion failed: {0}")]
    InternalAssertion(String),
}

impl Error {
    pub fn topology(message: impl Into<String>, coordinate: Coord) -> Self {
        Error::TopologyError {
            message: message.into(),
            coordinate,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Whether the caller may reasonably retry this operation after
    /// snapping inputs to a fixed precision model.
    pub fn is_recoverable_by_precision_reduction(&self) -> bool {
        matches!(self, Error::TopologyError { .. } | Error::NonConvergence { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
