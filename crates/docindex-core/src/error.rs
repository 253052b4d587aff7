use derive_more::Display;
use thiserror::Error as ThisError;

///
/// IndexError
///
/// Failure raised while registering entity models or resolving their index
/// definitions. Every error aborts the whole call; no partial list is
/// returned.
///

#[derive(Debug, ThisError)]
pub enum IndexError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("malformed index configuration at '{path}': {message}")]
    MalformedConfiguration { path: String, message: String },

    #[error("cyclic entity reference at '{path}': '{entity}' is already being resolved")]
    CyclicReference { path: String, entity: String },

    #[error("entity graph nesting exceeds {max_depth} levels at '{path}'")]
    DepthLimitExceeded { path: String, max_depth: usize },

    #[error("index definition holder '{path}' has no index definition attached")]
    NullState { path: String },
}

impl IndexError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedConfiguration {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Stable classification of this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidArgument { .. } => ErrorClass::InvalidArgument,
            Self::MalformedConfiguration { .. }
            | Self::CyclicReference { .. }
            | Self::DepthLimitExceeded { .. } => ErrorClass::MalformedConfiguration,
            Self::NullState { .. } => ErrorClass::NullState,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
/// Error taxonomy: caller input, declaration content, or internal misuse.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorClass {
    #[display("invalid_argument")]
    InvalidArgument,

    #[display("malformed_configuration")]
    MalformedConfiguration,

    #[display("null_state")]
    NullState,
}
