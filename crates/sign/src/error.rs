//! Error types for the signature crate

use latsig_algorithms::Error as AlgoError;
use latsig_api::Error as CoreError;

/// Errors that can occur during signature operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The entropy source could not supply random bytes
    #[error("Entropy source failure in {context}: {message}")]
    Entropy {
        context: &'static str,
        message: String,
    },

    /// A packed field was malformed or held out-of-range values
    #[error("Decode error in {context}: {details}")]
    Decode {
        context: &'static str,
        details: String,
    },

    /// Invalid key size
    #[error("Invalid key size: expected {expected}, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    /// Invalid signature size
    #[error("Invalid signature size: expected {expected}, got {actual}")]
    InvalidSignatureSize { expected: usize, actual: usize },

    /// Structurally valid key that fails a consistency check
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The rejection loop ran out of attempts
    #[error("{algorithm} signing exhausted after {attempts} rejected attempts")]
    SigningExhausted {
        algorithm: &'static str,
        attempts: u32,
    },

    /// Failure inside an arithmetic or hashing primitive
    #[error(transparent)]
    Primitive(#[from] AlgoError),
}

/// Result type for signature operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand for a decode failure
    pub(crate) fn decode(context: &'static str, details: impl Into<String>) -> Self {
        Error::Decode {
            context,
            details: details.into(),
        }
    }
}

// Errors surfacing from the entropy trait
impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EntropyError { context, message } => Error::Entropy { context, message },
            CoreError::DecodeError { context, message } => Error::Decode {
                context,
                details: message,
            },
            CoreError::InvalidLength {
                expected, actual, ..
            } => Error::InvalidKeySize { expected, actual },
            other => Error::InvalidParameter(other.to_string()),
        }
    }
}

// Convert to api::Error
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Entropy { context, message } => CoreError::EntropyError { context, message },
            Error::Decode { context, details } => CoreError::DecodeError {
                context,
                message: details,
            },
            Error::InvalidKeySize { expected, actual } => CoreError::InvalidLength {
                context: "key",
                expected,
                actual,
            },
            Error::InvalidSignatureSize { expected, actual } => CoreError::InvalidLength {
                context: "signature",
                expected,
                actual,
            },
            Error::InvalidKey(message) => CoreError::InvalidKey {
                context: "sign",
                message,
            },
            Error::InvalidParameter(message) => CoreError::InvalidParameter {
                context: "sign",
                message,
            },
            Error::SigningExhausted {
                algorithm,
                attempts,
            } => CoreError::SigningExhausted {
                context: algorithm,
                attempts,
            },
            Error::Primitive(e) => CoreError::from(e),
        }
    }
}
