//! Error type definitions for signature operations

/// Primary error type for signature operations
///
/// Verification outcomes are not errors; a rejected signature is reported as
/// [`Verdict::Reject`](crate::Verdict::Reject) through the success channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The entropy source could not supply random bytes
    EntropyError {
        context: &'static str,
        message: String,
    },

    /// A fixed-width encoding was malformed or held out-of-range values
    DecodeError {
        context: &'static str,
        message: String,
    },

    /// The signing rejection loop hit its safety ceiling
    SigningExhausted {
        context: &'static str,
        attempts: u32,
    },

    /// Invalid key error
    InvalidKey {
        context: &'static str,
        message: String,
    },

    /// Invalid signature error
    InvalidSignature {
        context: &'static str,
        message: String,
    },

    /// Invalid length error with context
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter error
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// Other error
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for signature operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error, keeping its kind and payload
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::EntropyError { message, .. } => Self::EntropyError { context, message },
            Self::DecodeError { message, .. } => Self::DecodeError { context, message },
            Self::SigningExhausted { attempts, .. } => Self::SigningExhausted { context, attempts },
            Self::InvalidKey { message, .. } => Self::InvalidKey { context, message },
            Self::InvalidSignature { message, .. } => Self::InvalidSignature { context, message },
            Self::InvalidLength { expected, actual, .. } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::Other { message, .. } => Self::Other { context, message },
        }
    }

    /// Replace the message of an existing error
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            Self::EntropyError { context, .. } => Self::EntropyError { context, message },
            Self::DecodeError { context, .. } => Self::DecodeError { context, message },
            Self::InvalidKey { context, .. } => Self::InvalidKey { context, message },
            Self::InvalidSignature { context, .. } => Self::InvalidSignature { context, message },
            Self::InvalidParameter { context, .. } => Self::InvalidParameter { context, message },
            Self::Other { context, .. } => Self::Other { context, message },
            // Variants without a message slot are returned unchanged
            other @ (Self::SigningExhausted { .. } | Self::InvalidLength { .. }) => other,
        }
    }

    /// True for entropy failures
    pub fn is_entropy(&self) -> bool {
        matches!(self, Self::EntropyError { .. })
    }

    /// True for malformed encodings
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::DecodeError { .. })
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EntropyError { context, message } => {
                write!(f, "Entropy source failure: {}: {}", context, message)
            }
            Self::DecodeError { context, message } => {
                write!(f, "Decode error: {}: {}", context, message)
            }
            Self::SigningExhausted { context, attempts } => {
                write!(
                    f,
                    "{}: signing exhausted after {} rejected attempts",
                    context, attempts
                )
            }
            Self::InvalidKey { context, message } => {
                write!(f, "Invalid key: {}: {}", context, message)
            }
            Self::InvalidSignature { context, message } => {
                write!(f, "Invalid signature: {}: {}", context, message)
            }
            Self::InvalidLength {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: invalid length (expected {}, got {})",
                    context, expected, actual
                )
            }
            Self::InvalidParameter { context, message } => {
                write!(f, "{}: {}", context, message)
            }
            Self::Other { context, message } => {
                write!(f, "{}: {}", context, message)
            }
        }
    }
}

impl std::error::Error for Error {}
