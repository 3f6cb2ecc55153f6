//! Error types for JWS processing
//!
//! Every failure of [`encode`](crate::encode) and [`decode`](crate::decode) is a
//! variant of [`Error`]. The variants group into the coarse [`ErrorKind`]
//! taxonomy, which is what callers usually want to branch on.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a JWS
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Nil JSON Web Signature")]
    MissingToken,

    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Not enough or too many segments")]
    SegmentCount,

    /// Base64URL or JSON decoding failed; the inner message is for diagnostics only
    #[error("Invalid encoding")]
    InvalidEncoding(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    /// Signing was requested with an algorithm that cannot produce a signature
    #[error("Unsupported signing method: {0}")]
    UnsupportedAlgorithm(String),

    /// The token header names an algorithm outside the supported set
    #[error("Algorithm not supported")]
    AlgorithmNotSupported,

    #[error("Expected a different algorithm")]
    IncorrectAlgorithm { expected: String, found: String },

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    // ============================================================================
    // Usage Errors
    // ============================================================================
    #[error("Missing signing key")]
    MissingKey,

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Coarse classification of [`Error`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong segment count, bad Base64URL, bad JSON, absent or oversized token
    MalformedToken,
    /// An algorithm outside the supported set was used for signing
    UnsupportedAlgorithm,
    /// The token's algorithm differs from the one the caller expected
    AlgorithmMismatch,
    /// The recomputed signature did not match, or could not be computed
    SignatureVerificationFailed,
    /// The caller supplied inputs the encoder cannot work with
    Usage,
}

impl Error {
    /// The taxonomy bucket this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingToken
            | Error::TokenTooLarge { .. }
            | Error::SegmentCount
            | Error::InvalidEncoding(_) => ErrorKind::MalformedToken,
            Error::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            Error::IncorrectAlgorithm { .. } => ErrorKind::AlgorithmMismatch,
            Error::AlgorithmNotSupported | Error::SignatureInvalid => {
                ErrorKind::SignatureVerificationFailed
            }
            Error::MissingKey | Error::Serialization(_) => ErrorKind::Usage,
        }
    }

    /// True for every error the decode path can produce
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MalformedToken
                | ErrorKind::AlgorithmMismatch
                | ErrorKind::SignatureVerificationFailed
        )
    }

    /// True when the signature check itself rejected the token
    pub fn is_verification_error(&self) -> bool {
        self.kind() == ErrorKind::SignatureVerificationFailed
    }
}

/// Result type alias for jwstiny operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Error::MissingToken.to_string(), "Nil JSON Web Signature");
        assert_eq!(
            Error::SegmentCount.to_string(),
            "Not enough or too many segments"
        );
        assert_eq!(
            Error::InvalidEncoding("bad byte".into()).to_string(),
            "Invalid encoding"
        );
        assert_eq!(
            Error::SignatureInvalid.to_string(),
            "Signature verification failed"
        );
        assert_eq!(
            Error::AlgorithmNotSupported.to_string(),
            "Algorithm not supported"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Error::SegmentCount.kind(), ErrorKind::MalformedToken);
        assert_eq!(
            Error::UnsupportedAlgorithm("none".into()).kind(),
            ErrorKind::UnsupportedAlgorithm
        );
        assert_eq!(
            Error::IncorrectAlgorithm {
                expected: "HS384".into(),
                found: "HS256".into()
            }
            .kind(),
            ErrorKind::AlgorithmMismatch
        );
        assert!(Error::AlgorithmNotSupported.is_verification_error());
        assert!(Error::SignatureInvalid.is_decode_error());
        assert!(!Error::MissingKey.is_decode_error());
    }
}
