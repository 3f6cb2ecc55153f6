//! # jwstiny - Minimal JSON Web Signature (JWS) with HMAC
//!
//! **jwstiny** produces and consumes JWS Compact Serialization tokens signed
//! with HMAC-SHA2: a header and an arbitrary serde payload, each Base64URL
//! encoded, joined with `.` and authenticated by a keyed hash.
//!
//! ## Quick Start
//!
//! ```ignore
//! use jwstiny::*;
//! use serde_json::{json, Value};
//!
//! let token = Encoder::with_secret("s3cr3t").encode(&json!({"sub": "alice"}))?;
//!
//! let (claims, header): (Value, Header) = Decoder::with_secret("s3cr3t")
//!     .expect_algorithm(Algorithm::HS256)
//!     .decode(token.as_str())?;
//!
//! assert_eq!(claims, json!({"sub": "alice"}));
//! assert_eq!(header, json!({"typ": "JWS", "alg": "HS256"}));
//! ```
//!
//! The free functions [`encode`] and [`decode`] take every input explicitly;
//! [`Encoder`] and [`Decoder`] hold a key and options for reuse.
//!
//! ## Token Layout
//!
//! ```text
//! base64url(header) . base64url(payload) . base64url(HMAC(header.payload))
//! ```
//!
//! Headers are JSON objects that always carry `typ` (`"JWS"` unless the caller
//! overrides it) and `alg`. Unsigned tokens use `alg: none` and an empty
//! signature segment.
//!
//! ## Algorithm Support
//!
//! - **HMAC**: HS256, HS384, HS512
//! - **none**: unsigned tokens
//!
//! Anything else in a token's `alg` field is rejected with
//! [`Error::AlgorithmNotSupported`].
//!
//! ## Security
//!
//! ### Algorithm Confusion Prevention
//!
//! Pin the algorithm with [`Decoder::expect_algorithm`] (or
//! [`DecodeOptions::expect_algorithm`]). A token declaring any other algorithm,
//! including `none`, is rejected with [`Error::IncorrectAlgorithm`] before any
//! signature work happens. On encode the `alg` header always reflects the
//! signing algorithm; a caller-supplied `alg` field is ignored.
//!
//! ### Timing Attack Protection
//!
//! Signatures are compared with [`secure_compare`], which checks the whole
//! length in constant time via the [`constant_time_eq`](https://crates.io/crates/constant_time_eq)
//! crate.
//!
//! ### Opaque Verification Failures
//!
//! Wrong signatures, missing keys and malformed signature segments all
//! surface as [`Error::SignatureInvalid`].
//!
//! ## Logging
//!
//! Events are emitted through [`tracing`](https://crates.io/crates/tracing).
//! Key material and payload contents are never logged.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515): JSON Web Signature (JWS)
//! - [RFC 4648](https://datatracker.ietf.org/doc/html/rfc4648): Base64URL encoding
//! - [RFC 2104](https://datatracker.ietf.org/doc/html/rfc2104): HMAC

// Core modules
pub mod error;
pub mod limits;
pub mod utils;

// Algorithms and keys
pub mod algorithm;
pub mod keys;

// Token structure
pub mod token;

// Configuration
pub mod config;

// Encode / verify / decode
mod decoder;
mod encoder;
pub mod verifier;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use decoder::{decode, Decoder};
pub use encoder::{encode, Encoder};

pub use algorithm::{sign, Algorithm};
pub use config::{DecodeOptions, EncodeOptions};
pub use error::{Error, ErrorKind, Result};
pub use keys::{Key, KeyLookup};
pub use token::Header;
pub use verifier::secure_compare;
