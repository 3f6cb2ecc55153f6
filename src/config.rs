//! Encoder and decoder configuration
//!
//! Both option types are plain builders: start from `default()` and chain the
//! setters you need.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::algorithm::Algorithm;
use crate::keys::KeyLookup;
use crate::limits::MAX_TOKEN_LENGTH;

/// Options for producing a token
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeOptions {
    /// `None` produces an unsigned token, the same as `Some(Algorithm::None)`
    pub algorithm: Option<Algorithm>,
    /// Extra header fields merged on top of `typ` and `alg`
    pub header_fields: Map<String, Value>,
}

impl EncodeOptions {
    /// Sign with the given algorithm
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Produce an unsigned (`alg: none`) token
    pub fn unsigned(mut self) -> Self {
        self.algorithm = None;
        self
    }

    /// Add a single header field
    ///
    /// An `alg` field is ignored when the header is built.
    pub fn header_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.header_fields.insert(name.into(), value.into());
        self
    }

    /// Add several header fields at once
    pub fn header_fields(mut self, fields: Map<String, Value>) -> Self {
        self.header_fields.extend(fields);
        self
    }

    /// The algorithm that will actually be written into the header
    pub fn effective_algorithm(&self) -> Algorithm {
        self.algorithm.unwrap_or(Algorithm::None)
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            algorithm: Some(Algorithm::default()),
            header_fields: Map::new(),
        }
    }
}

/// Options for reading a token
///
/// The `algorithm` restriction is recommended whenever the caller knows which
/// algorithm its tokens use: it rejects tokens declaring anything else before
/// any signature work happens.
#[derive(Clone, Default)]
pub struct DecodeOptions {
    /// Algorithm the token must declare in its `alg` header field
    pub algorithm: Option<Algorithm>,
    /// Longest token string accepted; unlimited when `None`
    pub max_token_length: Option<usize>,
    /// Resolves the key from the decoded header; overrides any direct key
    pub key_lookup: Option<Arc<dyn KeyLookup>>,
}

impl DecodeOptions {
    /// Require the token to declare this algorithm
    pub fn expect_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Reject token strings longer than `max` bytes before parsing them
    pub fn max_token_length(mut self, max: usize) -> Self {
        self.max_token_length = Some(max);
        self
    }

    /// Apply the [`MAX_TOKEN_LENGTH`] limit, suited to tokens from untrusted sources
    ///
    /// Off by default: the encoder has no size limit, and a decoder with one
    /// would reject large tokens the encoder produced.
    pub fn limit_token_length(self) -> Self {
        self.max_token_length(MAX_TOKEN_LENGTH)
    }

    /// Resolve the verification key from the decoded header
    ///
    /// # Example
    ///
    /// ```ignore
    /// DecodeOptions::default().key_lookup(|header: &Header| match header.key_id() {
    ///     Some("primary") => Some(Key::from("primary-secret")),
    ///     _ => None,
    /// })
    /// ```
    pub fn key_lookup<L>(mut self, lookup: L) -> Self
    where
        L: KeyLookup + 'static,
    {
        self.key_lookup = Some(Arc::new(lookup));
        self
    }
}

impl std::fmt::Debug for DecodeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeOptions")
            .field("algorithm", &self.algorithm)
            .field("max_token_length", &self.max_token_length)
            .field("key_lookup", &self.key_lookup.is_some())
            .finish()
    }
}
