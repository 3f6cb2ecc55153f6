//! Token decoding and verification
//!
//! Decoding runs a fixed pipeline:
//!
//! ```text
//! token string
//!     │ length limit, split into segments
//!     ▼
//! encoded segments
//!     │ Base64URL + JSON decode of header and payload
//!     ▼
//! header, payload          ── verify = false ──▶ returned as-is
//!     │ key lookup, expected-algorithm check
//!     ▼
//! resolved algorithm + key
//!     │ recompute HMAC over the received segments, constant-time compare
//!     ▼
//! (payload, header)
//! ```
//!
//! The signing input is always rebuilt from the received encoded segments,
//! never by re-encoding the decoded header and payload.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::algorithm::Algorithm;
use crate::config::DecodeOptions;
use crate::error::{Error, Result};
use crate::keys::{Key, KeyLookup};
use crate::token::{segments, Header};
use crate::utils::base64url;
use crate::verifier;

/// Decode a compact JWS, optionally verifying its signature
///
/// `key` is the HMAC secret; a key lookup configured in `options` overrides
/// it. With `verify == false` the signature segment is ignored (and may be
/// missing altogether) and no algorithm checks run.
///
/// # Errors
///
/// - `Error::MissingToken` - `token` is `None`
/// - `Error::TokenTooLarge` - token longer than `options.max_token_length`, when set
/// - `Error::SegmentCount` - wrong number of segments, or a `null` header/payload
/// - `Error::InvalidEncoding` - bad Base64URL or JSON, or a payload that does not fit `P`
/// - `Error::IncorrectAlgorithm` - `alg` differs from `options.algorithm`
/// - `Error::AlgorithmNotSupported` - `alg` outside HS256/HS384/HS512/none
/// - `Error::SignatureInvalid` - the signature does not match
///
/// # Example
///
/// ```ignore
/// let (claims, header): (serde_json::Value, Header) =
///     jwstiny::decode(token.as_str(), Some("s3cr3t".as_bytes()), true, &DecodeOptions::default())?;
/// ```
pub fn decode<'t, P>(
    token: impl Into<Option<&'t str>>,
    key: Option<&[u8]>,
    verify: bool,
    options: &DecodeOptions,
) -> Result<(P, Header)>
where
    P: DeserializeOwned,
{
    let token = token.into().ok_or(Error::MissingToken)?;

    if let Some(max) = options.max_token_length {
        if token.len() > max {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max,
            });
        }
    }

    let segments = segments::split(token, verify)?;
    let header = decode_json(segments.header);
    let payload = decode_json(segments.payload);
    let (header, payload) = match (header?, payload?) {
        (Value::Null, _) | (_, Value::Null) => return Err(Error::SegmentCount),
        (header, payload) => (Header::try_from(header)?, payload),
    };

    if verify {
        let key = resolve_key(&header, key, options.key_lookup.as_deref());
        verifier::check_expected_algorithm(&header, options.algorithm)?;
        verifier::verify_signature(
            &header,
            key.as_ref(),
            &segments.signing_input(),
            segments.signature.unwrap_or_default(),
        )?;
    } else {
        tracing::debug!("signature verification skipped");
    }

    let payload = serde_json::from_value(payload)
        .map_err(|e| Error::InvalidEncoding(format!("Failed to parse payload: {e}")))?;

    tracing::debug!(
        algorithm = header.algorithm().unwrap_or_default(),
        verified = verify,
        "decoded token"
    );
    Ok((payload, header))
}

fn decode_json(segment: &str) -> Result<Value> {
    let bytes = base64url::decode(segment)?;
    serde_json::from_slice(&bytes).map_err(|e| Error::InvalidEncoding(format!("JSON: {e}")))
}

fn resolve_key(header: &Header, key: Option<&[u8]>, lookup: Option<&dyn KeyLookup>) -> Option<Key> {
    match lookup {
        Some(lookup) => lookup.lookup(header),
        None => key.map(Key::from),
    }
}

/// Reusable token decoder
///
/// Verifies signatures by default. Configure it once and share it; it holds
/// no per-token state.
///
/// # Example
///
/// ```ignore
/// let decoder = Decoder::with_secret("s3cr3t").expect_algorithm(Algorithm::HS256);
/// let (claims, header) = decoder.decode::<serde_json::Value>(token.as_str())?;
/// ```
#[derive(Debug, Clone)]
pub struct Decoder {
    key: Option<Key>,
    verify: bool,
    options: DecodeOptions,
}

impl Decoder {
    /// Decoder verifying with the given secret
    pub fn with_secret(secret: impl Into<Key>) -> Self {
        Self {
            key: Some(secret.into()),
            ..Self::default()
        }
    }

    /// Decoder verifying with keys resolved from each token's header
    pub fn with_key_lookup<L>(lookup: L) -> Self
    where
        L: KeyLookup + 'static,
    {
        Self::default().key_lookup(lookup)
    }

    /// Replace all options
    pub fn options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Skip signature verification (use with caution!)
    ///
    /// The payload and header are returned without any integrity check.
    pub fn skip_verification(mut self) -> Self {
        self.verify = false;
        self
    }

    /// Require the token to declare this algorithm
    pub fn expect_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.options = self.options.expect_algorithm(algorithm);
        self
    }

    /// Resolve the verification key from each token's header
    pub fn key_lookup<L>(mut self, lookup: L) -> Self
    where
        L: KeyLookup + 'static,
    {
        self.options = self.options.key_lookup(lookup);
        self
    }

    /// Decode a token
    pub fn decode<'t, P: DeserializeOwned>(
        &self,
        token: impl Into<Option<&'t str>>,
    ) -> Result<(P, Header)> {
        decode(
            token,
            self.key.as_ref().map(Key::as_bytes),
            self.verify,
            &self.options,
        )
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            key: None,
            verify: true,
            options: DecodeOptions::default(),
        }
    }
}
