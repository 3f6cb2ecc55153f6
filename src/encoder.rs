//! Token encoding
//!
//! ```ignore
//! use jwstiny::*;
//!
//! let token = Encoder::with_secret("s3cr3t")
//!     .algorithm(Algorithm::HS512)
//!     .header_field("kid", "2024-06")
//!     .encode(&serde_json::json!({"sub": "alice"}))?;
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

use crate::algorithm::{self, Algorithm};
use crate::config::EncodeOptions;
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::token::{segments, Header};
use crate::utils::base64url;

/// Encode and sign a payload as a compact JWS
///
/// `algorithm: None` produces an unsigned token (`alg: none`, empty signature
/// segment) and needs no key. Every HMAC algorithm requires `key`.
/// `header_fields` are merged on top of `typ` and `alg`; a caller-supplied
/// `alg` is ignored.
///
/// # Errors
///
/// - `Error::MissingKey` - an HMAC algorithm was requested without a key
/// - `Error::Serialization` - the payload cannot be represented as JSON
///
/// # Example
///
/// ```ignore
/// let token = jwstiny::encode(
///     &serde_json::json!({"sub": "alice"}),
///     Some("s3cr3t".as_bytes()),
///     Some(Algorithm::HS256),
///     &serde_json::Map::new(),
/// )?;
/// ```
pub fn encode<P>(
    payload: &P,
    key: Option<&[u8]>,
    algorithm: Option<Algorithm>,
    header_fields: &Map<String, Value>,
) -> Result<String>
where
    P: Serialize + ?Sized,
{
    let algorithm = algorithm.unwrap_or(Algorithm::None);

    let header = Header::build(algorithm, header_fields);
    let header_segment = encode_json(&header)?;
    let payload_segment = encode_json(payload)?;

    let signature_segment = if algorithm.is_hmac() {
        let key = key.ok_or(Error::MissingKey)?;
        let signing_input = segments::signing_input(&header_segment, &payload_segment);
        base64url::encode(algorithm::sign(algorithm, signing_input.as_bytes(), key)?)
    } else {
        String::new()
    };

    let token = segments::assemble(&header_segment, &payload_segment, &signature_segment);
    tracing::debug!(
        algorithm = algorithm.as_str(),
        length = token.len(),
        "encoded token"
    );
    Ok(token)
}

fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value).map_err(|e| Error::Serialization(e.to_string()))?;
    Ok(base64url::encode(json))
}

/// Reusable token encoder
///
/// Holds the signing key and [`EncodeOptions`]; defaults to `HS256` with no
/// extra header fields.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    key: Option<Key>,
    options: EncodeOptions,
}

impl Encoder {
    /// Encoder signing with the given secret
    pub fn with_secret(secret: impl Into<Key>) -> Self {
        Self {
            key: Some(secret.into()),
            options: EncodeOptions::default(),
        }
    }

    /// Encoder producing unsigned (`alg: none`) tokens
    pub fn unsigned() -> Self {
        Self {
            key: None,
            options: EncodeOptions::default().unsigned(),
        }
    }

    /// Replace all options
    pub fn options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Sign with the given algorithm
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.options = self.options.algorithm(algorithm);
        self
    }

    /// Add a header field
    pub fn header_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options = self.options.header_field(name, value);
        self
    }

    /// Encode and sign a payload
    pub fn encode<P: Serialize + ?Sized>(&self, payload: &P) -> Result<String> {
        encode(
            payload,
            self.key.as_ref().map(Key::as_bytes),
            Some(self.options.effective_algorithm()),
            &self.options.header_fields,
        )
    }
}
