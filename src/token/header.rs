use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token type written into every header this crate produces
pub const TOKEN_TYPE: &str = "JWS";

/// JWS header
///
/// An insertion-ordered JSON object. Headers built by the encoder always start
/// with `typ` and `alg`; any other fields are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Header {
    fields: Map<String, Value>,
}

impl Header {
    /// Build the header for a new token
    ///
    /// Defaults come first, then the caller's fields on top. `typ` may be
    /// overridden; `alg` always reflects the algorithm actually used to sign.
    pub(crate) fn build(algorithm: Algorithm, extra: &Map<String, Value>) -> Self {
        let mut fields = Map::new();
        fields.insert("typ".to_string(), Value::from(TOKEN_TYPE));
        fields.insert("alg".to_string(), Value::from(algorithm.as_str()));

        for (name, value) in extra {
            if name == "alg" {
                if value.as_str() != Some(algorithm.as_str()) {
                    tracing::warn!(
                        algorithm = algorithm.as_str(),
                        "ignoring caller-supplied alg header field"
                    );
                }
                continue;
            }
            fields.insert(name.clone(), value.clone());
        }

        Self { fields }
    }

    /// Get the `alg` field if it is a string
    pub fn algorithm(&self) -> Option<&str> {
        self.get_str("alg")
    }

    /// Parse the `alg` field into a supported [`Algorithm`]
    ///
    /// A missing, non-string or unknown `alg` is [`Error::AlgorithmNotSupported`].
    pub fn parse_algorithm(&self) -> Result<Algorithm> {
        self.algorithm()
            .and_then(|alg| alg.parse().ok())
            .ok_or(Error::AlgorithmNotSupported)
    }

    /// Get the `typ` field if it is a string
    pub fn token_type(&self) -> Option<&str> {
        self.get_str("typ")
    }

    /// Get the `kid` field if it is a string
    pub fn key_id(&self) -> Option<&str> {
        self.get_str("kid")
    }

    /// Get any header field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Iterate over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for Header {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl TryFrom<Value> for Header {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(Error::InvalidEncoding(format!(
                "header is not a JSON object: {other}"
            ))),
        }
    }
}

impl From<Header> for Value {
    fn from(header: Header) -> Self {
        Value::Object(header.fields)
    }
}

impl PartialEq<Value> for Header {
    fn eq(&self, other: &Value) -> bool {
        other.as_object() == Some(&self.fields)
    }
}
