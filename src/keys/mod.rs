//! Secret keys and key lookup
//!
//! [`Key`] owns the secret bytes for a single encode or decode call and wipes
//! them when dropped. [`KeyLookup`] lets a verifier pick the key from the
//! decoded header (for example by `kid`) instead of passing one up front.

use crate::token::Header;
use zeroize::Zeroizing;

/// A symmetric secret used for HMAC signing and verification
#[derive(Clone)]
pub struct Key {
    secret: Zeroizing<Vec<u8>>,
}

impl Key {
    /// Create a key from secret bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
        }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }

    pub fn len(&self) -> usize {
        self.secret.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }
}

// Never print the secret
impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for Key {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for Key {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret)
    }
}

impl<const N: usize> From<&[u8; N]> for Key {
    fn from(secret: &[u8; N]) -> Self {
        Self::new(secret.as_slice())
    }
}

impl From<String> for Key {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for Key {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes())
    }
}

/// Resolves the verification key from a decoded header
///
/// The lookup runs after the header has been decoded and before the signature
/// is recomputed. Its result replaces any key passed to the decoder directly;
/// returning `None` leaves the token without a key, so HMAC verification fails.
///
/// Closures of the shape `Fn(&Header) -> Option<Key>` implement this trait.
///
/// # Example
///
/// ```ignore
/// let lookup = |header: &Header| match header.key_id() {
///     Some("2024-01") => Some(Key::from("old-secret")),
///     Some("2024-06") => Some(Key::from("new-secret")),
///     _ => None,
/// };
/// ```
pub trait KeyLookup: Send + Sync {
    fn lookup(&self, header: &Header) -> Option<Key>;
}

impl<F> KeyLookup for F
where
    F: Fn(&Header) -> Option<Key> + Send + Sync,
{
    fn lookup(&self, header: &Header) -> Option<Key> {
        self(header)
    }
}
