use crate::algorithm::Algorithm;
use crate::error::{Error, Result};

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// Compute the HMAC of `message` for the given algorithm and secret
///
/// Only the HMAC variants can sign; [`Algorithm::None`] yields
/// [`Error::UnsupportedAlgorithm`]. `message` must be the signing input
/// (`header.payload`), never the decoded payload.
pub fn sign(algorithm: Algorithm, message: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    match algorithm {
        Algorithm::HS256 => compute_mac::<Hmac<Sha256>>(message, key),
        Algorithm::HS384 => compute_mac::<Hmac<Sha384>>(message, key),
        Algorithm::HS512 => compute_mac::<Hmac<Sha512>>(message, key),
        Algorithm::None => Err(Error::UnsupportedAlgorithm(algorithm.to_string())),
    }
}

fn compute_mac<M: Mac + KeyInit>(message: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    // HMAC accepts keys of any length, so this only fails for non-HMAC MACs
    let mut mac = <M as KeyInit>::new_from_slice(key).map_err(|_| Error::SignatureInvalid)?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}
