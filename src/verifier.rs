//! Signature verification
//!
//! Verification recomputes the HMAC over the received signing input and
//! compares it with the received signature in constant time. Every failure,
//! including a missing key or an undecodable signature segment, surfaces as
//! [`Error::SignatureInvalid`] so callers cannot tell the causes apart. The one
//! exception is an `alg` outside the supported set, which is reported as
//! [`Error::AlgorithmNotSupported`].

use constant_time_eq::constant_time_eq;

use crate::algorithm::{self, Algorithm};
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::token::Header;
use crate::utils::base64url;

/// Compare two byte strings without leaking the position of the first mismatch
///
/// Returns `false` straight away when either input is empty or the lengths
/// differ. Equal-length inputs are compared over their full length.
pub fn secure_compare(a: &[u8], b: &[u8]) -> bool {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return false;
    }
    constant_time_eq(a, b)
}

/// Reject a token whose declared algorithm differs from the expected one
///
/// Compares the raw `alg` string so that unknown algorithms are rejected here
/// too, before any signature work.
pub(crate) fn check_expected_algorithm(header: &Header, expected: Option<Algorithm>) -> Result<()> {
    let Some(expected) = expected else {
        return Ok(());
    };

    match header.algorithm() {
        Some(found) if found == expected.as_str() => Ok(()),
        found => {
            let found = found.unwrap_or_default().to_string();
            tracing::warn!(
                expected = expected.as_str(),
                found = %found,
                "token algorithm does not match expected algorithm"
            );
            Err(Error::IncorrectAlgorithm {
                expected: expected.to_string(),
                found,
            })
        }
    }
}

/// Verify the signature segment of a token against its signing input
pub(crate) fn verify_signature(
    header: &Header,
    key: Option<&Key>,
    signing_input: &str,
    signature: &str,
) -> Result<()> {
    let algorithm = header.parse_algorithm().inspect_err(|_| {
        tracing::warn!(alg = ?header.algorithm(), "token declares an unsupported algorithm");
    })?;

    let result = match algorithm {
        Algorithm::None if signature.is_empty() => Ok(()),
        Algorithm::None => Err(Error::SignatureInvalid),
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            verify_hmac(algorithm, key, signing_input, signature)
        }
    };

    if result.is_err() {
        tracing::warn!(
            algorithm = algorithm.as_str(),
            "signature verification failed"
        );
    }
    result
}

fn verify_hmac(
    algorithm: Algorithm,
    key: Option<&Key>,
    signing_input: &str,
    signature: &str,
) -> Result<()> {
    let key = key.ok_or(Error::SignatureInvalid)?;
    // Only the canonical encoding is accepted, so a signature has one spelling
    let provided = base64url::decode_strict(signature).map_err(|_| Error::SignatureInvalid)?;
    let expected = algorithm::sign(algorithm, signing_input.as_bytes(), key.as_bytes())
        .map_err(|_| Error::SignatureInvalid)?;

    if secure_compare(&provided, &expected) {
        Ok(())
    } else {
        Err(Error::SignatureInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn header(alg: &str) -> Header {
        Header::try_from(json!({"typ": "JWS", "alg": alg})).unwrap()
    }

    fn signature_for(algorithm: Algorithm, signing_input: &str, secret: &[u8]) -> String {
        base64url::encode(algorithm::sign(algorithm, signing_input.as_bytes(), secret).unwrap())
    }

    #[test]
    fn test_secure_compare_equal() {
        assert!(secure_compare(b"abc", b"abc"));
        assert!(secure_compare(&[0u8; 64], &[0u8; 64]));
    }

    #[test]
    fn test_secure_compare_mismatch() {
        assert!(!secure_compare(b"abc", b"abd"));
        assert!(!secure_compare(b"xbc", b"abc"));
    }

    #[test]
    fn test_secure_compare_rejects_empty_and_length_mismatch() {
        assert!(!secure_compare(b"", b""));
        assert!(!secure_compare(b"", b"a"));
        assert!(!secure_compare(b"a", b""));
        assert!(!secure_compare(b"abc", b"abcd"));
    }

    #[test]
    fn test_verify_each_hmac_algorithm() {
        let secret = b"verifier-secret";
        let input = "aGVhZGVy.cGF5bG9hZA";
        let key = Key::from(secret);

        for algorithm in [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512] {
            let signature = signature_for(algorithm, input, secret);
            assert_eq!(
                verify_signature(&header(algorithm.as_str()), Some(&key), input, &signature),
                Ok(())
            );
        }
    }

    #[test]
    fn test_verify_wrong_key() {
        let input = "aGVhZGVy.cGF5bG9hZA";
        let signature = signature_for(Algorithm::HS256, input, b"right");
        let key = Key::from("wrong");

        assert_eq!(
            verify_signature(&header("HS256"), Some(&key), input, &signature),
            Err(Error::SignatureInvalid)
        );
    }

    #[test]
    fn test_verify_algorithm_swap() {
        // An HS512 signature presented under an HS256 header has the wrong length
        let input = "aGVhZGVy.cGF5bG9hZA";
        let signature = signature_for(Algorithm::HS512, input, b"secret");
        let key = Key::from("secret");

        assert_eq!(
            verify_signature(&header("HS256"), Some(&key), input, &signature),
            Err(Error::SignatureInvalid)
        );
    }

    #[test]
    fn test_verify_missing_key() {
        let input = "aGVhZGVy.cGF5bG9hZA";
        let signature = signature_for(Algorithm::HS256, input, b"secret");

        assert_eq!(
            verify_signature(&header("HS256"), None, input, &signature),
            Err(Error::SignatureInvalid)
        );
    }

    #[test]
    fn test_verify_undecodable_signature() {
        let key = Key::from("secret");
        assert_eq!(
            verify_signature(&header("HS256"), Some(&key), "a.b", "!!!"),
            Err(Error::SignatureInvalid)
        );
        assert_eq!(
            verify_signature(&header("HS256"), Some(&key), "a.b", ""),
            Err(Error::SignatureInvalid)
        );
    }

    #[test]
    fn test_verify_rejects_non_canonical_signature() {
        // HS256 signatures are 43 characters; the last one carries 4 unused bits
        let input = "aGVhZGVy.cGF5bG9hZA";
        let signature = signature_for(Algorithm::HS256, input, b"secret");
        let key = Key::from("secret");
        assert_eq!(signature.len(), 43);

        let (head, last) = signature.split_at(42);
        let last = last.as_bytes()[0];
        for bit in 0..4 {
            let flipped = char::from(last ^ (1 << bit));
            if !flipped.is_ascii_alphanumeric() {
                continue;
            }
            let forged = format!("{head}{flipped}");
            assert_eq!(
                verify_signature(&header("HS256"), Some(&key), input, &forged),
                Err(Error::SignatureInvalid),
                "accepted {forged}"
            );
        }

        for suffix in ["=", "==", "\n"] {
            let forged = format!("{signature}{suffix}");
            assert_eq!(
                verify_signature(&header("HS256"), Some(&key), input, &forged),
                Err(Error::SignatureInvalid)
            );
        }

        let standard = signature.replace('-', "+").replace('_', "/");
        if standard != signature {
            assert_eq!(
                verify_signature(&header("HS256"), Some(&key), input, &standard),
                Err(Error::SignatureInvalid)
            );
        }
    }

    #[test]
    fn test_verify_none() {
        assert_eq!(verify_signature(&header("none"), None, "a.b", ""), Ok(()));
        assert_eq!(
            verify_signature(&header("none"), None, "a.b", "c2ln"),
            Err(Error::SignatureInvalid)
        );
    }

    #[test]
    fn test_verify_unsupported_algorithm() {
        let key = Key::from("secret");
        for alg in ["RS256", "None", "hs256", ""] {
            assert_eq!(
                verify_signature(&header(alg), Some(&key), "a.b", "c2ln"),
                Err(Error::AlgorithmNotSupported)
            );
        }
    }

    #[test]
    fn test_expected_algorithm() {
        assert_eq!(check_expected_algorithm(&header("HS256"), None), Ok(()));
        assert_eq!(
            check_expected_algorithm(&header("HS256"), Some(Algorithm::HS256)),
            Ok(())
        );
        assert_eq!(
            check_expected_algorithm(&header("HS256"), Some(Algorithm::HS384)),
            Err(Error::IncorrectAlgorithm {
                expected: "HS384".to_string(),
                found: "HS256".to_string(),
            })
        );
        assert!(matches!(
            check_expected_algorithm(&header("none"), Some(Algorithm::HS256)),
            Err(Error::IncorrectAlgorithm { .. })
        ));
    }
}
