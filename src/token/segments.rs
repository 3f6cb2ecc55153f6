use crate::error::{Error, Result};

/// Segment delimiter of the compact serialization
pub const DELIMITER: char = '.';

/// The raw, still-encoded parts of a compact token
///
/// Borrowed from the token string so the signing input can be rebuilt from
/// exactly the bytes that were received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    /// Absent only for two-segment tokens read without verification
    pub signature: Option<&'a str>,
}

impl<'a> Segments<'a> {
    /// The bytes covered by the signature (`header.payload`)
    pub fn signing_input(&self) -> String {
        signing_input(self.header, self.payload)
    }
}

/// Join the three encoded segments into a token
pub fn assemble(header: &str, payload: &str, signature: &str) -> String {
    let mut token = String::with_capacity(header.len() + payload.len() + signature.len() + 2);
    token.push_str(header);
    token.push(DELIMITER);
    token.push_str(payload);
    token.push(DELIMITER);
    token.push_str(signature);
    token
}

/// Build the signing input from the encoded header and payload segments
pub fn signing_input(header: &str, payload: &str) -> String {
    format!("{header}{DELIMITER}{payload}")
}

/// Split a token into its segments
///
/// With `verify` the token must have exactly three segments. Without it a
/// trailing signature segment is optional, so two or three are accepted.
pub fn split(token: &str, verify: bool) -> Result<Segments<'_>> {
    let parts: Vec<&str> = token.split(DELIMITER).collect();

    match (parts.as_slice(), verify) {
        (&[header, payload, signature], _) => Ok(Segments {
            header,
            payload,
            signature: Some(signature),
        }),
        (&[header, payload], false) => Ok(Segments {
            header,
            payload,
            signature: None,
        }),
        _ => Err(Error::SegmentCount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble() {
        assert_eq!(assemble("a", "b", "c"), "a.b.c");
        assert_eq!(assemble("a", "b", ""), "a.b.");
    }

    #[test]
    fn test_signing_input() {
        assert_eq!(signing_input("aGVhZGVy", "cGF5bG9hZA"), "aGVhZGVy.cGF5bG9hZA");
    }

    #[test]
    fn test_split_three_segments() {
        for verify in [true, false] {
            let segments = split("a.b.c", verify).unwrap();
            assert_eq!(segments.header, "a");
            assert_eq!(segments.payload, "b");
            assert_eq!(segments.signature, Some("c"));
            assert_eq!(segments.signing_input(), "a.b");
        }
    }

    #[test]
    fn test_split_empty_signature() {
        let segments = split("a.b.", true).unwrap();
        assert_eq!(segments.signature, Some(""));
    }

    #[test]
    fn test_split_two_segments_requires_skip() {
        assert_eq!(split("a.b", true), Err(Error::SegmentCount));

        let segments = split("a.b", false).unwrap();
        assert_eq!(segments.header, "a");
        assert_eq!(segments.payload, "b");
        assert_eq!(segments.signature, None);
    }

    #[test]
    fn test_split_wrong_counts() {
        for verify in [true, false] {
            assert_eq!(split("", verify), Err(Error::SegmentCount));
            assert_eq!(split("abc", verify), Err(Error::SegmentCount));
            assert_eq!(split("a.b.c.d", verify), Err(Error::SegmentCount));
            assert_eq!(split("a.b.c.d.e", verify), Err(Error::SegmentCount));
        }
    }
}
