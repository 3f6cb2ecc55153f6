//! Size limit constants for input validation

/// Suggested maximum length for token strings from untrusted sources (64KB)
///
/// Applied by [`DecodeOptions::limit_token_length`](crate::DecodeOptions::limit_token_length).
pub const MAX_TOKEN_LENGTH: usize = 64 * 1024;
