//! Protocol version tokens and header-token escaping.
//!
//! STOMP 1.1 introduced backslash escaping for header data; 1.0 frames
//! are written raw. The encoder consults [`legacy`] to decide whether a
//! header key needs [`encode_token`] before emission.

use crate::error::{Result, StompError};

/// Lowest negotiable protocol version (no header escaping).
pub const SPL_10: &str = "1.0";
/// Protocol version 1.1.
pub const SPL_11: &str = "1.1";
/// Protocol version 1.2.
pub const SPL_12: &str = "1.2";

/// All protocol versions this client can negotiate.
pub const SUPPORTED: [&str; 3] = [SPL_10, SPL_11, SPL_12];

/// True iff `version` is one of the supported protocol tokens.
pub fn supported(version: &str) -> bool {
    SUPPORTED.contains(&version)
}

/// Membership check returning [`StompError::UnsupportedProtocol`] for
/// unknown tokens.
pub fn check_supported(version: &str) -> Result<()> {
    if !supported(version) {
        return Err(StompError::UnsupportedProtocol(version.to_string()));
    }
    Ok(())
}

/// True iff `version` is the legacy 1.0 protocol, which has no
/// header-token escaping.
pub fn legacy(version: &str) -> bool {
    version == SPL_10
}

/// Escape a header token for the wire (protocol 1.1+).
///
/// `\` becomes `\\`, newline becomes `\n`, carriage return becomes
/// `\r`, and `:` becomes `\c`.
pub fn encode_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for ch in token.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ':' => out.push_str("\\c"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverse of [`encode_token`].
///
/// Unknown escape sequences are passed through literally.
pub fn decode_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('c') => out.push(':'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
