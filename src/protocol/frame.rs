//! Frame type and well-known protocol constants.
//!
//! A frame is one protocol message unit: a command line, a header
//! block, and an opaque body. Bodies use `bytes::Bytes` for cheap
//! sharing between the producer and the writer task.
//!
//! # Example
//!
//! ```
//! use stompwire_client::protocol::{commands, Frame, Headers};
//! use bytes::Bytes;
//!
//! let frame = Frame::new(
//!     commands::SEND,
//!     Headers::new().add("destination", "/queue/a"),
//!     Bytes::from_static(b"hello"),
//! );
//! assert_eq!(frame.command, "SEND");
//! assert!(!frame.is_heartbeat());
//! ```

use bytes::Bytes;

use super::headers::Headers;

/// Client frame commands.
pub mod commands {
    /// Initial handshake command; its header keys are never escaped.
    pub const CONNECT: &str = "CONNECT";
    /// 1.1+ alias for the handshake command.
    pub const STOMP: &str = "STOMP";
    pub const SEND: &str = "SEND";
    pub const SUBSCRIBE: &str = "SUBSCRIBE";
    pub const UNSUBSCRIBE: &str = "UNSUBSCRIBE";
    pub const ACK: &str = "ACK";
    pub const NACK: &str = "NACK";
    pub const BEGIN: &str = "BEGIN";
    pub const COMMIT: &str = "COMMIT";
    pub const ABORT: &str = "ABORT";
    pub const DISCONNECT: &str = "DISCONNECT";

    /// Pseudo-command for a heartbeat: the frame is a lone newline.
    pub const HEARTBEAT: &str = "\n";
}

/// Body media type header key.
pub const HK_CONTENT_TYPE: &str = "content-type";
/// Body byte length header key.
pub const HK_CONTENT_LENGTH: &str = "content-length";
/// Marker header: presence suppresses the default content-type header.
pub const HK_SUPPRESS_CT: &str = "suppress-content-type";
/// Marker header: presence suppresses the default content-length header
/// and switches the body to NUL-terminated semantics.
pub const HK_SUPPRESS_CL: &str = "suppress-content-length";

/// Content type appended when the caller supplies none and does not
/// suppress it.
pub const DFLT_CONTENT_TYPE: &str = "text/plain; charset=UTF-8";

/// One protocol message unit: command, headers, body.
///
/// The encoder mutates frames in place immediately before
/// serialization: default headers may be appended, header keys escaped,
/// and the body truncated when content-length is suppressed. Callers
/// that submit a frame must expect those side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Command line (see [`commands`]).
    pub command: String,
    /// Ordered header list.
    pub headers: Headers,
    /// Body bytes; may be empty.
    pub body: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(command: &str, headers: Headers, body: Bytes) -> Self {
        Self {
            command: command.to_string(),
            headers,
            body,
        }
    }

    /// Create a heartbeat frame (a lone newline on the wire).
    pub fn heartbeat() -> Self {
        Self {
            command: commands::HEARTBEAT.to_string(),
            headers: Headers::new(),
            body: Bytes::new(),
        }
    }

    /// True iff this frame is a bare heartbeat.
    pub fn is_heartbeat(&self) -> bool {
        self.command == commands::HEARTBEAT
    }

    /// Encoded size of this frame in bytes, as currently populated.
    ///
    /// Command line, header block, the blank separator line, and the
    /// body. The trailing NUL terminator is included only when
    /// `with_terminator` is set.
    pub fn size(&self, with_terminator: bool) -> usize {
        self.command.len()
            + 1
            + self.headers.wire_size()
            + 1
            + self.body.len()
            + usize::from(with_terminator)
    }

    /// Lossy UTF-8 view of the body.
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
