//! Frame serialization.
//!
//! [`write_frame`] emits one frame to an async byte sink:
//!
//! ```text
//! COMMAND\n
//! key1:val1\n
//! key2:val2\n
//! \n
//! <body bytes>
//! ```
//!
//! The trailing NUL terminator and the flush are the writer task's
//! responsibility, not the encoder's. The frame is mutated in place
//! before emission: default content-type/content-length headers are
//! appended unless suppressed, header keys are escaped on protocol
//! 1.1+, and a suppressed content-length truncates the body at the
//! first NUL byte.

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::Result;

use super::frame::{
    commands, Frame, DFLT_CONTENT_TYPE, HK_CONTENT_LENGTH, HK_CONTENT_TYPE, HK_SUPPRESS_CL,
    HK_SUPPRESS_CT,
};
use super::version;

/// Serialize `frame` to `sink` under the negotiated protocol version.
///
/// Returns the number of bytes written. Any write failure aborts
/// immediately; the stream is then desynchronized and must be torn
/// down by the caller.
pub async fn write_frame<W>(sink: &mut W, frame: &mut Frame, protocol: &str) -> Result<usize>
where
    W: AsyncWrite + Unpin,
{
    // Content type: add unless the client suppresses or supplies it.
    if !frame.headers.contains(HK_SUPPRESS_CT) && !frame.headers.contains(HK_CONTENT_TYPE) {
        frame.headers.push(HK_CONTENT_TYPE, DFLT_CONTENT_TYPE);
    }

    // Content length: add unless the client suppresses or supplies it.
    let suppress_cl = frame.headers.contains(HK_SUPPRESS_CL);
    if !suppress_cl && !frame.headers.contains(HK_CONTENT_LENGTH) {
        frame
            .headers
            .push(HK_CONTENT_LENGTH, &frame.body.len().to_string());
    }

    // Header keys are escaped on 1.1+ except during the handshake.
    if !version::legacy(protocol) && frame.command != commands::CONNECT {
        for key in frame.headers.keys_mut() {
            let escaped = version::encode_token(key);
            if escaped != *key {
                *key = escaped;
            }
        }
    }

    // A suppressed content-length makes the body NUL-terminated: the
    // logical content stops at the first zero byte.
    if suppress_cl {
        if let Some(nz) = frame.body.iter().position(|&b| b == 0) {
            frame.body.truncate(nz);
        }
    }

    sink.write_all(frame.command.as_bytes()).await?;
    sink.write_u8(b'\n').await?;

    for (key, value) in frame.headers.pairs() {
        sink.write_all(key.as_bytes()).await?;
        sink.write_u8(b':').await?;
        sink.write_all(value.as_bytes()).await?;
        sink.write_u8(b'\n').await?;
    }
    sink.write_u8(b'\n').await?;

    if !frame.body.is_empty() {
        sink.write_all(&frame.body).await?;
    }

    Ok(frame.size(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Headers;
    use bytes::Bytes;
    use std::io::Cursor;

    async fn encode(frame: &mut Frame, protocol: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        write_frame(&mut buf, frame, protocol).await.unwrap();
        buf.into_inner()
    }

    #[tokio::test]
    async fn test_default_headers_added() {
        let mut frame = Frame::new(
            commands::SEND,
            Headers::new().add("destination", "/queue/a"),
            Bytes::from_static(b"hello"),
        );
        let bytes = encode(&mut frame, version::SPL_11).await;

        let expected = "SEND\n\
                        destination:/queue/a\n\
                        content-type:text/plain; charset=UTF-8\n\
                        content-length:5\n\
                        \n\
                        hello";
        assert_eq!(bytes, expected.as_bytes());
        // Defaults were appended to the frame itself
        assert!(frame.headers.contains(HK_CONTENT_TYPE));
        assert_eq!(frame.headers.value(HK_CONTENT_LENGTH), "5");
    }

    #[tokio::test]
    async fn test_returns_bytes_written() {
        let mut frame = Frame::new(
            commands::SEND,
            Headers::new().add("destination", "/queue/a"),
            Bytes::from_static(b"hello"),
        );
        let mut buf = Cursor::new(Vec::new());
        let n = write_frame(&mut buf, &mut frame, version::SPL_11)
            .await
            .unwrap();
        assert_eq!(n, buf.into_inner().len());
    }

    #[tokio::test]
    async fn test_supplied_headers_not_overridden() {
        let mut frame = Frame::new(
            commands::SEND,
            Headers::new()
                .add(HK_CONTENT_TYPE, "application/json")
                .add(HK_CONTENT_LENGTH, "2"),
            Bytes::from_static(b"{}"),
        );
        let bytes = encode(&mut frame, version::SPL_11).await;
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("content-type:application/json\n"));
        assert!(!text.contains(DFLT_CONTENT_TYPE));
        assert_eq!(text.matches("content-length").count(), 1);
    }

    #[tokio::test]
    async fn test_suppress_content_type() {
        let mut frame = Frame::new(
            commands::SEND,
            Headers::new().add(HK_SUPPRESS_CT, ""),
            Bytes::new(),
        );
        let bytes = encode(&mut frame, version::SPL_11).await;
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains("\ncontent-type:"));
        assert!(!text.contains(DFLT_CONTENT_TYPE));
        // The marker itself is an ordinary header on the wire
        assert!(text.contains("suppress-content-type:\n"));
    }

    #[tokio::test]
    async fn test_legacy_keys_not_escaped() {
        let mut frame = Frame::new(
            commands::SEND,
            Headers::new().add("odd:key", "v"),
            Bytes::new(),
        );
        let bytes = encode(&mut frame, version::SPL_10).await;
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("odd:key:v\n"));
    }

    #[tokio::test]
    async fn test_keys_escaped_on_11() {
        let mut frame = Frame::new(
            commands::SEND,
            Headers::new().add("odd:key", "v"),
            Bytes::new(),
        );
        let bytes = encode(&mut frame, version::SPL_11).await;
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("odd\\ckey:v\n"));
        // Values are written raw; only keys are escaped
        assert!(!text.contains("odd:key"));
    }

    #[tokio::test]
    async fn test_connect_keys_never_escaped() {
        let mut frame = Frame::new(
            commands::CONNECT,
            Headers::new().add("odd:key", "v"),
            Bytes::new(),
        );
        let bytes = encode(&mut frame, version::SPL_12).await;
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("odd:key:v\n"));
    }

    #[tokio::test]
    async fn test_suppressed_length_truncates_body_at_nul() {
        let mut frame = Frame::new(
            commands::SEND,
            Headers::new().add(HK_SUPPRESS_CL, ""),
            Bytes::from_static(&[0x41, 0x00, 0x42]),
        );
        let bytes = encode(&mut frame, version::SPL_11).await;
        assert!(bytes.ends_with(b"\n\x41"));
        assert_eq!(&frame.body[..], &[0x41]);
    }

    #[tokio::test]
    async fn test_suppressed_length_leading_nul_empties_body() {
        let mut frame = Frame::new(
            commands::SEND,
            Headers::new().add(HK_SUPPRESS_CL, ""),
            Bytes::from_static(&[0x00, 0x42]),
        );
        let bytes = encode(&mut frame, version::SPL_11).await;
        assert!(bytes.ends_with(b"\n\n"));
        assert!(frame.body.is_empty());
    }

    #[tokio::test]
    async fn test_unsuppressed_body_keeps_nul_bytes() {
        let mut frame = Frame::new(
            commands::SEND,
            Headers::new(),
            Bytes::from_static(&[0x41, 0x00, 0x42]),
        );
        let bytes = encode(&mut frame, version::SPL_11).await;
        assert!(bytes.ends_with(&[0x41, 0x00, 0x42]));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("content-length:3\n"));
    }

    #[tokio::test]
    async fn test_empty_body_writes_nothing_after_blank_line() {
        let mut frame = Frame::new(
            commands::SUBSCRIBE,
            Headers::new().add("destination", "/queue/a").add("id", "0"),
            Bytes::new(),
        );
        let bytes = encode(&mut frame, version::SPL_12).await;
        assert!(bytes.ends_with(b"\n\n"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("content-length:0\n"));
    }
}
