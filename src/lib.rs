//! # stompwire-client
//!
//! Outbound transmission core for a STOMP-style client over a single
//! persistent, bidirectional connection.
//!
//! Three tightly coupled pieces guarantee correct, ordered, observable
//! frame transmission:
//!
//! - **Headers**: an ordered, duplicate-key-tolerant header list used
//!   to build and inspect frames.
//! - **Frame encoder**: serializes one frame per the negotiated
//!   protocol version, injecting default content-type/content-length
//!   headers unless the caller suppresses them.
//! - **Writer task**: a single task owning the transport's write half;
//!   producers submit [`WireData`] units onto a queue and each gets
//!   exactly one result back on its private channel.
//!
//! Handshake/version negotiation, inbound frame reading, and transport
//! establishment live outside this crate; the transport is any
//! `AsyncWrite` handed to [`spawn_writer_task`].
//!
//! ## Example
//!
//! ```ignore
//! use stompwire_client::{commands, spawn_writer_task_default, Frame, Headers};
//! use bytes::Bytes;
//!
//! let (handle, shutdown, task) = spawn_writer_task_default(write_half);
//!
//! let frame = Frame::new(
//!     commands::SEND,
//!     Headers::new().add("destination", "/queue/orders"),
//!     Bytes::from_static(b"hello"),
//! );
//! handle.send(frame, "1.2").await?;
//!
//! shutdown.signal();
//! task.await?;
//! ```

pub mod error;
pub mod heartbeat;
pub mod metrics;
pub mod protocol;
pub mod writer;

pub use error::{Result, StompError};
pub use heartbeat::HeartbeatTracker;
pub use metrics::WriteMetrics;
pub use protocol::{commands, Frame, Headers};
pub use writer::{
    spawn_writer_task, spawn_writer_task_default, ShutdownHandle, WireData, WriterConfig,
    WriterHandle,
};
