//! Dedicated writer task serializing all outbound frames.
//!
//! All producers (handshake, publish, subscribe, heartbeat emitters)
//! submit frames through a [`WriterHandle`]; a single task owns the
//! transport and writes them one at a time, so frame boundaries never
//! interleave on the wire.
//!
//! # Architecture
//!
//! ```text
//! Producer 1 ─┐
//! Producer 2 ─┼─► mpsc::Sender<WireData> ─► Writer Task ─► Transport
//! Producer N ─┘         (FIFO queue)            │
//!                                               └─► oneshot result per unit
//! ```
//!
//! Every submitted unit gets exactly one result on its private oneshot
//! channel: `Ok(())` after the frame (or heartbeat) was fully written
//! and flushed, or the first write/flush error. A failure is local to
//! its unit; the task keeps serving the queue.

use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::{Result, StompError};
use crate::heartbeat::HeartbeatTracker;
use crate::metrics::WriteMetrics;
use crate::protocol::{write_frame, Frame};

/// Default capacity of the outbound frame queue.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// A frame queued for transmission, paired with its single-use result
/// channel.
///
/// The producer owns the unit until it is pushed onto the queue; from
/// then on the writer task has exclusive write access to the frame
/// (the encoder mutates headers and body in place).
#[derive(Debug)]
pub struct WireData {
    /// Frame to serialize.
    pub frame: Frame,
    /// Negotiated protocol version token, supplied per write by the
    /// connection layer.
    pub protocol: String,
    /// Result slot; receives exactly one value.
    pub result: oneshot::Sender<Result<()>>,
}

/// Configuration for the writer task.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Capacity of the outbound frame queue. Producers block (with
    /// backpressure) when it is full.
    pub channel_capacity: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Handle for submitting frames to the writer task.
///
/// Cheaply cloneable; every producer task holds one.
#[derive(Clone)]
pub struct WriterHandle {
    tx: mpsc::Sender<WireData>,
    heartbeat: Arc<HeartbeatTracker>,
    metrics: Arc<WriteMetrics>,
}

impl WriterHandle {
    /// Queue `frame` for transmission and return the receiver for its
    /// result without waiting for the write to happen.
    ///
    /// Callers that enforce their own timeout may drop the receiver;
    /// the writer task tolerates an abandoned result slot.
    pub async fn submit(
        &self,
        frame: Frame,
        protocol: &str,
    ) -> Result<oneshot::Receiver<Result<()>>> {
        let (result_tx, result_rx) = oneshot::channel();
        let unit = WireData {
            frame,
            protocol: protocol.to_string(),
            result: result_tx,
        };
        self.tx
            .send(unit)
            .await
            .map_err(|_| StompError::ConnectionClosed)?;
        Ok(result_rx)
    }

    /// Queue `frame` and wait until it has been written and flushed.
    ///
    /// Returns the write error if any step of serializing this frame
    /// failed. Errors on other producers' frames are never observed
    /// here.
    pub async fn send(&self, frame: Frame, protocol: &str) -> Result<()> {
        let result_rx = self.submit(frame, protocol).await?;
        match result_rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(StompError::ConnectionClosed),
        }
    }

    /// Queue a bare heartbeat (a lone newline on the wire) and wait for
    /// it to be written. Heartbeats bypass the frame encoder, so the
    /// protocol version does not apply.
    pub async fn send_heartbeat(&self) -> Result<()> {
        self.send(Frame::heartbeat(), crate::protocol::version::SPL_10)
            .await
    }

    /// Last-send tracker shared with the heartbeat monitor.
    pub fn heartbeat_tracker(&self) -> &Arc<HeartbeatTracker> {
        &self.heartbeat
    }

    /// Outbound traffic counters.
    pub fn metrics(&self) -> &Arc<WriteMetrics> {
        &self.metrics
    }
}

/// One-shot shutdown signal for the writer task.
///
/// The task exits after finishing the unit it is currently writing.
/// Producers must not submit after signaling; units still queued at
/// that point may never be written and their result slots are dropped,
/// which surfaces as [`StompError::ConnectionClosed`] to waiting
/// senders.
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: oneshot::Sender<()>,
}

impl ShutdownHandle {
    /// Signal the writer task to stop. Dropping the handle has the
    /// same effect.
    pub fn signal(self) {
        let _ = self.tx.send(());
    }
}

/// Spawn the writer task owning `transport`.
///
/// Returns the producer handle, the shutdown signal, and the task's
/// join handle. Pass a buffered writer if the transport benefits from
/// it; the task flushes after every unit.
pub fn spawn_writer_task<W>(
    transport: W,
    config: WriterConfig,
) -> (WriterHandle, ShutdownHandle, JoinHandle<()>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(config.channel_capacity);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let heartbeat = Arc::new(HeartbeatTracker::new());
    let metrics = Arc::new(WriteMetrics::new());

    let handle = WriterHandle {
        tx,
        heartbeat: heartbeat.clone(),
        metrics: metrics.clone(),
    };

    let task = tokio::spawn(writer_loop(rx, shutdown_rx, transport, heartbeat, metrics));

    (handle, ShutdownHandle { tx: shutdown_tx }, task)
}

/// Spawn the writer task with default configuration.
pub fn spawn_writer_task_default<W>(transport: W) -> (WriterHandle, ShutdownHandle, JoinHandle<()>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    spawn_writer_task(transport, WriterConfig::default())
}

/// Main writer loop: pulls units off the queue and writes them to the
/// transport until the queue closes or shutdown is signaled.
///
/// The two wait sources have no priority between them; when both are
/// ready, either may win.
async fn writer_loop<W>(
    mut rx: mpsc::Receiver<WireData>,
    mut shutdown_rx: oneshot::Receiver<()>,
    mut transport: W,
    heartbeat: Arc<HeartbeatTracker>,
    metrics: Arc<WriteMetrics>,
) where
    W: AsyncWrite + Unpin,
{
    loop {
        tokio::select! {
            unit = rx.recv() => match unit {
                Some(unit) => {
                    wire_write(&mut transport, unit, &heartbeat, &metrics).await;
                }
                // All producer handles dropped
                None => break,
            },
            _ = &mut shutdown_rx => break,
        }
    }
    tracing::info!("writer task shut down");
}

/// Write one unit and deliver its result.
///
/// Exactly one value goes out on the unit's result channel, on every
/// path. An abandoned receiver is ignored.
async fn wire_write<W>(
    transport: &mut W,
    unit: WireData,
    heartbeat: &HeartbeatTracker,
    metrics: &WriteMetrics,
) where
    W: AsyncWrite + Unpin,
{
    let WireData {
        mut frame,
        protocol,
        result,
    } = unit;

    match write_unit(transport, &mut frame, &protocol).await {
        Ok(bytes) => {
            heartbeat.record_send();
            metrics.record_frame(bytes as u64);
            tracing::debug!(
                command = %frame.command.escape_debug(),
                bytes,
                "wire write"
            );
            let _ = result.send(Ok(()));
        }
        Err(e) => {
            tracing::debug!(
                command = %frame.command.escape_debug(),
                error = %e,
                "wire write failed"
            );
            let _ = result.send(Err(e));
        }
    }
}

/// Serialize one unit to the transport.
///
/// Heartbeats are a single newline plus flush. Anything else goes
/// through the frame encoder, is flushed, and is terminated with a
/// NUL byte (not counted in the returned size) plus a final flush.
async fn write_unit<W>(transport: &mut W, frame: &mut Frame, protocol: &str) -> Result<usize>
where
    W: AsyncWrite + Unpin,
{
    if frame.is_heartbeat() {
        transport.write_u8(b'\n').await?;
        transport.flush().await?;
        return Ok(1);
    }

    let bytes = write_frame(transport, frame, protocol).await?;
    transport.flush().await?;
    transport.write_u8(0x00).await?;
    transport.flush().await?;
    Ok(bytes)
}
