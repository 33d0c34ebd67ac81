//! Per-Connection Request Loop
//!
//! Each accepted client gets its own task running [`ConnectionHandler`],
//! which owns the socket for the life of the session. The loop is strictly
//! half-duplex: read one request line, execute it, write the full reply,
//! then read the next line. A single TCP read may carry several lines (or a
//! fragment of one), so incoming bytes accumulate in a `BytesMut` buffer and
//! the framer drains complete lines from it.
//!
//! The session ends on client EOF, an I/O failure, or an unframeable line
//! (oversized or non-UTF-8). Protocol-level mistakes — bad keywords, bad
//! values, short lines — never end the session; they are answered as data.

use crate::commands::CommandHandler;
use crate::protocol::{LineParser, ParseError, Reply};
use bytes::{Buf, BytesMut};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;
use tracing::{debug, error, info, trace, warn};

/// Maximum size for the read buffer (64 KB)
const MAX_BUFFER_SIZE: usize = 64 * 1024;

/// Initial buffer capacity
const INITIAL_BUFFER_SIZE: usize = 4096;

/// Counters shared by every connection task.
#[derive(Debug, Default)]
pub struct ConnectionStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Currently active connections
    pub active_connections: AtomicU64,
    /// Total request lines processed
    pub commands_processed: AtomicU64,
    /// Total bytes read
    pub bytes_read: AtomicU64,
    /// Total bytes written
    pub bytes_written: AtomicU64,
}

impl ConnectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn command_processed(&self) {
        self.commands_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_read(&self, count: usize) {
        self.bytes_read.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written
            .fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Errors that end a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// I/O error (network issue)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The line framer gave up on the stream
    #[error("framing error: {0}")]
    Parse(#[from] ParseError),

    /// Client closed the stream between requests
    #[error("client disconnected")]
    ClientDisconnected,

    /// Stream ended in the middle of a request line
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// Read buffer grew past its cap without yielding a line
    #[error("read buffer limit exceeded")]
    BufferFull,
}

/// Owns one client session: socket, read buffer, framer, and a handle to
/// the shared command handler.
pub struct ConnectionHandler {
    stream: BufWriter<TcpStream>,
    addr: SocketAddr,
    buffer: BytesMut,
    commands: CommandHandler,
    parser: LineParser,
    stats: Arc<ConnectionStats>,
}

impl ConnectionHandler {
    /// Sets up the session state for a freshly accepted socket.
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        commands: CommandHandler,
        stats: Arc<ConnectionStats>,
    ) -> Self {
        stats.connection_opened();

        Self {
            stream: BufWriter::new(stream),
            addr,
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_SIZE),
            commands,
            parser: LineParser::new(),
            stats,
        }
    }

    /// Drives the session to completion, logging how it ended.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        info!(client = %self.addr, "Client connected");

        let result = self.serve().await;

        match &result {
            Ok(()) => info!(client = %self.addr, "Client disconnected"),
            Err(ConnectionError::ClientDisconnected) => {
                info!(client = %self.addr, "Client disconnected")
            }
            Err(ConnectionError::Io(e)) if e.kind() == std::io::ErrorKind::ConnectionReset => {
                debug!(client = %self.addr, "Connection reset by client")
            }
            Err(e) => warn!(client = %self.addr, error = %e, "Connection error"),
        }

        self.stats.connection_closed();
        result
    }

    /// The read-execute-reply loop.
    async fn serve(&mut self) -> Result<(), ConnectionError> {
        loop {
            // Drain every complete line already buffered; one reply per
            // line, written before the next line is taken.
            while let Some((line, consumed)) = self.parser.parse(&self.buffer)? {
                self.buffer.advance(consumed);
                trace!(client = %self.addr, line = %line, "Received request");

                let reply = self.commands.execute(&line);
                self.stats.command_processed();
                if reply.is_error() {
                    debug!(client = %self.addr, line = %line, reply = %reply, "Rejected request");
                }

                self.send_reply(&reply).await?;
            }

            self.fill_buffer().await?;
        }
    }

    /// Reads more bytes from the socket into the buffer.
    async fn fill_buffer(&mut self) -> Result<(), ConnectionError> {
        if self.buffer.len() >= MAX_BUFFER_SIZE {
            error!(
                client = %self.addr,
                size = self.buffer.len(),
                "Buffer size limit exceeded"
            );
            return Err(ConnectionError::BufferFull);
        }

        let n = self.stream.get_mut().read_buf(&mut self.buffer).await?;

        if n == 0 {
            // EOF: clean if no request was left half-sent.
            return if self.buffer.is_empty() {
                Err(ConnectionError::ClientDisconnected)
            } else {
                Err(ConnectionError::UnexpectedEof)
            };
        }

        self.stats.bytes_read(n);
        trace!(client = %self.addr, bytes = n, "Read data");

        Ok(())
    }

    /// Writes one reply sequence and flushes it.
    async fn send_reply(&mut self, reply: &Reply) -> Result<(), ConnectionError> {
        let bytes = reply.serialize();
        self.stream.write_all(&bytes).await?;
        self.stream.flush().await?;
        self.stats.bytes_written(bytes.len());
        trace!(client = %self.addr, bytes = bytes.len(), "Sent reply");
        Ok(())
    }
}

/// Runs a [`ConnectionHandler`] to completion, swallowing the routine ways
/// a client goes away.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    commands: CommandHandler,
    stats: Arc<ConnectionStats>,
) {
    let handler = ConnectionHandler::new(stream, addr, commands, stats);
    if let Err(e) = handler.run().await {
        match e {
            ConnectionError::ClientDisconnected => {}
            ConnectionError::Io(ref io_err)
                if io_err.kind() == std::io::ErrorKind::ConnectionReset => {}
            _ => {
                debug!(client = %addr, error = %e, "Connection ended with error");
            }
        }
    }
}
