//! The request façade: a minimal HTTP/1.1 service over TCP.
//!
//! Thin by design: parse the request, delegate to [`BrewEngine`], render
//! the result. No decision logic lives on this side of the boundary. The
//! server speaks enough HTTP/1.1 to carry the protocol's own methods
//! (BREW, WHEN, PROPFIND) alongside GET and POST; one request per
//! connection, bounded read, then close.

mod request;
mod response;
mod router;

pub use request::{parse_additions, parse_request, MalformedAdditions, Request};
pub use response::Response;
pub use router::dispatch;

use crate::core::StatusCode;
use crate::engine::BrewEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub(crate) const PROTOCOL: &str = "HTCPCP/1.0";
pub(crate) const RFCS: &str = "RFC-2324, RFC-7168";

/// Maximum bytes read from one request.
const MAX_REQUEST_BYTES: usize = 8192;
/// How long to wait for a request before dropping the connection.
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// The HTCPCP server: one engine shared across connections.
pub struct Server {
    engine: Arc<BrewEngine>,
    addr: SocketAddr,
}

impl Server {
    /// Build a server over an engine.
    pub fn new(engine: Arc<BrewEngine>, addr: SocketAddr) -> Self {
        Self { engine, addr }
    }

    /// Accept loop. Each connection is served on its own task and closed
    /// after a single response.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        info!(addr = %self.addr, protocol = PROTOCOL, "listening");

        loop {
            let (stream, peer) = listener.accept().await?;
            let engine = Arc::clone(&self.engine);
            let _ = tokio::spawn(async move {
                if let Err(err) = handle_connection(engine, stream, peer).await {
                    debug!(%peer, error = %err, "connection error");
                }
            });
        }
    }
}

async fn handle_connection(
    engine: Arc<BrewEngine>,
    mut stream: TcpStream,
    peer: SocketAddr,
) -> std::io::Result<()> {
    let request_id = Uuid::new_v4();

    let mut buf = vec![0u8; MAX_REQUEST_BYTES];
    let n = match tokio::time::timeout(READ_TIMEOUT, stream.read(&mut buf)).await {
        Ok(read) => read?,
        Err(_) => {
            debug!(%peer, %request_id, "read timeout");
            return Ok(());
        }
    };
    if n == 0 {
        return Ok(());
    }

    let response = match parse_request(&buf[..n]) {
        Some(request) => {
            let response = dispatch(&engine, &request);
            info!(
                %request_id,
                method = %request.method,
                path = %request.path,
                status = u16::from(response.status),
                "request"
            );
            response
        }
        None => {
            warn!(%peer, %request_id, "malformed request");
            Response::error(StatusCode::BadRequest, "malformed HTTP request")
        }
    };

    stream.write_all(&response.to_bytes()).await?;
    stream.shutdown().await
}
