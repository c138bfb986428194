//! WHOIS wire protocol over plain TCP.
//!
//! The protocol is one CRLF-terminated query line from the client, then the
//! server streams text back and closes the connection. There is no length
//! framing, so a response is complete only once the peer hangs up.

use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::WhoisError;
use crate::utils::normalize_server;

/// A way of performing one WHOIS round-trip.
///
/// [`TcpTransport`] is the real network implementation; the lookup
/// orchestrator is generic over this trait so it can be driven by a scripted
/// transport in tests.
pub trait Transport {
    /// Send `query` to `server` and return the full response text.
    fn query(
        &self,
        server: &str,
        query: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, WhoisError>>;
}

/// Transport that talks to real WHOIS servers over TCP.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpTransport;

impl Transport for TcpTransport {
    async fn query(
        &self,
        server: &str,
        query: &str,
        timeout: Duration,
    ) -> Result<String, WhoisError> {
        query_whois(server, query, timeout).await
    }
}

/// Perform a single WHOIS exchange with `server`.
///
/// `timeout` is one absolute deadline for connect, write and read together.
/// The socket is owned by the exchange future, so it is closed on every
/// path: success, I/O error, or the deadline dropping the future.
///
/// # Errors
///
/// DNS failure, refused connections, I/O errors and an expired deadline all
/// return [`WhoisError::QueryFailed`].
pub async fn query_whois(
    server: &str,
    query: &str,
    timeout: Duration,
) -> Result<String, WhoisError> {
    let addr = normalize_server(server);
    if addr.is_empty() {
        return Err(WhoisError::query_failed(server, "no server address"));
    }

    debug!("querying {} for {}", addr, query);

    let exchange = async {
        let mut stream = TcpStream::connect(addr.as_str())
            .await
            .map_err(|e| WhoisError::query_failed(&addr, format!("connect: {}", e)))?;

        let line = format!("{}\r\n", query);
        stream
            .write_all(line.as_bytes())
            .await
            .map_err(|e| WhoisError::query_failed(&addr, format!("write: {}", e)))?;

        let mut response = Vec::new();
        stream
            .read_to_end(&mut response)
            .await
            .map_err(|e| WhoisError::query_failed(&addr, format!("read: {}", e)))?;

        Ok::<_, WhoisError>(response)
    };

    let response = match tokio::time::timeout(timeout, exchange).await {
        Ok(result) => result?,
        Err(_) => return Err(WhoisError::query_timeout(&addr, timeout)),
    };

    debug!("{} returned {} bytes", addr, response.len());

    Ok(String::from_utf8_lossy(&response).into_owned())
}
