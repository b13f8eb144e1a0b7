use crate::interface_adapters::protocol::{PatchFrame, decode_frame};
use crate::use_cases::StateStore;

use futures_util::StreamExt;
use std::fmt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{
    self, Message,
    client::IntoClientRequest,
    http::{HeaderValue, header::COOKIE},
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum ConnectionError {
    // Categorizes push channel failures; none of them are recovered locally.
    Handshake(tungstenite::Error),
    InvalidCookie,
    Socket(tungstenite::Error),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::Handshake(err) => write!(f, "push channel handshake failed: {err}"),
            ConnectionError::InvalidCookie => {
                f.write_str("session cookie is not a valid header value")
            }
            ConnectionError::Socket(err) => write!(f, "push channel socket error: {err}"),
        }
    }
}

impl std::error::Error for ConnectionError {}

/// The one persistent push connection of a session.
///
/// Opened once at startup and never closed by the client; it lives until the process
/// exits or the server drops it.
pub struct Connection {
    url: String,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl Connection {
    pub async fn open(url: &str, session_cookie: Option<&str>) -> Result<Self, ConnectionError> {
        let mut request = url
            .into_client_request()
            .map_err(ConnectionError::Handshake)?;
        if let Some(cookie) = session_cookie {
            let value = HeaderValue::from_str(cookie).map_err(|_| ConnectionError::InvalidCookie)?;
            request.headers_mut().insert(COOKIE, value);
        }

        let (stream, response) = connect_async(request)
            .await
            .map_err(ConnectionError::Handshake)?;
        info!(url, status = %response.status(), "push channel open");

        Ok(Self {
            url: url.to_string(),
            stream,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Per-connection counters, logged when the channel ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReceiverStats {
    pub frames: u64,
    pub bytes: u64,
    pub malformed: u64,
    pub applied_slots: u64,
    pub rejected_slots: u64,
}

/// Result of forwarding one frame into the store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ForwardReport {
    pub applied: u64,
    pub rejected: u64,
}

/// Reads frames off the push connection and forwards their slots to the store.
pub struct PatchReceiver {
    connection: Connection,
    stats: ReceiverStats,
}

impl PatchReceiver {
    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            stats: ReceiverStats::default(),
        }
    }

    pub fn stats(&self) -> ReceiverStats {
        self.stats
    }

    /// Waits for the next well-formed frame. `Ok(None)` means the server closed the channel.
    ///
    /// Malformed and binary frames are dropped here with a diagnostic. Cancel-safe: the only
    /// await point is the socket read.
    pub async fn next_frame(&mut self) -> Result<Option<PatchFrame>, ConnectionError> {
        loop {
            let Some(incoming) = self.connection.stream.next().await else {
                return Ok(None);
            };

            match incoming.map_err(ConnectionError::Socket)? {
                Message::Text(text) => {
                    self.stats.frames += 1;
                    self.stats.bytes += text.len() as u64;
                    match decode_frame(&text) {
                        Ok(frame) => return Ok(Some(frame)),
                        Err(err) => {
                            self.stats.malformed += 1;
                            warn!(bytes = text.len(), error = %err, "dropping malformed push frame");
                        }
                    }
                }
                Message::Binary(payload) => {
                    self.stats.malformed += 1;
                    warn!(bytes = payload.len(), "dropping binary push frame");
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
                Message::Close(frame) => {
                    debug!(?frame, "push channel close frame");
                    return Ok(None);
                }
            }
        }
    }

    pub fn forward(&mut self, frame: PatchFrame, store: &mut StateStore) -> ForwardReport {
        let report = forward_frame(frame, store);
        self.stats.applied_slots += report.applied;
        self.stats.rejected_slots += report.rejected;
        report
    }

    pub fn log_stats(&self) {
        let ReceiverStats {
            frames,
            bytes,
            malformed,
            applied_slots,
            rejected_slots,
        } = self.stats;
        debug!(
            url = self.connection.url(),
            frames, bytes, malformed, applied_slots, rejected_slots, "push channel stats"
        );
    }
}

/// Forwards every key of a frame as a whole-slot replace, in frame order.
pub fn forward_frame(frame: PatchFrame, store: &mut StateStore) -> ForwardReport {
    let mut report = ForwardReport::default();
    for (key, value) in frame {
        match store.apply_patch(&key, value) {
            Ok(()) => report.applied += 1,
            Err(err) => {
                report.rejected += 1;
                warn!(slot = %key, error = %err, "dropping push slot");
            }
        }
    }
    report
}
