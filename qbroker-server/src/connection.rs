//! Per-connection read/dispatch/write loop (spec §4.4 "thread-per-connection").
//!
//! Each accepted socket gets its own `tokio::spawn`ed task. Blocking I/O
//! is not needed — `tokio`'s async `TcpStream` plays the same role the
//! spec's blocking read loop does, one frame read, one dispatch, one
//! frame write, repeated until the peer closes or a response sets
//! `must_close` (spec §4.2: LOGOUT, FORBIDDEN, DATA_WRONG).

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use qbroker_proto::{read_frame, write_frame, ProtoError, Request, Response};
use qbroker_store::Session;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::dispatch::Dispatcher;

/// Drives one accepted connection to completion.
///
/// `idle_timeout` bounds how long the handler will wait for the next
/// frame's length prefix before closing — the per-connection stand-in
/// for the readiness-based dispatcher's idle reaping (spec §5,
/// `SPEC_FULL.md` §11 "Idle-connection reaping").
pub async fn handle_connection(
    mut stream: TcpStream,
    peer_addr: SocketAddr,
    dispatcher: Arc<Dispatcher>,
    idle_timeout: Duration,
) {
    let mut session = Session::new(peer_addr);
    debug!(%peer_addr, "connection accepted");

    loop {
        let body = match timeout(idle_timeout, read_frame(&mut stream)).await {
            Ok(Ok(body)) => body,
            Ok(Err(ProtoError::FrameTooLarge(len))) => {
                warn!(%peer_addr, len, "frame exceeds the cap, closing connection");
                break;
            }
            Ok(Err(ProtoError::Io(err))) => {
                if err.kind() == std::io::ErrorKind::UnexpectedEof {
                    debug!(%peer_addr, "peer closed connection");
                } else {
                    warn!(%peer_addr, error = %err, "read error, closing connection");
                }
                break;
            }
            Ok(Err(err)) => {
                warn!(%peer_addr, error = %err, "frame read error, closing connection");
                break;
            }
            Err(_elapsed) => {
                debug!(%peer_addr, "idle timeout, closing connection");
                break;
            }
        };

        let request = match Request::parse(&body) {
            Ok(request) => request,
            Err(err) => {
                debug!(%peer_addr, error = %err, "malformed request, responding DATA_WRONG");
                let _ = write_response(&mut stream, &Response::data_wrong()).await;
                break;
            }
        };

        let dispatched = dispatcher.dispatch(request, &mut session).await;
        if write_response(&mut stream, &dispatched.response)
            .await
            .is_err()
        {
            break;
        }
        if dispatched.must_close {
            break;
        }
    }

    debug!(%peer_addr, "connection closed");
}

async fn write_response(stream: &mut TcpStream, response: &Response) -> Result<(), ProtoError> {
    let body = response.to_bytes().map_err(ProtoError::InvalidJson)?;
    write_frame(stream, &body).await
}
