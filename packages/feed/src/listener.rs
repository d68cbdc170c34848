//! WebSocket listener: handshake, subscribe, then feed every delta into the
//! store.

use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::watch;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use pelorus_store::{Delta, SignalKStore};

use crate::error::{Error, Result};
use crate::subscribe::Subscribe;

/// First frame a Signal K server sends on a new stream connection.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerHello {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Connect to the streaming endpoint, subscribe, and apply every received
/// delta to the store until the connection closes or `running` goes false.
///
/// The store assumes a single writer; this loop is it. The receive itself has
/// no timeout - a stalled feed parks here until the run flag flips.
pub async fn listen(
    ws_url: &str,
    store: Arc<Mutex<SignalKStore>>,
    mut running: watch::Receiver<bool>,
) -> Result<()> {
    let (mut socket, _) = connect_async(ws_url).await?;

    let hello = match socket.next().await {
        Some(frame) => frame?,
        None => {
            return Err(Error::Protocol {
                message: "connection closed before server hello".to_string(),
            })
        }
    };
    let hello: ServerHello = serde_json::from_str(&hello.into_text()?)?;
    debug!(name = ?hello.name, version = ?hello.version, roles = ?hello.roles, "server hello");

    let subscribe = serde_json::to_string(&Subscribe::default_watch())?;
    socket.send(Message::Text(subscribe)).await?;

    while *running.borrow() {
        let frame = tokio::select! {
            frame = socket.next() => frame,
            changed = running.changed() => {
                if changed.is_err() || !*running.borrow() {
                    break;
                }
                continue;
            }
        };
        let Some(frame) = frame else { break };
        match frame? {
            Message::Text(text) => {
                debug!(%text, "got data");
                let delta: Delta = serde_json::from_str(&text)?;
                store.lock().unwrap().apply_delta(&delta);
            }
            Message::Close(_) => break,
            // Pings are answered by the protocol layer; binary frames are
            // not part of the v1 stream.
            _ => {}
        }
    }

    Ok(())
}
