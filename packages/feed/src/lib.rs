//! # pelorus-feed
//!
//! The I/O half of pelorus: discover a Signal K server's streaming endpoint,
//! subscribe to a watch set, feed every received delta into a shared
//! [`SignalKStore`], and periodically print a per-vessel projection.
//!
//! The store is single-writer (the listener task) behind a mutex; the display
//! task takes the lock per pass, so a reader never observes a half-merged
//! node. Shutdown is a watch flag the display task flips after its final
//! pass.

pub mod discovery;
pub mod display;
pub mod error;
pub mod listener;
pub mod subscribe;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;

use pelorus_store::SignalKStore;

pub use error::{Error, Result};

/// Discover the streaming endpoint, then run the listener and the periodic
/// display concurrently until the display finishes its passes.
pub async fn run(server: &str, interval: Duration, passes: u32) -> Result<()> {
    let client = reqwest::Client::new();
    let ws_url = discovery::discover_ws_endpoint(&client, server).await?;

    let store = Arc::new(Mutex::new(SignalKStore::new()));
    let (running_tx, running_rx) = watch::channel(true);

    let (listen_result, ()) = tokio::join!(
        listener::listen(ws_url.as_str(), store.clone(), running_rx),
        display::run(store.clone(), interval, passes, running_tx),
    );
    listen_result
}
