//! Signal K endpoint discovery.
//!
//! A server's discovery document lists its streaming and REST endpoints per
//! protocol version:
//!
//! ```json
//! {
//!   "endpoints": {
//!     "v1": {
//!       "version": "1.7.0",
//!       "signalk-ws": "wss://example.org/signalk/v1/stream",
//!       "signalk-http": "https://example.org/signalk/v1/api/"
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// The discovery document served at the server's `/signalk` path.
#[derive(Debug, Clone, Deserialize)]
pub struct Discovery {
    #[serde(default)]
    pub endpoints: BTreeMap<String, Endpoint>,
}

/// Endpoints for one protocol version.
#[derive(Debug, Clone, Deserialize)]
pub struct Endpoint {
    pub version: Option<String>,

    #[serde(rename = "signalk-ws")]
    pub signalk_ws: Option<String>,

    #[serde(rename = "signalk-http")]
    pub signalk_http: Option<String>,
}

/// Fetch the discovery document and extract the v1 streaming endpoint.
pub async fn discover_ws_endpoint(client: &reqwest::Client, url: &str) -> Result<Url> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Discovery {
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    let doc: Discovery = serde_json::from_str(&body)?;
    debug!(?doc, "discovery response");

    let ws = doc
        .endpoints
        .get("v1")
        .and_then(|endpoint| endpoint.signalk_ws.as_deref())
        .ok_or_else(|| Error::Protocol {
            message: "discovery document has no v1 signalk-ws endpoint".to_string(),
        })?;

    Ok(Url::parse(ws)?)
}
