//! Wire types for the Signal K delta message.
//!
//! A delta is the update envelope a Signal K server streams over its
//! WebSocket endpoint. Fields the store does not use (`source`, `timestamp`,
//! per-update metadata) are ignored on decode.

use serde::{Deserialize, Serialize};

/// Update envelope: an optional context plus a batch of update groups.
///
/// ```json
/// {
///   "context": "vessels.urn:mrn:imo:mmsi:230099999",
///   "updates": [ { "values": [ { "path": "name", "value": "Orion" } ] } ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Delta {
    /// Default path prefix for every value in the envelope.
    /// Absent means `"self"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(default)]
    pub updates: Vec<Update>,
}

/// One update group within a delta.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Update {
    #[serde(default)]
    pub values: Vec<PathValue>,
}

/// A single path/value pair.
///
/// An empty `path` means the value attaches directly at the context node.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathValue {
    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub value: serde_json::Value,
}
