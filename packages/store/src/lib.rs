//! Merged path-addressed tree store for Signal K telemetry.
//!
//! A Signal K server streams delta messages: an envelope naming a context
//! (usually a vessel) and a batch of dotted-path/value pairs. This crate
//! keeps the merged picture of everything observed so far:
//!
//! - [`Path`]: ordered segment sequence, parsed from the dotted wire form
//! - [`PathTree`]: generic prefix tree with a value slot per node
//! - [`Delta`]: the wire envelope, accepted unchanged
//! - [`SignalKStore`]: merge semantics, delta application, vessel enumeration
//!
//! No I/O and no locking live here; the feeder crate owns both.
//!
//! # Example
//!
//! ```rust
//! use pelorus_store::{path, Delta, SignalKStore};
//!
//! let delta: Delta = serde_json::from_str(
//!     r#"{"context": "vessels.a",
//!         "updates": [{"values": [{"path": "name", "value": "Orion"}]}]}"#,
//! ).unwrap();
//!
//! let mut store = SignalKStore::new();
//! store.apply_delta(&delta);
//! assert_eq!(
//!     store.value_at(&path!("vessels.a.name")),
//!     Some(&serde_json::json!("Orion")),
//! );
//! ```

mod delta;
mod path;
mod store;
mod tree;

pub use delta::{Delta, PathValue, Update};
pub use path::Path;
pub use store::{SignalKStore, DEFAULT_CONTEXT, VESSELS};
pub use tree::PathTree;
