//! Periodic projection of the store to terminal rows.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::watch;
use tracing::debug;

use pelorus_store::{path, Path, PathTree, SignalKStore};

/// One vessel's projection: identity plus last known navigation state.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselRow {
    pub id: String,
    pub name: String,
    pub mmsi: String,
    pub latitude: f64,
    pub longitude: f64,
    pub course: f64,
    pub speed: f64,
}

impl VesselRow {
    /// Build the row for one vessel subtree.
    ///
    /// `name` and `mmsi` are read from the child nodes of the same name,
    /// falling back to keys of an object stored at the vessel node itself
    /// (which is where `path: ""` deltas land). Position falls back to the
    /// `(0.0, 0.0)` sentinel when either coordinate is absent or non-numeric;
    /// course and speed default to `0.0`.
    pub fn project(id: &str, vessel: &PathTree<Value>) -> Self {
        let position = vessel.get(&path!("navigation.position"));
        let (latitude, longitude) = match (
            position.and_then(|p| p.get("latitude")).and_then(Value::as_f64),
            position.and_then(|p| p.get("longitude")).and_then(Value::as_f64),
        ) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => (0.0, 0.0),
        };

        Self {
            id: id.to_string(),
            name: text_field(vessel, "name"),
            mmsi: text_field(vessel, "mmsi"),
            latitude,
            longitude,
            course: float_field(vessel, "navigation.courseOverGroundTrue"),
            speed: float_field(vessel, "navigation.speedOverGround"),
        }
    }
}

impl fmt::Display for VesselRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>60} :: {:>20} - {:>20} :: ({:8.3}, {:8.3}) -> {:4.1} :: {:3.1}",
            self.id, self.name, self.mmsi, self.latitude, self.longitude, self.course, self.speed
        )
    }
}

fn text_field(vessel: &PathTree<Value>, key: &str) -> String {
    vessel
        .get(&Path::parse(key))
        .or_else(|| vessel.value().and_then(|v| v.get(key)))
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_default()
}

fn float_field(vessel: &PathTree<Value>, dotted: &str) -> f64 {
    vessel
        .get(&Path::parse(dotted))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

/// Run `passes` display passes `interval` apart, printing one row per vessel,
/// then flip the run flag so the listener winds down too.
pub async fn run(
    store: Arc<Mutex<SignalKStore>>,
    interval: Duration,
    passes: u32,
    running: watch::Sender<bool>,
) {
    for _ in 0..passes {
        tokio::time::sleep(interval).await;
        let rows: Vec<VesselRow> = {
            let store = store.lock().unwrap();
            store
                .vessels()
                .map(|(id, vessel)| VesselRow::project(id, vessel))
                .collect()
        };
        debug!(vessels = rows.len(), "display pass");
        for row in &rows {
            println!("{}", row);
        }
    }
    let _ = running.send(false);
}
