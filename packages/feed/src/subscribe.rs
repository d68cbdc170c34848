//! Subscription request sent once after the server hello.

use serde::{Deserialize, Serialize};

/// A subscribe request for a set of paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscribe {
    /// Context to subscribe under; `"*"` watches every vessel.
    pub context: String,

    pub subscribe: Vec<Subscription>,
}

/// One subscribed path with its delivery cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub path: String,

    /// Delivery period in milliseconds.
    pub period: u64,

    pub policy: String,
}

impl Subscription {
    fn fixed(path: &str, period: u64) -> Self {
        Self {
            path: path.to_string(),
            period,
            policy: "fixed".to_string(),
        }
    }
}

impl Subscribe {
    /// The default watch set across all vessels: position, course and speed
    /// every second, name and MMSI on a slow cadence.
    pub fn default_watch() -> Self {
        Self {
            context: "*".to_string(),
            subscribe: vec![
                Subscription::fixed("navigation.position", 1000),
                Subscription::fixed("name", 130_000),
                Subscription::fixed("mmsi", 130_000),
                Subscription::fixed("navigation.courseOverGroundTrue", 1000),
                Subscription::fixed("navigation.speedOverGround", 1000),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_watch_serializes_to_wire_shape() {
        let value = serde_json::to_value(Subscribe::default_watch()).unwrap();

        assert_eq!(value["context"], "*");
        let entries = value["subscribe"].as_array().unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0]["path"], "navigation.position");
        assert_eq!(entries[0]["period"], 1000);
        assert_eq!(entries[0]["policy"], "fixed");
        assert_eq!(entries[1]["path"], "name");
        assert_eq!(entries[1]["period"], 130_000);
    }
}
