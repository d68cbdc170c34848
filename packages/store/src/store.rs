//! The merged telemetry store.

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::{Delta, Path, PathTree};

/// Default context when a delta carries none.
pub const DEFAULT_CONTEXT: &str = "self";

/// Top-level partition segment under which vessels are enumerated.
pub const VESSELS: &str = "vessels";

/// In-memory tree of the most recently observed value at each path.
///
/// Single-writer: one producer applies deltas in receipt order. The store has
/// no locking of its own; concurrent readers wrap it in a mutex (see
/// `pelorus-feed`). Lives for the process lifetime - there is no eviction,
/// expiry, or deletion, only replacement and merge.
///
/// # Example
///
/// ```rust
/// use pelorus_store::{path, SignalKStore};
///
/// let mut store = SignalKStore::new();
/// store.store_path(&path!("vessels.a.name"), serde_json::json!("Orion"));
/// assert_eq!(store.vessels().count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SignalKStore {
    root: PathTree<Value>,
}

impl SignalKStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value at a path, creating intermediate nodes as needed.
    ///
    /// Callers must pass a non-empty path; `apply_delta` guards the one place
    /// a composed path can come out empty.
    ///
    /// Merge policy at the destination value slot:
    /// - empty slot: the value is set verbatim;
    /// - existing object and incoming object: shallow merge, incoming keys
    ///   win on collision, existing keys absent from the incoming object are
    ///   retained (one level only, never recursive);
    /// - anything else: the incoming value replaces the slot entirely.
    pub fn store_path(&mut self, path: &Path, value: Value) {
        trace!(%path, %value, "store_path");
        let slot = self.root.slot_mut(path);
        *slot = Some(match (slot.take(), value) {
            (Some(Value::Object(mut existing)), Value::Object(incoming)) => {
                for (key, val) in incoming {
                    existing.insert(key, val);
                }
                Value::Object(existing)
            }
            (_, incoming) => incoming,
        });
    }

    /// Apply every value in a delta envelope, in the order presented.
    ///
    /// The context (default `"self"`) is resolved once per envelope and
    /// prefixed onto each value's dotted path; a value with an empty `path`
    /// attaches directly at the context node. There is no transactionality
    /// across the batch - each store is independently idempotent and
    /// path-scoped, so partial application is acceptable.
    pub fn apply_delta(&mut self, delta: &Delta) {
        let context = Path::parse(delta.context.as_deref().unwrap_or(DEFAULT_CONTEXT));
        for update in &delta.updates {
            for entry in &update.values {
                let full_path = context.join(&Path::parse(&entry.path));
                if full_path.is_empty() {
                    // Empty context and empty value path compose to the root,
                    // which store_path must never see.
                    warn!("dropping delta value addressed at the empty path");
                    continue;
                }
                debug!(path = %full_path, "applying update");
                self.store_path(&full_path, entry.value.clone());
            }
        }
    }

    /// Enumerate `(id, subtree)` pairs under the vessels partition.
    ///
    /// Empty before any vessel-scoped update has arrived; never errors.
    pub fn vessels(&self) -> impl Iterator<Item = (&str, &PathTree<Value>)> {
        self.root
            .subtree(&Path::parse(VESSELS))
            .into_iter()
            .flat_map(|node| node.children())
    }

    /// Read the value stored at the exact path, if any.
    ///
    /// Total lookup: a missing intermediate node or an empty value slot
    /// yields `None`, never a fault.
    pub fn value_at(&self, path: &Path) -> Option<&Value> {
        self.root.get(path)
    }

    /// The root of the merged tree.
    pub fn root(&self) -> &PathTree<Value> {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use serde_json::json;

    fn delta(context: Option<&str>, values: &[(&str, Value)]) -> Delta {
        Delta {
            context: context.map(String::from),
            updates: vec![crate::Update {
                values: values
                    .iter()
                    .map(|(p, v)| crate::PathValue {
                        path: p.to_string(),
                        value: v.clone(),
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn store_scalar_is_idempotent() {
        let mut store = SignalKStore::new();
        store.store_path(&path!("vessels.a.name"), json!("Orion"));
        store.store_path(&path!("vessels.a.name"), json!("Orion"));

        assert_eq!(store.value_at(&path!("vessels.a.name")), Some(&json!("Orion")));
        assert_eq!(store.root().len(), 1);
    }

    #[test]
    fn structural_sharing_of_prefixes() {
        let mut store = SignalKStore::new();
        store.store_path(&path!("a.b.c"), json!(1));
        store.store_path(&path!("a.b.d"), json!(2));

        assert_eq!(store.root().children().count(), 1);
        let b = store.root().subtree(&path!("a.b")).unwrap();
        assert_eq!(b.children().count(), 2);
        assert_eq!(store.value_at(&path!("a.b.c")), Some(&json!(1)));
        assert_eq!(store.value_at(&path!("a.b.d")), Some(&json!(2)));
    }

    #[test]
    fn object_merge_incoming_wins() {
        let mut store = SignalKStore::new();
        store.store_path(&path!("a"), json!({"x": 1, "y": 2}));
        store.store_path(&path!("a"), json!({"y": 3, "z": 4}));

        assert_eq!(
            store.value_at(&path!("a")),
            Some(&json!({"x": 1, "y": 3, "z": 4}))
        );
    }

    #[test]
    fn object_merge_is_shallow() {
        let mut store = SignalKStore::new();
        store.store_path(&path!("a"), json!({"inner": {"x": 1}}));
        store.store_path(&path!("a"), json!({"inner": {"y": 2}}));

        // One level only: the nested object is replaced, not merged.
        assert_eq!(store.value_at(&path!("a")), Some(&json!({"inner": {"y": 2}})));
    }

    #[test]
    fn scalar_replaces_scalar() {
        let mut store = SignalKStore::new();
        store.store_path(&path!("a"), json!(5));
        store.store_path(&path!("a"), json!(7));

        assert_eq!(store.value_at(&path!("a")), Some(&json!(7)));
    }

    #[test]
    fn scalar_into_object_replaces() {
        // The tightened merge policy: an incoming scalar is never folded into
        // an existing object, it replaces it.
        let mut store = SignalKStore::new();
        store.store_path(&path!("a"), json!({"x": 1}));
        store.store_path(&path!("a"), json!(9));

        assert_eq!(store.value_at(&path!("a")), Some(&json!(9)));
    }

    #[test]
    fn object_into_scalar_replaces() {
        let mut store = SignalKStore::new();
        store.store_path(&path!("a"), json!(9));
        store.store_path(&path!("a"), json!({"x": 1}));

        assert_eq!(store.value_at(&path!("a")), Some(&json!({"x": 1})));
    }

    #[test]
    fn context_defaults_to_self() {
        let mut implicit = SignalKStore::new();
        implicit.apply_delta(&delta(None, &[("name", json!("Orion"))]));

        let mut explicit = SignalKStore::new();
        explicit.apply_delta(&delta(Some("self"), &[("name", json!("Orion"))]));

        assert_eq!(
            implicit.value_at(&path!("self.name")),
            explicit.value_at(&path!("self.name"))
        );
        assert_eq!(implicit.value_at(&path!("self.name")), Some(&json!("Orion")));
    }

    #[test]
    fn empty_path_attaches_at_context() {
        let mut store = SignalKStore::new();
        store.apply_delta(&delta(
            Some("vessels.urn:mrn:123"),
            &[("", json!({"name": "Orion"}))],
        ));

        assert_eq!(
            store.value_at(&path!("vessels.urn:mrn:123")),
            Some(&json!({"name": "Orion"}))
        );
    }

    #[test]
    fn empty_composed_path_is_dropped() {
        let mut store = SignalKStore::new();
        store.apply_delta(&delta(Some(""), &[("", json!("ghost"))]));

        assert!(store.root().is_empty());
    }

    #[test]
    fn later_values_in_envelope_win() {
        let mut store = SignalKStore::new();
        store.apply_delta(&delta(
            Some("vessels.a"),
            &[("name", json!("First")), ("name", json!("Second"))],
        ));

        assert_eq!(
            store.value_at(&path!("vessels.a.name")),
            Some(&json!("Second"))
        );
    }

    #[test]
    fn vessels_empty_before_any_update() {
        let store = SignalKStore::new();
        assert_eq!(store.vessels().count(), 0);

        // Non-vessel traffic does not populate the partition either.
        let mut store = SignalKStore::new();
        store.apply_delta(&delta(None, &[("name", json!("Orion"))]));
        assert_eq!(store.vessels().count(), 0);
    }

    #[test]
    fn end_to_end_two_envelopes() {
        let mut store = SignalKStore::new();
        store.apply_delta(&delta(Some("vessels.A"), &[("name", json!("Orion"))]));
        store.apply_delta(&delta(
            Some("vessels.A"),
            &[(
                "navigation.position",
                json!({"latitude": 10.0, "longitude": 20.0}),
            )],
        ));

        let vessels: Vec<_> = store.vessels().collect();
        assert_eq!(vessels.len(), 1);
        let (id, vessel) = vessels[0];
        assert_eq!(id, "A");
        assert_eq!(vessel.get(&path!("name")), Some(&json!("Orion")));
        assert_eq!(
            vessel.get(&path!("navigation.position")),
            Some(&json!({"latitude": 10.0, "longitude": 20.0}))
        );
    }

    #[test]
    fn value_at_missing_levels_is_none() {
        let mut store = SignalKStore::new();
        store.store_path(&path!("vessels.a.navigation.position"), json!({}));

        assert_eq!(store.value_at(&path!("vessels.a.navigation")), None);
        assert_eq!(store.value_at(&path!("vessels.b.name")), None);
        assert_eq!(store.value_at(&path!("vessels.a.navigation.position.deep")), None);
    }
}
