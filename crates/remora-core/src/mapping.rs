//! Mapping records and the session that owns them.
//!
//! A [`Mapping`] is the serializable outcome of one committed drag gesture:
//! a source field and a target field, each identified by its root-relative
//! parent path, key and runtime type name. The [`MappingSession`] owns the
//! append-only list for one editing session and broadcasts the full list to
//! subscribers after every mutation.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stable identifier of one field inside a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRef {
    /// Slash-prefixed `/`-joined chain of ancestor keys (root key included),
    /// excluding the field itself; empty for the root.
    pub parent_path: String,
    pub key: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A field plus the tree side it came from, as resolved from a gesture.
/// The side never appears on the wire; it only orients the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidedField {
    pub side: String,
    pub field: FieldRef,
}

/// One recorded correspondence between an input field and an output field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub source_node: FieldRef,
    pub target_node: FieldRef,
    // Placeholders for mapping conditions/transformations; not implemented.
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub transformation: Option<String>,
}

/// Owns the mapping list for one editing session.
///
/// The list is append-only between resets and only readable through
/// [`MappingSession::mappings`] or the broadcast snapshots, so no other
/// component can mutate it behind the session's back.
pub struct MappingSession {
    input_side: String,
    mappings: Vec<Mapping>,
    subscribers: Vec<Box<dyn FnMut(&[Mapping])>>,
}

impl std::fmt::Debug for MappingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingSession")
            .field("input_side", &self.input_side)
            .field("mappings", &self.mappings)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl MappingSession {
    /// `input_side` is the side id whose fields always end up as
    /// `sourceNode`, regardless of gesture direction.
    pub fn new(input_side: impl Into<String>) -> Self {
        Self {
            input_side: input_side.into(),
            mappings: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Registers a subscriber for future broadcasts: the full list after
    /// every recorded mapping, the empty list on reset. Nothing is replayed
    /// at subscription time.
    pub fn subscribe(&mut self, callback: impl FnMut(&[Mapping]) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Records one completed gesture and broadcasts the full list.
    ///
    /// The pair arrives in gesture order; the field whose side matches the
    /// session's input side becomes `sourceNode`. Identical repeated gestures
    /// append duplicate mappings (no dedup).
    pub fn record(&mut self, from: SidedField, to: SidedField) {
        let (source, target) = if to.side == self.input_side && from.side != self.input_side {
            (to.field, from.field)
        } else {
            (from.field, to.field)
        };
        debug!(
            source_key = %source.key,
            target_key = %target.key,
            total = self.mappings.len() + 1,
            "mapping recorded"
        );
        self.mappings.push(Mapping {
            source_node: source,
            target_node: target,
            condition: None,
            transformation: None,
        });
        self.broadcast();
    }

    /// Read-only snapshot of the recorded mappings, in record order.
    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    /// Clears the session and broadcasts the empty list.
    pub fn reset(&mut self) {
        debug!(discarded = self.mappings.len(), "mapping session reset");
        self.mappings.clear();
        self.broadcast();
    }

    fn broadcast(&mut self) {
        for subscriber in &mut self.subscribers {
            subscriber(&self.mappings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn field(path: &str, key: &str) -> FieldRef {
        FieldRef {
            parent_path: path.to_string(),
            key: key.to_string(),
            type_name: "number".to_string(),
        }
    }

    fn sided(side: &str, key: &str) -> SidedField {
        SidedField {
            side: side.to_string(),
            field: field("/", key),
        }
    }

    #[test]
    fn record_orients_input_side_as_source() {
        let mut session = MappingSession::new("input");

        session.record(sided("input", "a"), sided("output", "x"));
        session.record(sided("output", "y"), sided("input", "b"));

        let mappings = session.mappings();
        assert_eq!(mappings[0].source_node.key, "a");
        assert_eq!(mappings[0].target_node.key, "x");
        assert_eq!(mappings[1].source_node.key, "b");
        assert_eq!(mappings[1].target_node.key, "y");
    }

    #[test]
    fn record_keeps_gesture_order_for_same_side() {
        let mut session = MappingSession::new("input");
        session.record(sided("output", "y"), sided("output", "z"));
        assert_eq!(session.mappings()[0].source_node.key, "y");
    }

    #[test]
    fn duplicate_gestures_append_duplicates() {
        let mut session = MappingSession::new("input");
        session.record(sided("input", "a"), sided("output", "x"));
        session.record(sided("input", "a"), sided("output", "x"));
        assert_eq!(session.mappings().len(), 2);
        assert_eq!(session.mappings()[0], session.mappings()[1]);
    }

    #[test]
    fn broadcast_after_record_and_reset() {
        let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
        let sink = Rc::clone(&seen);

        let mut session = MappingSession::new("input");
        session.subscribe(move |mappings| sink.borrow_mut().push(mappings.len()));

        session.record(sided("input", "a"), sided("output", "x"));
        session.record(sided("input", "b"), sided("output", "y"));
        session.reset();

        // two records, then the empty reset broadcast; nothing on subscribe
        assert_eq!(*seen.borrow(), vec![1, 2, 0]);
        assert!(session.mappings().is_empty());
    }

    #[test]
    fn mapping_wire_shape() {
        let mapping = Mapping {
            source_node: field("/", "a"),
            target_node: field("/input/b", "c"),
            condition: None,
            transformation: None,
        };
        let v = serde_json::to_value(&mapping).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "sourceNode": {"parentPath": "/", "key": "a", "type": "number"},
                "targetNode": {"parentPath": "/input/b", "key": "c", "type": "number"},
                "condition": null,
                "transformation": null
            })
        );
    }
}
