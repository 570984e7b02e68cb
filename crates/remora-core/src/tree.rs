//! Conversion of arbitrary JSON values into normalized field trees.
//!
//! Every field of the input/output record becomes a [`DataNode`]. Non-null
//! objects and arrays become the object variant with ordered children (array
//! entries are keyed by their index, mirroring how `Object.entries` treats
//! arrays); everything else becomes a scalar tagged with a closed
//! [`ScalarKind`]. The `side` of the root (its label, or an explicitly
//! supplied side) is propagated unchanged to every descendant and later
//! decides mapping direction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of scalar kinds a leaf field can carry.
///
/// `type_name` matches the JS-style runtime type names the mapping wire shape
/// uses (`"string"`, `"number"`, `"boolean"`, `"null"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Number,
    Boolean,
    Null,
}

impl ScalarKind {
    /// Classifies a JSON scalar. Returns `None` for objects and arrays.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::String(_) => Some(Self::String),
            Value::Number(_) => Some(Self::Number),
            Value::Bool(_) => Some(Self::Boolean),
            Value::Null => Some(Self::Null),
            Value::Object(_) | Value::Array(_) => None,
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

/// One normalized field of an input/output record.
#[derive(Debug, Clone, PartialEq)]
pub struct DataNode {
    /// Label of this field.
    pub key: String,
    /// Identifier of the root-level group (`"input"` / `"output"`), identical
    /// across an entire tree.
    pub side: String,
    pub value: NodeValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// A structured field. `children` preserves the original key order;
    /// `array` remembers whether the source was a JSON array so the value can
    /// be reconstructed exactly.
    Object { children: Vec<DataNode>, array: bool },
    /// A leaf field with its scalar payload.
    Scalar { kind: ScalarKind, raw: Value },
}

impl DataNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self.value, NodeValue::Scalar { .. })
    }

    pub fn children(&self) -> &[DataNode] {
        match &self.value {
            NodeValue::Object { children, .. } => children,
            NodeValue::Scalar { .. } => &[],
        }
    }

    /// Runtime type name: `"object"` for structured fields (arrays included),
    /// else the scalar kind's name.
    pub fn type_name(&self) -> &'static str {
        match &self.value {
            NodeValue::Object { .. } => "object",
            NodeValue::Scalar { kind, .. } => kind.type_name(),
        }
    }
}

/// Converts an arbitrary JSON value into a normalized field tree.
///
/// `parent_side` propagates the root group id; at the root it defaults to
/// `label`. Total over `serde_json::Value`: every JSON value is representable
/// and `Value` cannot be cyclic, so conversion never fails.
pub fn convert(label: &str, value: &Value, parent_side: Option<&str>) -> DataNode {
    let side = parent_side.unwrap_or(label).to_string();
    let value = match value {
        Value::Object(map) => NodeValue::Object {
            children: map
                .iter()
                .map(|(key, child)| convert(key, child, Some(&side)))
                .collect(),
            array: false,
        },
        Value::Array(items) => NodeValue::Object {
            children: items
                .iter()
                .enumerate()
                .map(|(index, child)| convert(&index.to_string(), child, Some(&side)))
                .collect(),
            array: true,
        },
        Value::String(s) => NodeValue::Scalar {
            kind: ScalarKind::String,
            raw: Value::String(s.clone()),
        },
        Value::Number(n) => NodeValue::Scalar {
            kind: ScalarKind::Number,
            raw: Value::Number(n.clone()),
        },
        Value::Bool(b) => NodeValue::Scalar {
            kind: ScalarKind::Boolean,
            raw: Value::Bool(*b),
        },
        Value::Null => NodeValue::Scalar {
            kind: ScalarKind::Null,
            raw: Value::Null,
        },
    };
    DataNode {
        key: label.to_string(),
        side,
        value,
    }
}

/// Rebuilds the JSON value a tree was converted from.
pub fn to_value(node: &DataNode) -> Value {
    match &node.value {
        NodeValue::Scalar { raw, .. } => raw.clone(),
        NodeValue::Object { children, array } => {
            if *array {
                Value::Array(children.iter().map(to_value).collect())
            } else {
                let mut map = serde_json::Map::new();
                for child in children {
                    map.insert(child.key.clone(), to_value(child));
                }
                Value::Object(map)
            }
        }
    }
}
