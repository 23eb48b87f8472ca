use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::NodeId;

/// Per-tree shared memory. Four independent tables, one per scalar type, all
/// keyed by plain strings; an integer entry and a string entry may share a
/// key without touching each other.
///
/// Entries come in two flavors. Global entries use the caller's key as-is.
/// Scoped entries append the requesting node's id to the key, so two nodes
/// storing under the same logical name never alias.
///
/// A get on a missing key is not an error; it returns `None` and nothing
/// else happens.
#[derive(Default, Debug)]
pub struct Blackboard {
    ints: HashMap<String, i64>,
    floats: HashMap<String, f64>,
    bools: HashMap<String, bool>,
    strings: HashMap<String, String>,
}

fn scoped_key(key: &str, node: NodeId) -> String {
    format!("{}{}", key, node)
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_int(&mut self, key: impl Into<String>, value: i64) {
        self.ints.insert(key.into(), value);
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.ints.get(key).copied()
    }

    pub fn set_int_for(&mut self, key: &str, node: NodeId, value: i64) {
        self.set_int(scoped_key(key, node), value);
    }

    pub fn get_int_for(&self, key: &str, node: NodeId) -> Option<i64> {
        self.get_int(&scoped_key(key, node))
    }

    pub fn set_float(&mut self, key: impl Into<String>, value: f64) {
        self.floats.insert(key.into(), value);
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.floats.get(key).copied()
    }

    pub fn set_float_for(&mut self, key: &str, node: NodeId, value: f64) {
        self.set_float(scoped_key(key, node), value);
    }

    pub fn get_float_for(&self, key: &str, node: NodeId) -> Option<f64> {
        self.get_float(&scoped_key(key, node))
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.bools.insert(key.into(), value);
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.bools.get(key).copied()
    }

    pub fn set_bool_for(&mut self, key: &str, node: NodeId, value: bool) {
        self.set_bool(scoped_key(key, node), value);
    }

    pub fn get_bool_for(&self, key: &str, node: NodeId) -> Option<bool> {
        self.get_bool(&scoped_key(key, node))
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    pub fn set_string_for(&mut self, key: &str, node: NodeId, value: impl Into<String>) {
        self.set_string(scoped_key(key, node), value);
    }

    pub fn get_string_for(&self, key: &str, node: NodeId) -> Option<&str> {
        self.get_string(&scoped_key(key, node))
    }

    /// True if `key` has a global entry of the given kind.
    pub fn contains(&self, key: &str, kind: ValueKind) -> bool {
        match kind {
            ValueKind::Int => self.ints.contains_key(key),
            ValueKind::Float => self.floats.contains_key(key),
            ValueKind::Bool => self.bools.contains_key(key),
            ValueKind::String => self.strings.contains_key(key),
        }
    }
}

/// Which of the four blackboard tables a value or key refers to.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ValueKind {
    Int,
    Float,
    Bool,
    String,
}

impl ValueKind {
    /// Parses the spelling used in graph node parameters ("int", "float",
    /// "bool", "string").
    pub fn parse(s: &str) -> Option<ValueKind> {
        match s {
            "int" => Some(ValueKind::Int),
            "float" => Some(ValueKind::Float),
            "bool" => Some(ValueKind::Bool),
            "string" => Some(ValueKind::String),
            _ => None,
        }
    }
}

/// A scalar that can live in a blackboard or a graph node parameter map.
///
/// Serialized untagged, so parameters read naturally in YAML
/// (`max: 3`, `message: "hi"`).
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Str(_) => ValueKind::String,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Compares this value against the global blackboard entry under `key`,
    /// consulting the table that matches the active variant. A missing entry
    /// compares unequal.
    pub fn equals_entry(&self, blackboard: &Blackboard, key: &str) -> bool {
        match self {
            Value::Int(v) => blackboard.get_int(key) == Some(*v),
            Value::Float(v) => blackboard.get_float(key) == Some(*v),
            Value::Bool(v) => blackboard.get_bool(key) == Some(*v),
            Value::Str(v) => blackboard.get_string(key) == Some(v.as_str()),
        }
    }
}
