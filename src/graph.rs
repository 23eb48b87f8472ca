use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::nodes::Params;

/// A behavior graph as the editor saves it: a flat list of nodes and the
/// links wired between their pins. Nothing here is validated; the compiler
/// does that when turning the description into a [`Tree`](crate::Tree).
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct GraphDescription {
    #[serde(default)]
    pub nodes: Vec<NodeDesc>,
    #[serde(default)]
    pub links: Vec<LinkDesc>,
}

impl GraphDescription {
    pub fn from_yaml(source: &str) -> Result<Self, GraphError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn to_yaml(&self) -> Result<String, GraphError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// One node in the editor graph. `outgoing_links` is ordered; for composites
/// that order is the evaluation order of the children.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct NodeDesc {
    pub id: i64,
    #[serde(rename = "type")]
    pub type_name: String,
    /// Display name; falls back to the type name when absent.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<PinDesc>,
    #[serde(default)]
    pub outputs: Vec<PinDesc>,
    #[serde(default)]
    pub outgoing_links: Vec<i64>,
    #[serde(default)]
    pub params: Params,
}

/// An attachment point on a node. Links end at pins, not at nodes; the
/// compiler resolves a pin back to its owning node.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct PinDesc {
    pub id: i64,
}

/// A directed edge from a parent's output pin to a child's input pin.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct LinkDesc {
    pub id: i64,
    pub start_pin_id: i64,
    pub end_pin_id: i64,
}
