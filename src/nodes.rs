use std::collections::HashMap;

use crate::blackboard::{Blackboard, Value, ValueKind};
use crate::context::Context;
use crate::error::CompileError;
use crate::{NodeId, NodeKind, NodeResult};

/// Per-node configuration carried by the graph description, keyed by
/// parameter name.
pub type Params = HashMap<String, Value>;

/// The contract a concrete leaf action or condition implements.
///
/// Every hook except [`LeafNode::on_update`] has an empty default. The
/// engine calls entry, update and exit in that fixed order on every tick
/// that reaches the leaf; exit runs unconditionally, whatever update
/// returned.
pub trait LeafNode {
    /// Called once at compile time with the node's parameter map from the
    /// graph description. Reject bad configuration here; it aborts the whole
    /// compilation.
    fn on_configure(&mut self, _params: &Params) -> Result<(), CompileError> {
        Ok(())
    }

    /// Called once at compile time, after configuration. Use it to register
    /// global blackboard defaults the leaf relies on.
    fn on_tree_build(&mut self, _blackboard: &mut Blackboard) {}

    fn on_entry(&mut self, _ctx: &mut Context) {}

    fn on_update(&mut self, ctx: &mut Context) -> NodeResult;

    fn on_exit(&mut self, _ctx: &mut Context) {}
}

/// Structure and behavior of a compiled node. The set of structural kinds is
/// closed and interpreted by the engine; only `Leaf` dispatches into user
/// code.
///
/// Children are arena handles into the owning tree, not owning pointers:
/// dropping the tree's arena tears down the whole graph.
pub(crate) enum Exec {
    Sequence(Vec<NodeId>),
    Selector(Vec<NodeId>),
    Root(Option<NodeId>),
    Inverter(Option<NodeId>),
    Successor(Option<NodeId>),
    Repeater {
        child: Option<NodeId>,
        max: u32,
        count: u32,
    },
    Leaf(Box<dyn LeafNode>),
}

impl Exec {
    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            Exec::Sequence(_) | Exec::Selector(_) => NodeKind::Composite,
            Exec::Root(_) | Exec::Inverter(_) | Exec::Successor(_) | Exec::Repeater { .. } => {
                NodeKind::Decorator
            }
            Exec::Leaf(_) => NodeKind::Leaf,
        }
    }
}

/// One compiled node in a tree's arena.
pub struct Node {
    id: NodeId,
    name: String,
    kind: NodeKind,
    pub(crate) exec: Exec,
    /// Set when the compiler binds the node to its owning tree. A node that
    /// was never bound ticks straight to [`NodeResult::FatalError`].
    pub(crate) bound: bool,
}

impl Node {
    pub(crate) fn new(name: impl Into<String>, exec: Exec) -> Self {
        let kind = exec.kind();
        Self {
            id: NodeId::next(),
            name: name.into(),
            kind,
            exec,
            bound: false,
        }
    }

    pub(crate) fn bind(&mut self) {
        self.bound = true;
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Display name assigned by the compiler from the graph description.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Child handles in evaluation order. Empty for leaves.
    pub fn children(&self) -> Vec<NodeId> {
        match &self.exec {
            Exec::Sequence(children) | Exec::Selector(children) => children.clone(),
            Exec::Root(child)
            | Exec::Inverter(child)
            | Exec::Successor(child)
            | Exec::Repeater { child, .. } => child.iter().copied().collect(),
            Exec::Leaf(_) => vec![],
        }
    }

    #[cfg(test)]
    pub(crate) fn repeat_count(&self) -> Option<u32> {
        match &self.exec {
            Exec::Repeater { count, .. } => Some(*count),
            _ => None,
        }
    }
}

/// Logs a configured message and succeeds. Handy while sketching a tree in
/// the editor.
#[derive(Default)]
pub struct DebugMessage {
    message: String,
}

impl LeafNode for DebugMessage {
    fn on_configure(&mut self, params: &Params) -> Result<(), CompileError> {
        if let Some(message) = params.get("message") {
            self.message = message
                .as_str()
                .ok_or(CompileError::BadParameter {
                    node: "DebugMessage".to_owned(),
                    param: "message",
                })?
                .to_owned();
        }
        Ok(())
    }

    fn on_update(&mut self, _ctx: &mut Context) -> NodeResult {
        tracing::debug!("{}", self.message);
        NodeResult::Success
    }
}

/// Writes a configured integer to a global blackboard key and succeeds.
#[derive(Default)]
pub struct SetInt {
    key: String,
    value: i64,
}

impl LeafNode for SetInt {
    fn on_configure(&mut self, params: &Params) -> Result<(), CompileError> {
        self.key = require_str(params, "SetInt", "key")?.to_owned();
        self.value = params
            .get("value")
            .and_then(Value::as_int)
            .ok_or(CompileError::BadParameter {
                node: "SetInt".to_owned(),
                param: "value",
            })?;
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut Context) -> NodeResult {
        let (key, value) = (self.key.clone(), self.value);
        ctx.blackboard_mut().set_int(key, value);
        NodeResult::Success
    }
}

/// Condition: succeeds iff a global blackboard entry of the configured kind
/// exists under the configured key.
pub struct BlackboardValid {
    key: String,
    kind: ValueKind,
}

impl Default for BlackboardValid {
    fn default() -> Self {
        Self {
            key: String::new(),
            kind: ValueKind::Int,
        }
    }
}

impl LeafNode for BlackboardValid {
    fn on_configure(&mut self, params: &Params) -> Result<(), CompileError> {
        self.key = require_str(params, "BlackboardValid", "key")?.to_owned();
        if let Some(kind) = params.get("type") {
            self.kind = kind
                .as_str()
                .and_then(ValueKind::parse)
                .ok_or(CompileError::BadParameter {
                    node: "BlackboardValid".to_owned(),
                    param: "type",
                })?;
        }
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut Context) -> NodeResult {
        if ctx.blackboard().contains(&self.key, self.kind) {
            NodeResult::Success
        } else {
            NodeResult::Failed
        }
    }
}

/// Condition: succeeds iff the configured value equals the global blackboard
/// entry stored under the configured key. The comparison consults the table
/// matching the value's own kind.
#[derive(Default)]
pub struct BlackboardCompare {
    key: String,
    value: Option<Value>,
}

impl LeafNode for BlackboardCompare {
    fn on_configure(&mut self, params: &Params) -> Result<(), CompileError> {
        self.key = require_str(params, "BlackboardCompare", "key")?.to_owned();
        self.value = Some(
            params
                .get("value")
                .cloned()
                .ok_or(CompileError::BadParameter {
                    node: "BlackboardCompare".to_owned(),
                    param: "value",
                })?,
        );
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut Context) -> NodeResult {
        let equal = self
            .value
            .as_ref()
            .map(|value| value.equals_entry(ctx.blackboard(), &self.key))
            .unwrap_or(false);
        if equal {
            NodeResult::Success
        } else {
            NodeResult::Failed
        }
    }
}

fn require_str<'a>(
    params: &'a Params,
    node: &str,
    param: &'static str,
) -> Result<&'a str, CompileError> {
    params
        .get(param)
        .and_then(Value::as_str)
        .ok_or(CompileError::BadParameter {
            node: node.to_owned(),
            param,
        })
}
