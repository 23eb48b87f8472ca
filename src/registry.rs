use std::collections::HashMap;

use crate::nodes::{
    BlackboardCompare, BlackboardValid, DebugMessage, LeafNode, SetInt,
};

/// Constructor for one leaf node type.
pub type LeafFactory = Box<dyn Fn() -> Box<dyn LeafNode>>;

/// Wraps a plain constructor into a [`LeafFactory`].
pub fn boxify<T>(cons: impl (Fn() -> T) + 'static) -> LeafFactory
where
    T: LeafNode + 'static,
{
    Box::new(move || Box::new(cons()))
}

/// What the compiler can instantiate, either a built-in structural kind
/// interpreted by the engine or a registered leaf constructor.
pub(crate) enum NodeTemplate<'a> {
    Root,
    Sequence,
    Selector,
    Inverter,
    Successor,
    Repeater,
    Leaf(&'a LeafFactory),
}

/// Maps graph node type names to the things the compiler builds from them.
///
/// The default registry knows the structural kinds and the built-in leaves;
/// hosts register their own leaves with [`Registry::register`] before
/// compiling. A registry is a plain value, so two hosts with different leaf
/// sets never interfere.
pub struct Registry {
    leaves: HashMap<String, LeafFactory>,
}

impl Default for Registry {
    fn default() -> Self {
        let mut ret = Self {
            leaves: HashMap::new(),
        };
        ret.register("DebugMessage", boxify(DebugMessage::default));
        ret.register("SetInt", boxify(SetInt::default));
        ret.register("BlackboardValid", boxify(BlackboardValid::default));
        ret.register("BlackboardCompare", boxify(BlackboardCompare::default));
        ret
    }
}

impl Registry {
    /// Registers a leaf constructor under a graph type name. Re-registering
    /// a name replaces the old constructor; the structural kind names are
    /// resolved first and cannot be shadowed.
    pub fn register(&mut self, type_name: impl ToString, factory: LeafFactory) {
        self.leaves.insert(type_name.to_string(), factory);
    }

    pub(crate) fn template(&self, type_name: &str) -> Option<NodeTemplate<'_>> {
        match type_name {
            "Root" => Some(NodeTemplate::Root),
            "Sequence" => Some(NodeTemplate::Sequence),
            "Selector" => Some(NodeTemplate::Selector),
            "Inverter" => Some(NodeTemplate::Inverter),
            "Successor" => Some(NodeTemplate::Successor),
            "Repeater" => Some(NodeTemplate::Repeater),
            _ => self.leaves.get(type_name).map(NodeTemplate::Leaf),
        }
    }
}
