use crate::blackboard::Blackboard;
use crate::{NodeId, TargetId};

/// What a leaf sees while it is being ticked: the tree's blackboard, the
/// leaf's own id (for scoped keys) and the entity the tree is driving.
///
/// The scoped accessors mirror the global ones on [`Blackboard`] but key the
/// entry to this node, so the same logical name used by two different leaves
/// never aliases.
pub struct Context<'a> {
    blackboard: &'a mut Blackboard,
    node: NodeId,
    target: TargetId,
}

impl<'a> Context<'a> {
    pub(crate) fn new(blackboard: &'a mut Blackboard, node: NodeId, target: TargetId) -> Self {
        Self {
            blackboard,
            node,
            target,
        }
    }

    pub fn blackboard(&self) -> &Blackboard {
        self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        self.blackboard
    }

    /// Id of the node currently being ticked.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The entity this tree drives.
    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn set_int_scoped(&mut self, key: &str, value: i64) {
        self.blackboard.set_int_for(key, self.node, value);
    }

    pub fn get_int_scoped(&self, key: &str) -> Option<i64> {
        self.blackboard.get_int_for(key, self.node)
    }

    pub fn set_float_scoped(&mut self, key: &str, value: f64) {
        self.blackboard.set_float_for(key, self.node, value);
    }

    pub fn get_float_scoped(&self, key: &str) -> Option<f64> {
        self.blackboard.get_float_for(key, self.node)
    }

    pub fn set_bool_scoped(&mut self, key: &str, value: bool) {
        self.blackboard.set_bool_for(key, self.node, value);
    }

    pub fn get_bool_scoped(&self, key: &str) -> Option<bool> {
        self.blackboard.get_bool_for(key, self.node)
    }

    pub fn set_string_scoped(&mut self, key: &str, value: impl Into<String>) {
        self.blackboard.set_string_for(key, self.node, value);
    }

    pub fn get_string_scoped(&self, key: &str) -> Option<&str> {
        self.blackboard.get_string_for(key, self.node)
    }
}
