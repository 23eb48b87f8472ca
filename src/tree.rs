use std::collections::HashMap;
use std::fmt;

use crate::blackboard::Blackboard;
use crate::context::Context;
use crate::nodes::{Exec, Node};
use crate::tracer::{TracePhase, Tracer};
use crate::{NodeId, NodeResult, TargetId};

/// One executable behavior tree, bound to one target entity.
///
/// Owns every compiled node in an arena keyed by [`NodeId`], the tree's
/// [`Blackboard`] and [`Tracer`]. Trees only come out of
/// [`compile`](crate::compile), so a tree always has a valid root; dropping
/// the tree drops the arena and with it every node.
///
/// Execution is single-threaded and synchronous: a node's tick runs to
/// completion before its parent observes the result, and children always
/// tick in declared order. The host frame loop calls [`Tree::execute`] once
/// per simulation tick.
pub struct Tree {
    name: String,
    target: TargetId,
    root: NodeId,
    nodes: HashMap<NodeId, Node>,
    blackboard: Blackboard,
    tracer: Tracer,
    tracing_on: bool,
}

impl fmt::Debug for Tree {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Tree")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

/// Lightweight copy of a node's structure, taken so the arena borrow ends
/// before the engine recurses into children.
enum Dispatch {
    Leaf,
    Sequence(Vec<NodeId>),
    Selector(Vec<NodeId>),
    Root(Option<NodeId>),
    Inverter(Option<NodeId>),
    Successor(Option<NodeId>),
    Repeater { child: Option<NodeId>, max: u32 },
}

impl Tree {
    pub(crate) fn from_parts(
        target: TargetId,
        root: NodeId,
        nodes: HashMap<NodeId, Node>,
        blackboard: Blackboard,
    ) -> Self {
        Self {
            name: format!("BT-ID-{}", target),
            target,
            root,
            nodes,
            blackboard,
            tracer: Tracer::default(),
            tracing_on: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    /// Enables or disables per-visit trace recording. Off by default.
    pub fn set_tracing(&mut self, enabled: bool) {
        self.tracing_on = enabled;
    }

    /// Ticks the root exactly once. One simulation frame, one call.
    pub fn execute(&mut self) -> NodeResult {
        let root = self.root;
        self.tick_node(root)
    }

    /// The execution contract for a single node: bound-check, then trace
    /// entry, entry hook, trace update, kind-specific update, trace exit,
    /// exit hook. Exit always runs once entry ran, whatever update returned.
    fn tick_node(&mut self, id: NodeId) -> NodeResult {
        match self.nodes.get(&id) {
            Some(node) if node.bound => {}
            // Never linked into a tree; refuse before any hook runs.
            _ => return NodeResult::FatalError,
        }

        self.trace(id, TracePhase::Entry);
        self.leaf_entry(id);

        self.trace(id, TracePhase::Update);
        let result = self.update_node(id);

        self.trace(id, TracePhase::Exit);
        self.leaf_exit(id);

        result
    }

    fn update_node(&mut self, id: NodeId) -> NodeResult {
        let dispatch = match self.nodes.get(&id).map(|node| &node.exec) {
            Some(Exec::Leaf(_)) => Dispatch::Leaf,
            Some(Exec::Sequence(children)) => Dispatch::Sequence(children.clone()),
            Some(Exec::Selector(children)) => Dispatch::Selector(children.clone()),
            Some(Exec::Root(child)) => Dispatch::Root(*child),
            Some(Exec::Inverter(child)) => Dispatch::Inverter(*child),
            Some(Exec::Successor(child)) => Dispatch::Successor(*child),
            Some(Exec::Repeater { child, max, .. }) => Dispatch::Repeater {
                child: *child,
                max: *max,
            },
            None => return NodeResult::FatalError,
        };

        match dispatch {
            Dispatch::Leaf => self.leaf_update(id),

            // Tick children left to right; stop at the first non-success and
            // return it. An empty child list is vacuously successful.
            Dispatch::Sequence(children) => {
                for child in children {
                    let result = self.tick_node(child);
                    if result != NodeResult::Success {
                        return result;
                    }
                }
                NodeResult::Success
            }

            // Tick children left to right; stop at the first non-failure and
            // return it. An empty child list is a vacuous failure.
            Dispatch::Selector(children) => {
                for child in children {
                    let result = self.tick_node(child);
                    if result != NodeResult::Failed {
                        return result;
                    }
                }
                NodeResult::Failed
            }

            Dispatch::Root(child) => match child {
                Some(child) => self.tick_node(child),
                None => NodeResult::FatalError,
            },

            Dispatch::Inverter(child) => match child {
                Some(child) => match self.tick_node(child) {
                    NodeResult::Success => NodeResult::Failed,
                    NodeResult::Failed => NodeResult::Success,
                    other => other,
                },
                None => NodeResult::FatalError,
            },

            Dispatch::Successor(child) => match child {
                Some(child) => {
                    self.tick_node(child);
                    NodeResult::Success
                }
                None => NodeResult::FatalError,
            },

            // Re-tick the child while it keeps succeeding, up to `max`
            // times. The counter lives in the node but never survives a
            // completed cycle; max = 0 runs the child zero times.
            Dispatch::Repeater { child, max } => {
                let child = match child {
                    Some(child) => child,
                    None => return NodeResult::FatalError,
                };
                let mut count = 0;
                while count < max {
                    let result = self.tick_node(child);
                    if result != NodeResult::Success {
                        self.store_repeat_count(id, 0);
                        return result;
                    }
                    count += 1;
                    self.store_repeat_count(id, count);
                }
                self.store_repeat_count(id, 0);
                NodeResult::Success
            }
        }
    }

    fn leaf_entry(&mut self, id: NodeId) {
        let target = self.target;
        if let Some(node) = self.nodes.get_mut(&id) {
            let node_id = node.id();
            if let Exec::Leaf(leaf) = &mut node.exec {
                let mut ctx = Context::new(&mut self.blackboard, node_id, target);
                leaf.on_entry(&mut ctx);
            }
        }
    }

    fn leaf_update(&mut self, id: NodeId) -> NodeResult {
        let target = self.target;
        match self.nodes.get_mut(&id) {
            Some(node) => {
                let node_id = node.id();
                match &mut node.exec {
                    Exec::Leaf(leaf) => {
                        let mut ctx = Context::new(&mut self.blackboard, node_id, target);
                        leaf.on_update(&mut ctx)
                    }
                    _ => NodeResult::FatalError,
                }
            }
            None => NodeResult::FatalError,
        }
    }

    fn leaf_exit(&mut self, id: NodeId) {
        let target = self.target;
        if let Some(node) = self.nodes.get_mut(&id) {
            let node_id = node.id();
            if let Exec::Leaf(leaf) = &mut node.exec {
                let mut ctx = Context::new(&mut self.blackboard, node_id, target);
                leaf.on_exit(&mut ctx);
            }
        }
    }

    fn store_repeat_count(&mut self, id: NodeId, value: u32) {
        if let Some(node) = self.nodes.get_mut(&id) {
            if let Exec::Repeater { count, .. } = &mut node.exec {
                *count = value;
            }
        }
    }

    fn trace(&mut self, id: NodeId, phase: TracePhase) {
        if !self.tracing_on {
            return;
        }
        if let Some(node) = self.nodes.get(&id) {
            self.tracer.record(node.id(), node.name(), node.kind(), phase);
        }
    }
}
