//! # behavior-graph
//!
//! A behavior tree engine for driving per-entity AI inside a real-time
//! simulation loop.
//!
//! Trees are not assembled by hand. They are authored as a node graph in a
//! visual editor, saved as a flat collection of nodes, pins and links, and
//! compiled here into a strongly typed, executable [`Tree`]:
//!
//! ```yaml
//! nodes:
//!   - { id: 1, type: Root, outputs: [{ id: 10 }], outgoing_links: [100] }
//!   - id: 2
//!     type: Sequence
//!     inputs: [{ id: 20 }]
//!     outputs: [{ id: 21 }]
//!     outgoing_links: [101, 102]
//!   - { id: 3, type: DebugMessage, inputs: [{ id: 30 }], params: { message: "hello" } }
//!   - { id: 4, type: DebugMessage, inputs: [{ id: 40 }], params: { message: "world" } }
//! links:
//!   - { id: 100, start_pin_id: 10, end_pin_id: 20 }
//!   - { id: 101, start_pin_id: 21, end_pin_id: 30 }
//!   - { id: 102, start_pin_id: 21, end_pin_id: 40 }
//! ```
//!
//! ```rust
//! use behavior_graph::{compile, GraphDescription, NodeResult, Registry, TargetId};
//!
//! # fn main() -> anyhow::Result<()> {
//! # let yaml = r#"
//! # nodes:
//! #   - { id: 1, type: Root, outputs: [{ id: 10 }], outgoing_links: [100] }
//! #   - { id: 2, type: DebugMessage, inputs: [{ id: 20 }], params: { message: "hello" } }
//! # links:
//! #   - { id: 100, start_pin_id: 10, end_pin_id: 20 }
//! # "#;
//! let registry = Registry::default();
//! let graph = GraphDescription::from_yaml(yaml)?;
//! let mut tree = compile(&registry, &graph, TargetId(1))?;
//!
//! // One call per simulation frame.
//! assert_eq!(tree.execute(), NodeResult::Success);
//! # Ok(())
//! # }
//! ```
//!
//! ## Node kinds
//!
//! The structural taxonomy is closed: a node is a [`NodeKind::Leaf`] (a
//! concrete action or condition, the extension point), a
//! [`NodeKind::Composite`] with an ordered child list (`Sequence`,
//! `Selector`), or a [`NodeKind::Decorator`] with exactly one child (`Root`,
//! `Inverter`, `Successor`, `Repeater`). Composite and decorator semantics
//! are interpreted by the engine; only leaves carry user code.
//!
//! ## Defining your own leaf
//!
//! Implement [`LeafNode`] and register a constructor under a unique type
//! name. The graph description refers to nodes by that name.
//!
//! ```rust
//! use behavior_graph::{boxify, Context, LeafNode, NodeResult, Registry};
//!
//! #[derive(Default)]
//! struct WaitForAmmo;
//!
//! impl LeafNode for WaitForAmmo {
//!     fn on_update(&mut self, ctx: &mut Context) -> NodeResult {
//!         match ctx.blackboard().get_int("ammo") {
//!             Some(n) if n > 0 => NodeResult::Success,
//!             _ => NodeResult::Running,
//!         }
//!     }
//! }
//!
//! let mut registry = Registry::default();
//! registry.register("WaitForAmmo", boxify(WaitForAmmo::default));
//! ```
//!
//! A leaf that returns [`NodeResult::Running`] is not a suspended coroutine;
//! the whole tree is re-ticked from the root next frame and the leaf resumes
//! its own progress, typically from state it parked in the [`Blackboard`].
//!
//! ## Blackboard
//!
//! Each tree owns a [`Blackboard`]: four independent key/value tables for
//! integers, floats, bools and strings. Entries are either global (plain
//! string key) or scoped to a node id, so two nodes can use the same logical
//! name without aliasing. A lookup miss is an ordinary `None`, never an
//! error.
//!
//! ## Tracing
//!
//! With [`Tree::set_tracing`] enabled, every node visit emits ordered
//! entry/update/exit events into the tree's [`Tracer`] (and to the `tracing`
//! facade at TRACE level). The tracer accumulates across ticks until
//! [`Tracer::reset`] is called.

mod blackboard;
mod compiler;
mod context;
pub mod error;
mod graph;
mod nodes;
mod registry;
mod tracer;
mod tree;

use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicU32, Ordering};

use once_cell::sync::OnceCell;

pub use crate::blackboard::{Blackboard, Value, ValueKind};
pub use crate::compiler::compile;
pub use crate::context::Context;
pub use crate::error::{CompileError, GraphError};
pub use crate::graph::{GraphDescription, LinkDesc, NodeDesc, PinDesc};
pub use crate::nodes::{LeafNode, Node, Params};
pub use crate::registry::{boxify, LeafFactory, Registry};
pub use crate::tracer::{TraceEvent, TracePhase, Tracer};
pub use crate::tree::Tree;

/// The result of ticking a node, propagated upward through the tree.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum NodeResult {
    /// The node completed its action.
    Success,
    /// The node's work spans multiple ticks; re-tick the tree to make progress.
    Running,
    /// An ordinary, recoverable failure (e.g. a condition check that didn't hold).
    Failed,
    /// The node was never bound to a tree. Signals a construction bug, not a
    /// runtime failure; it is not retried or intercepted anywhere.
    FatalError,
}

/// Structural classification of a node. Closed set; it decides how the
/// compiler links a node and how the engine ticks it.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum NodeKind {
    Leaf,
    Composite,
    Decorator,
}

impl Display for NodeKind {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            NodeKind::Leaf => write!(fmt, "Leaf"),
            NodeKind::Composite => write!(fmt, "Composite"),
            NodeKind::Decorator => write!(fmt, "Decorator"),
        }
    }
}

/// Process-unique node id. Assigned from a monotonic counter at
/// instantiation and never reused, so scoped blackboard keys minted from an
/// id can never collide with those of another node, even across trees.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn next() -> NodeId {
        static COUNTER: OnceCell<AtomicU32> = OnceCell::new();
        let counter = COUNTER.get_or_init(|| AtomicU32::new(0));
        NodeId(counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "{}", self.0)
    }
}

/// Identifier of the entity a tree is driving. The host engine owns the
/// actual entity; the tree only carries the handle through to its leaves.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub struct TargetId(pub u64);

impl Display for TargetId {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "{}", self.0)
    }
}
