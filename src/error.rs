//! Error types for graph loading and tree compilation.

use thiserror::Error;

/// Why a graph description could not be compiled into a tree.
///
/// Every structural defect an editor can save is reported here rather than
/// panicking mid-compile: the graph file is external input.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CompileError {
    /// A node names a type the registry has never heard of.
    #[error("unknown node type {type_name:?} on graph node {node}")]
    UnknownNodeType { node: i64, type_name: String },

    /// Two graph nodes carry the same editor id.
    #[error("duplicate graph node id {0}")]
    DuplicateNodeId(i64),

    /// Two pins in the graph carry the same editor id.
    #[error("duplicate pin id {0}")]
    DuplicatePin(i64),

    /// A node's outgoing link list names a link the graph does not define.
    #[error("graph node {node} references undefined link {link}")]
    DanglingLink { node: i64, link: i64 },

    /// A link ends at a pin no node owns.
    #[error("link {link} ends at undefined pin {pin}")]
    DanglingPin { link: i64, pin: i64 },

    /// A decorator has no outgoing link to hang its child on.
    #[error("decorator node {node} has no child link")]
    MissingChild { node: i64 },

    /// A decorator has more than one outgoing link.
    #[error("decorator node {node} has {count} outgoing links, expected one")]
    ExtraLinks { node: i64, count: usize },

    /// The same node is claimed as a child by two different parents, which
    /// would break single ownership of the tree shape.
    #[error("graph node {node} is linked as a child more than once")]
    ChildReused { node: i64 },

    /// The root node is linked as some node's child, which would make the
    /// root reachable from itself.
    #[error("root node {node} is linked as a child")]
    RootIsChild { node: i64 },

    /// A node that no chain of links connects to the root.
    #[error("graph node {node} is not reachable from the root")]
    UnreachableNode { node: i64 },

    /// More than one Root node in the graph.
    #[error("graph defines more than one root node")]
    MultipleRoots,

    /// No Root node in the graph.
    #[error("graph defines no root node")]
    MissingRoot,

    /// A leaf rejected its parameter map.
    #[error("node type {node}: missing or ill-typed parameter {param:?}")]
    BadParameter { node: String, param: &'static str },
}

/// Why a serialized graph description could not be read.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GraphError {
    #[error("failed to parse graph description: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
