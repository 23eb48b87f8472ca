//! Turns an editor graph description into an executable [`Tree`].
//!
//! Compilation runs in two phases. The first instantiates every graph node
//! through the registry, configures leaves from their parameter maps and
//! binds each node to the tree being built. The second resolves every
//! node's ordered outgoing links through the pin table and wires children
//! into their parents. Any structural defect aborts with a
//! [`CompileError`]; a tree that compiles is guaranteed acyclic from the
//! root and safe to tick.

use std::collections::{HashMap, HashSet};
use std::convert::TryFrom;

use crate::blackboard::Blackboard;
use crate::error::CompileError;
use crate::graph::{GraphDescription, LinkDesc, NodeDesc};
use crate::nodes::{Exec, Node};
use crate::registry::{NodeTemplate, Registry};
use crate::{NodeId, TargetId};
use crate::tree::Tree;

/// Compiles `graph` into a tree bound to `target`.
pub fn compile(
    registry: &Registry,
    graph: &GraphDescription,
    target: TargetId,
) -> Result<Tree, CompileError> {
    let links = index_links(graph);
    let pin_owners = index_pins(graph)?;

    let mut blackboard = Blackboard::new();
    let mut nodes: HashMap<NodeId, Node> = HashMap::new();
    let mut by_graph_id: HashMap<i64, NodeId> = HashMap::new();
    let mut root_graph_id: Option<i64> = None;

    // Phase one. Instantiate everything before wiring anything, so links can
    // point at nodes declared later in the file.
    for desc in &graph.nodes {
        let exec = match registry.template(&desc.type_name) {
            Some(NodeTemplate::Root) => {
                if root_graph_id.replace(desc.id).is_some() {
                    return Err(CompileError::MultipleRoots);
                }
                Exec::Root(None)
            }
            Some(NodeTemplate::Sequence) => Exec::Sequence(vec![]),
            Some(NodeTemplate::Selector) => Exec::Selector(vec![]),
            Some(NodeTemplate::Inverter) => Exec::Inverter(None),
            Some(NodeTemplate::Successor) => Exec::Successor(None),
            Some(NodeTemplate::Repeater) => Exec::Repeater {
                child: None,
                max: repeat_max(desc)?,
                count: 0,
            },
            Some(NodeTemplate::Leaf(factory)) => {
                let mut leaf = factory();
                leaf.on_configure(&desc.params)?;
                leaf.on_tree_build(&mut blackboard);
                Exec::Leaf(leaf)
            }
            None => {
                return Err(CompileError::UnknownNodeType {
                    node: desc.id,
                    type_name: desc.type_name.clone(),
                })
            }
        };

        let name = desc.name.clone().unwrap_or_else(|| desc.type_name.clone());
        let mut node = Node::new(name, exec);
        node.bind();

        if by_graph_id.insert(desc.id, node.id()).is_some() {
            return Err(CompileError::DuplicateNodeId(desc.id));
        }
        nodes.insert(node.id(), node);
    }

    // Phase two. Resolve each node's ordered links into child handles.
    let mut claimed: HashSet<i64> = HashSet::new();
    for desc in &graph.nodes {
        let id = by_graph_id[&desc.id];
        let kind = nodes[&id].kind();
        if kind == crate::NodeKind::Leaf {
            continue;
        }

        let mut children = Vec::with_capacity(desc.outgoing_links.len());
        for &link_id in &desc.outgoing_links {
            let link = links
                .get(&link_id)
                .ok_or(CompileError::DanglingLink {
                    node: desc.id,
                    link: link_id,
                })?;
            let child_graph_id =
                *pin_owners
                    .get(&link.end_pin_id)
                    .ok_or(CompileError::DanglingPin {
                        link: link_id,
                        pin: link.end_pin_id,
                    })?;
            if !claimed.insert(child_graph_id) {
                return Err(CompileError::ChildReused {
                    node: child_graph_id,
                });
            }
            children.push(by_graph_id[&child_graph_id]);
        }

        if let Some(node) = nodes.get_mut(&id) {
            match &mut node.exec {
                Exec::Sequence(slots) | Exec::Selector(slots) => *slots = children,
                Exec::Root(slot) | Exec::Inverter(slot) | Exec::Successor(slot) => {
                    *slot = Some(single_child(desc, &children)?)
                }
                Exec::Repeater { child, .. } => *child = Some(single_child(desc, &children)?),
                Exec::Leaf(_) => {}
            }
        }
    }

    let root_graph_id = root_graph_id.ok_or(CompileError::MissingRoot)?;
    if claimed.contains(&root_graph_id) {
        return Err(CompileError::RootIsChild {
            node: root_graph_id,
        });
    }
    let root = by_graph_id[&root_graph_id];

    // Every node must hang off the root; a disconnected component would sit
    // in the arena and never tick.
    let mut reachable: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if reachable.insert(id) {
            if let Some(node) = nodes.get(&id) {
                stack.extend(node.children());
            }
        }
    }
    for desc in &graph.nodes {
        if !reachable.contains(&by_graph_id[&desc.id]) {
            return Err(CompileError::UnreachableNode { node: desc.id });
        }
    }

    let tree = Tree::from_parts(target, root, nodes, blackboard);
    tracing::debug!(
        "compiled {} with {} nodes",
        tree.name(),
        graph.nodes.len()
    );
    Ok(tree)
}

fn index_links(graph: &GraphDescription) -> HashMap<i64, &LinkDesc> {
    graph.links.iter().map(|link| (link.id, link)).collect()
}

fn index_pins(graph: &GraphDescription) -> Result<HashMap<i64, i64>, CompileError> {
    let mut owners = HashMap::new();
    for desc in &graph.nodes {
        for pin in desc.inputs.iter().chain(desc.outputs.iter()) {
            if owners.insert(pin.id, desc.id).is_some() {
                return Err(CompileError::DuplicatePin(pin.id));
            }
        }
    }
    Ok(owners)
}

fn single_child(desc: &NodeDesc, children: &[NodeId]) -> Result<NodeId, CompileError> {
    match children {
        [child] => Ok(*child),
        [] => Err(CompileError::MissingChild { node: desc.id }),
        _ => Err(CompileError::ExtraLinks {
            node: desc.id,
            count: children.len(),
        }),
    }
}

fn repeat_max(desc: &NodeDesc) -> Result<u32, CompileError> {
    match desc.params.get("max") {
        None => Ok(0),
        Some(value) => value
            .as_int()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or(CompileError::BadParameter {
                node: "Repeater".to_owned(),
                param: "max",
            }),
    }
}

#[cfg(test)]
mod test;
