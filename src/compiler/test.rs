use super::*;
use crate::blackboard::Value;
use crate::graph::PinDesc;
use crate::{NodeKind, NodeResult};

// Pin ids derive from node ids: input = id * 10, output = id * 10 + 1.
fn node(id: i64, type_name: &str, links: &[i64]) -> NodeDesc {
    NodeDesc {
        id,
        type_name: type_name.to_owned(),
        inputs: vec![PinDesc { id: id * 10 }],
        outputs: vec![PinDesc { id: id * 10 + 1 }],
        outgoing_links: links.to_vec(),
        ..Default::default()
    }
}

fn link(id: i64, from: i64, to: i64) -> LinkDesc {
    LinkDesc {
        id,
        start_pin_id: from * 10 + 1,
        end_pin_id: to * 10,
    }
}

fn graph(nodes: Vec<NodeDesc>, links: Vec<LinkDesc>) -> GraphDescription {
    GraphDescription { nodes, links }
}

#[test]
fn test_compile_and_execute() {
    let mut set = node(3, "SetInt", &[]);
    set.params
        .insert("key".to_owned(), Value::Str("ammo".to_owned()));
    set.params.insert("value".to_owned(), Value::Int(6));

    let mut check = node(4, "BlackboardCompare", &[]);
    check
        .params
        .insert("key".to_owned(), Value::Str("ammo".to_owned()));
    check.params.insert("value".to_owned(), Value::Int(6));

    let graph = graph(
        vec![
            node(1, "Root", &[100]),
            node(2, "Sequence", &[101, 102]),
            set,
            check,
        ],
        vec![link(100, 1, 2), link(101, 2, 3), link(102, 2, 4)],
    );

    let registry = Registry::default();
    let mut tree = compile(&registry, &graph, TargetId(9)).unwrap();
    assert_eq!(tree.name(), "BT-ID-9");

    assert_eq!(tree.execute(), NodeResult::Success);
    assert_eq!(tree.blackboard().get_int("ammo"), Some(6));
}

#[test]
fn test_child_order_follows_link_list_not_declaration() {
    // Links are declared in reverse; outgoing_links decides the order.
    let mut set = node(3, "SetInt", &[]);
    set.params
        .insert("key".to_owned(), Value::Str("x".to_owned()));
    set.params.insert("value".to_owned(), Value::Int(1));

    let mut check = node(4, "BlackboardCompare", &[]);
    check
        .params
        .insert("key".to_owned(), Value::Str("x".to_owned()));
    check.params.insert("value".to_owned(), Value::Int(1));

    let graph = graph(
        vec![
            node(1, "Root", &[100]),
            // outgoing_links runs the write (3) before the check (4), even
            // though the link list below declares them the other way around.
            node(2, "Sequence", &[101, 102]),
            check,
            set,
        ],
        vec![link(102, 2, 4), link(101, 2, 3), link(100, 1, 2)],
    );

    let registry = Registry::default();
    let mut tree = compile(&registry, &graph, TargetId(1)).unwrap();
    assert_eq!(tree.execute(), NodeResult::Success);

    let root = tree.node(tree.root()).unwrap();
    assert_eq!(root.kind(), NodeKind::Decorator);
    let seq = tree.node(root.children()[0]).unwrap();
    assert_eq!(seq.children().len(), 2);
}

#[test]
fn test_reversed_link_order_reverses_children() {
    let mut set = node(3, "SetInt", &[]);
    set.params
        .insert("key".to_owned(), Value::Str("x".to_owned()));
    set.params.insert("value".to_owned(), Value::Int(1));

    let mut check = node(4, "BlackboardCompare", &[]);
    check
        .params
        .insert("key".to_owned(), Value::Str("x".to_owned()));
    check.params.insert("value".to_owned(), Value::Int(1));

    // Same graph as above with the sequence's outgoing_links flipped: now the
    // check runs before the write and the sequence fails.
    let graph = graph(
        vec![
            node(1, "Root", &[100]),
            node(2, "Sequence", &[102, 101]),
            check,
            set,
        ],
        vec![link(102, 2, 4), link(101, 2, 3), link(100, 1, 2)],
    );

    let mut tree = compile(&Registry::default(), &graph, TargetId(1)).unwrap();
    assert_eq!(tree.execute(), NodeResult::Failed);
}

#[test]
fn test_node_names_fall_back_to_type() {
    let mut named = node(2, "Sequence", &[]);
    named.name = Some("patrol".to_owned());

    let graph = graph(
        vec![node(1, "Root", &[100]), named],
        vec![link(100, 1, 2)],
    );

    let tree = compile(&Registry::default(), &graph, TargetId(1)).unwrap();
    let root = tree.node(tree.root()).unwrap();
    assert_eq!(root.name(), "Root");
    let seq = tree.node(root.children()[0]).unwrap();
    assert_eq!(seq.name(), "patrol");
}

#[test]
fn test_unknown_node_type() {
    let graph = graph(vec![node(1, "Root", &[]), node(2, "Teleport", &[])], vec![]);
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(
        err,
        CompileError::UnknownNodeType { node: 2, ref type_name } if type_name == "Teleport"
    ));
}

#[test]
fn test_duplicate_node_id() {
    let mut second = node(1, "Sequence", &[]);
    second.inputs = vec![PinDesc { id: 50 }];
    second.outputs = vec![PinDesc { id: 51 }];

    let graph = graph(vec![node(1, "Root", &[]), second], vec![]);
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(err, CompileError::DuplicateNodeId(1)));
}

#[test]
fn test_duplicate_pin() {
    let mut clashing = node(2, "Sequence", &[]);
    clashing.inputs = vec![PinDesc { id: 10 }];

    let graph = graph(vec![node(1, "Root", &[]), clashing], vec![]);
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(err, CompileError::DuplicatePin(10)));
}

#[test]
fn test_dangling_link() {
    let graph = graph(
        vec![node(1, "Root", &[100]), node(2, "Sequence", &[])],
        vec![],
    );
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(err, CompileError::DanglingLink { node: 1, link: 100 }));
}

#[test]
fn test_dangling_pin() {
    let graph = graph(
        vec![node(1, "Root", &[100]), node(2, "Sequence", &[])],
        vec![link(100, 1, 7)],
    );
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(err, CompileError::DanglingPin { link: 100, pin: 70 }));
}

#[test]
fn test_decorator_without_child() {
    let graph = graph(
        vec![node(1, "Root", &[100]), node(2, "Inverter", &[])],
        vec![link(100, 1, 2)],
    );
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(err, CompileError::MissingChild { node: 2 }));
}

#[test]
fn test_decorator_with_two_children() {
    let graph = graph(
        vec![
            node(1, "Root", &[100]),
            node(2, "Inverter", &[101, 102]),
            node(3, "Sequence", &[]),
            node(4, "Sequence", &[]),
        ],
        vec![link(100, 1, 2), link(101, 2, 3), link(102, 2, 4)],
    );
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(err, CompileError::ExtraLinks { node: 2, count: 2 }));
}

#[test]
fn test_child_claimed_twice() {
    let graph = graph(
        vec![
            node(1, "Root", &[100]),
            node(2, "Sequence", &[101, 102]),
            node(3, "Selector", &[]),
        ],
        vec![link(100, 1, 2), link(101, 2, 3), link(102, 2, 3)],
    );
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(err, CompileError::ChildReused { node: 3 }));
}

#[test]
fn test_multiple_roots() {
    let graph = graph(vec![node(1, "Root", &[]), node(2, "Root", &[])], vec![]);
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(err, CompileError::MultipleRoots));
}

#[test]
fn test_missing_root() {
    let graph = graph(vec![node(1, "Sequence", &[])], vec![]);
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(err, CompileError::MissingRoot));
}

#[test]
fn test_root_linked_as_child() {
    let graph = graph(
        vec![node(1, "Root", &[100]), node(2, "Sequence", &[101])],
        vec![link(100, 1, 2), link(101, 2, 1)],
    );
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(err, CompileError::RootIsChild { node: 1 }));
}

#[test]
fn test_disconnected_node_is_rejected() {
    // Node 3 has no link path from the root.
    let graph = graph(
        vec![
            node(1, "Root", &[100]),
            node(2, "Sequence", &[]),
            node(3, "Selector", &[]),
        ],
        vec![link(100, 1, 2)],
    );
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(err, CompileError::UnreachableNode { node: 3 }));
}

#[test]
fn test_disconnected_cycle_is_rejected() {
    // Nodes 3 and 4 link each other but nothing links them to the root.
    let graph = graph(
        vec![
            node(1, "Root", &[100]),
            node(2, "Sequence", &[]),
            node(3, "Successor", &[101]),
            node(4, "Successor", &[102]),
        ],
        vec![link(100, 1, 2), link(101, 3, 4), link(102, 4, 3)],
    );
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(err, CompileError::UnreachableNode { .. }));
}

#[test]
fn test_repeater_max_parameter() {
    let mut rep = node(2, "Repeater", &[101]);
    rep.params.insert("max".to_owned(), Value::Int(2));

    let mut set = node(3, "SetInt", &[]);
    set.params
        .insert("key".to_owned(), Value::Str("x".to_owned()));
    set.params.insert("value".to_owned(), Value::Int(1));

    let graph = graph(
        vec![node(1, "Root", &[100]), rep, set],
        vec![link(100, 1, 2), link(101, 2, 3)],
    );

    let mut tree = compile(&Registry::default(), &graph, TargetId(1)).unwrap();
    assert_eq!(tree.execute(), NodeResult::Success);
    assert_eq!(tree.blackboard().get_int("x"), Some(1));
}

#[test]
fn test_repeater_rejects_negative_max() {
    let mut rep = node(2, "Repeater", &[101]);
    rep.params.insert("max".to_owned(), Value::Int(-1));

    let graph = graph(
        vec![node(1, "Root", &[100]), rep, node(3, "Sequence", &[])],
        vec![link(100, 1, 2), link(101, 2, 3)],
    );
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(
        err,
        CompileError::BadParameter { param: "max", .. }
    ));
}

#[test]
fn test_leaf_configure_failure_aborts_compile() {
    // SetInt without its value parameter.
    let mut set = node(2, "SetInt", &[]);
    set.params
        .insert("key".to_owned(), Value::Str("x".to_owned()));

    let graph = graph(
        vec![node(1, "Root", &[100]), set],
        vec![link(100, 1, 2)],
    );
    let err = compile(&Registry::default(), &graph, TargetId(1)).unwrap_err();
    assert!(matches!(
        err,
        CompileError::BadParameter { param: "value", .. }
    ));
}
