//! A hand-written `HashPb` routine, in the shape a code generator would emit,
//! must produce exactly the bytes of the reflective traversal.

use std::collections::HashMap;
use std::sync::OnceLock;

use proptest::prelude::*;
use protohash::encode;
use protohash::{DigestSink, HashError, HashPb, Hasher, IgnoreSet};
use protohash_schema::{
    DescriptorPool, DynamicMessage, FieldSchema, FileSchema, Kind, MessageSchema, Value,
};

const LEAF: &str = "protohash.parity.Leaf";
const NODE: &str = "protohash.parity.Node";

#[derive(Debug, Clone, Default)]
struct Leaf {
    bb: i32,
}

#[derive(Debug, Clone)]
enum Choice {
    Text(String),
    Leaf(Leaf),
}

#[derive(Debug, Clone, Default)]
struct Node {
    child: Option<Box<Node>>,
    label: String,
    weights: HashMap<String, i64>,
    flags: HashMap<bool, Leaf>,
    scores: Vec<f64>,
    opt: Option<i32>,
    choice: Option<Choice>,
    blob: Vec<u8>,
}

fn protohash_parity_leaf_sum(
    m: &Leaf,
    sink: &mut dyn DigestSink,
    ignore: &IgnoreSet,
) -> Result<(), HashError> {
    if !ignore.contains("protohash.parity.Leaf.bb") && m.bb != 0 {
        encode::write_int32(sink, m.bb);
    }
    Ok(())
}

fn protohash_parity_node_sum(
    m: &Node,
    sink: &mut dyn DigestSink,
    ignore: &IgnoreSet,
) -> Result<(), HashError> {
    if !ignore.contains("protohash.parity.Node.child") {
        if let Some(child) = &m.child {
            protohash_parity_node_sum(child, sink, ignore)?;
        }
    }
    if !ignore.contains("protohash.parity.Node.label") && !m.label.is_empty() {
        encode::write_string(sink, &m.label);
    }
    if !ignore.contains("protohash.parity.Node.weights") && !m.weights.is_empty() {
        let mut keys: Vec<&String> = m.weights.keys().collect();
        keys.sort();
        for key in keys {
            encode::write_sint64(sink, m.weights[key]);
        }
    }
    if !ignore.contains("protohash.parity.Node.flags") {
        for key in [false, true] {
            if let Some(leaf) = m.flags.get(&key) {
                protohash_parity_leaf_sum(leaf, sink, ignore)?;
            }
        }
    }
    if !ignore.contains("protohash.parity.Node.scores") {
        for score in &m.scores {
            encode::write_double(sink, *score);
        }
    }
    if !ignore.contains("protohash.parity.Node.opt") {
        if let Some(opt) = m.opt {
            encode::write_int32(sink, opt);
        }
    }
    if !ignore.contains("protohash.parity.Node.choice") {
        match &m.choice {
            Some(Choice::Text(text)) if !ignore.contains("protohash.parity.Node.text") => {
                encode::write_string(sink, text);
            }
            Some(Choice::Leaf(leaf)) if !ignore.contains("protohash.parity.Node.leaf") => {
                protohash_parity_leaf_sum(leaf, sink, ignore)?;
            }
            _ => {}
        }
    }
    if !ignore.contains("protohash.parity.Node.blob") && !m.blob.is_empty() {
        encode::write_bytes(sink, &m.blob);
    }
    Ok(())
}

impl HashPb for Leaf {
    fn hash_pb(&self, sink: &mut dyn DigestSink, ignore: &IgnoreSet) -> Result<(), HashError> {
        protohash_parity_leaf_sum(self, sink, ignore)
    }
}

impl HashPb for Node {
    fn hash_pb(&self, sink: &mut dyn DigestSink, ignore: &IgnoreSet) -> Result<(), HashError> {
        protohash_parity_node_sum(self, sink, ignore)
    }
}

fn pool() -> DescriptorPool {
    static POOL: OnceLock<DescriptorPool> = OnceLock::new();
    POOL.get_or_init(|| {
        DescriptorPool::build([FileSchema::new("protohash.parity")
            .message(MessageSchema::new("Leaf").field(FieldSchema::new("bb", 1, Kind::Int32)))
            .message(
                MessageSchema::new("Node")
                    .oneof("choice")
                    .field(FieldSchema::new("blob", 9, Kind::Bytes))
                    .field(FieldSchema::new("leaf", 8, Kind::Message(LEAF.into())).in_oneof("choice"))
                    .field(FieldSchema::new("text", 7, Kind::String).in_oneof("choice"))
                    .field(FieldSchema::new("opt", 6, Kind::Int32).optional())
                    .field(FieldSchema::new("scores", 5, Kind::Double).repeated())
                    .field(FieldSchema::new("flags", 4, Kind::Message(LEAF.into())).map(Kind::Bool))
                    .field(FieldSchema::new("weights", 3, Kind::Sint64).map(Kind::String))
                    .field(FieldSchema::new("label", 2, Kind::String))
                    .field(FieldSchema::new("child", 1, Kind::Message(NODE.into()))),
            )])
        .expect("parity schema is valid")
    })
    .clone()
}

fn leaf_to_dynamic(leaf: &Leaf) -> DynamicMessage {
    DynamicMessage::new(pool().message(LEAF).unwrap())
        .with("bb", leaf.bb)
        .unwrap()
}

/// Mirrors the typed value into a dynamic message, storing every field the
/// way a decoder would: implicit fields always, explicit ones only when set.
fn node_to_dynamic(node: &Node) -> DynamicMessage {
    let mut m = DynamicMessage::new(pool().message(NODE).unwrap());
    if let Some(child) = &node.child {
        m.set("child", node_to_dynamic(child)).unwrap();
    }
    m.set("label", node.label.as_str()).unwrap();
    m.set(
        "weights",
        node.weights
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect::<Value>(),
    )
    .unwrap();
    m.set(
        "flags",
        node.flags
            .iter()
            .map(|(k, v)| (*k, leaf_to_dynamic(v)))
            .collect::<Value>(),
    )
    .unwrap();
    m.set("scores", Value::list(node.scores.iter().copied()))
        .unwrap();
    if let Some(opt) = node.opt {
        m.set("opt", opt).unwrap();
    }
    match &node.choice {
        Some(Choice::Text(text)) => m.set("text", text.as_str()).unwrap(),
        Some(Choice::Leaf(leaf)) => m.set("leaf", leaf_to_dynamic(leaf)).unwrap(),
        None => {}
    }
    m.set("blob", node.blob.clone()).unwrap();
    m
}

fn sample(level: usize) -> Node {
    Node {
        child: None,
        label: format!("level-{level}"),
        weights: [("b", -2), ("a", 1), ("ab", 300)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v * level as i64))
            .collect(),
        flags: [(true, Leaf { bb: 1 }), (false, Leaf { bb: -1 })]
            .into_iter()
            .collect(),
        scores: vec![0.5, -0.0, f64::INFINITY],
        opt: if level % 2 == 0 { Some(0) } else { None },
        choice: Some(if level % 2 == 0 {
            Choice::Text(String::new())
        } else {
            Choice::Leaf(Leaf { bb: level as i32 })
        }),
        blob: vec![level as u8; level],
    }
}

/// Three levels of self-nesting, each with its own payload.
fn three_levels() -> Node {
    let mut innermost = sample(3);
    innermost.child = None;
    let mut middle = sample(2);
    middle.child = Some(Box::new(innermost));
    let mut root = sample(1);
    root.child = Some(Box::new(middle));
    root
}

fn compiled_bytes(node: &Node, ignore: &IgnoreSet) -> Vec<u8> {
    let mut recorded: Vec<u8> = Vec::new();
    node.hash_pb(&mut recorded, ignore).unwrap();
    recorded
}

fn reflective_bytes(node: &Node, ignore: &IgnoreSet) -> Vec<u8> {
    let mut recorded: Vec<u8> = Vec::new();
    node_to_dynamic(node).hash_pb(&mut recorded, ignore).unwrap();
    recorded
}

#[test]
fn self_nested_message_matches_reflective_bytes() {
    let node = three_levels();
    let ignore = IgnoreSet::new();
    let compiled = compiled_bytes(&node, &ignore);
    assert!(!compiled.is_empty());
    assert_eq!(compiled, reflective_bytes(&node, &ignore));
}

#[test]
fn parity_holds_under_ignore_sets() {
    let node = three_levels();
    for names in [
        vec!["protohash.parity.Node.child"],
        vec!["protohash.parity.Node.choice"],
        vec!["protohash.parity.Node.leaf", "protohash.parity.Node.weights"],
        vec!["protohash.parity.Leaf.bb", "protohash.parity.Node.scores"],
    ] {
        let ignore = IgnoreSet::from_names(names.clone()).unwrap();
        assert_eq!(
            compiled_bytes(&node, &ignore),
            reflective_bytes(&node, &ignore),
            "ignoring {names:?}"
        );
    }
}

#[test]
fn default_values_write_nothing_on_both_paths() {
    let node = Node::default();
    let ignore = IgnoreSet::new();
    assert!(compiled_bytes(&node, &ignore).is_empty());
    assert!(reflective_bytes(&node, &ignore).is_empty());
}

#[test]
fn absent_compiled_message_writes_nothing() {
    let none: Option<Node> = None;
    let mut recorded: Vec<u8> = Vec::new();
    none.hash_pb(&mut recorded, &IgnoreSet::new()).unwrap();
    assert!(recorded.is_empty());
}

#[test]
fn compiled_bytes_feed_the_same_digest() {
    let node = three_levels();
    let mut sink = protohash::Xxh64Sink::new();
    node.hash_pb(&mut sink, &IgnoreSet::new()).unwrap();
    let compiled = sink.finish_u64().unwrap();
    let reflective = Hasher::new().sum64(&node_to_dynamic(&node)).unwrap();
    assert_eq!(compiled, reflective);
}

fn arb_leaf() -> impl Strategy<Value = Leaf> {
    any::<i32>().prop_map(|bb| Leaf { bb })
}

fn arb_node() -> impl Strategy<Value = Node> {
    let flat = (
        "[ -~]{0,8}",
        prop::collection::hash_map("[a-z]{0,4}", any::<i64>(), 0..6),
        prop::collection::hash_map(any::<bool>(), arb_leaf(), 0..3),
        prop::collection::vec(any::<f64>(), 0..4),
        prop::option::of(any::<i32>()),
        prop::option::of(prop_oneof![
            "[ -~]{0,8}".prop_map(Choice::Text),
            arb_leaf().prop_map(Choice::Leaf),
        ]),
        prop::collection::vec(any::<u8>(), 0..6),
    )
        .prop_map(|(label, weights, flags, scores, opt, choice, blob)| Node {
            child: None,
            label,
            weights,
            flags,
            scores,
            opt,
            choice,
            blob,
        });
    flat.prop_recursive(3, 8, 1, |inner| {
        (inner.clone(), inner).prop_map(|(mut parent, child)| {
            parent.child = Some(Box::new(child));
            parent
        })
    })
}

proptest! {
    #[test]
    fn arbitrary_nodes_match_reflective_bytes(node in arb_node()) {
        let ignore = IgnoreSet::new();
        prop_assert_eq!(compiled_bytes(&node, &ignore), reflective_bytes(&node, &ignore));
    }
}
