//! Operator nodes and their wiring
//!
//! - `kinds`: the concrete operator kinds per category
//! - `catalog`: per-kind property descriptor tables and live values
//!
//! A node can only be built with all of its inputs, so every node that exists
//! is fully wired. Inputs are shared handles: a node may feed several
//! consumers, and replacing a registry entry leaves existing consumers intact.

pub mod catalog;
pub mod kinds;

use std::cell::{Ref, RefCell, RefMut};
use std::fmt::{self, Write as _};
use std::rc::Rc;

pub use catalog::{Properties, PropertyDescriptor, PropertyKind, PropertyValue};
pub use kinds::{Category, GeneratorKind, MergerEffectKind, MultiEffectKind, NodeKind, SingleEffectKind};

use crate::errors::Result;
use crate::types::Resolution;

/// Graph inputs of a node, shaped by its category
#[derive(Debug, Clone)]
pub enum Inputs {
    Generator { resolution: Resolution },
    Single { input: NodeRef },
    Merger { a: NodeRef, b: NodeRef },
    Multi { inputs: Vec<NodeRef> },
}

#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    inputs: Inputs,
    properties: Properties,
}

impl Node {
    pub fn generator(kind: GeneratorKind, resolution: Resolution) -> Node {
        Node::with_inputs(NodeKind::Generator(kind), Inputs::Generator { resolution })
    }

    pub fn single(kind: SingleEffectKind, input: NodeRef) -> Node {
        Node::with_inputs(NodeKind::SingleEffect(kind), Inputs::Single { input })
    }

    pub fn merger(kind: MergerEffectKind, a: NodeRef, b: NodeRef) -> Node {
        Node::with_inputs(NodeKind::MergerEffect(kind), Inputs::Merger { a, b })
    }

    /// Returns `None` for an empty input list; multi effects need at least one.
    pub fn multi(kind: MultiEffectKind, inputs: Vec<NodeRef>) -> Option<Node> {
        if inputs.is_empty() {
            return None;
        }
        Some(Node::with_inputs(NodeKind::MultiEffect(kind), Inputs::Multi { inputs }))
    }

    fn with_inputs(kind: NodeKind, inputs: Inputs) -> Node {
        Node {
            kind,
            inputs,
            properties: Properties::new(kind.properties()),
        }
    }

    /// Builder-style property override used when constructing nodes.
    pub fn with(mut self, property: &str, value: PropertyValue) -> Result<Node> {
        self.properties.set(property, value)?;
        Ok(self)
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// Output resolution for generators
    pub fn resolution(&self) -> Option<Resolution> {
        match self.inputs {
            Inputs::Generator { resolution } => Some(resolution),
            _ => None,
        }
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub fn get(&self, property: &str) -> Option<PropertyValue> {
        self.properties.get(property)
    }
}

/// Shared handle to a node
///
/// Equality is identity: two handles are equal when they point at the same node.
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<Node>>);

impl NodeRef {
    pub fn new(node: Node) -> NodeRef {
        NodeRef(Rc::new(RefCell::new(node)))
    }

    pub fn borrow(&self) -> Ref<'_, Node> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Node> {
        self.0.borrow_mut()
    }

    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Indented tree of this node and everything upstream of it
    pub fn outline(&self) -> String {
        let mut out = String::new();
        write_outline(&mut out, self, None, 0);
        out
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &NodeRef) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({})", self.borrow().kind().name())
    }
}

impl From<Node> for NodeRef {
    fn from(node: Node) -> Self {
        NodeRef::new(node)
    }
}

fn write_outline(out: &mut String, node: &NodeRef, label: Option<&str>, depth: usize) {
    let node = node.borrow();
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}");
    if let Some(label) = label {
        let _ = write!(out, "{label}: ");
    }
    let _ = write!(out, "{}", node.kind().name());
    if let Some(res) = node.resolution() {
        let _ = write!(out, " {res}");
    }
    if let Some(mode @ PropertyValue::Enum(_)) = node.get("mode") {
        let _ = write!(out, " {mode}");
    }
    out.push('\n');

    match node.inputs() {
        Inputs::Generator { .. } => {}
        Inputs::Single { input } => write_outline(out, input, None, depth + 1),
        Inputs::Merger { a, b } => {
            write_outline(out, a, Some("a"), depth + 1);
            write_outline(out, b, Some("b"), depth + 1);
        }
        Inputs::Multi { inputs } => {
            for (i, input) in inputs.iter().enumerate() {
                write_outline(out, input, Some(&i.to_string()), depth + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noise() -> NodeRef {
        Node::generator(GeneratorKind::Noise, Resolution::square(64)).into()
    }

    #[test]
    fn new_nodes_start_at_defaults() {
        let node = noise();
        assert_eq!(node.borrow().get("scale"), Some(PropertyValue::Float(1.0)));
        assert_eq!(node.borrow().get("seed"), Some(PropertyValue::Int(1)));
        assert_eq!(node.borrow().resolution(), Some(Resolution::square(64)));
    }

    #[test]
    fn multi_needs_an_input() {
        assert!(Node::multi(MultiEffectKind::Stack, Vec::new()).is_none());
        assert!(Node::multi(MultiEffectKind::Stack, vec![noise()]).is_some());
    }

    #[test]
    fn shared_input_sees_mutation() {
        let source = noise();
        let blurred: NodeRef = Node::single(SingleEffectKind::Blur, source.clone()).into();
        source
            .borrow_mut()
            .properties_mut()
            .set("scale", PropertyValue::Float(3.0))
            .unwrap();
        match blurred.borrow().inputs() {
            Inputs::Single { input } => {
                assert!(input.ptr_eq(&source));
                assert_eq!(input.borrow().get("scale"), Some(PropertyValue::Float(3.0)));
            }
            other => panic!("unexpected inputs: {other:?}"),
        }
    }

    #[test]
    fn outline_shows_inputs() {
        let a = noise();
        let b: NodeRef = Node::generator(GeneratorKind::Color, Resolution::square(1)).into();
        let blend: NodeRef = Node::merger(MergerEffectKind::Blend, a, b).into();
        let sum: NodeRef = Node::multi(MultiEffectKind::Stack, vec![blend]).unwrap().into();
        insta::assert_snapshot!(sum.outline().trim_end(), @r"
        stack
          0: blend .add
            a: noise 64x64
            b: color 1x1
        ");
    }
}
