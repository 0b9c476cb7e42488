//! The metadata node abstraction.
//!
//! One arena-backed tree serves both concrete syntaxes. Every parser in
//! this crate operates only through the capability set {kind, text,
//! children, child-by-index, child count, first-child-of-kind, parent};
//! nothing downstream may assume which syntax produced the tree.
//!
//! Trees are append-only while a front end builds them and immutable
//! afterward. The TSDL front end builds through [`TreeBuilder`]; the CTF2
//! adapter in [`crate::json`] builds from parsed JSON fragments.

use serde_json::Value;

use crate::json::ClockFragment;
use crate::kind::NodeKind;

/// Which concrete syntax produced a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Syntax {
    /// The text description language, materialized by the grammar front end.
    Tsdl,
    /// CTF2 JSON metadata fragments.
    Ctf2Json,
}

/// Index of a node within its [`MetadataTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// JSON-only data carried by some CTF2 nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonPayload {
    /// A structure/variant member or a standalone field class: its name
    /// and raw `field-class` value.
    Member(MemberPayload),
    /// A field-class-alias fragment: the alias name and its field class.
    Alias(AliasPayload),
    /// A clock-class fragment.
    Clock(ClockFragment),
}

/// Payload of a [`NodeKind::StructureFieldMember`] node.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberPayload {
    /// Member name.
    pub name: String,
    /// The raw `field-class` property: an object, or a string naming a
    /// previously declared field-class alias.
    pub field_class: Value,
}

impl MemberPayload {
    /// The `type` tag of the field class, when it is an object.
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        self.field_class.get("type").and_then(Value::as_str)
    }

    /// The first role attached to the field class, if any.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.field_class
            .get("roles")
            .and_then(Value::as_array)
            .and_then(|roles| roles.first())
            .and_then(Value::as_str)
    }
}

/// Payload of a [`NodeKind::FieldClassAlias`] node.
#[derive(Clone, Debug, PartialEq)]
pub struct AliasPayload {
    /// Alias name, referenced by string field classes elsewhere in the
    /// document.
    pub name: String,
    /// The aliased field class object.
    pub field_class: Value,
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    payload: Option<JsonPayload>,
}

/// An immutable metadata tree plus the syntax that produced it.
#[derive(Debug)]
pub struct MetadataTree {
    syntax: Syntax,
    nodes: Vec<NodeData>,
}

impl MetadataTree {
    /// The syntax this tree was built from.
    #[must_use]
    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    /// The kind discriminant of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    /// The text payload of a leaf, if any.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).text.as_deref()
    }

    /// The parent node; `None` only for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// All children, in insertion order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// The child at `index`, if present.
    #[must_use]
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.node(id).children.get(index).copied()
    }

    /// Number of children.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.node(id).children.len()
    }

    /// The first child with the given kind, if any.
    #[must_use]
    pub fn first_child_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.kind(child) == kind)
    }

    /// Member payload of a CTF2 structure-field-member node.
    #[must_use]
    pub fn member(&self, id: NodeId) -> Option<&MemberPayload> {
        match self.node(id).payload.as_ref() {
            Some(JsonPayload::Member(member)) => Some(member),
            _ => None,
        }
    }

    /// Alias payload of a CTF2 field-class-alias node.
    #[must_use]
    pub fn field_class_alias(&self, id: NodeId) -> Option<&AliasPayload> {
        match self.node(id).payload.as_ref() {
            Some(JsonPayload::Alias(alias)) => Some(alias),
            _ => None,
        }
    }

    /// Clock payload of a CTF2 clock-class node.
    #[must_use]
    pub fn clock_class(&self, id: NodeId) -> Option<&ClockFragment> {
        match self.node(id).payload.as_ref() {
            Some(JsonPayload::Clock(clock)) => Some(clock),
            _ => None,
        }
    }
}

/// Append-only construction surface handed to the front ends.
///
/// The builder starts with a [`NodeKind::Root`] node already in place.
#[derive(Debug)]
pub struct TreeBuilder {
    tree: MetadataTree,
}

impl TreeBuilder {
    /// Starts a tree for the given syntax.
    #[must_use]
    pub fn new(syntax: Syntax) -> Self {
        Self {
            tree: MetadataTree {
                syntax,
                nodes: vec![NodeData {
                    kind: NodeKind::Root,
                    text: None,
                    parent: None,
                    children: Vec::new(),
                    payload: None,
                }],
            },
        }
    }

    /// Starts a TSDL tree.
    #[must_use]
    pub fn tsdl() -> Self {
        Self::new(Syntax::Tsdl)
    }

    /// The root node of the tree under construction.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn push(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        text: Option<String>,
        payload: Option<JsonPayload>,
    ) -> NodeId {
        let id = NodeId(u32::try_from(self.tree.nodes.len()).expect("tree exceeds u32 nodes"));
        self.tree.nodes.push(NodeData {
            kind,
            text,
            parent: Some(parent),
            children: Vec::new(),
            payload,
        });
        self.tree.nodes[parent.index()].children.push(id);
        id
    }

    /// Appends an interior node under `parent`.
    pub fn add(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        self.push(parent, kind, None, None)
    }

    /// Appends a leaf node carrying text under `parent`.
    pub fn add_text(&mut self, parent: NodeId, kind: NodeKind, text: impl Into<String>) -> NodeId {
        self.push(parent, kind, Some(text.into()), None)
    }

    /// Appends a node carrying a JSON payload under `parent`.
    pub(crate) fn add_payload(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        payload: JsonPayload,
    ) -> NodeId {
        self.push(parent, kind, None, Some(payload))
    }

    /// Finishes construction; the tree is immutable from here on.
    #[must_use]
    pub fn finish(self) -> MetadataTree {
        self.tree
    }
}
