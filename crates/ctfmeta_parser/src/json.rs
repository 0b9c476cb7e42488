//! CTF2 JSON metadata adapter.
//!
//! Builds a [`MetadataTree`] out of parsed CTF2 fragments so that every
//! declaration parser sees the same capability set it sees for TSDL.
//! Fragment headers deserialize into typed structs; raw `field-class`
//! objects stay as [`serde_json::Value`] payloads and are interpreted by
//! the individual declaration parsers.
//!
//! Structure and variant field classes are materialized eagerly: their
//! members become [`NodeKind::StructureFieldMember`] children, and each
//! nested structure becomes a [`NodeKind::StructureField`] child of its
//! member. This keeps the composite parsers free of any JSON traversal.

use ctfmeta_model::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::kind::NodeKind;
use crate::tree::{AliasPayload, JsonPayload, MemberPayload, MetadataTree, NodeId, Syntax, TreeBuilder};

/// Fragment `type` tags.
mod fragment {
    pub const PREAMBLE: &str = "preamble";
    pub const TRACE: &str = "trace-class";
    pub const CLOCK: &str = "clock-class";
    pub const FIELD_ALIAS: &str = "field-class-alias";
    pub const DATA_STREAM: &str = "data-stream-class";
    pub const EVENT_RECORD: &str = "event-record-class";
}

/// Field-class `type` tags understood by the declaration parsers.
pub mod field_class {
    /// Fixed-width unsigned integer.
    pub const FIXED_UNSIGNED_INTEGER: &str = "fixed-length-unsigned-integer";
    /// Fixed-width signed integer.
    pub const FIXED_SIGNED_INTEGER: &str = "fixed-length-signed-integer";
    /// Variable-width unsigned integer.
    pub const VARIABLE_UNSIGNED_INTEGER: &str = "variable-length-unsigned-integer";
    /// Variable-width signed integer.
    pub const VARIABLE_SIGNED_INTEGER: &str = "variable-length-signed-integer";
    /// Static-length blob.
    pub const STATIC_LENGTH_BLOB: &str = "static-length-blob";
    /// Null-terminated string.
    pub const NULL_TERMINATED_STRING: &str = "null-terminated-string";
    /// Fixed-width unsigned enumeration.
    pub const FIXED_UNSIGNED_ENUMERATION: &str = "fixed-length-unsigned-enumeration";
    /// Variant over options.
    pub const VARIANT: &str = "variant";
    /// Structure of named members.
    pub const STRUCTURE: &str = "structure";
}

/// The typed header of a clock-class fragment.
///
/// The offset and origin shapes follow the CTF2 specification: the offset
/// is split into whole seconds and (1/frequency) cycles, and the origin is
/// either the literal string `unix-epoch` or a named origin object.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClockFragment {
    /// Clock identifier.
    pub name: String,
    /// Increments per second.
    pub frequency: i64,
    /// Measurement uncertainty in cycles.
    #[serde(default)]
    pub precision: Option<i64>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Offset from the origin.
    #[serde(rename = "offset-from-origin", default)]
    pub offset: Option<ClockOffset>,
    /// `unix-epoch` or a named origin object.
    #[serde(default)]
    pub origin: Option<Value>,
}

/// The `offset-from-origin` property of a clock class.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClockOffset {
    /// Whole seconds.
    #[serde(default)]
    pub seconds: Option<i64>,
    /// Remaining (1/frequency) cycles.
    #[serde(default)]
    pub cycles: Option<i64>,
}

/// Builds a metadata tree for a whole CTF2 document.
///
/// The returned tree has one child per fragment under its root, in
/// document order; the order matters for field-class-alias resolution,
/// which only sees aliases declared before their first use.
///
/// # Errors
/// Fails on an unknown fragment type, an unsupported preamble version, or
/// a fragment that does not match the CTF2 shape for its type.
pub fn document_from_fragments(fragments: &[Value]) -> Result<MetadataTree> {
    let mut builder = TreeBuilder::new(Syntax::Ctf2Json);
    let root = builder.root();
    for fragment in fragments {
        add_fragment(&mut builder, root, fragment)?;
    }
    Ok(builder.finish())
}

/// Builds a single-fragment tree; convenience for callers handing one
/// construct at a time to the dispatcher.
///
/// # Errors
/// Same conditions as [`document_from_fragments`].
pub fn fragment_tree(fragment: &Value) -> Result<MetadataTree> {
    document_from_fragments(std::slice::from_ref(fragment))
}

fn add_fragment(builder: &mut TreeBuilder, root: NodeId, value: &Value) -> Result<NodeId> {
    let tag = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::structural("fragment has no type tag"))?;

    match tag {
        fragment::PREAMBLE => {
            let version = value.get("version").and_then(Value::as_i64);
            if version != Some(2) {
                return Err(Error::semantic(format!(
                    "unsupported metadata stream version: {version:?}"
                )));
            }
            Ok(builder.add(root, NodeKind::Preamble))
        }
        fragment::TRACE => {
            let node = builder.add(root, NodeKind::TraceClass);
            add_named_structure(builder, node, value, "packet-header-field-class")?;
            Ok(node)
        }
        fragment::CLOCK => {
            let clock: ClockFragment = serde_json::from_value(value.clone())
                .map_err(|e| Error::structural(format!("malformed clock-class fragment: {e}")))?;
            Ok(builder.add_payload(root, NodeKind::ClockClass, JsonPayload::Clock(clock)))
        }
        fragment::FIELD_ALIAS => {
            let name = required_str(value, "name", "field-class-alias")?;
            let field_class = value
                .get("field-class")
                .cloned()
                .ok_or_else(|| Error::structural("field-class-alias has no field-class"))?;
            if !field_class.is_object() {
                return Err(Error::structural(
                    "field-class-alias field-class must be a JSON object",
                ));
            }
            let node = builder.add_payload(
                root,
                NodeKind::FieldClassAlias,
                JsonPayload::Alias(AliasPayload {
                    name: name.to_owned(),
                    field_class: field_class.clone(),
                }),
            );
            // The alias body is materialized as a member so the typealias
            // parser can dispatch on it like any other field class.
            add_member(builder, node, name, &field_class)?;
            Ok(node)
        }
        fragment::DATA_STREAM => {
            let node = builder.add(root, NodeKind::DataStreamClass);
            add_named_structure(builder, node, value, "packet-context-field-class")?;
            add_named_structure(builder, node, value, "event-record-header-field-class")?;
            add_named_structure(builder, node, value, "event-record-common-context-field-class")?;
            Ok(node)
        }
        fragment::EVENT_RECORD => {
            let node = builder.add(root, NodeKind::EventRecordClass);
            add_named_structure(builder, node, value, "specific-context-field-class")?;
            add_named_structure(builder, node, value, "payload-field-class")?;
            Ok(node)
        }
        other => Err(Error::structural(format!("unknown fragment type: {other}"))),
    }
}

/// Materializes the structure field-class stored under `key`, when present.
fn add_named_structure(
    builder: &mut TreeBuilder,
    parent: NodeId,
    fragment: &Value,
    key: &str,
) -> Result<()> {
    let Some(field_class) = fragment.get(key) else {
        return Ok(());
    };
    if field_class.get("type").and_then(Value::as_str) != Some(field_class::STRUCTURE) {
        return Err(Error::structural(format!("{key} must be a structure field class")));
    }
    add_structure(builder, parent, field_class)?;
    Ok(())
}

/// Materializes a structure field class: one `StructureField` node whose
/// children are the member classes.
fn add_structure(builder: &mut TreeBuilder, parent: NodeId, field_class: &Value) -> Result<NodeId> {
    let node = builder.add_payload(
        parent,
        NodeKind::StructureField,
        JsonPayload::Member(MemberPayload {
            name: String::new(),
            field_class: field_class.clone(),
        }),
    );
    if let Some(members) = field_class.get("member-classes") {
        let members = members
            .as_array()
            .ok_or_else(|| Error::structural("member-classes must be a JSON array"))?;
        for member in members {
            let name = required_str(member, "name", "structure member")?;
            let member_class = member
                .get("field-class")
                .ok_or_else(|| Error::structural("structure member has no field-class"))?;
            add_member(builder, node, name, member_class)?;
        }
    }
    Ok(node)
}

/// Materializes one named member. Nested structures gain a
/// `StructureField` child; variants gain one member child per option;
/// every other field class is left to the leaf parsers.
fn add_member(
    builder: &mut TreeBuilder,
    parent: NodeId,
    name: &str,
    field_class: &Value,
) -> Result<NodeId> {
    let node = builder.add_payload(
        parent,
        NodeKind::StructureFieldMember,
        JsonPayload::Member(MemberPayload {
            name: name.to_owned(),
            field_class: field_class.clone(),
        }),
    );
    if field_class.is_string() {
        // A reference to a field-class alias; resolved during typealias
        // parsing against earlier fragments.
        return Ok(node);
    }
    let Some(tag) = field_class.get("type").and_then(Value::as_str) else {
        return Err(Error::structural(
            "field-class property is not a JSON object or JSON string",
        ));
    };
    match tag {
        field_class::STRUCTURE => {
            add_structure(builder, node, field_class)?;
        }
        field_class::VARIANT => {
            let options = field_class
                .get("options")
                .and_then(Value::as_array)
                .ok_or_else(|| Error::structural("variant field class has no options array"))?;
            for option in options {
                let option_name = required_str(option, "name", "variant option")?;
                let option_class = option
                    .get("field-class")
                    .ok_or_else(|| Error::structural("variant option has no field-class"))?;
                add_member(builder, node, option_name, option_class)?;
            }
        }
        _ => {}
    }
    Ok(node)
}

fn required_str<'a>(value: &'a Value, key: &str, what: &str) -> Result<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::structural(format!("{what} has no {key}")))
}
