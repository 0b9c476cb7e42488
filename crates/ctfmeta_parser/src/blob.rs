//! Blob field-class parser (CTF2 only).

use ctfmeta_model::{BlobDeclaration, Error, Result};

use crate::json::field_class;
use crate::tree::{MetadataTree, NodeId};

const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// Parses a static-length-blob field class.
///
/// # Errors
/// Fails on a TSDL node, a wrong type tag, or a missing or non-positive
/// length.
pub fn parse(tree: &MetadataTree, node: NodeId) -> Result<BlobDeclaration> {
    let member = tree
        .member(node)
        .ok_or_else(|| Error::structural("blob field classes only exist in CTF2 metadata"))?;
    if member.type_tag() != Some(field_class::STATIC_LENGTH_BLOB) {
        return Err(Error::structural(format!(
            "expected a blob field class, got {}",
            member.type_tag().unwrap_or("no type")
        )));
    }
    let fc = &member.field_class;
    let length = fc
        .get("length")
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| Error::semantic("blob field class is missing a length"))?;
    if length < 1 {
        return Err(Error::semantic(format!(
            "invalid length attribute in blob: {length}"
        )));
    }
    let media_type = fc
        .get("media-type")
        .and_then(serde_json::Value::as_str)
        .unwrap_or(DEFAULT_MEDIA_TYPE)
        .to_owned();
    Ok(BlobDeclaration {
        length: length.unsigned_abs(),
        media_type,
        role: member.role().map(str::to_owned),
    })
}
