//! Clock metadata parser.

use ctfmeta_model::{Clock, ClockValue, Error, Result, UNIX_EPOCH};

use crate::kind::NodeKind;
use crate::literal;
use crate::tree::{MetadataTree, NodeId};
use crate::util;

/// Parses a clock from either a TSDL `clock { ... }` block or a CTF2
/// clock-class fragment.
///
/// A numeric attribute that does not fit an `i64` is logged and stored
/// as 0 instead of failing the document.
///
/// # Errors
/// Fails on a node of the wrong kind or a malformed attribute
/// expression.
pub fn parse(tree: &MetadataTree, node: NodeId) -> Result<Clock> {
    if let Some(fragment) = tree.clock_class(node) {
        let mut clock = Clock::new();
        clock.add_attribute("name", ClockValue::Text(fragment.name.clone()));
        clock.add_attribute("freq", ClockValue::Integer(fragment.frequency));
        if let Some(precision) = fragment.precision {
            clock.add_attribute("precision", ClockValue::Integer(precision));
        }
        if let Some(description) = &fragment.description {
            clock.add_attribute("description", ClockValue::Text(description.clone()));
        }
        if let Some(offset) = &fragment.offset {
            if let Some(seconds) = offset.seconds {
                clock.add_attribute("offset_s", ClockValue::Integer(seconds));
            }
            if let Some(cycles) = offset.cycles {
                clock.add_attribute("offset", ClockValue::Integer(cycles));
            }
        }
        match &fragment.origin {
            Some(serde_json::Value::String(origin)) if origin == UNIX_EPOCH => {
                clock.add_attribute("origin", ClockValue::Text(origin.clone()));
            }
            Some(serde_json::Value::Object(origin)) => {
                if let Some(name) = origin.get("name").and_then(serde_json::Value::as_str) {
                    clock.add_attribute("origin", ClockValue::Text(name.to_owned()));
                }
            }
            _ => {}
        }
        return Ok(clock);
    }

    if !matches!(tree.kind(node), NodeKind::Clock | NodeKind::ClockClass) {
        return Err(Error::structural(format!(
            "expected a clock block, got {}",
            tree.kind(node)
        )));
    }
    let mut clock = Clock::new();
    for (key, right) in util::attribute_expressions(tree, node)? {
        let value = tree
            .child(right, 0)
            .ok_or_else(|| Error::structural(format!("clock attribute {key} has no value")))?;
        if util::is_unary_integer(tree, value) {
            let number = literal::parse_unary_integer(tree, value).unwrap_or_else(|_| {
                let text = tree.text(value).unwrap_or_default();
                log::warn!("number conversion issue with {text}, assigning {key} = 0");
                0
            });
            clock.add_attribute(key, ClockValue::Integer(number));
        } else {
            clock.add_attribute(key, ClockValue::Text(literal::parse_unary_string(tree, value)?));
        }
    }
    Ok(clock)
}
