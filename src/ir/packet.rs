//! A packet: one `(state, source)` listing entry, compiled into its own
//! fresh [`Arena`]. Packets never share an arena — each one is built,
//! emitted, and discarded independently, which is what lets emission run
//! one packet at a time without threading a global node-id namespace.

use crate::error::{SchemaError, SchemaPath};
use crate::ir::switch;
use crate::ir::{Arena, NodeId};
use crate::schema_types::RawPacket;
use serde_json::Value;

pub struct Packet {
    pub ordinal: i64,
    pub name: String,
    pub state: String,
    pub source: String,
    pub arena: Arena,
    pub fields: Vec<NodeId>,
}

impl Packet {
    pub fn build(raw: &RawPacket, state: &str, source: &str) -> Result<Self, SchemaError> {
        let mut arena = Arena::default();
        let mut fields = Vec::with_capacity(raw.body.len());
        for field in &raw.body {
            let name = field.name.clone().unwrap_or_default();
            let path = SchemaPath {
                state: state.to_string(),
                source: source.to_string(),
                packet: raw.name.clone(),
                field_path: if name.is_empty() { vec![] } else { vec![name.clone()] },
            };
            let (tag, data) = field.ty.split();

            // A packet body is itself an (unnamed) container; two sibling
            // switch fields sharing `compareTo` merge the same way a nested
            // container's fields would (§4.4).
            if tag == "switch" {
                if let Some(compare_to) = data.get("compareTo").and_then(Value::as_str) {
                    if let Some(&lead) = fields.iter().find(|&&f| switch::is_sister(&arena, f, compare_to)) {
                        switch::merge_into(&mut arena, lead, &name, &data, &path)?;
                        continue;
                    }
                }
            }

            let node = arena.build_tagged(&name, None, tag, &data, &path)?;
            fields.push(node);
        }
        Ok(Packet {
            ordinal: raw.ordinal,
            name: raw.name.clone(),
            state: state.to_string(),
            source: source.to_string(),
            arena,
            fields,
        })
    }
}
