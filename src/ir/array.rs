//! `array`: a run of elements, bound by a wire-prefixed count, a sibling
//! field's already-decoded value (foreign count), or a schema-literal
//! constant. Every array is stored the same way regardless of which: a
//! heap-allocated element buffer plus a runtime `_size` field, per
//! `DESIGN.md` Open Question 1 — a fixed literal count is recorded only as
//! a declaration comment, never hardcoded into the loop bound, so a single
//! emission path covers all three without a `match` at every call site.
//!
//! `ingredient` and `tags` are themselves always arrays, but — unlike the
//! generic `array` tag — carry no `count`/`countType`/`type` keys of their
//! own in the schema: both element type and count type are fixed class
//! defaults in the original (`mc_ingredient`, `mc_tags`), not data read at
//! build time.

use serde_json::Value;

use crate::error::{SchemaError, SchemaPath};
use crate::ir::delegated::DelegatedSpec;
use crate::ir::numeric::{self, NumericSpec};
use crate::ir::{Arena, NodeId};
use crate::schema_types::RawTypeRef;

pub enum ArrayCount {
    /// `{ "countType": "varint" }`
    Prefixed(NumericSpec),
    /// `{ "count": "../count" }` — dotted path to an already-decoded sibling.
    Foreign(String),
    /// `{ "count": 4 }` — schema-literal constant, kept only for the
    /// declaration comment; the runtime bound is always `_size`.
    Fixed(u64),
}

pub struct ArraySpec {
    pub count: ArrayCount,
    pub element: NodeId,
}

impl ArraySpec {
    pub fn build(
        arena: &mut Arena,
        id: NodeId,
        tag: &str,
        data: &Value,
        path: &SchemaPath,
    ) -> Result<Self, SchemaError> {
        if tag == "ingredient" || tag == "tags" {
            let count_spec = numeric::lookup("varint").expect("varint is always a known numeric tag");
            let spec = if tag == "ingredient" {
                DelegatedSpec::ingredient_element()
            } else {
                DelegatedSpec::tag_element()
            };
            let element = arena.build_delegated("", id, spec);
            return Ok(ArraySpec {
                count: ArrayCount::Prefixed(count_spec),
                element,
            });
        }

        let count = if let Some(count_type) = data.get("countType").and_then(Value::as_str) {
            let spec = numeric::lookup(count_type).ok_or_else(|| SchemaError::MalformedTypeData {
                reason: format!("array countType `{count_type}` is not a numeric type"),
                path: path.clone(),
            })?;
            ArrayCount::Prefixed(spec)
        } else {
            match data.get("count") {
                Some(Value::String(raw)) => ArrayCount::Foreign(raw.clone()),
                Some(Value::Number(n)) => {
                    let count = n.as_u64().ok_or_else(|| SchemaError::MalformedTypeData {
                        reason: "array count must be a non-negative integer".to_string(),
                        path: path.clone(),
                    })?;
                    ArrayCount::Fixed(count)
                }
                _ => {
                    return Err(SchemaError::MissingKey {
                        key: "count/countType".to_string(),
                        path: path.clone(),
                    })
                }
            }
        };

        let ty = RawTypeRef::from_data_field(data, "type", path)?;
        let element = arena.build_field("", id, &ty, path)?;
        Ok(ArraySpec { count, element })
    }
}
