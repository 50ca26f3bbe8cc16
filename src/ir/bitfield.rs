//! `bitfield`: a fixed set of sub-integer fields packed MSB-first into one
//! wire-level word. Bit positions are fully known at schema-compile time
//! (every subfield's width comes straight from the schema), so the shift
//! amount for each subfield is baked into the emitted code as a literal
//! rather than computed by a runtime loop.

use serde_json::Value;

use crate::error::{SchemaError, SchemaPath};
use crate::ir::numeric::{self, NumericSpec};

pub struct BitfieldField {
    pub name: String,
    pub size: u32,
    pub signed: bool,
    /// Bit offset from the LSB of the storage word, precomputed at build
    /// time (§4.6): the total width of every entry declared after this one
    /// in the schema, including `_unused`/`unused` entries that consume
    /// width but get no storage slot of their own.
    pub shift: u32,
}

impl BitfieldField {
    pub fn mask(&self) -> u64 {
        if self.size >= 64 {
            u64::MAX
        } else {
            (1u64 << self.size) - 1
        }
    }
}

pub struct BitfieldSpec {
    pub total_bits: u32,
    pub storage_bits: u32,
    pub storage: NumericSpec,
    pub fields: Vec<BitfieldField>,
}

impl BitfieldSpec {
    pub fn build(_name: &str, data: &Value, path: &SchemaPath) -> Result<Self, SchemaError> {
        let raw_fields = data.as_array().ok_or_else(|| SchemaError::MalformedTypeData {
            reason: "bitfield data must be an array of subfields".to_string(),
            path: path.clone(),
        })?;

        struct RawSub {
            name: String,
            size: u32,
            signed: bool,
        }

        let mut raw = Vec::with_capacity(raw_fields.len());
        let mut total_bits = 0u32;
        for entry in raw_fields {
            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| SchemaError::MissingKey {
                    key: "name".to_string(),
                    path: path.clone(),
                })?
                .to_string();
            let size = entry
                .get("size")
                .and_then(Value::as_u64)
                .ok_or_else(|| SchemaError::MissingKey {
                    key: "size".to_string(),
                    path: path.clone(),
                })? as u32;
            let signed = entry.get("signed").and_then(Value::as_bool).unwrap_or(false);
            total_bits += size;
            raw.push(RawSub { name, size, signed });
        }

        let (storage_tag, storage_bits) = match total_bits {
            0..=8 => ("u8", 8),
            9..=16 => ("u16", 16),
            17..=32 => ("u32", 32),
            33..=64 => ("u64", 64),
            other => {
                return Err(SchemaError::MalformedTypeData {
                    reason: format!("bitfield total width {other} exceeds 64 bits"),
                    path: path.clone(),
                })
            }
        };
        let storage = numeric::lookup(storage_tag).expect("storage_tag is always a known numeric tag");

        // Fields are packed MSB-first starting at the top of the storage
        // word, so any unused low bits (when total_bits < storage_bits)
        // sit below the last field. Walk the schema in reverse, accumulating
        // the width already seen below each entry (including `_unused`/
        // `unused` entries, which still occupy bits but get no struct
        // member), to assign each kept field its absolute shift.
        let padding = storage_bits - total_bits;
        let mut fields = Vec::with_capacity(raw.len());
        let mut bits_below = 0u32;
        for sub in raw.iter().rev() {
            let shift = padding + bits_below;
            if sub.name != "_unused" && sub.name != "unused" {
                fields.push(BitfieldField {
                    name: sub.name.clone(),
                    size: sub.size,
                    signed: sub.signed,
                    shift,
                });
            }
            bits_below += sub.size;
        }
        fields.reverse();

        Ok(BitfieldSpec {
            total_bits,
            storage_bits,
            storage,
            fields,
        })
    }
}
