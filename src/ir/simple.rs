//! `buffer`: a length-prefixed or fixed-size byte blob. The only "simple"
//! type besides the bare numerics that carries construction-time data.

use serde_json::Value;

use crate::error::{SchemaError, SchemaPath};
use crate::ir::numeric::{self, NumericSpec};

pub enum BufferCount {
    /// `{ "countType": "varint" }` — a numeric length prefix precedes the bytes.
    Prefixed(NumericSpec),
    /// `{ "count": 16 }` — a compile-time-fixed byte count.
    Fixed(u64),
}

pub struct BufferSpec {
    pub count: BufferCount,
}

impl BufferSpec {
    pub fn build(data: &Value, path: &SchemaPath) -> Result<Self, SchemaError> {
        if let Some(count_type) = data.get("countType").and_then(Value::as_str) {
            let spec = numeric::lookup(count_type).ok_or_else(|| SchemaError::MalformedTypeData {
                reason: format!("buffer countType `{count_type}` is not a numeric type"),
                path: path.clone(),
            })?;
            return Ok(BufferSpec {
                count: BufferCount::Prefixed(spec),
            });
        }
        let count = data
            .get("count")
            .and_then(Value::as_u64)
            .ok_or_else(|| SchemaError::MissingKey {
                key: "count/countType".to_string(),
                path: path.clone(),
            })?;
        Ok(BufferSpec {
            count: BufferCount::Fixed(count),
        })
    }
}
