//! `option`: an inner type prefixed by a one-byte presence flag. Decodes to
//! a zeroed inner value with `{name}_present == false` when absent.

use serde_json::Value;

use crate::error::{SchemaError, SchemaPath};
use crate::ir::{Arena, NodeId};
use crate::schema_types::RawTypeRef;

pub struct OptionSpec {
    pub inner: NodeId,
}

impl OptionSpec {
    pub fn build(
        arena: &mut Arena,
        id: NodeId,
        name: &str,
        data: &Value,
        path: &SchemaPath,
    ) -> Result<Self, SchemaError> {
        let ty = RawTypeRef::from_data_field(data, "type", path)?;
        let inner = arena.build_field(name, id, &ty, path)?;
        Ok(OptionSpec { inner })
    }
}
