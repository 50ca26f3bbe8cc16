//! `container`: an ordered struct of named fields. The most common
//! composite; every packet body is itself built as an (unnamed, top-level)
//! container.

use serde_json::Value;

use crate::error::{SchemaError, SchemaPath};
use crate::ir::switch;
use crate::ir::{Arena, NodeId};
use crate::schema_types::RawField;

pub struct ContainerSpec {
    pub fields: Vec<NodeId>,
}

impl ContainerSpec {
    pub fn build(arena: &mut Arena, id: NodeId, data: &Value, path: &SchemaPath) -> Result<Self, SchemaError> {
        let raw_fields: Vec<RawField> =
            serde_json::from_value(data.clone()).map_err(|e| SchemaError::MalformedTypeData {
                reason: format!("container fields: {e}"),
                path: path.clone(),
            })?;

        let mut fields = Vec::with_capacity(raw_fields.len());
        for raw in &raw_fields {
            let name = raw.name.clone().unwrap_or_default();
            let mut field_path = path.clone();
            if !name.is_empty() {
                field_path.field_path.push(name.clone());
            }

            let (tag, branch_data) = raw.ty.split();
            if tag == "switch" {
                if let Some(compare_to) = branch_data.get("compareTo").and_then(Value::as_str) {
                    if let Some(&lead) = fields.iter().find(|&&f| switch::is_sister(arena, f, compare_to)) {
                        switch::merge_into(arena, lead, &name, &branch_data, &field_path)?;
                        continue;
                    }
                }
            }

            let field = arena.build_field(&name, id, &raw.ty, &field_path)?;
            fields.push(field);
        }
        Ok(ContainerSpec { fields })
    }
}
