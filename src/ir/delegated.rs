//! Self-serializing helpers: Protodef types whose wire format is too
//! game-specific to compile structurally (item stacks, smelting recipes,
//! entity metadata, particle payloads). Each one's four operations are a
//! single call into a hand-written runtime function; the compiler's only
//! job is picking the right runtime name and, for `particleData`, resolving
//! which sibling field carries the particle type id.

use serde_json::Value;

use crate::error::{SchemaError, SchemaPath};

#[derive(Clone)]
pub enum DelegatedKind {
    Slot,
    Smelting,
    EntityMetadata,
    /// `particleData`'s `compareTo` names the sibling field holding the
    /// particle type id; resolved to a qualified path at emission time
    /// (see [`crate::compare`]), not here.
    Particle { compare_to: String },
    TopBitSetTerminatedArray,
    /// A tag-list reference (`array::ArraySpec`'s `ingredient`/`tags`
    /// element); never occurs as its own top-level type tag.
    Tag,
}

#[derive(Clone)]
pub struct DelegatedSpec {
    pub kind: DelegatedKind,
    /// Runtime type name substituted into `mcp_type_{runtime}`,
    /// `mcp_{op}_{runtime}`.
    pub runtime: &'static str,
}

impl DelegatedSpec {
    pub fn build(tag: &str, data: &Value, path: &SchemaPath) -> Result<Self, SchemaError> {
        let (kind, runtime) = match tag {
            "slot" => (DelegatedKind::Slot, "Slot"),
            "minecraft_smelting_format" => (DelegatedKind::Smelting, "SmeltingFormat"),
            "entityMetadata" => (DelegatedKind::EntityMetadata, "EntityMetadata"),
            "particleData" => {
                let compare_to = data
                    .get("compareTo")
                    .and_then(Value::as_str)
                    .ok_or_else(|| SchemaError::MissingKey {
                        key: "compareTo".to_string(),
                        path: path.clone(),
                    })?
                    .to_string();
                (DelegatedKind::Particle { compare_to }, "Particle")
            }
            "topBitSetTerminatedArray" => (DelegatedKind::TopBitSetTerminatedArray, "TopBitSetArray"),
            other => {
                return Err(SchemaError::UnknownTypeTag {
                    tag: other.to_string(),
                    path: path.clone(),
                })
            }
        };
        Ok(DelegatedSpec { kind, runtime })
    }

    /// `ingredient`'s element, per the original's `mc_ingredient` class
    /// default (`element="mcp_type_Slot"`) — never read from schema data.
    pub(crate) fn ingredient_element() -> Self {
        DelegatedSpec {
            kind: DelegatedKind::Slot,
            runtime: "Slot",
        }
    }

    /// `tags`'s element, per the original's `mc_tags` class default
    /// (`element="mcp_type_Tag"`) — never read from schema data.
    pub(crate) fn tag_element() -> Self {
        DelegatedSpec {
            kind: DelegatedKind::Tag,
            runtime: "Tag",
        }
    }
}
