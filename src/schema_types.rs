//! Raw Protodef JSON shapes.
//!
//! Protodef type data is deliberately dynamic (the member set of a "type"'s
//! data object depends entirely on its tag), so the raw tree is kept as
//! loosely-typed `serde_json::Value` and interpreted on demand by each
//! type constructor in [`crate::ir`]. This mirrors the source catalog's own
//! `extract_type` / `extract_field` convention: a type is either a bare tag
//! string, or a two-element `[tag, data]` array.

use serde::Deserialize;
use serde_json::Value;

/// One Protodef "field": `{ "name": ..., "type": <RawType> }`. The name is
/// absent for anonymous fields (switch branches, array elements).
#[derive(Debug, Clone, Deserialize)]
pub struct RawField {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: RawTypeRef,
}

/// A Protodef "type" reference: either a bare tag, or `[tag, data]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTypeRef {
    Bare(String),
    Tagged(String, Value),
}

impl RawTypeRef {
    /// Splits into `(tag, data)`, producing an empty object for bare tags
    /// with no type data (numerics, void, restBuffer, ...).
    pub fn split(&self) -> (&str, Value) {
        match self {
            RawTypeRef::Bare(tag) => (tag.as_str(), Value::Object(Default::default())),
            RawTypeRef::Tagged(tag, data) => (tag.as_str(), data.clone()),
        }
    }

    /// Reads `data[key]` as a nested type reference (`option.type`,
    /// `array.type`).
    pub fn from_data_field(
        data: &Value,
        key: &str,
        path: &crate::error::SchemaPath,
    ) -> Result<Self, crate::error::SchemaError> {
        let raw = data
            .get(key)
            .ok_or_else(|| crate::error::SchemaError::MissingKey {
                key: key.to_string(),
                path: path.clone(),
            })?;
        serde_json::from_value(raw.clone()).map_err(|e| crate::error::SchemaError::MalformedTypeData {
            reason: format!("`{key}`: {e}"),
            path: path.clone(),
        })
    }
}

/// One packet entry in a `(state, source)` listing: ordinal, display name,
/// and the raw `container` body (a list of [`RawField`]).
#[derive(Debug, Clone)]
pub struct RawPacket {
    pub ordinal: i64,
    pub name: String,
    pub body: Vec<RawField>,
}

/// The four protocol states, in catalog iteration order.
pub const STATES: [&str; 4] = ["handshaking", "status", "login", "play"];

/// Schema direction tags, as they appear in the upstream catalog.
pub const DIRECTIONS: [&str; 2] = ["toClient", "toServer"];

/// Maps a schema direction tag to the source a packet carrying it belongs
/// to: a `toClient` packet is *server*-sourced, `toServer` is *client*-sourced.
pub fn direction_to_source(direction: &str) -> &'static str {
    if direction == "toClient" {
        "server"
    } else {
        "client"
    }
}

/// One fully loaded protocol tree for a chosen version: for every
/// `(state, direction)` pair, the ordered packet listing.
#[derive(Debug, Default)]
pub struct ProtocolTree {
    pub version: String,
    pub protocol_version: i64,
    pub particle_names: Vec<String>,
    pub packets: Vec<(String, String, Vec<RawPacket>)>,
}

/// External collaborator: loads the protocol tree for a chosen version from
/// the `minecraft-data`-shaped catalog. Out of scope per the specification;
/// the generator only consumes whatever implementation is plugged in here.
pub trait SchemaCatalog {
    fn load(&self, version: &str) -> crate::error::Result<ProtocolTree>;
}
