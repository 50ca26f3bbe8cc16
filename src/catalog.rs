//! A [`SchemaCatalog`] backed by a directory of JSON files, one per
//! protocol version: `{dir}/{version}/protocol.json`. Loading the actual
//! upstream `minecraft-data` catalog and translating its listing format is
//! outside this generator's scope (see [`crate::schema_types::SchemaCatalog`]);
//! this implementation exists so the binary has a concrete, testable
//! collaborator rather than only a trait nothing implements.
//!
//! File shape:
//! ```json
//! {
//!   "version": "1.21",
//!   "protocol_version": 767,
//!   "particles": ["block", "dust", ...],
//!   "states": {
//!     "play": {
//!       "toClient": [ { "name": "SpawnEntity", "fields": [ ... ] }, ... ],
//!       "toServer": [ ... ]
//!     },
//!     ...
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GeneratorError, Result};
use crate::schema_types::{direction_to_source, ProtocolTree, RawField, RawPacket, SchemaCatalog, DIRECTIONS, STATES};

#[derive(Deserialize)]
struct FileFormat {
    version: String,
    protocol_version: i64,
    #[serde(default)]
    particles: Vec<String>,
    states: HashMap<String, HashMap<String, Vec<FilePacket>>>,
}

#[derive(Deserialize)]
struct FilePacket {
    name: String,
    #[serde(default)]
    fields: Vec<RawField>,
}

pub struct JsonFileCatalog {
    root: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonFileCatalog { root: root.into() }
    }

    fn path_for(&self, version: &str) -> PathBuf {
        self.root.join(version).join("protocol.json")
    }
}

impl SchemaCatalog for JsonFileCatalog {
    fn load(&self, version: &str) -> Result<ProtocolTree> {
        let path = self.path_for(version);
        let raw = std::fs::read_to_string(&path)?;
        let parsed: FileFormat = serde_json::from_str(&raw)
            .map_err(|e| GeneratorError::Catalog(format!("{}: {e}", path.display())))?;

        let mut packets = Vec::new();
        for state in STATES {
            let Some(by_direction) = parsed.states.get(state) else {
                continue;
            };
            for direction in DIRECTIONS {
                let Some(listing) = by_direction.get(direction) else {
                    continue;
                };
                let source = direction_to_source(direction).to_string();
                let entries = listing
                    .iter()
                    .enumerate()
                    .map(|(ordinal, p)| RawPacket {
                        ordinal: ordinal as i64,
                        name: p.name.clone(),
                        body: p.fields.clone(),
                    })
                    .collect();
                packets.push((state.to_string(), source, entries));
            }
        }

        Ok(ProtocolTree {
            version: parsed.version,
            protocol_version: parsed.protocol_version,
            particle_names: parsed.particles,
            packets,
        })
    }
}

pub fn default_catalog_root() -> &'static Path {
    Path::new("catalog")
}
