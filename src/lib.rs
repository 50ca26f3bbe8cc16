//! Compiles a Protodef-style Minecraft protocol schema into C packet
//! structs and codec functions for one protocol version.
//!
//! The entry point is [`Config`]: point it at a [`SchemaCatalog`]
//! implementation and a protocol version, and it writes `mcp/particle.h`,
//! `mcp/protocol.h`, and `protocol.c`. Everything below `emit`/`ir` is the
//! schema compiler those three files come out of.

pub mod catalog;
pub mod compare;
pub mod config;
pub mod emit;
pub mod error;
pub mod ident;
pub mod interner;
pub mod ir;
pub mod schema_types;

pub use config::Config;
pub use error::{GeneratorError, Result};
pub use schema_types::{ProtocolTree, SchemaCatalog};
