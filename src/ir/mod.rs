//! The schema tree: an arena of [`Node`]s built once per packet and
//! traversed repeatedly (once per emission pass).
//!
//! Rather than the mutually-recursive `parent` **back-links** a
//! straightforward port would use (which form reference cycles), nodes live
//! in a flat arena and refer to their parent by [`NodeId`], an opaque index.
//! This makes the tree trivially copyable and keeps borrow-checking honest:
//! building children never needs a live `&mut` borrow on the parent.
//!
//! A node's `name` is a *display* name fixed at construction time and never
//! mutated; the qualified access path used during emission (the
//! `this->foo.bar` style expression that names a field's storage at runtime)
//! is threaded through emission calls as an explicit parameter instead of
//! being saved and restored on the node. See [`crate::emit`].

pub mod array;
pub mod bitfield;
pub mod container;
pub mod delegated;
pub mod numeric;
pub mod option;
pub mod packet;
pub mod simple;
pub mod switch;

use crate::error::{SchemaError, SchemaPath};
use crate::schema_types::RawTypeRef;

pub type NodeId = usize;

/// A Protodef type occurrence in context: one node in the schema tree.
pub struct Node {
    /// Display name used when declaring/referencing the variable holding a
    /// value of this type. Empty for anonymous fields (switch branches,
    /// array elements before their iterator index is substituted).
    pub name: String,
    /// Enclosing container/switch/array/packet, or `None` for a packet root.
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

/// The tagged sum of every Protodef type this compiler understands; see
/// `DESIGN.md` for the module each variant is grounded on.
pub enum NodeKind {
    Void,
    Numeric(numeric::NumericSpec),
    StringT,
    Buffer(simple::BufferSpec),
    RestBuffer,
    Nbt,
    OptionalNbt,
    Delegated(delegated::DelegatedSpec),
    Option(option::OptionSpec),
    Array(array::ArraySpec),
    Container(container::ContainerSpec),
    Bitfield(bitfield::BitfieldSpec),
    Switch(switch::SwitchSpec),
}

/// The schema tree for a single packet (and, transitively, everything
/// nested within it). Built once, discarded once the packet's four
/// operations and declaration have been emitted.
#[derive(Default)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// True if `inner`'s nearest non-packet ancestor chain passes through
    /// `outer` before reaching the packet root. Unused by any construct in
    /// this schema (Protodef types never nest through a named ancestor more
    /// than the immediate parent cares about) but kept as the natural
    /// counterpart to `parent_packet` for future array/switch resolution
    /// needs.
    pub fn parent_packet(&self, mut id: NodeId) -> NodeId {
        while let Some(p) = self.nodes[id].parent {
            id = p;
        }
        id
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Mutable access to an already-built node, used only by sister-switch
    /// merging (§4.4): a later switch field folding its branches into an
    /// earlier one mutates that earlier node's [`NodeKind::Switch`] in
    /// place rather than allocating a second switch node.
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Pushes a node whose [`delegated::DelegatedSpec`] is already fully
    /// resolved (no raw type data to dispatch on), used by `ingredient`'s
    /// and `tags`'s fixed element types (§4.5).
    pub(crate) fn build_delegated(&mut self, name: &str, parent: NodeId, spec: delegated::DelegatedSpec) -> NodeId {
        self.push(Node {
            name: name.to_string(),
            parent: Some(parent),
            kind: NodeKind::Delegated(spec),
        })
    }

    /// Type registry: dispatches a raw Protodef type occurrence to its
    /// constructor. `name` is the field's display name (may be empty for
    /// anonymous occurrences); `parent` is the enclosing node, or `None`
    /// only for the packet root itself (packets are constructed directly
    /// by [`packet::Packet::build`], not through this entry point).
    pub fn build_field(&mut self, name: &str, parent: NodeId, ty: &RawTypeRef, path: &SchemaPath) -> Result<NodeId, SchemaError> {
        let (tag, data) = ty.split();
        self.build_tagged(name, Some(parent), tag, &data, path)
    }

    pub(crate) fn build_tagged(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        tag: &str,
        data: &serde_json::Value,
        path: &SchemaPath,
    ) -> Result<NodeId, SchemaError> {
        if tag == "void" {
            return Ok(self.push(Node {
                name: name.to_string(),
                parent,
                kind: NodeKind::Void,
            }));
        }
        if let Some(spec) = numeric::lookup(tag) {
            return Ok(self.push(Node {
                name: name.to_string(),
                parent,
                kind: NodeKind::Numeric(spec),
            }));
        }
        match tag {
            "string" => Ok(self.push(Node {
                name: name.to_string(),
                parent,
                kind: NodeKind::StringT,
            })),
            "buffer" => {
                let spec = simple::BufferSpec::build(data, path)?;
                Ok(self.push(Node {
                    name: name.to_string(),
                    parent,
                    kind: NodeKind::Buffer(spec),
                }))
            }
            "restBuffer" => Ok(self.push(Node {
                name: name.to_string(),
                parent,
                kind: NodeKind::RestBuffer,
            })),
            "nbt" => Ok(self.push(Node {
                name: name.to_string(),
                parent,
                kind: NodeKind::Nbt,
            })),
            "optionalNbt" => Ok(self.push(Node {
                name: name.to_string(),
                parent,
                kind: NodeKind::OptionalNbt,
            })),
            "slot" | "minecraft_smelting_format" | "entityMetadata" | "particleData" | "topBitSetTerminatedArray" => {
                let spec = delegated::DelegatedSpec::build(tag, data, path)?;
                Ok(self.push(Node {
                    name: name.to_string(),
                    parent,
                    kind: NodeKind::Delegated(spec),
                }))
            }
            "option" => {
                let id = self.push(Node {
                    name: name.to_string(),
                    parent,
                    kind: NodeKind::Void,
                });
                let spec = option::OptionSpec::build(self, id, name, data, path)?;
                self.nodes[id].kind = NodeKind::Option(spec);
                Ok(id)
            }
            "array" | "ingredient" | "tags" => {
                let id = self.push(Node {
                    name: name.to_string(),
                    parent,
                    kind: NodeKind::Void,
                });
                let spec = array::ArraySpec::build(self, id, tag, data, path)?;
                self.nodes[id].kind = NodeKind::Array(spec);
                Ok(id)
            }
            "container" => {
                let id = self.push(Node {
                    name: name.to_string(),
                    parent,
                    kind: NodeKind::Void,
                });
                let spec = container::ContainerSpec::build(self, id, data, path)?;
                self.nodes[id].kind = NodeKind::Container(spec);
                Ok(id)
            }
            "bitfield" => {
                let id = self.push(Node {
                    name: name.to_string(),
                    parent,
                    kind: NodeKind::Void,
                });
                let spec = bitfield::BitfieldSpec::build(name, data, path)?;
                self.nodes[id].kind = NodeKind::Bitfield(spec);
                Ok(id)
            }
            "switch" => {
                let id = self.push(Node {
                    name: name.to_string(),
                    parent,
                    kind: NodeKind::Void,
                });
                let spec = switch::SwitchSpec::build(self, id, name, data, path)?;
                self.nodes[id].kind = NodeKind::Switch(spec);
                Ok(id)
            }
            other => Err(SchemaError::UnknownTypeTag {
                tag: other.to_string(),
                path: path.clone(),
            }),
        }
    }

    /// Is this node's storage wholly owned by a named external/runtime
    /// type (never requires a fresh typedef)? See §3 "Simple".
    pub fn is_simple(&self, id: NodeId) -> bool {
        !matches!(self.nodes[id].kind, NodeKind::Container(_) | NodeKind::Bitfield(_))
    }
}
