//! Code emission: turns a built [`crate::ir::Arena`] into fragments of
//! target-language source text.
//!
//! The four packet operations (length/encode/decode/free) and the
//! declaration pass share one recursive walk over the schema tree,
//! parameterized by [`Mode`] — the generalization of the original
//! `generic_type` class's four near-identical `lenfunc`/`encoder`/`decoder`/
//! `freeer` methods into one walker with four call sites, matching
//! `prost-build`'s single `append_*` traversal per message reused across
//! encode/decode/merge/sizeof code paths.
//!
//! Each node's emission function takes an explicit `qual`: the qualified
//! access path (`this->foo`, `pkt->items.data[i0]`) under which the node's
//! storage is reached at runtime. `qual` is computed by the *caller*
//! (a container computes `{parent}->{field}` for each member; an array
//! computes `{parent}.data[i]` for its element) and passed down, rather than
//! being saved onto the node and restored afterward. This is the one
//! structural change from the original `temp_name`/`reset_name` discipline:
//! the tree becomes reusable and thread-safe without needing mutable,
//! restorable per-node state.

pub mod array;
pub mod bitfield;
pub mod container;
pub mod delegated;
pub mod driver;
pub mod option;
pub mod particle;
pub mod simple;
pub mod switch;

use crate::interner::TypeInterner;
use crate::ir::{Arena, NodeId, NodeKind};

/// A fragment of emitted source: an ordered list of already-indented lines,
/// concatenated without any implicit separator by [`Lines::render`]. Kept
/// deliberately dumb (`Vec<String>`, no AST) — nothing in this schema nests
/// deeply enough to need more than textual indentation, and no example in
/// the reference pack builds a C-targeted AST/pretty-printer to imitate.
#[derive(Debug, Default, Clone)]
pub struct Lines(Vec<String>);

impl Lines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn one(line: impl Into<String>) -> Self {
        Lines(vec![line.into()])
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    pub fn extend(&mut self, other: Lines) {
        self.0.extend(other.0);
    }

    /// Re-indents every line in `other` by one level (4 spaces) and appends.
    pub fn extend_indented(&mut self, other: Lines) {
        self.0.extend(other.0.into_iter().map(|l| format!("    {l}")));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn render(&self) -> String {
        self.0.join("\n")
    }
}

impl FromIterator<String> for Lines {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Lines(iter.into_iter().collect())
    }
}

/// Which of the four packet operations a walk is performing. Threaded as
/// data (not four copy-pasted functions) per the "shared walker" design.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Length,
    Encode,
    Decode,
    Free,
}

/// Everything the recursive walk needs besides the node being visited: the
/// arena it lives in, and the interner that composite types register
/// synthesized typedefs into. Threaded by `&mut` reference through every
/// emission call, since typedef registration can happen at any depth.
///
/// `scope` identifies which packet's arena `arena` is — every packet starts
/// its own [`NodeId`] numbering back at 0, so the interner needs something
/// besides the bare id to avoid aliasing unrelated nodes from different
/// packets that happen to land on the same id (see [`crate::interner`]).
pub struct EmitCtx<'a> {
    pub arena: &'a Arena,
    pub interner: &'a mut TypeInterner,
    pub scope: usize,
}

impl<'a> EmitCtx<'a> {
    pub fn new(arena: &'a Arena, interner: &'a mut TypeInterner, scope: usize) -> Self {
        EmitCtx { arena, interner, scope }
    }
}

/// `*variable += ...` accumulator name used throughout length emission.
pub const LENGTH_VAR: &str = "l";

/// Emits the length contribution of `id` at access path `qual`.
pub fn emit_length(ctx: &mut EmitCtx, id: NodeId, qual: &str) -> Lines {
    dispatch(ctx, id, qual, Mode::Length)
}

pub fn emit_encode(ctx: &mut EmitCtx, id: NodeId, qual: &str) -> Lines {
    dispatch(ctx, id, qual, Mode::Encode)
}

pub fn emit_decode(ctx: &mut EmitCtx, id: NodeId, qual: &str) -> Lines {
    dispatch(ctx, id, qual, Mode::Decode)
}

pub fn emit_free(ctx: &mut EmitCtx, id: NodeId, qual: &str) -> Lines {
    dispatch(ctx, id, qual, Mode::Free)
}

pub(crate) fn dispatch(ctx: &mut EmitCtx, id: NodeId, qual: &str, mode: Mode) -> Lines {
    let node = ctx.arena.get(id);
    match &node.kind {
        NodeKind::Void => Lines::new(),
        NodeKind::Numeric(spec) => match mode {
            Mode::Length => crate::ir::numeric::length(spec, qual, LENGTH_VAR),
            Mode::Encode => crate::ir::numeric::encode(spec, qual),
            Mode::Decode => crate::ir::numeric::decode(spec, qual),
            Mode::Free => Lines::new(),
        },
        NodeKind::StringT => simple::string_emit(qual, mode),
        NodeKind::Buffer(spec) => simple::buffer_emit(spec, qual, mode),
        NodeKind::RestBuffer => simple::rest_buffer_emit(qual, mode),
        NodeKind::Nbt => simple::nbt_emit(qual, mode, false),
        NodeKind::OptionalNbt => simple::nbt_emit(qual, mode, true),
        NodeKind::Delegated(spec) => delegated::emit(spec, qual, mode),
        NodeKind::Option(spec) => option::emit(ctx, id, spec, qual, mode),
        NodeKind::Array(spec) => array::emit(ctx, id, spec, qual, mode),
        NodeKind::Container(spec) => container::emit(ctx, id, spec, qual, mode),
        NodeKind::Bitfield(spec) => bitfield::emit(spec, qual, mode),
        NodeKind::Switch(spec) => switch::emit(ctx, id, spec, qual, mode),
    }
}

/// Resolves `id`'s C type name, registering a synthesized typedef through
/// the interner if it's a composite. Used wherever a type must be named
/// standalone rather than declared as `{type} {name};` in place — array
/// element pointers and switch union members.
pub fn type_name(ctx: &mut EmitCtx, id: NodeId) -> String {
    let node = ctx.arena.get(id);
    match &node.kind {
        NodeKind::Void => "void".to_string(),
        NodeKind::Numeric(spec) => spec.typename.to_string(),
        NodeKind::StringT => "char*".to_string(),
        NodeKind::Delegated(spec) => format!("mcp_type_{}", spec.runtime),
        NodeKind::Container(spec) => container::type_name(ctx, id, spec),
        NodeKind::Bitfield(spec) => bitfield::type_name(ctx, id, spec),
        NodeKind::Buffer(_)
        | NodeKind::RestBuffer
        | NodeKind::Nbt
        | NodeKind::OptionalNbt
        | NodeKind::Option(_)
        | NodeKind::Array(_)
        | NodeKind::Switch(_) => {
            // A standalone named occurrence of one of these (array-of-array,
            // array-of-option, ...) never appears in the Minecraft protocol
            // schema; rather than guess at a shape, record the gap and move on.
            "/* unsupported: nested variable-length element type */ void".to_string()
        }
    }
}

/// Emits the field declaration for `id` (used inside struct/typedef bodies).
/// Always keyed by the node's own display `name`, never by an access path —
/// declarations name a field where it is defined, not where it is used.
pub fn emit_declare(ctx: &mut EmitCtx, id: NodeId) -> Lines {
    let node = ctx.arena.get(id);
    let name = node.name.clone();
    match &node.kind {
        NodeKind::Void => Lines::new(),
        NodeKind::Numeric(spec) => crate::ir::numeric::declare(spec, &name),
        NodeKind::StringT => simple::string_declare(&name),
        NodeKind::Buffer(_) => simple::buffer_declare(&name),
        NodeKind::RestBuffer => simple::rest_buffer_declare(&name),
        NodeKind::Nbt | NodeKind::OptionalNbt => simple::nbt_declare(&name),
        NodeKind::Delegated(spec) => delegated::declare(spec, &name),
        NodeKind::Option(spec) => option::declare(ctx, id, spec, &name),
        NodeKind::Array(spec) => array::declare(ctx, id, spec, &name),
        NodeKind::Container(spec) => container::declare(ctx, id, spec, &name),
        NodeKind::Bitfield(spec) => bitfield::declare(spec, &name),
        NodeKind::Switch(spec) => switch::declare(ctx, id, spec, &name),
    }
}
