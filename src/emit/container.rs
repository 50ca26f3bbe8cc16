//! Emission for `container`: one C `struct` typedef (nested occurrences) or,
//! when walked directly as a packet body, an inline member-by-member walk
//! with no typedef of its own (the packet struct itself carries the
//! members; see [`super::driver`]).

use super::{EmitCtx, Mode};
use crate::emit::Lines;
use crate::ident::to_camel_case;
use crate::ir::container::ContainerSpec;
use crate::ir::NodeId;

pub fn type_name(ctx: &mut EmitCtx, id: NodeId, spec: &ContainerSpec) -> String {
    if let Some(name) = ctx.interner.lookup(ctx.scope, id) {
        return name;
    }
    let field_name = ctx.arena.get(id).name.clone();
    let desired = format!("mcp_type_{}", to_camel_case(if field_name.is_empty() { "anon" } else { &field_name }));
    let mut body = Lines::new();
    for &f in &spec.fields {
        body.extend(super::emit_declare(ctx, f));
    }
    let scope = ctx.scope;
    ctx.interner.register(scope, id, &desired, body)
}

pub fn declare(ctx: &mut EmitCtx, id: NodeId, spec: &ContainerSpec, name: &str) -> Lines {
    let ty = type_name(ctx, id, spec);
    Lines::one(format!("{ty} {name};"))
}

/// Walks a container's fields, building each child's qualified access path
/// and concatenating its emission under `mode`.
///
/// A top-level packet field is a pointer the driver reaches as `this->field`
/// (see `driver::emit_packet_fns`) and never routes through here — a packet
/// body has no type name of its own to intern under, so `Packet::build`
/// constructs it directly rather than through the generic `container` tag
/// dispatch (§4.6). Every `qual` this function ever sees therefore already
/// names a plain (non-pointer) struct value — `container::declare` (above)
/// synthesizes `{ty} {name};`, never a pointer — so child access always
/// joins with `.`, regardless of nesting depth.
pub fn emit(ctx: &mut EmitCtx, _id: NodeId, spec: &ContainerSpec, qual: &str, mode: Mode) -> Lines {
    let mut out = Lines::new();
    for &f in &spec.fields {
        let field_name = ctx.arena.get(f).name.clone();
        let child_qual = if field_name.is_empty() {
            qual.to_string()
        } else if qual.ends_with("->") {
            format!("{qual}{field_name}")
        } else {
            format!("{qual}.{field_name}")
        };
        out.extend(super::dispatch(ctx, f, &child_qual, mode));
    }
    out
}
