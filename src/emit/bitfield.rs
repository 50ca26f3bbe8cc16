//! Emission for `bitfield`: one typedef'd struct of plain-width subfields,
//! packed/unpacked against a single storage word via compile-time-known
//! shifts (see [`crate::ir::bitfield`]).

use super::{EmitCtx, Mode};
use crate::emit::Lines;
use crate::ident::to_camel_case;
use crate::ir::bitfield::BitfieldSpec;
use crate::ir::NodeId;

fn subfield_typename(signed: bool) -> &'static str {
    if signed {
        "int64_t"
    } else {
        "uint64_t"
    }
}

pub fn type_name(ctx: &mut EmitCtx, id: NodeId, spec: &BitfieldSpec) -> String {
    if let Some(name) = ctx.interner.lookup(ctx.scope, id) {
        return name;
    }
    let field_name = ctx.arena.get(id).name.clone();
    let desired = format!("mcp_type_{}", to_camel_case(if field_name.is_empty() { "anon" } else { &field_name }));
    let mut body = Lines::new();
    for f in &spec.fields {
        body.push(format!("{} {};", subfield_typename(f.signed), f.name));
    }
    let scope = ctx.scope;
    ctx.interner.register(scope, id, &desired, body)
}

pub fn declare(ctx: &mut EmitCtx, id: NodeId, spec: &BitfieldSpec, name: &str) -> Lines {
    let ty = type_name(ctx, id, spec);
    Lines::one(format!("{ty} {name};"))
}

pub fn emit(spec: &BitfieldSpec, qual: &str, mode: Mode) -> Lines {
    match mode {
        Mode::Length => Lines::one(format!("*l += sizeof({});", spec.storage.typename)),
        Mode::Free => Lines::new(),
        Mode::Encode => {
            let mut l = Lines::new();
            l.push(format!("{} __packed = 0;", spec.storage.typename));
            for f in &spec.fields {
                let shift = f.shift;
                let mask = f.mask();
                l.push(format!(
                    "__packed |= (({} )({qual}->{} & 0x{mask:x}ULL)) << {shift};",
                    spec.storage.typename, f.name
                ));
            }
            l.extend(crate::ir::numeric::encode(&spec.storage, "__packed"));
            l
        }
        Mode::Decode => {
            let mut l = Lines::new();
            l.push(format!("{} __packed;", spec.storage.typename));
            l.extend(crate::ir::numeric::decode(&spec.storage, "__packed"));
            for f in &spec.fields {
                let shift = f.shift;
                let mask = f.mask();
                l.push(format!(
                    "{qual}->{} = (__packed >> {shift}) & 0x{mask:x}ULL;",
                    f.name
                ));
                if f.signed && f.size < 64 {
                    l.push(format!(
                        "if ({qual}->{} & (1ULL << {})) {qual}->{} |= ~0x{mask:x}ULL;",
                        f.name,
                        f.size - 1,
                        f.name
                    ));
                }
            }
            l
        }
    }
}
