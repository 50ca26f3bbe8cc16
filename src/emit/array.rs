//! Emission for `array`: always a heap-allocated element buffer plus a
//! runtime `_size` field (see [`crate::ir::array`] for why even a
//! schema-literal count doesn't become a fixed-size C array).

use super::{EmitCtx, Mode};
use crate::compare;
use crate::emit::Lines;
use crate::ir::array::{ArrayCount, ArraySpec};
use crate::ir::NodeId;

pub fn declare(ctx: &mut EmitCtx, _id: NodeId, spec: &ArraySpec, name: &str) -> Lines {
    let elem_ty = super::type_name(ctx, spec.element);
    let mut l = Lines::new();
    if let ArrayCount::Fixed(n) = spec.count {
        l.push(format!("/* schema count: {n} */"));
    }
    l.push(format!("{elem_ty} *{name};"));
    l.push(format!("int32_t {name}_size;"));
    l
}

pub fn emit(ctx: &mut EmitCtx, _id: NodeId, spec: &ArraySpec, qual: &str, mode: Mode) -> Lines {
    let size_qual = format!("{qual}_size");
    let elem_qual = format!("{qual}[i]");

    match mode {
        Mode::Length => {
            let mut l = match &spec.count {
                ArrayCount::Prefixed(count_spec) => crate::ir::numeric::length(count_spec, &size_qual, "l"),
                ArrayCount::Foreign(_) | ArrayCount::Fixed(_) => Lines::new(),
            };
            l.push(format!("for (int32_t i = 0; i < {size_qual}; i++) {{"));
            l.extend_indented(super::emit_length(ctx, spec.element, &elem_qual));
            l.push("}".to_string());
            l
        }
        Mode::Encode => {
            let mut l = match &spec.count {
                ArrayCount::Prefixed(count_spec) => crate::ir::numeric::encode(count_spec, &size_qual),
                ArrayCount::Foreign(_) | ArrayCount::Fixed(_) => Lines::new(),
            };
            l.push(format!("for (int32_t i = 0; i < {size_qual}; i++) {{"));
            l.extend_indented(super::emit_encode(ctx, spec.element, &elem_qual));
            l.push("}".to_string());
            l
        }
        Mode::Decode => {
            let mut l = Lines::new();
            match &spec.count {
                ArrayCount::Prefixed(count_spec) => l.extend(crate::ir::numeric::decode(count_spec, &size_qual)),
                ArrayCount::Foreign(raw) => {
                    let expr = compare::resolve_foreign_count(qual, raw);
                    l.push(format!("{size_qual} = {expr};"));
                }
                ArrayCount::Fixed(n) => l.push(format!("{size_qual} = {n};")),
            }
            let elem_ty = super::type_name(ctx, spec.element);
            l.push(format!("{qual} = malloc(sizeof({elem_ty}) * {size_qual});"));
            l.push(format!("for (int32_t i = 0; i < {size_qual}; i++) {{"));
            l.extend_indented(super::emit_decode(ctx, spec.element, &elem_qual));
            l.push("}".to_string());
            l
        }
        Mode::Free => {
            let mut l = Lines::new();
            l.push(format!("for (int32_t i = 0; i < {size_qual}; i++) {{"));
            l.extend_indented(super::emit_free(ctx, spec.element, &elem_qual));
            l.push("}".to_string());
            l.push(format!("free({qual});"));
            l
        }
    }
}
