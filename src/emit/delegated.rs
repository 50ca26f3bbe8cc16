//! Emission for [`crate::ir::delegated::DelegatedSpec`]: every operation is
//! one runtime call, `particleData`'s decode additionally threading the
//! resolved type-id expression through as an extra argument so the runtime
//! knows which particle variant's extra payload to parse.

use super::Mode;
use crate::compare;
use crate::emit::Lines;
use crate::ir::delegated::{DelegatedKind, DelegatedSpec};

pub fn declare(spec: &DelegatedSpec, name: &str) -> Lines {
    Lines::one(format!("mcp_type_{} {name};", spec.runtime))
}

pub fn emit(spec: &DelegatedSpec, qual: &str, mode: Mode) -> Lines {
    let runtime = spec.runtime;
    let extra_arg = match &spec.kind {
        DelegatedKind::Particle { compare_to } => Some(compare::resolve_compare_to(qual, compare_to)),
        _ => None,
    };
    match mode {
        Mode::Length => match &extra_arg {
            Some(id_expr) => Lines::one(format!("*l += mcp_length_{runtime}(&{qual}, {id_expr});")),
            None => Lines::one(format!("*l += mcp_length_{runtime}(&{qual});")),
        },
        Mode::Encode => match &extra_arg {
            Some(id_expr) => Lines::one(format!("mcp_encode_{runtime}(&{qual}, {id_expr}, dest);")),
            None => Lines::one(format!("mcp_encode_{runtime}(&{qual}, dest);")),
        },
        Mode::Decode => match &extra_arg {
            Some(id_expr) => Lines::one(format!("mcp_decode_{runtime}(&{qual}, {id_expr}, src);")),
            None => Lines::one(format!("mcp_decode_{runtime}(&{qual}, src);")),
        },
        Mode::Free => Lines::one(format!("mcp_free_{runtime}(&{qual});")),
    }
}
