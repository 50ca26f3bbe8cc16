//! Emission for `switch`. See [`crate::ir::switch`] for the Sister/Union
//! shape split; this module adds the dispatch control flow on top — a C
//! `switch` statement for integer-keyed compareTo values, an `if`/`else if`
//! chain of `strcmp` calls for string-keyed ones.

use super::{EmitCtx, Mode};
use crate::compare;
use crate::emit::Lines;
use crate::ir::switch::{CaseKey, SwitchShape, SwitchSpec};
use crate::ir::NodeId;

pub fn declare(ctx: &mut EmitCtx, _id: NodeId, spec: &SwitchSpec, name: &str) -> Lines {
    match &spec.shape {
        SwitchShape::Sister { sample } => {
            // `sample` was built with this switch's own name, so its
            // declaration already reads `{type} {name};`.
            let _ = name;
            super::emit_declare(ctx, *sample)
        }
        SwitchShape::Union => {
            let mut l = Lines::new();
            l.push("union {".to_string());
            for branch in &spec.branches {
                if branch.is_void {
                    continue;
                }
                let ty = super::type_name(ctx, branch.field);
                l.push(format!("    {ty} {};", branch.member));
            }
            if let Some(default) = spec.default {
                let ty = super::type_name(ctx, default);
                l.push(format!("    {ty} default_case;"));
            }
            l.push(format!("}} {name};"));
            l
        }
        SwitchShape::Inverse { .. } => {
            // Every explicit branch is void; only the default ever carries
            // storage, so declare directly as the default's own shape.
            let _ = name;
            super::emit_declare(ctx, spec.default.expect("Inverse shape implies a non-void default"))
        }
        SwitchShape::UnsupportedMultiInverse => Lines::one(MULTI_INVERSE_SENTINEL.to_string()),
    }
}

const MULTI_INVERSE_SENTINEL: &str = "// Multi-Condition Inverse Not Yet Implemented";

/// The member access path for a given branch's payload, relative to the
/// switch field's own `qual`.
fn branch_qual(shape: &SwitchShape, member: &str, qual: &str) -> String {
    match shape {
        SwitchShape::Sister { .. } | SwitchShape::Inverse { .. } => qual.to_string(),
        SwitchShape::Union => format!("{qual}.{member}"),
        SwitchShape::UnsupportedMultiInverse => qual.to_string(),
    }
}

/// A condition expression testing `tag_expr` against a single case key.
fn case_condition(tag_expr: &str, key: &CaseKey) -> String {
    match key {
        CaseKey::Int(n) => format!("{tag_expr} == {n}"),
        CaseKey::Str(value) => format!("strcmp({tag_expr}, \"{value}\") == 0"),
    }
}

pub fn emit(ctx: &mut EmitCtx, _id: NodeId, spec: &SwitchSpec, qual: &str, mode: Mode) -> Lines {
    if let SwitchShape::UnsupportedMultiInverse = &spec.shape {
        return Lines::one(MULTI_INVERSE_SENTINEL.to_string());
    }

    let tag_expr = compare::resolve_compare_to(qual, &spec.compare_to);
    let mut l = Lines::new();

    if let SwitchShape::Inverse { case } = &spec.shape {
        let default = spec.default.expect("Inverse shape implies a non-void default");
        l.push(format!("if (!({})) {{", case_condition(&tag_expr, case)));
        l.extend_indented(super::dispatch(ctx, default, qual, mode));
        l.push("}".to_string());
        return l;
    }

    if spec.is_string_keyed {
        let mut first = true;
        for branch in &spec.branches {
            if branch.is_void {
                continue;
            }
            let CaseKey::Str(value) = &branch.key else {
                continue;
            };
            let kw = if first { "if" } else { "} else if" };
            l.push(format!("{kw} (strcmp({tag_expr}, \"{value}\") == 0) {{"));
            first = false;
            let bq = branch_qual(&spec.shape, &branch.member, qual);
            l.extend_indented(super::dispatch(ctx, branch.field, &bq, mode));
        }
        if let Some(default) = spec.default {
            l.push(if first { "if (1) {".to_string() } else { "} else {".to_string() });
            first = false;
            let bq = branch_qual(&spec.shape, "default_case", qual);
            l.extend_indented(super::dispatch(ctx, default, &bq, mode));
        }
        if !first {
            l.push("}".to_string());
        }
    } else {
        l.push(format!("switch ({tag_expr}) {{"));
        for branch in &spec.branches {
            let CaseKey::Int(n) = &branch.key else { continue };
            l.push(format!("case {n}: {{"));
            let bq = branch_qual(&spec.shape, &branch.member, qual);
            l.extend_indented(super::dispatch(ctx, branch.field, &bq, mode));
            l.push("    break;".to_string());
            l.push("}".to_string());
        }
        if let Some(default) = spec.default {
            l.push("default: {".to_string());
            let bq = branch_qual(&spec.shape, "default_case", qual);
            l.extend_indented(super::dispatch(ctx, default, &bq, mode));
            l.push("    break;".to_string());
            l.push("}".to_string());
        }
        l.push("}".to_string());
    }
    l
}
