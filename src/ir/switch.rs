//! `switch`: one container field whose concrete shape depends on a sibling
//! field's already-decoded value (`compareTo`). Several declared shapes:
//!
//! - **Union**: branches disagree in shape. Declares as a C `union` with one
//!   member per distinct branch, named after its case key.
//! - **Sister merge (uniform shape)**: every non-void branch (and the
//!   default, if present) names the exact same Protodef type — the common
//!   case is one real data branch with every other key mapping to `void`,
//!   Protodef's way of spelling an optional field keyed by an enum instead
//!   of a presence byte. Declares as a single plain member.
//! - **Inverse**: every explicit branch is `void` and a non-`void` default
//!   exists. Emits the default's fields unless the selector equals the
//!   (single) listed case. A second, distinct kind of switch with branches
//!   sharing a `compareTo` across *separate fields in the same container* is
//!   also called a sister switch in the source; see [`merge_into`] for that
//!   one — it folds a later switch field's branches into an earlier one
//!   rather than declaring a second field at all.
//! - **Unsupported multi-condition inverse**: more than one branch key, all
//!   void, with a non-void default. The source generator does not guess at
//!   this shape's semantics; neither do we — declare/emit both produce a
//!   sentinel comment and nothing else.
//!
//! A switch keyed on a string compareTo (namespaced ids like
//! `minecraft:stone`) can't become a C `switch` statement (case labels must
//! be integral), so string-keyed switches dispatch through an
//! `if`/`else if` chain on `strcmp` instead; this is decided once at build
//! time ([`SwitchSpec::is_string_keyed`]) and drives the shape the emitter
//! picks.

use serde_json::Value;

use crate::error::{SchemaError, SchemaPath};
use crate::ident::{sanitize_case_key, strip_case_quotes};
use crate::ir::{Arena, Node, NodeId, NodeKind};
use crate::schema_types::RawTypeRef;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CaseKey {
    Int(i64),
    Str(String),
}

pub struct SwitchBranch {
    pub key: CaseKey,
    pub field: NodeId,
    /// Sanitized identifier used as this branch's union member name when
    /// the switch shape is [`SwitchShape::Union`].
    pub member: String,
    pub is_void: bool,
}

pub enum SwitchShape {
    Sister { sample: NodeId },
    Union,
    /// Emit the default's fields unless the selector equals `case`.
    Inverse { case: CaseKey },
    /// More than one branch key, all void, with a non-void default — the
    /// source's own "not yet implemented" gap; see module docs.
    UnsupportedMultiInverse,
}

pub struct SwitchSpec {
    pub compare_to: String,
    pub branches: Vec<SwitchBranch>,
    pub default: Option<NodeId>,
    pub shape: SwitchShape,
    pub is_string_keyed: bool,
}

/// The fields this constructor needed out of raw switch type data, parsed
/// once and shared between a fresh [`SwitchSpec::build`] and a later
/// [`merge_into`] that folds a sister switch's branches into an earlier one.
struct ParsedFields {
    branches: Vec<SwitchBranch>,
    default: Option<NodeId>,
    is_string_keyed: bool,
}

fn parse_fields(arena: &mut Arena, parent: NodeId, name: &str, data: &Value, path: &SchemaPath) -> Result<ParsedFields, SchemaError> {
    let raw_fields = data
        .get("fields")
        .and_then(Value::as_object)
        .ok_or_else(|| SchemaError::MissingKey {
            key: "fields".to_string(),
            path: path.clone(),
        })?;

    let is_string_keyed = raw_fields.keys().any(|k| k.parse::<i64>().is_err());

    let mut branches = Vec::new();
    for (raw_key, raw_ty) in raw_fields {
        let key = if let Ok(n) = raw_key.parse::<i64>() {
            CaseKey::Int(n)
        } else {
            CaseKey::Str(strip_case_quotes(raw_key))
        };
        let ty: RawTypeRef = serde_json::from_value(raw_ty.clone()).map_err(|e| SchemaError::MalformedTypeData {
            reason: format!("switch branch `{raw_key}`: {e}"),
            path: path.clone(),
        })?;
        let (tag, branch_data) = ty.split();
        let is_void = tag == "void";
        let field = arena.build_tagged(name, Some(parent), tag, &branch_data, path)?;

        let member = match &key {
            CaseKey::Int(n) => format!("case_{n}"),
            CaseKey::Str(_) => sanitize_case_key(raw_key),
        };
        branches.push(SwitchBranch { key, field, member, is_void });
    }

    let default = match data.get("default") {
        Some(raw_ty) => {
            let ty: RawTypeRef =
                serde_json::from_value(raw_ty.clone()).map_err(|e| SchemaError::MalformedTypeData {
                    reason: format!("switch default: {e}"),
                    path: path.clone(),
                })?;
            let (tag, branch_data) = ty.split();
            Some(arena.build_tagged(name, Some(parent), tag, &branch_data, path)?)
        }
        None => None,
    };

    Ok(ParsedFields {
        branches,
        default,
        is_string_keyed,
    })
}

/// Picks a shape for a fully-assembled branch/default set. Shared by fresh
/// construction and by [`merge_into`] (a merge can turn a shape that looked
/// like a Sister into a Union, or vice versa, once the new branches are in).
fn classify(arena: &Arena, branches: &[SwitchBranch], default: Option<NodeId>) -> SwitchShape {
    let all_branches_void = !branches.is_empty() && branches.iter().all(|b| b.is_void);
    let default_is_void = default.map(|id| matches!(arena.get(id).kind, NodeKind::Void)).unwrap_or(true);

    if all_branches_void && !default_is_void {
        return if branches.len() == 1 {
            SwitchShape::Inverse {
                case: branches[0].key.clone(),
            }
        } else {
            SwitchShape::UnsupportedMultiInverse
        };
    }

    let mut uniform = true;
    let mut uniform_sample: Option<NodeId> = None;
    let mut sample_kind_matches = |arena: &Arena, candidate: NodeId| -> bool {
        match uniform_sample {
            None => {
                uniform_sample = Some(candidate);
                true
            }
            Some(prev) => same_shape(arena, prev, candidate),
        }
    };

    for b in branches.iter().filter(|b| !b.is_void) {
        if !sample_kind_matches(arena, b.field) {
            uniform = false;
        }
    }
    if !default_is_void {
        if let Some(d) = default {
            if !sample_kind_matches(arena, d) {
                uniform = false;
            }
        }
    }

    let non_void_count = branches.iter().filter(|b| !b.is_void).count() + if default_is_void { 0 } else { 1 };
    if uniform && non_void_count > 0 {
        let sample = branches
            .iter()
            .find(|b| !b.is_void)
            .map(|b| b.field)
            .or(default)
            .expect("non_void_count > 0 implies a non-void branch or default exists");
        SwitchShape::Sister { sample }
    } else {
        SwitchShape::Union
    }
}

/// Structural equality for the purposes of sister-merge/uniform-branch
/// detection: two fields are "the same type" only if their full declared
/// Protodef type matches, not merely their tag family — mirroring the
/// original's `is_union = not all(x == values[0] for x in values)`, an exact
/// type-equality check, not a family check. A `u8` branch and an `i32`
/// branch are both `NodeKind::Numeric` but declare different widths; since
/// `SwitchShape::Sister` routes every branch through one shared storage
/// slot sized from the first sample, conflating them would read/write the
/// wrong number of bytes. Composites recurse structurally.
fn same_shape(arena: &Arena, a: NodeId, b: NodeId) -> bool {
    match (&arena.get(a).kind, &arena.get(b).kind) {
        (NodeKind::Void, NodeKind::Void) => true,
        (NodeKind::Numeric(x), NodeKind::Numeric(y)) => x.typename == y.typename && x.postfix == y.postfix,
        (NodeKind::StringT, NodeKind::StringT) => true,
        (NodeKind::Buffer(_), NodeKind::Buffer(_)) => true,
        (NodeKind::RestBuffer, NodeKind::RestBuffer) => true,
        (NodeKind::Nbt, NodeKind::Nbt) => true,
        (NodeKind::OptionalNbt, NodeKind::OptionalNbt) => true,
        (NodeKind::Delegated(x), NodeKind::Delegated(y)) => x.runtime == y.runtime,
        (NodeKind::Option(x), NodeKind::Option(y)) => same_shape(arena, x.inner, y.inner),
        (NodeKind::Array(x), NodeKind::Array(y)) => same_shape(arena, x.element, y.element),
        (NodeKind::Container(x), NodeKind::Container(y)) => {
            x.fields.len() == y.fields.len() && x.fields.iter().zip(&y.fields).all(|(&fa, &fb)| same_shape(arena, fa, fb))
        }
        (NodeKind::Bitfield(x), NodeKind::Bitfield(y)) => x.total_bits == y.total_bits,
        _ => false,
    }
}

impl SwitchSpec {
    pub fn build(
        arena: &mut Arena,
        id: NodeId,
        name: &str,
        data: &Value,
        path: &SchemaPath,
    ) -> Result<Self, SchemaError> {
        let compare_to = data
            .get("compareTo")
            .and_then(Value::as_str)
            .ok_or_else(|| SchemaError::MissingKey {
                key: "compareTo".to_string(),
                path: path.clone(),
            })?
            .to_string();

        let parsed = parse_fields(arena, id, name, data, path)?;
        let shape = classify(arena, &parsed.branches, parsed.default);

        Ok(SwitchSpec {
            compare_to,
            branches: parsed.branches,
            default: parsed.default,
            shape,
            is_string_keyed: parsed.is_string_keyed,
        })
    }
}

/// True if `fid` is a switch field in this arena whose `compareTo` matches
/// `compare_to` — a sister switch, per §4.4. The caller is expected to have
/// already checked `fid` is a prior sibling in the same container.
pub(crate) fn is_sister(arena: &Arena, fid: NodeId, compare_to: &str) -> bool {
    matches!(&arena.get(fid).kind, NodeKind::Switch(s) if s.compare_to == compare_to)
}

/// Folds a later switch field's branches into the switch already built at
/// `lead_id`, rather than constructing a second field — the container
/// caller discards the `NodeId` this would otherwise have produced, so the
/// later switch contributes no storage of its own (a "null switch").
pub(crate) fn merge_into(arena: &mut Arena, lead_id: NodeId, name: &str, data: &Value, path: &SchemaPath) -> Result<(), SchemaError> {
    let parsed = parse_fields(arena, lead_id, name, data, path)?;

    {
        let Node { kind, .. } = arena.get_mut(lead_id);
        let NodeKind::Switch(spec) = kind else {
            panic!("merge_into target {lead_id} is not a switch node");
        };
        spec.branches.extend(parsed.branches);
        if spec.default.is_none() {
            spec.default = parsed.default;
        }
        spec.is_string_keyed = spec.is_string_keyed || parsed.is_string_keyed;
    }

    let default = match &arena.get(lead_id).kind {
        NodeKind::Switch(spec) => spec.default,
        _ => unreachable!(),
    };
    let new_shape = match &arena.get(lead_id).kind {
        NodeKind::Switch(spec) => classify(arena, &spec.branches, default),
        _ => unreachable!(),
    };

    let Node { kind, .. } = arena.get_mut(lead_id);
    let NodeKind::Switch(spec) = kind else { unreachable!() };
    spec.shape = new_shape;
    Ok(())
}
