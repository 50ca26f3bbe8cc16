//! Emission for `option`: a presence byte gates the inner value's own
//! length/encode/decode/free. The presence flag is declared directly (not
//! through the numeric table) since it has no wire representation of its
//! own — it's the source generator's boolean convention for an option tag,
//! not a Protodef `bool` field.

use super::{EmitCtx, Mode};
use crate::emit::Lines;
use crate::ir::option::OptionSpec;
use crate::ir::NodeId;

fn present_qual(qual: &str) -> String {
    format!("{qual}_present")
}

pub fn declare(ctx: &mut EmitCtx, _id: NodeId, spec: &OptionSpec, name: &str) -> Lines {
    let mut l = Lines::one(format!("bool {name}_present;"));
    l.extend(super::emit_declare(ctx, spec.inner));
    l
}

pub fn emit(ctx: &mut EmitCtx, _id: NodeId, spec: &OptionSpec, qual: &str, mode: Mode) -> Lines {
    let present = present_qual(qual);
    match mode {
        Mode::Length => {
            let mut l = Lines::one("*l += sizeof(uint8_t);".to_string());
            l.push(format!("if ({present}) {{"));
            l.extend_indented(super::emit_length(ctx, spec.inner, qual));
            l.push("}".to_string());
            l
        }
        Mode::Encode => {
            let mut l = Lines::one(format!("mcp_encode_byte({present} ? 1 : 0, dest);"));
            l.push(format!("if ({present}) {{"));
            l.extend_indented(super::emit_encode(ctx, spec.inner, qual));
            l.push("}".to_string());
            l
        }
        Mode::Decode => {
            let mut l = Lines::new();
            l.push(format!("{present} = mcp_decode_byte(src) != 0;"));
            l.push(format!("if ({present}) {{"));
            l.extend_indented(super::emit_decode(ctx, spec.inner, qual));
            l.push("}".to_string());
            l
        }
        Mode::Free => {
            let mut l = Lines::new();
            l.push(format!("if ({present}) {{"));
            l.extend_indented(super::emit_free(ctx, spec.inner, qual));
            l.push("}".to_string());
            l
        }
    }
}
