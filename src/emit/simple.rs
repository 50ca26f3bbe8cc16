//! Emission for the variable-length "simple" leaves: `string`, `buffer`,
//! `restBuffer`, `nbt`/`optionalNbt`. Unlike the fixed-width numerics these
//! need a runtime codec (length-prefix handling, NBT tag parsing) rather
//! than a one-line `sizeof`/cast, so each op fully delegates to a runtime
//! helper pair named after the type, mirroring how `slot`/`particleData`
//! delegate in [`super::delegated`].

use super::Mode;
use crate::emit::Lines;
use crate::ir::simple::{BufferCount, BufferSpec};

pub fn string_declare(name: &str) -> Lines {
    Lines::one(format!("char *{name};"))
}

pub fn string_emit(qual: &str, mode: Mode) -> Lines {
    match mode {
        Mode::Length => Lines::one(format!("*l += mcp_length_string({qual});")),
        Mode::Encode => Lines::one(format!("mcp_encode_string({qual}, dest);")),
        Mode::Decode => Lines::one(format!("{qual} = mcp_decode_string(src);")),
        Mode::Free => Lines::one(format!("free({qual});")),
    }
}

pub fn buffer_declare(name: &str) -> Lines {
    let mut l = Lines::new();
    l.push(format!("uint8_t *{name};"));
    l.push(format!("int32_t {name}_len;"));
    l
}

pub fn buffer_emit(spec: &BufferSpec, qual: &str, mode: Mode) -> Lines {
    let len_qual = format!("{qual}_len");
    match &spec.count {
        BufferCount::Prefixed(count_spec) => match mode {
            Mode::Length => {
                let mut l = crate::ir::numeric::length(count_spec, &len_qual, "l");
                l.push(format!("*l += {len_qual};"));
                l
            }
            Mode::Encode => {
                let mut l = crate::ir::numeric::encode(count_spec, &len_qual);
                l.push(format!("memcpy(dest->data + dest->len, {qual}, {len_qual});"));
                l.push(format!("dest->len += {len_qual};"));
                l
            }
            Mode::Decode => {
                let mut l = crate::ir::numeric::decode(count_spec, &len_qual);
                l.push(format!("{qual} = malloc({len_qual});"));
                l.push(format!("memcpy({qual}, src->data + src->pos, {len_qual});"));
                l.push(format!("src->pos += {len_qual};"));
                l
            }
            Mode::Free => Lines::one(format!("free({qual});")),
        },
        BufferCount::Fixed(count) => match mode {
            Mode::Length => Lines::one(format!("*l += {count};")),
            Mode::Encode => {
                let mut l = Lines::new();
                l.push(format!("memcpy(dest->data + dest->len, {qual}, {count});"));
                l.push(format!("dest->len += {count};"));
                l
            }
            Mode::Decode => {
                let mut l = Lines::new();
                l.push(format!("memcpy({qual}, src->data + src->pos, {count});"));
                l.push(format!("src->pos += {count};"));
                l
            }
            Mode::Free => Lines::new(),
        },
    }
}

pub fn rest_buffer_declare(name: &str) -> Lines {
    let mut l = Lines::new();
    l.push(format!("uint8_t *{name};"));
    l.push(format!("int32_t {name}_len;"));
    l
}

/// `restBuffer` consumes whatever remains of the source buffer and owns a
/// freshly allocated copy of it; see `DESIGN.md` Open Question 2.
pub fn rest_buffer_emit(qual: &str, mode: Mode) -> Lines {
    let len_qual = format!("{qual}_len");
    match mode {
        Mode::Length => Lines::one(format!("*l += {len_qual};")),
        Mode::Encode => {
            let mut l = Lines::new();
            l.push(format!("memcpy(dest->data + dest->len, {qual}, {len_qual});"));
            l.push(format!("dest->len += {len_qual};"));
            l
        }
        Mode::Decode => {
            let mut l = Lines::new();
            l.push(format!("{len_qual} = src->len - src->pos;"));
            l.push(format!("{qual} = malloc({len_qual});"));
            l.push(format!("memcpy({qual}, src->data + src->pos, {len_qual});"));
            l.push(format!("src->pos += {len_qual};"));
            l
        }
        Mode::Free => Lines::one(format!("free({qual});")),
    }
}

pub fn nbt_declare(name: &str) -> Lines {
    Lines::one(format!("mcp_type_Nbt {name};"))
}

pub fn nbt_emit(qual: &str, mode: Mode, optional: bool) -> Lines {
    let suffix = if optional { "optional_nbt" } else { "nbt" };
    match mode {
        Mode::Length => Lines::one(format!("*l += mcp_length_{suffix}(&{qual});")),
        Mode::Encode => Lines::one(format!("mcp_encode_{suffix}(&{qual}, dest);")),
        Mode::Decode => Lines::one(format!("mcp_decode_{suffix}(&{qual}, src);")),
        Mode::Free => Lines::one(format!("mcp_free_{suffix}(&{qual});")),
    }
}
