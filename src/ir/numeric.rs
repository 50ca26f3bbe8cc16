//! Fixed-width and variable-length numeric leaves: the `u8`..`f64` family,
//! `varint`/`varlong`, and the two numeric-shaped runtime helpers (`UUID`,
//! `position`) that share the same length/encode/decode call shape.
//!
//! Grounded on the `num_*` class family in the original implementation:
//! each subclass only ever overrides `typename`, `postfix`, `size`, and
//! optionally the decode call's pointer cast. That hierarchy collapses
//! cleanly into one data table plus a handful of emission rules, which is
//! exactly the "avoid typename-keyed `match` trees per call site" shape
//! `prost-build`'s `scalar.rs`-style field-descriptor tables use.

use crate::emit::Lines;

/// How a postfix codec pair's decode call is shaped.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum DecodeShape {
    /// `mcp_decode_{postfix}(&{name}, src);` — the default, out-param style.
    PointerOut,
    /// `mcp_decode_{postfix}(({cast}*)&{name}, src);` — out-param through a
    /// cast to the codec's unsigned counterpart, for signed fixed-width ints.
    PointerOutCast(&'static str),
    /// `{name} = mcp_decode_{postfix}(src);` — value-returning. Only `varint`
    /// itself uses this; `varlong` shares its postfix but not this shape,
    /// faithfully carrying over the original's asymmetry between the two.
    ValueReturn,
}

/// How a type's length contribution is computed.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum LengthShape {
    /// `*variable += sizeof({name});`
    SizeOf,
    /// `*variable += mcp_length_varint({name});`
    Varint,
    /// `*variable += mcp_length_varlong({name});`
    Varlong,
    /// A bespoke length helper taking a pointer, for runtime-computed shapes
    /// (`position`) rather than a fixed codec width.
    Helper(&'static str),
}

#[derive(Clone, Copy)]
pub struct NumericSpec {
    pub typename: &'static str,
    pub postfix: &'static str,
    pub length: LengthShape,
    pub decode: DecodeShape,
    /// Encoder passes `{name}` by value (`mcp_encode_{postfix}(name, dest)`)
    /// rather than by reference (`&name`). True for every scalar numeric;
    /// false for `UUID`/`position`, whose encoders take the address of a
    /// multi-byte value.
    pub encode_by_value: bool,
}

macro_rules! spec {
    ($typename:expr, $postfix:expr, $length:expr, $decode:expr, $by_value:expr) => {
        NumericSpec {
            typename: $typename,
            postfix: $postfix,
            length: $length,
            decode: $decode,
            encode_by_value: $by_value,
        }
    };
}

/// Looks up the numeric spec for a bare Protodef tag, or `None` if `tag`
/// does not name a numeric/numeric-shaped leaf.
pub fn lookup(tag: &str) -> Option<NumericSpec> {
    Some(match tag {
        "u8" | "bool" => spec!("uint8_t", "byte", LengthShape::SizeOf, DecodeShape::PointerOutCast("uint8_t"), true),
        "i8" => spec!("int8_t", "byte", LengthShape::SizeOf, DecodeShape::PointerOutCast("uint8_t"), true),
        "u16" => spec!("uint16_t", "be16", LengthShape::SizeOf, DecodeShape::PointerOut, true),
        "i16" => spec!("int16_t", "be16", LengthShape::SizeOf, DecodeShape::PointerOutCast("uint16_t"), true),
        "u32" => spec!("uint32_t", "be32", LengthShape::SizeOf, DecodeShape::PointerOut, true),
        "i32" => spec!("int32_t", "be32", LengthShape::SizeOf, DecodeShape::PointerOutCast("uint32_t"), true),
        "u64" => spec!("uint64_t", "be64", LengthShape::SizeOf, DecodeShape::PointerOut, true),
        "i64" => spec!("int64_t", "be64", LengthShape::SizeOf, DecodeShape::PointerOutCast("uint64_t"), true),
        "f32" => spec!("float", "bef32", LengthShape::SizeOf, DecodeShape::PointerOut, true),
        "f64" => spec!("double", "bef64", LengthShape::SizeOf, DecodeShape::PointerOut, true),
        "varint" | "zigzag32" => spec!("int64_t", "varint", LengthShape::Varint, DecodeShape::ValueReturn, true),
        "varlong" | "zigzag64" => spec!("int64_t", "varint", LengthShape::Varlong, DecodeShape::PointerOut, true),
        "UUID" => spec!("mcp_type_UUID", "type_UUID", LengthShape::SizeOf, DecodeShape::PointerOut, false),
        "position" => spec!(
            "mcp_type_Position",
            "type_Position",
            LengthShape::Helper("mcp_length_type_Position"),
            DecodeShape::PointerOut,
            false
        ),
        _ => return None,
    })
}

pub fn declare(spec: &NumericSpec, name: &str) -> Lines {
    Lines::one(format!("{} {name};", spec.typename))
}

pub fn length(spec: &NumericSpec, qual: &str, length_var: &str) -> Lines {
    match spec.length {
        LengthShape::SizeOf => Lines::one(format!("*{length_var} += sizeof({qual});")),
        LengthShape::Varint => Lines::one(format!("*{length_var} += mcp_length_varint({qual});")),
        LengthShape::Varlong => Lines::one(format!("*{length_var} += mcp_length_varlong({qual});")),
        LengthShape::Helper(helper) => Lines::one(format!("*{length_var} += {helper}(&{qual});")),
    }
}

pub fn encode(spec: &NumericSpec, qual: &str) -> Lines {
    let arg = if spec.encode_by_value {
        qual.to_string()
    } else {
        format!("&{qual}")
    };
    Lines::one(format!("mcp_encode_{}({arg}, dest);", spec.postfix))
}

pub fn decode(spec: &NumericSpec, qual: &str) -> Lines {
    match spec.decode {
        DecodeShape::PointerOut => Lines::one(format!("mcp_decode_{}(&{qual}, src);", spec.postfix)),
        DecodeShape::PointerOutCast(cast) => {
            Lines::one(format!("mcp_decode_{}(({cast}*)&{qual}, src);", spec.postfix))
        }
        DecodeShape::ValueReturn => Lines::one(format!("{qual} = mcp_decode_{}(src);", spec.postfix)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint_varlong_decode_shape_differs() {
        let varint = lookup("varint").unwrap();
        let varlong = lookup("varlong").unwrap();
        assert_eq!(decode(&varint, "v").render(), "v = mcp_decode_varint(src);");
        assert_eq!(decode(&varlong, "v").render(), "mcp_decode_varint(&v, src);");
    }

    #[test]
    fn bool_aliases_u8() {
        let b = lookup("bool").unwrap();
        let u8_ = lookup("u8").unwrap();
        assert_eq!(b.typename, u8_.typename);
        assert_eq!(b.postfix, u8_.postfix);
    }

    #[test]
    fn signed_decode_casts_to_unsigned() {
        let i16_ = lookup("i16").unwrap();
        assert_eq!(
            decode(&i16_, "this->x").render(),
            "mcp_decode_be16((uint16_t*)&this->x, src);"
        );
    }
}
