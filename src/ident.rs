//! Utility functions for working with identifiers in the emitted target
//! source. Mirrors the casing helpers a Protobuf-to-Rust generator would
//! carry, retargeted at the `SCREAMING_SNAKE` / `UpperCamel` conventions the
//! packet-id enumeration and struct names use.

use heck::{ShoutySnakeCase, TitleCase};

/// Converts a packet name (as it appears in the schema, e.g. `SetCompression`)
/// into the `SCREAMING_SNAKE` fragment used inside packet-id enumerators.
pub fn to_shouty_snake(s: &str) -> String {
    s.to_shouty_snake_case()
}

/// Builds the packet-id enumerator name: `MCP_<CL|SV>_<HS|ST|LG|PL>_<NAME>`.
///
/// `source` is `"client"` or `"server"`; `state` is one of `handshaking`,
/// `status`, `login`, `play`.
pub fn packet_id_enum_name(name: &str, source: &str, state: &str) -> String {
    let d = if source == "client" { "CL" } else { "SV" };
    let st = state_abbrev(state);
    format!("MCP_{d}_{st}_{}", to_shouty_snake(name))
}

pub fn state_abbrev(state: &str) -> &'static str {
    match state {
        "handshaking" => "HS",
        "status" => "ST",
        "login" => "LG",
        "play" => "PL",
        other => panic!("unknown protocol state `{other}`"),
    }
}

/// Protodef packet listings key packets by a `packet_FooBar` type name whose
/// value is the title-cased variant of the snake/lowercase listing name.
/// This mirrors the upstream catalog's own `to_camel_case` convention: split
/// on `_`, title-case each word, concatenate.
pub fn to_camel_case(s: &str) -> String {
    s.to_title_case().replace(' ', "")
}

/// Sanitizes a string-switch case key for use as a field-name fragment:
/// strip the quotes the switch emitter wraps case labels in, and replace
/// `:` (common in namespaced identifiers like `minecraft:stone`) with `_`.
pub fn sanitize_case_key(key: &str) -> String {
    key.trim_matches('"').replace(':', "_")
}

/// Strips only the wrapping quotes from a string-switch case key, keeping
/// `:` intact. Used for the runtime `strcmp` comparison value, as opposed
/// to [`sanitize_case_key`] which produces a C identifier fragment.
pub fn strip_case_quotes(key: &str) -> String {
    key.trim_matches('"').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packet_id_naming() {
        assert_eq!(
            packet_id_enum_name("SetCompression", "server", "login"),
            "MCP_SV_LG_SET_COMPRESSION"
        );
        assert_eq!(
            packet_id_enum_name("Handshake", "client", "handshaking"),
            "MCP_CL_HS_HANDSHAKE"
        );
    }

    #[test]
    fn camel_case_from_listing_name() {
        assert_eq!(to_camel_case("set_compression"), "SetCompression");
    }

    #[test]
    fn sanitize_keys() {
        assert_eq!(sanitize_case_key("\"minecraft:stone\""), "minecraft_stone");
        assert_eq!(sanitize_case_key("\"dirt\""), "dirt");
    }
}
