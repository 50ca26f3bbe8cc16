//! Top-level orchestration: walks every packet in a loaded [`ProtocolTree`]
//! and assembles the three output artifacts (`mcp/particle.h`,
//! `mcp/protocol.h`, `protocol.c`).
//!
//! One [`TypeInterner`] is shared across every packet in the run, so two
//! packets whose nested containers happen to have the same field shape get
//! one typedef between them instead of two.

use crate::emit::{particle, EmitCtx, Lines};
use crate::error::Result;
use crate::ident::{packet_id_enum_name, state_abbrev, to_camel_case};
use crate::interner::TypeInterner;
use crate::ir::packet::Packet;
use crate::schema_types::ProtocolTree;

pub struct GeneratedOutput {
    pub particle_h: String,
    pub protocol_h: String,
    pub protocol_c: String,
}

struct Emitted {
    state: String,
    source: String,
    ordinal: i64,
    enum_name: String,
    camel: String,
}

pub fn generate(tree: &ProtocolTree) -> Result<GeneratedOutput> {
    let mut interner = TypeInterner::new();
    let mut header = Lines::new();
    let mut impl_file = Lines::new();
    let mut emitted = Vec::new();

    header.push("#ifndef MCP_PROTOCOL_H".to_string());
    header.push("#define MCP_PROTOCOL_H".to_string());
    header.push(String::new());
    header.push("#include <stdint.h>".to_string());
    header.push("#include <stdbool.h>".to_string());
    header.push("#include \"mcp/particle.h\"".to_string());
    header.push(String::new());

    impl_file.push("#include <string.h>".to_string());
    impl_file.push("#include <stdlib.h>".to_string());
    impl_file.push("#include \"mcp/protocol.h\"".to_string());
    impl_file.push(String::new());

    let mut scope = 0usize;
    for (state, source, packets) in &tree.packets {
        for raw in packets {
            let packet = Packet::build(raw, state, source)?;
            let camel = to_camel_case(&packet.name);
            let struct_name = format!("mcp_packet_{camel}");
            let enum_name = packet_id_enum_name(&packet.name, source, state);

            let mut ctx = EmitCtx::new(&packet.arena, &mut interner, scope);
            scope += 1;

            header.push("typedef struct {".to_string());
            for &f in &packet.fields {
                header.extend_indented(crate::emit::emit_declare(&mut ctx, f));
            }
            header.push(format!("}} {struct_name};"));
            header.push(String::new());

            emit_packet_fns(&mut impl_file, &mut ctx, &packet, &struct_name);

            emitted.push(Emitted {
                state: state.clone(),
                source: source.clone(),
                ordinal: packet.ordinal,
                enum_name,
                camel,
            });
        }
    }

    // Typedefs synthesized for nested anonymous containers/bitfields are
    // emitted once, after every packet has been visited (a packet built
    // later in iteration order may be the first to need a given shape).
    let mut typedefs = Lines::new();
    for (name, body) in &interner.order {
        typedefs.push("typedef struct {".to_string());
        typedefs.extend_indented(body.clone());
        typedefs.push(format!("}} {name};"));
        typedefs.push(String::new());
    }
    header = splice_typedefs_before_packets(typedefs, header);

    emit_packet_id_enums(&mut header, &emitted);
    emit_handler_tables(&mut header, &mut impl_file, &emitted);

    header.push("#endif".to_string());

    Ok(GeneratedOutput {
        particle_h: particle::build_particle_header(&tree.particle_names).render(),
        protocol_h: header.render(),
        protocol_c: impl_file.render(),
    })
}

/// Typedefs must precede the packet structs that reference them; the
/// interner only knows the full set after every packet has been walked, so
/// they're spliced in right after the header's `#include` block.
fn splice_typedefs_before_packets(typedefs: Lines, header: Lines) -> Lines {
    if typedefs.is_empty() {
        return header;
    }
    let mut out = Lines::new();
    for line in header.lines() {
        out.push(line.clone());
        if line.starts_with("#include \"mcp/particle.h\"") {
            out.push(String::new());
            out.extend(typedefs.clone());
        }
    }
    out
}

fn emit_packet_fns(impl_file: &mut Lines, ctx: &mut EmitCtx, packet: &Packet, struct_name: &str) {
    let camel = to_camel_case(&packet.name);

    impl_file.push(format!("void mcp_length_packet_{camel}({struct_name} *this, int32_t *l) {{"));
    for &f in &packet.fields {
        let qual = format!("this->{}", ctx.arena.get(f).name);
        impl_file.extend_indented(crate::emit::emit_length(ctx, f, &qual));
    }
    impl_file.push("}".to_string());
    impl_file.push(String::new());

    impl_file.push(format!(
        "void mcp_encode_packet_{camel}({struct_name} *this, mcp_buffer_t *dest) {{"
    ));
    for &f in &packet.fields {
        let qual = format!("this->{}", ctx.arena.get(f).name);
        impl_file.extend_indented(crate::emit::emit_encode(ctx, f, &qual));
    }
    impl_file.push("}".to_string());
    impl_file.push(String::new());

    impl_file.push(format!(
        "void mcp_decode_packet_{camel}({struct_name} *this, mcp_buffer_t *src) {{"
    ));
    for &f in &packet.fields {
        let qual = format!("this->{}", ctx.arena.get(f).name);
        impl_file.extend_indented(crate::emit::emit_decode(ctx, f, &qual));
    }
    impl_file.push("}".to_string());
    impl_file.push(String::new());

    impl_file.push(format!("void mcp_free_packet_{camel}({struct_name} *this) {{"));
    for &f in &packet.fields {
        let qual = format!("this->{}", ctx.arena.get(f).name);
        impl_file.extend_indented(crate::emit::emit_free(ctx, f, &qual));
    }
    impl_file.push("}".to_string());
    impl_file.push(String::new());
}

fn emit_packet_id_enums(header: &mut Lines, emitted: &[Emitted]) {
    header.push(String::new());
    header.push("typedef enum {".to_string());
    for e in emitted {
        header.push(format!("    {} = {},", e.enum_name, e.ordinal));
    }
    header.push("} mcp_packet_id;".to_string());
    header.push(String::new());
}

/// One table per (state, source), sized to exactly `__MAX` entries (the
/// highest ordinal in that listing, plus one) — see `DESIGN.md` Open
/// Question 4 on the off-by-one this deliberately does not reproduce.
fn emit_handler_tables(header: &mut Lines, impl_file: &mut Lines, emitted: &[Emitted]) {
    header.push("typedef struct {".to_string());
    header.push("    void (*length)(void *pkt, int32_t *l);".to_string());
    header.push("    void (*encode)(void *pkt, mcp_buffer_t *dest);".to_string());
    header.push("    void (*decode)(void *pkt, mcp_buffer_t *src);".to_string());
    header.push("    void (*free)(void *pkt);".to_string());
    header.push("} mcp_packet_handlers_t;".to_string());
    header.push(String::new());

    let mut groups: Vec<(String, String)> = Vec::new();
    for e in emitted {
        let key = (e.state.clone(), e.source.clone());
        if !groups.iter().any(|g| *g == key) {
            groups.push(key);
        }
    }

    for (state, source) in groups {
        let max_ordinal = emitted
            .iter()
            .filter(|e| e.state == state && e.source == source)
            .map(|e| e.ordinal)
            .max()
            .unwrap_or(-1);
        let count = max_ordinal + 1;
        let table_name = format!(
            "MCP_HANDLERS_{}_{}",
            if source == "client" { "CL" } else { "SV" },
            state_abbrev(&state)
        );

        header.push(format!("extern const mcp_packet_handlers_t {table_name}[{count}];"));

        impl_file.push(format!("const mcp_packet_handlers_t {table_name}[{count}] = {{"));
        for ord in 0..count {
            if let Some(e) = emitted
                .iter()
                .find(|e| e.state == state && e.source == source && e.ordinal == ord)
            {
                impl_file.push(format!(
                    "    [{}] = {{ (void*)mcp_length_packet_{}, (void*)mcp_encode_packet_{}, (void*)mcp_decode_packet_{}, (void*)mcp_free_packet_{} }},",
                    e.ordinal, e.camel, e.camel, e.camel, e.camel
                ));
            }
        }
        impl_file.push("};".to_string());
        impl_file.push(String::new());
    }
}
