//! Builds `mcp/particle.h`: the particle-kind enumeration consumed by
//! `particleData`'s runtime decoder to know which trailing payload shape to
//! expect.
//!
//! A handful of particle names in the upstream listing are aliases for an
//! earlier name of the same particle (kept for client compatibility) rather
//! than a distinct kind; emitting a second enumerator for those would give
//! two names the same ordinal with no way to tell which is canonical, so
//! exact-duplicate display names are folded into the first occurrence.

use std::collections::HashSet;

use crate::emit::Lines;
use crate::ident::to_shouty_snake;

pub fn build_particle_header(particle_names: &[String]) -> Lines {
    let mut lines = Lines::new();
    lines.push("#ifndef MCP_PARTICLE_H".to_string());
    lines.push("#define MCP_PARTICLE_H".to_string());
    lines.push(String::new());
    lines.push("typedef enum {".to_string());

    let mut seen = HashSet::new();
    for name in particle_names {
        if !seen.insert(name.clone()) {
            continue;
        }
        lines.push(format!("    MCP_PARTICLE_{},", to_shouty_snake(name)));
    }

    lines.push("    MCP_PARTICLE__MAX".to_string());
    lines.push("} mcp_particle_kind;".to_string());
    lines.push(String::new());
    lines.push("#endif".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_particle_names_fold_to_one_enumerator() {
        let names = vec!["block".to_string(), "block".to_string(), "dust".to_string()];
        let rendered = build_particle_header(&names).render();
        assert_eq!(rendered.matches("MCP_PARTICLE_BLOCK,").count(), 1);
        assert!(rendered.contains("MCP_PARTICLE_DUST,"));
        assert!(rendered.contains("MCP_PARTICLE__MAX"));
    }
}
