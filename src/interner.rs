//! Type-definition interner.
//!
//! Every anonymous `container`/`bitfield` occurrence needs a synthesized
//! typedef name. Two occurrences built from the same field list should
//! share one typedef; two occurrences that happen to want the same name
//! but have different shapes must not collide. Resolved deterministically
//! (never by hashing the shape, which would make output order depend on
//! hash iteration) by trying `{name}`, then `{name}_2`, `{name}_3`, ...
//! until a name is found whose previously-registered member lines match, or
//! that is unused.
//!
//! Callers build the candidate typedef's member lines themselves (which may
//! recursively call back into the interner for nested composites) and pass
//! the finished [`Lines`] to [`TypeInterner::register`] rather than a
//! closure — a closure taking `&mut EmitCtx` would need to reborrow the very
//! interner `register` is already holding mutably.
//!
//! One interner is shared across every packet in a run (see
//! [`crate::emit::driver::generate`]), but each packet gets its own fresh
//! [`crate::ir::Arena`] whose [`NodeId`]s start back at 0. A bare `NodeId`
//! is therefore not a safe memo key on its own — two unrelated packets'
//! nodes routinely share an id. The memo key is `(scope, NodeId)`, where
//! `scope` is the caller-supplied per-packet tag threaded through
//! [`crate::emit::EmitCtx`]; `register`'s body-equality retry loop (keyed by
//! rendered content, not by id) is what actually performs cross-packet
//! dedup.

use std::collections::HashMap;

use crate::emit::Lines;
use crate::ir::NodeId;

#[derive(Default)]
pub struct TypeInterner {
    memo: HashMap<(usize, NodeId), String>,
    bodies: HashMap<String, String>,
    /// (name, member lines) in first-registration order, ready for the
    /// header builder to wrap as `typedef struct { ... } name;`.
    pub order: Vec<(String, Lines)>,
}

impl TypeInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(scope, id)`'s already-assigned name, if any.
    pub fn lookup(&self, scope: usize, id: NodeId) -> Option<String> {
        self.memo.get(&(scope, id)).cloned()
    }

    /// Registers `(scope, id)`'s member lines under `desired_name`, reusing
    /// an existing name if its lines match, or retrying with a numeric
    /// suffix if they don't. Call [`TypeInterner::lookup`] first; this
    /// always performs a fresh registration.
    pub fn register(&mut self, scope: usize, id: NodeId, desired_name: &str, body: Lines) -> String {
        let rendered = body.render();

        let mut candidate = desired_name.to_string();
        let mut suffix = 1u32;
        loop {
            match self.bodies.get(&candidate) {
                Some(existing) if *existing == rendered => break,
                Some(_) => {
                    suffix += 1;
                    candidate = format!("{desired_name}_{suffix}");
                }
                None => {
                    self.bodies.insert(candidate.clone(), rendered.clone());
                    self.order.push((candidate.clone(), body.clone()));
                    break;
                }
            }
        }

        self.memo.insert((scope, id), candidate.clone());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_shape_reuses_name() {
        let mut interner = TypeInterner::new();
        let a = interner.register(0, 0, "mcp_type_Foo", Lines::one("int x;"));
        let b = interner.register(1, 0, "mcp_type_Foo", Lines::one("int x;"));
        assert_eq!(a, "mcp_type_Foo");
        assert_eq!(b, "mcp_type_Foo");
        assert_eq!(interner.order.len(), 1);
    }

    #[test]
    fn different_shape_gets_numeric_suffix() {
        let mut interner = TypeInterner::new();
        let a = interner.register(0, 0, "mcp_type_Foo", Lines::one("int x;"));
        let b = interner.register(1, 0, "mcp_type_Foo", Lines::one("float y;"));
        assert_eq!(a, "mcp_type_Foo");
        assert_eq!(b, "mcp_type_Foo_2");
        assert_eq!(interner.order.len(), 2);
    }

    #[test]
    fn lookup_avoids_rebuilding_for_known_id() {
        let mut interner = TypeInterner::new();
        let a = interner.register(0, 0, "mcp_type_Foo", Lines::one("int x;"));
        assert_eq!(interner.lookup(0, 0), Some(a));
        assert_eq!(interner.lookup(0, 7), None);
        assert_eq!(interner.lookup(1, 0), None);
    }

    #[test]
    fn same_node_id_in_different_packets_does_not_alias() {
        // Two different packets' arenas both number their first node 0;
        // distinguishing by scope stops the second packet from aliasing
        // the first packet's typedef through a bare NodeId match.
        let mut interner = TypeInterner::new();
        let a = interner.register(0, 0, "mcp_type_Foo", Lines::one("int x;"));
        assert_eq!(interner.lookup(1, 0), None);
        let b = interner.register(1, 0, "mcp_type_Foo", Lines::one("float y;"));
        assert_eq!(a, "mcp_type_Foo");
        assert_eq!(b, "mcp_type_Foo_2");
    }
}
