//! Resolves a Protodef dotted `compareTo`/count-field path (`"../type"`,
//! `"count"`, `"../../action"`) to a qualified C expression.
//!
//! Because every container/array emitter builds a child's `qual` by
//! appending exactly one `->segment` (or `[index]`) onto its own `qual`
//! (see [`crate::emit`]), the access path to any sibling or ancestor field
//! is already fully encoded in the current node's `qual` string. Resolving
//! a relative path is therefore pure string surgery — climb one `->segment`
//! per leading `..`, then append whatever's left — with no need to re-walk
//! the arena's parent links.
//!
//! `switch.compareTo` and array foreign-counts use this identically except
//! for one asymmetry carried over from the source generator: a
//! `compareTo` result that doesn't already start from `this` gets an
//! explicit `this->` anchor prepended, while a foreign-count never does.
//! `resolve` returns the bare climbed-and-appended path; callers choose
//! whether to anchor it.

/// Climbs `qual` by one segment per leading `..` in `raw`, then appends the
/// remaining (non-`..`) path segments joined by `->`.
pub fn resolve(qual: &str, raw: &str) -> String {
    let mut climb = 0usize;
    let mut fields = Vec::new();
    for part in raw.split('/') {
        if part.is_empty() {
            continue;
        }
        if part == ".." {
            climb += 1;
        } else {
            fields.push(part);
        }
    }

    let mut base = qual.to_string();
    for _ in 0..climb {
        base = match base.rsplit_once("->") {
            Some((head, _)) => head.to_string(),
            None => base,
        };
    }

    if fields.is_empty() {
        base
    } else {
        format!("{base}->{}", fields.join("->"))
    }
}

/// `switch.compareTo` resolution: anchors the result at `this->` if the
/// climbed path isn't already rooted there.
pub fn resolve_compare_to(qual: &str, raw: &str) -> String {
    let resolved = resolve(qual, raw);
    if resolved.starts_with("this->") || resolved == "this" {
        resolved
    } else {
        format!("this->{resolved}")
    }
}

/// Array foreign-count resolution: used exactly as climbed, never re-anchored.
pub fn resolve_foreign_count(qual: &str, raw: &str) -> String {
    resolve(qual, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_field_one_level_up() {
        assert_eq!(resolve("this->items->entry", "../count"), "this->items->count");
    }

    #[test]
    fn two_levels_up() {
        assert_eq!(resolve("this->a->b->c", "../../x"), "this->a->x");
    }

    #[test]
    fn bare_name_same_level() {
        assert_eq!(resolve("this->entry", "count"), "this->entry->count");
    }

    #[test]
    fn compare_to_anchors_at_this() {
        assert_eq!(resolve_compare_to("this->value", "../type"), "this->type");
    }

    #[test]
    fn foreign_count_is_not_anchored_twice() {
        assert_eq!(resolve_foreign_count("this->value", "../count"), "this->count");
    }
}
