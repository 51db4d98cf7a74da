//! Scope key construction for the list numbering store.
//!
//! Every position in a section's content tree gets a stable dotted key:
//! the section root is `section_<id>_level0`, and each nested array extends
//! its parent with `.<field><index?>`. Keys only need to be stable and
//! unique per render pass; their text is never parsed back.

/// Root scope for a section's top-level content array.
pub fn section_root(section_id: &str) -> String {
    format!("section_{section_id}_level0")
}

/// Child scope for an indexed position within a named field.
pub fn child(parent: &str, field: &str, index: usize) -> String {
    format!("{parent}.{field}{index}")
}

/// Child scope for a non-indexed slot (conditional branches and the like).
pub fn slot(parent: &str, name: &str) -> String {
    format!("{parent}.{name}")
}

/// Child scope for one part of a list item (`content` or `sub`).
pub fn item_part(parent: &str, index: usize, part: &str) -> String {
    format!("{parent}.li{index}_{part}")
}
