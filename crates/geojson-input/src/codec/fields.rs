//! Field resolution for object literals.

use crate::model::ObjectField;

/// Finds the position of each expected field in an object literal.
///
/// Scans the fields once. For each name in `names` the result holds the
/// 0-based position of the first field with that name, or `None` if it is
/// absent. Unknown fields are ignored.
pub fn resolve_fields<const N: usize>(
    fields: &[ObjectField<'_>],
    names: [&str; N],
) -> [Option<usize>; N] {
    let mut positions = [None; N];
    for (pos, field) in fields.iter().enumerate() {
        if let Some(slot) = names.iter().position(|name| *name == field.name) {
            // First match wins
            if positions[slot].is_none() {
                positions[slot] = Some(pos);
            }
        }
    }
    positions
}

/// Returns the first expected name that occurs more than once.
pub fn find_duplicate<const N: usize>(
    fields: &[ObjectField<'_>],
    names: [&'static str; N],
) -> Option<&'static str> {
    let mut seen = [false; N];
    for field in fields {
        if let Some(slot) = names.iter().position(|name| *name == field.name) {
            if seen[slot] {
                return Some(names[slot]);
            }
            seen[slot] = true;
        }
    }
    None
}
