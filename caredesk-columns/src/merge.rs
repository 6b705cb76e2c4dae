//! The configuration merge rule.

/// Merges a persisted visible-column order against the caller's current
/// default accessor list.
///
/// - persisted accessors absent from `defaults` are dropped (the column
///   was removed upstream);
/// - `defaults` accessors absent from the persisted order are appended at
///   the end, in default order (new columns default to visible);
/// - no persisted entry, an empty one, or a corrupt one all mean "use the
///   defaults verbatim".
///
/// The result is always a usable order: filtered persisted order, then the
/// newly appended defaults, with duplicates collapsed to first occurrence.
#[must_use]
pub fn merge_visible(persisted: Option<&[String]>, defaults: &[String]) -> Vec<String> {
    let Some(persisted) = persisted else {
        return defaults.to_vec();
    };

    let mut merged: Vec<String> = Vec::with_capacity(defaults.len());
    for accessor in persisted {
        if defaults.contains(accessor) && !merged.contains(accessor) {
            merged.push(accessor.clone());
        }
    }
    for accessor in defaults {
        if !merged.contains(accessor) {
            merged.push(accessor.clone());
        }
    }
    merged
}
