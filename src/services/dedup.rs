// src/services/dedup.rs

//! First-seen-wins deduplication by identifier.

use std::collections::HashSet;

use crate::models::Identified;

/// Keep the first item for each id, preserving input order.
pub fn dedup_by_id<T: Identified>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.id().to_string()) {
            unique.push(item);
        }
    }
    unique
}
