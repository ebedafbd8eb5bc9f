//! Set reconciliation between independently sourced listings.
use std::collections::BTreeMap;

/// Restrict `candidates` to the keys already present in `baseline`.
///
/// The returned map holds the `candidates` value for each shared key; keys
/// found on only one side are dropped. Neither input is modified. The
/// baseline only contributes its keys, so its values may be of another type.
pub fn intersect<K, B, T, F>(baseline: &BTreeMap<K, B>, candidates: &[T], key: F) -> BTreeMap<K, T>
where
    K: Ord,
    T: Clone,
    F: Fn(&T) -> K,
{
    let mut out = BTreeMap::new();
    for candidate in candidates {
        let candidate_key = key(candidate);
        if baseline.contains_key(&candidate_key) {
            out.insert(candidate_key, candidate.clone());
        }
    }
    out
}

/// Index a listing by key, keeping the first item for a repeated key.
pub fn index_by<K, T, F>(items: &[T], key: F) -> BTreeMap<K, T>
where
    K: Ord,
    T: Clone,
    F: Fn(&T) -> K,
{
    let mut out = BTreeMap::new();
    for item in items {
        out.entry(key(item)).or_insert_with(|| item.clone());
    }
    out
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
