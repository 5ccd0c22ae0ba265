//! Keyed reconciliation of ordered collections.
//!
//! The previous collection is indexed by an identity key. Each new element
//! whose key was present before is merged with its predecessor; the others
//! are kept as they are. Old elements missing from the new collection are
//! dropped and the output follows the order of the new collection.

use std::collections::HashMap;
use std::hash::Hash;

pub fn merge_by_key<T, K, F, M>(old: &[T], new: Vec<T>, key: F, mut merge: M) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
    M: FnMut(&T, T) -> T,
{
    let mut index: HashMap<K, &T> = HashMap::with_capacity(old.len());
    for element in old {
        // first occurrence wins
        index.entry(key(element)).or_insert(element);
    }

    new.into_iter()
        .map(|element| match index.get(&key(&element)) {
            Some(&previous) => merge(previous, element),
            None => element,
        })
        .collect()
}

/// Merge elements occupying the same position.
pub fn merge_by_position<T, M>(old: &[T], new: Vec<T>, mut merge: M) -> Vec<T>
where
    M: FnMut(&T, T) -> T,
{
    new.into_iter()
        .enumerate()
        .map(|(position, element)| match old.get(position) {
            Some(previous) => merge(previous, element),
            None => element,
        })
        .collect()
}
