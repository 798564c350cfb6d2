//! Storage and algorithms shared by every set flavour.
//!
//! Taking most of the space within the file is [`Store`], an insertion-ordered map from
//! identifiers to elements. Every binary set operation is implemented here in terms of hash
//! lookups, so that combining sets `A` and `B` costs `O(|A| + |B|)`.

use crate::prelude::*;
use sha2::{Digest, Sha256};
use std::cell::OnceCell;

/// Computes an identifier for a collection of element identifiers.
///
/// The identifiers are sorted before hashing, so the result only depends on membership and never
/// on insertion order. Each identifier is length-prefixed, hence no two distinct collections can be
/// confused through concatenation. The optional `ty` is hashed first.
pub(crate) fn structural_id<'a, I: IntoIterator<Item = &'a str>>(
    ty: Option<&str>,
    ids: I,
) -> String {
    let mut ids: Vec<_> = ids.into_iter().collect();
    ids.sort_unstable();

    let mut hasher = Sha256::new();
    let mut feed = |part: &str| {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    };

    if let Some(ty) = ty {
        feed(ty);
    }
    for id in ids {
        feed(id);
    }

    format!("{:x}", hasher.finalize())
}

/// An insertion-ordered map from identifiers to elements, together with a memoized list of the
/// identifiers.
///
/// ## Invariants
///
/// - Every key equals the [`Identify::identifier`] of its value.
/// - If the identifier cache is filled, it lists exactly the keys of the map, in order. All
///   mutation goes through [`Store::edit`], which empties the cache.
pub struct Store<E> {
    /// The elements, keyed by identifier.
    elements: IndexMap<String, E>,
    /// Lazily computed list of the keys of `elements`.
    ids: OnceCell<Vec<String>>,
}

// -------------------- Basic methods -------------------- //

impl<E> Default for Store<E> {
    fn default() -> Self {
        Self {
            elements: IndexMap::new(),
            ids: OnceCell::new(),
        }
    }
}

impl<E: Clone> Clone for Store<E> {
    fn clone(&self) -> Self {
        Self::from_entries(self.elements.iter().map(|(id, el)| (id.clone(), el.clone())))
    }
}

/// Later entries with a repeated identifier overwrite earlier ones.
impl<E: Identify> FromIterator<E> for Store<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().map(|el| (el.identifier().to_owned(), el)))
    }
}

impl<E> Store<E> {
    /// Builds a store from `(identifier, element)` pairs.
    ///
    /// The caller guarantees that every identifier is that of its element.
    pub(crate) fn from_entries<I: IntoIterator<Item = (String, E)>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
            ids: OnceCell::new(),
        }
    }

    /// Number of stored elements.
    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    /// The element with a given identifier.
    pub(crate) fn get(&self, id: &str) -> Option<&E> {
        self.elements.get(id)
    }

    /// Whether an element with the given identifier is stored.
    pub(crate) fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// The stored elements in insertion order.
    pub(crate) fn values(&self) -> indexmap::map::Values<'_, String, E> {
        self.elements.values()
    }

    /// The identifiers in insertion order, recomputed only after a mutation.
    pub(crate) fn ids(&self) -> &[String] {
        self.ids.get_or_init(|| {
            trace!(len = self.elements.len(), "recomputing identifier cache");
            self.elements.keys().cloned().collect()
        })
    }

    /// Mutable access to the elements. Invalidates the identifier cache.
    pub(crate) fn edit(&mut self) -> &mut IndexMap<String, E> {
        self.ids.take();
        &mut self.elements
    }

    /// Whether the identifier cache is currently filled.
    #[cfg(test)]
    pub(crate) fn is_cached(&self) -> bool {
        self.ids.get().is_some()
    }
}

// -------------------- Algebra -------------------- //

impl<E: Clone> Store<E> {
    /// Clones of all elements, keyed by identifier.
    pub(crate) fn to_map(&self) -> IndexMap<String, E> {
        self.clone().elements
    }

    /// Lazily iterate over clones of the elements.
    pub(crate) fn clones(&self) -> Clones<'_, E> {
        Clones(self.elements.iter())
    }

    /// Whether every identifier in `self` is in `other`.
    pub(crate) fn is_subset_of(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.elements.keys().all(|id| other.contains(id))
    }

    /// Clones of the elements satisfying a predicate.
    pub(crate) fn filter<P: FnMut(&E) -> bool>(&self, mut pred: P) -> Self {
        Self::from_entries(
            self.elements
                .iter()
                .filter(|(_, el)| pred(el))
                .map(|(id, el)| (id.clone(), el.clone())),
        )
    }

    /// Elements of `self` found in none of the operands.
    pub(crate) fn without(&self, others: &[&Self]) -> Self {
        self.filter_ids(|id| !others.iter().any(|other| other.contains(id)))
    }

    /// Elements of `self` found in all of the operands.
    pub(crate) fn intersect(&self, others: &[&Self]) -> Self {
        self.filter_ids(|id| others.iter().all(|other| other.contains(id)))
    }

    /// Left fold of the operands into `self`. Entries of `self` are never replaced. Among the
    /// operands, a later entry replaces an earlier one with the same identifier, keeping its
    /// position.
    pub(crate) fn union(&self, others: &[&Self]) -> Self {
        let mut res = self.clone();
        let elements = &mut res.elements;
        for other in others {
            elements.reserve(other.len());
            for (id, el) in &other.elements {
                if !self.contains(id) {
                    elements.insert(id.clone(), el.clone());
                }
            }
        }

        res
    }

    /// Pairwise fold `res = (res \ other) ∪ (other \ res)` over the operands, in order.
    pub(crate) fn symmetric_difference(&self, others: &[&Self]) -> Self {
        let mut res = self.clone();
        let mut fresh = Vec::new();
        for other in others {
            // Compute `other \ res` before `res` is shrunk.
            fresh.clear();
            fresh.extend(
                other
                    .elements
                    .iter()
                    .filter(|(id, _)| !res.contains(id))
                    .map(|(id, el)| (id.clone(), el.clone())),
            );

            res.elements.retain(|id, _| !other.contains(id));
            res.elements.extend(fresh.drain(..));
        }

        res
    }

    /// Clones of the elements whose identifiers satisfy a predicate.
    fn filter_ids<P: FnMut(&str) -> bool>(&self, mut pred: P) -> Self {
        Self::from_entries(
            self.elements
                .iter()
                .filter(|(id, _)| pred(id))
                .map(|(id, el)| (id.clone(), el.clone())),
        )
    }
}

// -------------------- Iterators -------------------- //

/// Iterates over `(identifier, element)` pairs of a set, cloning each element as it is reached.
pub struct Clones<'a, E>(indexmap::map::Iter<'a, String, E>);

impl<'a, E: Clone> Iterator for Clones<'a, E> {
    type Item = (&'a str, E);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(id, el)| (id.as_str(), el.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<E: Clone> ExactSizeIterator for Clones<'_, E> {}
