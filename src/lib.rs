//! # Identity-keyed sets
//!
//! Finite collections of opaque data keyed by string identifiers, with the full set algebra:
//! union, intersection, difference, symmetric difference, subset tests, filtering and power sets.
//!
//! - [`Set`] holds untyped [`Elements`](Element).
//! - [`TypedSet`] holds [`TypedElements`](TypedElement) that all carry the same type tag.
//! - [`MutableSet`] and [`MutableTypedSet`] additionally allow in-place insertion and removal.
//!
//! Membership is decided by identifier alone, never by comparing data. Every algebra operation
//! returns a new set and leaves its operands untouched. How an element's data is duplicated when
//! the element is cloned is decided by its [`CloneBehavior`].
//!
//! ```
//! use idsets::prelude::*;
//!
//! let el = |id: &str| Element::new(id, id.len(), CloneBehavior::CopyAssignment);
//! let a = Set::new([el("1"), el("2"), el("3")]);
//! let b = Set::new([el("2"), el("3"), el("4")]);
//!
//! assert_eq!(a.intersect_with(&[&b]).element_ids(), ["2", "3"]);
//! assert_eq!(a.without(&[&b]).element_ids(), ["1"]);
//! assert_eq!(a.symmetric_difference_with(&[&b]).count(), 2);
//! ```

#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod element;
pub mod error;
pub mod mutable;
pub mod prelude;
pub mod set;
pub mod typed;
pub mod utils;

mod tests;

use prelude::*;

/// Small vector.
type SmallVec<T> = smallvec::SmallVec<[T; 4]>;

/// Anything with a stable string identity.
///
/// The identifier is what sets use to decide membership. It must never change over the lifetime of
/// a value, nor across its clones.
pub trait Identify {
    /// The identifier of the value.
    fn identifier(&self) -> &str;
}

/// A seal for [`BaseSet`], avoiding foreign implementations.
trait Seal {}

/// The read surface shared by every set flavour.
///
/// The trait is sealed: it is implemented by [`Set`], [`TypedSet`], [`MutableSet`] and
/// [`MutableTypedSet`] only.
///
/// Methods that hand out elements by value ([`BaseSet::to_map`], [`BaseSet::iter`]) return clones,
/// so that whatever a caller does with them cannot reach the set's own storage when the clone
/// behavior implies copying.
#[allow(private_bounds)]
pub trait BaseSet: Seal {
    /// The type of the stored elements.
    type Item: Identify + Clone;

    /// **Internal method.**
    ///
    /// The backing store of the set.
    fn _store(&self) -> &Store<Self::Item>;

    /// The identifiers of all elements, in insertion order.
    fn element_ids(&self) -> &[String] {
        self._store().ids()
    }

    /// The stored element with the given identifier, if any.
    fn element_by_id(&self, id: &str) -> Option<&Self::Item> {
        self._store().get(id)
    }

    /// Whether an element with the given identifier is stored.
    fn has_element_by_id(&self, id: &str) -> bool {
        self._store().contains(id)
    }

    /// Number of elements.
    fn count(&self) -> usize {
        self._store().len()
    }

    /// Whether the set has no elements.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Clones of all elements, keyed by identifier.
    fn to_map(&self) -> IndexMap<String, Self::Item> {
        self._store().to_map()
    }

    /// Lazily iterate over `(identifier, clone)` pairs.
    ///
    /// Every call starts a fresh, independent iteration.
    fn iter(&self) -> Clones<'_, Self::Item> {
        self._store().clones()
    }

    /// A structural identifier for the set.
    ///
    /// Two sets with the same members (and, for typed sets, the same type) have the same
    /// identifier regardless of the order in which their members were inserted.
    fn identifier(&self) -> String;
}
