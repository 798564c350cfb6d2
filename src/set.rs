//! Identity-keyed sets [`Set`].

use crate::prelude::*;

/// A finite set of [`Elements`](Element), keyed by identifier.
///
/// Membership is decided by identifier alone. Building a set from elements with a repeated
/// identifier keeps the last of them. Every algebra operation returns a new set of clones, and
/// leaves its operands untouched.
///
/// ## Invariants
///
/// Every stored element is keyed by its own identifier.
pub struct Set<T> {
    /// The elements of the set.
    elements: Store<Element<T>>,
}

// -------------------- Basic traits -------------------- //

impl<T> Default for Set<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Clones every element, as dictated by its [`CloneBehavior`].
impl<T> Clone for Set<T> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
        }
    }
}

impl<T> FromIterator<Element<T>> for Set<T> {
    fn from_iter<I: IntoIterator<Item = Element<T>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a, T> IntoIterator for &'a Set<T> {
    type Item = (&'a str, Element<T>);
    type IntoIter = Clones<'a, Element<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sets are equal when they have the same identifiers.
impl<T> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count() && self.is_subset_of(other)
    }
}

impl<T> Eq for Set<T> {}

impl<T: Debug> Debug for Set<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_set().entries(self.elements.values()).finish()
    }
}

/// Displays the identifiers of a set in roster notation.
impl<T> Display for Set<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{{{}}}", self.element_ids().join(", "))
    }
}

impl<T> crate::Seal for Set<T> {}

impl<T> BaseSet for Set<T> {
    type Item = Element<T>;

    fn _store(&self) -> &Store<Element<T>> {
        &self.elements
    }

    fn identifier(&self) -> String {
        structural_id(None, self.element_ids().iter().map(String::as_str))
    }
}

// -------------------- Constructions -------------------- //

impl<T> Set<T> {
    /// Builds a set from some elements. Later elements overwrite earlier ones with the same
    /// identifier.
    pub fn new<I: IntoIterator<Item = Element<T>>>(elements: I) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    /// The empty set Ø.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            elements: Store::default(),
        }
    }

    /// **Internal method.**
    ///
    /// Wraps a store.
    pub(crate) fn from_store(elements: Store<Element<T>>) -> Self {
        Self { elements }
    }

    /// **Internal method.**
    ///
    /// Mutable access to the store.
    pub(crate) fn store_mut(&mut self) -> &mut Store<Element<T>> {
        &mut self.elements
    }

    /// Wraps the set into an element, identified by [`BaseSet::identifier`].
    #[must_use]
    pub fn into_element(self) -> Element<Self> {
        Element::new(self.identifier(), self, CloneBehavior::CopyAssignment)
    }

    /// Collects the stores of some operands.
    fn stores<'a>(sets: &[&'a Self]) -> SmallVec<&'a Store<Element<T>>> {
        sets.iter().map(|set| &set.elements).collect()
    }
}

// -------------------- Relations -------------------- //

impl<T> Set<T> {
    /// Whether the set holds an element with the identifier of `el`. Data is never compared.
    #[must_use]
    pub fn has_element(&self, el: &Element<T>) -> bool {
        self.has_element_by_id(el.identifier())
    }

    /// Subset relation ⊆, by identifier.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.elements.is_subset_of(&other.elements)
    }
}

// -------------------- Algebra -------------------- //

impl<T> Set<T> {
    /// Difference x \ (y₀ ∪ y₁ ∪ …): the elements of `self` found in none of the operands.
    ///
    /// Without operands, this is a clone of `self`.
    #[must_use]
    pub fn without(&self, sets: &[&Self]) -> Self {
        Self::from_store(self.elements.without(&Self::stores(sets)))
    }

    /// Intersection x ∩ y₀ ∩ y₁ ∩ …: the elements of `self` found in every operand.
    ///
    /// Without operands, this is a clone of `self`.
    #[must_use]
    pub fn intersect_with(&self, sets: &[&Self]) -> Self {
        Self::from_store(self.elements.intersect(&Self::stores(sets)))
    }

    /// Union x ∪ y₀ ∪ y₁ ∪ ….
    ///
    /// When an identifier is found more than once, the element from `self` is kept. Otherwise, the
    /// element from the latest operand holding the identifier is kept.
    #[must_use]
    pub fn union_with(&self, sets: &[&Self]) -> Self {
        Self::from_store(self.elements.union(&Self::stores(sets)))
    }

    /// Symmetric difference ((x △ y₀) △ y₁) △ …, folded over the operands in order.
    ///
    /// Without operands, this is a clone of `self`.
    #[must_use]
    pub fn symmetric_difference_with(&self, sets: &[&Self]) -> Self {
        Self::from_store(self.elements.symmetric_difference(&Self::stores(sets)))
    }

    /// Set specification: clones of the elements satisfying a predicate.
    #[must_use]
    pub fn filter<P: FnMut(&Element<T>) -> bool>(&self, pred: P) -> Self {
        Self::from_store(self.elements.filter(pred))
    }

    /// Powerset 2^x.
    ///
    /// The i-th subset holds the j-th element of `self` (in insertion order) exactly when the j-th
    /// bit of i is set. Each subset is wrapped by [`Set::into_element`]. This takes `O(n · 2ⁿ)`
    /// time for a set with `n` elements.
    ///
    /// ## Panics
    ///
    /// Panics if `n` is not smaller than the bit width of `usize`.
    #[must_use]
    pub fn power_set(&self) -> Set<Self> {
        let members: Vec<_> = self.elements.values().collect();
        power_set_masks(members.len())
            .map(|mask| {
                mask.view_bits::<Lsb0>()
                    .iter_ones()
                    .map(|j| members[j].clone())
                    .collect::<Self>()
                    .into_element()
            })
            .collect()
    }
}

/// The bitmasks selecting every subset of a set with `n` elements.
///
/// ## Panics
///
/// Panics if `n` is not smaller than the bit width of `usize`.
pub(crate) fn power_set_masks(n: usize) -> std::ops::Range<usize> {
    assert!(
        n < usize::BITS as usize,
        "the power set of a set with {n} elements can't be enumerated"
    );

    debug!(n, "enumerating power set");
    0..(1 << n)
}

/// Tests for [`Set`].
#[cfg(test)]
mod set {
    use super::*;

    fn set(ids: &[&str]) -> Set<String> {
        ids.iter()
            .map(|&id| Element::new(id, id.to_owned(), CloneBehavior::CloneWherePossible))
            .collect()
    }

    #[test]
    fn display() {
        assert_eq!(set(&[]).to_string(), "{}");
        assert_eq!(set(&["b", "a"]).to_string(), "{b, a}");
    }

    #[test]
    fn lookup() {
        let set = set(&["a", "b"]);
        let stranger = Element::new("c", "a".to_owned(), CloneBehavior::CopyAssignment);

        assert!(set.has_element_by_id("a"));
        assert!(!set.has_element(&stranger), "membership must ignore data");
        assert_eq!(
            set.element_by_id("b").and_then(Element::data).as_deref(),
            Some(&"b".to_owned())
        );
        assert!(set.element_by_id("c").is_none());
    }

    #[test]
    fn duplicate_identifiers_keep_last() {
        let set = Set::new([
            Element::new("a", 1, CloneBehavior::CopyAssignment),
            Element::new("b", 2, CloneBehavior::CopyAssignment),
            Element::new("a", 3, CloneBehavior::CopyAssignment),
        ]);

        assert_eq!(set.count(), 2);
        assert_eq!(set.element_by_id("a").and_then(Element::data).as_deref(), Some(&3));
    }

    #[test]
    fn union_prefers_own_elements() {
        let a = Set::new([Element::new("x", 1, CloneBehavior::CopyAssignment)]);
        let b = Set::new([
            Element::new("x", 2, CloneBehavior::CopyAssignment),
            Element::new("y", 2, CloneBehavior::CopyAssignment),
        ]);

        let union = a.union_with(&[&b]);
        assert_eq!(union.element_ids(), ["x", "y"]);
        assert_eq!(union.element_by_id("x").and_then(Element::data).as_deref(), Some(&1));
    }

    #[test]
    fn union_prefers_later_operands() {
        let a = Set::new([Element::new("x", 0, CloneBehavior::CopyAssignment)]);
        let b = Set::new([Element::new("y", 1, CloneBehavior::CopyAssignment)]);
        let c = Set::new([Element::new("y", 2, CloneBehavior::CopyAssignment)]);

        let union = a.union_with(&[&b, &c]);
        assert_eq!(union.element_ids(), ["x", "y"]);
        assert_eq!(union.element_by_id("y").and_then(Element::data).as_deref(), Some(&2));
    }

    #[test]
    fn filter() {
        let set = set(&["apple", "avocado", "banana"]);
        let filtered = set.filter(|el| el.identifier().starts_with('a'));
        assert_eq!(filtered.element_ids(), ["apple", "avocado"]);
        assert_eq!(set.count(), 3);
    }

    #[test]
    fn returned_elements_are_copies() {
        use std::cell::RefCell;

        let set = Set::new([Element::new(
            "a",
            RefCell::new(0),
            CloneBehavior::CloneWherePossible,
        )]);

        for (_, el) in &set {
            *el.data().unwrap().borrow_mut() += 1;
        }
        for el in set.to_map().values() {
            *el.data().unwrap().borrow_mut() += 1;
        }

        let stored = set.element_by_id("a").and_then(Element::data).unwrap();
        assert_eq!(*stored.borrow(), 0);
    }

    #[test]
    fn iteration_restarts() {
        let set = set(&["a", "b", "c"]);
        let first: Vec<_> = set.iter().map(|(id, _)| id.to_owned()).collect();
        let second: Vec<_> = set.iter().map(|(id, _)| id.to_owned()).collect();

        assert_eq!(first, ["a", "b", "c"]);
        assert_eq!(first, second);
        assert_eq!(set.iter().len(), 3);
    }

    #[test]
    fn power_set() {
        let set = set(&["a", "b", "c"]);
        let power = set.power_set();
        assert_eq!(power.count(), 8);

        // Subsets are enumerated by bitmask over the insertion order.
        let subsets: Vec<_> = power
            .iter()
            .map(|(_, el)| el.data().unwrap().to_string())
            .collect();
        assert_eq!(
            subsets,
            ["{}", "{a}", "{b}", "{a, b}", "{c}", "{a, c}", "{b, c}", "{a, b, c}"]
        );

        for (id, el) in &power {
            let subset = el.data().unwrap();
            assert_eq!(id, subset.identifier());
            assert!(subset.is_subset_of(&set));
        }

        assert_eq!(Set::<u8>::empty().power_set().count(), 1);
    }

    #[test]
    fn identifier_ignores_insertion_order() {
        assert_eq!(set(&["a", "b"]).identifier(), set(&["b", "a"]).identifier());
        assert_ne!(set(&["a", "b"]).identifier(), set(&["a"]).identifier());
        assert_eq!(set(&["a", "b"]), set(&["b", "a"]));
    }
}
