//! General library tests.

#![cfg(test)]

use crate::prelude::*;
use concat_idents::concat_idents;
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Creates analogous tests for every set flavour.
macro_rules! test {
    ($($name: ident),*) => {
        $(
            concat_idents!(fn_name = set, $name {
                #[test]
                fn fn_name() {
                    Set::<String>::$name();
                }
            });

            concat_idents!(fn_name = typed, $name {
                #[test]
                fn fn_name() {
                    TypedSet::<String>::$name();
                }
            });

            concat_idents!(fn_name = mutable, $name {
                #[test]
                fn fn_name() {
                    MutableSet::<String>::$name();
                }
            });

            concat_idents!(fn_name = mutable_typed, $name {
                #[test]
                fn fn_name() {
                    MutableTypedSet::<String>::$name();
                }
            });
        )*
    };
}

/// The type tag used for typed suites.
const TY: &str = "string";

/// Operations every set flavour is tested on, along with the tests themselves.
trait Suite: BaseSet + Sized {
    /// Builds a set whose elements hold their own identifier as data.
    fn build<S: AsRef<str>>(ids: &[S]) -> Self;

    /// Union.
    fn union(&self, sets: &[&Self]) -> Self;

    /// Intersection.
    fn inter(&self, sets: &[&Self]) -> Self;

    /// Difference.
    fn minus(&self, sets: &[&Self]) -> Self;

    /// Symmetric difference.
    fn sym_diff(&self, sets: &[&Self]) -> Self;

    /// Subset relation.
    fn subset(&self, other: &Self) -> bool;

    /// Size of the power set.
    fn power_card(&self) -> usize;

    /// Identifiers as an ordered set.
    fn ids(&self) -> BTreeSet<String> {
        self.element_ids().iter().cloned().collect()
    }

    /// Identifiers `start..end`.
    fn range(start: usize, end: usize) -> Self {
        let ids: Vec<_> = (start..end).map(|i| i.to_string()).collect();
        Self::build(&ids)
    }

    /// The worked example with A = {1, 2, 3} and B = {2, 3, 4}.
    fn _scenario() {
        let a = Self::build(&["1", "2", "3"]);
        let b = Self::build(&["2", "3", "4"]);

        assert_eq!(a.inter(&[&b]).ids(), Self::build(&["2", "3"]).ids());
        assert_eq!(a.union(&[&b]).ids(), Self::build(&["1", "2", "3", "4"]).ids());
        assert_eq!(a.sym_diff(&[&b]).ids(), Self::build(&["1", "4"]).ids());
        assert_eq!(a.minus(&[&b]).ids(), Self::build(&["1"]).ids());

        // Operands are left untouched.
        assert_eq!(a.ids(), Self::build(&["1", "2", "3"]).ids());
        assert_eq!(b.ids(), Self::build(&["2", "3", "4"]).ids());
    }

    /// Identities involving a set and itself, or no operands at all.
    fn _identities() {
        let a = Self::build(&["a", "b", "c"]);

        for res in [a.union(&[]), a.inter(&[]), a.minus(&[]), a.sym_diff(&[])] {
            assert_eq!(res.ids(), a.ids(), "zero operands must clone");
        }

        assert_eq!(a.inter(&[&a]).ids(), a.ids());
        assert_eq!(a.union(&[&a]).ids(), a.ids());
        assert!(a.minus(&[&a]).is_empty());
        assert!(a.sym_diff(&[&a]).is_empty());
    }

    /// Reflexivity and transitivity of the subset relation.
    fn _subset() {
        let a = Self::build(&["a"]);
        let b = Self::build(&["a", "b"]);
        let c = Self::build(&["a", "b", "c"]);

        for set in [&a, &b, &c] {
            assert!(set.subset(set));
        }

        assert!(a.subset(&b) && b.subset(&c) && a.subset(&c));
        assert!(!c.subset(&a));
        assert!(a.subset(&a.union(&[&Self::build(&["z"])])));
    }

    /// Multi-operand semantics.
    fn _operands() {
        let a = Self::build(&["1", "2", "3", "4"]);
        let b = Self::build(&["1", "2"]);
        let c = Self::build(&["2", "3"]);

        assert_eq!(a.minus(&[&b, &c]).ids(), Self::build(&["4"]).ids());
        assert_eq!(a.inter(&[&b, &c]).ids(), Self::build(&["2"]).ids());
        assert_eq!(b.union(&[&c, &a]).ids(), a.ids());

        // ((a △ b) △ c) = ({3, 4} △ {2, 3}) = {2, 4}
        assert_eq!(a.sym_diff(&[&b, &c]).ids(), Self::build(&["2", "4"]).ids());
    }

    /// The power set has 2ⁿ elements.
    fn _power_set() {
        for n in 0..6 {
            assert_eq!(Self::range(0, n).power_card(), 1usize << n);
        }
    }

    /// Two sets of 1000 elements overlapping in 100.
    fn _large() {
        let a = Self::range(0, 1000);
        let b = Self::range(900, 1900);

        assert_eq!(a.inter(&[&b]).count(), 100);
        assert_eq!(a.sym_diff(&[&b]).count(), 1800);
        assert_eq!(a.union(&[&b]).count(), 1900);
        assert_eq!(a.minus(&[&b]).count(), 900);
    }

    /// Many operands at once.
    fn _many_operands() {
        let a = Self::range(0, 10_000);
        let operands: Vec<_> = (0..100).map(|i| Self::range(i * 50, i * 50 + 25)).collect();
        let operands: Vec<_> = operands.iter().collect();

        assert_eq!(a.minus(&operands).count(), 10_000 - 2500);
        assert!(a.inter(&operands).is_empty());
        assert_eq!(a.union(&operands).count(), 10_000);
    }
}

/// Elements holding their own identifier.
fn elements<S: AsRef<str>>(ids: &[S]) -> impl Iterator<Item = Element<String>> + '_ {
    ids.iter().map(|id| {
        let id = id.as_ref();
        Element::new(id, id.to_owned(), CloneBehavior::CloneWherePossible)
    })
}

/// Typed elements holding their own identifier.
fn typed_elements<S: AsRef<str>>(ids: &[S]) -> impl Iterator<Item = TypedElement<String>> + '_ {
    elements(ids).map(|el| TypedElement::from_element(TY, el))
}

impl Suite for Set<String> {
    fn build<S: AsRef<str>>(ids: &[S]) -> Self {
        elements(ids).collect()
    }

    fn union(&self, sets: &[&Self]) -> Self {
        self.union_with(sets)
    }

    fn inter(&self, sets: &[&Self]) -> Self {
        self.intersect_with(sets)
    }

    fn minus(&self, sets: &[&Self]) -> Self {
        self.without(sets)
    }

    fn sym_diff(&self, sets: &[&Self]) -> Self {
        self.symmetric_difference_with(sets)
    }

    fn subset(&self, other: &Self) -> bool {
        self.is_subset_of(other)
    }

    fn power_card(&self) -> usize {
        self.power_set().count()
    }
}

impl Suite for TypedSet<String> {
    fn build<S: AsRef<str>>(ids: &[S]) -> Self {
        TypedSet::new(TY, typed_elements(ids)).unwrap()
    }

    fn union(&self, sets: &[&Self]) -> Self {
        self.union_with(sets).unwrap()
    }

    fn inter(&self, sets: &[&Self]) -> Self {
        self.intersect_with(sets)
    }

    fn minus(&self, sets: &[&Self]) -> Self {
        self.without(sets)
    }

    fn sym_diff(&self, sets: &[&Self]) -> Self {
        self.symmetric_difference_with(sets).unwrap()
    }

    fn subset(&self, other: &Self) -> bool {
        self.is_subset_of(other)
    }

    fn power_card(&self) -> usize {
        self.power_set().count()
    }
}

/// Mutable sets are built by insertion, to exercise the mutation path.
impl Suite for MutableSet<String> {
    fn build<S: AsRef<str>>(ids: &[S]) -> Self {
        let mut set = Self::default();
        set.add_elements(elements(ids));
        set
    }

    fn union(&self, sets: &[&Self]) -> Self {
        let sets: Vec<&Set<_>> = sets.iter().map(|set| &***set).collect();
        self.union_with(&sets).into()
    }

    fn inter(&self, sets: &[&Self]) -> Self {
        let sets: Vec<&Set<_>> = sets.iter().map(|set| &***set).collect();
        self.intersect_with(&sets).into()
    }

    fn minus(&self, sets: &[&Self]) -> Self {
        let sets: Vec<&Set<_>> = sets.iter().map(|set| &***set).collect();
        self.without(&sets).into()
    }

    fn sym_diff(&self, sets: &[&Self]) -> Self {
        let sets: Vec<&Set<_>> = sets.iter().map(|set| &***set).collect();
        self.symmetric_difference_with(&sets).into()
    }

    fn subset(&self, other: &Self) -> bool {
        self.is_subset_of(other)
    }

    fn power_card(&self) -> usize {
        self.power_set().count()
    }
}

impl Suite for MutableTypedSet<String> {
    fn build<S: AsRef<str>>(ids: &[S]) -> Self {
        let mut set = Self::empty(TY);
        set.add_elements(typed_elements(ids)).unwrap();
        set
    }

    fn union(&self, sets: &[&Self]) -> Self {
        let sets: Vec<&TypedSet<_>> = sets.iter().map(|set| &***set).collect();
        self.union_with(&sets).unwrap().into()
    }

    fn inter(&self, sets: &[&Self]) -> Self {
        let sets: Vec<&TypedSet<_>> = sets.iter().map(|set| &***set).collect();
        self.intersect_with(&sets).into()
    }

    fn minus(&self, sets: &[&Self]) -> Self {
        let sets: Vec<&TypedSet<_>> = sets.iter().map(|set| &***set).collect();
        self.without(&sets).into()
    }

    fn sym_diff(&self, sets: &[&Self]) -> Self {
        let sets: Vec<&TypedSet<_>> = sets.iter().map(|set| &***set).collect();
        self.symmetric_difference_with(&sets).unwrap().into()
    }

    fn subset(&self, other: &Self) -> bool {
        self.is_subset_of(other)
    }

    fn power_card(&self) -> usize {
        self.power_set().count()
    }
}

test!(_scenario, _identities, _subset, _operands, _power_set, _large, _many_operands);

// -------------------- Properties -------------------- //

/// Small sets of small identifiers, so that overlaps are common.
fn ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec((0..20u8).prop_map(|i| i.to_string()), 0..12)
}

proptest! {
    #[test]
    fn union_contains_operands(a in ids(), b in ids()) {
        let (a, b) = (Set::<String>::build(&a), Set::<String>::build(&b));
        let union = a.union_with(&[&b]);

        prop_assert!(a.is_subset_of(&union));
        prop_assert!(b.is_subset_of(&union));
        prop_assert_eq!(union.count(), a.ids().union(&b.ids()).count());
    }

    #[test]
    fn algebra_matches_ordered_sets(a in ids(), b in ids()) {
        let (a, b) = (Set::<String>::build(&a), Set::<String>::build(&b));
        let (x, y) = (a.ids(), b.ids());

        prop_assert_eq!(a.intersect_with(&[&b]).ids(), &x & &y);
        prop_assert_eq!(a.without(&[&b]).ids(), &x - &y);
        prop_assert_eq!(a.symmetric_difference_with(&[&b]).ids(), &x ^ &y);
        prop_assert_eq!(a.is_subset_of(&b), x.is_subset(&y));
    }

    #[test]
    fn self_operations(a in ids()) {
        let a = Set::<String>::build(&a);

        prop_assert_eq!(a.intersect_with(&[&a]).ids(), a.ids());
        prop_assert!(a.without(&[&a]).is_empty());
        prop_assert!(a.symmetric_difference_with(&[&a]).is_empty());
        prop_assert_eq!(a.union_with(&[]).ids(), a.clone().ids());
    }

    #[test]
    fn mismatched_types(a in ids(), b in ids()) {
        let a = TypedSet::<String>::build(&a);
        let x = TypedSet::new(
            "array",
            elements(&b).map(|el| TypedElement::from_element("array", el)),
        )
        .unwrap();

        let inter = a.intersect_with(&[&x]);
        prop_assert!(inter.is_empty());
        prop_assert_eq!(inter.ty(), TY);
        prop_assert_eq!(a.without(&[&x]).ids(), a.ids());
        prop_assert!(a.union_with(&[&x]).is_err());
    }

    #[test]
    fn identifier_is_order_independent(a in ids()) {
        let mut reversed = a.clone();
        reversed.reverse();

        prop_assert_eq!(
            Set::<String>::build(&a).identifier(),
            Set::<String>::build(&reversed).identifier()
        );
        prop_assert_eq!(
            TypedSet::<String>::build(&a).identifier(),
            TypedSet::<String>::build(&reversed).identifier()
        );
    }

    #[test]
    fn cache_follows_edits(a in ids(), b in ids()) {
        let mut set = MutableSet::<String>::build(&a);
        prop_assert_eq!(set.ids(), a.iter().cloned().collect::<BTreeSet<_>>());
        prop_assert!(set._store().is_cached());

        set.add_elements(elements(&b));
        prop_assert!(!set._store().is_cached());
        let expected: BTreeSet<_> = a.iter().chain(&b).cloned().collect();
        prop_assert_eq!(set.ids(), expected);

        set.remove_elements_by_id(&a);
        let expected: BTreeSet<_> = b.iter().filter(|id| !a.contains(id)).cloned().collect();
        prop_assert_eq!(set.ids(), expected);
    }
}
