//! Homogeneously typed sets [`TypedSet`].

use crate::{prelude::*, set::power_set_masks};

/// A finite set of [`TypedElements`](TypedElement) that all share the type of the set.
///
/// Operands of a different type are handled differently by each operation:
///
/// - [`TypedSet::is_subset_of`] is false.
/// - [`TypedSet::without`] ignores them.
/// - [`TypedSet::intersect_with`] returns the empty set.
/// - [`TypedSet::union_with`] and [`TypedSet::symmetric_difference_with`] fail with
///   [`SetError::TypeMismatch`].
///
/// ## Invariants
///
/// Every stored element has the type of the set, and is keyed by its own identifier.
pub struct TypedSet<T> {
    /// The type of every element.
    ty: String,
    /// The elements of the set.
    elements: Store<TypedElement<T>>,
}

// -------------------- Basic traits -------------------- //

impl<T> Clone for TypedSet<T> {
    fn clone(&self) -> Self {
        Self {
            ty: self.ty.clone(),
            elements: self.elements.clone(),
        }
    }
}

impl<'a, T> IntoIterator for &'a TypedSet<T> {
    type Item = (&'a str, TypedElement<T>);
    type IntoIter = Clones<'a, TypedElement<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Typed sets are equal when they have the same type and the same identifiers.
impl<T> PartialEq for TypedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count() && self.is_subset_of(other)
    }
}

impl<T> Eq for TypedSet<T> {}

impl<T: Debug> Debug for TypedSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TypedSet")
            .field("ty", &self.ty)
            .field("elements", &self.elements.values().collect::<Vec<_>>())
            .finish()
    }
}

/// Displays the identifiers of a set in roster notation, followed by its type.
impl<T> Display for TypedSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{{{}}}: {}", self.element_ids().join(", "), self.ty)
    }
}

impl<T> crate::Seal for TypedSet<T> {}

impl<T> BaseSet for TypedSet<T> {
    type Item = TypedElement<T>;

    fn _store(&self) -> &Store<TypedElement<T>> {
        &self.elements
    }

    fn identifier(&self) -> String {
        structural_id(
            Some(self.ty.as_str()),
            self.element_ids().iter().map(String::as_str),
        )
    }
}

// -------------------- Constructions -------------------- //

impl<T> TypedSet<T> {
    /// Builds a typed set from some elements. Later elements overwrite earlier ones with the same
    /// identifier.
    ///
    /// ## Errors
    ///
    /// Returns [`SetError::InvalidElementType`] if any element is not of type `ty`.
    pub fn new<S: Into<String>, I: IntoIterator<Item = TypedElement<T>>>(
        ty: S,
        elements: I,
    ) -> Result<Self, SetError> {
        let mut set = Self::empty(ty);
        let elements: Vec<_> = elements.into_iter().collect();
        set.check_all(&elements)?;
        set.elements = elements.into_iter().collect();
        Ok(set)
    }

    /// The empty set Ø of a given type.
    pub fn empty<S: Into<String>>(ty: S) -> Self {
        Self {
            ty: ty.into(),
            elements: Store::default(),
        }
    }

    /// Tags every element of an untyped set with the given type.
    pub fn from_set<S: Into<String>>(ty: S, set: &Set<T>) -> Self {
        let ty = ty.into();
        let elements = set
            .iter()
            .map(|(_, el)| TypedElement::from_element(ty.clone(), el))
            .collect();

        Self { ty, elements }
    }

    /// **Internal method.**
    ///
    /// Wraps a store. The caller guarantees every element has type `ty`.
    fn from_store(ty: String, elements: Store<TypedElement<T>>) -> Self {
        Self { ty, elements }
    }

    /// **Internal method.**
    ///
    /// Mutable access to the store.
    pub(crate) fn store_mut(&mut self) -> &mut Store<TypedElement<T>> {
        &mut self.elements
    }

    /// The type of the set.
    #[must_use]
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// Wraps the set into an element of its own type, identified by [`BaseSet::identifier`].
    #[must_use]
    pub fn into_typed_element(self) -> TypedElement<Self> {
        let ty = self.ty.clone();
        TypedElement::new(ty, self.identifier(), self, CloneBehavior::CopyAssignment)
    }

    /// Clones the set, dropping all type tags.
    #[must_use]
    pub fn clone_as_set(&self) -> Set<T> {
        self.elements.values().map(TypedElement::clone_as_element).collect()
    }

    /// Checks that every element has the type of the set, without storing anything.
    ///
    /// ## Errors
    ///
    /// Returns [`SetError::InvalidElementType`] for the first element of another type.
    pub(crate) fn check_all(&self, elements: &[TypedElement<T>]) -> Result<(), SetError> {
        match elements.iter().find(|el| el.ty() != self.ty) {
            Some(el) => {
                debug!(id = el.identifier(), ty = el.ty(), expected = %self.ty, "rejected element");
                Err(SetError::InvalidElementType {
                    id: el.identifier().to_owned(),
                    expected: self.ty.clone(),
                    found: el.ty().to_owned(),
                })
            }
            None => Ok(()),
        }
    }

    /// The stores of the operands with the type of `self`.
    fn same_typed<'a>(&self, sets: &[&'a Self]) -> SmallVec<&'a Store<TypedElement<T>>> {
        sets.iter()
            .filter(|set| set.ty == self.ty)
            .map(|set| &set.elements)
            .collect()
    }

    /// The stores of the operands, if all of them have the type of `self`.
    ///
    /// ## Errors
    ///
    /// Returns [`SetError::TypeMismatch`] for the first operand of another type.
    fn all_typed<'a>(
        &self,
        sets: &[&'a Self],
        op: &str,
    ) -> Result<SmallVec<&'a Store<TypedElement<T>>>, SetError> {
        match sets.iter().find(|set| set.ty != self.ty) {
            Some(set) => {
                debug!(op, expected = %self.ty, found = %set.ty, "rejected operand");
                Err(SetError::TypeMismatch {
                    expected: self.ty.clone(),
                    found: set.ty.clone(),
                })
            }
            None => Ok(sets.iter().map(|set| &set.elements).collect()),
        }
    }
}

// -------------------- Relations -------------------- //

impl<T> TypedSet<T> {
    /// Whether the set holds an element with the type and identifier of `el`.
    #[must_use]
    pub fn has_element(&self, el: &TypedElement<T>) -> bool {
        el.ty() == self.ty && self.has_element_by_id(el.identifier())
    }

    /// Subset relation ⊆, by identifier. A set is never a subset of a set of another type.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.ty == other.ty && self.elements.is_subset_of(&other.elements)
    }
}

// -------------------- Algebra -------------------- //

impl<T> TypedSet<T> {
    /// Difference x \ (y₀ ∪ y₁ ∪ …): the elements of `self` found in none of the operands.
    ///
    /// Operands of another type are ignored. Without operands, this is a clone of `self`.
    #[must_use]
    pub fn without(&self, sets: &[&Self]) -> Self {
        let stores = self.same_typed(sets);
        if stores.len() != sets.len() {
            debug!(
                ignored = sets.len() - stores.len(),
                ty = %self.ty,
                "difference ignores operands of another type"
            );
        }

        Self::from_store(self.ty.clone(), self.elements.without(&stores))
    }

    /// Intersection x ∩ y₀ ∩ y₁ ∩ …: the elements of `self` found in every operand.
    ///
    /// If any operand has another type, the result is empty. Without operands, this is a clone of
    /// `self`.
    #[must_use]
    pub fn intersect_with(&self, sets: &[&Self]) -> Self {
        let stores = self.same_typed(sets);
        if stores.len() != sets.len() {
            debug!(ty = %self.ty, "intersection with an operand of another type is empty");
            return Self::empty(self.ty.clone());
        }

        Self::from_store(self.ty.clone(), self.elements.intersect(&stores))
    }

    /// Union x ∪ y₀ ∪ y₁ ∪ ….
    ///
    /// When an identifier is found more than once, the element from `self` is kept. Otherwise, the
    /// element from the latest operand holding the identifier is kept.
    ///
    /// ## Errors
    ///
    /// Returns [`SetError::TypeMismatch`] if any operand has another type.
    pub fn union_with(&self, sets: &[&Self]) -> Result<Self, SetError> {
        let stores = self.all_typed(sets, "union")?;
        Ok(Self::from_store(self.ty.clone(), self.elements.union(&stores)))
    }

    /// Symmetric difference ((x △ y₀) △ y₁) △ …, folded over the operands in order.
    ///
    /// Without operands, this is a clone of `self`.
    ///
    /// ## Errors
    ///
    /// Returns [`SetError::TypeMismatch`] if any operand has another type.
    pub fn symmetric_difference_with(&self, sets: &[&Self]) -> Result<Self, SetError> {
        let stores = self.all_typed(sets, "symmetric difference")?;
        Ok(Self::from_store(
            self.ty.clone(),
            self.elements.symmetric_difference(&stores),
        ))
    }

    /// Set specification: clones of the elements satisfying a predicate.
    #[must_use]
    pub fn filter<P: FnMut(&TypedElement<T>) -> bool>(&self, pred: P) -> Self {
        Self::from_store(self.ty.clone(), self.elements.filter(pred))
    }

    /// Powerset 2^x, as a typed set of the same type.
    ///
    /// Subsets are enumerated as in [`Set::power_set`], and wrapped by
    /// [`TypedSet::into_typed_element`].
    ///
    /// ## Panics
    ///
    /// Panics if the set has at least as many elements as the bit width of `usize`.
    #[must_use]
    pub fn power_set(&self) -> TypedSet<Self> {
        let members: Vec<_> = self.elements.values().collect();
        let subsets = power_set_masks(members.len())
            .map(|mask| {
                let subset = mask
                    .view_bits::<Lsb0>()
                    .iter_ones()
                    .map(|j| members[j].clone())
                    .collect();

                Self::from_store(self.ty.clone(), subset).into_typed_element()
            })
            .collect();

        TypedSet::from_store(self.ty.clone(), subsets)
    }
}
