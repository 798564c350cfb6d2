//! Sets that can be edited in place: [`MutableSet`] and [`MutableTypedSet`].
//!
//! Both wrap their immutable counterpart, whose read and algebra operations remain available
//! through [`Deref`](std::ops::Deref). Algebra operations still return new immutable sets.
//!
//! Every edit invalidates the memoized identifier list, which is rebuilt on the next call to
//! [`BaseSet::element_ids`].

use crate::prelude::*;

// -------------------- Mutable set -------------------- //

/// A [`Set`] that can be edited in place.
#[derive(Deref, From)]
pub struct MutableSet<T>(Set<T>);

impl<T> Default for MutableSet<T> {
    fn default() -> Self {
        Self(Set::empty())
    }
}

impl<T> Clone for MutableSet<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> FromIterator<Element<T>> for MutableSet<T> {
    fn from_iter<I: IntoIterator<Item = Element<T>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T: Debug> Debug for MutableSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:?}", self.0)
    }
}

impl<T> Display for MutableSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl<T> crate::Seal for MutableSet<T> {}

impl<T> BaseSet for MutableSet<T> {
    type Item = Element<T>;

    fn _store(&self) -> &Store<Element<T>> {
        self.0._store()
    }

    fn identifier(&self) -> String {
        self.0.identifier()
    }
}

impl<T> MutableSet<T> {
    /// Builds a set from some elements. Later elements overwrite earlier ones with the same
    /// identifier.
    pub fn new<I: IntoIterator<Item = Element<T>>>(elements: I) -> Self {
        Self(Set::new(elements))
    }

    /// The underlying immutable set.
    #[must_use]
    pub fn into_inner(self) -> Set<T> {
        self.0
    }

    /// Inserts elements, overwriting stored elements with the same identifier. The last of several
    /// elements with the same identifier wins.
    pub fn add_elements<I: IntoIterator<Item = Element<T>>>(&mut self, elements: I) {
        let store = self.0.store_mut().edit();
        for el in elements {
            trace!(id = el.identifier(), "adding element");
            store.insert(el.identifier().to_owned(), el);
        }
    }

    /// Removes the elements with the identifiers of the given elements. Identifiers that aren't
    /// found are ignored.
    pub fn remove_elements<'a, I: IntoIterator<Item = &'a Element<T>>>(&mut self, elements: I)
    where
        T: 'a,
    {
        self.remove_elements_by_id(elements.into_iter().map(Element::identifier));
    }

    /// Removes the elements with the given identifiers. Identifiers that aren't found are ignored.
    pub fn remove_elements_by_id<S: AsRef<str>, I: IntoIterator<Item = S>>(&mut self, ids: I) {
        remove_ids(self.0.store_mut(), ids);
    }
}

/// Removes the given identifiers from a store, keeping the order of the remaining elements.
fn remove_ids<E, S: AsRef<str>, I: IntoIterator<Item = S>>(store: &mut Store<E>, ids: I) {
    let store = store.edit();
    for id in ids {
        let id = id.as_ref();
        if store.shift_remove(id).is_some() {
            trace!(id, "removed element");
        }
    }
}

// -------------------- Mutable typed set -------------------- //

/// A [`TypedSet`] that can be edited in place.
#[derive(Deref, From)]
pub struct MutableTypedSet<T>(TypedSet<T>);

impl<T> Clone for MutableTypedSet<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Debug> Debug for MutableTypedSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:?}", self.0)
    }
}

impl<T> Display for MutableTypedSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl<T> crate::Seal for MutableTypedSet<T> {}

impl<T> BaseSet for MutableTypedSet<T> {
    type Item = TypedElement<T>;

    fn _store(&self) -> &Store<TypedElement<T>> {
        self.0._store()
    }

    fn identifier(&self) -> String {
        self.0.identifier()
    }
}

impl<T> MutableTypedSet<T> {
    /// Builds a typed set from some elements.
    ///
    /// ## Errors
    ///
    /// Returns [`SetError::InvalidElementType`] if any element is not of type `ty`.
    pub fn new<S: Into<String>, I: IntoIterator<Item = TypedElement<T>>>(
        ty: S,
        elements: I,
    ) -> Result<Self, SetError> {
        TypedSet::new(ty, elements).map(Self)
    }

    /// The empty set Ø of a given type.
    pub fn empty<S: Into<String>>(ty: S) -> Self {
        Self(TypedSet::empty(ty))
    }

    /// The underlying immutable set.
    #[must_use]
    pub fn into_inner(self) -> TypedSet<T> {
        self.0
    }

    /// Inserts elements, overwriting stored elements with the same identifier. The last of several
    /// elements with the same identifier wins.
    ///
    /// The whole batch is checked before anything is inserted, so a rejected call leaves the set
    /// as it was.
    ///
    /// ## Errors
    ///
    /// Returns [`SetError::InvalidElementType`] if any element is not of the type of the set.
    pub fn add_elements<I: IntoIterator<Item = TypedElement<T>>>(
        &mut self,
        elements: I,
    ) -> Result<(), SetError> {
        let elements: Vec<_> = elements.into_iter().collect();
        self.0.check_all(&elements)?;

        let store = self.0.store_mut().edit();
        for el in elements {
            trace!(id = el.identifier(), ty = el.ty(), "adding element");
            store.insert(el.identifier().to_owned(), el);
        }

        Ok(())
    }

    /// Removes the elements with the identifiers of the given elements, whatever their type.
    /// Identifiers that aren't found are ignored.
    pub fn remove_elements<'a, I: IntoIterator<Item = &'a TypedElement<T>>>(&mut self, elements: I)
    where
        T: 'a,
    {
        self.remove_elements_by_id(elements.into_iter().map(|el| el.identifier()));
    }

    /// Removes the elements with the given identifiers. Identifiers that aren't found are ignored.
    pub fn remove_elements_by_id<S: AsRef<str>, I: IntoIterator<Item = S>>(&mut self, ids: I) {
        remove_ids(self.0.store_mut(), ids);
    }
}
