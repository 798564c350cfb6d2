//! [`Elements`](Element), [`TypedElements`](TypedElement) and their [`CloneBehavior`].

use crate::prelude::*;

// -------------------- Clone behavior -------------------- //

/// How an element's data is duplicated when the element is cloned.
///
/// The behavior is chosen once when an element is built, and carried over to all of its clones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CloneBehavior {
    /// Clones share the data with the original.
    #[default]
    CopyAssignment,
    /// Clones receive a deep copy of the data if its type can be copied, and share it otherwise.
    CloneWherePossible,
    /// Data that is also owned outside the element is held through a non-owning reference, and is
    /// only reachable for as long as some outside owner keeps it alive. Data handed over to the
    /// element alone is held directly. Clones share whichever handle the element holds.
    CopyWithWeakReference,
}

impl CloneBehavior {
    /// All behaviors, in declaration order.
    pub const ALL: [Self; 3] = [
        Self::CopyAssignment,
        Self::CloneWherePossible,
        Self::CopyWithWeakReference,
    ];

    /// The canonical name of the behavior, as accepted by [`CloneBehavior::from_str`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CopyAssignment => "copy-assignment",
            Self::CloneWherePossible => "clone-where-possible",
            Self::CopyWithWeakReference => "copy-with-weak-reference",
        }
    }

    /// Duplicates the data of an element according to this behavior.
    fn duplicate<T>(self, data: &Data<T>, copy: Option<fn(&T) -> T>) -> Data<T> {
        match self {
            Self::CopyAssignment | Self::CopyWithWeakReference => share(data),
            Self::CloneWherePossible => deep_copy(data, copy),
        }
    }
}

impl Display for CloneBehavior {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Behaviors are parsed from their [names](CloneBehavior::name), ignoring ASCII case. Underscores
/// may be used in place of dashes.
impl FromStr for CloneBehavior {
    type Err = SetError;

    fn from_str(s: &str) -> Result<Self, SetError> {
        let name = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|behavior| behavior.name() == name)
            .ok_or_else(|| SetError::InvalidConfiguration(s.to_owned()))
    }
}

/// The data held by an element.
enum Data<T> {
    /// An owning handle, possibly shared with other elements.
    Strong(Rc<T>),
    /// A non-owning handle.
    Weak(Weak<T>),
}

/// Duplication strategy for [`CloneBehavior::CopyAssignment`] and
/// [`CloneBehavior::CopyWithWeakReference`]: hand out another handle of the same kind to the same
/// data.
fn share<T>(data: &Data<T>) -> Data<T> {
    match data {
        Data::Strong(rc) => Data::Strong(Rc::clone(rc)),
        Data::Weak(weak) => Data::Weak(Weak::clone(weak)),
    }
}

/// Duplication strategy for [`CloneBehavior::CloneWherePossible`]: copy the data if a copy
/// function is known, share it otherwise.
fn deep_copy<T>(data: &Data<T>, copy: Option<fn(&T) -> T>) -> Data<T> {
    match (data, copy) {
        (Data::Strong(rc), Some(copy)) => Data::Strong(Rc::new(copy(rc))),
        _ => share(data),
    }
}

// -------------------- Element -------------------- //

/// An identifier together with some opaque data.
///
/// The identifier never changes, and is preserved by [`Clone::clone`]. Cloning an element
/// duplicates its data as dictated by its [`CloneBehavior`]; no `T: Clone` bound is needed for
/// that, since data that can't be copied is shared instead.
pub struct Element<T> {
    /// The identifier.
    id: String,
    /// The data, or a handle to it.
    data: Data<T>,
    /// How clones duplicate the data.
    behavior: CloneBehavior,
    /// How to deep-copy the data, if possible at all.
    copy: Option<fn(&T) -> T>,
}

impl<T> Element<T> {
    /// Builds an element from a handle to its data.
    ///
    /// Data that is also owned elsewhere is copied right away under
    /// [`CloneBehavior::CloneWherePossible`], and only referenced weakly under
    /// [`CloneBehavior::CopyWithWeakReference`].
    fn build(
        id: String,
        data: Rc<T>,
        behavior: CloneBehavior,
        copy: Option<fn(&T) -> T>,
    ) -> Self {
        let data = match behavior {
            CloneBehavior::CopyAssignment => Data::Strong(data),
            CloneBehavior::CloneWherePossible => match copy {
                Some(copy) if Rc::strong_count(&data) > 1 => Data::Strong(Rc::new(copy(&data))),
                _ => Data::Strong(data),
            },
            CloneBehavior::CopyWithWeakReference if Rc::strong_count(&data) > 1 => {
                Data::Weak(Rc::downgrade(&data))
            }
            CloneBehavior::CopyWithWeakReference => Data::Strong(data),
        };

        Self {
            id,
            data,
            behavior,
            copy,
        }
    }

    /// Builds an element owning the given data.
    ///
    /// No one else owns the data, so it is held directly under every behavior. Use
    /// [`Element::weak`] to reference data kept alive elsewhere.
    pub fn new<I: Into<String>>(id: I, data: T, behavior: CloneBehavior) -> Self
    where
        T: Clone,
    {
        Self::shared(id, Rc::new(data), behavior)
    }

    /// Builds an element from a handle to data that may be owned elsewhere too.
    pub fn shared<I: Into<String>>(id: I, data: Rc<T>, behavior: CloneBehavior) -> Self
    where
        T: Clone,
    {
        Self::build(id.into(), data, behavior, Some(T::clone as fn(&T) -> T))
    }

    /// Builds an element for data that can't be copied.
    ///
    /// Under [`CloneBehavior::CloneWherePossible`], clones of this element share the data.
    pub fn opaque<I: Into<String>>(id: I, data: Rc<T>, behavior: CloneBehavior) -> Self {
        Self::build(id.into(), data, behavior, None)
    }

    /// Builds an element holding a non-owning reference to the data, using
    /// [`CloneBehavior::CopyWithWeakReference`].
    pub fn weak<I: Into<String>>(id: I, owner: &Rc<T>) -> Self {
        Self::build(
            id.into(),
            Rc::clone(owner),
            CloneBehavior::CopyWithWeakReference,
            None,
        )
    }

    /// Builds an element with a behavior given by name.
    ///
    /// ## Errors
    ///
    /// Returns [`SetError::InvalidConfiguration`] if the name is not that of a [`CloneBehavior`].
    pub fn with_behavior_name<I: Into<String>>(
        id: I,
        data: T,
        behavior: &str,
    ) -> Result<Self, SetError>
    where
        T: Clone,
    {
        Ok(Self::new(id, data, behavior.parse()?))
    }

    /// The identifier of the element.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.id
    }

    /// A handle to the data.
    ///
    /// For elements referencing data owned elsewhere under
    /// [`CloneBehavior::CopyWithWeakReference`], this returns `None` once every outside owner is
    /// gone. Otherwise, it always returns `Some`.
    #[must_use]
    pub fn data(&self) -> Option<Rc<T>> {
        match &self.data {
            Data::Strong(rc) => Some(Rc::clone(rc)),
            Data::Weak(weak) => weak.upgrade(),
        }
    }

    /// The clone behavior of the element.
    #[must_use]
    pub const fn behavior(&self) -> CloneBehavior {
        self.behavior
    }
}

impl<T> Clone for Element<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            data: self.behavior.duplicate(&self.data, self.copy),
            behavior: self.behavior,
            copy: self.copy,
        }
    }
}

impl<T> Identify for Element<T> {
    fn identifier(&self) -> &str {
        &self.id
    }
}

impl<T: Debug> Debug for Element<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("data", &self.data())
            .field("behavior", &self.behavior)
            .finish()
    }
}

// -------------------- Typed element -------------------- //

/// An [`Element`] tagged with a type, used to keep [`TypedSets`](TypedSet) homogeneous.
///
/// The type tag never changes and is preserved by [`Clone::clone`]. All methods of [`Element`] are
/// available through [`Deref`](std::ops::Deref).
#[derive(Deref)]
pub struct TypedElement<T> {
    /// The underlying untyped element.
    #[deref]
    element: Element<T>,
    /// The type tag.
    ty: String,
}

impl<T> TypedElement<T> {
    /// Tags an element with a type.
    pub fn from_element<S: Into<String>>(ty: S, element: Element<T>) -> Self {
        Self {
            element,
            ty: ty.into(),
        }
    }

    /// Builds a typed element owning the given data. See [`Element::new`].
    pub fn new<S: Into<String>, I: Into<String>>(
        ty: S,
        id: I,
        data: T,
        behavior: CloneBehavior,
    ) -> Self
    where
        T: Clone,
    {
        Self::from_element(ty, Element::new(id, data, behavior))
    }

    /// Builds a typed element from a shared handle. See [`Element::shared`].
    pub fn shared<S: Into<String>, I: Into<String>>(
        ty: S,
        id: I,
        data: Rc<T>,
        behavior: CloneBehavior,
    ) -> Self
    where
        T: Clone,
    {
        Self::from_element(ty, Element::shared(id, data, behavior))
    }

    /// Builds a typed element for data that can't be copied. See [`Element::opaque`].
    pub fn opaque<S: Into<String>, I: Into<String>>(
        ty: S,
        id: I,
        data: Rc<T>,
        behavior: CloneBehavior,
    ) -> Self {
        Self::from_element(ty, Element::opaque(id, data, behavior))
    }

    /// Builds a typed element holding a non-owning reference. See [`Element::weak`].
    pub fn weak<S: Into<String>, I: Into<String>>(ty: S, id: I, owner: &Rc<T>) -> Self {
        Self::from_element(ty, Element::weak(id, owner))
    }

    /// The type tag.
    #[must_use]
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// Clones the element, dropping the type tag.
    ///
    /// The data is duplicated exactly as [`Clone::clone`] would.
    #[must_use]
    pub fn clone_as_element(&self) -> Element<T> {
        self.element.clone()
    }

    /// Drops the type tag.
    #[must_use]
    pub fn into_element(self) -> Element<T> {
        self.element
    }
}

impl<T> Clone for TypedElement<T> {
    fn clone(&self) -> Self {
        Self {
            element: self.element.clone(),
            ty: self.ty.clone(),
        }
    }
}

impl<T> Identify for TypedElement<T> {
    fn identifier(&self) -> &str {
        self.element.identifier()
    }
}

impl<T: Debug> Debug for TypedElement<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TypedElement")
            .field("id", &self.identifier())
            .field("ty", &self.ty)
            .field("data", &self.data())
            .field("behavior", &self.behavior())
            .finish()
    }
}
