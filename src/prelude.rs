//! Crate prelude.

// The actual prelude.
pub use crate::{
    element::{CloneBehavior, Element, TypedElement},
    error::SetError,
    mutable::{MutableSet, MutableTypedSet},
    set::Set,
    typed::TypedSet,
    BaseSet, Identify,
};
pub use indexmap::IndexMap;

// Convenient imports within the crate.
pub(crate) use crate::{
    utils::{structural_id, Clones, Store},
    SmallVec,
};
pub(crate) use bitvec::prelude::*;
pub(crate) use derive_more::{Deref, From};
pub(crate) use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    rc::{Rc, Weak},
    str::FromStr,
};
pub(crate) use tracing::{debug, trace};
