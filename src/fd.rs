use crate::{
    attribute::{Attribute, AttributeSet},
    utils::unordered_eq,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A functional dependency: any two tuples agreeing on the determinant must
/// agree on the dependent.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Constructor,
)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct FunctionalDependency {
    pub determinant: AttributeSet,
    pub dependent: AttributeSet,
}

impl FunctionalDependency {
    /// Trivial iff the dependent is a subset of the determinant.
    pub fn is_trivial(&self) -> bool {
        self.dependent.is_subset(&self.determinant)
    }

    /// The dependent with the trivial part stripped.
    pub(crate) fn strict_dependent(&self) -> AttributeSet {
        &self.dependent - &self.determinant
    }
}

impl fmt::Display for FunctionalDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.determinant, self.dependent)
    }
}

impl FromStr for FunctionalDependency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (left, right) = s.split_once("->").context("expected `A B -> C D`")?;
        let determinant: AttributeSet = left.split_whitespace().map(Attribute::new).collect();
        let dependent: AttributeSet = right.split_whitespace().map(Attribute::new).collect();
        Ok(Self::new(determinant, dependent))
    }
}

/// A set of functional dependencies.
///
/// Insertion order is kept (the decomposition tie-break depends on it);
/// structural duplicates are never stored twice. Equality is
/// order-insensitive.
#[derive(
    Debug,
    Default,
    Clone,
    Serialize,
    Deserialize,
    derive_more::Deref,
    derive_more::AsRef,
    derive_more::IntoIterator,
)]
#[serde(from = "Vec<FunctionalDependency>")]
#[as_ref(forward)]
pub struct FdSet(Vec<FunctionalDependency>);

impl FdSet {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns false when a structurally equal dependency is already present.
    pub fn insert(&mut self, fd: FunctionalDependency) -> bool {
        if self.0.contains(&fd) {
            return false;
        }
        self.0.push(fd);
        true
    }
}

impl From<Vec<FunctionalDependency>> for FdSet {
    fn from(fds: Vec<FunctionalDependency>) -> Self {
        fds.into_iter().collect()
    }
}

impl FromIterator<FunctionalDependency> for FdSet {
    fn from_iter<T: IntoIterator<Item = FunctionalDependency>>(iter: T) -> Self {
        let mut set = Self::new();
        for fd in iter {
            set.insert(fd);
        }
        set
    }
}

impl Extend<FunctionalDependency> for FdSet {
    fn extend<T: IntoIterator<Item = FunctionalDependency>>(&mut self, iter: T) {
        for fd in iter {
            self.insert(fd);
        }
    }
}

impl PartialEq for FdSet {
    fn eq(&self, other: &Self) -> bool {
        unordered_eq(&self.0, &other.0)
    }
}

impl Eq for FdSet {}

impl fmt::Display for FdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{{}}");
        }

        for (i, fd) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{fd}")?;
        }
        Ok(())
    }
}

#[macro_export]
macro_rules! fd {
    ($($l:literal)+ => $($r:literal)*) => {
        $crate::fd::FunctionalDependency::new($crate::attrs!($($l)+), $crate::attrs!($($r)*))
    };
}

#[macro_export]
macro_rules! fds {
    () => {
        $crate::fd::FdSet::default()
    };
    ($($fd:expr),+ $(,)?) => {{
        let mut set = $crate::fd::FdSet::default();
        $(
            set.insert($fd);
        )+
        set
    }};
}
