use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    cmp::Ordering,
    collections::BTreeSet,
    fmt,
    hash::{Hash, Hasher},
    ops::{BitAnd, BitOr, Sub},
};

/// Recognized SQL type names. Declared types outside this table silently
/// normalize to "no type declared".
pub static SQL_TYPES: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    BTreeSet::from([
        "INT",
        "INTEGER",
        "CHAR",
        "VARCHAR",
        "BIT",
        "BIT VARYING",
        "BOOLEAN",
        "SMALLINT",
        "FLOAT",
        "REAL",
        "DOUBLE PRECISION",
        "DECIMAL",
        "DATE",
        "TIME",
    ])
});

/// An attribute of a relational schema.
///
/// Identity is the name alone; the declared type is metadata and takes no
/// part in equality, ordering, or hashing.
#[derive(Debug, Default, Clone, Serialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Attribute {
    name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    ty: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
        }
    }

    /// Construct with a declared type. Unrecognized type names degrade to no
    /// type declared rather than failing.
    pub fn with_type(name: impl Into<String>, ty: impl AsRef<str>) -> Self {
        let ty = ty.as_ref();
        Self {
            name: name.into(),
            ty: SQL_TYPES.contains(ty).then(|| ty.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> Option<&str> {
        self.ty.as_deref()
    }
}

impl<'de> Deserialize<'de> for Attribute {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            #[serde(rename = "type", default)]
            ty: Option<String>,
        }

        let raw = Raw::deserialize(d)?;
        Ok(match raw.ty {
            Some(ty) => Attribute::with_type(raw.name, ty),
            None => Attribute::new(raw.name),
        })
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Attribute {}

impl PartialOrd for Attribute {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Attribute {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Attribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ty {
            Some(ty) => write!(f, "{}:{}", self.name, ty),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A set of attributes, keyed by identifier.
#[derive(
    Debug,
    Default,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Constructor,
    derive_more::Deref,
    derive_more::DerefMut,
    derive_more::AsRef,
    derive_more::AsMut,
    derive_more::From,
    derive_more::IntoIterator,
    ref_cast::RefCast,
)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[from(forward)]
#[as_ref(forward)]
#[as_mut(forward)]
#[repr(transparent)]
pub struct AttributeSet(pub BTreeSet<Attribute>);

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self(iter.into_iter().map(Attribute::new).collect())
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{{}}");
        }

        for (i, a) in self.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{a}")?;
        }
        Ok(())
    }
}

impl BitOr for &AttributeSet {
    type Output = AttributeSet;

    fn bitor(self, rhs: &AttributeSet) -> Self::Output {
        self.union(rhs).cloned().collect()
    }
}

impl BitAnd for &AttributeSet {
    type Output = AttributeSet;

    fn bitand(self, rhs: &AttributeSet) -> Self::Output {
        self.intersection(rhs).cloned().collect()
    }
}

impl Sub for &AttributeSet {
    type Output = AttributeSet;

    fn sub(self, rhs: &AttributeSet) -> Self::Output {
        self.difference(rhs).cloned().collect()
    }
}

#[macro_export]
macro_rules! attrs {
    () => {
        $crate::attribute::AttributeSet::default()
    };
    ($($name:literal)+) => {{
        let mut set = $crate::attribute::AttributeSet::default();
        $(
            set.insert($crate::attribute::Attribute::new($name));
        )+
        set
    }};
}
