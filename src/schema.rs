use crate::{
    attribute::{Attribute, AttributeSet},
    error::{NormalizationError, Result},
    fd::FdSet,
};
use ref_cast::RefCast;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, ops::Index, slice};

/// A relation schema: a non-empty set of attributes with a total order by
/// identifier.
///
/// The ordered sequence is built once at construction, so positional access
/// is O(1) instead of an iterator walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Attribute>", into = "Vec<Attribute>")]
pub struct Schema {
    ordered: Vec<Attribute>,
    set: BTreeSet<Attribute>,
}

impl Schema {
    pub fn new(attrs: AttributeSet) -> Result<Self> {
        if attrs.is_empty() {
            return Err(NormalizationError::EmptySchema);
        }
        let ordered = attrs.iter().cloned().collect();
        Ok(Self {
            ordered,
            set: attrs.0,
        })
    }

    /// Build from a sequence, rejecting duplicate identifiers.
    pub fn from_attributes(attrs: impl IntoIterator<Item = Attribute>) -> Result<Self> {
        let mut set = AttributeSet::default();
        for a in attrs {
            if !set.insert(a.clone()) {
                return Err(NormalizationError::DuplicateAttribute(a.name().to_string()));
            }
        }
        Self::new(set)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// A schema is never empty; kept for the usual pairing with `len`.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Attributes in identifier order.
    pub fn iter(&self) -> slice::Iter<'_, Attribute> {
        self.ordered.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.set.contains(&Attribute::new(name))
    }

    /// Zero-copy view of the attributes as a set.
    pub fn as_set(&self) -> &AttributeSet {
        AttributeSet::ref_cast(&self.set)
    }

    /// Every member of `set` must be declared here.
    pub fn validate_set(&self, set: &AttributeSet) -> Result<()> {
        match set.iter().find(|a| !self.set.contains(*a)) {
            Some(a) => Err(NormalizationError::UnknownAttribute {
                attribute: a.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Both sides of every dependency must be declared here.
    pub fn validate_fds(&self, fds: &FdSet) -> Result<()> {
        for fd in fds.iter() {
            self.validate_set(&fd.determinant)?;
            self.validate_set(&fd.dependent)?;
        }
        Ok(())
    }
}

impl Index<usize> for Schema {
    type Output = Attribute;

    fn index(&self, i: usize) -> &Attribute {
        &self.ordered[i]
    }
}

impl TryFrom<Vec<Attribute>> for Schema {
    type Error = NormalizationError;

    fn try_from(attrs: Vec<Attribute>) -> Result<Self> {
        Self::from_attributes(attrs)
    }
}

impl From<Schema> for Vec<Attribute> {
    fn from(schema: Schema) -> Self {
        schema.ordered
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, a) in self.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", a.name())?;
        }
        Ok(())
    }
}
