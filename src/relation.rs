use crate::{
    attribute::{Attribute, AttributeSet},
    closure, decompose,
    error::Result,
    fd::{FdSet, FunctionalDependency},
    keys, normal_form,
    schema::Schema,
};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

/// A named relation: a schema plus its governing dependencies.
///
/// Tuple-level storage is owned elsewhere; the algorithms only ever read the
/// schema shape and the dependency set, and never mutate either.
#[derive(Debug, Clone)]
pub struct Relation {
    name: String,
    schema: Schema,
    fds: FdSet,
}

impl Relation {
    pub fn new(name: impl Into<String>, schema: Schema, fds: FdSet) -> Result<Self> {
        schema.validate_fds(&fds)?;
        Ok(Self {
            name: name.into(),
            schema,
            fds,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn fds(&self) -> &FdSet {
        &self.fds
    }

    pub fn attribute_closure(&self, x: &AttributeSet) -> Result<AttributeSet> {
        closure::attribute_closure(&self.schema, x, &self.fds)
    }

    pub fn fd_set_closure(&self) -> Result<FdSet> {
        closure::fd_set_closure(&self.schema, &self.fds)
    }

    pub fn minimal_keys(&self) -> Result<Vec<AttributeSet>> {
        keys::minimal_keys(&self.schema, &self.fds)
    }

    pub fn is_superkey(&self, k: &AttributeSet) -> Result<bool> {
        keys::is_superkey(k, &self.schema, &self.fds)
    }

    pub fn is_minimal_key(&self, k: &AttributeSet) -> Result<bool> {
        keys::is_minimal_key(k, &self.schema, &self.fds)
    }

    pub fn is_bcnf(&self) -> Result<bool> {
        normal_form::is_bcnf(&self.schema, &self.fds)
    }

    pub fn is_3nf(&self) -> Result<bool> {
        normal_form::is_3nf(&self.schema, &self.fds)
    }

    pub fn decompose_bcnf(&self) -> Result<Vec<(Schema, FdSet)>> {
        decompose::decompose_bcnf(&self.schema, &self.fds)
    }
}

// Relations are identified by name alone.
impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Relation {}

impl Hash for Relation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.schema)
    }
}

/// On-disk description of a relation, used for diagnostics and fixtures.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RelationSpec {
    name: String,
    attributes: Vec<Attribute>,
    #[serde(default)]
    fds: Vec<FdSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FdSpec {
    determinant: Vec<String>,
    dependent: Vec<String>,
}

impl FromStr for Relation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec: RelationSpec = serde_json::from_str(s)?;
        let schema = Schema::from_attributes(spec.attributes)?;
        let mut fds = FdSet::new();
        for fd in spec.fds {
            fds.insert(FunctionalDependency::new(
                fd.determinant.into_iter().map(Attribute::new).collect(),
                fd.dependent.into_iter().map(Attribute::new).collect(),
            ));
        }
        Ok(Relation::new(spec.name, schema, fds)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attrs, fd, fds};

    const ENROLLMENT: &str = r#"{
        "name": "enrollment",
        "attributes": [
            {"name": "A", "type": "INT"},
            {"name": "B", "type": "LONGTEXT"},
            {"name": "C"}
        ],
        "fds": [
            {"determinant": ["A"], "dependent": ["B"]},
            {"determinant": ["B"], "dependent": ["C"]}
        ]
    }"#;

    #[test]
    fn test_parse_spec() {
        let relation: Relation = ENROLLMENT.parse().unwrap();
        assert_eq!("enrollment(A B C)", format!("{relation}"));
        assert_eq!(Some("INT"), relation.schema()[0].declared_type());
        // LONGTEXT is not a recognized type and degrades to none.
        assert_eq!(None, relation.schema()[1].declared_type());
        assert_eq!(&fds![fd!("A" => "B"), fd!("B" => "C")], relation.fds());
    }

    #[test]
    fn test_delegation() {
        let relation: Relation = ENROLLMENT.parse().unwrap();
        assert_eq!(vec![attrs!("A")], relation.minimal_keys().unwrap());
        assert!(relation.is_superkey(&attrs!("A")).unwrap());
        assert!(!relation.is_bcnf().unwrap());
        assert_eq!(2, relation.decompose_bcnf().unwrap().len());
    }

    #[test]
    fn test_fds_validated_at_construction() {
        let schema = Schema::new(attrs!("A" "B")).unwrap();
        assert!(Relation::new("r", schema, fds![fd!("Z" => "A")]).is_err());
    }

    #[test]
    fn test_identity_is_the_name() {
        let a = Relation::new("r", Schema::new(attrs!("A")).unwrap(), fds![]).unwrap();
        let b = Relation::new("r", Schema::new(attrs!("B")).unwrap(), fds![]).unwrap();
        assert_eq!(a, b);
    }
}
