//! Lossless-join BCNF decomposition.

use crate::{
    attribute::AttributeSet,
    closure::closure_unchecked,
    error::Result,
    fd::{FdSet, FunctionalDependency},
    normal_form::bcnf_violation,
    schema::Schema,
};
use ptree::{Style, TreeItem};
use std::{borrow::Cow, io};

/// The recursion trace of a BCNF decomposition.
///
/// Leaves are relations already in BCNF; every split records the violating
/// dependency that drove it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decomposition {
    Relation {
        schema: Schema,
        fds: FdSet,
    },
    Split {
        on: FunctionalDependency,
        left: Box<Decomposition>,
        right: Box<Decomposition>,
    },
}

impl Decomposition {
    /// Flatten to the decomposed relations, left to right.
    pub fn into_relations(self) -> Vec<(Schema, FdSet)> {
        match self {
            Self::Relation { schema, fds } => vec![(schema, fds)],
            Self::Split { left, right, .. } => {
                let mut out = left.into_relations();
                out.extend(right.into_relations());
                out
            }
        }
    }
}

impl TreeItem for Decomposition {
    type Child = Self;

    fn write_self<W: io::Write>(&self, f: &mut W, style: &Style) -> io::Result<()> {
        match self {
            Self::Relation { schema, .. } => write!(f, "{}", style.paint(schema)),
            Self::Split { on, .. } => write!(f, "{}", style.paint(format!("split on {on}"))),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        match self {
            Self::Relation { .. } => Cow::from(vec![]),
            Self::Split { left, right, .. } => Cow::from(vec![(**left).clone(), (**right).clone()]),
        }
    }
}

/// Decompose into BCNF relations with their projected dependency sets.
///
/// The decomposition is lossless-join; it does not promise to preserve every
/// original dependency, which is the well-known BCNF limitation.
pub fn decompose_bcnf(schema: &Schema, fds: &FdSet) -> Result<Vec<(Schema, FdSet)>> {
    Ok(decompose_bcnf_tree(schema, fds)?.into_relations())
}

/// Decompose, keeping the recursion tree for diagnostics.
pub fn decompose_bcnf_tree(schema: &Schema, fds: &FdSet) -> Result<Decomposition> {
    schema.validate_fds(fds)?;

    let violation = match bcnf_violation(schema, fds)? {
        None => {
            return Ok(Decomposition::Relation {
                schema: schema.clone(),
                fds: fds.clone(),
            })
        }
        Some(fd) => fd,
    };

    debug!("splitting {} on {}", schema, violation);

    // R1 = det⁺ and R2 = (R \ det⁺) ∪ det. A violation implies det⁺ is a
    // proper subset holding at least one attribute outside det, so both
    // sides are strictly smaller than the input and the recursion depth is
    // bounded by the schema width.
    let x = closure_unchecked(&violation.determinant, fds);
    let r2 = &(schema.as_set() - &x) | &violation.determinant;

    let f1 = project_fds_unchecked(&x, fds);
    let f2 = project_fds_unchecked(&r2, fds);
    let s1 = Schema::new(x)?;
    let s2 = Schema::new(r2)?;

    let left = decompose_bcnf_tree(&s1, &f1)?;
    let right = decompose_bcnf_tree(&s2, &f2)?;
    Ok(Decomposition::Split {
        on: violation,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// Project `fds` onto the attribute subset `r`.
///
/// Candidate determinants are the non-empty intersections of existing left
/// sides with `r`, closed under pairwise union; blind subset enumeration is
/// avoided on purpose. Each candidate S contributes
/// `S -> (closure(S) ∩ r) \ S` whenever the right side is non-empty.
pub fn project_fds(schema: &Schema, r: &AttributeSet, fds: &FdSet) -> Result<FdSet> {
    schema.validate_set(r)?;
    schema.validate_fds(fds)?;
    Ok(project_fds_unchecked(r, fds))
}

fn project_fds_unchecked(r: &AttributeSet, fds: &FdSet) -> FdSet {
    let mut seeds: Vec<AttributeSet> = Vec::new();
    for fd in fds.iter() {
        let seed = &fd.determinant & r;
        if !seed.is_empty() && !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }

    // Grow the union closure of the seeds, worklist-style.
    let mut candidates = seeds.clone();
    let mut cur = 0;
    while cur < candidates.len() {
        for seed in &seeds {
            let grown = &candidates[cur] | seed;
            if !candidates.contains(&grown) {
                candidates.push(grown);
            }
        }
        cur += 1;
    }

    let mut out = FdSet::new();
    for determinant in candidates {
        let dependent = &(&closure_unchecked(&determinant, fds) & r) - &determinant;
        if !dependent.is_empty() {
            out.insert(FunctionalDependency::new(determinant, dependent));
        }
    }
    out
}
