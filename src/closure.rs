//! Closure computation under Armstrong's axioms.
//!
//! Augmentation and transitivity are applied implicitly through the fixed
//! point; there is no axiom-by-axiom derivation.

use crate::{
    attribute::AttributeSet,
    error::Result,
    fd::{FdSet, FunctionalDependency},
    schema::Schema,
};
use itertools::Itertools;

/// Compute X⁺, the closure of `x` under `fds`.
///
/// The queried set and every dependency are validated against the governing
/// schema before any computation. The result is a deterministic function of
/// (x, fds) regardless of the dependency iteration order.
pub fn attribute_closure(schema: &Schema, x: &AttributeSet, fds: &FdSet) -> Result<AttributeSet> {
    schema.validate_set(x)?;
    schema.validate_fds(fds)?;
    Ok(closure_unchecked(x, fds))
}

/// The monotone fixed point: a full pass over the dependencies, folding in
/// every dependent whose determinant is already covered, until a pass adds
/// nothing. Terminates because the working set only grows and is bounded by
/// the schema.
pub(crate) fn closure_unchecked(x: &AttributeSet, fds: &FdSet) -> AttributeSet {
    let mut result = x.clone();
    loop {
        let before = result.len();
        for fd in fds.iter() {
            if fd.determinant.is_subset(&result) {
                result.extend(fd.dependent.iter().cloned());
            }
        }
        if result.len() == before {
            return result;
        }
    }
}

/// Compute F⁺ restricted to the schema universe.
///
/// Enumerates every non-empty determinant subset by increasing size, in
/// schema attribute order, and emits `S -> closure(S) \ S` whenever the
/// right side is non-empty. Exponential in the schema width by nature;
/// normalization workloads keep schemas small enough for this to be
/// acceptable.
pub fn fd_set_closure(schema: &Schema, fds: &FdSet) -> Result<FdSet> {
    schema.validate_fds(fds)?;

    let mut out = FdSet::new();
    for k in 1..=schema.len() {
        for combo in schema.iter().cloned().combinations(k) {
            let determinant: AttributeSet = combo.into_iter().collect();
            let dependent = &closure_unchecked(&determinant, fds) - &determinant;
            if !dependent.is_empty() {
                out.insert(FunctionalDependency::new(determinant, dependent));
            }
        }
    }
    Ok(out)
}
