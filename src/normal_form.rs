use crate::{
    attribute::AttributeSet,
    closure::closure_unchecked,
    error::Result,
    fd::{FdSet, FunctionalDependency},
    keys::{covers, minimal_keys},
    schema::Schema,
};

/// The first BCNF-violating dependency, if any.
///
/// Candidates are the non-trivial dependencies with their determinants
/// reduced to minimal left sides, scanned in (determinant, dependent) order
/// with the insertion index as the final tie-break, so the reported
/// violation is stable across runs.
pub fn bcnf_violation(schema: &Schema, fds: &FdSet) -> Result<Option<FunctionalDependency>> {
    schema.validate_fds(fds)?;
    for fd in scan_candidates(fds) {
        if !covers(schema, &closure_unchecked(&fd.determinant, fds)) {
            return Ok(Some(fd));
        }
    }
    Ok(None)
}

/// Boyce-Codd normal form: every non-trivial dependency has a superkey
/// determinant.
pub fn is_bcnf(schema: &Schema, fds: &FdSet) -> Result<bool> {
    Ok(bcnf_violation(schema, fds)?.is_none())
}

/// Third normal form: every non-trivial dependency has a superkey
/// determinant, or carries only prime attributes on its strict dependent
/// side.
pub fn is_3nf(schema: &Schema, fds: &FdSet) -> Result<bool> {
    schema.validate_fds(fds)?;

    let prime: AttributeSet = minimal_keys(schema, fds)?
        .into_iter()
        .flat_map(|key| key.into_iter())
        .collect();

    for fd in fds.iter() {
        let dependent = fd.strict_dependent();
        if dependent.is_empty() {
            continue;
        }
        if covers(schema, &closure_unchecked(&fd.determinant, fds)) {
            continue;
        }
        if !dependent.is_subset(&prime) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Non-trivial dependencies with minimal left sides, in scan order.
fn scan_candidates(fds: &FdSet) -> Vec<FunctionalDependency> {
    let mut candidates: Vec<(FunctionalDependency, usize)> = fds
        .iter()
        .enumerate()
        .filter_map(|(idx, fd)| {
            let dependent = fd.strict_dependent();
            if dependent.is_empty() {
                // Trivial dependencies are legal but contribute nothing.
                return None;
            }
            let determinant = reduce_determinant(&fd.determinant, &dependent, fds);
            Some((FunctionalDependency::new(determinant, dependent), idx))
        })
        .collect();
    candidates.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
    candidates.into_iter().map(|(fd, _)| fd).collect()
}

/// Drop determinant attributes whose removal keeps the dependent derivable,
/// scanning in attribute order.
fn reduce_determinant(det: &AttributeSet, dep: &AttributeSet, fds: &FdSet) -> AttributeSet {
    let mut reduced = det.clone();
    for attr in det.iter() {
        let mut shrunk = reduced.clone();
        shrunk.remove(attr);
        if dep.is_subset(&closure_unchecked(&shrunk, fds)) {
            reduced = shrunk;
        }
    }
    reduced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        attrs, fd, fds,
        tests::{CHAIN, COURSES, STAR},
    };

    #[test]
    fn test_star_is_bcnf() {
        let (schema, fds) = &*STAR;
        assert!(is_bcnf(schema, fds).unwrap());
        assert!(is_3nf(schema, fds).unwrap());
    }

    #[test]
    fn test_chain_violation_is_reported() {
        let (schema, fds) = &*CHAIN;
        assert_eq!(Some(fd!("B" => "C")), bcnf_violation(schema, fds).unwrap());
        assert!(!is_bcnf(schema, fds).unwrap());
    }

    #[test]
    fn test_no_fds_is_trivially_bcnf() {
        let schema = Schema::new(attrs!("A" "B")).unwrap();
        assert!(is_bcnf(&schema, &fds![]).unwrap());
        assert!(is_3nf(&schema, &fds![]).unwrap());
    }

    #[test]
    fn test_trivial_fds_are_filtered() {
        let schema = Schema::new(attrs!("A" "B")).unwrap();
        assert!(is_bcnf(&schema, &fds![fd!("A" "B" => "A")]).unwrap());
    }

    #[test]
    fn test_3nf_but_not_bcnf() {
        // C -> B fails BCNF, but B is prime ({A B} and {A C} are the keys).
        let schema = Schema::new(attrs!("A" "B" "C")).unwrap();
        let fds = fds![fd!("A" "B" => "C"), fd!("C" => "B")];
        assert!(!is_bcnf(&schema, &fds).unwrap());
        assert_eq!(Some(fd!("C" => "B")), bcnf_violation(&schema, &fds).unwrap());
        assert!(is_3nf(&schema, &fds).unwrap());
    }

    #[test]
    fn test_courses_fails_both() {
        let (schema, fds) = &*COURSES;
        // course -> teacher: course is not a superkey and teacher is not
        // part of the only key {hour student}.
        assert!(!is_bcnf(schema, fds).unwrap());
        assert!(!is_3nf(schema, fds).unwrap());
    }

    #[test]
    fn test_scan_reduces_left_sides_and_orders_candidates() {
        let schema = Schema::new(attrs!("A" "B" "C" "D")).unwrap();
        let fds = fds![fd!("A" "B" => "C"), fd!("A" => "B")];
        // A B -> C reduces to A -> C; the A -> B candidate sorts first.
        assert_eq!(Some(fd!("A" => "B")), bcnf_violation(&schema, &fds).unwrap());
    }
}
