use crate::{
    attribute::{Attribute, AttributeSet},
    closure::closure_unchecked,
    error::Result,
    fd::FdSet,
    schema::Schema,
};
use itertools::Itertools;

/// Enumerate every minimal candidate key.
///
/// Attributes that never appear on the right side of a non-trivial
/// dependency can never be derived, so every key contains them; the search
/// seeds with that set and extends it with combinations of the remaining
/// attributes by increasing size, in schema attribute order. Supersets of an
/// accepted key are pruned, so the output holds minimal keys only, in a
/// deterministic order. Worst case is exponential in the schema width; this
/// is inherent to the problem, not an implementation shortcut.
pub fn minimal_keys(schema: &Schema, fds: &FdSet) -> Result<Vec<AttributeSet>> {
    schema.validate_fds(fds)?;

    let mut derivable = AttributeSet::default();
    for fd in fds.iter() {
        derivable.extend(fd.strict_dependent().into_iter());
    }
    let seed: AttributeSet = schema
        .iter()
        .filter(|a| !derivable.contains(*a))
        .cloned()
        .collect();

    if covers(schema, &closure_unchecked(&seed, fds)) {
        return Ok(vec![seed]);
    }

    debug!("seed {} does not cover {}, extending", seed, schema);
    let rest: Vec<&Attribute> = schema.iter().filter(|a| !seed.contains(*a)).collect();
    let mut keys: Vec<AttributeSet> = Vec::new();
    for k in 1..=rest.len() {
        for combo in rest.iter().combinations(k) {
            let mut candidate = seed.clone();
            candidate.extend(combo.into_iter().map(|a| (**a).clone()));
            if keys.iter().any(|key| key.is_subset(&candidate)) {
                continue;
            }
            if covers(schema, &closure_unchecked(&candidate, fds)) {
                keys.push(candidate);
            }
        }
    }
    Ok(keys)
}

/// True iff the closure of `k` is the entire schema.
pub fn is_superkey(k: &AttributeSet, schema: &Schema, fds: &FdSet) -> Result<bool> {
    schema.validate_set(k)?;
    schema.validate_fds(fds)?;
    Ok(covers(schema, &closure_unchecked(k, fds)))
}

/// True iff `k` is a superkey and no proper subset of it is.
///
/// Monotonicity makes checking the one-attribute-removed subsets sufficient.
pub fn is_minimal_key(k: &AttributeSet, schema: &Schema, fds: &FdSet) -> Result<bool> {
    if !is_superkey(k, schema, fds)? {
        return Ok(false);
    }
    for a in k.iter() {
        let mut sub = k.clone();
        sub.remove(a);
        if covers(schema, &closure_unchecked(&sub, fds)) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Closures of validated inputs never leave the schema, so a length check
/// suffices for equality with it.
pub(crate) fn covers(schema: &Schema, closure: &AttributeSet) -> bool {
    closure.len() == schema.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        attrs, fd, fds,
        error::NormalizationError,
        tests::{CHAIN, COURSES, STAR},
    };

    #[test]
    fn test_sole_key_from_seed() {
        let (schema, fds) = &*STAR;
        assert_eq!(vec![attrs!("A")], minimal_keys(schema, fds).unwrap());

        let (schema, fds) = &*CHAIN;
        assert_eq!(vec![attrs!("A")], minimal_keys(schema, fds).unwrap());

        let (schema, fds) = &*COURSES;
        assert_eq!(
            vec![attrs!("hour" "student")],
            minimal_keys(schema, fds).unwrap()
        );
    }

    #[test]
    fn test_no_fds_whole_schema_is_the_key() {
        let schema = Schema::new(attrs!("A" "B")).unwrap();
        assert_eq!(
            vec![attrs!("A" "B")],
            minimal_keys(&schema, &fds![]).unwrap()
        );
    }

    #[test]
    fn test_multiple_keys_in_schema_order() {
        let schema = Schema::new(attrs!("A" "B" "C")).unwrap();
        let fds = fds![fd!("A" => "B"), fd!("B" => "A"), fd!("A" "B" => "C")];
        assert_eq!(
            vec![attrs!("A"), attrs!("B")],
            minimal_keys(&schema, &fds).unwrap()
        );
    }

    #[test]
    fn test_overlapping_keys() {
        let schema = Schema::new(attrs!("A" "B" "C")).unwrap();
        let fds = fds![fd!("A" "B" => "C"), fd!("C" => "B")];
        assert_eq!(
            vec![attrs!("A" "B"), attrs!("A" "C")],
            minimal_keys(&schema, &fds).unwrap()
        );
    }

    #[test]
    fn test_is_superkey() {
        let (schema, fds) = &*CHAIN;
        assert!(is_superkey(&attrs!("A"), schema, fds).unwrap());
        assert!(is_superkey(&attrs!("A" "B"), schema, fds).unwrap());
        assert!(!is_superkey(&attrs!("B" "C"), schema, fds).unwrap());
    }

    #[test]
    fn test_is_minimal_key() {
        let (schema, fds) = &*CHAIN;
        assert!(is_minimal_key(&attrs!("A"), schema, fds).unwrap());
        assert!(!is_minimal_key(&attrs!("A" "B"), schema, fds).unwrap());
        assert!(!is_minimal_key(&attrs!("B"), schema, fds).unwrap());
    }

    #[test]
    fn test_unknown_attribute() {
        let (schema, fds) = &*CHAIN;
        assert_eq!(
            Err(NormalizationError::UnknownAttribute {
                attribute: "Z".into()
            }),
            is_superkey(&attrs!("Z"), schema, fds)
        );
    }

    #[test]
    fn test_every_key_is_minimal_and_covers() {
        let (schema, fds) = &*COURSES;
        for key in minimal_keys(schema, fds).unwrap() {
            assert!(is_minimal_key(&key, schema, fds).unwrap());
        }
    }
}
