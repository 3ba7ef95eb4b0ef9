use crate::{
    attribute::AttributeSet,
    closure::closure_unchecked,
    error::Result,
    fd::FdSet,
    schema::Schema,
};
use dashmap::DashMap;

/// Memoized attribute closures for repeated queries against one
/// (schema, dependency-set) pair.
///
/// Layered above the pure core: the cache key is the queried set alone,
/// which is only sound because the governing pair is fixed at construction.
#[derive(Debug)]
pub struct ClosureCache {
    schema: Schema,
    fds: FdSet,
    memo: DashMap<AttributeSet, AttributeSet>,
}

impl ClosureCache {
    pub fn new(schema: Schema, fds: FdSet) -> Result<Self> {
        schema.validate_fds(&fds)?;
        Ok(Self {
            schema,
            fds,
            memo: DashMap::new(),
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn closure(&self, x: &AttributeSet) -> Result<AttributeSet> {
        if let Some(hit) = self.memo.get(x) {
            return Ok(hit.clone());
        }

        self.schema.validate_set(x)?;
        let ans = closure_unchecked(x, &self.fds);
        self.memo.insert(x.clone(), ans.clone());
        Ok(ans)
    }

    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}
