#[macro_use]
extern crate tracing;

pub mod attribute;
pub mod cache;
pub mod closure;
pub mod decompose;
pub mod error;
pub mod fd;
pub mod keys;
pub mod normal_form;
pub mod relation;
pub mod schema;
pub mod utils;

#[cfg(test)]
pub(crate) mod tests;

pub use attribute::{Attribute, AttributeSet, SQL_TYPES};
pub use cache::ClosureCache;
pub use closure::{attribute_closure, fd_set_closure};
pub use decompose::{decompose_bcnf, decompose_bcnf_tree, project_fds, Decomposition};
pub use error::{NormalizationError, Result};
pub use fd::{FdSet, FunctionalDependency};
pub use keys::{is_minimal_key, is_superkey, minimal_keys};
pub use normal_form::{bcnf_violation, is_3nf, is_bcnf};
pub use relation::Relation;
pub use schema::Schema;
