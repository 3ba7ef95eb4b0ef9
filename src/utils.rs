use anyhow::{Error, Result};
use tracing_subscriber::EnvFilter;

pub fn init_tracing_subscriber(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(Error::msg)
}

/// Helper function to check whether two unordered lists are the same.
pub(crate) fn unordered_eq<T: Ord + Eq>(lhs: &[T], rhs: &[T]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut lhs: Vec<_> = lhs.iter().collect();
    let mut rhs: Vec<_> = rhs.iter().collect();
    lhs.sort_unstable();
    rhs.sort_unstable();
    lhs == rhs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unordered_eq() {
        assert!(unordered_eq(&[1, 2, 3], &[3, 1, 2]));
        assert!(!unordered_eq(&[1, 2], &[1, 2, 2]));
        assert!(!unordered_eq(&[1, 2], &[1, 3]));
    }
}
