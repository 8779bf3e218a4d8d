use crate::{Error, Result};
use std::{collections::HashMap, hash::Hash};

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_SAMPLES: usize = 10_000;
pub const DEFAULT_THRESHOLD: f64 = 0.001;
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// A probability distribution over pages, keyed by page name.
pub type Ranks = HashMap<String, f64, ahash::RandomState>;

pub fn norm_1<K: Eq + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).sum()
}

pub fn norm_inf<K: Eq + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).fold(0.0, f64::max)
}

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if (0.0..=1.0).contains(&damping) {
        Ok(())
    } else {
        Err(Error::invalid("damping", damping, "must be within [0, 1]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norms() {
        let v: HashMap<_, _, ahash::RandomState> =
            [("a", 0.5), ("b", -0.75), ("c", 0.25)].into_iter().collect();
        assert!((norm_1(&v) - 1.5).abs() < 1e-12, "{}", norm_1(&v));
        assert!((norm_inf(&v) - 0.75).abs() < 1e-12, "{}", norm_inf(&v));
    }

    #[test]
    fn damping_bounds() {
        assert!(check_damping(0.0).is_ok());
        assert!(check_damping(1.0).is_ok());
        assert!(matches!(
            check_damping(-0.1),
            Err(Error::InvalidParameter { name: "damping", .. })
        ));
        assert!(check_damping(f64::NAN).is_err());
    }
}
