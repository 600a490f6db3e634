//! Unique combination sampling
//!
//! Draws random, order-independent image subsets from a pool and guarantees
//! that no subset is handed out twice during one sampler's lifetime. The
//! number of useful draws is bounded by the binomial coefficient, so the
//! sampler reports exhaustion instead of retrying forever.

use crate::{Error, Result};
use rand::seq::index;
use rand::Rng;
use std::collections::HashSet;

/// Number of distinct r-element subsets of an n-element set
///
/// Computed with the multiplicative formula so large pools do not overflow
/// the way raw factorials would; saturates at `u64::MAX`.
pub fn combinations_count(n: usize, r: usize) -> u64 {
    if r > n {
        return 0;
    }

    // C(n, r) == C(n, n - r); the smaller side needs fewer steps
    let r = r.min(n - r);

    let mut acc: u128 = 1;
    for i in 0..r as u128 {
        // Exact at every step: acc holds C(n, i) * (i + 1) products
        acc = acc * (n as u128 - i) / (i + 1);
        if acc > u64::MAX as u128 {
            return u64::MAX;
        }
    }

    acc as u64
}

/// An unordered selection of image identifiers, canonicalized by sorting
///
/// Two combinations with the same members compare equal regardless of the
/// order they were drawn in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Combination(Vec<String>);

impl Combination {
    pub fn new(mut members: Vec<String>) -> Self {
        members.sort();
        Self(members)
    }

    /// Members in canonical (sorted) order
    pub fn members(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Draws unique combinations from a fixed pool
///
/// Owns the set of already-used combinations for one batch run; state is
/// in-memory only, so a fresh sampler may legitimately repeat a
/// combination produced by an earlier run.
#[derive(Debug)]
pub struct CombinationSampler {
    pool: Vec<String>,
    size: usize,
    ceiling: u64,
    used: HashSet<Combination>,
}

impl CombinationSampler {
    /// Create a sampler over `pool`, drawing subsets of `size` members
    pub fn new(pool: Vec<String>, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidInput(
                "Combination size must be at least 1".to_string(),
            ));
        }
        if pool.len() < size {
            return Err(Error::InsufficientImages {
                found: pool.len(),
                required: size,
            });
        }

        let ceiling = combinations_count(pool.len(), size);

        Ok(Self {
            pool,
            size,
            ceiling,
            used: HashSet::new(),
        })
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Maximum number of distinct combinations this pool can yield
    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// Number of combinations handed out so far
    pub fn used_len(&self) -> usize {
        self.used.len()
    }

    /// Draw one combination not seen before, or `None` once the pool's
    /// combinatorial ceiling has been reached
    ///
    /// Duplicates are rejected and redrawn; the ceiling check makes the
    /// rejection loop terminate rather than retrying forever on a spent
    /// pool.
    pub fn draw_unique<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Combination> {
        if self.used.len() as u64 >= self.ceiling {
            return None;
        }

        loop {
            let picked = index::sample(rng, self.pool.len(), self.size);
            let combination =
                Combination::new(picked.iter().map(|i| self.pool[i].clone()).collect());

            if self.used.insert(combination.clone()) {
                return Some(combination);
            }
        }
    }
}
