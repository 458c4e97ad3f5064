//! Componentwise products of two pattern domains.
//!
//! Every operation acts independently on each side, so the product is a
//! lattice exactly when both components are. Atomic decomposition needs
//! both component bottoms: each component atom is padded with the other
//! side's bottom.

use crate::pattern::{AlgebraResult, Pattern, Unsupported};

/// A pair of patterns, ordered componentwise.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ProductPattern<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> ProductPattern<A, B> {
    pub fn new(first: A, second: B) -> Self {
        ProductPattern { first, second }
    }
}

impl<A: Pattern, B: Pattern> Pattern for ProductPattern<A, B> {
    fn try_meet(&self, other: &Self) -> AlgebraResult<Self> {
        Ok(ProductPattern {
            first: self.first.try_meet(&other.first)?,
            second: self.second.try_meet(&other.second)?,
        })
    }

    fn try_join(&self, other: &Self) -> AlgebraResult<Self> {
        Ok(ProductPattern {
            first: self.first.try_join(&other.first)?,
            second: self.second.try_join(&other.second)?,
        })
    }

    fn le(&self, other: &Self) -> bool {
        self.first.le(&other.first) && self.second.le(&other.second)
    }

    fn min_pattern() -> Option<Self> {
        Some(ProductPattern {
            first: A::min_pattern()?,
            second: B::min_pattern()?,
        })
    }

    fn max_pattern() -> Option<Self> {
        Some(ProductPattern {
            first: A::max_pattern()?,
            second: B::max_pattern()?,
        })
    }

    fn try_atomic_patterns(&self) -> AlgebraResult<Vec<Self>> {
        let (first_min, second_min) = match (A::min_pattern(), B::min_pattern()) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(Unsupported("atomic_patterns")),
        };
        let mut atoms = Vec::new();
        for atom in self.first.try_atomic_patterns()? {
            atoms.push(ProductPattern {
                first: atom,
                second: second_min.clone(),
            });
        }
        for atom in self.second.try_atomic_patterns()? {
            atoms.push(ProductPattern {
                first: first_min.clone(),
                second: atom,
            });
        }
        Ok(atoms)
    }
}
