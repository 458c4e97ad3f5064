//! The pattern algebra contract.
//!
//! A pattern is an immutable value from a partially ordered description
//! domain. The engine consumes domains purely through [`Pattern`]: meet,
//! join, the `≤` order, optional global bounds, and optional atomic
//! decomposition. Partial operations return [`AlgebraResult`] instead of
//! panicking, so capability probing is a plain match on the result rather
//! than exception-driven control flow.

use std::fmt::Debug;
use std::hash::Hash;

/// Signal that a domain does not define an algebraic operation.
///
/// Carries the operation name for error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unsupported(pub &'static str);

impl std::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "the pattern domain does not support `{}`", self.0)
    }
}

/// Tri-state outcome of a partial algebraic operation: the result, or the
/// not-supported signal. Genuine defects abort instead.
pub type AlgebraResult<T> = Result<T, Unsupported>;

/// A value of a partially ordered pattern domain.
///
/// `a.le(b)` reads "a is less precise than, or equal to, b". Meet is the
/// most precise common generalization, join the least precise common
/// refinement. Equality and hashing are by value.
///
/// The capability probes (`meetable`, `joinable`, `atomisable`) are pure
/// and side-effect free; implementations of `try_meet`/`try_join` must
/// not call them back, or the probe would recurse.
pub trait Pattern: Clone + Eq + Hash + Debug {
    /// Most precise pattern less precise than both operands.
    fn try_meet(&self, other: &Self) -> AlgebraResult<Self>;

    /// Least precise pattern more precise than both operands.
    fn try_join(&self, other: &Self) -> AlgebraResult<Self>;

    /// Whether `self` is less precise than or equal to `other`.
    ///
    /// The default decides via the meet (a ≤ b ⇔ a ∧ b = a); domains
    /// usually override with a direct containment test.
    fn le(&self, other: &Self) -> bool {
        self == other || matches!(self.try_meet(other), Ok(m) if &m == self)
    }

    /// Strictly less precise.
    fn lt(&self, other: &Self) -> bool {
        self != other && self.le(other)
    }

    /// More precise than or equal to.
    fn ge(&self, other: &Self) -> bool {
        other.le(self)
    }

    /// Strictly more precise.
    fn gt(&self, other: &Self) -> bool {
        other.lt(self)
    }

    /// The domain-wide bottom (least precise pattern), if the domain has
    /// one. A per-type constant, never runtime state.
    fn min_pattern() -> Option<Self> {
        None
    }

    /// The domain-wide top (most precise pattern), if the domain has one.
    fn max_pattern() -> Option<Self> {
        None
    }

    /// The minimal non-trivial patterns whose meets generate every
    /// pattern below `self`. Deduplicated by the caller; the returned
    /// order must be deterministic.
    fn try_atomic_patterns(&self) -> AlgebraResult<Vec<Self>> {
        Err(Unsupported("atomic_patterns"))
    }

    /// Probe: does the domain define a meet?
    fn meetable(&self) -> bool {
        self.try_meet(self).is_ok()
    }

    /// Probe: does the domain define a join?
    fn joinable(&self) -> bool {
        self.try_join(self).is_ok()
    }

    /// Probe: does the domain define atomic decomposition?
    fn atomisable(&self) -> bool {
        self.try_atomic_patterns().is_ok()
    }
}

/// Meet of a pattern the enumeration already proved meetable.
///
/// A domain whose probe succeeds but whose meet later fails has broken
/// its contract; that is a defect, so this aborts loudly rather than
/// threading an impossible error through every iterator.
pub(crate) fn meet_checked<P: Pattern>(a: &P, b: &P) -> P {
    match a.try_meet(b) {
        Ok(p) => p,
        Err(op) => panic!("pattern domain broke its capability contract: {}", op),
    }
}

/// Join counterpart of [`meet_checked`].
pub(crate) fn join_checked<P: Pattern>(a: &P, b: &P) -> P {
    match a.try_join(b) {
        Ok(p) => p,
        Err(op) => panic!("pattern domain broke its capability contract: {}", op),
    }
}
