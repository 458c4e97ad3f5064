//! Interval patterns over the extended real line.
//!
//! Precision is reversed containment: a narrower interval describes its
//! objects more precisely, so `a.le(b)` holds when `b` lies inside `a`.
//! The full line is the bottom and the empty interval the top. Atomic
//! decomposition splits an interval into half-rays, one per finite
//! bound, plus the full line.
//!
//! Bounds must not be NaN. Construction canonicalizes: `-0.0` becomes
//! `0.0`, infinite bounds are closed, and any interval with no points
//! collapses to [`IntervalPattern::Empty`].

use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};

use crate::pattern::{AlgebraResult, Pattern};

/// An interval of the extended real line, or the empty interval.
#[derive(Clone, Copy)]
pub enum IntervalPattern {
    /// The contradictory description, refining every interval.
    Empty,
    Range {
        lower: f64,
        upper: f64,
        closed_lower: bool,
        closed_upper: bool,
    },
}

impl IntervalPattern {
    /// Canonical interval from raw bounds.
    pub fn new(lower: f64, closed_lower: bool, upper: f64, closed_upper: bool) -> Self {
        debug_assert!(
            !lower.is_nan() && !upper.is_nan(),
            "interval bounds must be ordered reals"
        );
        // -0.0 must compare and hash like 0.0
        let lower = if lower == 0.0 { 0.0 } else { lower };
        let upper = if upper == 0.0 { 0.0 } else { upper };
        let closed_lower = closed_lower || lower == f64::NEG_INFINITY;
        let closed_upper = closed_upper || upper == f64::INFINITY;
        if lower > upper || (lower == upper && !(closed_lower && closed_upper)) {
            return IntervalPattern::Empty;
        }
        IntervalPattern::Range {
            lower,
            upper,
            closed_lower,
            closed_upper,
        }
    }

    /// `[lower, upper]`.
    pub fn closed(lower: f64, upper: f64) -> Self {
        Self::new(lower, true, upper, true)
    }

    /// `(lower, upper)`.
    pub fn open(lower: f64, upper: f64) -> Self {
        Self::new(lower, false, upper, false)
    }

    /// The whole extended real line, `[-inf, +inf]`.
    pub fn full() -> Self {
        Self::new(f64::NEG_INFINITY, true, f64::INFINITY, true)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, IntervalPattern::Empty)
    }
}

impl PartialEq for IntervalPattern {
    fn eq(&self, other: &Self) -> bool {
        use IntervalPattern::*;
        match (self, other) {
            (Empty, Empty) => true,
            (
                Range {
                    lower: la,
                    upper: ua,
                    closed_lower: cla,
                    closed_upper: cua,
                },
                Range {
                    lower: lb,
                    upper: ub,
                    closed_lower: clb,
                    closed_upper: cub,
                },
            ) => {
                la.to_bits() == lb.to_bits()
                    && ua.to_bits() == ub.to_bits()
                    && cla == clb
                    && cua == cub
            }
            _ => false,
        }
    }
}

impl Eq for IntervalPattern {}

impl Hash for IntervalPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            IntervalPattern::Empty => state.write_u8(0),
            IntervalPattern::Range {
                lower,
                upper,
                closed_lower,
                closed_upper,
            } => {
                state.write_u8(1);
                state.write_u64(lower.to_bits());
                state.write_u64(upper.to_bits());
                closed_lower.hash(state);
                closed_upper.hash(state);
            }
        }
    }
}

impl Pattern for IntervalPattern {
    /// Convex hull.
    fn try_meet(&self, other: &Self) -> AlgebraResult<Self> {
        use IntervalPattern::*;
        let out = match (*self, *other) {
            (Empty, x) | (x, Empty) => x,
            (
                Range {
                    lower: la,
                    upper: ua,
                    closed_lower: cla,
                    closed_upper: cua,
                },
                Range {
                    lower: lb,
                    upper: ub,
                    closed_lower: clb,
                    closed_upper: cub,
                },
            ) => {
                let (lower, closed_lower) = if la < lb {
                    (la, cla)
                } else if lb < la {
                    (lb, clb)
                } else {
                    (la, cla || clb)
                };
                let (upper, closed_upper) = if ua > ub {
                    (ua, cua)
                } else if ub > ua {
                    (ub, cub)
                } else {
                    (ua, cua || cub)
                };
                Self::new(lower, closed_lower, upper, closed_upper)
            }
        };
        Ok(out)
    }

    /// Intersection; disjoint operands give [`IntervalPattern::Empty`].
    fn try_join(&self, other: &Self) -> AlgebraResult<Self> {
        use IntervalPattern::*;
        let out = match (*self, *other) {
            (Empty, _) | (_, Empty) => Empty,
            (
                Range {
                    lower: la,
                    upper: ua,
                    closed_lower: cla,
                    closed_upper: cua,
                },
                Range {
                    lower: lb,
                    upper: ub,
                    closed_lower: clb,
                    closed_upper: cub,
                },
            ) => {
                let (lower, closed_lower) = if la > lb {
                    (la, cla)
                } else if lb > la {
                    (lb, clb)
                } else {
                    (la, cla && clb)
                };
                let (upper, closed_upper) = if ua < ub {
                    (ua, cua)
                } else if ub < ua {
                    (ub, cub)
                } else {
                    (ua, cua && cub)
                };
                Self::new(lower, closed_lower, upper, closed_upper)
            }
        };
        Ok(out)
    }

    /// `other` lies inside `self`.
    fn le(&self, other: &Self) -> bool {
        use IntervalPattern::*;
        match (*self, *other) {
            (_, Empty) => true,
            (Empty, _) => false,
            (
                Range {
                    lower: la,
                    upper: ua,
                    closed_lower: cla,
                    closed_upper: cua,
                },
                Range {
                    lower: lb,
                    upper: ub,
                    closed_lower: clb,
                    closed_upper: cub,
                },
            ) => {
                let lower_ok = la < lb || (la == lb && (cla || !clb));
                let upper_ok = ua > ub || (ua == ub && (cua || !cub));
                lower_ok && upper_ok
            }
        }
    }

    fn min_pattern() -> Option<Self> {
        Some(Self::full())
    }

    fn max_pattern() -> Option<Self> {
        Some(IntervalPattern::Empty)
    }

    /// The full line, a lower half-ray per finite lower bound and an
    /// upper half-ray per finite upper bound, with the open variant
    /// added when the bound is open.
    fn try_atomic_patterns(&self) -> AlgebraResult<Vec<Self>> {
        let mut atoms = vec![Self::full()];
        if let IntervalPattern::Range {
            lower,
            upper,
            closed_lower,
            closed_upper,
        } = *self
        {
            if lower.is_finite() {
                atoms.push(Self::new(lower, true, f64::INFINITY, true));
                if !closed_lower {
                    atoms.push(Self::new(lower, false, f64::INFINITY, true));
                }
            }
            if upper.is_finite() {
                atoms.push(Self::new(f64::NEG_INFINITY, true, upper, true));
                if !closed_upper {
                    atoms.push(Self::new(f64::NEG_INFINITY, true, upper, false));
                }
            }
        }
        Ok(atoms)
    }
}

impl Display for IntervalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            IntervalPattern::Empty => write!(f, "ø"),
            IntervalPattern::Range {
                lower,
                upper,
                closed_lower,
                closed_upper,
            } => {
                write!(f, "{}", if closed_lower { '[' } else { '(' })?;
                if lower == f64::NEG_INFINITY {
                    write!(f, "-inf")?;
                } else {
                    write!(f, "{}", lower)?;
                }
                write!(f, ", ")?;
                if upper == f64::INFINITY {
                    write!(f, "+inf")?;
                } else {
                    write!(f, "{}", upper)?;
                }
                write!(f, "{}", if closed_upper { ']' } else { ')' })
            }
        }
    }
}

impl Debug for IntervalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntervalPattern({})", self)
    }
}
