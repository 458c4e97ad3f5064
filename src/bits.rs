//! Fixed-length bit vectors over a fixed object universe.
//!
//! Every extent (set of objects) and every index set over atomic patterns
//! is a [`BitSet`] of a length fixed at construction. All set algebra is
//! positional: bit `i` refers to the `i`-th element of whatever universe
//! the caller indexed (objects in fit order, or atomic patterns in global
//! order).

use std::cmp::Ordering;

use bitvec::prelude::*;

/// A fixed-length bit vector with set semantics.
///
/// Lengths must agree for binary operations; mixing universes is a caller
/// bug and asserts in debug builds.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitSet {
    inner: BitVec<u64, Lsb0>,
}

impl BitSet {
    /// All-zeros vector of length `len`.
    pub fn zeros(len: usize) -> Self {
        BitSet {
            inner: BitVec::repeat(false, len),
        }
    }

    /// All-ones vector of length `len`.
    pub fn full(len: usize) -> Self {
        BitSet {
            inner: BitVec::repeat(true, len),
        }
    }

    /// Build from positions of set bits.
    pub fn from_ones(len: usize, ones: impl IntoIterator<Item = usize>) -> Self {
        let mut out = Self::zeros(len);
        for i in ones {
            out.insert(i);
        }
        out
    }

    /// Build from a string of `'0'`/`'1'` characters, leftmost = bit 0.
    pub fn from_bit_str(bits: &str) -> Self {
        let mut out = Self::zeros(bits.chars().count());
        for (i, c) in bits.chars().enumerate() {
            debug_assert!(c == '0' || c == '1', "bit string must be over {{0,1}}");
            if c == '1' {
                out.insert(i);
            }
        }
        out
    }

    /// Universe size (number of bit positions, not the popcount).
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.inner.count_ones()
    }

    /// True when no bit is set.
    pub fn none_set(&self) -> bool {
        self.inner.not_any()
    }

    /// True when some bit is set.
    pub fn any_set(&self) -> bool {
        self.inner.any()
    }

    pub fn contains(&self, i: usize) -> bool {
        self.inner[i]
    }

    pub fn insert(&mut self, i: usize) {
        self.inner.set(i, true);
    }

    pub fn remove(&mut self, i: usize) {
        self.inner.set(i, false);
    }

    pub fn set(&mut self, i: usize, value: bool) {
        self.inner.set(i, value);
    }

    /// Position of the lowest set bit, if any.
    pub fn first_one(&self) -> Option<usize> {
        self.inner.first_one()
    }

    /// Iterate positions of set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.inner.iter_ones()
    }

    /// Positions of set bits, collected.
    pub fn ones(&self) -> Vec<usize> {
        self.inner.iter_ones().collect()
    }

    /// `self |= other`.
    pub fn union_with(&mut self, other: &BitSet) {
        debug_assert_eq!(self.len(), other.len(), "universe lengths differ");
        for i in other.iter_ones() {
            self.inner.set(i, true);
        }
    }

    /// `self &= other`.
    pub fn intersect_with(&mut self, other: &BitSet) {
        debug_assert_eq!(self.len(), other.len(), "universe lengths differ");
        let drop: Vec<usize> = self
            .inner
            .iter_ones()
            .filter(|&i| !other.inner[i])
            .collect();
        for i in drop {
            self.inner.set(i, false);
        }
    }

    /// `self &= !other`.
    pub fn difference_with(&mut self, other: &BitSet) {
        debug_assert_eq!(self.len(), other.len(), "universe lengths differ");
        for i in other.iter_ones() {
            self.inner.set(i, false);
        }
    }

    /// Every set bit of `self` is set in `other`.
    pub fn is_subset(&self, other: &BitSet) -> bool {
        debug_assert_eq!(self.len(), other.len(), "universe lengths differ");
        self.inner.iter_ones().all(|i| other.inner[i])
    }

    pub fn is_proper_subset(&self, other: &BitSet) -> bool {
        self != other && self.is_subset(other)
    }

    /// Lexicographic order on the raw bit string (bit 0 most significant,
    /// `1 > 0`). Used by the Lindig walk, which needs a total order on
    /// binary intents.
    pub fn cmp_bits(&self, other: &BitSet) -> Ordering {
        debug_assert_eq!(self.len(), other.len(), "universe lengths differ");
        for i in 0..self.len() {
            match (self.contains(i), other.contains(i)) {
                (true, false) => return Ordering::Greater,
                (false, true) => return Ordering::Less,
                _ => {}
            }
        }
        Ordering::Equal
    }

    /// Lexicographic order on the ascending sequence of set positions.
    ///
    /// With equal popcounts this is the tie-break used everywhere a
    /// deterministic extent ordering is needed.
    pub fn cmp_positions(&self, other: &BitSet) -> Ordering {
        let mut a = self.iter_ones();
        let mut b = other.iter_ones();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(x), Some(y)) => match x.cmp(&y) {
                    Ordering::Equal => continue,
                    ord => return ord,
                },
            }
        }
    }
}

impl std::fmt::Display for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in self.inner.iter().by_vals() {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BitSet({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let b = BitSet::from_bit_str("0110");
        assert_eq!(b.len(), 4);
        assert_eq!(b.count(), 2);
        assert_eq!(b.ones(), vec![1, 2]);
        assert_eq!(b, BitSet::from_ones(4, [1, 2]));
        assert_eq!(b.to_string(), "0110");

        assert_eq!(BitSet::full(3).ones(), vec![0, 1, 2]);
        assert!(BitSet::zeros(3).none_set());
    }

    #[test]
    fn test_set_algebra() {
        let a = BitSet::from_bit_str("1100");
        let b = BitSet::from_bit_str("0110");

        let mut u = a.clone();
        u.union_with(&b);
        assert_eq!(u, BitSet::from_bit_str("1110"));

        let mut i = a.clone();
        i.intersect_with(&b);
        assert_eq!(i, BitSet::from_bit_str("0100"));

        let mut d = a.clone();
        d.difference_with(&b);
        assert_eq!(d, BitSet::from_bit_str("1000"));
    }

    #[test]
    fn test_subset() {
        let small = BitSet::from_bit_str("0100");
        let big = BitSet::from_bit_str("0110");
        assert!(small.is_subset(&big));
        assert!(small.is_proper_subset(&big));
        assert!(!big.is_subset(&small));
        assert!(big.is_subset(&big));
        assert!(!big.is_proper_subset(&big));
        assert!(BitSet::zeros(4).is_subset(&small));
    }

    #[test]
    fn test_position_order() {
        // {0,2} before {1,2}: ascending position tuples compare
        // lexicographically.
        let a = BitSet::from_bit_str("101");
        let b = BitSet::from_bit_str("011");
        assert_eq!(a.cmp_positions(&b), Ordering::Less);
        assert_eq!(b.cmp_positions(&a), Ordering::Greater);
        assert_eq!(a.cmp_positions(&a), Ordering::Equal);

        // shorter prefix sorts first
        let c = BitSet::from_bit_str("100");
        assert_eq!(c.cmp_positions(&a), Ordering::Less);
    }

    #[test]
    fn test_bit_string_order() {
        let a = BitSet::from_bit_str("101");
        let b = BitSet::from_bit_str("011");
        // as bit strings: 101 > 011 (bit 0 decides)
        assert_eq!(a.cmp_bits(&b), Ordering::Greater);
        assert_eq!(b.cmp_bits(&a), Ordering::Less);
        assert_eq!(a.cmp_bits(&a), Ordering::Equal);
        let c = BitSet::from_bit_str("100");
        assert_eq!(c.cmp_bits(&a), Ordering::Less);
    }
}
