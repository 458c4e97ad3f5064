//! Extent subsumption order.
//!
//! Atomic-pattern order reconstruction needs, for every extent, the set
//! of extents strictly contained in it: only patterns living on a
//! contained extent can be strictly more precise. Extent inclusion is a
//! cheap pre-filter before the expensive exact pattern comparison.

use crate::bits::BitSet;

/// Transitive strict-containment order over a list of distinct extents
/// sorted by descending popcount (ties broken by ascending position
/// sequence).
///
/// Row `i` of the result marks every `j` with `extents[j] ⊊ extents[i]`.
/// Computed right-to-left: once `j` is known to be contained in `i`,
/// everything contained in `j` is absorbed from row `j` without another
/// subset test.
pub fn subsumption_order(extents: &[BitSet]) -> Vec<BitSet> {
    debug_assert!(
        extents.windows(2).all(|w| w[0].count() >= w[1].count()),
        "extents must be sorted by descending popcount"
    );
    let n = extents.len();
    let mut order = vec![BitSet::zeros(n); n];
    for i in (0..n).rev() {
        let mut row = BitSet::zeros(n);
        // Strict containment implies a strictly smaller popcount, so only
        // later extents can be contained in extents[i].
        for j in i + 1..n {
            if row.contains(j) {
                continue;
            }
            if extents[j].is_proper_subset(&extents[i]) {
                row.insert(j);
                row.union_with(&order[j]);
            }
        }
        order[i] = row;
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(extents: &[BitSet]) -> Vec<BitSet> {
        let n = extents.len();
        (0..n)
            .map(|i| {
                BitSet::from_ones(
                    n,
                    (0..n).filter(|&j| j != i && extents[j].is_proper_subset(&extents[i])),
                )
            })
            .collect()
    }

    fn sorted(mut extents: Vec<BitSet>) -> Vec<BitSet> {
        extents.sort_by(|a, b| b.count().cmp(&a.count()).then(a.cmp_positions(b)));
        extents
    }

    #[test]
    fn test_chain() {
        let extents = sorted(vec![
            BitSet::from_bit_str("1110"),
            BitSet::from_bit_str("1100"),
            BitSet::from_bit_str("1000"),
        ]);
        let order = subsumption_order(&extents);
        assert_eq!(order[0].ones(), vec![1, 2]);
        assert_eq!(order[1].ones(), vec![2]);
        assert!(order[2].none_set());
    }

    #[test]
    fn test_diamond_with_endpoints() {
        let extents = sorted(vec![
            BitSet::from_bit_str("1111"),
            BitSet::from_bit_str("1100"),
            BitSet::from_bit_str("0011"),
            BitSet::from_bit_str("0000"),
        ]);
        let order = subsumption_order(&extents);
        assert_eq!(order, brute_force(&extents));
        // full extent contains everything else
        assert_eq!(order[0].count(), 3);
        // incomparable middle layer only contains the empty extent
        assert_eq!(order[1].ones(), vec![3]);
        assert_eq!(order[2].ones(), vec![3]);
        assert!(order[3].none_set());
    }

    #[test]
    fn test_transitivity_is_a_fixed_point() {
        let extents = sorted(vec![
            BitSet::from_bit_str("111110"),
            BitSet::from_bit_str("111000"),
            BitSet::from_bit_str("110000"),
            BitSet::from_bit_str("011000"),
            BitSet::from_bit_str("010000"),
        ]);
        let order = subsumption_order(&extents);
        assert_eq!(order, brute_force(&extents));
        // another closure pass changes nothing
        let n = order.len();
        let mut closed = order.clone();
        for i in 0..n {
            let ones = closed[i].ones();
            for j in ones {
                let absorbed = closed[j].clone();
                closed[i].union_with(&absorbed);
            }
        }
        assert_eq!(closed, order);
    }
}
