//! Close-By-One closure enumeration.
//!
//! Both variants avoid duplicate closures with the canonical-form test:
//! a closure is kept only when produced along the lexicographically
//! smallest generating path, so every closed pattern is yielded exactly
//! once without a seen-set.

use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::bits::BitSet;
use crate::error::{PsError, PsResult};
use crate::pattern::{join_checked, meet_checked, Pattern, Unsupported};

/// Minimum-support threshold for [`iter_all_patterns`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MinSupport {
    /// Keep patterns whose extent has at least this many objects.
    Absolute(usize),
    /// Fraction of the object count in (0, 1); resolved via ceiling.
    Relative(f64),
}

impl MinSupport {
    fn resolve(self, n_objects: usize) -> PsResult<usize> {
        match self {
            MinSupport::Absolute(count) => Ok(count),
            MinSupport::Relative(frac) => {
                if !(frac > 0.0 && frac < 1.0) {
                    return Err(PsError::BadMinSupport(frac));
                }
                Ok((n_objects as f64 * frac).ceil() as usize)
            }
        }
    }
}

/// Exploration order for [`iter_all_patterns`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    /// Leftmost branch exhausted first (stack).
    DepthFirst,
    /// Level by level (queue).
    BreadthFirst,
}

// ---------------------------------------------------------------------------
// Object-wise Close-By-One
// ---------------------------------------------------------------------------

/// Lazy stream of the closed intents of a per-object pattern list,
/// produced by object-wise Close-By-One. See [`iter_intents_via_ocbo`].
pub struct OcboIntents<'a, P: Pattern> {
    patterns: &'a [P],
    /// distinct patterns with the objects carrying them
    groups: Vec<(P, BitSet)>,
    /// (known extent, object to add); `None` seeds the root
    stack: Vec<(BitSet, Option<usize>)>,
}

/// Enumerate every closed intent reachable from `patterns` (one pattern
/// per object, in object order), each exactly once, with its closed
/// extent, in depth-first canonical order.
///
/// Fails upfront when the domain defines no meet or join; a domain that
/// passes the probe but fails mid-run has broken its contract and aborts.
pub fn iter_intents_via_ocbo<P: Pattern>(patterns: &[P]) -> PsResult<OcboIntents<'_, P>> {
    if let Some(first) = patterns.first() {
        if !first.meetable() {
            return Err(Unsupported("meet").into());
        }
        if !first.joinable() {
            return Err(Unsupported("join").into());
        }
    }

    let n_objects = patterns.len();
    let mut groups: Vec<(P, BitSet)> = Vec::new();
    for (g, pattern) in patterns.iter().enumerate() {
        match groups.iter_mut().find(|(p, _)| p == pattern) {
            Some((_, extent)) => extent.insert(g),
            None => {
                let mut extent = BitSet::zeros(n_objects);
                extent.insert(g);
                groups.push((pattern.clone(), extent));
            }
        }
    }

    let stack = if n_objects > 0 {
        vec![(BitSet::zeros(n_objects), None)]
    } else {
        Vec::new()
    };
    Ok(OcboIntents {
        patterns,
        groups,
        stack,
    })
}

impl<P: Pattern> OcboIntents<'_, P> {
    /// Meet of the patterns of all objects in `extent`; for the empty
    /// extent, the join of every distinct pattern (no object constrains
    /// the intent).
    fn intention(&self, extent: &BitSet) -> P {
        if extent.none_set() {
            let mut it = self.groups.iter().map(|(p, _)| p);
            // groups is non-empty whenever the stack was seeded
            let mut top = it.next().expect("non-empty pattern list").clone();
            for p in it {
                top = join_checked(&top, p);
            }
            return top;
        }
        let mut intent: Option<P> = None;
        for g in extent.iter_ones() {
            intent = Some(match intent {
                None => self.patterns[g].clone(),
                Some(acc) => meet_checked(&acc, &self.patterns[g]),
            });
        }
        intent.expect("extent has a set bit")
    }

    /// Objects whose own pattern refines `intent`.
    fn extension(&self, intent: &P) -> BitSet {
        let mut extent = BitSet::zeros(self.patterns.len());
        for (pattern, objects) in &self.groups {
            if intent.le(pattern) {
                extent.union_with(objects);
            }
        }
        extent
    }
}

impl<P: Pattern> Iterator for OcboIntents<'_, P> {
    type Item = (P, BitSet);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((known_extent, object_to_add)) = self.stack.pop() {
            let mut proto_extent = known_extent;
            if let Some(g) = object_to_add {
                proto_extent.insert(g);
            }

            let intent = self.intention(&proto_extent);
            let extent = self.extension(&intent);

            // canonical-form test: a pulled-in object below the one just
            // added means this closure has a lexicographically earlier
            // generating path
            if let Some(g) = object_to_add {
                if extent
                    .iter_ones()
                    .take_while(|&i| i < g)
                    .any(|i| !proto_extent.contains(i))
                {
                    continue;
                }
            }

            let next_from = object_to_add.map_or(0, |g| g + 1);
            let children: Vec<(BitSet, Option<usize>)> = (next_from..extent.len())
                .filter(|&g| !extent.contains(g))
                .map(|g| (extent.clone(), Some(g)))
                .collect();
            self.stack.extend(children.into_iter().rev());

            return Some((intent, extent));
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Atomic-pattern Close-By-One
// ---------------------------------------------------------------------------

/// Lazy stream of every closed pattern generated by joining atomic
/// patterns, with minimum-support pruning. See [`iter_all_patterns`].
///
/// Children of the last yielded pattern are scheduled on the next pull;
/// calling [`prune`](Self::prune) in between skips that subtree, which
/// turns any consumer loop into a caller-driven search.
pub struct PatternEnumerator<P: Pattern> {
    atoms: Vec<P>,
    extents: Vec<BitSet>,
    min_pattern: P,
    total_extent: BitSet,
    min_support: usize,
    traversal: Traversal,
    /// (involved atom indices, atom index to add)
    frontier: VecDeque<(BitSet, usize)>,
    /// children of the last yielded pattern, not yet scheduled
    pending: Vec<(BitSet, usize)>,
    /// bottom pattern + full extent, yielded on the first pull
    seed: Option<(P, BitSet)>,
}

/// Enumerate every closed pattern formed by joining a subset of
/// `atomic_patterns` (an ordered atom → extent map over a fixed object
/// universe) whose extent meets `min_support`, each exactly once.
///
/// Depth-first and breadth-first traversals yield the same set of
/// (pattern, extent) pairs and differ only in emission order.
pub fn iter_all_patterns<P: Pattern>(
    atomic_patterns: &IndexMap<P, BitSet>,
    min_support: MinSupport,
    traversal: Traversal,
) -> PsResult<PatternEnumerator<P>> {
    let atoms: Vec<P> = atomic_patterns.keys().cloned().collect();
    let extents: Vec<BitSet> = atomic_patterns.values().cloned().collect();
    let first = atoms.first().ok_or(PsError::Unfit)?;
    if !first.joinable() {
        return Err(Unsupported("join").into());
    }

    let n_objects = extents[0].len();
    let total_extent = BitSet::full(n_objects);
    let min_support = min_support.resolve(n_objects)?;

    let min_pattern = match P::min_pattern() {
        Some(min) => min,
        None => {
            if !first.meetable() {
                return Err(Unsupported("meet").into());
            }
            let mut min = first.clone();
            for atom in &atoms[1..] {
                min = meet_checked(&min, atom);
            }
            min
        }
    };

    let n_atoms = atoms.len();
    let pending = (0..n_atoms)
        .map(|i| (BitSet::zeros(n_atoms), i))
        .collect();
    Ok(PatternEnumerator {
        atoms,
        extents,
        seed: Some((min_pattern.clone(), total_extent.clone())),
        min_pattern,
        total_extent,
        min_support,
        traversal,
        frontier: VecDeque::new(),
        pending,
    })
}

impl<P: Pattern> PatternEnumerator<P> {
    /// Decline to expand the subtree below the last yielded pattern.
    ///
    /// Nothing strictly more precise than that pattern will be yielded;
    /// all other branches are unaffected. Takes effect until the next
    /// pull, after which the children are gone for good.
    pub fn prune(&mut self) {
        self.pending.clear();
    }

    fn schedule_pending(&mut self) {
        match self.traversal {
            Traversal::DepthFirst => {
                // reversed so the leftmost child is popped first
                while let Some(frame) = self.pending.pop() {
                    self.frontier.push_back(frame);
                }
            }
            Traversal::BreadthFirst => {
                for frame in self.pending.drain(..) {
                    self.frontier.push_back(frame);
                }
            }
        }
    }

    fn pop_frame(&mut self) -> Option<(BitSet, usize)> {
        match self.traversal {
            Traversal::DepthFirst => self.frontier.pop_back(),
            Traversal::BreadthFirst => self.frontier.pop_front(),
        }
    }
}

impl<P: Pattern> Iterator for PatternEnumerator<P> {
    type Item = (P, BitSet);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(seed) = self.seed.take() {
            return Some(seed);
        }
        self.schedule_pending();

        while let Some((involved, to_add)) = self.pop_frame() {
            let mut proto_closure = involved.clone();
            proto_closure.insert(to_add);

            let mut extent = self.total_extent.clone();
            for i in proto_closure.iter_ones() {
                extent.intersect_with(&self.extents[i]);
            }
            if extent.count() < self.min_support {
                continue;
            }

            let mut new_pattern = self.min_pattern.clone();
            for i in proto_closure.iter_ones() {
                new_pattern = join_checked(&new_pattern, &self.atoms[i]);
            }

            // canonical-form test: an earlier free atom already implied by
            // the new pattern means an earlier path reaches this closure
            let duplicate = (0..to_add)
                .filter(|&i| !involved.contains(i))
                .any(|i| self.atoms[i].le(&new_pattern));
            if duplicate {
                continue;
            }

            // absorb later atoms the pattern already contains: they are no
            // longer free choices
            let mut closure = proto_closure;
            for i in to_add + 1..self.atoms.len() {
                if !closure.contains(i) && self.atoms[i].le(&new_pattern) {
                    closure.insert(i);
                }
            }

            self.pending = (to_add + 1..self.atoms.len())
                .filter(|&i| !closure.contains(i))
                .map(|i| (closure.clone(), i))
                .collect();

            return Some((new_pattern, extent));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::ItemSetPattern;

    fn atoms(entries: &[(&str, &str)]) -> IndexMap<ItemSetPattern<String>, BitSet> {
        entries
            .iter()
            .map(|(item, bits)| {
                (
                    ItemSetPattern::from_iter([item.to_string()]),
                    BitSet::from_bit_str(bits),
                )
            })
            .collect()
    }

    #[test]
    fn test_relative_min_support() {
        assert_eq!(MinSupport::Relative(0.5).resolve(9).unwrap(), 5);
        assert_eq!(MinSupport::Relative(0.75).resolve(8).unwrap(), 6);
        assert_eq!(MinSupport::Absolute(7).resolve(9).unwrap(), 7);
        assert!(MinSupport::Relative(1.5).resolve(9).is_err());
        assert!(MinSupport::Relative(0.0).resolve(9).is_err());
    }

    #[test]
    fn test_empty_object_list_yields_nothing() {
        let patterns: Vec<ItemSetPattern<u32>> = Vec::new();
        let mut it = iter_intents_via_ocbo(&patterns).unwrap();
        assert!(it.next().is_none());
    }

    #[test]
    fn test_min_support_prunes_branches() {
        let atoms = atoms(&[
            ("Hiking", "111111111"),
            ("Observing Nature", "111111001"),
            ("Sightseeing Flights", "001111111"),
        ]);
        let unfiltered: Vec<_> =
            iter_all_patterns(&atoms, MinSupport::Absolute(0), Traversal::DepthFirst)
                .unwrap()
                .collect();
        assert_eq!(unfiltered.len(), 8);

        let filtered: Vec<_> =
            iter_all_patterns(&atoms, MinSupport::Absolute(7), Traversal::DepthFirst)
                .unwrap()
                .collect();
        let expected: Vec<_> = unfiltered
            .into_iter()
            .filter(|(_, ext)| ext.count() >= 7)
            .collect();
        assert_eq!(filtered, expected);
        assert_eq!(filtered.len(), 6);
    }

    #[test]
    fn test_prune_bottom_stops_everything() {
        let atoms = atoms(&[("a", "110"), ("b", "011")]);
        let mut it = iter_all_patterns(&atoms, MinSupport::Absolute(0), Traversal::DepthFirst)
            .unwrap();
        let (bottom, extent) = it.next().unwrap();
        assert_eq!(bottom, ItemSetPattern::from_iter(Vec::<String>::new()));
        assert_eq!(extent, BitSet::full(3));
        it.prune();
        assert!(it.next().is_none());
    }
}
