//! Pattern structures: a pattern domain bound to a concrete object
//! collection.
//!
//! [`PatternStructure::fit`] records, for every distinct description, the
//! extent of objects introducing it (the object-irreducible patterns).
//! All queries derive from that map:
//!
//! - `extent(p)`: objects described at least as precisely as `p`
//! - `intent(A)`: the most precise pattern shared by all objects of `A`
//! - atomic patterns and their strict partial order
//! - premaximal patterns (maximal among the descriptions actually
//!   exhibited by some object)
//!
//! Extents are [`BitSet`]s over the fit-time object universe; the
//! universe is fixed until the next `fit`, which replaces all derived
//! state.

use std::collections::{BTreeSet, HashMap, VecDeque};

use indexmap::{IndexMap, IndexSet};

use crate::bits::BitSet;
use crate::error::{PsError, PsResult};
use crate::order::subsumption_order;
use crate::pattern::Pattern;

/// Atomic patterns in global order, plus the strict partial order on them.
#[derive(Clone, Debug)]
struct AtomicPatterns<P> {
    /// Atom → extent, ordered coarsest-extent-first, topologically within
    /// equal extents.
    patterns: IndexMap<P, BitSet>,
    /// `order[i]` marks the indices of atoms strictly greater (more
    /// precise) than atom `i`; transitively closed.
    order: Vec<BitSet>,
}

/// A pattern domain fitted to an ordered object collection.
#[derive(Clone, Debug)]
pub struct PatternStructure<P: Pattern> {
    object_names: Vec<String>,
    object_irreducibles: IndexMap<P, BitSet>,
    atomic: Option<AtomicPatterns<P>>,
}

impl<P: Pattern> Default for PatternStructure<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Pattern> PatternStructure<P> {
    pub fn new() -> Self {
        PatternStructure {
            object_names: Vec::new(),
            object_irreducibles: IndexMap::new(),
            atomic: None,
        }
    }

    /// Bind the structure to `objects` (an ordered id → description
    /// collection).
    ///
    /// When `compute_atomic_patterns` is `None`, atomic-pattern
    /// computation is enabled iff the domain supports atomic
    /// decomposition (probed on the first description). Replaces every
    /// previously derived structure.
    pub fn fit<I>(&mut self, objects: I, compute_atomic_patterns: Option<bool>) -> PsResult<()>
    where
        I: IntoIterator<Item = (String, P)>,
    {
        let descriptions: Vec<(String, P)> = objects.into_iter().collect();
        let n_objects = descriptions.len();

        let mut object_names = Vec::with_capacity(n_objects);
        let mut object_irreducibles: IndexMap<P, BitSet> = IndexMap::new();
        for (g, (name, description)) in descriptions.into_iter().enumerate() {
            object_names.push(name);
            object_irreducibles
                .entry(description)
                .or_insert_with(|| BitSet::zeros(n_objects))
                .insert(g);
        }

        self.object_names = object_names;
        self.object_irreducibles = object_irreducibles;
        self.atomic = None;

        let compute = match compute_atomic_patterns {
            Some(flag) => flag,
            None => self
                .object_irreducibles
                .keys()
                .next()
                .is_some_and(|p| p.atomisable()),
        };
        if compute {
            self.init_atomic_patterns()?;
        }
        Ok(())
    }

    fn check_fitted(&self) -> PsResult<()> {
        if self.object_names.is_empty() || self.object_irreducibles.is_empty() {
            return Err(PsError::Unfit);
        }
        Ok(())
    }

    /// Object names in fit order.
    pub fn object_names(&self) -> &[String] {
        &self.object_names
    }

    /// Distinct descriptions with the extents of objects introducing them.
    pub fn object_irreducibles(&self) -> &IndexMap<P, BitSet> {
        &self.object_irreducibles
    }

    fn names_of(&self, extent: &BitSet) -> BTreeSet<String> {
        extent
            .iter_ones()
            .map(|g| self.object_names[g].clone())
            .collect()
    }

    /// Extent of `pattern` as a bit vector: the union of irreducible
    /// extents whose pattern refines the query.
    pub fn extent_bits(&self, pattern: &P) -> PsResult<BitSet> {
        self.check_fitted()?;
        let mut extent = BitSet::zeros(self.object_names.len());
        for (irreducible, sub_extent) in &self.object_irreducibles {
            if pattern.le(irreducible) {
                extent.union_with(sub_extent);
            }
        }
        Ok(extent)
    }

    /// Extent of `pattern` as a set of object names.
    pub fn extent(&self, pattern: &P) -> PsResult<BTreeSet<String>> {
        Ok(self.names_of(&self.extent_bits(pattern)?))
    }

    /// Closure of an object set: the meet of every irreducible pattern
    /// whose extent is contained in it, or the join of all irreducibles
    /// when none is (the top of the reachable patterns).
    pub fn intent_bits(&self, objects: &BitSet) -> PsResult<P> {
        self.check_fitted()?;
        let mut supers = self
            .object_irreducibles
            .iter()
            .filter(|(_, ext)| ext.is_subset(objects))
            .map(|(p, _)| p);

        if let Some(first) = supers.next() {
            let mut intent = first.clone();
            for p in supers {
                intent = intent.try_meet(p)?;
            }
            return Ok(intent);
        }

        let mut patterns = self.object_irreducibles.keys();
        // fitted, so at least one irreducible exists
        let mut top = patterns.next().cloned().ok_or(PsError::Unfit)?;
        for p in patterns {
            top = top.try_join(p)?;
        }
        Ok(top)
    }

    /// [`intent_bits`](Self::intent_bits) over object names.
    pub fn intent<'a, I>(&self, objects: I) -> PsResult<P>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.check_fitted()?;
        let mut bits = BitSet::zeros(self.object_names.len());
        for name in objects {
            let g = self
                .object_names
                .iter()
                .position(|n| n == name)
                .ok_or_else(|| PsError::UnknownObject(name.to_string()))?;
            bits.insert(g);
        }
        self.intent_bits(&bits)
    }

    /// The least precise reachable pattern: the domain bottom, or the
    /// meet of every irreducible when the domain has none.
    pub fn min_pattern(&self) -> PsResult<P> {
        self.check_fitted()?;
        if let Some(min) = P::min_pattern() {
            return Ok(min);
        }
        let mut patterns = self.object_irreducibles.keys();
        let mut min = patterns.next().cloned().ok_or(PsError::Unfit)?;
        for p in patterns {
            min = min.try_meet(p)?;
        }
        Ok(min)
    }

    /// The most precise reachable pattern: the domain top, or the join of
    /// every irreducible when the domain has none.
    pub fn max_pattern(&self) -> PsResult<P> {
        self.check_fitted()?;
        if let Some(max) = P::max_pattern() {
            return Ok(max);
        }
        let mut patterns = self.object_irreducibles.keys();
        let mut max = patterns.next().cloned().ok_or(PsError::Unfit)?;
        for p in patterns {
            max = max.try_join(p)?;
        }
        Ok(max)
    }

    /// Compute the atomic patterns and their strict partial order.
    ///
    /// Step 1 groups the candidate atoms (union of atomic decompositions
    /// of all irreducibles, deduplicated) by extent, keeping each group
    /// topologically sorted: a new atom is inserted immediately before
    /// the first existing atom it refines into.
    ///
    /// Step 2 fixes the global order (descending extent popcount, then
    /// ascending position sequence, then the group order) and derives the
    /// strict order between atoms. For each atom, taken in reverse global
    /// order, only later atoms of the same extent and atoms of strictly
    /// contained extents are candidates; a confirmed greater atom absorbs
    /// its own greater-set without re-testing.
    pub fn init_atomic_patterns(&mut self) -> PsResult<()> {
        self.check_fitted()?;

        let mut candidates: IndexSet<P> = IndexSet::new();
        for pattern in self.object_irreducibles.keys() {
            for atom in pattern.try_atomic_patterns()? {
                candidates.insert(atom);
            }
        }

        // Step 1: group by extent, topologically within each group.
        let mut patterns_per_extent: HashMap<BitSet, VecDeque<P>> = HashMap::new();
        let mut extents: Vec<BitSet> = Vec::new();
        for atom in candidates {
            let extent = self.extent_bits(&atom)?;
            let group = match patterns_per_extent.entry(extent.clone()) {
                std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
                std::collections::hash_map::Entry::Vacant(entry) => {
                    extents.push(extent);
                    entry.insert(VecDeque::new())
                }
            };
            let position = group
                .iter()
                .position(|other| atom.le(other))
                .unwrap_or(group.len());
            group.insert(position, atom);
        }

        // Step 2: global order and extent-subsumption pre-filter.
        extents.sort_by(|a, b| b.count().cmp(&a.count()).then(a.cmp_positions(b)));
        let extents_order = subsumption_order(&extents);

        let mut atoms: Vec<P> = Vec::new();
        let mut atom_extent_idx: Vec<usize> = Vec::new();
        // extent index → (first atom index, group length)
        let mut blocks: Vec<(usize, usize)> = Vec::with_capacity(extents.len());
        for (e, extent) in extents.iter().enumerate() {
            let group = &patterns_per_extent[extent];
            blocks.push((atoms.len(), group.len()));
            for atom in group {
                atoms.push(atom.clone());
                atom_extent_idx.push(e);
            }
        }

        let n_atoms = atoms.len();
        let mut order: Vec<BitSet> = vec![BitSet::zeros(n_atoms); n_atoms];
        for idx in (0..n_atoms).rev() {
            let e = atom_extent_idx[idx];
            let (block_start, block_len) = blocks[e];

            let mut to_test = BitSet::zeros(n_atoms);
            // later atoms sharing this exact extent
            for j in idx + 1..block_start + block_len {
                to_test.insert(j);
            }
            // every atom living on a strictly contained extent
            for smaller in extents_order[e].iter_ones() {
                let (start, len) = blocks[smaller];
                for j in start..start + len {
                    to_test.insert(j);
                }
            }

            let mut greater = BitSet::zeros(n_atoms);
            while let Some(j) = to_test.first_one() {
                to_test.remove(j);
                if atoms[idx].lt(&atoms[j]) {
                    greater.insert(j);
                    greater.union_with(&order[j]);
                    // transitively implied: no need to compare again
                    to_test.difference_with(&order[j]);
                }
            }
            order[idx] = greater;
        }

        let mut patterns: IndexMap<P, BitSet> = IndexMap::with_capacity(n_atoms);
        for (atom, &e) in atoms.iter().zip(&atom_extent_idx) {
            patterns.insert(atom.clone(), extents[e].clone());
        }
        self.atomic = Some(AtomicPatterns { patterns, order });
        Ok(())
    }

    fn atomic(&self) -> PsResult<&AtomicPatterns<P>> {
        self.check_fitted()?;
        self.atomic
            .as_ref()
            .ok_or(PsError::Unsupported(crate::pattern::Unsupported(
                "atomic_patterns",
            )))
    }

    /// Atomic patterns with extents as bit vectors, in global order.
    pub fn atomic_patterns_bits(&self) -> PsResult<&IndexMap<P, BitSet>> {
        Ok(&self.atomic()?.patterns)
    }

    /// Atomic patterns with extents as object-name sets, in global order.
    pub fn atomic_patterns(&self) -> PsResult<IndexMap<P, BTreeSet<String>>> {
        let atomic = self.atomic()?;
        Ok(atomic
            .patterns
            .iter()
            .map(|(p, ext)| (p.clone(), self.names_of(ext)))
            .collect())
    }

    /// Iterate atomic patterns with their extents, in global order.
    pub fn iter_atomic_patterns(&self) -> PsResult<impl Iterator<Item = (&P, &BitSet)>> {
        Ok(self.atomic()?.patterns.iter())
    }

    /// For every atomic pattern, the set of strictly more precise atomic
    /// patterns.
    pub fn atomic_patterns_order(&self) -> PsResult<IndexMap<P, IndexSet<P>>> {
        let atomic = self.atomic()?;
        let atoms: Vec<&P> = atomic.patterns.keys().collect();
        Ok(atoms
            .iter()
            .zip(&atomic.order)
            .map(|(&atom, greater)| {
                let set: IndexSet<P> = greater.iter_ones().map(|j| atoms[j].clone()).collect();
                (atom.clone(), set)
            })
            .collect())
    }

    /// Premaximal patterns with bit-vector extents.
    ///
    /// Irreducibles sorted finest-extent-first; a pattern refined by any
    /// kept, more precise irreducible is discarded. What remains are the
    /// maximal patterns actually exhibited by objects.
    pub fn premaximal_patterns_bits(&self) -> PsResult<IndexMap<P, BitSet>> {
        self.check_fitted()?;

        let mut border: Vec<(P, BitSet)> = self
            .object_irreducibles
            .keys()
            .map(|p| Ok((p.clone(), self.extent_bits(p)?)))
            .collect::<PsResult<_>>()?;
        border.sort_by(|(_, a), (_, b)| a.count().cmp(&b.count()).then(a.cmp_positions(b)));

        let mut premaximals: Vec<(P, BitSet)> = Vec::new();
        for (pattern, extent) in border {
            if premaximals.iter().any(|(kept, _)| kept.ge(&pattern)) {
                continue;
            }
            premaximals.push((pattern, extent));
        }
        Ok(premaximals.into_iter().collect())
    }

    /// Premaximal patterns with object-name extents.
    pub fn premaximal_patterns(&self) -> PsResult<IndexMap<P, BTreeSet<String>>> {
        Ok(self
            .premaximal_patterns_bits()?
            .into_iter()
            .map(|(p, ext)| {
                let names = self.names_of(&ext);
                (p, names)
            })
            .collect())
    }

    /// Iterate premaximal patterns with their extents.
    pub fn iter_premaximal_patterns(&self) -> PsResult<impl Iterator<Item = (P, BitSet)>> {
        Ok(self.premaximal_patterns_bits()?.into_iter())
    }

    /// Binary context of the fitted data: one column per atomic pattern
    /// (in global order), row `g` marking the atoms refining into object
    /// `g`'s description. Transpose of the atomic extents.
    ///
    /// Consumed by the Lindig lattice builder; requires atomic patterns.
    pub fn binarize(&self) -> PsResult<(Vec<P>, Vec<BitSet>)> {
        let atomic = self.atomic()?;
        let columns: Vec<P> = atomic.patterns.keys().cloned().collect();
        let n_objects = self.object_names.len();
        let mut rows = vec![BitSet::zeros(columns.len()); n_objects];

        for (j, extent) in atomic.patterns.values().enumerate() {
            for g in extent.iter_ones() {
                rows[g].insert(j);
            }
        }
        Ok((columns, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::ItemSetPattern;

    fn context(descrs: &[(&str, &[u32])]) -> Vec<(String, ItemSetPattern<u32>)> {
        descrs
            .iter()
            .map(|(name, items)| {
                (
                    name.to_string(),
                    ItemSetPattern::from_iter(items.iter().copied()),
                )
            })
            .collect()
    }

    #[test]
    fn test_unfit_queries_fail() {
        let ps: PatternStructure<ItemSetPattern<u32>> = PatternStructure::new();
        let p = ItemSetPattern::from_iter([1u32]);
        assert_eq!(ps.extent(&p), Err(PsError::Unfit));
        assert_eq!(ps.intent_bits(&BitSet::zeros(0)), Err(PsError::Unfit));
        assert_eq!(ps.min_pattern(), Err(PsError::Unfit));
        assert_eq!(ps.max_pattern(), Err(PsError::Unfit));
        assert!(ps.premaximal_patterns().is_err());
    }

    #[test]
    fn test_fit_builds_irreducibles() {
        let mut ps = PatternStructure::new();
        ps.fit(
            context(&[("a", &[1, 2, 3]), ("b", &[0, 4]), ("c", &[1, 2, 4])]),
            Some(false),
        )
        .unwrap();

        assert_eq!(ps.object_names(), &["a", "b", "c"]);
        let irr = ps.object_irreducibles();
        assert_eq!(irr.len(), 3);
        assert_eq!(
            irr[&ItemSetPattern::from_iter([1u32, 2, 3])],
            BitSet::from_bit_str("100")
        );
        assert!(ps.atomic_patterns_bits().is_err());
    }

    #[test]
    fn test_fit_merges_duplicate_descriptions() {
        let mut ps = PatternStructure::new();
        ps.fit(
            context(&[("a", &[1, 2]), ("b", &[1, 2]), ("c", &[1])]),
            Some(false),
        )
        .unwrap();
        let irr = ps.object_irreducibles();
        assert_eq!(irr.len(), 2);
        assert_eq!(
            irr[&ItemSetPattern::from_iter([1u32, 2])],
            BitSet::from_bit_str("110")
        );
    }

    #[test]
    fn test_refit_replaces_state() {
        let mut ps = PatternStructure::new();
        ps.fit(context(&[("a", &[1]), ("b", &[2])]), None).unwrap();
        assert_eq!(ps.atomic_patterns_bits().unwrap().len(), 2);

        ps.fit(context(&[("x", &[7])]), None).unwrap();
        assert_eq!(ps.object_names(), &["x"]);
        assert_eq!(ps.atomic_patterns_bits().unwrap().len(), 1);
    }

    #[test]
    fn test_binarize() {
        let mut ps = PatternStructure::new();
        ps.fit(context(&[("a", &[1, 2]), ("b", &[1]), ("c", &[2])]), None)
            .unwrap();
        let (columns, rows) = ps.binarize().unwrap();
        // atoms {1} and {2}, both with extent count 2
        assert_eq!(columns.len(), 2);
        let col_1 = columns
            .iter()
            .position(|p| *p == ItemSetPattern::from_iter([1u32]))
            .unwrap();
        let col_2 = 1 - col_1;
        assert!(rows[0].contains(col_1) && rows[0].contains(col_2));
        assert!(rows[1].contains(col_1) && !rows[1].contains(col_2));
        assert!(!rows[2].contains(col_1) && rows[2].contains(col_2));
    }
}
