//! Lindig's neighbor-search lattice construction.
//!
//! After "Fast Concept Analysis" (Christian Lindig): start from the
//! bottom concept (empty extent), collect upper neighbors via the
//! minimal-object elimination test, and walk the known concepts in
//! strictly decreasing lexicographic order of their binary intents
//! (a total order, so every discovered concept gets its neighbors
//! expanded). Construction cost is quadratic in the number of concepts;
//! meant for small, demonstration-size lattices.

use crate::bits::BitSet;
use crate::error::PsResult;
use crate::pattern::Pattern;
use crate::structure::PatternStructure;

/// Intents of all pattern concepts of `data`, in discovery order.
///
/// `ps` must have been fitted to the same objects (it supplies
/// `extent`/`intent` and the binary context used to compare concepts).
pub fn list_intents_via_lindig<P: Pattern>(
    data: &[P],
    ps: &PatternStructure<P>,
) -> PsResult<Vec<P>> {
    let n_objects = data.len();
    let (_columns, rows) = ps.binarize()?;
    let n_attrs = rows.first().map_or(0, BitSet::len);

    // common attributes of an object set; the empty set constrains nothing
    let intent_bits = |extent: &BitSet| -> BitSet {
        let mut bits = BitSet::full(n_attrs);
        for g in extent.iter_ones() {
            bits.intersect_with(&rows[g]);
        }
        bits
    };

    // bottom concept: the closure of the empty object set
    let bottom_intent = ps.intent_bits(&BitSet::zeros(n_objects))?;
    let bottom = ps.extent_bits(&bottom_intent)?;
    let mut lattice_extents: Vec<BitSet> = vec![bottom.clone()];
    let mut concept_extent = bottom;

    loop {
        for neighbor in upper_neighbors(ps, &concept_extent, n_objects)? {
            if !lattice_extents.contains(&neighbor) {
                lattice_extents.push(neighbor);
            }
        }
        match next_concept_extent(&concept_extent, &lattice_extents, &intent_bits) {
            Some(next) => concept_extent = next,
            // search exhausted: normal termination
            None => break,
        }
    }

    lattice_extents
        .iter()
        .map(|extent| ps.intent_bits(extent))
        .collect()
}

/// Extents covering `concept_extent` with no intermediate concept.
///
/// An outside object `g` whose closure drags in another still-minimal
/// outside object is not a cover and is struck from the minimal set.
fn upper_neighbors<P: Pattern>(
    ps: &PatternStructure<P>,
    concept_extent: &BitSet,
    n_objects: usize,
) -> PsResult<Vec<BitSet>> {
    let mut min_set: Vec<usize> = (0..n_objects)
        .filter(|&g| !concept_extent.contains(g))
        .collect();
    let mut neighbors = Vec::new();

    for g in (0..n_objects).filter(|&g| !concept_extent.contains(g)) {
        let mut with_g = concept_extent.clone();
        with_g.insert(g);
        let candidate_intent = ps.intent_bits(&with_g)?;
        let closed_extent = ps.extent_bits(&candidate_intent)?;

        let pulled_in_minimal = closed_extent
            .iter_ones()
            .filter(|&h| h != g && !concept_extent.contains(h))
            .any(|h| min_set.contains(&h));
        if !pulled_in_minimal {
            neighbors.push(closed_extent);
        } else {
            min_set.retain(|&h| h != g);
        }
    }
    Ok(neighbors)
}

/// The known concept with the greatest binary intent strictly below the
/// current one in the lexicographic bit order; `None` once the walk
/// reaches the bottom of that order (the top concept).
fn next_concept_extent(
    concept_extent: &BitSet,
    lattice_extents: &[BitSet],
    intent_bits: &impl Fn(&BitSet) -> BitSet,
) -> Option<BitSet> {
    use std::cmp::Ordering;

    let current_intent = intent_bits(concept_extent);
    let mut next: Option<(BitSet, BitSet)> = None;
    for extent in lattice_extents {
        let candidate_intent = intent_bits(extent);
        if candidate_intent.cmp_bits(&current_intent) != Ordering::Less {
            continue;
        }
        let better = match &next {
            None => true,
            Some((_, best_intent)) => candidate_intent.cmp_bits(best_intent) == Ordering::Greater,
        };
        if better {
            next = Some((extent.clone(), candidate_intent));
        }
    }
    next.map(|(extent, _)| extent)
}
