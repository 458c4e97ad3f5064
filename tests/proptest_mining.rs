//! Property tests for the closure enumeration algorithms


use std::collections::HashSet;

use conlat::{
    iter_all_patterns, iter_intents_via_ocbo, list_intents_via_lindig, BitSet, MinSupport,
    Pattern, Traversal,
};
use generators::{arb_itemset_context, arb_ngram_context, fit_context};
use proptest::prelude::*;

proptest! {
    /// Object-wise Close-By-One yields every intent exactly once, with
    /// its closed extent
    #[test]
    fn ocbo_intents_unique_and_closed(context in arb_itemset_context()) {
        let pairs: Vec<_> = iter_intents_via_ocbo(&context).unwrap().collect();

        let distinct: HashSet<_> = pairs.iter().map(|(intent, _)| intent.clone()).collect();
        prop_assert_eq!(distinct.len(), pairs.len());

        for (intent, extent) in &pairs {
            let mut recomputed = BitSet::zeros(context.len());
            for (g, description) in context.iter().enumerate() {
                if intent.le(description) {
                    recomputed.insert(g);
                }
            }
            prop_assert_eq!(extent, &recomputed, "intent {:?}", intent);
        }
    }

    /// Every object description appears among the intents
    #[test]
    fn ocbo_covers_object_descriptions(context in arb_itemset_context()) {
        let intents: HashSet<_> = iter_intents_via_ocbo(&context)
            .unwrap()
            .map(|(intent, _)| intent)
            .collect();
        for description in &context {
            prop_assert!(intents.contains(description), "{:?} missing", description);
        }
    }

    /// Depth-first and breadth-first traversals enumerate the same
    /// pattern set
    #[test]
    fn traversals_agree(context in arb_ngram_context()) {
        let ps = fit_context(&context);
        let atoms = ps.atomic_patterns_bits().unwrap();
        prop_assume!(!atoms.is_empty());

        let depth: HashSet<_> =
            iter_all_patterns(atoms, MinSupport::Absolute(0), Traversal::DepthFirst)
                .unwrap()
                .collect();
        let breadth: HashSet<_> =
            iter_all_patterns(atoms, MinSupport::Absolute(0), Traversal::BreadthFirst)
                .unwrap()
                .collect();
        prop_assert_eq!(depth, breadth);
    }

    /// Enumerated patterns are pairwise distinct and carry consistent
    /// extents
    #[test]
    fn all_patterns_unique_with_consistent_extents(context in arb_ngram_context()) {
        let ps = fit_context(&context);
        let atoms = ps.atomic_patterns_bits().unwrap();
        prop_assume!(!atoms.is_empty());

        let pairs: Vec<_> =
            iter_all_patterns(atoms, MinSupport::Absolute(0), Traversal::DepthFirst)
                .unwrap()
                .collect();
        let distinct: HashSet<_> = pairs.iter().map(|(p, _)| p.clone()).collect();
        prop_assert_eq!(distinct.len(), pairs.len());

        let n_objects = context.len();
        for (pattern, extent) in &pairs {
            let mut recomputed = BitSet::full(n_objects);
            for (atom, atom_extent) in atoms {
                if atom.le(pattern) {
                    recomputed.intersect_with(atom_extent);
                }
            }
            prop_assert_eq!(extent, &recomputed, "pattern {:?}", pattern);
        }
    }

    /// Minimum support filters and nothing else
    #[test]
    fn min_support_is_a_pure_filter(context in arb_ngram_context(), threshold in 1usize..4) {
        let ps = fit_context(&context);
        let atoms = ps.atomic_patterns_bits().unwrap();
        prop_assume!(!atoms.is_empty());

        let unfiltered: Vec<_> =
            iter_all_patterns(atoms, MinSupport::Absolute(0), Traversal::DepthFirst)
                .unwrap()
                .collect();
        let filtered: Vec<_> =
            iter_all_patterns(atoms, MinSupport::Absolute(threshold), Traversal::DepthFirst)
                .unwrap()
                .collect();
        let expected: Vec<_> = unfiltered
            .into_iter()
            .filter(|(_, extent)| extent.count() >= threshold)
            .collect();
        prop_assert_eq!(filtered, expected);
    }

    /// The neighbor-search lattice lists the same intents as Close-By-One
    #[test]
    fn lindig_agrees_with_ocbo(context in arb_itemset_context()) {
        let ps = fit_context(&context);
        let via_lindig = list_intents_via_lindig(&context, &ps).unwrap();
        let via_ocbo: HashSet<_> = iter_intents_via_ocbo(&context)
            .unwrap()
            .map(|(intent, _)| intent)
            .collect();

        prop_assert_eq!(via_lindig.len(), via_ocbo.len());
        for intent in &via_lindig {
            prop_assert!(via_ocbo.contains(intent), "extra intent {:?}", intent);
        }
    }
}
