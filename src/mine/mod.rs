//! Closure enumeration over fitted pattern structures.
//!
//! Two Close-By-One variants and the Lindig neighbor-search algorithm.
//! All entry points produce lazy, finite, pull-based sequences: each
//! advance computes exactly one new element, and abandoning a sequence
//! early leaks nothing (the state is a handful of in-memory bit vectors).

pub mod cbo;
pub mod lindig;

pub use cbo::{iter_all_patterns, iter_intents_via_ocbo, MinSupport, PatternEnumerator, Traversal};
pub use lindig::list_intents_via_lindig;
