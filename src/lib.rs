//! Conlat: concept lattices over pattern structures
//!
//! A generalization of Formal Concept Analysis where object descriptions
//! come from an arbitrary partially ordered domain (a [`Pattern`]
//! implementation) instead of binary attributes. A fitted
//! [`PatternStructure`] answers extent/intent queries through the Galois
//! connection between object sets and descriptions, and the [`mine`]
//! module enumerates the closed patterns (concept intents) lazily.
//!
//! ```
//! use conlat::{iter_intents_via_ocbo, ItemSetPattern};
//!
//! let descriptions: Vec<ItemSetPattern<u32>> = vec![
//!     ItemSetPattern::from_iter([1, 2, 3]),
//!     ItemSetPattern::from_iter([0, 4]),
//!     ItemSetPattern::from_iter([1, 2, 4]),
//! ];
//! let intents: Vec<_> = iter_intents_via_ocbo(&descriptions)
//!     .unwrap()
//!     .map(|(intent, _extent)| intent)
//!     .collect();
//! assert!(intents.contains(&ItemSetPattern::from_iter([1, 2])));
//! ```

pub mod bits;
pub mod domains;
pub mod error;
pub mod mine;
pub mod order;
pub mod parse;
pub mod pattern;
pub mod structure;

pub use bits::BitSet;
pub use domains::{IntervalPattern, ItemSetPattern, NgramSetPattern, ProductPattern};
pub use error::{PsError, PsResult};
pub use mine::{
    iter_all_patterns, iter_intents_via_ocbo, list_intents_via_lindig, MinSupport,
    PatternEnumerator, Traversal,
};
pub use pattern::{AlgebraResult, Pattern, Unsupported};
pub use structure::PatternStructure;
