//! Built-in pattern domains.
//!
//! Each submodule is one [`Pattern`](crate::pattern::Pattern)
//! implementation: item sets under inclusion, intervals under reversed
//! containment, n-gram sets under the sub-ngram order, and pairwise
//! products of any two domains. Textual forms live in
//! [`parse`](crate::parse).

pub mod interval;
pub mod itemset;
pub mod ngram;
pub mod product;

pub use interval::IntervalPattern;
pub use itemset::ItemSetPattern;
pub use ngram::NgramSetPattern;
pub use product::ProductPattern;
