//! Item-set patterns: finite sets ordered by inclusion.
//!
//! Meet is intersection, join is union, and a pattern refines another
//! when it contains every one of its items. The empty set is the domain
//! bottom; there is no top. Atomic decomposition yields singletons.

use std::collections::BTreeSet;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use crate::pattern::{AlgebraResult, Pattern};

/// A set of items ordered by inclusion.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ItemSetPattern<T: Ord> {
    items: BTreeSet<T>,
}

impl<T: Ord> ItemSetPattern<T> {
    pub fn new() -> Self {
        ItemSetPattern {
            items: BTreeSet::new(),
        }
    }

    pub fn items(&self) -> &BTreeSet<T> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }
}

impl<T: Ord> Default for ItemSetPattern<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> From<BTreeSet<T>> for ItemSetPattern<T> {
    fn from(items: BTreeSet<T>) -> Self {
        ItemSetPattern { items }
    }
}

impl<T: Ord> FromIterator<T> for ItemSetPattern<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ItemSetPattern {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Pattern for ItemSetPattern<T>
where
    T: Ord + Clone + Eq + Hash + Debug,
{
    fn try_meet(&self, other: &Self) -> AlgebraResult<Self> {
        Ok(ItemSetPattern {
            items: self.items.intersection(&other.items).cloned().collect(),
        })
    }

    fn try_join(&self, other: &Self) -> AlgebraResult<Self> {
        Ok(ItemSetPattern {
            items: self.items.union(&other.items).cloned().collect(),
        })
    }

    fn le(&self, other: &Self) -> bool {
        self.items.is_subset(&other.items)
    }

    fn min_pattern() -> Option<Self> {
        Some(ItemSetPattern::new())
    }

    fn try_atomic_patterns(&self) -> AlgebraResult<Vec<Self>> {
        Ok(self
            .items
            .iter()
            .map(|item| std::iter::once(item.clone()).collect())
            .collect())
    }
}

impl<T: Ord + Display> Display for ItemSetPattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "}}")
    }
}

impl<T: Ord + Debug> Debug for ItemSetPattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemSetPattern({:?})", self.items)
    }
}
