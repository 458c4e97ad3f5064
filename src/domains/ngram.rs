//! N-gram set patterns: sets of word sequences ordered by sub-ngram
//! containment.
//!
//! A pattern refines another when every ngram of the coarser one occurs
//! as a contiguous subsequence of some ngram of the finer one. Meet
//! collects the maximal common contiguous subsequences across the two
//! sets; join is union with non-maximal ngrams dropped. The empty set
//! is the bottom; there is no top. Atomic decomposition yields every
//! contiguous sub-ngram as a singleton set.

use std::collections::{BTreeSet, HashMap};
use std::fmt::{self, Debug, Display};

use crate::pattern::{AlgebraResult, Pattern};

/// A set of ngrams (word sequences), kept as given; only the lattice
/// operations normalize to maximal ngrams.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NgramSetPattern {
    ngrams: BTreeSet<Vec<String>>,
}

impl NgramSetPattern {
    pub fn new() -> Self {
        NgramSetPattern {
            ngrams: BTreeSet::new(),
        }
    }

    /// Build from whitespace-separated phrases; empty phrases are
    /// dropped.
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        NgramSetPattern {
            ngrams: phrases
                .into_iter()
                .map(|phrase| {
                    phrase
                        .as_ref()
                        .split_whitespace()
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                })
                .filter(|ngram| !ngram.is_empty())
                .collect(),
        }
    }

    pub fn ngrams(&self) -> &BTreeSet<Vec<String>> {
        &self.ngrams
    }

    pub fn is_empty(&self) -> bool {
        self.ngrams.is_empty()
    }
}

impl Default for NgramSetPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Vec<String>> for NgramSetPattern {
    fn from_iter<I: IntoIterator<Item = Vec<String>>>(iter: I) -> Self {
        NgramSetPattern {
            ngrams: iter.into_iter().filter(|ngram| !ngram.is_empty()).collect(),
        }
    }
}

/// `a` occurs contiguously inside `b`.
fn is_subngram(a: &[String], b: &[String]) -> bool {
    !a.is_empty() && a.len() <= b.len() && b.windows(a.len()).any(|w| w == a)
}

/// Drop every ngram contained in another one of the collection.
fn filter_max_ngrams(mut ngrams: Vec<Vec<String>>) -> BTreeSet<Vec<String>> {
    ngrams.sort_by(|a, b| b.len().cmp(&a.len()));
    let mut kept: Vec<Vec<String>> = Vec::new();
    for ngram in ngrams {
        if ngram.is_empty() || kept.iter().any(|k| is_subngram(&ngram, k)) {
            continue;
        }
        kept.push(ngram);
    }
    kept.into_iter().collect()
}

impl Pattern for NgramSetPattern {
    /// Maximal contiguous subsequences common to an ngram of each side.
    fn try_meet(&self, other: &Self) -> AlgebraResult<Self> {
        let mut common: Vec<Vec<String>> = Vec::new();
        for ngram_a in &self.ngrams {
            let mut starts_of: HashMap<&str, Vec<usize>> = HashMap::new();
            for (i, word) in ngram_a.iter().enumerate() {
                starts_of.entry(word.as_str()).or_default().push(i);
            }

            for ngram_b in &other.ngrams {
                if ngram_a == ngram_b {
                    common.push(ngram_a.clone());
                    continue;
                }
                for (j, word) in ngram_b.iter().enumerate() {
                    let Some(starts) = starts_of.get(word.as_str()) else {
                        continue;
                    };
                    for &i in starts {
                        let mut size = 0;
                        while i + size < ngram_a.len()
                            && j + size < ngram_b.len()
                            && ngram_a[i + size] == ngram_b[j + size]
                        {
                            size += 1;
                        }
                        common.push(ngram_a[i..i + size].to_vec());
                    }
                }
            }
        }
        Ok(NgramSetPattern {
            ngrams: filter_max_ngrams(common),
        })
    }

    fn try_join(&self, other: &Self) -> AlgebraResult<Self> {
        let merged = self
            .ngrams
            .iter()
            .chain(other.ngrams.iter())
            .cloned()
            .collect();
        Ok(NgramSetPattern {
            ngrams: filter_max_ngrams(merged),
        })
    }

    fn le(&self, other: &Self) -> bool {
        self.ngrams
            .iter()
            .all(|a| other.ngrams.iter().any(|b| is_subngram(a, b)))
    }

    fn min_pattern() -> Option<Self> {
        Some(NgramSetPattern::new())
    }

    fn try_atomic_patterns(&self) -> AlgebraResult<Vec<Self>> {
        let mut atoms = Vec::new();
        for ngram in &self.ngrams {
            for size in 1..=ngram.len() {
                for start in 0..=ngram.len() - size {
                    atoms.push(NgramSetPattern {
                        ngrams: BTreeSet::from([ngram[start..start + size].to_vec()]),
                    });
                }
            }
        }
        Ok(atoms)
    }
}

impl Display for NgramSetPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, ngram) in self.ngrams.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}'", ngram.join(" "))?;
        }
        write!(f, "}}")
    }
}

impl Debug for NgramSetPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NgramSetPattern({})", self)
    }
}
