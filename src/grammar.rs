//! L-System string rewriting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An axiom plus per-symbol replacement rules.
///
/// Grammars are read-only once built; the catalog hands out shared references
/// and every generation request expands its own copy of the string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    /// Initial symbol string.
    pub axiom: String,
    /// Symbol → replacement. Symbols without a rule are copied through.
    pub rules: BTreeMap<char, String>,
}

impl Grammar {
    /// Builds a grammar from an axiom and `(symbol, replacement)` pairs.
    pub fn new<'a>(
        axiom: impl Into<String>,
        rules: impl IntoIterator<Item = (char, &'a str)>,
    ) -> Self {
        Self {
            axiom: axiom.into(),
            rules: rules
                .into_iter()
                .map(|(sym, rep)| (sym, rep.to_owned()))
                .collect(),
        }
    }

    /// Expands the axiom for `iterations` rounds. See [`expand`].
    pub fn expand(&self, iterations: usize) -> String {
        expand(&self.axiom, &self.rules, iterations)
    }

    /// Length of [`expand`]`(iterations)` without building the string.
    ///
    /// Tracks how long each ruled symbol has become after every round;
    /// saturates at `usize::MAX`.
    pub fn expanded_len(&self, iterations: usize) -> usize {
        let measure = |lens: &BTreeMap<char, usize>, symbols: &str| {
            symbols.chars().fold(0usize, |total, c| {
                total.saturating_add(lens.get(&c).copied().unwrap_or(1))
            })
        };

        let mut lens = BTreeMap::new();
        for _ in 0..iterations {
            lens = self
                .rules
                .iter()
                .map(|(&sym, rep)| (sym, measure(&lens, rep)))
                .collect();
        }
        measure(&lens, &self.axiom)
    }
}

/// Rewrites `axiom` for `iterations` rounds.
///
/// Every round maps each symbol of the previous round's string through `rules`
/// independently, so a replacement never feeds back into the same round.
/// Output length grows roughly geometrically with `iterations`; callers must
/// bound it before calling.
pub fn expand(axiom: &str, rules: &BTreeMap<char, String>, iterations: usize) -> String {
    let mut current = axiom.to_owned();

    for _ in 0..iterations {
        let mut next = String::with_capacity(current.len() * 2);
        for c in current.chars() {
            match rules.get(&c) {
                Some(rep) => next.push_str(rep),
                None => next.push(c),
            }
        }
        current = next;
    }

    current
}
