// JUDGEMENT RECORDS (ψ)
// Historical verdict outcomes and the offender set.
//
// INVARIANTS:
// 1. good, bad and wonky are pairwise disjoint
// 2. A report present in any of the three sets is never judged again
// 3. offenders only grows
// 4. All four sequences are sorted and deduplicated after every batch

use crate::bytes::{Ed25519Public, Hash32};
use serde::{Deserialize, Serialize};

/// Outcome of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictClass {
    /// Supermajority voted the report valid
    Good,
    /// Nobody voted the report valid
    Bad,
    /// The vote split does not settle validity
    Wonky,
}

impl VerdictClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictClass::Good => "good",
            VerdictClass::Bad => "bad",
            VerdictClass::Wonky => "wonky",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputesRecords {
    pub good: Vec<Hash32>,
    pub bad: Vec<Hash32>,
    pub wonky: Vec<Hash32>,
    pub offenders: Vec<Ed25519Public>,
}

impl DisputesRecords {
    /// Whether `target` already carries a judgement of any kind.
    pub fn is_judged(&self, target: &Hash32) -> bool {
        self.good.contains(target) || self.bad.contains(target) || self.wonky.contains(target)
    }

    pub fn is_offender(&self, key: &Ed25519Public) -> bool {
        self.offenders.contains(key)
    }

    pub fn record(&mut self, class: VerdictClass, target: Hash32) {
        match class {
            VerdictClass::Good => self.good.push(target),
            VerdictClass::Bad => self.bad.push(target),
            VerdictClass::Wonky => self.wonky.push(target),
        }
    }

    pub fn extend_offenders<I: IntoIterator<Item = Ed25519Public>>(&mut self, keys: I) {
        self.offenders.extend(keys);
    }

    /// Sort and deduplicate every set.
    pub fn normalize(&mut self) {
        sort_dedup(&mut self.good);
        sort_dedup(&mut self.bad);
        sort_dedup(&mut self.wonky);
        sort_dedup(&mut self.offenders);
    }

    /// Every judged report, regardless of outcome.
    pub fn all_judged(&self) -> impl Iterator<Item = &Hash32> {
        self.good.iter().chain(self.bad.iter()).chain(self.wonky.iter())
    }
}

pub(crate) fn sort_dedup<T: Ord>(items: &mut Vec<T>) {
    items.sort();
    items.dedup();
}
