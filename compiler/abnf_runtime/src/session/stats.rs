use rustc_hash::FxHashMap;

use crate::grammar::RuleId;

/// Evaluation counters for one session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    evaluations: FxHashMap<RuleId, u32>,
    memo_hits: u32,
}

impl ParseStats {
    pub(super) fn record_evaluation(&mut self, rule: RuleId) {
        *self.evaluations.entry(rule).or_insert(0) += 1;
    }

    pub(super) fn record_memo_hit(&mut self) {
        self.memo_hits += 1;
    }

    /// How many times `rule`'s production ran (memo hits excluded).
    pub fn evaluations_of(&self, rule: RuleId) -> u32 {
        self.evaluations.get(&rule).copied().unwrap_or(0)
    }

    /// Production runs across all rules.
    pub fn total_evaluations(&self) -> u32 {
        self.evaluations.values().sum()
    }

    pub fn memo_hits(&self) -> u32 {
        self.memo_hits
    }
}
