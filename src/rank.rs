//! Ranking strategies over walk output.
//!
//! All strategies are pure functions of `(items, referrers)`. Ties are broken by
//! ascending id so rankings are reproducible across runs.

use crate::walk::WalkResult;
use crate::{Error, Result};
use ordered_float::NotNan;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Scoring strategy applied to a [`WalkResult`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Ranking {
    /// Number of visits.
    #[default]
    MostVisited,
    /// Number of distinct referrers.
    Consensus,
    /// Sum of the referrers' own traversal frequencies.
    Trust,
}

impl Ranking {
    /// `(item, score)` pairs, best first, scores normalised to sum to 1.
    pub fn scores(self, result: &WalkResult) -> Result<Vec<(usize, f64)>> {
        let raw = match self {
            Ranking::MostVisited => visit_counts(&result.items),
            Ranking::Consensus => consensus_scores(&result.items, &result.referrers)?,
            Ranking::Trust => trust_scores(&result.items, &result.referrers)?,
        };
        let mut scored = sorted(raw);
        normalize(&mut scored);
        Ok(scored)
    }

    /// Distinct items, best first.
    pub fn rank(self, result: &WalkResult) -> Result<Vec<usize>> {
        Ok(self.scores(result)?.into_iter().map(|(item, _)| item).collect())
    }

    /// The `k` best `(item, score)` pairs.
    pub fn top_k(self, result: &WalkResult, k: usize) -> Result<Vec<(usize, f64)>> {
        Ok(top_k(&self.scores(result)?, k))
    }
}

/// Items by descending number of occurrences.
pub fn most_visited(items: &[usize]) -> Vec<usize> {
    ids(sorted(visit_counts(items)))
}

/// Items by descending number of distinct referrers.
pub fn consensus(items: &[usize], referrers: &[usize]) -> Result<Vec<usize>> {
    Ok(ids(sorted(consensus_scores(items, referrers)?)))
}

/// Items by descending accumulated referrer traversal frequency.
///
/// Each occurrence of an item contributes the total number of times its referrer
/// appears in `referrers`.
pub fn trust(items: &[usize], referrers: &[usize]) -> Result<Vec<usize>> {
    Ok(ids(sorted(trust_scores(items, referrers)?)))
}

/// Items to recommend from a walk: the most visited ones.
pub fn recommend_items(result: &WalkResult) -> Vec<usize> {
    most_visited(&result.items)
}

/// Users to recommend from a walk: the most frequent referrers.
pub fn recommend_users(result: &WalkResult) -> Vec<usize> {
    most_visited(&result.referrers)
}

/// The `k` highest-scoring pairs, best first, ties by ascending id.
///
/// Non-finite and non-positive scores are dropped.
pub fn top_k(scores: &[(usize, f64)], k: usize) -> Vec<(usize, f64)> {
    if k == 0 || scores.is_empty() {
        return Vec::new();
    }
    // Min-heap on (score, Reverse(id)): the root is the weakest entry kept so far.
    let mut heap = BinaryHeap::with_capacity(k + 1);
    for &(id, score) in scores {
        if !score.is_finite() || score <= 0.0 {
            continue;
        }
        let Ok(s) = NotNan::new(score) else { continue };
        let key = (s, Reverse(id));
        if heap.len() < k {
            heap.push(Reverse(key));
        } else if let Some(Reverse(weakest)) = heap.peek() {
            if key > *weakest {
                heap.pop();
                heap.push(Reverse(key));
            }
        }
    }
    let mut results: Vec<(usize, f64)> =
        heap.into_iter().map(|Reverse((s, Reverse(id)))| (id, s.into_inner())).collect();
    results.sort_unstable_by(by_score_then_id);
    results
}

/// Scale scores in place so they sum to 1 (no-op when the sum is not positive).
pub fn normalize(scores: &mut [(usize, f64)]) {
    let sum: f64 = scores.iter().map(|&(_, s)| s).sum();
    if sum > 0.0 {
        for (_, s) in scores {
            *s /= sum;
        }
    }
}

fn check_lengths(items: &[usize], referrers: &[usize]) -> Result<()> {
    if items.len() != referrers.len() {
        return Err(Error::LengthMismatch { items: items.len(), referrers: referrers.len() });
    }
    Ok(())
}

fn visit_counts(items: &[usize]) -> HashMap<usize, f64> {
    let mut counts = HashMap::new();
    for &item in items {
        *counts.entry(item).or_insert(0.0) += 1.0;
    }
    counts
}

fn consensus_scores(items: &[usize], referrers: &[usize]) -> Result<HashMap<usize, f64>> {
    check_lengths(items, referrers)?;
    let mut distinct: HashMap<usize, HashSet<usize>> = HashMap::new();
    for (&item, &referrer) in items.iter().zip(referrers) {
        distinct.entry(item).or_default().insert(referrer);
    }
    Ok(distinct.into_iter().map(|(item, users)| (item, users.len() as f64)).collect())
}

fn trust_scores(items: &[usize], referrers: &[usize]) -> Result<HashMap<usize, f64>> {
    check_lengths(items, referrers)?;
    let frequency = visit_counts(referrers);
    let mut scores = HashMap::new();
    for (&item, referrer) in items.iter().zip(referrers) {
        *scores.entry(item).or_insert(0.0) += frequency[referrer];
    }
    Ok(scores)
}

fn by_score_then_id(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

fn sorted(scores: HashMap<usize, f64>) -> Vec<(usize, f64)> {
    let mut scored: Vec<(usize, f64)> = scores.into_iter().collect();
    scored.sort_unstable_by(by_score_then_id);
    scored
}

fn ids(scored: Vec<(usize, f64)>) -> Vec<usize> {
    scored.into_iter().map(|(id, _)| id).collect()
}
