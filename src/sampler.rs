//! Discrete samplers over non-negative weight vectors.
//!
//! A sampler is built once from a weight vector and then returns indices into that
//! vector, drawn i.i.d. proportionally to the weights. Samplers never hold a random
//! source: every draw takes `&mut R`, so a single sampler can be shared read-only
//! between threads that each own their RNG.
//!
//! Two interchangeable strategies:
//! - [`AliasSampler`]: Vose's alias method, O(n) build, O(1) per draw.
//! - [`TowerSampler`]: normalised cumulative sums, O(n) build, O(log n) per draw.
//!   Cheaper to build, which matters for one-shot samplers drawn from a few times.
//!
//! References:
//! - Walker (1974): An efficient method for generating discrete random variables with general distributions.
//! - Vose (1991): A linear algorithm for generating random numbers with a given distribution.

use crate::{Error, Result};
use rand::Rng;

/// Build/sample contract shared by every sampling strategy.
pub trait DiscreteSampler: Sized {
    /// Build a sampler from `weights`.
    ///
    /// Fails with [`Error::EmptyDistribution`] on an empty slice,
    /// [`Error::NegativeWeight`] on a negative (or NaN) entry and
    /// [`Error::DegenerateDistribution`] when no weight is positive or some weight is infinite.
    fn build(weights: &[f64]) -> Result<Self>;

    /// Number of outcomes (the length of the weight vector the sampler was built from).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draw one index.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize;

    /// Draw `count` indices with replacement.
    fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<usize> {
        let mut out = Vec::with_capacity(count);
        self.sample_into(&mut out, count, rng);
        out
    }

    /// Append `count` draws to `out` without allocating a fresh buffer.
    fn sample_into<R: Rng + ?Sized>(&self, out: &mut Vec<usize>, count: usize, rng: &mut R) {
        out.reserve(count);
        for _ in 0..count {
            out.push(self.draw(rng));
        }
    }
}

/// Checks the weights and rescales them by their maximum.
///
/// Returns the rescaled weights (each in `[0, 1]`) and their sum (in `[1, n]`), so
/// finite weights never overflow however large they are.
fn relative_weights(weights: &[f64]) -> Result<(Vec<f64>, f64)> {
    if weights.is_empty() {
        return Err(Error::EmptyDistribution);
    }
    let mut max = 0.0f64;
    for (index, &weight) in weights.iter().enumerate() {
        // `!(w >= 0)` also rejects NaN.
        if !(weight >= 0.0) {
            return Err(Error::NegativeWeight { index, weight });
        }
        max = max.max(weight);
    }
    if !(max > 0.0) || !max.is_finite() {
        return Err(Error::DegenerateDistribution);
    }
    let relative: Vec<f64> = weights.iter().map(|&w| w / max).collect();
    let total = relative.iter().sum();
    Ok((relative, total))
}

/// Alias-method sampler (Vose's construction).
#[derive(Debug, Clone)]
pub struct AliasSampler {
    probability: Vec<f64>,
    alias: Vec<usize>,
}

impl AliasSampler {
    pub fn probability_table(&self) -> &[f64] {
        &self.probability
    }

    pub fn alias_table(&self) -> &[usize] {
        &self.alias
    }
}

impl DiscreteSampler for AliasSampler {
    fn build(weights: &[f64]) -> Result<Self> {
        let (relative, total) = relative_weights(weights)?;
        let n = weights.len();
        let n_f64 = n as f64;

        let mut scaled: Vec<f64> = relative.iter().map(|&w| n_f64 * w / total).collect();
        let mut probability = vec![0.0f64; n];
        // Unpaired buckets keep probability 1 and never consult their alias;
        // pointing the alias at itself keeps the table self-consistent anyway.
        let mut alias: Vec<usize> = (0..n).collect();

        let mut small: Vec<usize> = Vec::with_capacity(n);
        let mut large: Vec<usize> = Vec::with_capacity(n);
        for (i, &s) in scaled.iter().enumerate() {
            if s < 1.0 {
                small.push(i);
            } else {
                large.push(i);
            }
        }

        while !small.is_empty() && !large.is_empty() {
            let (Some(l), Some(g)) = (small.pop(), large.pop()) else {
                break;
            };
            alias[l] = g;
            probability[l] = scaled[l];
            scaled[g] -= 1.0 - scaled[l];
            if scaled[g] < 1.0 {
                small.push(g);
            } else {
                large.push(g);
            }
        }

        // Leftovers are only off from 1 by rounding error.
        for g in large {
            probability[g] = 1.0;
        }
        for l in small {
            probability[l] = 1.0;
        }

        Ok(Self { probability, alias })
    }

    fn len(&self) -> usize {
        self.probability.len()
    }

    #[inline]
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let k = rng.random_range(0..self.probability.len());
        if rng.random::<f64>() < self.probability[k] {
            k
        } else {
            self.alias[k]
        }
    }
}

/// Cumulative-sum ("tower") sampler.
#[derive(Debug, Clone)]
pub struct TowerSampler {
    cumulative: Vec<f64>,
}

impl TowerSampler {
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }
}

impl DiscreteSampler for TowerSampler {
    fn build(weights: &[f64]) -> Result<Self> {
        let (relative, total) = relative_weights(weights)?;
        let mut acc = 0.0f64;
        let mut cumulative: Vec<f64> = relative
            .iter()
            .map(|&w| {
                acc += w;
                acc / total
            })
            .collect();
        // Pin the top of the tower so rounding cannot leave a gap below 1.
        // Trailing zero weights share the top value and stay unreachable.
        let top = cumulative[cumulative.len() - 1];
        for c in cumulative.iter_mut().rev() {
            if *c < top {
                break;
            }
            *c = 1.0;
        }
        Ok(Self { cumulative })
    }

    fn len(&self) -> usize {
        self.cumulative.len()
    }

    #[inline]
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let u: f64 = rng.random();
        // First bucket whose upper edge lies strictly above `u`; zero-width buckets are skipped.
        let i = self.cumulative.partition_point(|&c| c <= u);
        i.min(self.cumulative.len() - 1)
    }
}

/// Which sampling strategy to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SamplerKind {
    #[default]
    Alias,
    Tower,
}

/// A sampler whose strategy is chosen at run time.
#[derive(Debug, Clone)]
pub enum Sampler {
    Alias(AliasSampler),
    Tower(TowerSampler),
}

impl Sampler {
    pub fn build_with(kind: SamplerKind, weights: &[f64]) -> Result<Self> {
        match kind {
            SamplerKind::Alias => AliasSampler::build(weights).map(Sampler::Alias),
            SamplerKind::Tower => TowerSampler::build(weights).map(Sampler::Tower),
        }
    }

    pub fn kind(&self) -> SamplerKind {
        match self {
            Sampler::Alias(_) => SamplerKind::Alias,
            Sampler::Tower(_) => SamplerKind::Tower,
        }
    }
}

impl DiscreteSampler for Sampler {
    fn build(weights: &[f64]) -> Result<Self> {
        Self::build_with(SamplerKind::default(), weights)
    }

    fn len(&self) -> usize {
        match self {
            Sampler::Alias(s) => s.len(),
            Sampler::Tower(s) => s.len(),
        }
    }

    #[inline]
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match self {
            Sampler::Alias(s) => s.draw(rng),
            Sampler::Tower(s) => s.draw(rng),
        }
    }
}
