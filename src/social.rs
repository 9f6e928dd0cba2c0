//! Socially biased walks.
//!
//! Referrers are not picked uniformly: for the user being served, each candidate
//! referrer is weighted by the social affinity between the two, or by a default
//! weight when there is none. Everything else is delegated to the wrapped
//! [`WalkEngine`].

use crate::graph::InteractionGraph;
use crate::sampler::{DiscreteSampler, Sampler, SamplerKind};
use crate::walk::{QueryItem, ReferrerPolicy, WalkConfig, WalkEngine, WalkResult};
use crate::{Error, Result};
use rand::Rng;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SocialConfig {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub walk: WalkConfig,
    /// Affinity assumed between two users with no explicit social weight.
    pub default_weight: f64,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self { walk: WalkConfig::default(), default_weight: 1.0 }
    }
}

impl SocialConfig {
    pub fn validate(&self) -> Result<()> {
        self.walk.validate()?;
        if !(self.default_weight >= 0.0) || !self.default_weight.is_finite() {
            return Err(Error::InvalidConfiguration(format!(
                "default weight must be finite and non-negative, got {}",
                self.default_weight
            )));
        }
        Ok(())
    }
}

/// Sparse user–user affinities: row `u` maps the users `u` is connected to onto a weight.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    affinities: Vec<HashMap<usize, f64>>,
}

impl SocialGraph {
    pub fn new(affinities: Vec<HashMap<usize, f64>>) -> Self {
        Self { affinities }
    }

    pub fn num_users(&self) -> usize {
        self.affinities.len()
    }

    /// Explicit affinity from `user` to `other`, if any.
    pub fn affinity(&self, user: usize, other: usize) -> Option<f64> {
        self.affinities.get(user).and_then(|row| row.get(&other)).copied()
    }

    /// Rows are checked in user order and each row by ascending neighbour id, so the
    /// first offending entry decides the error. A negative affinity reports the
    /// neighbour's user id as the [`Error::NegativeWeight`] index.
    fn validate(&self, num_users: usize) -> Result<()> {
        if self.affinities.len() != num_users {
            return Err(Error::InvalidGraph(format!(
                "social graph has {} users, interaction graph has {num_users}",
                self.affinities.len()
            )));
        }
        for (user, row) in self.affinities.iter().enumerate() {
            let mut edges: Vec<(usize, f64)> = row.iter().map(|(&o, &w)| (o, w)).collect();
            edges.sort_unstable_by_key(|&(o, _)| o);
            for (other, weight) in edges {
                if other >= num_users {
                    return Err(Error::InvalidGraph(format!(
                        "user {user} is connected to unknown user {other}"
                    )));
                }
                if !(weight >= 0.0) {
                    return Err(Error::NegativeWeight { index: other, weight });
                }
            }
        }
        Ok(())
    }
}

/// Referrer policy weighting candidates by their affinity to one user.
///
/// Holds a per-item sampler cache, so it must live for a single `process` call:
/// the cache is only valid for the user it was created for.
#[derive(Debug)]
pub struct SocialReferrers<'a> {
    social: &'a SocialGraph,
    user: usize,
    default_weight: f64,
    kind: SamplerKind,
    cache: HashMap<usize, Sampler>,
}

impl<'a> SocialReferrers<'a> {
    pub fn new(social: &'a SocialGraph, user: usize, default_weight: f64) -> Result<Self> {
        if user >= social.num_users() {
            return Err(Error::UnknownUser(user));
        }
        Ok(Self { social, user, default_weight, kind: SamplerKind::Alias, cache: HashMap::new() })
    }

    /// Strategy used for the per-item samplers.
    pub fn with_sampler(mut self, kind: SamplerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Number of items with a cached sampler.
    pub fn cached_items(&self) -> usize {
        self.cache.len()
    }
}

impl ReferrerPolicy for SocialReferrers<'_> {
    fn select<R: Rng + ?Sized>(
        &mut self,
        graph: &InteractionGraph,
        item: usize,
        rng: &mut R,
    ) -> Result<usize> {
        if item >= graph.num_items() {
            return Err(Error::UnknownItem(item));
        }
        let candidates = graph.users_of(item);
        if candidates.is_empty() {
            return Err(Error::OrphanItem(item));
        }
        let sampler = match self.cache.entry(item) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let weights: Vec<f64> = candidates
                    .iter()
                    .map(|&r| self.social.affinity(self.user, r).unwrap_or(self.default_weight))
                    .collect();
                entry.insert(Sampler::build_with(self.kind, &weights)?)
            }
        };
        Ok(candidates[sampler.draw(rng)])
    }
}

/// Walk engine whose referrer selection depends on the user being served.
#[derive(Debug, Clone)]
pub struct SocialWalkEngine {
    base: WalkEngine,
    social: SocialGraph,
    default_weight: f64,
}

impl SocialWalkEngine {
    pub fn new(
        config: SocialConfig,
        item_weights: Vec<f64>,
        users_to_items: Vec<Vec<usize>>,
        social: SocialGraph,
    ) -> Result<Self> {
        config.validate()?;
        let graph = InteractionGraph::new(item_weights.len(), users_to_items)?;
        social.validate(graph.num_users())?;
        let base = WalkEngine::from_graph(config.walk, item_weights, graph)?;
        Ok(Self { base, social, default_weight: config.default_weight })
    }

    /// Wrap an existing engine.
    pub fn from_engine(base: WalkEngine, social: SocialGraph, default_weight: f64) -> Result<Self> {
        SocialConfig { walk: *base.config(), default_weight }.validate()?;
        social.validate(base.graph().num_users())?;
        Ok(Self { base, social, default_weight })
    }

    pub fn base(&self) -> &WalkEngine {
        &self.base
    }

    pub fn social_graph(&self) -> &SocialGraph {
        &self.social
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    /// Referrer policy for `user`, fresh for one call. Its per-item samplers use
    /// [`WalkConfig::seed_sampler`].
    pub fn referrers_for(&self, user: usize) -> Result<SocialReferrers<'_>> {
        SocialReferrers::new(&self.social, user, self.default_weight)
            .map(|p| p.with_sampler(self.base.config().seed_sampler))
    }

    /// Run `query` on behalf of `user`.
    ///
    /// Fails with [`Error::UnknownUser`] when `user` is outside the social graph.
    pub fn process<R: Rng + ?Sized>(
        &self,
        query: &[QueryItem],
        user: usize,
        rng: &mut R,
    ) -> Result<WalkResult> {
        let mut policy = self.referrers_for(user)?;
        self.base.process_with(query, &mut policy, rng)
    }
}
