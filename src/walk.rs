//! Query-seeded random walks on the interaction graph.
//!
//! One walk step maps every current item to a referrer (a user that interacted
//! with it) and every referrer to a next item drawn from that user's precomputed
//! sampler. `process` seeds `draws` items from the query and performs `depth` steps.

use crate::graph::InteractionGraph;
use crate::sampler::{AliasSampler, DiscreteSampler, Sampler, SamplerKind};
use crate::{Error, Result};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, warn};

/// Walk parameters, validated once when an engine is built.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WalkConfig {
    /// Number of `item -> user -> item` steps per query.
    pub depth: usize,
    /// Number of seed items drawn from the query.
    pub draws: usize,
    /// Seed for [`WalkConfig::rng`] and the batch APIs.
    pub seed: u64,
    /// Strategy for samplers built per call: the query seeding sampler and the
    /// per-item referrer samplers of a social walk. Per-user item samplers are
    /// always alias tables.
    pub seed_sampler: SamplerKind,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self { depth: 1, draws: 1000, seed: 42, seed_sampler: SamplerKind::Alias }
    }
}

impl WalkConfig {
    pub fn new(depth: usize, draws: usize) -> Result<Self> {
        let config = Self { depth, draws, ..Self::default() };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_seed_sampler(mut self, kind: SamplerKind) -> Self {
        self.seed_sampler = kind;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.depth < 1 {
            return Err(Error::InvalidConfiguration("depth must be at least 1".into()));
        }
        if self.draws < 1 {
            return Err(Error::InvalidConfiguration("draws must be at least 1".into()));
        }
        Ok(())
    }

    /// A fresh RNG seeded from `seed`.
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }

    /// Independent RNG stream `stream` under the same seed.
    ///
    /// Batch processing gives query `i` the stream `i`, so results do not depend on
    /// how queries are scheduled across threads.
    pub fn rng_for(&self, stream: u64) -> ChaCha8Rng {
        let mut rng = self.rng();
        rng.set_stream(stream);
        rng
    }
}

/// One query entry: an item and its relevance weight.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryItem {
    pub item: usize,
    pub weight: f64,
}

impl QueryItem {
    pub fn new(item: usize, weight: f64) -> Self {
        Self { item, weight }
    }
}

/// Visited items and the users that referred them, in walk order.
///
/// `items[i]` was reached through `referrers[i]`; both always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkResult {
    pub items: Vec<usize>,
    pub referrers: Vec<usize>,
}

impl WalkResult {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity), referrers: Vec::with_capacity(capacity) }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append `other` after `self`.
    pub fn extend_from(&mut self, other: &WalkResult) {
        self.items.extend_from_slice(&other.items);
        self.referrers.extend_from_slice(&other.referrers);
    }
}

/// How a step picks the referrer for an item.
pub trait ReferrerPolicy {
    fn select<R: Rng + ?Sized>(
        &mut self,
        graph: &InteractionGraph,
        item: usize,
        rng: &mut R,
    ) -> Result<usize>;
}

/// Every user that interacted with the item is equally likely.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformReferrers;

impl ReferrerPolicy for UniformReferrers {
    fn select<R: Rng + ?Sized>(
        &mut self,
        graph: &InteractionGraph,
        item: usize,
        rng: &mut R,
    ) -> Result<usize> {
        if item >= graph.num_items() {
            return Err(Error::UnknownItem(item));
        }
        graph.users_of(item).choose(rng).copied().ok_or(Error::OrphanItem(item))
    }
}

/// Random-walk recommender over an immutable interaction graph.
///
/// Construction builds one alias sampler per user; afterwards the engine is read-only
/// and can be shared across threads. Randomness comes from the caller.
#[derive(Debug, Clone)]
pub struct WalkEngine {
    config: WalkConfig,
    item_weights: Vec<f64>,
    graph: InteractionGraph,
    // Indexed by user id; `None` for users without items.
    user_samplers: Vec<Option<AliasSampler>>,
}

impl WalkEngine {
    /// Engine over an unweighted graph: a user's items are weighted by the global item weights.
    pub fn new(
        config: WalkConfig,
        item_weights: Vec<f64>,
        users_to_items: Vec<Vec<usize>>,
    ) -> Result<Self> {
        config.validate()?;
        let graph = InteractionGraph::new(item_weights.len(), users_to_items)?;
        Self::from_graph(config, item_weights, graph)
    }

    /// Engine over an already assembled graph (e.g. one built with
    /// [`InteractionGraph::from_parts`]).
    pub fn from_graph(
        config: WalkConfig,
        item_weights: Vec<f64>,
        graph: InteractionGraph,
    ) -> Result<Self> {
        config.validate()?;
        check_item_weights(&item_weights, graph.num_items())?;
        let user_weights: Vec<Vec<f64>> = (0..graph.num_users())
            .map(|u| graph.items_of(u).iter().map(|&i| item_weights[i]).collect())
            .collect();
        Self::assemble(config, item_weights, graph, &user_weights)
    }

    /// Engine over a weighted graph: each user maps the items it interacted with to an
    /// edge weight, and its items are sampled proportionally to those weights.
    ///
    /// A user's item list is the keys of its map, by ascending item id.
    pub fn weighted(
        config: WalkConfig,
        item_weights: Vec<f64>,
        users_to_weighted_items: &[HashMap<usize, f64>],
    ) -> Result<Self> {
        config.validate()?;
        let mut users_to_items = Vec::with_capacity(users_to_weighted_items.len());
        let mut user_weights = Vec::with_capacity(users_to_weighted_items.len());
        for edges in users_to_weighted_items {
            let mut pairs: Vec<(usize, f64)> = edges.iter().map(|(&i, &w)| (i, w)).collect();
            pairs.sort_unstable_by_key(|&(i, _)| i);
            if let Some(&(index, weight)) = pairs.iter().find(|&&(_, w)| !(w >= 0.0)) {
                return Err(Error::NegativeWeight { index, weight });
            }
            users_to_items.push(pairs.iter().map(|&(i, _)| i).collect());
            user_weights.push(pairs.into_iter().map(|(_, w)| w).collect());
        }
        let graph = InteractionGraph::new(item_weights.len(), users_to_items)?;
        check_item_weights(&item_weights, graph.num_items())?;
        Self::assemble(config, item_weights, graph, &user_weights)
    }

    fn assemble(
        config: WalkConfig,
        item_weights: Vec<f64>,
        graph: InteractionGraph,
        user_weights: &[Vec<f64>],
    ) -> Result<Self> {
        // Validate everything before building a single sampler.
        for (user, weights) in user_weights.iter().enumerate() {
            if weights.is_empty() {
                continue;
            }
            let usable = weights.iter().any(|&w| w > 0.0) && weights.iter().all(|w| w.is_finite());
            if !usable {
                return Err(Error::InvalidGraph(format!(
                    "user {user} has items but no positive finite weight"
                )));
            }
        }

        let user_samplers = user_weights
            .iter()
            .map(|weights| {
                if weights.is_empty() {
                    Ok(None)
                } else {
                    AliasSampler::build(weights).map(Some)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            users = graph.num_users(),
            items = graph.num_items(),
            edges = graph.num_edges(),
            depth = config.depth,
            draws = config.draws,
            "initialized walk engine"
        );

        Ok(Self { config, item_weights, graph, user_samplers })
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    pub fn graph(&self) -> &InteractionGraph {
        &self.graph
    }

    pub fn item_weights(&self) -> &[f64] {
        &self.item_weights
    }

    /// The item sampler of `user`, if the user has any items.
    pub fn user_sampler(&self, user: usize) -> Option<&AliasSampler> {
        self.user_samplers.get(user).and_then(Option::as_ref)
    }

    /// Run one query with uniform referrer selection.
    ///
    /// Returns `draws * depth` items and referrers. Fails with [`Error::EmptyQuery`]
    /// for an empty query.
    pub fn process<R: Rng + ?Sized>(&self, query: &[QueryItem], rng: &mut R) -> Result<WalkResult> {
        self.process_with(query, &mut UniformReferrers, rng)
    }

    /// Run one query with a custom referrer policy.
    pub fn process_with<P: ReferrerPolicy, R: Rng + ?Sized>(
        &self,
        query: &[QueryItem],
        policy: &mut P,
        rng: &mut R,
    ) -> Result<WalkResult> {
        let start = Instant::now();

        let mut current = self.seed_items(query, rng)?;
        let mut result = WalkResult::with_capacity(self.config.draws * self.config.depth);
        for _ in 0..self.config.depth {
            let step = self.step_with(&current, policy, rng)?;
            result.extend_from(&step);
            current = step.items;
        }

        debug!(
            query_len = query.len(),
            visited = result.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "processed query"
        );
        Ok(result)
    }

    /// Draw `draws` seed items from the query, proportionally to
    /// `query weight * item weight`.
    ///
    /// Query items nobody interacted with are skipped (logged, not fatal). If no
    /// query item is left with positive weight the call fails with
    /// [`Error::DegenerateDistribution`].
    pub fn seed_items<R: Rng + ?Sized>(&self, query: &[QueryItem], rng: &mut R) -> Result<Vec<usize>> {
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }

        let mut weights = Vec::with_capacity(query.len());
        for (index, q) in query.iter().enumerate() {
            let Some(&prior) = self.item_weights.get(q.item) else {
                return Err(Error::UnknownItem(q.item));
            };
            if !(q.weight >= 0.0) {
                return Err(Error::NegativeWeight { index, weight: q.weight });
            }
            if self.graph.users_of(q.item).is_empty() {
                warn!(item = q.item, "skipping query item no user has interacted with");
                weights.push(0.0);
            } else {
                weights.push(q.weight * prior);
            }
        }

        let sampler = Sampler::build_with(self.config.seed_sampler, &weights)?;
        let mut seeds = Vec::with_capacity(self.config.draws);
        for _ in 0..self.config.draws {
            seeds.push(query[sampler.draw(rng)].item);
        }
        Ok(seeds)
    }

    /// One uniform walk step from `items`.
    pub fn step<R: Rng + ?Sized>(&self, items: &[usize], rng: &mut R) -> Result<WalkResult> {
        self.step_with(items, &mut UniformReferrers, rng)
    }

    /// One walk step: a referrer per item, then a next item per referrer.
    pub fn step_with<P: ReferrerPolicy, R: Rng + ?Sized>(
        &self,
        items: &[usize],
        policy: &mut P,
        rng: &mut R,
    ) -> Result<WalkResult> {
        let referrers = items
            .iter()
            .map(|&item| policy.select(&self.graph, item, rng))
            .collect::<Result<Vec<_>>>()?;
        let next = referrers
            .iter()
            .map(|&user| self.sample_item(user, rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(WalkResult { items: next, referrers })
    }

    /// Draw one item from `user`'s collection.
    pub fn sample_item<R: Rng + ?Sized>(&self, user: usize, rng: &mut R) -> Result<usize> {
        if user >= self.user_samplers.len() {
            return Err(Error::UnknownUser(user));
        }
        match &self.user_samplers[user] {
            Some(sampler) => Ok(self.graph.items_of(user)[sampler.draw(rng)]),
            None => Err(Error::InvalidGraph(format!("user {user} has no items to sample from"))),
        }
    }

    /// Process queries one after another; query `i` uses [`WalkConfig::rng_for`]`(i)`.
    pub fn process_batch<Q: AsRef<[QueryItem]>>(&self, queries: &[Q]) -> Vec<Result<WalkResult>> {
        queries
            .iter()
            .enumerate()
            .map(|(i, q)| self.process(q.as_ref(), &mut self.config.rng_for(i as u64)))
            .collect()
    }

    /// Parallel [`WalkEngine::process_batch`].
    ///
    /// Invariant: output is identical to the serial version, independent of Rayon thread count.
    #[cfg(feature = "parallel")]
    pub fn process_batch_parallel<Q: AsRef<[QueryItem]> + Sync>(
        &self,
        queries: &[Q],
    ) -> Vec<Result<WalkResult>> {
        use rayon::prelude::*;

        queries
            .par_iter()
            .enumerate()
            .map(|(i, q)| self.process(q.as_ref(), &mut self.config.rng_for(i as u64)))
            .collect()
    }
}

fn check_item_weights(item_weights: &[f64], num_items: usize) -> Result<()> {
    if item_weights.len() != num_items {
        return Err(Error::InvalidGraph(format!(
            "{} item weights for {num_items} items",
            item_weights.len()
        )));
    }
    if let Some((index, &weight)) = item_weights.iter().enumerate().find(|(_, &w)| !(w >= 0.0)) {
        return Err(Error::NegativeWeight { index, weight });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_engine(config: WalkConfig) -> WalkEngine {
        // users: 0 -> {0, 1}, 1 -> {1, 2}, 2 -> {2}, 3 -> {}
        WalkEngine::new(
            config,
            vec![1.0, 1.0, 1.0, 1.0],
            vec![vec![0, 1], vec![1, 2], vec![2], vec![]],
        )
        .unwrap()
    }

    #[test]
    fn config_rejects_zero_depth_and_draws() {
        assert!(matches!(WalkConfig::new(0, 1), Err(Error::InvalidConfiguration(_))));
        assert!(matches!(WalkConfig::new(1, 0), Err(Error::InvalidConfiguration(_))));
        let cfg = WalkConfig { depth: 0, ..WalkConfig::default() };
        let err = WalkEngine::new(cfg, vec![1.0], vec![vec![0]]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn config_defaults() {
        let cfg = WalkConfig::default();
        assert_eq!((cfg.depth, cfg.draws, cfg.seed), (1, 1000, 42));
        assert_eq!(cfg.seed_sampler, SamplerKind::Alias);
    }

    #[test]
    fn rng_streams_differ_but_replay() {
        let cfg = WalkConfig::default();
        let a: u64 = cfg.rng_for(0).random();
        let b: u64 = cfg.rng_for(1).random();
        assert_ne!(a, b);
        assert_eq!(a, cfg.rng_for(0).random::<u64>());
    }

    #[test]
    fn output_has_draws_times_depth_entries() {
        let cfg = WalkConfig::new(3, 17).unwrap();
        let engine = small_engine(cfg);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let out = engine.process(&[QueryItem::new(0, 1.0), QueryItem::new(2, 2.0)], &mut rng).unwrap();
        assert_eq!(out.items.len(), 51);
        assert_eq!(out.referrers.len(), 51);
    }

    #[test]
    fn every_hop_follows_an_edge() {
        let engine = small_engine(WalkConfig::new(4, 50).unwrap());
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let out = engine.process(&[QueryItem::new(1, 1.0)], &mut rng).unwrap();
        for (&item, &user) in out.items.iter().zip(&out.referrers) {
            assert!(engine.graph().items_of(user).contains(&item), "user {user} never saw {item}");
        }
        // User 3 has no items and can never refer anything.
        assert!(!out.referrers.contains(&3));
    }

    #[test]
    fn empty_query_is_rejected() {
        let engine = small_engine(WalkConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(engine.process(&[], &mut rng), Err(Error::EmptyQuery)));
    }

    #[test]
    fn query_validation() {
        let engine = small_engine(WalkConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            engine.process(&[QueryItem::new(10, 1.0)], &mut rng),
            Err(Error::UnknownItem(10))
        ));
        assert!(matches!(
            engine.process(&[QueryItem::new(0, -1.0)], &mut rng),
            Err(Error::NegativeWeight { index: 0, .. })
        ));
    }

    #[test]
    fn orphan_query_items_are_skipped() {
        // Item 3 has a weight but nobody interacted with it.
        let engine = small_engine(WalkConfig::new(1, 200).unwrap());
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let seeds = engine
            .seed_items(&[QueryItem::new(3, 100.0), QueryItem::new(0, 1.0)], &mut rng)
            .unwrap();
        assert!(seeds.iter().all(|&i| i == 0));

        let only_orphans = engine.process(&[QueryItem::new(3, 1.0)], &mut rng);
        assert!(matches!(only_orphans, Err(Error::DegenerateDistribution)));
    }

    #[test]
    fn step_on_orphan_item_is_fatal() {
        let engine = small_engine(WalkConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(engine.step(&[0, 3], &mut rng), Err(Error::OrphanItem(3))));
    }

    #[test]
    fn invalid_graphs_are_rejected() {
        let cfg = WalkConfig::default();
        assert!(matches!(
            WalkEngine::new(cfg, vec![], vec![vec![0]]),
            Err(Error::InvalidGraph(_))
        ));
        assert!(matches!(WalkEngine::new(cfg, vec![1.0], vec![]), Err(Error::InvalidGraph(_))));
        assert!(matches!(
            WalkEngine::new(cfg, vec![0.1, 0.2, 0.4], vec![vec![0, 2], vec![4]]),
            Err(Error::InvalidGraph(_))
        ));
        assert!(matches!(
            WalkEngine::new(cfg, vec![1.0, -2.0], vec![vec![0, 1]]),
            Err(Error::NegativeWeight { index: 1, .. })
        ));
        // User 1 could be picked as a referrer for item 1 but cannot emit anything.
        assert!(matches!(
            WalkEngine::new(cfg, vec![1.0, 0.0], vec![vec![0, 1], vec![1]]),
            Err(Error::InvalidGraph(_))
        ));
    }

    #[test]
    fn weighted_graph_uses_edge_weights() {
        let users: Vec<HashMap<usize, f64>> = vec![
            HashMap::from([(0, 1.0), (1, 0.0), (2, 1.0)]),
            HashMap::from([(1, 5.0)]),
        ];
        let engine = WalkEngine::weighted(WalkConfig::default(), vec![1.0; 3], &users).unwrap();
        assert_eq!(engine.graph().items_of(0), &[0, 1, 2]);
        assert_eq!(engine.graph().users_of(1), &[0, 1]);

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..2_000 {
            assert_ne!(engine.sample_item(0, &mut rng).unwrap(), 1);
        }
    }

    #[test]
    fn weighted_graph_rejects_negative_edges() {
        let users = vec![HashMap::from([(0, 1.0), (1, -0.5)])];
        let err = WalkEngine::weighted(WalkConfig::default(), vec![1.0; 2], &users).unwrap_err();
        assert!(matches!(err, Error::NegativeWeight { index: 1, .. }), "{err}");

        let dangling = vec![HashMap::from([(7, 1.0)])];
        let err = WalkEngine::weighted(WalkConfig::default(), vec![1.0; 2], &dangling).unwrap_err();
        assert!(matches!(err, Error::InvalidGraph(_)), "{err}");
    }

    #[test]
    fn huge_item_weights_do_not_overflow() {
        let weights = vec![f64::MAX, f64::MAX];
        let engine = WalkEngine::new(WalkConfig::new(2, 400).unwrap(), weights.clone(), vec![vec![0, 1]])
            .unwrap();
        assert_eq!(engine.item_weights(), weights.as_slice());
        let sampler = engine.user_sampler(0).unwrap();
        assert_eq!(sampler.len(), 2);
        assert!(engine.user_sampler(1).is_none());

        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let out = engine.process(&[QueryItem::new(0, 1.0)], &mut rng).unwrap();
        assert!(out.items.contains(&0) && out.items.contains(&1));

        let infinite = vec![HashMap::from([(0, f64::INFINITY), (1, 1.0)])];
        let err = WalkEngine::weighted(WalkConfig::default(), vec![1.0; 2], &infinite).unwrap_err();
        assert!(matches!(err, Error::InvalidGraph(_)), "{err}");
    }

    #[test]
    fn users_without_items_have_no_sampler() {
        let engine = small_engine(WalkConfig::default());
        assert!(engine.user_sampler(0).is_some());
        assert!(engine.user_sampler(3).is_none());
        assert!(matches!(
            engine.sample_item(3, &mut ChaCha8Rng::seed_from_u64(0)),
            Err(Error::InvalidGraph(_))
        ));
    }

    #[test]
    fn seed_items_are_not_part_of_the_output() {
        // The only way back to item 0 is a zero-weight edge, so any 0 in the output
        // would have to be a leaked seed.
        let users = vec![HashMap::from([(0, 0.0), (1, 1.0)])];
        let engine = WalkEngine::weighted(WalkConfig::new(1, 300).unwrap(), vec![1.0; 2], &users).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let out = engine.process(&[QueryItem::new(0, 1.0)], &mut rng).unwrap();
        assert_eq!(out.len(), 300);
        assert!(out.items.iter().all(|&i| i == 1), "seed leaked into {:?}", out.items);
        assert!(out.referrers.iter().all(|&u| u == 0));
    }

    #[test]
    fn same_seed_same_walk() {
        let engine = small_engine(WalkConfig::new(3, 40).unwrap());
        let query = [QueryItem::new(0, 1.0), QueryItem::new(1, 0.5)];
        let a = engine.process(&query, &mut ChaCha8Rng::seed_from_u64(77)).unwrap();
        let b = engine.process(&query, &mut ChaCha8Rng::seed_from_u64(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn manual_stepping_matches_process() {
        let engine = small_engine(WalkConfig::new(3, 10).unwrap());
        let query = [QueryItem::new(0, 1.0)];

        let expected = engine.process(&query, &mut ChaCha8Rng::seed_from_u64(8)).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut current = engine.seed_items(&query, &mut rng).unwrap();
        let mut got = WalkResult::default();
        for _ in 0..engine.config().depth {
            let step = engine.step(&current, &mut rng).unwrap();
            got.extend_from(&step);
            current = step.items;
        }
        assert_eq!(got, expected);
    }

    #[test]
    fn batch_uses_one_stream_per_query() {
        let engine = small_engine(WalkConfig::new(2, 8).unwrap());
        let queries = vec![vec![QueryItem::new(0, 1.0)], vec![], vec![QueryItem::new(2, 1.0)]];
        let out = engine.process_batch(&queries);
        assert_eq!(out.len(), 3);
        assert!(matches!(out[1], Err(Error::EmptyQuery)));

        let first = engine.process(&queries[0], &mut engine.config().rng_for(0)).unwrap();
        assert_eq!(out[0].as_ref().unwrap(), &first);
        let third = engine.process(&queries[2], &mut engine.config().rng_for(2)).unwrap();
        assert_eq!(out[2].as_ref().unwrap(), &third);
    }
}
