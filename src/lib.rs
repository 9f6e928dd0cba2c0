//! # birdwalk
//!
//! Recommendations from weighted random walks on a bipartite user–item graph.
//!
//! A query is a handful of items with relevance weights. The engine draws seed
//! items from the query, then alternates `item -> user -> item` hops for `depth`
//! steps. The visited items and the users that referred them are handed to a
//! ranking strategy ([`rank`]) to produce the final list.
//!
//! Three graph variants are supported:
//! - unweighted edges with a global item prior ([`WalkEngine::new`]),
//! - explicitly weighted edges ([`WalkEngine::weighted`]),
//! - socially biased referrer selection ([`SocialWalkEngine`]).
//!
//! Public invariants (must not drift):
//! - **Dense ids**: users are `0..num_users`, items are `0..num_items`.
//! - **Explicit randomness**: every sampling call takes `&mut R: Rng`; nothing holds
//!   a hidden or global random source. One caller, one RNG.
//! - **Output shape**: `process` returns exactly `draws * depth` items and referrers,
//!   in walk order (step 0 first).
//! - **Determinism**: identical inputs + identical seeds give identical outputs,
//!   including rankings (ties broken by ascending id).

pub mod graph;
pub mod mixture;
pub mod rank;
pub mod sampler;
pub mod social;
pub mod walk;

pub use graph::InteractionGraph;
pub use mixture::WalkMixture;
pub use rank::{consensus, most_visited, recommend_items, recommend_users, trust, Ranking};
pub use sampler::{AliasSampler, DiscreteSampler, Sampler, SamplerKind, TowerSampler};
pub use social::{SocialConfig, SocialGraph, SocialReferrers, SocialWalkEngine};
pub use walk::{
    QueryItem, ReferrerPolicy, UniformReferrers, WalkConfig, WalkEngine, WalkResult,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
    /// `index` locates the weight in its own input: the position in a sampler's weight
    /// slice, in the item-weight vector or in the query; the item id for a weighted
    /// interaction edge; the neighbour's user id for a social affinity.
    #[error("weight {weight} at index {index} is negative or not a number")]
    NegativeWeight { index: usize, weight: f64 },
    #[error("cannot sample from an empty distribution")]
    EmptyDistribution,
    #[error("weights are all zero or not all finite")]
    DegenerateDistribution,
    #[error("the query is empty")]
    EmptyQuery,
    #[error("item {0} is not part of the graph")]
    UnknownItem(usize),
    #[error("no user has interacted with item {0}")]
    OrphanItem(usize),
    #[error("user {0} does not belong to the social graph")]
    UnknownUser(usize),
    #[error("items ({items}) and referrers ({referrers}) have different lengths")]
    LengthMismatch { items: usize, referrers: usize },
    #[error("engine {index} of the mixture failed: {source}")]
    Mixture {
        index: usize,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
