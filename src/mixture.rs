//! Mixtures of walk engines.
//!
//! Typical use: one engine per interaction type (plays, likes, playlist
//! membership) over the same item space, queried together.

use crate::walk::{QueryItem, WalkEngine, WalkResult};
use crate::{Error, Result};
use rand::Rng;

#[derive(Debug, Clone, Default)]
pub struct WalkMixture {
    engines: Vec<WalkEngine>,
}

impl WalkMixture {
    pub fn new(engines: Vec<WalkEngine>) -> Self {
        Self { engines }
    }

    pub fn push(&mut self, engine: WalkEngine) {
        self.engines.push(engine);
    }

    pub fn engines(&self) -> &[WalkEngine] {
        &self.engines
    }

    /// Run `query` through every engine in order and concatenate the outputs.
    ///
    /// The first failing engine aborts the call with [`Error::Mixture`].
    pub fn process<R: Rng + ?Sized>(&self, query: &[QueryItem], rng: &mut R) -> Result<WalkResult> {
        let mut result = WalkResult::default();
        for (index, engine) in self.engines.iter().enumerate() {
            let out = engine
                .process(query, rng)
                .map_err(|source| Error::Mixture { index, source: Box::new(source) })?;
            result.extend_from(&out);
        }
        Ok(result)
    }
}
