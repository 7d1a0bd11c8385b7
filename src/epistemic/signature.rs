use crate::*;
use std::hash::Hash;
use std::hash::Hasher;

/// Canonical encoding of a [`Model`] up to isomorphism.
///
/// Two models receive the same signature exactly when some bijection of
/// worlds preserves states, every agent relation, and the actual world.
/// The encoding is the model itself written out under its canonical world
/// order: world count, agent count, the actual world's position, the state
/// of every world, then every relation's class labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct Signature(Box<[u32]>);

impl Signature {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn words(&self) -> &[u32] {
        &self.0
    }
    /// Short fingerprint for logs and labels.
    pub fn digest(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}

impl From<Vec<u32>> for Signature {
    fn from(words: Vec<u32>) -> Self {
        Self(words.into_boxed_slice())
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.digest())
    }
}
