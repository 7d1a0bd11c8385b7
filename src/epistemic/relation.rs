use crate::*;
use std::collections::HashMap;
use std::hash::Hash;

/// An equivalence relation over the worlds of one [`Model`].
///
/// Stored as a class label per world, labels numbered by first occurrence.
/// Two relations over the same worlds are equal exactly when they induce
/// the same partition, so derived `Eq` and `Hash` are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct Relation(Box<[u32]>);

impl Relation {
    /// The kernel of a key function: worlds are related iff their keys match.
    pub fn from_keys<K>(keys: impl IntoIterator<Item = K>) -> Self
    where
        K: Hash + Eq,
    {
        let mut seen = HashMap::new();
        Self(
            keys.into_iter()
                .map(|key| {
                    let next = seen.len() as u32;
                    *seen.entry(key).or_insert(next)
                })
                .collect(),
        )
    }
    /// Every world related to every other.
    pub fn complete(n: usize) -> Self {
        Self(vec![0; n].into_boxed_slice())
    }
    /// Every world related only to itself.
    pub fn discrete(n: usize) -> Self {
        Self((0..n as u32).collect())
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn class(&self, world: WorldId) -> usize {
        self.0[world] as usize
    }
    pub fn related(&self, a: WorldId, b: WorldId) -> bool {
        self.0[a] == self.0[b]
    }
    /// Raw class labels, one per world.
    pub fn labels(&self) -> &[u32] {
        &self.0
    }
    pub fn n_classes(&self) -> usize {
        self.0.iter().max().map_or(0, |c| *c as usize + 1)
    }
    /// Members of every class, in label order.
    pub fn classes(&self) -> Vec<Vec<WorldId>> {
        let mut classes = vec![Vec::new(); self.n_classes()];
        for (world, &c) in self.0.iter().enumerate() {
            classes[c as usize].push(world);
        }
        classes
    }
    /// The relation induced on a selection of worlds, renumbered in
    /// selection order.
    pub fn restrict(&self, worlds: &[WorldId]) -> Self {
        Self::from_keys(worlds.iter().map(|&w| self.0[w]))
    }
    /// Related pairs `(a, b)` with `a < b`.
    pub fn pairs(&self) -> Vec<(WorldId, WorldId)> {
        self.classes()
            .into_iter()
            .flat_map(|class| {
                class
                    .iter()
                    .enumerate()
                    .flat_map(|(i, &a)| class[i + 1..].iter().map(move |&b| (a, b)))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for class in self.classes() {
            write!(
                f,
                "[{}]",
                class
                    .iter()
                    .map(|w| w.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            )?;
        }
        Ok(())
    }
}
