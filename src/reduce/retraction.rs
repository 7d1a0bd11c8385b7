use crate::*;

/// An idempotent endomorphism of a model, given as the image of every world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retraction(Box<[WorldId]>);

impl Retraction {
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn image(&self, world: WorldId) -> WorldId {
        self.0[world]
    }
    /// Worlds that are their own image, ascending.
    pub fn support(&self) -> Vec<WorldId> {
        (0..self.0.len()).filter(|&w| self.0[w] == w).collect()
    }
    /// Whether this is a retraction of `model` onto the submodel it fixes.
    pub fn is_valid(&self, model: &Model) -> bool {
        self.0.len() == model.len()
            && self.0.iter().all(|&w| w < model.len() && self.0[w] == w)
            && model.maps_into(model, &self.0)
    }
    pub fn validate(self, model: &Model) -> Result<Self, ReductionFailure> {
        match self.is_valid(model) {
            true => Ok(self),
            false => Err(ReductionFailure::Invalid),
        }
    }
    /// The submodel on the fixed worlds.
    pub fn apply(&self, model: &Model) -> Model {
        model.induce(&self.support())
    }
}

impl From<Vec<WorldId>> for Retraction {
    fn from(images: Vec<WorldId>) -> Self {
        Self(images.into_boxed_slice())
    }
}
