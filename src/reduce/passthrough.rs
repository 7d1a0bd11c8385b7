use crate::*;

/// Leaves every model as it is. Used when core reduction is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Reducer for Passthrough {
    fn reduce(&self, model: &Model) -> Result<Retraction, ReductionFailure> {
        Ok(Retraction::identity(model.len()))
    }
}
