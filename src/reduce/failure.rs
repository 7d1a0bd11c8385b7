/// Why a reducer gave up on a model.
///
/// Never fatal to exploration: the model is kept unreduced instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReductionFailure {
    /// The search step budget ran out.
    Exhausted { steps: usize },
    /// The wall-clock allowance ran out.
    Timeout { elapsed: std::time::Duration },
    /// The proposed map is not a retraction onto a submodel.
    Invalid,
}

impl std::fmt::Display for ReductionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhausted { steps } => write!(f, "gave up after {} search steps", steps),
            Self::Timeout { elapsed } => write!(f, "gave up after {:?}", elapsed),
            Self::Invalid => write!(f, "returned a map that is not a retraction"),
        }
    }
}

impl std::error::Error for ReductionFailure {}
