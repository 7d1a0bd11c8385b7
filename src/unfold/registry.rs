use crate::*;
use std::collections::HashMap;
use std::sync::Mutex;

/// Signature-keyed table of unfolded states.
///
/// Lookup and insertion happen under one lock, so of several workers
/// presenting the same signature exactly one registers it and the rest
/// receive its id.
#[derive(Debug, Default)]
pub struct Registry(Mutex<Table>);

#[derive(Debug, Default)]
struct Table {
    index: HashMap<Signature, UnfoldedId>,
    states: Vec<UnfoldedState>,
}

impl Registry {
    /// Id of the state with this signature, and whether this call created it.
    pub fn intern(
        &self,
        signature: Signature,
        model: Model,
        degraded: bool,
    ) -> Result<(UnfoldedId, bool), Violation> {
        let mut table = self.0.lock().map_err(|_| Violation::Poisoned)?;
        if let Some(&id) = table.index.get(&signature) {
            return match table.states[id].model() == &model {
                true => Ok((id, false)),
                false => Err(Violation::Collision { signature, state: id }),
            };
        }
        let id = table.states.len();
        table.index.insert(signature.clone(), id);
        table
            .states
            .push(UnfoldedState::new(id, signature, model, degraded));
        Ok((id, true))
    }
    pub fn len(&self) -> Result<usize, Violation> {
        self.0
            .lock()
            .map(|table| table.states.len())
            .map_err(|_| Violation::Poisoned)
    }
    /// Registered states in id order.
    pub fn into_states(self) -> Result<Vec<UnfoldedState>, Violation> {
        self.0
            .into_inner()
            .map(|table| table.states)
            .map_err(|_| Violation::Poisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(state: StateId) -> (Signature, Model) {
        Model::singleton(state, 1).canonize()
    }

    #[test]
    fn insert_if_absent() {
        let registry = Registry::default();
        let (signature, model) = entry(3);
        assert!(registry.intern(signature.clone(), model.clone(), false) == Ok((0, true)));
        assert!(registry.intern(signature, model, false) == Ok((0, false)));
        let (signature, model) = entry(4);
        assert!(registry.intern(signature, model, false) == Ok((1, true)));
        assert!(registry.len() == Ok(2));
    }

    #[test]
    fn collisions_are_reported() {
        let registry = Registry::default();
        let (signature, model) = entry(3);
        let (_, other) = entry(4);
        registry.intern(signature.clone(), model, false).unwrap();
        assert!(matches!(
            registry.intern(signature, other, false),
            Err(Violation::Collision { state: 0, .. })
        ));
    }

    #[test]
    fn concurrent_interning_registers_once() {
        let registry = Registry::default();
        let (signature, model) = entry(0);
        let fresh = std::thread::scope(|scope| {
            (0..8)
                .map(|_| scope.spawn(|| registry.intern(signature.clone(), model.clone(), false)))
                .collect::<Vec<_>>()
                .into_iter()
                .map(|handle| handle.join().unwrap().unwrap())
                .filter(|(_, fresh)| *fresh)
                .count()
        });
        assert!(fresh == 1);
        assert!(registry.len() == Ok(1));
    }

    #[test]
    fn poisoned_registry_refuses_reads_and_writes() {
        let registry = Registry::default();
        let (signature, model) = entry(0);
        registry.intern(signature.clone(), model.clone(), false).unwrap();
        std::thread::scope(|scope| {
            let crashed = scope
                .spawn(|| {
                    let _table = registry.0.lock().unwrap();
                    panic!("worker died holding the table");
                })
                .join();
            assert!(crashed.is_err());
        });
        assert!(registry.len() == Err(Violation::Poisoned));
        assert!(registry.intern(signature, model, false) == Err(Violation::Poisoned));
        assert!(matches!(registry.into_states(), Err(Violation::Poisoned)));
    }
}
