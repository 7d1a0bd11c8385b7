use crate::*;
use std::collections::HashMap;

/// Every context met during exploration, each stored once.
///
/// Ids are handed out in insertion order and never reused.
#[derive(Debug, Default)]
pub struct Arena {
    contexts: Vec<Context>,
    index: HashMap<Context, ContextId>,
}

impl Arena {
    /// Id of the context, and whether it was new.
    pub fn enqueue(&mut self, context: Context) -> (ContextId, bool) {
        match self.index.get(&context) {
            Some(&id) => (id, false),
            None => {
                let id = self.contexts.len();
                self.index.insert(context.clone(), id);
                self.contexts.push(context);
                (id, true)
            }
        }
    }
    pub fn get(&self, id: ContextId) -> &Context {
        &self.contexts[id]
    }
    pub fn len(&self) -> usize {
        self.contexts.len()
    }
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structurally_equal_contexts_share_an_id() {
        let mut arena = Arena::default();
        let a = Context::from(Model::new(vec![0, 1], vec![Relation::complete(2)], 0));
        let b = Context::from(Model::new(vec![0, 1], vec![Relation::complete(2)], 1));
        assert!(arena.enqueue(a.clone()) == (0, true));
        assert!(arena.enqueue(b) == (1, true));
        assert!(arena.enqueue(a) == (0, false));
        assert!(arena.len() == 2);
    }
}
