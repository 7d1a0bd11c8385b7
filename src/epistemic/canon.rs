use crate::*;

impl Model {
    /// Canonical signature and the model relabeled into canonical order.
    ///
    /// Colors start from (actual, state) and are refined by the multiset of
    /// colors each agent confuses a world with. While ties remain, each
    /// member of the first tied cell is individualized in turn and the
    /// lexicographically least leaf encoding wins. Members that a plain
    /// swap maps onto an already tried member lead to identical subtrees
    /// and are skipped.
    pub fn canonize(&self) -> (Signature, Self) {
        let canon = Canon::new(self);
        let (code, order) = canon.search(canon.seed());
        (Signature::from(code), self.induce(&order))
    }
}

struct Canon<'m> {
    model: &'m Model,
    classes: Vec<Vec<Vec<WorldId>>>,
}

type Leaf = (Vec<u32>, Vec<WorldId>);

impl<'m> Canon<'m> {
    fn new(model: &'m Model) -> Self {
        Self {
            model,
            classes: model.relations().iter().map(Relation::classes).collect(),
        }
    }

    fn members(&self, agent: AgentId, world: WorldId) -> &[WorldId] {
        &self.classes[agent][self.model.relation(agent).class(world)]
    }

    fn seed(&self) -> Vec<u32> {
        let actual = self.model.actual();
        rank(
            &(0..self.model.len())
                .map(|w| (w != actual, self.model.state(w)))
                .collect::<Vec<_>>(),
        )
    }

    fn refine(&self, mut colors: Vec<u32>) -> Vec<u32> {
        loop {
            let keys = (0..self.model.len())
                .map(|w| {
                    let neighborhoods = (0..self.model.agents())
                        .map(|agent| {
                            let mut seen = self
                                .members(agent, w)
                                .iter()
                                .map(|&v| colors[v])
                                .collect::<Vec<_>>();
                            seen.sort_unstable();
                            seen
                        })
                        .collect::<Vec<_>>();
                    (colors[w], neighborhoods)
                })
                .collect::<Vec<_>>();
            let next = rank(&keys);
            if cells(&next) == cells(&colors) {
                return next;
            }
            colors = next;
        }
    }

    fn individualize(&self, colors: &[u32], world: WorldId) -> Vec<u32> {
        rank(
            &colors
                .iter()
                .enumerate()
                .map(|(w, &c)| (c, w != world))
                .collect::<Vec<_>>(),
        )
    }

    /// Transposing two equally colored worlds is an automorphism when, for
    /// every agent, they share a class or both sit alone in theirs.
    fn swappable(&self, a: WorldId, b: WorldId) -> bool {
        (0..self.model.agents()).all(|agent| {
            let relation = self.model.relation(agent);
            relation.related(a, b)
                || (self.members(agent, a).len() == 1 && self.members(agent, b).len() == 1)
        })
    }

    fn search(&self, colors: Vec<u32>) -> Leaf {
        let colors = self.refine(colors);
        let n = self.model.len();
        let k = cells(&colors);
        if k == n {
            return self.leaf(&colors);
        }
        let mut sizes = vec![0usize; k];
        for &c in colors.iter() {
            sizes[c as usize] += 1;
        }
        let Some(target) = (0..k).find(|&c| sizes[c] > 1) else {
            return self.leaf(&colors);
        };
        let mut tried = Vec::<WorldId>::new();
        let mut best = None::<Leaf>;
        for world in (0..n).filter(|&w| colors[w] as usize == target) {
            if tried.iter().any(|&t| self.swappable(t, world)) {
                continue;
            }
            tried.push(world);
            let leaf = self.search(self.individualize(&colors, world));
            if best.as_ref().is_none_or(|(code, _)| leaf.0 < *code) {
                best = Some(leaf);
            }
        }
        best.unwrap_or_else(|| self.leaf(&colors))
    }

    fn leaf(&self, colors: &[u32]) -> Leaf {
        let mut order = (0..self.model.len()).collect::<Vec<_>>();
        order.sort_by_key(|&w| (colors[w], w));
        (self.encode(&order), order)
    }

    fn encode(&self, order: &[WorldId]) -> Vec<u32> {
        let model = self.model;
        let mut code = Vec::with_capacity(3 + order.len() * (1 + model.agents()));
        code.push(order.len() as u32);
        code.push(model.agents() as u32);
        code.push(order.iter().position(|&w| w == model.actual()).unwrap_or(0) as u32);
        code.extend(order.iter().map(|&w| model.state(w) as u32));
        for relation in model.relations() {
            code.extend_from_slice(relation.restrict(order).labels());
        }
        code
    }
}

/// Dense ranks of keys in sorted order.
pub(super) fn rank<K: Ord>(keys: &[K]) -> Vec<u32> {
    let mut sorted = keys.iter().collect::<Vec<_>>();
    sorted.sort();
    sorted.dedup();
    keys.iter()
        .map(|k| sorted.binary_search(&k).unwrap_or(0) as u32)
        .collect()
}

pub(super) fn cells(colors: &[u32]) -> usize {
    colors.iter().max().map_or(0, |c| *c as usize + 1)
}
