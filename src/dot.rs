//! Graphviz renderings of games, unfoldings and models.
use crate::*;
use std::collections::BTreeMap;

/// Line styles and colors cycled through per agent.
const STYLES: [&str; 3] = ["dashed", "dotted", "bold"];
const COLORS: [&str; 4] = ["red", "blue", "darkgreen", "purple4"];

fn style(agent: AgentId) -> String {
    format!(
        "style={}, color={}",
        STYLES[agent % STYLES.len()],
        COLORS[agent % COLORS.len()]
    )
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Sorted names joined by commas, broken into roughly square blocks.
/// A lone group of moves out of a node carries no information and is
/// drawn as ⊥.
fn label(mut names: Vec<String>, alone: bool) -> String {
    if alone {
        return "⊥".to_string();
    }
    names.sort();
    let wrap = (names.len() as f64).sqrt().ceil().max(1.0) as usize;
    let mut label = String::new();
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            label.push(',');
            label.push(if i % wrap == 0 { '\n' } else { ' ' });
        }
        label.push_str(name);
    }
    label
}

/// Edges grouped by endpoints, with their action names.
fn grouped(
    edges: impl Iterator<Item = (usize, String, usize)>,
) -> BTreeMap<(usize, usize), Vec<String>> {
    let mut groups = BTreeMap::<(usize, usize), Vec<String>>::new();
    for (from, name, into) in edges {
        groups.entry((from, into)).or_default().push(name);
    }
    groups
}

fn edges(out: &mut String, groups: BTreeMap<(usize, usize), Vec<String>>) {
    let mut fanout = BTreeMap::<usize, usize>::new();
    for &(from, _) in groups.keys() {
        *fanout.entry(from).or_default() += 1;
    }
    for ((from, into), names) in groups {
        let alone = fanout.get(&from) == Some(&1);
        out.push_str(&format!(
            "  {} -> {} [label=\"{}\"];\n",
            from,
            into,
            escape(&label(names, alone))
        ));
    }
}

/// The input game with its moves and every agent's indistinguishability.
pub fn game_dot(game: &Game) -> String {
    let mut out = String::from("digraph game {\n");
    out.push_str("  hidden_initial [shape=none, label=\"\"];\n");
    for state in game.states() {
        out.push_str(&format!("  {} [label=\"{}\"];\n", state.id(), escape(state.label())));
    }
    out.push_str(&format!("  hidden_initial -> {};\n", game.initial()));
    let moves = game.states().iter().flat_map(|state| {
        game.moves(state.id())
            .map(move |(action, into)| (state.id(), action.named(game), into))
    });
    edges(&mut out, grouped(moves));
    for (agent, player) in game.agents().iter().enumerate() {
        for class in player.partition().classes() {
            for (i, &a) in class.iter().enumerate() {
                for &b in &class[i + 1..] {
                    out.push_str(&format!(
                        "  {} -> {} [dir=none, constraint=false, {}];\n",
                        a,
                        b,
                        style(agent)
                    ));
                }
            }
        }
    }
    out.push_str("}\n");
    out
}

/// The unfolded game. Nodes show the game state and model size.
pub fn unfolded_dot(unfolded: &UnfoldedGame, game: &Game) -> String {
    let mut out = String::from("digraph unfolded {\n");
    out.push_str("  hidden_initial [shape=none, label=\"\"];\n");
    for state in unfolded.states() {
        out.push_str(&format!(
            "  {} [shape=box, label=\"{}\\n{} worlds{}\"];\n",
            state.id(),
            escape(game.state(state.state()).label()),
            state.model().len(),
            if state.degraded() { ", unreduced" } else { "" }
        ));
    }
    if !unfolded.is_empty() {
        out.push_str(&format!("  hidden_initial -> {};\n", unfolded.initial()));
    }
    let moves = unfolded
        .transitions()
        .map(|(from, action, into)| (from, action.named(game), into));
    edges(&mut out, grouped(moves));
    out.push_str("}\n");
    out
}

/// One epistemic model. The actual world is drawn doubled.
pub fn model_dot(model: &Model, game: &Game) -> String {
    let mut out = String::from("graph model {\n");
    for world in 0..model.len() {
        out.push_str(&format!(
            "  {} [label=\"{}\"{}];\n",
            world,
            escape(game.state(model.state(world)).label()),
            if world == model.actual() { ", peripheries=2" } else { "" }
        ));
    }
    for (agent, relation) in model.relations().iter().enumerate() {
        for (a, b) in relation.pairs() {
            out.push_str(&format!("  {} -- {} [{}];\n", a, b, style(agent)));
        }
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn labels_wrap_into_blocks() {
        let names = ["d", "a", "c", "b", "e"].map(String::from).to_vec();
        assert!(label(names, false) == "a, b, c,\nd, e");
        assert!(label(vec!["a".into()], true) == "⊥");
    }

    #[test]
    fn game_rendering() {
        let ref game = game(HIDDEN);
        let dot = game_dot(game);
        assert!(dot.starts_with("digraph game {"));
        assert!(dot.contains("hidden_initial -> 0;"));
        assert!(dot.contains("  2 [label=\"right\"];"));
        assert!(dot.contains("  0 -> 1 [label=\"(x,z)\"];"));
        assert!(dot.contains("  1 -> 0 [label=\"⊥\"];"));
        assert!(dot.contains("  1 -> 2 [dir=none, constraint=false, style=dotted, color=blue];"));
    }

    #[test]
    fn unfolded_rendering() {
        let ref game = game(HIDDEN);
        let unfolded = unfold(game, Config::default()).unwrap();
        let dot = unfolded_dot(&unfolded, game);
        assert!(dot.contains("  1 [shape=box, label=\"left\\n2 worlds\"];"));
        assert!(dot.contains("  2 -> 0 [label=\"⊥\"];"));
    }

    #[test]
    fn model_rendering() {
        let ref game = game(HIDDEN);
        let model = Model::new(
            vec![1, 2],
            vec![Relation::discrete(2), Relation::complete(2)],
            0,
        );
        let dot = model_dot(&model, game);
        assert!(dot.contains("  0 [label=\"left\", peripheries=2];"));
        assert!(dot.contains("  0 -- 1 [style=dotted, color=blue];"));
        assert!(!dot.contains("style=dashed"));
    }

    #[test]
    fn statements_sit_on_their_own_lines() {
        let ref game = game(BLIND);
        let unfolded = unfold(game, Config::default()).unwrap();
        for dot in [
            game_dot(game),
            unfolded_dot(&unfolded, game),
            model_dot(unfolded.state(0).model(), game),
        ] {
            let lines = dot.lines().collect::<Vec<_>>();
            assert!(dot.ends_with("}\n"));
            assert!(lines.first().is_some_and(|line| line.ends_with('{')));
            assert!(lines[1..lines.len() - 1].iter().all(|line| line.ends_with(';')));
        }
    }
}
