//! Plain-text game descriptions.
//!
//! Sections are separated by blank lines and open with a header line:
//!
//! ```text
//! actions
//! x, y          one alphabet per agent
//! z
//!
//! locations
//! 0 = start     indices must run 0..n
//! 1 = left
//! 2 = right
//!
//! initial 0
//!
//! observations
//! 0 | 1 | 2     one partition per agent
//! 0 | 1, 2
//!
//! transitions
//! 0 0,2 1       source, joint action, destination
//! ```
//!
//! Actions in a transition are indices into the agents' alphabets laid end
//! to end, so above `x`, `y`, `z` are 0, 1, 2.
use crate::*;
use std::collections::BTreeMap;
use std::path::Path;

/// Read and validate a game description from disk.
pub fn load(path: impl AsRef<Path>) -> Result<Game, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    log::debug!("loading game from {}", path.display());
    text.parse()
}

impl std::str::FromStr for Game {
    type Err = LoadError;
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = Lines::new(text);
        let alphabets = lines
            .section("actions")?
            .into_iter()
            .map(|(_, line)| {
                line.split(',')
                    .map(unquote)
                    .filter(|name| !name.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let states = locations(lines.section("locations")?)?;
        let initial = initial(lines.line("initial")?)?;
        let observations = lines
            .section("observations")?
            .into_iter()
            .map(|(number, line)| partition(number, line))
            .collect::<Result<Vec<_>, _>>()?;
        let transitions = lines.section("transitions")?;

        if alphabets.is_empty() {
            return Err(LoadError::NoAgents);
        }
        if alphabets.len() != observations.len() {
            return Err(LoadError::AgentCount {
                alphabets: alphabets.len(),
                partitions: observations.len(),
            });
        }
        let flat = alphabets.concat();
        let agents = alphabets
            .into_iter()
            .zip(observations.iter())
            .enumerate()
            .map(|(agent, (actions, classes))| {
                Partition::new(agent, states.len(), classes).map(|p| Agent::new(actions, p))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let transitions = transitions
            .into_iter()
            .map(|(number, line)| transition(number, line, &agents, &flat))
            .collect::<Result<Vec<_>, _>>()?;
        Game::new(agents, states, initial, transitions)
    }
}

/// Line cursor that tracks 1-based line numbers.
struct Lines<'a> {
    inner: std::iter::Peekable<std::iter::Enumerate<std::str::Lines<'a>>>,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate().peekable(),
        }
    }
    fn skip_blank(&mut self) {
        while self.inner.next_if(|(_, line)| line.trim().is_empty()).is_some() {}
    }
    /// The next non-blank line.
    fn line(&mut self, section: &'static str) -> Result<(usize, &'a str), LoadError> {
        self.skip_blank();
        self.inner
            .next()
            .map(|(i, line)| (i + 1, line.trim()))
            .ok_or(LoadError::Missing { section })
    }
    /// The lines below the next header, up to a blank line.
    fn section(&mut self, section: &'static str) -> Result<Vec<(usize, &'a str)>, LoadError> {
        self.line(section)?;
        let mut body = Vec::new();
        while let Some((i, line)) = self.inner.next_if(|(_, line)| !line.trim().is_empty()) {
            body.push((i + 1, line.trim()));
        }
        Ok(body)
    }
}

fn unquote(word: &str) -> &str {
    word.trim().trim_matches(|c| c == '"' || c == '\'')
}

fn number(line: usize, word: &str) -> Result<usize, LoadError> {
    word.trim().parse().map_err(|_| LoadError::Syntax {
        line,
        reason: format!("expected a number, found {:?}", word.trim()),
    })
}

fn locations(body: Vec<(usize, &str)>) -> Result<Vec<State>, LoadError> {
    let mut named = BTreeMap::new();
    for (line, text) in body {
        let (index, name) = text.split_once('=').ok_or_else(|| LoadError::Syntax {
            line,
            reason: "expected `index = name`".to_string(),
        })?;
        let index = number(line, index)?;
        if named.insert(index, unquote(name).to_string()).is_some() {
            return Err(LoadError::Locations { index });
        }
    }
    named
        .into_iter()
        .enumerate()
        .map(|(expected, (index, name))| match expected == index {
            true => Ok(State::new(index, name)),
            false => Err(LoadError::Locations { index }),
        })
        .collect()
}

fn initial((line, text): (usize, &str)) -> Result<StateId, LoadError> {
    let last = text.split_whitespace().last().ok_or_else(|| LoadError::Syntax {
        line,
        reason: "expected the initial state".to_string(),
    })?;
    number(line, last)
}

fn partition(line: usize, text: &str) -> Result<Vec<Vec<StateId>>, LoadError> {
    text.split('|')
        .map(|class| {
            class
                .split(',')
                .filter(|word| !word.trim().is_empty())
                .map(|word| number(line, word))
                .collect()
        })
        .collect()
}

fn transition(
    line: usize,
    text: &str,
    agents: &[Agent],
    flat: &[String],
) -> Result<(StateId, JointAction, StateId), LoadError> {
    let words = text.split_whitespace().collect::<Vec<_>>();
    let [from, actions, into] = words[..] else {
        return Err(LoadError::Syntax {
            line,
            reason: "expected `source action,action,... destination`".to_string(),
        });
    };
    let indices = actions
        .split(',')
        .map(|word| number(line, word))
        .collect::<Result<Vec<_>, _>>()?;
    if indices.len() != agents.len() {
        return Err(LoadError::Arity {
            state: number(line, from)?,
            expected: agents.len(),
            found: indices.len(),
        });
    }
    let action = indices
        .into_iter()
        .zip(agents)
        .enumerate()
        .map(|(id, (index, agent))| {
            let name = flat.get(index).ok_or_else(|| LoadError::UnknownAction {
                agent: id,
                action: index.to_string(),
            })?;
            agent.find(name).ok_or_else(|| LoadError::UnknownAction {
                agent: id,
                action: name.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((number(line, from)?, JointAction::from(action), number(line, into)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIDDEN: &str = "\
actions
'x', 'y'
'z'

locations
0 = start
1 = left
2 = right

initial 0

observations
0 | 1 | 2
0 | 1, 2

transitions
0 0,2 1
0 1,2 2
1 0,2 0
";

    #[test]
    fn parses_a_game() {
        let game = HIDDEN.parse::<Game>().unwrap();
        assert!(game.agents().len() == 2);
        assert!(game.agent(0).actions() == ["x", "y"]);
        assert!(game.agent(1).actions() == ["z"]);
        assert!(game.state(2).label() == "right");
        assert!(game.initial() == 0);
        assert!(game.next(0, &JointAction::from([1, 0])) == Some(2));
        assert!(game.next(1, &JointAction::from([0, 0])) == Some(0));
        assert!(game.indistinguishable(1, 1, 2));
        assert!(!game.indistinguishable(0, 1, 2));
        assert!(game.n_moves() == 3);
    }

    #[test]
    fn action_outside_own_alphabet() {
        let text = HIDDEN.replace("0 1,2 2", "0 2,2 2");
        assert!(text.parse::<Game>() == Err(LoadError::UnknownAction { agent: 0, action: "z".into() }));
        let text = HIDDEN.replace("0 1,2 2", "0 1,9 2");
        assert!(text.parse::<Game>() == Err(LoadError::UnknownAction { agent: 1, action: "9".into() }));
    }

    #[test]
    fn observation_must_cover() {
        let text = HIDDEN.replace("0 | 1, 2", "0 | 1");
        assert!(text.parse::<Game>() == Err(LoadError::Uncovered { agent: 1, state: 2 }));
    }

    #[test]
    fn locations_must_be_contiguous() {
        let text = HIDDEN.replace("2 = right", "3 = right");
        assert!(text.parse::<Game>() == Err(LoadError::Locations { index: 3 }));
    }

    #[test]
    fn conflicting_transitions() {
        let text = format!("{}0 0,2 2\n", HIDDEN);
        assert!(matches!(text.parse::<Game>(), Err(LoadError::Conflict { state: 0, .. })));
    }

    #[test]
    fn malformed_lines() {
        let text = HIDDEN.replace("1 0,2 0", "1 0,2");
        assert!(matches!(text.parse::<Game>(), Err(LoadError::Syntax { line: 19, .. })));
        let text = HIDDEN.replace("initial 0", "initial zero");
        assert!(matches!(text.parse::<Game>(), Err(LoadError::Syntax { line: 10, .. })));
    }

    #[test]
    fn truncated_input() {
        let text = &HIDDEN[..HIDDEN.find("observations").unwrap()];
        assert!(text.parse::<Game>() == Err(LoadError::Missing { section: "observations" }));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(load("/nonexistent/game.txt"), Err(LoadError::Io { .. })));
    }
}
