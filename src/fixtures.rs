//! Small games shared by tests and benchmarks.

/// A sees the state, B never does. Play alternates between two states.
pub const SWAP: &str = "\
actions
a
b

locations
0 = zero
1 = one

initial 0

observations
0 | 1
0, 1

transitions
0 0,1 1
1 0,1 0
";

/// A secretly picks left or right, B sees neither A's action nor which
/// side play is on. Both sides lead back to the start.
pub const HIDDEN: &str = "\
actions
x, y
z

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
1 1,2 0
2 0,2 0
2 1,2 0
";

/// As [`HIDDEN`], but play ends after the secret pick.
pub const TERMINAL: &str = "\
actions
x, y
z

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
";

/// A's two actions lead to the same place; B cannot tell which was played.
pub const FORK: &str = "\
actions
x, y
z

locations
0 = start
1 = end

initial 0

observations
0 | 1
0 | 1

transitions
0 0,2 1
0 1,2 1
";

/// Nobody observes anything. Play stays put until A plays a while B plays c.
pub const BLIND: &str = "\
actions
a, b
c, d

locations
0 = here
1 = there

initial 0

observations
0, 1
0, 1

transitions
0 0,2 1
0 0,3 0
0 1,2 0
0 1,3 0
";

pub fn game(text: &str) -> crate::Game {
    text.parse().expect("fixture parses")
}
