//! Unfold Binary
//!
//! Reads a game description, explores its epistemic unfolding, and writes
//! Graphviz renderings of the input, the unfolding, and every model.

use anyhow::Context as _;
use clap::Parser;
use epunfold::*;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Epistemic unfolding of imperfect-information games", long_about = None)]
struct Args {
    /// Game description to unfold.
    #[arg(required = true)]
    file: PathBuf,
    /// Directory receiving the rendered graphs.
    #[arg(short = 'd', long = "dir", default_value = "main")]
    dir: PathBuf,
    /// Log every registered state.
    #[arg(short, long)]
    verbose: bool,
    /// Skip homomorphic core reduction. Unfolded histories may then overflow --limit.
    #[arg(short = 'c', long = "skip-core")]
    skip_core: bool,
    /// Search steps one core reduction may spend.
    #[arg(long, default_value_t = REDUCTION_BUDGET)]
    budget: usize,
    /// Milliseconds one core reduction may spend.
    #[arg(long = "timeout-ms")]
    timeout_ms: Option<u64>,
    /// Cap on explored contexts and unfolded states.
    #[arg(long, default_value_t = EXPLORATION_LIMIT)]
    limit: usize,
    /// Levels of nested knowledge kept in each model.
    #[arg(long)]
    depth: Option<usize>,
    /// Whether worlds are game states or histories of play.
    #[arg(long, value_enum, default_value_t = Folding::States)]
    folding: Folding,
    /// What agents see of each other's moves when histories are unfolded.
    #[arg(long, value_enum, default_value_t = Visibility::Own)]
    visibility: Visibility,
    #[arg(long, value_enum, default_value_t = Equivalence::Isomorphism)]
    equivalence: Equivalence,
    /// Also write the unfolding as JSON.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            reduce: !self.skip_core,
            budget: Some(self.budget),
            timeout: self.timeout_ms.map(Duration::from_millis),
            limit: Some(self.limit),
            depth: self.depth,
            folding: self.folding,
            visibility: self.visibility,
            equivalence: self.equivalence,
        }
    }
}

fn write(path: PathBuf, contents: String) -> anyhow::Result<()> {
    std::fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log(match args.verbose {
        true => log::LevelFilter::Debug,
        false => log::LevelFilter::Info,
    })?;
    let game = load(&args.file)?;
    let models = args.dir.join("models");
    std::fs::create_dir_all(&models)
        .with_context(|| format!("creating {}", models.display()))?;
    write(args.dir.join("input_game.dot"), game_dot(&game))?;

    let unfolded = unfold(&game, args.config())?;
    write(args.dir.join("unfolded_game.dot"), unfolded_dot(&unfolded, &game))?;
    for state in unfolded.states() {
        if args.verbose {
            log::debug!("state {}\n{}", state.id(), state.model().describe(&game));
        }
        write(
            models.join(format!("model{}.dot", state.id())),
            model_dot(state.model(), &game),
        )?;
    }
    if args.json {
        write(
            args.dir.join("unfolded_game.json"),
            serde_json::to_string_pretty(&unfolded)?,
        )?;
    }
    log::info!(
        "{} unfolded states written to {}",
        unfolded.len(),
        args.dir.display()
    );
    Ok(())
}
