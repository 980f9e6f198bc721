//! UCT search driver for the summation problem.
//!
//! Runs a single search and reports the tree, plays a whole run by following
//! the recommendations, or evaluates the engine over many seeded trials.

mod evaluate;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use evaluate::EvaluationSummary;
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use uct_core::Domain;
use uct_mcts::{
    games::{SumState, Summation, SummationConfig},
    Mcts, Node, RandomRollout, SearchResult, UctConfig,
};

/// UCT Monte Carlo tree search on the summation problem.
#[derive(Parser)]
#[command(name = "uct")]
#[command(about = "Search, play and evaluate UCT on the summation problem")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search from the initial state and print the root's children.
    Search {
        #[command(flatten)]
        run: RunArgs,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Follow the recommendations until the process ends.
    Play {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Compare recommendations against uniformly drawn children.
    Evaluate {
        #[command(flatten)]
        run: RunArgs,

        /// Number of independent trials.
        #[arg(short, long, default_value = "100")]
        trials: u64,
    },
}

/// Options shared by every command. Flags override the config file.
#[derive(Args, Debug, Default)]
struct RunArgs {
    /// JSON file with `search` and `domain` sections.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Iterations per search.
    #[arg(short, long)]
    iterations: Option<usize>,

    /// UCB1 exploration constant used during descent.
    #[arg(long)]
    exploration: Option<f64>,

    /// Random seed for reproducibility.
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Number of rounds of the summation problem.
    #[arg(long)]
    rounds: Option<u32>,

    /// Increments available each round, comma separated.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    choices: Option<Vec<i64>>,

    /// Value the final sum should reach.
    #[arg(long, allow_hyphen_values = true)]
    target: Option<i64>,

    /// Value of the initial state.
    #[arg(long, allow_hyphen_values = true)]
    initial: Option<i64>,
}

/// Search and domain settings, as stored in a config file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub search: UctConfig,
    pub domain: SummationConfig,
}

impl RunConfig {
    fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Start from the config file (or defaults) and apply command-line overrides.
    fn from_args(args: &RunArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => {
                info!("loading config from {:?}", path);
                Self::load(path)?
            }
            None => Self::default(),
        };

        if let Some(iterations) = args.iterations {
            config.search.iterations = iterations;
        }
        if let Some(exploration) = args.exploration {
            config.search.exploration = exploration;
        }
        if let Some(rounds) = args.rounds {
            config.domain.max_rounds = rounds;
        }
        if let Some(choices) = &args.choices {
            config.domain.choices = choices.clone();
        }
        if let Some(target) = args.target {
            config.domain.target = target;
        }
        if let Some(initial) = args.initial {
            config.domain.initial_value = initial;
        }

        config.search.validate()?;
        config.domain.validate()?;
        if config.search.iterations < config.domain.choices.len() {
            warn!(
                "{} iterations cannot expand all {} children of the root",
                config.search.iterations,
                config.domain.choices.len()
            );
        }
        Ok(config)
    }

    fn mcts(&self, seed: u64) -> Mcts<Summation, RandomRollout<ChaCha8Rng>, ChaCha8Rng> {
        let rollout = RandomRollout::new(
            ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
            self.search.max_rollout_depth,
        );
        Mcts::new(self.search.clone(), rollout, ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Statistics of one node in a search report.
#[derive(Serialize, Debug)]
struct NodeReport {
    value: i64,
    round: u32,
    visit_count: u32,
    total_reward: f64,
    mean_reward: Option<f64>,
}

impl NodeReport {
    fn new(node: &Node<SumState>) -> Self {
        Self {
            value: node.state().value(),
            round: node.state().round(),
            visit_count: node.visit_count(),
            total_reward: node.total_reward(),
            mean_reward: node.stats().mean_reward(),
        }
    }
}

/// Search report: the root, the recommendation and every root child.
#[derive(Serialize, Debug)]
struct SearchReport {
    root: NodeReport,
    best: NodeReport,
    children: Vec<NodeReport>,
    tree_size: usize,
}

fn search_once(
    config: &RunConfig,
    seed: u64,
) -> Result<(SearchResult<SumState>, Mcts<Summation, RandomRollout<ChaCha8Rng>, ChaCha8Rng>)> {
    let game = Summation::new(config.domain.clone())?;
    let mut mcts = config.mcts(seed);
    let result = mcts
        .search(&game, game.initial_state())
        .context("Search failed")?;
    Ok((result, mcts))
}

/// Run the search command.
fn cmd_search(run: RunArgs, json: bool) -> Result<()> {
    let config = RunConfig::from_args(&run)?;
    let (result, mcts) = search_once(&config, run.seed)?;
    let tree = mcts.tree().context("Search produced no tree")?;

    if json {
        let report = SearchReport {
            root: NodeReport::new(tree.root()),
            best: NodeReport::new(tree.get(result.best)),
            children: tree
                .root()
                .children()
                .iter()
                .map(|&id| NodeReport::new(tree.get(id)))
                .collect(),
            tree_size: tree.len(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", tree.root());
    println!("{}", tree.get(result.best));
    println!();
    for &child in tree.root().children() {
        println!("{}", tree.get(child));
    }
    println!("\nTree size: {} nodes", tree.len());
    Ok(())
}

/// Run the play command.
fn cmd_play(run: RunArgs) -> Result<()> {
    let config = RunConfig::from_args(&run)?;
    let game = Summation::new(config.domain.clone())?;
    let mut mcts = config.mcts(run.seed);

    let mut state = game.initial_state();
    println!("Start: {}", state);
    while !game.is_terminal(&state) {
        let result = mcts
            .search(&game, state.clone())
            .with_context(|| format!("Search failed at {}", state))?;
        println!(
            "  {:>+3} -> {} (visits={}, mean reward={:.3})",
            result.state.value() - state.value(),
            result.state,
            result.visit_count,
            result.mean_reward
        );
        state = result.state;
    }

    let reward = game
        .reward(&state)
        .context("Terminal state has no reward")?;
    println!("\nFinal: {}", state);
    println!("Choices: {:?}", state.history());
    println!("Reward: {}", reward);
    Ok(())
}

/// Run the evaluate command.
fn cmd_evaluate(run: RunArgs, trials: u64) -> Result<()> {
    let config = RunConfig::from_args(&run)?;

    println!(
        "Evaluating {} trials with {} iterations/search",
        trials, config.search.iterations
    );
    println!("Seed: {}", run.seed);

    let start = Instant::now();
    let outcomes = evaluate::run_trials(&config, trials, run.seed)?;
    let summary = EvaluationSummary::from_outcomes(&outcomes);
    let elapsed = start.elapsed();

    println!("\nCompleted in {:.2}s", elapsed.as_secs_f64());
    println!("================================================");
    println!("Recommendation closer:  {}", summary.wins);
    println!("Equal distance:         {}", summary.ties);
    println!("Random child closer:    {}", summary.losses);
    println!("------------------------------------------------");
    println!(
        "Mean distance to target: recommended {:.3}, random {:.3}",
        summary.mean_recommended_distance, summary.mean_random_distance
    );
    println!("At least as close: {:.1}%", summary.not_worse_rate() * 100.0);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { run, json } => cmd_search(run, json),
        Commands::Play { run } => cmd_play(run),
        Commands::Evaluate { run, trials } => cmd_evaluate(run, trials),
    }
}
