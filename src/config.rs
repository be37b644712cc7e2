use anyhow::{anyhow, Context};
use clap::Parser;

use crate::puzzle::Board;

pub const ALGORITHMS: [&str; 6] = ["bfs", "dfs", "ucs", "greedy", "astar", "idastar"];
pub const HEURISTICS: [&str; 2] = ["manhattan", "misplaced"];

#[derive(Parser, Debug)]
#[command(
    name = "Rust Search",
    about = "Classical state-space search over sliding-tile puzzles.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to the YAML scenario file")]
    pub scenario_path: Option<String>,

    #[arg(
        long,
        help = "Name of the board to solve from the scenario file (defaults to the first)"
    )]
    pub board: Option<String>,

    #[arg(
        long,
        help = "Initial board as nine comma-separated tiles, 0 for the blank"
    )]
    pub initial: Option<String>,

    #[arg(long, help = "Goal board as nine comma-separated tiles")]
    pub goal: Option<String>,

    #[arg(
        long,
        help = "Generate the initial board by scrambling the goal this many moves"
    )]
    pub scramble: Option<usize>,

    #[arg(
        long,
        help = "Seed for the random number generator",
        default_value_t = 0
    )]
    pub seed: usize,

    #[arg(
        long,
        help = "Search algorithm to run, or 'all' for a comparison",
        default_value = "astar"
    )]
    pub algorithm: String,

    #[arg(
        long,
        help = "Heuristic for the informed algorithms",
        default_value = "manhattan"
    )]
    pub heuristic: String,

    #[arg(long, help = "Depth limit for dfs")]
    pub depth_limit: Option<usize>,

    #[arg(long, help = "Bound ceiling for idastar")]
    pub max_bound: Option<f64>,

    #[arg(
        long,
        help = "Print the board after every move of the solution",
        default_value_t = false
    )]
    pub show_steps: bool,

    #[arg(
        long,
        help = "Emit the result report as JSON on stdout",
        default_value_t = false
    )]
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub scenario_path: Option<String>,
    pub board: Option<String>,
    pub initial: Option<Board>,
    pub goal: Board,
    pub scramble: Option<usize>,
    pub seed: usize,
    pub algorithm: String,
    pub heuristic: String,
    pub depth_limit: Option<usize>,
    pub max_bound: Option<f64>,
    pub show_steps: bool,
    pub json: bool,
}

impl Config {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let initial = cli
            .initial
            .as_deref()
            .map(parse_board)
            .transpose()
            .context("invalid --initial board")?;
        let goal = cli
            .goal
            .as_deref()
            .map(parse_board)
            .transpose()
            .context("invalid --goal board")?
            .unwrap_or_else(Board::goal);

        Ok(Self {
            scenario_path: cli.scenario_path.clone(),
            board: cli.board.clone(),
            initial,
            goal,
            scramble: cli.scramble,
            seed: cli.seed,
            algorithm: cli.algorithm.clone(),
            heuristic: cli.heuristic.clone(),
            depth_limit: cli.depth_limit,
            max_bound: cli.max_bound,
            show_steps: cli.show_steps,
            json: cli.json,
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.algorithm != "all" && !ALGORITHMS.contains(&self.algorithm.as_str()) {
            return Err(anyhow!(
                "Unknown algorithm {:?}, expected one of {:?} or \"all\"",
                self.algorithm,
                ALGORITHMS
            ));
        }

        if !HEURISTICS.contains(&self.heuristic.as_str()) {
            return Err(anyhow!(
                "Unknown heuristic {:?}, expected one of {:?}",
                self.heuristic,
                HEURISTICS
            ));
        }

        let sources =
            [self.scenario_path.is_some(), self.initial.is_some(), self.scramble.is_some()]
                .iter()
                .filter(|&&given| given)
                .count();
        if sources == 0 {
            return Err(anyhow!(
                "No initial board: pass --scenario-path, --initial, or --scramble"
            ));
        }
        if sources > 1 {
            return Err(anyhow!(
                "--scenario-path, --initial, and --scramble are mutually exclusive"
            ));
        }

        if self.depth_limit.is_some() && self.algorithm != "dfs" && self.algorithm != "all" {
            return Err(anyhow!("--depth-limit only applies to dfs"));
        }

        if let Some(max_bound) = self.max_bound {
            if self.algorithm != "idastar" && self.algorithm != "all" {
                return Err(anyhow!("--max-bound only applies to idastar"));
            }
            if max_bound < 0.0 {
                return Err(anyhow!(
                    "--max-bound must be non-negative, got {}",
                    max_bound
                ));
            }
        }

        Ok(())
    }

    /// The strategies this run covers: the named one, or every one of them.
    pub fn algorithms(&self) -> Vec<&str> {
        if self.algorithm == "all" {
            ALGORITHMS.to_vec()
        } else {
            vec![self.algorithm.as_str()]
        }
    }
}

fn parse_board(text: &str) -> anyhow::Result<Board> {
    let tiles: Vec<u8> = text
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("board {text:?} has non-numeric tiles"))?;
    let tiles: [u8; 9] = tiles
        .try_into()
        .map_err(|bad: Vec<u8>| anyhow!("expected 9 tiles, got {}", bad.len()))?;
    Board::new(tiles).map_err(|err| anyhow!(err))
}
