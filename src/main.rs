use search_rust::config::{Cli, Config};
use search_rust::heuristic::{manhattan, misplaced};
use search_rust::problem::Problem;
use search_rust::puzzle::{Board, EightPuzzle, Move};
use search_rust::scenario::{scramble, Scenario};
use search_rust::search::{AStar, Bfs, Dfs, Greedy, IdaStar, Search, SearchResult, Ucs};
use search_rust::stat::{print_comparison, SolveReport};

use anyhow::{bail, Context};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();
    let cli = Cli::parse();
    let config = Config::new(&cli)?;
    config.validate()?;

    let problem = resolve_problem(&config)?;
    if !problem.is_solvable() {
        bail!(
            "board is unsolvable: its permutation parity differs from the goal's\n{}",
            problem.initial_state()
        );
    }
    info!("Initial board:\n{}", problem.initial_state());

    let mut reports = Vec::new();
    for algorithm in config.algorithms() {
        let result = run_algorithm(algorithm, &config, &problem)?;
        let report = SolveReport::new(algorithm, result);
        report.print();
        if config.show_steps {
            report.print_steps();
        }
        reports.push(report);
    }

    if reports.len() > 1 {
        print_comparison(&reports);
    }
    if config.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}

fn resolve_problem(config: &Config) -> anyhow::Result<EightPuzzle> {
    if let Some(path) = &config.scenario_path {
        let scenario = Scenario::load_from_file(path)?;
        let spec = match &config.board {
            Some(name) => scenario
                .find(name)
                .with_context(|| format!("no board named {name:?} in {path}"))?,
            None => scenario
                .boards
                .first()
                .with_context(|| format!("scenario {path} has no boards"))?,
        };
        Ok(spec.to_problem())
    } else if let Some(initial) = config.initial {
        Ok(EightPuzzle::with_goal(initial, config.goal))
    } else if let Some(steps) = config.scramble {
        let mut rng = StdRng::seed_from_u64(config.seed as u64);
        let initial = scramble(config.goal, steps, &mut rng);
        Ok(EightPuzzle::with_goal(initial, config.goal))
    } else {
        // validate() guarantees one board source was given.
        bail!("no initial board")
    }
}

fn run_algorithm(
    algorithm: &str,
    config: &Config,
    problem: &EightPuzzle,
) -> anyhow::Result<SearchResult<Board, Move>> {
    let heuristic = || heuristic_fn(&config.heuristic, problem.goal());
    let result = match algorithm {
        "bfs" => Bfs::new().search(problem)?,
        "dfs" => match config.depth_limit {
            Some(limit) => Dfs::bounded(limit).search(problem)?,
            None => Dfs::new().search(problem)?,
        },
        "ucs" => Ucs::new().search(problem)?,
        "greedy" => Greedy::new(heuristic()).search(problem)?,
        "astar" => AStar::new(heuristic()).search(problem)?,
        "idastar" => {
            let mut search = IdaStar::new(heuristic());
            if let Some(max_bound) = config.max_bound {
                search = search.with_max_bound(max_bound);
            }
            search.search(problem)?
        }
        _ => unreachable!(),
    };
    Ok(result)
}

fn heuristic_fn(name: &str, goal: Board) -> Box<dyn Fn(&Board) -> f64> {
    match name {
        "manhattan" => Box::new(manhattan(goal)),
        "misplaced" => Box::new(misplaced(goal)),
        _ => unreachable!(),
    }
}
