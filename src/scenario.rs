use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use rand::prelude::*;
use serde::Deserialize;
use tracing::info;

use crate::problem::Problem;
use crate::puzzle::{Board, EightPuzzle, Move};

/// One named board instance from a scenario file.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BoardSpec {
    pub name: String,
    pub initial: Board,
    pub goal: Option<Board>,
}

impl BoardSpec {
    pub fn to_problem(&self) -> EightPuzzle {
        match self.goal {
            Some(goal) => EightPuzzle::with_goal(self.initial, goal),
            None => EightPuzzle::new(self.initial),
        }
    }
}

/// A YAML scenario: a list of named boards to solve.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub boards: Vec<BoardSpec>,
}

impl Scenario {
    pub fn load_from_file(path: &str) -> Result<Scenario> {
        let file = File::open(path).with_context(|| format!("failed to open scenario {path}"))?;
        let reader = BufReader::new(file);
        let scenario: Scenario = serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse scenario {path}"))?;
        info!("Loaded scenario with {} boards", scenario.boards.len());
        Ok(scenario)
    }

    pub fn find(&self, name: &str) -> Option<&BoardSpec> {
        self.boards.iter().find(|spec| spec.name == name)
    }
}

/// Walk `steps` random legal moves backwards from `goal`. The result is
/// solvable by construction, and a fixed seed reproduces it.
pub fn scramble<R: Rng + ?Sized>(goal: Board, steps: usize, rng: &mut R) -> Board {
    let problem = EightPuzzle::with_goal(goal, goal);
    let mut board = goal;
    let mut previous: Option<Move> = None;

    for _ in 0..steps {
        let undo = previous.map(opposite);
        let candidates: Vec<Move> = problem
            .actions(&board)
            .into_iter()
            .filter(|&action| Some(action) != undo)
            .collect();
        // A 3x3 board always has at least one non-undo move.
        let Some(&action) = candidates.choose(rng) else {
            break;
        };
        board = match problem.result(&board, &action) {
            Ok(next) => next,
            Err(_) => break,
        };
        previous = Some(action);
    }

    info!("Scrambled board:\n{board}");
    board
}

fn opposite(action: Move) -> Move {
    match action {
        Move::Up => Move::Down,
        Move::Down => Move::Up,
        Move::Left => Move::Right,
        Move::Right => Move::Left,
    }
}
