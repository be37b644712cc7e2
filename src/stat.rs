use serde::Serialize;
use tracing::info;

use crate::puzzle::{Board, Move};
use crate::search::SearchResult;

/// Presentation-layer view of one `SearchResult`, serializable as JSON.
#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub algorithm: String,
    pub success: bool,
    pub path: Option<Vec<Board>>,
    pub moves: Option<Vec<Move>>,
    pub cost: Option<f64>,
    pub depth: Option<usize>,
    pub expanded: usize,
    pub time_us: u128,
}

impl SolveReport {
    pub fn new(algorithm: &str, result: SearchResult<Board, Move>) -> Self {
        SolveReport {
            algorithm: algorithm.to_string(),
            success: result.success,
            path: result.path,
            moves: result.actions,
            cost: result.cost,
            depth: result.depth,
            expanded: result.expanded,
            time_us: result.time.as_micros(),
        }
    }

    pub fn print(&self) {
        if self.success {
            info!(
                "{}: Cost {:?} Depth {:?} Expand nodes number {:?} Time(microseconds) {:?}",
                self.algorithm, self.cost, self.depth, self.expanded, self.time_us
            );
        } else {
            info!(
                "{}: no solution, Expand nodes number {:?} Time(microseconds) {:?}",
                self.algorithm, self.expanded, self.time_us
            );
        }
    }

    /// Board-by-board replay of the solution.
    pub fn print_steps(&self) {
        let (Some(path), Some(moves)) = (&self.path, &self.moves) else {
            return;
        };
        info!("Start:\n{}", path[0]);
        for (step, board) in moves.iter().zip(&path[1..]) {
            info!("Move {step}:\n{board}");
        }
    }
}

pub fn print_comparison(reports: &[SolveReport]) {
    info!("Comparison over {} algorithms:", reports.len());
    for report in reports {
        report.print();
    }
}
