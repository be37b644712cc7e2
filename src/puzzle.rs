use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::problem::Problem;

/// Tile layout of the standard goal board.
pub const GOAL_TILES: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 0];

/// A 3x3 sliding-tile board, row-major, `0` for the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 9]", into = "[u8; 9]")]
pub struct Board {
    tiles: [u8; 9],
}

impl Board {
    /// Validates well-formedness: each of 0..=8 exactly once.
    pub fn new(tiles: [u8; 9]) -> Result<Self, String> {
        let mut seen = [false; 9];
        for &tile in &tiles {
            if tile > 8 || seen[tile as usize] {
                return Err(format!("board {tiles:?} is not a permutation of 0..=8"));
            }
            seen[tile as usize] = true;
        }
        Ok(Board { tiles })
    }

    pub fn goal() -> Self {
        Board { tiles: GOAL_TILES }
    }

    pub fn tiles(&self) -> [u8; 9] {
        self.tiles
    }

    fn blank_index(&self) -> usize {
        // Invariant: a validated board always contains the blank.
        self.tiles.iter().position(|&tile| tile == 0).unwrap_or(0)
    }

    /// Number of out-of-order tile pairs, blank excluded.
    fn inversions(&self) -> usize {
        let tiles: Vec<u8> = self.tiles.iter().copied().filter(|&t| t != 0).collect();
        let mut count = 0;
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                if tiles[i] > tiles[j] {
                    count += 1;
                }
            }
        }
        count
    }

    /// A 3x3 board reaches `goal` iff the two inversion parities match;
    /// every legal move preserves the parity.
    pub fn can_reach(&self, goal: &Board) -> bool {
        self.inversions() % 2 == goal.inversions() % 2
    }
}

impl TryFrom<[u8; 9]> for Board {
    type Error = String;

    fn try_from(tiles: [u8; 9]) -> Result<Self, Self::Error> {
        Board::new(tiles)
    }
}

impl From<Board> for [u8; 9] {
    fn from(board: Board) -> [u8; 9] {
        board.tiles
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let tile = self.tiles[row * 3 + col];
                if tile == 0 {
                    write!(f, " .")?;
                } else {
                    write!(f, " {tile}")?;
                }
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Direction the blank slides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        write!(f, "{name}")
    }
}

/// The 8-puzzle as a search problem: slide tiles until the goal layout is
/// reached, every move costing 1.
#[derive(Debug, Clone)]
pub struct EightPuzzle {
    initial: Board,
    goal: Board,
}

impl EightPuzzle {
    pub fn new(initial: Board) -> Self {
        EightPuzzle {
            initial,
            goal: Board::goal(),
        }
    }

    pub fn with_goal(initial: Board, goal: Board) -> Self {
        EightPuzzle { initial, goal }
    }

    pub fn goal(&self) -> Board {
        self.goal
    }

    pub fn is_solvable(&self) -> bool {
        self.initial.can_reach(&self.goal)
    }

    fn destination(state: &Board, action: Move) -> Option<usize> {
        let blank = state.blank_index();
        let (row, col) = (blank / 3, blank % 3);
        let (new_row, new_col) = match action {
            Move::Up => (row.checked_sub(1)?, col),
            Move::Down => (row + 1, col),
            Move::Left => (row, col.checked_sub(1)?),
            Move::Right => (row, col + 1),
        };
        if new_row > 2 || new_col > 2 {
            return None;
        }
        Some(new_row * 3 + new_col)
    }
}

impl Problem for EightPuzzle {
    type State = Board;
    type Action = Move;
    type Key = Board;

    fn initial_state(&self) -> Board {
        self.initial
    }

    fn is_goal(&self, state: &Board) -> bool {
        *state == self.goal
    }

    fn actions(&self, state: &Board) -> Vec<Move> {
        Move::ALL
            .into_iter()
            .filter(|&action| Self::destination(state, action).is_some())
            .collect()
    }

    fn result(&self, state: &Board, action: &Move) -> Result<Board, SearchError> {
        let destination =
            Self::destination(state, *action).ok_or_else(|| SearchError::InvalidAction {
                state: format!("{:?}", state.tiles),
                action: action.to_string(),
            })?;
        let blank = state.blank_index();
        let mut tiles = state.tiles;
        tiles.swap(blank, destination);
        Ok(Board { tiles })
    }

    fn key(&self, state: &Board) -> Board {
        *state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_rejects_malformed_tiles() {
        assert!(Board::new([1, 2, 3, 4, 5, 6, 7, 8, 9]).is_err());
        assert!(Board::new([1, 1, 3, 4, 5, 6, 7, 8, 0]).is_err());
        assert!(Board::new(GOAL_TILES).is_ok());
    }

    #[test]
    fn test_actions_depend_on_blank_position() {
        let problem = EightPuzzle::new(Board::goal());

        // Blank in the bottom-right corner.
        let corner = Board::new([1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        assert_eq!(problem.actions(&corner), vec![Move::Up, Move::Left]);

        // Blank in the center.
        let center = Board::new([1, 2, 3, 4, 0, 6, 7, 8, 5]).unwrap();
        assert_eq!(
            problem.actions(&center),
            vec![Move::Up, Move::Down, Move::Left, Move::Right]
        );
    }

    #[test]
    fn test_result_slides_the_blank() {
        let problem = EightPuzzle::new(Board::goal());
        let board = Board::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
        let next = problem.result(&board, &Move::Right).unwrap();
        assert_eq!(next, Board::new([1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap());
    }

    #[test]
    fn test_result_rejects_off_board_move() {
        let problem = EightPuzzle::new(Board::goal());
        let corner = Board::new([1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        let err = problem.result(&corner, &Move::Down).unwrap_err();
        assert!(matches!(err, SearchError::InvalidAction { .. }));
    }

    #[test]
    fn test_successors_cost_one_each() {
        let problem = EightPuzzle::new(Board::goal());
        let corner = Board::new([1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        let successors = problem.successors(&corner).unwrap();
        assert_eq!(successors.len(), 2);
        assert!(successors.iter().all(|(_, _, cost)| *cost == 1.0));
    }

    #[test]
    fn test_solvability_parity() {
        // Two moves from the goal: even parity, solvable.
        let solvable = EightPuzzle::new(Board::new([1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap());
        assert!(solvable.is_solvable());

        // One transposition: odd parity, unsolvable.
        let unsolvable = EightPuzzle::new(Board::new([2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap());
        assert!(!unsolvable.is_solvable());
    }

    #[test]
    fn test_moves_preserve_solvability() {
        let initial = Board::new([1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
        let problem = EightPuzzle::new(initial);
        for action in problem.actions(&initial) {
            let next = problem.result(&initial, &action).unwrap();
            assert!(next.can_reach(&problem.goal()));
        }
    }

    #[test]
    fn test_board_display() {
        let board = Board::new([1, 2, 3, 4, 0, 6, 7, 8, 5]).unwrap();
        assert_eq!(format!("{board}"), " 1 2 3\n 4 . 6\n 7 8 5");
    }

    #[test]
    fn test_board_serde_round_trip() {
        let board = Board::new([1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
        let yaml = serde_yaml::to_string(&board).unwrap();
        let back: Board = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, board);

        // Malformed tile lists are rejected at deserialization time.
        let bad: Result<Board, _> = serde_yaml::from_str("[1, 1, 3, 4, 5, 6, 7, 8, 0]");
        assert!(bad.is_err());
    }
}
