use log::info;

use crate::config::GameConfig;
use crate::error::MoveError;
use crate::rules::Rules;
use crate::types::{BOARD_SIZE, Cell, Coord, GameResult, GameState, NUM_SQUARES};

/// A game in progress: rules, side to move and the last move's change-log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    rules: Rules,
    turn: Cell,
    changes: Vec<u8>,
}

impl GameSession {
    pub fn new(weird: bool) -> Self {
        Self::from_rules(Rules::new(weird), Cell::Black)
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self::new(config.weird)
    }

    pub fn from_rules(rules: Rules, turn: Cell) -> Self {
        Self {
            rules,
            turn,
            changes: Vec::new(),
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Plays `color` (or the side to move) at `index`.
    /// Returns `false` when the move is rejected; nothing changes then.
    pub fn submit_move(&mut self, index: usize, color: Option<Cell>) -> bool {
        self.try_submit_move(index, color).is_ok()
    }

    pub fn try_submit_move(&mut self, index: usize, color: Option<Cell>) -> Result<(), MoveError> {
        if self.turn == Cell::Blank {
            return Err(MoveError::GameOver);
        }
        if index >= NUM_SQUARES {
            return Err(MoveError::IndexOutOfRange(index));
        }

        let mover = color.unwrap_or(self.turn);
        let before = *self.rules.board();
        self.rules.place_and_flip(Self::ui_to_coord(index), mover)?;

        let after = self.rules.board().cells();
        self.changes.clear();
        self.changes.push(mover.to_u8());
        for (i, (old, new)) in before.cells().iter().zip(after).enumerate() {
            if old != new {
                self.changes.push(i as u8);
            }
        }

        self.advance_turn(mover);
        Ok(())
    }

    /// Opponent if it can move, else the mover again, else nobody.
    fn advance_turn(&mut self, mover: Cell) {
        let opponent = mover.opponent();
        self.turn = if self.rules.move_possible(opponent) {
            opponent
        } else if self.rules.move_possible(mover) {
            mover
        } else {
            Cell::Blank
        };

        if self.turn == Cell::Blank {
            info!(
                "game over: black {} - white {}",
                self.current_score(Cell::Black),
                self.current_score(Cell::White)
            );
        }
    }

    pub fn current_turn(&self) -> Cell {
        self.turn
    }

    pub fn current_score(&self, color: Cell) -> u32 {
        self.rules.score_of(color)
    }

    /// Mover's color code followed by every changed cell index, row-major.
    pub fn last_changes(&self) -> &[u8] {
        &self.changes
    }

    pub fn is_game_over(&self) -> bool {
        self.turn == Cell::Blank
    }

    pub fn piece_at(&self, index: usize) -> Cell {
        self.rules.stone_at(Self::ui_to_coord(index))
    }

    pub fn board_cells(&self) -> [u8; NUM_SQUARES] {
        self.rules.board().to_array()
    }

    pub fn ui_to_coord(index: usize) -> Coord {
        Coord::from_index(index)
    }

    pub fn coord_to_ui(at: Coord) -> usize {
        (at.x + at.y * BOARD_SIZE as i32) as usize
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board_cells().to_vec(),
            turn: self.turn.to_u8(),
            black_count: self.current_score(Cell::Black),
            white_count: self.current_score(Cell::White),
            is_game_over: self.is_game_over(),
            changes: self.changes.clone(),
        }
    }

    /// `None` while the game is still running.
    pub fn result(&self) -> Option<GameResult> {
        if !self.is_game_over() {
            return None;
        }
        let black_count = self.current_score(Cell::Black);
        let white_count = self.current_score(Cell::White);
        let winner = if black_count > white_count {
            Cell::Black
        } else if white_count > black_count {
            Cell::White
        } else {
            Cell::Blank
        };
        Some(GameResult {
            winner: winner.to_u8(),
            black_count,
            white_count,
        })
    }

    /// Status bar text. `human` marks whose turn is "your" turn.
    pub fn status_message(&self, human: Option<Cell>) -> String {
        match self.result() {
            None => {
                let yours = if human == Some(self.turn) {
                    " (your)"
                } else {
                    ""
                };
                format!("{}'s{yours} turn.", self.turn.name())
            }
            Some(result) => {
                let outcome = match Cell::from_u8(result.winner) {
                    Some(Cell::Black) => "Black wins",
                    Some(Cell::White) => "White wins",
                    _ => "Tie",
                };
                format!(
                    "Game over! {outcome} ({} - {}).",
                    result.black_count, result.white_count
                )
            }
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(false)
    }
}
