use alloc::format;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

pub const CELL_COUNT: u8 = 9;
pub const CENTER: u8 = 4;
pub const CORNERS: [u8; 4] = [0, 2, 6, 8];

/// Rows, columns and diagonals of the row-major 3x3 grid.
pub const LINES: [[u8; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub type FreeCells = SmallVec<[u8; 9]>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board([Option<Actor>; 9]);

impl Board {
    pub fn get(&self, index: u8) -> Option<Actor> {
        self.0[usize::from(index)]
    }

    pub fn is_free(&self, index: u8) -> bool {
        index < CELL_COUNT && self.get(index).is_none()
    }

    pub fn free_cells(&self) -> FreeCells {
        (0..CELL_COUNT).filter(|&i| self.is_free(i)).collect()
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Places a mark; the caller has checked that the cell is free.
    fn place(&mut self, mv: Move) {
        debug_assert!(self.is_free(mv.index));
        self.0[usize::from(mv.index)] = Some(mv.actor);
    }

    /// First completed line and its owner.
    pub fn winner(&self) -> Option<(Actor, [u8; 3])> {
        LINES.iter().find_map(|&line| {
            let [a, b, c] = line.map(|i| self.get(i));
            match (a, b, c) {
                (Some(x), Some(y), Some(z)) if x == y && y == z => Some((x, line)),
                _ => None,
            }
        })
    }

    /// Lowest free cell that would give `actor` three in a row.
    pub fn completing_cell(&self, actor: Actor) -> Option<u8> {
        self.free_cells().into_iter().find(|&cell| {
            LINES.iter().filter(|line| line.contains(&cell)).any(|line| {
                line.iter()
                    .filter(|&&i| i != cell)
                    .all(|&i| self.get(i) == Some(actor))
            })
        })
    }
}

impl From<[Option<Actor>; 9]> for Board {
    fn from(cells: [Option<Actor>; 9]) -> Self {
        Self(cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.chunks(3) {
            for cell in row {
                f.write_str(cell.map_or(".", Actor::symbol))?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// How hard the computer plays.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Takes wins and blocks threats before falling back to corners, centre, anything.
    #[default]
    Standard,
    /// Only the positional fallback: corners, centre, anything.
    Casual,
}

/// Picks the opponent's cell on `board`, or `None` if the board is full.
pub fn select_opponent_cell(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut RandomSource,
) -> Option<u8> {
    if difficulty == Difficulty::Standard {
        if let Some(win) = board.completing_cell(Actor::Opponent) {
            return Some(win);
        }
        if let Some(block) = board.completing_cell(Actor::Player) {
            return Some(block);
        }
    }

    let corners: FreeCells = CORNERS.iter().copied().filter(|&i| board.is_free(i)).collect();
    if let Some(corner) = rng.choose(&corners) {
        return Some(corner);
    }
    if board.is_free(CENTER) {
        return Some(CENTER);
    }
    rng.choose(&board.free_cells())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    PlayerTurn,
    OpponentTurn,
    Finished(GameStatus),
}

/// What happened during one call to [`TicTacToe::player_move`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub player: Move,
    pub opponent: Option<Move>,
    pub status: GameStatus,
}

impl fmt::Display for TurnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.status {
            GameStatus::Won => "You win!",
            GameStatus::Lost => "The computer wins",
            GameStatus::Drawn => "It's a draw",
            GameStatus::InProgress => "Your turn",
        })
    }
}

#[derive(Clone, Debug)]
pub struct TicTacToe {
    board: Board,
    state: TurnState,
    difficulty: Difficulty,
    rng: RandomSource,
    history: Vec<Move>,
    winning_line: Option<[u8; 3]>,
}

impl TicTacToe {
    pub fn new(difficulty: Difficulty, rng: RandomSource) -> Self {
        Self {
            board: Board::default(),
            state: TurnState::PlayerTurn,
            difficulty,
            rng,
            history: Vec::new(),
            winning_line: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn status(&self) -> GameStatus {
        match self.state {
            TurnState::Finished(status) => status,
            _ => GameStatus::InProgress,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn winning_line(&self) -> Option<[u8; 3]> {
        self.winning_line
    }

    pub fn player_move(&mut self, index: u8) -> Result<TurnReport> {
        if index >= CELL_COUNT {
            return Err(GameError::OutOfRange(index));
        }
        match self.state {
            TurnState::Finished(_) => return Err(GameError::AlreadyEnded),
            TurnState::OpponentTurn => return Err(GameError::InputLocked),
            TurnState::PlayerTurn => {}
        }
        if !self.board.is_free(index) {
            return Err(GameError::CellOccupied);
        }

        let player = Move {
            index,
            actor: Actor::Player,
        };
        self.apply(player);

        let opponent = if self.state == TurnState::OpponentTurn {
            self.opponent_move()
        } else {
            None
        };

        Ok(TurnReport {
            player,
            opponent,
            status: self.status(),
        })
    }

    /// Lets the computer play if it is its turn.
    pub fn opponent_move(&mut self) -> Option<Move> {
        if self.state != TurnState::OpponentTurn {
            return None;
        }
        let index = select_opponent_cell(&self.board, self.difficulty, &mut self.rng)?;
        let mv = Move {
            index,
            actor: Actor::Opponent,
        };
        self.apply(mv);
        Some(mv)
    }

    fn apply(&mut self, mv: Move) {
        self.board.place(mv);
        self.history.push(mv);

        self.state = if let Some((winner, line)) = self.board.winner() {
            self.winning_line = Some(line);
            TurnState::Finished(match winner {
                Actor::Player => GameStatus::Won,
                Actor::Opponent => GameStatus::Lost,
            })
        } else if self.board.is_full() {
            TurnState::Finished(GameStatus::Drawn)
        } else {
            match mv.actor {
                Actor::Player => TurnState::OpponentTurn,
                Actor::Opponent => TurnState::PlayerTurn,
            }
        };
        log::debug!("{:?} took cell {}, now {:?}", mv.actor, mv.index, self.state);
    }

    pub fn restart(&mut self) {
        self.board = Board::default();
        self.state = TurnState::PlayerTurn;
        self.history.clear();
        self.winning_line = None;
    }

    pub fn render(&self) -> Frame {
        let playable = self.state == TurnState::PlayerTurn;
        let cells = (0..CELL_COUNT)
            .map(|index| {
                let mut style = CellStyle::empty();
                match self.board.get(index) {
                    Some(Actor::Player) => style |= CellStyle::PLAYER,
                    Some(Actor::Opponent) => style |= CellStyle::OPPONENT,
                    None if playable => style |= CellStyle::ENABLED,
                    None => {}
                }
                if self
                    .winning_line
                    .is_some_and(|line| line.contains(&index))
                {
                    style |= CellStyle::HIGHLIGHT;
                }
                let label = self.board.get(index).map_or("", Actor::symbol);
                CellFrame::new(label, style)
            })
            .collect();

        let headline = match self.state {
            TurnState::PlayerTurn if self.history.is_empty() => "You are X, make the first move",
            TurnState::PlayerTurn => "Your turn",
            TurnState::OpponentTurn => "Computer is thinking...",
            TurnState::Finished(GameStatus::Won) => "You win!",
            TurnState::Finished(GameStatus::Lost) => "The computer wins",
            TurnState::Finished(_) => "It's a draw",
        };

        let frame = Frame::new(GameKind::TicTacToe, headline)
            .with_grid(3, cells)
            .with_primary("Restart", !self.history.is_empty());
        if self.difficulty == Difficulty::Casual {
            frame.with_detail(format!("Casual mode, {} moves played", self.history.len()))
        } else {
            frame
        }
    }
}
