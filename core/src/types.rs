use serde::{Deserialize, Serialize};

/// Which of the mini-games a session runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    NumberGuess,
    TicTacToe,
    Memory,
    Reaction,
    ColorPick,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::NumberGuess,
        GameKind::TicTacToe,
        GameKind::Memory,
        GameKind::Reaction,
        GameKind::ColorPick,
    ];

    /// Id of the host page element the game mounts into.
    pub const fn container_id(self) -> &'static str {
        use GameKind::*;
        match self {
            NumberGuess => "number-game",
            TicTacToe => "tictactoe-game",
            Memory => "memory-game",
            Reaction => "reaction-game",
            ColorPick => "color-game",
        }
    }

    pub const fn title(self) -> &'static str {
        use GameKind::*;
        match self {
            NumberGuess => "Guess the Number",
            TicTacToe => "Tic-Tac-Toe",
            Memory => "Memory Match",
            Reaction => "Reaction Test",
            ColorPick => "Color Rush",
        }
    }

    /// Per-game salt mixed into a forced page seed so games don't share a sequence.
    pub(crate) const fn salt(self) -> u64 {
        use GameKind::*;
        match self {
            NumberGuess => 0x9e37_79b9_7f4a_7c15,
            TicTacToe => 0xbf58_476d_1ce4_e5b9,
            Memory => 0x94d0_49bb_1331_11eb,
            Reaction => 0x2545_f491_4f6c_dd1d,
            ColorPick => 0xd6e8_feb8_6659_fd93,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
    Drawn,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost | Self::Drawn)
    }
}

/// Who made a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    Player,
    Opponent,
}

impl Actor {
    pub const fn other(self) -> Self {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Player => "X",
            Self::Opponent => "O",
        }
    }
}

/// A single board mutation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub index: u8,
    pub actor: Actor,
}
