use std::fmt;

use thiserror::Error;

use crate::domain::{PlayerId, TournamentId};

/// The record a lookup expected to find
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Tournament(TournamentId),
    Player(PlayerId),
    Participation {
        tournament_id: TournamentId,
        player_id: PlayerId,
    },
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tournament(id) => write!(f, "Tournament {}", id),
            Self::Player(id) => write!(f, "Player {}", id),
            Self::Participation {
                tournament_id,
                player_id,
            } => write!(
                f,
                "Player {} in tournament {}",
                player_id, tournament_id
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Storage unreachable: {0}")]
    Connection(#[from] r2d2::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("{0} not found")]
    NotFound(Missing),

    #[error("No tournament has been created yet")]
    NoTournament,

    #[error("Cannot pair an odd number of players ({0})")]
    OddPlayerCount(usize),

    #[error("No players are registered in the tournament")]
    EmptyTournament,

    #[error("Player {player_id} is already registered in tournament {tournament_id}")]
    AlreadyRegistered {
        tournament_id: TournamentId,
        player_id: PlayerId,
    },

    #[error("Match between {winner_id} and {loser_id} was already reported in round {round}")]
    DuplicateReport {
        winner_id: PlayerId,
        loser_id: PlayerId,
        round: u32,
    },

    #[error("Player {0} cannot play against themselves")]
    SelfMatch(PlayerId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Integrity violation: {0}")]
    Integrity(String),
}

pub type Result<T> = std::result::Result<T, TournamentError>;

impl TournamentError {
    pub fn tournament_not_found(id: TournamentId) -> Self {
        Self::NotFound(Missing::Tournament(id))
    }

    pub fn player_not_found(id: PlayerId) -> Self {
        Self::NotFound(Missing::Player(id))
    }

    pub fn participation_not_found(tournament_id: TournamentId, player_id: PlayerId) -> Self {
        Self::NotFound(Missing::Participation {
            tournament_id,
            player_id,
        })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NoTournament)
    }
}
