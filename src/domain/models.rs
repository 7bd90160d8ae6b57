use serde::{Deserialize, Serialize};

pub type PlayerId = i64;
pub type TournamentId = i64;

/// Player status. Players who have taken part in a tournament are never
/// deleted, only deactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Active,
    Inactive,
}

impl PlayerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerStatus::Active => "active",
            PlayerStatus::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(PlayerStatus::Active),
            "inactive" => Some(PlayerStatus::Inactive),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PlayerStatus::Active)
    }
}

/// Where a tournament is in its lifecycle, derived from its records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Created,     // no participants yet
    Open,        // participants, no matches
    InProgress,  // at least one match scheduled or played
}

impl TournamentStatus {
    pub fn derive(participants: usize, matches: usize) -> Self {
        if participants == 0 {
            TournamentStatus::Created
        } else if matches == 0 {
            TournamentStatus::Open
        } else {
            TournamentStatus::InProgress
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Created => "created",
            TournamentStatus::Open => "open",
            TournamentStatus::InProgress => "in progress",
        }
    }
}

/// One row of a tournament's standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub player_id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub matches: u32,
}

impl Standing {
    pub fn losses(&self) -> u32 {
        self.matches.saturating_sub(self.wins)
    }
}

/// Two players scheduled to meet in the next round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pairing {
    pub player_a: PlayerId,
    pub name_a: String,
    pub player_b: PlayerId,
    pub name_b: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountScope {
    Tournament(TournamentId),
    ActivePlayers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSelection {
    All,
    Single(PlayerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalScope {
    Tournament(TournamentId),
    /// Every tournament; removed players are also deactivated
    Everywhere,
}
