use chrono::NaiveDateTime;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::Serialize;

use crate::domain::{PlayerId, PlayerStatus, TournamentId};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub email: String,
    pub status: PlayerStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub tournament_id: TournamentId,
    pub player_id: PlayerId,
    pub wins: u32,
    pub matches: u32,
}

/// A scheduled or played match. `winner_id` stays empty until a result is
/// reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: i64,
    pub tournament_id: TournamentId,
    pub round: u32,
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    pub winner_id: Option<PlayerId>,
}

impl MatchRecord {
    pub fn is_decided(&self) -> bool {
        self.winner_id.is_some()
    }

    pub fn loser_id(&self) -> Option<PlayerId> {
        self.winner_id.map(|winner| {
            if winner == self.player_1 {
                self.player_2
            } else {
                self.player_1
            }
        })
    }
}

impl ToSql for PlayerStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for PlayerStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        PlayerStatus::parse(text).ok_or_else(|| FromSqlError::Other(format!("unknown player status '{}'", text).into()))
    }
}
