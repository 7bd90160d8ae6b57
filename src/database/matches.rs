use rusqlite::{params, Connection};

use super::models::MatchRecord;
use crate::domain::{PlayerId, TournamentId};
use crate::errors::Result;

const MATCH_COLUMNS: &str = "id, tournament_id, round, player_1, player_2, winner_id";

pub fn insert_scheduled(
    conn: &Connection,
    tournament_id: TournamentId,
    round: u32,
    player_1: PlayerId,
    player_2: PlayerId,
) -> Result<MatchRecord> {
    insert_match(conn, tournament_id, round, player_1, player_2, None)
}

pub fn insert_decided(
    conn: &Connection,
    tournament_id: TournamentId,
    round: u32,
    winner_id: PlayerId,
    loser_id: PlayerId,
) -> Result<MatchRecord> {
    insert_match(conn, tournament_id, round, winner_id, loser_id, Some(winner_id))
}

fn insert_match(
    conn: &Connection,
    tournament_id: TournamentId,
    round: u32,
    player_1: PlayerId,
    player_2: PlayerId,
    winner_id: Option<PlayerId>,
) -> Result<MatchRecord> {
    let sql = format!(
        "INSERT INTO matches (tournament_id, round, player_1, player_2, winner_id) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {}",
        MATCH_COLUMNS
    );

    Ok(conn.query_row(
        &sql,
        params![tournament_id, round, player_1, player_2, winner_id],
        parse_match_row,
    )?)
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<MatchRecord> {
    Ok(MatchRecord {
        id: row.get(0)?,
        tournament_id: row.get(1)?,
        round: row.get(2)?,
        player_1: row.get(3)?,
        player_2: row.get(4)?,
        winner_id: row.get(5)?,
    })
}

pub fn set_winner(conn: &Connection, match_id: i64, winner_id: PlayerId) -> Result<MatchRecord> {
    let sql = format!(
        "UPDATE matches SET winner_id = ?1 WHERE id = ?2 RETURNING {}",
        MATCH_COLUMNS
    );

    Ok(conn.query_row(&sql, params![winner_id, match_id], parse_match_row)?)
}

/// Highest round number recorded for the tournament, if any match exists
pub fn current_round(conn: &Connection, tournament_id: TournamentId) -> Result<Option<u32>> {
    let sql = "SELECT MAX(round) FROM matches WHERE tournament_id = ?1";
    Ok(conn.query_row(sql, params![tournament_id], |row| row.get(0))?)
}

/// Matches of one round between two players, in either seat order
pub fn find_between(
    conn: &Connection,
    tournament_id: TournamentId,
    round: u32,
    first: PlayerId,
    second: PlayerId,
) -> Result<Vec<MatchRecord>> {
    let sql = format!(
        "SELECT {} FROM matches WHERE tournament_id = ?1 AND round = ?2 AND ((player_1 = ?3 AND player_2 = ?4) OR (player_1 = ?4 AND player_2 = ?3)) ORDER BY id",
        MATCH_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![tournament_id, round, first, second], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_tournament(conn: &Connection, tournament_id: TournamentId) -> Result<Vec<MatchRecord>> {
    let sql = format!(
        "SELECT {} FROM matches WHERE tournament_id = ?1 ORDER BY round, id",
        MATCH_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![tournament_id], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count_in_tournament(conn: &Connection, tournament_id: TournamentId) -> Result<usize> {
    let sql = "SELECT COUNT(*) FROM matches WHERE tournament_id = ?1";
    let count: i64 = conn.query_row(sql, params![tournament_id], |row| row.get(0))?;
    Ok(count as usize)
}

pub fn delete_by_tournament(conn: &Connection, tournament_id: TournamentId) -> Result<usize> {
    let sql = "DELETE FROM matches WHERE tournament_id = ?1";
    Ok(conn.execute(sql, params![tournament_id])?)
}
