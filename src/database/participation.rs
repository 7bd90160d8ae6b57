use rusqlite::{params, Connection, OptionalExtension};

use super::models::Participation;
use crate::domain::{PlayerId, Standing, TournamentId};
use crate::errors::Result;

/// Counters start from the player's decided matches already stored for the
/// tournament, so a player who left and rejoins keeps their record.
pub fn insert_participation(
    conn: &Connection,
    tournament_id: TournamentId,
    player_id: PlayerId,
) -> Result<Participation> {
    let sql = "INSERT INTO participation (tournament_id, player_id, wins, matches)
        VALUES (
            ?1,
            ?2,
            (SELECT COUNT(*) FROM matches WHERE tournament_id = ?1 AND winner_id = ?2),
            (SELECT COUNT(*) FROM matches
                WHERE tournament_id = ?1 AND winner_id IS NOT NULL AND (player_1 = ?2 OR player_2 = ?2))
        )
        RETURNING tournament_id, player_id, wins, matches";

    Ok(conn.query_row(sql, params![tournament_id, player_id], parse_participation_row)?)
}

fn parse_participation_row(row: &rusqlite::Row) -> rusqlite::Result<Participation> {
    Ok(Participation {
        tournament_id: row.get(0)?,
        player_id: row.get(1)?,
        wins: row.get(2)?,
        matches: row.get(3)?,
    })
}

pub fn find(
    conn: &Connection,
    tournament_id: TournamentId,
    player_id: PlayerId,
) -> Result<Option<Participation>> {
    let sql = "SELECT tournament_id, player_id, wins, matches FROM participation WHERE tournament_id = ?1 AND player_id = ?2";

    Ok(conn
        .query_row(sql, params![tournament_id, player_id], parse_participation_row)
        .optional()?)
}

pub fn count_in_tournament(conn: &Connection, tournament_id: TournamentId) -> Result<usize> {
    let sql = "SELECT COUNT(player_id) FROM participation WHERE tournament_id = ?1";
    let count: i64 = conn.query_row(sql, params![tournament_id], |row| row.get(0))?;
    Ok(count as usize)
}

/// Rows of the `standings` view for one tournament, in storage order.
pub fn list_standings(conn: &Connection, tournament_id: TournamentId) -> Result<Vec<Standing>> {
    let sql = "SELECT player_id, name, wins, matches FROM standings WHERE tournament_id = ?1 ORDER BY player_id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], |row| {
            Ok(Standing {
                player_id: row.get(0)?,
                name: row.get(1)?,
                wins: row.get(2)?,
                matches: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Credits the winner with a win and both players with a match played.
/// Returns the number of rows touched, which is 2 when both players exist.
pub fn record_result(
    conn: &Connection,
    tournament_id: TournamentId,
    winner_id: PlayerId,
    loser_id: PlayerId,
) -> Result<usize> {
    let winner_sql = "UPDATE participation SET wins = wins + 1, matches = matches + 1 WHERE tournament_id = ?1 AND player_id = ?2";
    let loser_sql = "UPDATE participation SET matches = matches + 1 WHERE tournament_id = ?1 AND player_id = ?2";

    let updated = conn.execute(winner_sql, params![tournament_id, winner_id])?
        + conn.execute(loser_sql, params![tournament_id, loser_id])?;
    Ok(updated)
}

pub fn reset_counters(conn: &Connection, tournament_id: TournamentId) -> Result<usize> {
    let sql = "UPDATE participation SET wins = 0, matches = 0 WHERE tournament_id = ?1";
    Ok(conn.execute(sql, params![tournament_id])?)
}

pub fn delete_one(
    conn: &Connection,
    tournament_id: TournamentId,
    player_id: PlayerId,
) -> Result<usize> {
    let sql = "DELETE FROM participation WHERE tournament_id = ?1 AND player_id = ?2";
    Ok(conn.execute(sql, params![tournament_id, player_id])?)
}

pub fn delete_by_tournament(conn: &Connection, tournament_id: TournamentId) -> Result<usize> {
    let sql = "DELETE FROM participation WHERE tournament_id = ?1";
    Ok(conn.execute(sql, params![tournament_id])?)
}

pub fn delete_by_player(conn: &Connection, player_id: PlayerId) -> Result<usize> {
    let sql = "DELETE FROM participation WHERE player_id = ?1";
    Ok(conn.execute(sql, params![player_id])?)
}

pub fn delete_all(conn: &Connection) -> Result<usize> {
    Ok(conn.execute("DELETE FROM participation", [])?)
}
