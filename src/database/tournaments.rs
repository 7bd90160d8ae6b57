use rusqlite::{params, Connection, OptionalExtension};

use super::models::Tournament;
use crate::domain::TournamentId;
use crate::errors::Result;

pub fn insert_tournament(conn: &Connection, name: &str) -> Result<Tournament> {
    let sql = "INSERT INTO tournaments (name) VALUES (?1) RETURNING id, name, created_at";

    Ok(conn.query_row(sql, params![name], parse_tournament_row)?)
}

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<Tournament> {
    Ok(Tournament {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

pub fn find_by_id(conn: &Connection, id: TournamentId) -> Result<Option<Tournament>> {
    let sql = "SELECT id, name, created_at FROM tournaments WHERE id = ?1";

    Ok(conn
        .query_row(sql, params![id], parse_tournament_row)
        .optional()?)
}

/// The most recently created tournament. Ids are never reused, so they
/// break ties between tournaments created within the same second.
pub fn find_latest(conn: &Connection) -> Result<Option<Tournament>> {
    let sql = "SELECT id, name, created_at FROM tournaments ORDER BY created_at DESC, id DESC LIMIT 1";

    Ok(conn.query_row(sql, [], parse_tournament_row).optional()?)
}

pub fn list_all(conn: &Connection) -> Result<Vec<Tournament>> {
    let sql = "SELECT id, name, created_at FROM tournaments ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_tournament_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
