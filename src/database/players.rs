use rusqlite::{params, Connection, OptionalExtension};

use super::models::Player;
use crate::domain::{PlayerId, PlayerStatus};
use crate::errors::Result;

const PLAYER_COLUMNS: &str = "id, name, email, status, created_at";

pub fn insert_player(conn: &Connection, name: &str, email: &str) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (name, email) VALUES (?1, ?2) RETURNING {}",
        PLAYER_COLUMNS
    );

    Ok(conn.query_row(&sql, params![name, email], parse_player_row)?)
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        status: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<Player>> {
    let sql = format!("SELECT {} FROM players WHERE email = ?1", PLAYER_COLUMNS);

    Ok(conn
        .query_row(&sql, params![email], parse_player_row)
        .optional()?)
}

pub fn find_by_id(conn: &Connection, id: PlayerId) -> Result<Option<Player>> {
    let sql = format!("SELECT {} FROM players WHERE id = ?1", PLAYER_COLUMNS);

    Ok(conn.query_row(&sql, params![id], parse_player_row).optional()?)
}

pub fn set_status(conn: &Connection, id: PlayerId, status: PlayerStatus) -> Result<Player> {
    let sql = format!(
        "UPDATE players SET status = ?1 WHERE id = ?2 RETURNING {}",
        PLAYER_COLUMNS
    );

    Ok(conn.query_row(&sql, params![status, id], parse_player_row)?)
}

pub fn deactivate_all(conn: &Connection) -> Result<usize> {
    let sql = "UPDATE players SET status = ?1 WHERE status = ?2";
    Ok(conn.execute(sql, params![PlayerStatus::Inactive, PlayerStatus::Active])?)
}

pub fn count_active(conn: &Connection) -> Result<usize> {
    let sql = "SELECT COUNT(*) FROM players WHERE status = ?1";
    let count: i64 = conn.query_row(sql, params![PlayerStatus::Active], |row| row.get(0))?;
    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::setup::ensure_schema;

    fn store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_new_players_start_active() {
        let conn = store();
        let player = insert_player(&conn, "Chandra Nalaar", "cnalaar@fake.com").unwrap();

        assert_eq!(player.status, PlayerStatus::Active);
        assert_eq!(count_active(&conn).unwrap(), 1);
    }

    #[test]
    fn test_lookup_by_email() {
        let conn = store();
        let inserted = insert_player(&conn, "Jace Beleren", "jbeleren@fake.com").unwrap();

        let found = find_by_email(&conn, "jbeleren@fake.com").unwrap().unwrap();
        assert_eq!(found.id, inserted.id);
        assert!(find_by_email(&conn, "nobody@fake.com").unwrap().is_none());
    }

    #[test]
    fn test_email_is_unique() {
        let conn = store();
        insert_player(&conn, "Jace Beleren", "jbeleren@fake.com").unwrap();
        assert!(insert_player(&conn, "Someone Else", "jbeleren@fake.com").is_err());
    }

    #[test]
    fn test_deactivated_players_are_not_counted() {
        let conn = store();
        let first = insert_player(&conn, "Bruno Walton", "bwalton@fake.com").unwrap();
        insert_player(&conn, "Cathy Burton", "cburton@fake.com").unwrap();

        let updated = set_status(&conn, first.id, PlayerStatus::Inactive).unwrap();
        assert_eq!(updated.status, PlayerStatus::Inactive);
        assert_eq!(count_active(&conn).unwrap(), 1);

        assert_eq!(deactivate_all(&conn).unwrap(), 1);
        assert_eq!(count_active(&conn).unwrap(), 0);
    }
}
