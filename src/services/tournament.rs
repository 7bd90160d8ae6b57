use log::{info, warn};
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;

use crate::config::StoreSettings;
use crate::database::{
    self, matches, participation, players, setup, tournaments, DbPool, MatchRecord,
    Participation, Player, Tournament,
};
use crate::domain::{
    CountScope, Pairing, PlayerId, PlayerSelection, PlayerStatus, RemovalScope, Standing,
    TournamentId, TournamentStatus,
};
use crate::errors::{Result, TournamentError};
use crate::services::locks::TournamentLocks;
use crate::swiss;

const FIRST_ROUND: u32 = 1;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSummary {
    pub tournament: Tournament,
    pub status: TournamentStatus,
    pub players: usize,
    pub round: Option<u32>,
}

/// Entry point for every tournament operation.
///
/// Each call checks out one pooled connection and runs in its own
/// transaction, so a failed call leaves nothing behind.
pub struct TournamentService {
    pool: DbPool,
    locks: TournamentLocks,
}

impl TournamentService {
    pub fn new(pool: DbPool) -> Result<Self> {
        {
            let conn = database::get_connection(&pool)?;
            setup::ensure_schema(&conn)?;
        }

        Ok(Self {
            pool,
            locks: TournamentLocks::new(),
        })
    }

    pub fn open(settings: &StoreSettings) -> Result<Self> {
        let pool = database::create_pool(&settings.database_path, settings.pool_size)?;
        Self::new(pool)
    }

    pub fn in_memory() -> Result<Self> {
        Self::new(database::create_memory_pool()?)
    }

    // --- Lifecycle ---

    pub fn create_tournament(&self, name: &str) -> Result<Tournament> {
        let name = require_text("tournament name", name)?;

        let tournament = {
            let _global = self.locks.shared();
            self.in_transaction(TransactionBehavior::Immediate, |conn| {
                tournaments::insert_tournament(conn, name)
            })?
        };

        info!("Created tournament {} '{}'", tournament.id, tournament.name);
        Ok(tournament)
    }

    pub fn tournament(&self, tournament_id: TournamentId) -> Result<Tournament> {
        self.in_transaction(TransactionBehavior::Deferred, |conn| {
            require_tournament(conn, tournament_id)
        })
    }

    pub fn list_tournaments(&self) -> Result<Vec<Tournament>> {
        self.in_transaction(TransactionBehavior::Deferred, tournaments::list_all)
    }

    /// The most recently created tournament
    pub fn current_tournament(&self) -> Result<Tournament> {
        self.in_transaction(TransactionBehavior::Deferred, |conn| {
            tournaments::find_latest(conn)?.ok_or(TournamentError::NoTournament)
        })
    }

    /// Uses the given tournament, or the current one when none is given.
    pub fn resolve_tournament(&self, tournament_id: Option<TournamentId>) -> Result<TournamentId> {
        match tournament_id {
            Some(id) => Ok(id),
            None => self.current_tournament().map(|t| t.id),
        }
    }

    pub fn tournament_status(&self, tournament_id: TournamentId) -> Result<TournamentStatus> {
        self.tournament_summary(tournament_id).map(|summary| summary.status)
    }

    pub fn tournament_summary(&self, tournament_id: TournamentId) -> Result<TournamentSummary> {
        self.inspect(tournament_id, |conn| {
            let tournament = require_tournament(conn, tournament_id)?;
            let players = participation::count_in_tournament(conn, tournament_id)?;
            let scheduled = matches::count_in_tournament(conn, tournament_id)?;
            let round = matches::current_round(conn, tournament_id)?;

            Ok(TournamentSummary {
                tournament,
                status: TournamentStatus::derive(players, scheduled),
                players,
                round,
            })
        })
    }

    /// Deletes every match of the tournament and zeroes all counters.
    /// Players stay registered.
    pub fn delete_matches(&self, tournament_id: TournamentId) -> Result<()> {
        let (removed, reset) = self.mutate(tournament_id, |conn| {
            require_tournament(conn, tournament_id)?;
            let removed = matches::delete_by_tournament(conn, tournament_id)?;
            let reset = participation::reset_counters(conn, tournament_id)?;
            Ok((removed, reset))
        })?;

        info!(
            "Reset tournament {}: {} matches deleted, {} players zeroed",
            tournament_id, removed, reset
        );
        Ok(())
    }

    // --- Registration ---

    /// Registers a player into a tournament by email.
    ///
    /// An unknown email creates the player. A known one reuses the existing
    /// record (reactivating it if needed) and keeps its stored name.
    pub fn register_player(
        &self,
        tournament_id: TournamentId,
        name: &str,
        email: &str,
    ) -> Result<Player> {
        let name = require_text("player name", name)?;
        let email = require_text("email", email)?;

        let player = self.mutate(tournament_id, |conn| {
            require_tournament(conn, tournament_id)?;
            let player = upsert_active_player(conn, name, email)?;
            enroll(conn, tournament_id, player.id)?;
            Ok(player)
        })?;

        info!(
            "Registered player {} '{}' in tournament {}",
            player.id, player.name, tournament_id
        );
        Ok(player)
    }

    /// Registers an existing player into a tournament, reactivating them
    pub fn enroll_player(
        &self,
        tournament_id: TournamentId,
        player_id: PlayerId,
    ) -> Result<Participation> {
        let row = self.mutate(tournament_id, |conn| {
            require_tournament(conn, tournament_id)?;
            let player = require_player(conn, player_id)?;
            if !player.status.is_active() {
                players::set_status(conn, player_id, PlayerStatus::Active)?;
            }
            enroll(conn, tournament_id, player_id)
        })?;

        info!("Enrolled player {} in tournament {}", player_id, tournament_id);
        Ok(row)
    }

    pub fn count_players(&self, scope: CountScope) -> Result<usize> {
        match scope {
            CountScope::Tournament(tournament_id) => self.inspect(tournament_id, |conn| {
                require_tournament(conn, tournament_id)?;
                participation::count_in_tournament(conn, tournament_id)
            }),
            CountScope::ActivePlayers => {
                let _global = self.locks.shared();
                self.in_transaction(TransactionBehavior::Deferred, players::count_active)
            }
        }
    }

    /// Removes participation rows. Removal from every tournament also
    /// deactivates the players; player records are never deleted.
    /// Returns the number of participation rows removed.
    pub fn delete_players(&self, selection: PlayerSelection, scope: RemovalScope) -> Result<usize> {
        let removed = match scope {
            RemovalScope::Tournament(tournament_id) => self.mutate(tournament_id, |conn| {
                require_tournament(conn, tournament_id)?;
                remove_from_tournament(conn, tournament_id, selection)
            })?,
            RemovalScope::Everywhere => self.mutate_everywhere(|conn| remove_everywhere(conn, selection))?,
        };

        info!("Removed {} participation rows ({:?}, {:?})", removed, selection, scope);
        Ok(removed)
    }

    // --- Results ---

    /// Records that `winner_id` beat `loser_id` in the tournament's current
    /// round. A match already scheduled between the two is decided in place.
    /// Otherwise a decided match is added to the round.
    pub fn report_match(
        &self,
        tournament_id: TournamentId,
        winner_id: PlayerId,
        loser_id: PlayerId,
    ) -> Result<MatchRecord> {
        if winner_id == loser_id {
            return Err(TournamentError::SelfMatch(winner_id));
        }

        let result = self.mutate(tournament_id, |conn| {
            require_tournament(conn, tournament_id)?;
            require_participant(conn, tournament_id, winner_id)?;
            require_participant(conn, tournament_id, loser_id)?;

            let round = matches::current_round(conn, tournament_id)?.unwrap_or(FIRST_ROUND);
            let record = settle_match(conn, tournament_id, round, winner_id, loser_id)?;
            apply_result(conn, tournament_id, winner_id, loser_id)?;
            Ok(record)
        });

        match &result {
            Ok(record) => info!(
                "Tournament {} round {}: {} beat {}",
                tournament_id, record.round, winner_id, loser_id
            ),
            Err(e @ TournamentError::DuplicateReport { .. }) => warn!("Rejected report: {}", e),
            Err(_) => {}
        }
        result
    }

    pub fn list_matches(&self, tournament_id: TournamentId) -> Result<Vec<MatchRecord>> {
        self.inspect(tournament_id, |conn| {
            require_tournament(conn, tournament_id)?;
            matches::list_by_tournament(conn, tournament_id)
        })
    }

    // --- Standings & pairing ---

    pub fn player_standings(&self, tournament_id: TournamentId) -> Result<Vec<Standing>> {
        self.inspect(tournament_id, |conn| ranked_standings(conn, tournament_id))
    }

    /// Pairs the current standings and schedules the pairings as the next
    /// round. Nothing is written when the field cannot be paired.
    pub fn swiss_pairings(&self, tournament_id: TournamentId) -> Result<Vec<Pairing>> {
        let (round, pairings) = self.mutate(tournament_id, |conn| {
            let standings = ranked_standings(conn, tournament_id)?;
            let pairings = swiss::pair_adjacent(&standings)?;

            let round = matches::current_round(conn, tournament_id)?
                .map_or(FIRST_ROUND, |round| round + 1);
            for pairing in &pairings {
                matches::insert_scheduled(conn, tournament_id, round, pairing.player_a, pairing.player_b)?;
            }
            Ok((round, pairings))
        })?;

        info!(
            "Tournament {}: scheduled {} pairings for round {}",
            tournament_id,
            pairings.len(),
            round
        );
        Ok(pairings)
    }

    // --- Locking & transactions ---

    fn in_transaction<T, F>(&self, behavior: TransactionBehavior, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction_with_behavior(behavior)?;
        let value = {
            let conn: &Connection = &tx;
            f(conn)?
        };
        tx.commit()?;
        Ok(value)
    }

    fn inspect<T, F>(&self, tournament_id: TournamentId, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let _global = self.locks.shared();
        let lock = self.locks.tournament(tournament_id);
        let _guard = lock.read();
        self.in_transaction(TransactionBehavior::Deferred, f)
    }

    fn mutate<T, F>(&self, tournament_id: TournamentId, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let _global = self.locks.shared();
        let lock = self.locks.tournament(tournament_id);
        let _guard = lock.write();
        self.in_transaction(TransactionBehavior::Immediate, f)
    }

    fn mutate_everywhere<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let _global = self.locks.exclusive();
        self.in_transaction(TransactionBehavior::Immediate, f)
    }
}

fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::InvalidInput(format!("{} must not be blank", field)));
    }
    Ok(trimmed)
}

fn require_tournament(conn: &Connection, tournament_id: TournamentId) -> Result<Tournament> {
    tournaments::find_by_id(conn, tournament_id)?
        .ok_or_else(|| TournamentError::tournament_not_found(tournament_id))
}

fn require_player(conn: &Connection, player_id: PlayerId) -> Result<Player> {
    players::find_by_id(conn, player_id)?.ok_or_else(|| TournamentError::player_not_found(player_id))
}

fn require_participant(
    conn: &Connection,
    tournament_id: TournamentId,
    player_id: PlayerId,
) -> Result<Participation> {
    participation::find(conn, tournament_id, player_id)?
        .ok_or_else(|| TournamentError::participation_not_found(tournament_id, player_id))
}

fn upsert_active_player(conn: &Connection, name: &str, email: &str) -> Result<Player> {
    match players::find_by_email(conn, email)? {
        None => players::insert_player(conn, name, email),
        Some(existing) if existing.status.is_active() => Ok(existing),
        Some(existing) => {
            info!("Reactivating player {} '{}'", existing.id, existing.name);
            players::set_status(conn, existing.id, PlayerStatus::Active)
        }
    }
}

fn enroll(conn: &Connection, tournament_id: TournamentId, player_id: PlayerId) -> Result<Participation> {
    if participation::find(conn, tournament_id, player_id)?.is_some() {
        return Err(TournamentError::AlreadyRegistered {
            tournament_id,
            player_id,
        });
    }
    participation::insert_participation(conn, tournament_id, player_id)
}

fn remove_from_tournament(
    conn: &Connection,
    tournament_id: TournamentId,
    selection: PlayerSelection,
) -> Result<usize> {
    match selection {
        PlayerSelection::All => participation::delete_by_tournament(conn, tournament_id),
        PlayerSelection::Single(player_id) => {
            match participation::delete_one(conn, tournament_id, player_id)? {
                0 => Err(TournamentError::participation_not_found(tournament_id, player_id)),
                removed => Ok(removed),
            }
        }
    }
}

fn remove_everywhere(conn: &Connection, selection: PlayerSelection) -> Result<usize> {
    match selection {
        PlayerSelection::All => {
            let removed = participation::delete_all(conn)?;
            players::deactivate_all(conn)?;
            Ok(removed)
        }
        PlayerSelection::Single(player_id) => {
            require_player(conn, player_id)?;
            let removed = participation::delete_by_player(conn, player_id)?;
            players::set_status(conn, player_id, PlayerStatus::Inactive)?;
            Ok(removed)
        }
    }
}

fn ranked_standings(conn: &Connection, tournament_id: TournamentId) -> Result<Vec<Standing>> {
    require_tournament(conn, tournament_id)?;
    let rows = participation::list_standings(conn, tournament_id)?;
    swiss::rank(rows)
}

fn settle_match(
    conn: &Connection,
    tournament_id: TournamentId,
    round: u32,
    winner_id: PlayerId,
    loser_id: PlayerId,
) -> Result<MatchRecord> {
    let existing = matches::find_between(conn, tournament_id, round, winner_id, loser_id)?;

    if existing.iter().any(MatchRecord::is_decided) {
        return Err(TournamentError::DuplicateReport {
            winner_id,
            loser_id,
            round,
        });
    }

    match existing.first() {
        Some(scheduled) => matches::set_winner(conn, scheduled.id, winner_id),
        None => matches::insert_decided(conn, tournament_id, round, winner_id, loser_id),
    }
}

fn apply_result(
    conn: &Connection,
    tournament_id: TournamentId,
    winner_id: PlayerId,
    loser_id: PlayerId,
) -> Result<()> {
    let updated = participation::record_result(conn, tournament_id, winner_id, loser_id)?;
    if updated != 2 {
        return Err(TournamentError::Integrity(format!(
            "expected 2 participation rows updated, got {}",
            updated
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tournament_tests.rs"]
mod tests;
