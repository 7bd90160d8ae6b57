use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::TournamentId;

type LockTable = HashMap<TournamentId, Arc<RwLock<()>>>;

/// Advisory locks serializing writers per tournament.
///
/// Tournament-scoped work holds the global lock shared, then the
/// tournament's own lock. Work spanning every tournament holds the global
/// lock exclusively. Always acquire in that order.
#[derive(Default)]
pub struct TournamentLocks {
    global: RwLock<()>,
    tournaments: Mutex<LockTable>,
}

impl TournamentLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(&self) -> RwLockReadGuard<'_, ()> {
        read(&self.global)
    }

    pub fn exclusive(&self) -> RwLockWriteGuard<'_, ()> {
        write(&self.global)
    }

    /// Handle on one tournament's lock. The table entry lives only while
    /// some handle for that tournament does.
    pub fn tournament(&self, id: TournamentId) -> TournamentLock<'_> {
        let lock = Arc::clone(self.table().entry(id).or_default());
        TournamentLock {
            owner: self,
            id,
            lock,
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked(&self) -> usize {
        self.table().len()
    }

    fn table(&self) -> MutexGuard<'_, LockTable> {
        self.tournaments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct TournamentLock<'a> {
    owner: &'a TournamentLocks,
    id: TournamentId,
    lock: Arc<RwLock<()>>,
}

impl TournamentLock<'_> {
    pub fn read(&self) -> RwLockReadGuard<'_, ()> {
        read(&self.lock)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, ()> {
        write(&self.lock)
    }
}

impl Drop for TournamentLock<'_> {
    fn drop(&mut self) {
        let mut table = self.owner.table();
        // Handles are only cloned under the table mutex, so two references
        // here means the table and this handle.
        let last = table
            .get(&self.id)
            .is_some_and(|entry| Arc::ptr_eq(entry, &self.lock) && Arc::strong_count(entry) == 2);
        if last {
            table.remove(&self.id);
        }
    }
}

// The locks guard no data, so a panic while holding one leaves nothing to repair.
fn read(lock: &RwLock<()>) -> RwLockReadGuard<'_, ()> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(lock: &RwLock<()>) -> RwLockWriteGuard<'_, ()> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
