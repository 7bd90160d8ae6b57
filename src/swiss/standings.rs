use std::cmp::Ordering;

use crate::domain::Standing;
use crate::errors::{Result, TournamentError};

/// Orders standings by wins, highest first. Players level on wins keep
/// ascending player id order so the ranking is the same on every read.
pub fn rank(mut standings: Vec<Standing>) -> Result<Vec<Standing>> {
    verify_counters(&standings)?;
    standings.sort_by(compare_standings);
    Ok(standings)
}

fn verify_counters(standings: &[Standing]) -> Result<()> {
    match standings.iter().find(|s| s.wins > s.matches) {
        Some(broken) => Err(TournamentError::Integrity(format!(
            "player {} has {} wins from {} matches",
            broken.player_id, broken.wins, broken.matches
        ))),
        None => Ok(()),
    }
}

fn compare_standings(a: &Standing, b: &Standing) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| a.player_id.cmp(&b.player_id))
}
