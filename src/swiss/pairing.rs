use log::debug;

use crate::domain::{Pairing, Standing};
use crate::errors::{Result, TournamentError};

/// Pairs ranked players two by two: first with second, third with fourth
/// and so on. Rematches are not avoided.
///
/// `standings` must already be ranked. An empty or odd-sized field is
/// rejected rather than leaving a player out.
pub fn pair_adjacent(standings: &[Standing]) -> Result<Vec<Pairing>> {
    check_field_size(standings.len())?;

    let pairings: Vec<Pairing> = standings.chunks_exact(2).map(build_pairing).collect();

    for pairing in &pairings {
        debug!(
            "Paired {} ({}) with {} ({})",
            pairing.name_a, pairing.player_a, pairing.name_b, pairing.player_b
        );
    }

    Ok(pairings)
}

fn check_field_size(count: usize) -> Result<()> {
    if count == 0 {
        return Err(TournamentError::EmptyTournament);
    }
    if count % 2 != 0 {
        return Err(TournamentError::OddPlayerCount(count));
    }
    Ok(())
}

fn build_pairing(pair: &[Standing]) -> Pairing {
    let (first, second) = (&pair[0], &pair[1]);
    Pairing {
        player_a: first.player_id,
        name_a: first.name.clone(),
        player_b: second.player_id,
        name_b: second.name.clone(),
    }
}
