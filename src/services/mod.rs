pub mod locks;
pub mod server;
pub mod tournament;

pub use tournament::{TournamentService, TournamentSummary};
