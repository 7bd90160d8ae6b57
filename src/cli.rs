use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::{PlayerId, TournamentId};

#[derive(Parser, Debug)]
#[command(author, version, about = "Swiss-system tournament manager")]
pub struct Cli {
    /// SQLite database file (defaults to $DATABASE_PATH or swiss_tournament.db)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

/// Tournament to act on; the most recently created one when omitted
#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct TournamentArg {
    #[arg(short, long)]
    pub tournament: Option<TournamentId>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Create a tournament and make it current
    Create { name: String },
    /// Show the current tournament
    Current,
    /// List all tournaments
    Tournaments,
    /// Show a tournament's status, player count and round
    Status {
        #[command(flatten)]
        target: TournamentArg,
    },
    /// Register a player (by email) into a tournament
    Register {
        name: String,
        email: String,
        #[command(flatten)]
        target: TournamentArg,
    },
    /// Enter an already registered player (by id) into a tournament
    Enroll {
        player: PlayerId,
        #[command(flatten)]
        target: TournamentArg,
    },
    /// Count players in a tournament, or all active players
    Count {
        /// Count every active player instead of one tournament's roster
        #[arg(long, conflicts_with = "tournament")]
        all: bool,
        #[command(flatten)]
        target: TournamentArg,
    },
    /// Record a match result
    Report {
        winner: PlayerId,
        loser: PlayerId,
        #[command(flatten)]
        target: TournamentArg,
    },
    /// Print standings ordered by wins
    Standings {
        #[command(flatten)]
        target: TournamentArg,
    },
    /// Generate and store the next round's pairings
    Pairings {
        #[command(flatten)]
        target: TournamentArg,
    },
    /// List matches played and scheduled
    Matches {
        #[command(flatten)]
        target: TournamentArg,
    },
    /// Delete all matches and zero every player's record
    Reset {
        #[command(flatten)]
        target: TournamentArg,
    },
    /// Remove one player (or all players) from a tournament
    Remove {
        /// Player id; every player when omitted
        player: Option<PlayerId>,
        /// Remove from every tournament and deactivate
        #[arg(long, conflicts_with = "tournament")]
        everywhere: bool,
        #[command(flatten)]
        target: TournamentArg,
    },
    /// Start the HTTP server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Print shell completions
    Completions { shell: Shell },
}
