use anyhow::Result;

use swiss_tournament::cli::{Cli, Command};
use swiss_tournament::config::AppConfig;
use swiss_tournament::{
    handle_completions, handle_count, handle_create, handle_current, handle_enroll, handle_matches,
    handle_pairings, handle_register, handle_remove, handle_report, handle_reset, handle_serve,
    handle_standings, handle_status, handle_tournaments, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(cli)
}

fn execute_command(cli: Cli) -> Result<()> {
    let config = AppConfig::new().with_database_path(cli.database.as_deref());

    match cli.command {
        Command::Create { name } => handle_create(&config, &name),
        Command::Current => handle_current(&config),
        Command::Tournaments => handle_tournaments(&config),
        Command::Status { target } => handle_status(&config, target),
        Command::Register { name, email, target } => handle_register(&config, &name, &email, target),
        Command::Enroll { player, target } => handle_enroll(&config, player, target),
        Command::Count { all, target } => handle_count(&config, all, target),
        Command::Report { winner, loser, target } => handle_report(&config, winner, loser, target),
        Command::Standings { target } => handle_standings(&config, target),
        Command::Pairings { target } => handle_pairings(&config, target),
        Command::Matches { target } => handle_matches(&config, target),
        Command::Reset { target } => handle_reset(&config, target),
        Command::Remove { player, everywhere, target } => handle_remove(&config, player, everywhere, target),
        Command::Serve { port } => handle_serve(config, port),
        Command::Completions { shell } => handle_completions(shell),
    }
}
