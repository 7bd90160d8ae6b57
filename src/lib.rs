pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod output;
pub mod services;
pub mod swiss;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use log::info;

use crate::cli::TournamentArg;
use crate::config::AppConfig;
use crate::domain::{CountScope, PlayerId, PlayerSelection, RemovalScope, TournamentId};
use crate::services::server::ServerService;
use crate::services::TournamentService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn open_service(config: &AppConfig) -> Result<TournamentService> {
    TournamentService::open(&config.store)
        .with_context(|| format!("Failed to open database at {}", config.store.database_path))
}

fn resolve(service: &TournamentService, target: TournamentArg) -> Result<TournamentId> {
    service
        .resolve_tournament(target.tournament)
        .context("No tournament given and none exists yet; run `create` first")
}

pub fn handle_create(config: &AppConfig, name: &str) -> Result<()> {
    let service = open_service(config)?;
    let tournament = service.create_tournament(name)?;
    output::print_tournament(&tournament);
    Ok(())
}

pub fn handle_current(config: &AppConfig) -> Result<()> {
    let service = open_service(config)?;
    output::print_tournament(&service.current_tournament()?);
    Ok(())
}

pub fn handle_tournaments(config: &AppConfig) -> Result<()> {
    let service = open_service(config)?;
    for tournament in service.list_tournaments()? {
        output::print_tournament(&tournament);
    }
    Ok(())
}

pub fn handle_status(config: &AppConfig, target: TournamentArg) -> Result<()> {
    let service = open_service(config)?;
    let tournament_id = resolve(&service, target)?;
    output::print_summary(&service.tournament_summary(tournament_id)?);
    Ok(())
}

pub fn handle_register(config: &AppConfig, name: &str, email: &str, target: TournamentArg) -> Result<()> {
    let service = open_service(config)?;
    let tournament_id = resolve(&service, target)?;
    let player = service.register_player(tournament_id, name, email)?;
    output::print_player(&player);
    Ok(())
}

pub fn handle_enroll(config: &AppConfig, player_id: PlayerId, target: TournamentArg) -> Result<()> {
    let service = open_service(config)?;
    let tournament_id = resolve(&service, target)?;
    let participation = service.enroll_player(tournament_id, player_id)?;
    output::print_participation(&participation);
    Ok(())
}

pub fn handle_count(config: &AppConfig, all: bool, target: TournamentArg) -> Result<()> {
    let service = open_service(config)?;
    let scope = if all {
        CountScope::ActivePlayers
    } else {
        CountScope::Tournament(resolve(&service, target)?)
    };
    println!("{}", service.count_players(scope)?);
    Ok(())
}

pub fn handle_report(config: &AppConfig, winner: PlayerId, loser: PlayerId, target: TournamentArg) -> Result<()> {
    let service = open_service(config)?;
    let tournament_id = resolve(&service, target)?;
    let record = service.report_match(tournament_id, winner, loser)?;
    output::print_matches(std::slice::from_ref(&record));
    Ok(())
}

pub fn handle_standings(config: &AppConfig, target: TournamentArg) -> Result<()> {
    let service = open_service(config)?;
    let tournament_id = resolve(&service, target)?;
    output::print_standings(&service.player_standings(tournament_id)?);
    Ok(())
}

pub fn handle_pairings(config: &AppConfig, target: TournamentArg) -> Result<()> {
    let service = open_service(config)?;
    let tournament_id = resolve(&service, target)?;
    output::print_pairings(&service.swiss_pairings(tournament_id)?);
    Ok(())
}

pub fn handle_matches(config: &AppConfig, target: TournamentArg) -> Result<()> {
    let service = open_service(config)?;
    let tournament_id = resolve(&service, target)?;
    output::print_matches(&service.list_matches(tournament_id)?);
    Ok(())
}

pub fn handle_reset(config: &AppConfig, target: TournamentArg) -> Result<()> {
    let service = open_service(config)?;
    let tournament_id = resolve(&service, target)?;
    service.delete_matches(tournament_id)?;
    println!("Tournament {} reset", tournament_id);
    Ok(())
}

pub fn handle_remove(
    config: &AppConfig,
    player: Option<PlayerId>,
    everywhere: bool,
    target: TournamentArg,
) -> Result<()> {
    let service = open_service(config)?;
    let selection = match player {
        Some(player_id) => PlayerSelection::Single(player_id),
        None => PlayerSelection::All,
    };
    let scope = if everywhere {
        RemovalScope::Everywhere
    } else {
        RemovalScope::Tournament(resolve(&service, target)?)
    };
    let removed = service.delete_players(selection, scope)?;
    println!("Removed {} registrations", removed);
    Ok(())
}

pub fn handle_serve(config: AppConfig, port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(config.with_port(port));
        service.run().await
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    info!("Generated {} completions", shell);
    Ok(())
}
