use colored::Colorize;

use crate::database::{MatchRecord, Participation, Player, Tournament};
use crate::domain::{Pairing, Standing};
use crate::services::TournamentSummary;

pub fn print_tournament(tournament: &Tournament) {
    println!(
        "{} {} (created {})",
        format!("#{}", tournament.id).bold(),
        tournament.name,
        tournament.created_at.format("%Y-%m-%d %H:%M")
    );
}

pub fn print_summary(summary: &TournamentSummary) {
    print_tournament(&summary.tournament);
    println!("  status:  {}", summary.status.as_str().cyan());
    println!("  players: {}", summary.players);
    match summary.round {
        Some(round) => println!("  round:   {}", round),
        None => println!("  round:   {}", "not started".dimmed()),
    }
}

pub fn print_player(player: &Player) {
    println!(
        "{} {} <{}> [{}]",
        format!("#{}", player.id).bold(),
        player.name,
        player.email,
        player.status.as_str()
    );
}

pub fn print_participation(participation: &Participation) {
    println!(
        "Player {} entered tournament {} ({}-{})",
        format!("#{}", participation.player_id).bold(),
        participation.tournament_id,
        participation.wins,
        participation.matches.saturating_sub(participation.wins)
    );
}

pub fn print_standings(standings: &[Standing]) {
    if standings.is_empty() {
        println!("{}", "No players registered".dimmed());
        return;
    }

    println!("{}", format!("{:>4}  {:>6}  {:<28} {:>4} {:>4} {:>4}", "rank", "id", "name", "W", "L", "M").bold());
    for (idx, standing) in standings.iter().enumerate() {
        let line = format!(
            "{:>4}  {:>6}  {:<28} {:>4} {:>4} {:>4}",
            idx + 1,
            standing.player_id,
            standing.name,
            standing.wins,
            standing.losses(),
            standing.matches
        );
        if idx == 0 && standing.wins > 0 {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}

pub fn print_pairings(pairings: &[Pairing]) {
    for (idx, pairing) in pairings.iter().enumerate() {
        println!(
            "{:>3}. {} ({}) {} {} ({})",
            idx + 1,
            pairing.name_a,
            pairing.player_a,
            "vs".yellow(),
            pairing.name_b,
            pairing.player_b
        );
    }
}

pub fn print_matches(matches: &[MatchRecord]) {
    if matches.is_empty() {
        println!("{}", "No matches yet".dimmed());
        return;
    }

    let mut round = 0;
    for record in matches {
        if record.round != round {
            round = record.round;
            println!("{}", format!("Round {}", round).bold());
        }
        match record.winner_id {
            Some(winner) => println!(
                "  {} vs {}: {} won",
                record.player_1,
                record.player_2,
                winner.to_string().green()
            ),
            None => println!(
                "  {} vs {}: {}",
                record.player_1,
                record.player_2,
                "pending".yellow()
            ),
        }
    }
}
