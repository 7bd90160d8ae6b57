use std::collections::HashSet;

use super::*;
use crate::errors::Missing;

fn email_for(name: &str) -> String {
    format!("{}@fake.com", name.to_lowercase().replace(' ', "."))
}

fn setup(names: &[&str]) -> (TournamentService, TournamentId, Vec<PlayerId>) {
    let service = TournamentService::in_memory().unwrap();
    let tournament = service.create_tournament("Friday Night Swiss").unwrap();
    let ids = names
        .iter()
        .map(|name| service.register_player(tournament.id, name, &email_for(name)).unwrap().id)
        .collect();
    (service, tournament.id, ids)
}

fn standing_of(standings: &[Standing], player_id: PlayerId) -> &Standing {
    standings.iter().find(|s| s.player_id == player_id).unwrap()
}

fn pair_set(pairings: &[Pairing]) -> HashSet<(PlayerId, PlayerId)> {
    pairings
        .iter()
        .map(|p| (p.player_a.min(p.player_b), p.player_a.max(p.player_b)))
        .collect()
}

const EIGHT: [&str; 8] = [
    "Twilight Sparkle",
    "Fluttershy",
    "Applejack",
    "Pinkie Pie",
    "Rarity",
    "Rainbow Dash",
    "Princess Celestia",
    "Princess Luna",
];

#[test]
fn test_latest_tournament_is_current() {
    let service = TournamentService::in_memory().unwrap();
    service.create_tournament("First is the worst!").unwrap();
    service.create_tournament("Second is the best!").unwrap();
    let third = service.create_tournament("Third is the one with the hairy chest!").unwrap();

    let current = service.current_tournament().unwrap();
    assert_eq!(current.id, third.id);
    assert_eq!(service.resolve_tournament(None).unwrap(), third.id);
    assert_eq!(service.list_tournaments().unwrap().len(), 3);
}

#[test]
fn test_no_current_tournament_before_creation() {
    let service = TournamentService::in_memory().unwrap();
    assert!(matches!(service.current_tournament(), Err(TournamentError::NoTournament)));
    assert!(matches!(service.resolve_tournament(None), Err(TournamentError::NoTournament)));
    assert_eq!(service.resolve_tournament(Some(42)).unwrap(), 42);
}

#[test]
fn test_count_follows_registrations_and_removals() {
    let service = TournamentService::in_memory().unwrap();
    let tournament = service.create_tournament("Count Cup").unwrap();
    let scope = CountScope::Tournament(tournament.id);

    service
        .delete_players(PlayerSelection::All, RemovalScope::Tournament(tournament.id))
        .unwrap();
    assert_eq!(service.count_players(scope).unwrap(), 0);

    service.register_player(tournament.id, "Chandra Nalaar", "cnalaar@fake.com").unwrap();
    assert_eq!(service.count_players(scope).unwrap(), 1);

    let jace = service.register_player(tournament.id, "Jace Beleren", "jbeleren@fake.com").unwrap();
    assert_eq!(service.count_players(scope).unwrap(), 2);

    service
        .delete_players(PlayerSelection::Single(jace.id), RemovalScope::Tournament(tournament.id))
        .unwrap();
    assert_eq!(service.count_players(scope).unwrap(), 1);

    let removed = service
        .delete_players(PlayerSelection::All, RemovalScope::Tournament(tournament.id))
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(service.count_players(scope).unwrap(), 0);
}

#[test]
fn test_count_of_unknown_tournament_is_not_found() {
    let service = TournamentService::in_memory().unwrap();
    let err = service.count_players(CountScope::Tournament(9)).unwrap_err();
    assert!(matches!(err, TournamentError::NotFound(Missing::Tournament(9))));
}

#[test]
fn test_standings_before_any_match() {
    let (service, tournament_id, ids) = setup(&["Melpomene Murray", "Randy Schwartz"]);

    let standings = service.player_standings(tournament_id).unwrap();
    assert_eq!(standings.len(), 2);
    assert!(standings.iter().all(|s| s.wins == 0 && s.matches == 0));

    let names: HashSet<&str> = standings.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, HashSet::from(["Melpomene Murray", "Randy Schwartz"]));
    let listed: HashSet<PlayerId> = standings.iter().map(|s| s.player_id).collect();
    assert_eq!(listed, ids.into_iter().collect::<HashSet<_>>());
}

#[test]
fn test_standings_of_empty_tournament() {
    let service = TournamentService::in_memory().unwrap();
    let tournament = service.create_tournament("Nobody came").unwrap();
    assert!(service.player_standings(tournament.id).unwrap().is_empty());
}

#[test]
fn test_standings_of_unknown_tournament_is_not_found() {
    let service = TournamentService::in_memory().unwrap();
    assert!(service.player_standings(3).unwrap_err().is_not_found());
}

#[test]
fn test_standings_exclude_other_tournaments() {
    let (service, first, _) = setup(&["Bruno Walton", "Cathy Burton"]);
    let second = service.create_tournament("Second Event").unwrap();
    service.register_player(second.id, "Diane Grant", "dgrant@fake.com").unwrap();

    assert_eq!(service.player_standings(first).unwrap().len(), 2);
    assert_eq!(service.player_standings(second.id).unwrap().len(), 1);
}

#[test]
fn test_report_updates_only_the_two_players() {
    let (service, tournament_id, ids) =
        setup(&["Bruno Walton", "Boots O'Neal", "Cathy Burton", "Diane Grant"]);

    service.report_match(tournament_id, ids[0], ids[1]).unwrap();

    let standings = service.player_standings(tournament_id).unwrap();
    let winner = standing_of(&standings, ids[0]);
    let loser = standing_of(&standings, ids[1]);
    assert_eq!((winner.wins, winner.matches), (1, 1));
    assert_eq!((loser.wins, loser.matches), (0, 1));
    for untouched in &ids[2..] {
        let s = standing_of(&standings, *untouched);
        assert_eq!((s.wins, s.matches), (0, 0));
    }
    assert_eq!(standings[0].player_id, ids[0]);
}

#[test]
fn test_delete_matches_resets_counters_but_keeps_players() {
    let (service, tournament_id, ids) =
        setup(&["Bruno Walton", "Boots O'Neal", "Cathy Burton", "Diane Grant"]);
    service.report_match(tournament_id, ids[0], ids[1]).unwrap();
    service.report_match(tournament_id, ids[2], ids[3]).unwrap();

    let standings = service.player_standings(tournament_id).unwrap();
    for s in &standings {
        assert_eq!(s.matches, 1);
        let expected_wins = if s.player_id == ids[0] || s.player_id == ids[2] { 1 } else { 0 };
        assert_eq!(s.wins, expected_wins);
    }

    service.delete_matches(tournament_id).unwrap();

    let after = service.player_standings(tournament_id).unwrap();
    assert_eq!(after.len(), 4);
    assert!(after.iter().all(|s| s.wins == 0 && s.matches == 0));
    let names_before: HashSet<&str> = standings.iter().map(|s| s.name.as_str()).collect();
    let names_after: HashSet<&str> = after.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names_before, names_after);
    assert!(service.list_matches(tournament_id).unwrap().is_empty());
}

#[test]
fn test_four_player_scenario_pairs_by_record() {
    let (service, tournament_id, ids) = setup(&["A", "B", "C", "D"]);
    let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);

    let first_round = service.swiss_pairings(tournament_id).unwrap();
    assert_eq!(first_round.len(), 2);
    let covered: HashSet<PlayerId> = first_round
        .iter()
        .flat_map(|p| [p.player_a, p.player_b])
        .collect();
    assert_eq!(covered, HashSet::from([a, b, c, d]));

    service.report_match(tournament_id, a, b).unwrap();
    service.report_match(tournament_id, c, d).unwrap();

    let standings = service.player_standings(tournament_id).unwrap();
    assert_eq!(standing_of(&standings, a).wins, 1);
    assert_eq!(standing_of(&standings, b).wins, 0);
    assert_eq!(standing_of(&standings, c).wins, 1);
    assert_eq!(standing_of(&standings, d).wins, 0);
    assert!(standings.iter().all(|s| s.matches == 1));

    let second_round = service.swiss_pairings(tournament_id).unwrap();
    assert_eq!(
        pair_set(&second_round),
        HashSet::from([(a.min(c), a.max(c)), (b.min(d), b.max(d))])
    );
}

#[test]
fn test_eight_players_are_all_paired_once() {
    let (service, tournament_id, ids) = setup(&EIGHT);

    let pairings = service.swiss_pairings(tournament_id).unwrap();
    assert_eq!(pairings.len(), 4);

    let mut seen = HashSet::new();
    for p in &pairings {
        assert!(seen.insert(p.player_a));
        assert!(seen.insert(p.player_b));
    }
    assert_eq!(seen, ids.into_iter().collect::<HashSet<_>>());
}

#[test]
fn test_winners_meet_winners_after_one_round() {
    let (service, tournament_id, _) = setup(&EIGHT);

    let standings = service.player_standings(tournament_id).unwrap();
    let ids: Vec<PlayerId> = standings.iter().map(|s| s.player_id).collect();
    assert_eq!(service.swiss_pairings(tournament_id).unwrap().len(), 4);

    service.report_match(tournament_id, ids[0], ids[1]).unwrap();
    service.report_match(tournament_id, ids[2], ids[3]).unwrap();
    service.report_match(tournament_id, ids[4], ids[5]).unwrap();
    service.report_match(tournament_id, ids[6], ids[7]).unwrap();

    let pairings = service.swiss_pairings(tournament_id).unwrap();
    assert_eq!(pairings.len(), 4);

    let winners: HashSet<PlayerId> = [ids[0], ids[2], ids[4], ids[6]].into_iter().collect();
    for p in &pairings {
        assert_eq!(
            winners.contains(&p.player_a),
            winners.contains(&p.player_b),
            "after one match, players with one win should be paired"
        );
    }
}

#[test]
fn test_odd_player_count_writes_no_matches() {
    let (service, tournament_id, _) = setup(&EIGHT[..5]);

    let err = service.swiss_pairings(tournament_id).unwrap_err();
    assert!(matches!(err, TournamentError::OddPlayerCount(5)));
    assert!(service.list_matches(tournament_id).unwrap().is_empty());
    assert_eq!(service.tournament_status(tournament_id).unwrap(), TournamentStatus::Open);
}

#[test]
fn test_empty_tournament_cannot_be_paired() {
    let service = TournamentService::in_memory().unwrap();
    let tournament = service.create_tournament("Empty Hall").unwrap();

    let err = service.swiss_pairings(tournament.id).unwrap_err();
    assert!(matches!(err, TournamentError::EmptyTournament));
}

#[test]
fn test_reported_result_decides_the_scheduled_match() {
    let (service, tournament_id, ids) = setup(&["A", "B"]);
    service.swiss_pairings(tournament_id).unwrap();

    let record = service.report_match(tournament_id, ids[1], ids[0]).unwrap();
    assert_eq!(record.round, 1);
    assert_eq!(record.winner_id, Some(ids[1]));
    assert_eq!(record.loser_id(), Some(ids[0]));

    let history = service.list_matches(tournament_id).unwrap();
    assert_eq!(history, vec![record]);
}

#[test]
fn test_rounds_advance_with_each_pairing() {
    let (service, tournament_id, ids) = setup(&["A", "B", "C", "D"]);

    service.swiss_pairings(tournament_id).unwrap();
    service.report_match(tournament_id, ids[0], ids[1]).unwrap();
    service.report_match(tournament_id, ids[2], ids[3]).unwrap();
    service.swiss_pairings(tournament_id).unwrap();

    let summary = service.tournament_summary(tournament_id).unwrap();
    assert_eq!(summary.round, Some(2));
    assert_eq!(summary.players, 4);

    let rounds: Vec<u32> = service
        .list_matches(tournament_id)
        .unwrap()
        .iter()
        .map(|m| m.round)
        .collect();
    assert_eq!(rounds, vec![1, 1, 2, 2]);
}

#[test]
fn test_duplicate_report_is_rejected() {
    let (service, tournament_id, ids) = setup(&["A", "B"]);
    service.report_match(tournament_id, ids[0], ids[1]).unwrap();

    let again = service.report_match(tournament_id, ids[0], ids[1]).unwrap_err();
    assert!(matches!(again, TournamentError::DuplicateReport { round: 1, .. }));

    let reversed = service.report_match(tournament_id, ids[1], ids[0]).unwrap_err();
    assert!(matches!(reversed, TournamentError::DuplicateReport { .. }));

    let standings = service.player_standings(tournament_id).unwrap();
    assert_eq!(standing_of(&standings, ids[0]).matches, 1);
    assert_eq!(standing_of(&standings, ids[1]).matches, 1);
}

#[test]
fn test_same_pair_may_meet_again_in_a_later_round() {
    let (service, tournament_id, ids) = setup(&["A", "B"]);
    service.swiss_pairings(tournament_id).unwrap();
    service.report_match(tournament_id, ids[0], ids[1]).unwrap();

    service.swiss_pairings(tournament_id).unwrap();
    let rematch = service.report_match(tournament_id, ids[0], ids[1]).unwrap();
    assert_eq!(rematch.round, 2);

    let standings = service.player_standings(tournament_id).unwrap();
    assert_eq!(standing_of(&standings, ids[0]).wins, 2);
    assert_eq!(standing_of(&standings, ids[1]).matches, 2);
}

#[test]
fn test_report_requires_both_participants() {
    let (service, tournament_id, ids) = setup(&["A", "B"]);
    let other = service.create_tournament("Elsewhere").unwrap();
    let outsider = service.register_player(other.id, "C", "c@fake.com").unwrap();

    let err = service.report_match(tournament_id, ids[0], outsider.id).unwrap_err();
    assert!(matches!(
        err,
        TournamentError::NotFound(Missing::Participation { player_id, .. }) if player_id == outsider.id
    ));

    let standings = service.player_standings(tournament_id).unwrap();
    assert!(standings.iter().all(|s| s.matches == 0));
    assert!(service.list_matches(tournament_id).unwrap().is_empty());
}

#[test]
fn test_player_cannot_beat_themselves() {
    let (service, tournament_id, ids) = setup(&["A", "B"]);
    let err = service.report_match(tournament_id, ids[0], ids[0]).unwrap_err();
    assert!(matches!(err, TournamentError::SelfMatch(_)));
}

#[test]
fn test_registering_twice_is_rejected() {
    let (service, tournament_id, ids) = setup(&["Rarity"]);

    let err = service
        .register_player(tournament_id, "Rarity", &email_for("Rarity"))
        .unwrap_err();
    assert!(matches!(err, TournamentError::AlreadyRegistered { player_id, .. } if player_id == ids[0]));
    assert_eq!(service.count_players(CountScope::Tournament(tournament_id)).unwrap(), 1);
}

#[test]
fn test_same_email_is_the_same_player_across_tournaments() {
    let (service, first, ids) = setup(&["Rarity"]);
    let second = service.create_tournament("Second Event").unwrap();

    let again = service
        .register_player(second.id, "Rarity Belle", &email_for("Rarity"))
        .unwrap();
    assert_eq!(again.id, ids[0]);
    assert_eq!(again.name, "Rarity");
    assert_eq!(service.count_players(CountScope::ActivePlayers).unwrap(), 1);
    assert_eq!(service.count_players(CountScope::Tournament(first)).unwrap(), 1);
    assert_eq!(service.count_players(CountScope::Tournament(second.id)).unwrap(), 1);
}

#[test]
fn test_global_removal_deactivates_and_registration_reactivates() {
    let (service, tournament_id, ids) = setup(&["A", "B", "C"]);
    service.report_match(tournament_id, ids[0], ids[1]).unwrap();

    let removed = service
        .delete_players(PlayerSelection::Single(ids[0]), RemovalScope::Everywhere)
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(service.count_players(CountScope::ActivePlayers).unwrap(), 2);
    assert_eq!(service.count_players(CountScope::Tournament(tournament_id)).unwrap(), 2);
    // history stays
    assert_eq!(service.list_matches(tournament_id).unwrap().len(), 1);

    let back = service.register_player(tournament_id, "A", &email_for("A")).unwrap();
    assert_eq!(back.id, ids[0]);
    assert_eq!(back.status, PlayerStatus::Active);
    assert_eq!(service.count_players(CountScope::ActivePlayers).unwrap(), 3);
    let standings = service.player_standings(tournament_id).unwrap();
    assert_eq!(standing_of(&standings, ids[0]).wins, 1);
    assert_eq!(standing_of(&standings, ids[0]).matches, 1);
}

#[test]
fn test_removing_everyone_everywhere() {
    let (service, first, _) = setup(&["A", "B"]);
    let second = service.create_tournament("Second Event").unwrap();
    service.register_player(second.id, "C", "c@fake.com").unwrap();

    let removed = service
        .delete_players(PlayerSelection::All, RemovalScope::Everywhere)
        .unwrap();
    assert_eq!(removed, 3);
    assert_eq!(service.count_players(CountScope::ActivePlayers).unwrap(), 0);
    assert_eq!(service.count_players(CountScope::Tournament(first)).unwrap(), 0);
    assert_eq!(service.count_players(CountScope::Tournament(second.id)).unwrap(), 0);
}

#[test]
fn test_enroll_existing_player() {
    let (service, _, ids) = setup(&["A"]);
    service
        .delete_players(PlayerSelection::Single(ids[0]), RemovalScope::Everywhere)
        .unwrap();
    let next = service.create_tournament("Next").unwrap();

    let row = service.enroll_player(next.id, ids[0]).unwrap();
    assert_eq!((row.wins, row.matches), (0, 0));
    assert_eq!(service.count_players(CountScope::ActivePlayers).unwrap(), 1);

    let err = service.enroll_player(next.id, ids[0]).unwrap_err();
    assert!(matches!(err, TournamentError::AlreadyRegistered { .. }));
    let missing = service.enroll_player(next.id, 999).unwrap_err();
    assert!(matches!(missing, TournamentError::NotFound(Missing::Player(999))));
}

#[test]
fn test_removing_absent_participant_is_not_found() {
    let (service, tournament_id, _) = setup(&["A"]);
    let err = service
        .delete_players(PlayerSelection::Single(77), RemovalScope::Tournament(tournament_id))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_rejoining_player_keeps_their_record() {
    let (service, tournament_id, ids) = setup(&["A", "B"]);
    service.report_match(tournament_id, ids[0], ids[1]).unwrap();
    service
        .delete_players(PlayerSelection::Single(ids[0]), RemovalScope::Tournament(tournament_id))
        .unwrap();

    service.register_player(tournament_id, "A", &email_for("A")).unwrap();
    let standings = service.player_standings(tournament_id).unwrap();
    assert_eq!((standings[0].player_id, standings[0].wins, standings[0].matches), (ids[0], 1, 1));
    assert_eq!(standing_of(&standings, ids[1]).matches, 1);

    let err = service.report_match(tournament_id, ids[0], ids[1]).unwrap_err();
    assert!(matches!(err, TournamentError::DuplicateReport { round: 1, .. }));

    service.swiss_pairings(tournament_id).unwrap();
    let record = service.report_match(tournament_id, ids[1], ids[0]).unwrap();
    assert_eq!(record.round, 2);
    let standings = service.player_standings(tournament_id).unwrap();
    assert_eq!((standing_of(&standings, ids[0]).wins, standing_of(&standings, ids[0]).matches), (1, 2));
    assert_eq!((standing_of(&standings, ids[1]).wins, standing_of(&standings, ids[1]).matches), (1, 2));
}

#[test]
fn test_unknown_tournaments_leave_no_locks_behind() {
    let service = TournamentService::in_memory().unwrap();
    for id in 1000..1500 {
        assert!(service.player_standings(id).unwrap_err().is_not_found());
    }
    assert_eq!(service.locks.tracked(), 0);

    let tournament = service.create_tournament("Known").unwrap();
    service.player_standings(tournament.id).unwrap();
    assert_eq!(service.locks.tracked(), 0);
}

#[test]
fn test_status_follows_the_lifecycle() {
    let service = TournamentService::in_memory().unwrap();
    let tournament = service.create_tournament("Lifecycle").unwrap();
    assert_eq!(service.tournament_status(tournament.id).unwrap(), TournamentStatus::Created);

    let a = service.register_player(tournament.id, "A", "a@fake.com").unwrap();
    let b = service.register_player(tournament.id, "B", "b@fake.com").unwrap();
    assert_eq!(service.tournament_status(tournament.id).unwrap(), TournamentStatus::Open);

    service.swiss_pairings(tournament.id).unwrap();
    service.report_match(tournament.id, a.id, b.id).unwrap();
    assert_eq!(service.tournament_status(tournament.id).unwrap(), TournamentStatus::InProgress);

    service.delete_matches(tournament.id).unwrap();
    assert_eq!(service.tournament_status(tournament.id).unwrap(), TournamentStatus::Open);
}

#[test]
fn test_reset_is_scoped_to_one_tournament() {
    let (service, first, ids) = setup(&["A", "B"]);
    let second = service.create_tournament("Second Event").unwrap();
    service.enroll_player(second.id, ids[0]).unwrap();
    service.enroll_player(second.id, ids[1]).unwrap();

    service.report_match(first, ids[0], ids[1]).unwrap();
    service.report_match(second.id, ids[1], ids[0]).unwrap();
    service.delete_matches(first).unwrap();

    let untouched = service.player_standings(second.id).unwrap();
    assert_eq!(standing_of(&untouched, ids[1]).wins, 1);
    assert_eq!(service.list_matches(second.id).unwrap().len(), 1);
}

#[test]
fn test_blank_input_is_rejected() {
    let service = TournamentService::in_memory().unwrap();
    assert!(matches!(
        service.create_tournament("   "),
        Err(TournamentError::InvalidInput(_))
    ));

    let tournament = service.create_tournament("Valid").unwrap();
    assert!(matches!(
        service.register_player(tournament.id, "", "x@fake.com"),
        Err(TournamentError::InvalidInput(_))
    ));
    assert!(matches!(
        service.register_player(tournament.id, "X", " "),
        Err(TournamentError::InvalidInput(_))
    ));
}

#[test]
fn test_concurrent_reports_are_serialized() {
    let path = std::env::temp_dir().join(format!("swiss_tournament_test_{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let pool = database::create_pool(path.to_str().unwrap(), 4).unwrap();
    let service = TournamentService::new(pool).unwrap();
    let tournament = service.create_tournament("Parallel Open").unwrap();
    for name in EIGHT {
        service.register_player(tournament.id, name, &email_for(name)).unwrap();
    }
    let pairings = service.swiss_pairings(tournament.id).unwrap();

    std::thread::scope(|scope| {
        for pairing in &pairings {
            let service = &service;
            scope.spawn(move || {
                service
                    .report_match(tournament.id, pairing.player_a, pairing.player_b)
                    .unwrap();
            });
        }
    });

    let standings = service.player_standings(tournament.id).unwrap();
    assert_eq!(standings.iter().map(|s| s.wins).sum::<u32>(), 4);
    assert!(standings.iter().all(|s| s.matches == 1));
    assert!(service.list_matches(tournament.id).unwrap().iter().all(MatchRecord::is_decided));

    drop(service);
    let _ = std::fs::remove_file(&path);
}
