use backgammon::backgammon::{GameOutcome, Player};
use backgammon::simulation::{play_random_game, simulate};

#[test]
fn test_random_games_keep_every_checker() {
    // Conservation is asserted after every move inside the harness.
    let report = simulate(24, 7, 5_000);
    assert_eq!(report.games, 24);
    assert_eq!(report.unfinished(), 0);
    assert_eq!(report.wins(Player::White) + report.wins(Player::Black), 24);
    assert!(report.average_turns() > 10.0);
}

#[test]
fn test_seeds_are_offset_per_game() {
    let report = simulate(3, 40, 5_000);
    let replayed: Vec<GameOutcome> = (40..43).map(|seed| play_random_game(seed, 5_000).outcome).collect();
    for outcome in replayed {
        assert!(report.count(outcome) >= 1);
    }
}
