use backgammon::backgammon::{Board, Game, GameOutcome, Player, Position, ScriptedDie, TurnPhase};
use backgammon::error::MoveError;

#[test]
fn test_opening_six_one_makes_the_seven_point() {
    let mut game = Game::new(ScriptedDie::new(vec![6, 1, 4, 2]));
    assert_eq!(game.roll_dice().unwrap(), &[6, 1]);

    game.try_move(Position::Board(12), 6).unwrap();
    assert!(!game.end_turn_if_needed());
    game.try_move(Position::Board(7), 1).unwrap();

    let board = game.board();
    assert_eq!(board.point(6).count, 2);
    assert_eq!(board.point(7).count, 2);
    assert_eq!(board.point(12).count, 4);

    assert!(game.end_turn_if_needed());
    assert_eq!(game.current_player(), Player::Black);
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.history()[0].to_string(), "White 6-1: 13/7 8/7");
    assert_eq!(game.participant(Player::White).turns_played(), 1);

    assert_eq!(game.roll_dice().unwrap(), &[4, 2]);
    assert_eq!(game.phase(), TurnPhase::Moving);
}

#[test]
fn test_doubles_play_four_times() {
    let mut game = Game::new(ScriptedDie::new(vec![3, 3]));
    assert_eq!(game.roll_dice().unwrap(), &[3, 3, 3, 3]);

    for from in [23, 23, 12, 12] {
        assert!(!game.end_turn_if_needed());
        game.try_move(Position::Board(from), 3).unwrap();
    }
    assert_eq!(game.board().point(20).count, 2);
    assert_eq!(game.board().point(9).count, 2);
    assert!(game.end_turn_if_needed());
    assert_eq!(game.current_player(), Player::Black);
    assert_eq!(game.history()[0].len(), 4);
}

#[test]
fn test_combined_move_is_all_or_nothing() {
    let mut game = Game::from_position(Board::new(), Player::Black, ScriptedDie::new(vec![6, 5]));
    game.roll_dice().unwrap();

    assert_eq!(
        game.try_combined_move(Position::Board(0), [6, 5]),
        Err(MoveError::Blocked(Position::Board(5)))
    );
    assert_eq!(*game.board(), Board::new());
    assert_eq!(game.remaining_moves(), &[6, 5]);

    let [first, second] = game.try_combined_move(Position::Board(11), [6, 5]).unwrap();
    assert_eq!(first.to(), Position::Board(16));
    assert_eq!(first.from(), Position::Board(11));
    assert_eq!(second.to(), Position::Board(22));
    assert!(game.end_turn_if_needed());
}

#[test]
fn test_bearing_off_the_last_checker_wins_a_gammon() {
    let mut board = Board::empty();
    board.set_point(0, Some(Player::White), 1);
    board.set_borne_off(Player::White, 14);
    board.set_point(12, Some(Player::Black), 15);
    let mut game = Game::from_position(board, Player::White, ScriptedDie::new(vec![2, 1]));
    game.roll_dice().unwrap();

    let off = game.try_bear_off_click(0).unwrap();
    assert_eq!(off.die(), 1);
    assert!(game.is_game_over());
    assert_eq!(game.winner(), Some(Player::White));
    assert_eq!(game.outcome(), GameOutcome::Gammon(Player::White));
    assert_eq!(game.participant(Player::White).score(), 2);
    assert_eq!(game.roll_dice().err(), Some(MoveError::GameOver));
    assert_eq!(game.switch_turn(), Err(MoveError::GameOver));

    game.reset();
    assert_eq!(game.phase(), TurnPhase::AwaitingRoll);
    assert_eq!(*game.board(), Board::new());
    assert_eq!(game.participant(Player::White).score(), 2);
}

#[test]
fn test_manual_end_discards_unplayed_dice() {
    let mut game = Game::new(ScriptedDie::new(vec![5, 2]));
    game.roll_dice().unwrap();
    game.try_move(Position::Board(12), 5).unwrap();
    game.switch_turn().unwrap();

    assert_eq!(game.current_player(), Player::Black);
    assert!(game.remaining_moves().is_empty());
    assert_eq!(game.history()[0].to_string(), "White 5-2: 13/8");
}
