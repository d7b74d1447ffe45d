//! End-to-end games driven through `Game::play`.

use chess_rules_core::board::{Side, Square, Wing};
use chess_rules_core::{Game, Message, MoveOutcome, PieceKind};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn game_from(placement: &str, side: Side) -> Game {
    Game::from_placement(placement, side).unwrap()
}

fn kind_at(game: &Game, square: &str) -> Option<(PieceKind, Side)> {
    game.position().piece_at(sq(square)).map(|p| (p.kind, p.side))
}

fn assert_illegal_and_unchanged(game: &mut Game, command: &str) {
    let before = game.position().clone();
    let outcome = game.play(command);
    assert_eq!(outcome.message, Some(Message::IllegalMove), "{command} should be illegal");
    assert_eq!(game.position(), &before, "{command} changed the board");
}

#[test]
fn test_start_yields_standard_table() {
    let game = Game::start();
    let expected = [
        ("a1", PieceKind::Rook),
        ("b1", PieceKind::Knight),
        ("c1", PieceKind::Bishop),
        ("d1", PieceKind::Queen),
        ("e1", PieceKind::King),
        ("f1", PieceKind::Bishop),
        ("g1", PieceKind::Knight),
        ("h1", PieceKind::Rook),
    ];
    for (white_sq, kind) in expected {
        let black_sq = white_sq.replace('1', "8");
        assert_eq!(kind_at(&game, white_sq), Some((kind, Side::White)));
        assert_eq!(kind_at(&game, &black_sq), Some((kind, Side::Black)));
    }
    for file in "abcdefgh".chars() {
        assert_eq!(kind_at(&game, &format!("{file}2")), Some((PieceKind::Pawn, Side::White)));
        assert_eq!(kind_at(&game, &format!("{file}7")), Some((PieceKind::Pawn, Side::Black)));
    }
    assert_eq!(game.position().pieces().len(), 32);
    assert_eq!(game.side_to_move(), Side::White);
}

#[test]
fn test_double_step_only_from_start_rank() {
    let mut game = Game::start();
    assert_eq!(game.play("a2 a4").message, None);
    assert_eq!(game.play("h7 h5").message, None);
    assert_illegal_and_unchanged(&mut game, "a4 a6");
    assert_eq!(game.play("a4 a5").message, None);
}

#[test]
fn test_promotion_explicit_and_default() {
    let mut game = game_from("7k/P7/8/8/8/8/8/4K3", Side::White);
    assert_eq!(game.play("a7 a8 Q").message, None);
    assert_eq!(kind_at(&game, "a8"), Some((PieceKind::Queen, Side::White)));

    let mut game = game_from("7k/P7/8/8/8/8/8/4K3", Side::White);
    assert_eq!(game.play("a7 a8").message, None);
    assert_eq!(kind_at(&game, "a8"), Some((PieceKind::Queen, Side::White)));

    let mut game = game_from("7k/8/8/8/8/8/1p6/4K3", Side::Black);
    assert_eq!(game.play("b2 b1 n").message, None);
    assert_eq!(kind_at(&game, "b1"), Some((PieceKind::Knight, Side::Black)));
}

#[test]
fn test_promotion_by_capture() {
    let mut game = game_from("1r5k/P7/8/8/8/8/8/4K3", Side::White);
    let outcome = game.play("a7 b8 B");
    assert_eq!(outcome.message, None);
    assert_eq!(outcome.pieces.len(), 3);
    assert_eq!(kind_at(&game, "b8"), Some((PieceKind::Bishop, Side::White)));
}

#[test]
fn test_castling_from_start_needs_cleared_rank() {
    let mut game = Game::start();
    assert_illegal_and_unchanged(&mut game, "e1 g1");

    game.replay(["g1 f3", "a7 a6", "e2 e3", "a6 a5", "f1 e2", "a5 a4"]).unwrap();
    let outcome = game.play("e1 g1");
    assert_eq!(outcome.message, None);
    assert_eq!(kind_at(&game, "g1"), Some((PieceKind::King, Side::White)));
    assert_eq!(kind_at(&game, "f1"), Some((PieceKind::Rook, Side::White)));
    assert_eq!(kind_at(&game, "e1"), None);
    assert_eq!(kind_at(&game, "h1"), None);
    assert_eq!(game.side_to_move(), Side::Black);
    assert!(game.position().rights().king_moved(Side::White));
}

#[test]
fn test_castling_queenside_black() {
    let mut game = game_from("r3k3/8/8/8/8/8/8/4K3", Side::Black);
    assert_eq!(game.play("e8 c8").message, None);
    assert_eq!(kind_at(&game, "c8"), Some((PieceKind::King, Side::Black)));
    assert_eq!(kind_at(&game, "d8"), Some((PieceKind::Rook, Side::Black)));
}

#[test]
fn test_castling_refused_through_attack() {
    let mut game = game_from("4k3/8/8/8/8/8/5r2/4K2R", Side::White);
    assert_illegal_and_unchanged(&mut game, "e1 g1");

    let mut game = game_from("4k3/8/8/8/8/8/8/r3K2R", Side::White);
    assert_illegal_and_unchanged(&mut game, "e1 g1");
}

#[test]
fn test_rights_are_sticky() {
    let mut game = game_from("4k3/p7/8/8/8/8/8/4K2R", Side::White);
    game.replay(["h1 h2", "a7 a6", "h2 h1", "a6 a5"]).unwrap();
    assert_eq!(kind_at(&game, "h1"), Some((PieceKind::Rook, Side::White)));
    assert!(game.position().rights().rook_moved(Side::White, Wing::Kingside));
    assert_illegal_and_unchanged(&mut game, "e1 g1");

    let mut game = game_from("4k3/p7/8/8/8/8/8/4K2R", Side::White);
    game.replay(["e1 f1", "a7 a6", "f1 e1", "a6 a5"]).unwrap();
    assert_illegal_and_unchanged(&mut game, "e1 g1");
}

#[test]
fn test_resignation_reports_winner_and_keeps_board() {
    let mut game = Game::start();
    let before = game.position().clone();
    let outcome = game.play("resign");
    assert_eq!(outcome.message, Some(Message::BlackWinsByResignation));
    assert_eq!(game.position(), &before);

    let mut game = Game::start();
    game.play("e2 e4");
    assert_eq!(game.play("resign").message, Some(Message::WhiteWinsByResignation));
}

#[test]
fn test_captures_remove_the_victim() {
    let mut game = Game::start();
    game.replay(["e2 e4", "d7 d5"]).unwrap();
    let MoveOutcome { pieces, message } = game.play("e4 d5");
    assert_eq!(message, None);
    assert_eq!(pieces.len(), 31);
    assert_eq!(kind_at(&game, "d5"), Some((PieceKind::Pawn, Side::White)));

    game.replay(["d8 d5"]).unwrap();
    assert_eq!(kind_at(&game, "d5"), Some((PieceKind::Queen, Side::Black)));
    assert_eq!(game.position().pieces().len(), 30);
}

#[test]
fn test_every_rejection_path_leaves_board_identical() {
    let mut game = Game::start();
    game.replay(["e2 e4", "e7 e5", "g1 f3", "b8 c6"]).unwrap();

    for command in [
        "resign now",
        "e4 e5",
        "f3 f3",
        "d1 h5 x",
        "e5 e4",
        "f3 d2",
        "f1 a6 Q draw? x",
        "a1 a3",
        "c1 h6",
        "d1 d3",
        "e1 e3",
        "e1 c1",
        "e1 g1",
        "h2 h5",
        "f3 g6",
    ] {
        assert_illegal_and_unchanged(&mut game, command);
    }
    assert_eq!(game.side_to_move(), Side::White);
}
