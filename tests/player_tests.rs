//! Integration tests for players and move search.
//!
//! These drive the rules engine the way a game front end would: rosters
//! from [`create_players`], ready signals, sampled moves applied to the
//! authoritative board, and goal scores read off the result.

use quadsmash::block::{Block, Rotation, generate_board};
use quadsmash::constants::*;
use quadsmash::goal::Goal;
use quadsmash::player::{
    Action, HumanPlayer, Move, Player, RandomPlayer, SmartPlayer, apply_move, create_players,
    create_valid_move,
};

// =============================================================================
// Helper functions
// =============================================================================

fn seeded(seed: u64) -> fastrand::Rng {
    fastrand::Rng::with_seed(seed)
}

/// Walk the whole tree checking the structural rules: four children or
/// none, colour exactly on leaves, and every child's position, size, level
/// and max depth derived from its parent.
fn check_invariants(block: &Block) {
    let children = block.children();
    if children.is_empty() {
        assert!(block.colour().is_some(), "a leaf always has a colour");
        return;
    }
    assert_eq!(children.len(), 4, "a subdivided block has exactly four children");
    let (x, y) = block.position();
    let half = block.size().div_ceil(2);
    let corners = [(x + half, y), (x, y), (x, y + half), (x + half, y + half)];
    for (child, corner) in children.iter().zip(corners) {
        assert_eq!(child.position(), corner, "children sit at the quadrant corners");
        assert_eq!(child.size(), half);
        assert_eq!(child.level(), block.level() + 1);
        assert_eq!(child.max_depth(), block.max_depth());
        check_invariants(child);
    }
}

/// Size-8 depth-1 board with all four children painted `colour`.
fn monochrome_quad(colour: Colour, rng: &mut fastrand::Rng) -> Block {
    let mut board = Block::new_leaf((0, 0), 8, colour, 0, 1);
    assert!(board.smash(rng));
    for i in 0..4 {
        board.child_mut(i).unwrap().paint(colour);
    }
    board
}

// =============================================================================
// Moves across board copies
// =============================================================================

#[test]
fn test_moves_survive_board_copies() {
    let mut rng = seeded(1);
    let board = generate_board(3, 640, &mut rng);

    // A move sampled against one tree applies to an equal tree: the target
    // is re-resolved from position and level, not from a borrow.
    for _ in 0..10 {
        let mv = create_valid_move(&board, REAL_RED, &mut rng).unwrap();
        let mut copy = board.clone();
        assert!(
            apply_move(&mut copy, &mv, &mut rng),
            "a sampled move must apply to a copy of its board: {mv:?}"
        );
        check_invariants(&copy);
    }
}

// =============================================================================
// Deterministic sampling
// =============================================================================

#[test]
fn test_move_sampling_is_deterministic() {
    // The same seed replays the whole run: the generated board, every
    // sampled move, and every colour the applied smashes roll.
    let replay = |seed: u64| {
        let mut rng = seeded(seed);
        let mut board = generate_board(3, 64, &mut rng);
        let mut moves: Vec<Move> = Vec::new();
        for _ in 0..25 {
            let mv = create_valid_move(&board, DAFFODIL_DELIGHT, &mut rng)
                .expect("a depth-3 board always has valid moves");
            apply_move(&mut board, &mv, &mut rng);
            moves.push(mv);
        }
        (moves, board)
    };

    let (first_moves, first_board) = replay(77);
    let (second_moves, second_board) = replay(77);
    assert_eq!(first_moves, second_moves, "the same seed samples the same moves");
    assert_eq!(first_board, second_board, "the same seed leaves the same final board");
}

// =============================================================================
// Smart players
// =============================================================================

#[test]
fn test_difficulty_zero_smart_player_passes() {
    let mut rng = seeded(2);
    let mut board = generate_board(2, 64, &mut rng);
    let before = board.clone();

    let mut player = Player::Smart(SmartPlayer::new(0, Goal::blob(REAL_RED), 0));
    player.set_ready();
    let mv = player
        .generate_move(&board, &mut rng)
        .expect("a ready smart player always submits something");
    assert!(mv.is_pass(), "weighing zero candidates leaves only the pass");
    assert!(!apply_move(&mut board, &mv, &mut rng));
    assert_eq!(board, before, "a pass changes nothing");
}

#[test]
fn test_smart_player_takes_a_sure_improvement() {
    let mut rng = seeded(3);
    // All-olive quad: reorders and combine cannot change a blob-of-red
    // score of zero, so the only improving move is painting a child red.
    let mut board = monochrome_quad(OLD_OLIVE, &mut rng);
    let goal = Goal::blob(REAL_RED);
    assert_eq!(goal.score(&board), 0);

    let mut player = Player::Smart(SmartPlayer::new(0, goal, 200));
    player.set_ready();
    let mv = player
        .generate_move(&board, &mut rng)
        .expect("a ready smart player always submits something");
    assert_eq!(
        mv.action,
        Action::Paint(REAL_RED),
        "the only strict improvement is a paint"
    );
    assert_eq!(mv.level, 1);

    assert!(apply_move(&mut board, &mv, &mut rng));
    assert_eq!(goal.score(&board), 1);
}

#[test]
fn test_smart_player_never_picks_a_losing_move() {
    let mut rng = seeded(4);
    // A solid red board under a blob-of-red goal is already perfect; every
    // candidate scores worse or equal, so the player must pass.
    let board = monochrome_quad(REAL_RED, &mut rng);
    let goal = Goal::blob(REAL_RED);
    let perfect = goal.score(&board);
    assert_eq!(perfect, 4, "a solid 2x2 grid is one blob of four");

    let mut player = Player::Smart(SmartPlayer::new(0, goal, 100));
    player.set_ready();
    let mv = player.generate_move(&board, &mut rng).unwrap();
    assert!(mv.is_pass(), "nothing beats a perfect board, got {mv:?}");
}

// =============================================================================
// Random players and passing
// =============================================================================

#[test]
fn test_random_player_passes_when_stuck() {
    // A lone max-depth-0 leaf in the player's own colour has no valid
    // moves at all; sampling gives up and the player passes.
    let mut rng = seeded(5);
    let mut board = Block::new_leaf((0, 0), 8, PACIFIC_POINT, 0, 0);
    let before = board.clone();

    let mut player = Player::Random(RandomPlayer::new(0, Goal::perimeter(PACIFIC_POINT)));
    player.set_ready();
    let mv = player
        .generate_move(&board, &mut rng)
        .expect("a ready random player always submits something");
    assert!(mv.is_pass());
    assert!(!apply_move(&mut board, &mv, &mut rng));
    assert_eq!(board, before);
}

// =============================================================================
// Human players
// =============================================================================

#[test]
fn test_human_player_through_the_roster() {
    let mut rng = seeded(6);
    let board = generate_board(1, 8, &mut rng);
    let mut players = create_players(1, 0, &[], &mut rng);
    assert_eq!(players.len(), 1);

    // The ready signal means nothing to a human without a selection.
    players[0].set_ready();
    assert_eq!(players[0].generate_move(&board, &mut rng), None);

    // Wire up a selection and a queued action the way a front end would.
    let Player::Human(human) = &mut players[0] else {
        panic!("the first roster slot is the human");
    };
    human.set_cursor(Some((7, 7)));
    human.select_deeper();
    human.set_action(Action::Rotate(Rotation::Clockwise));

    let mv = players[0]
        .generate_move(&board, &mut rng)
        .expect("cursor plus queued action yields a move");
    assert_eq!(mv.position, (4, 4), "the cursor selects the lower-right child");
    assert_eq!(mv.level, 1);
}

#[test]
fn test_human_selection_is_read_only() {
    let mut rng = seeded(7);
    let board = generate_board(2, 64, &mut rng);
    let before = board.clone();

    let mut human = HumanPlayer::new(0, Goal::blob(DAFFODIL_DELIGHT));
    human.set_cursor(Some((10, 50)));
    for _ in 0..3 {
        human.select_deeper();
        let selected = human.selected_block(&board).unwrap();
        assert!(selected.contains((10, 50)));
    }
    assert_eq!(board, before, "browsing a selection never touches the board");
}

// =============================================================================
// End-to-end games
// =============================================================================

#[test]
fn test_painting_a_whole_depth_two_board() {
    let mut rng = seeded(8);
    let mut board = Block::new_leaf((0, 0), 8, OLD_OLIVE, 0, 2);
    assert!(board.smash(&mut rng));
    for i in 0..4 {
        let child = board.child_mut(i).unwrap();
        if child.is_leaf() {
            assert!(child.smash(&mut rng));
        }
    }

    // Paint every unit cell red through positional lookup.
    for column in 0..4u32 {
        for row in 0..4u32 {
            let leaf = board
                .block_at_mut((column * 2, row * 2), 2)
                .expect("a fully subdivided board has a leaf in every cell");
            leaf.paint(REAL_RED);
        }
    }

    assert_eq!(
        Goal::blob(REAL_RED).score(&board),
        16,
        "sixteen red cells form one blob"
    );
    assert_eq!(
        Goal::perimeter(REAL_RED).score(&board),
        16,
        "twelve border cells plus four corners counted twice"
    );
}

#[test]
fn test_full_game_soak() {
    let mut rng = seeded(9);
    let mut board = generate_board(3, 640, &mut rng);
    let mut players = create_players(0, 2, &[5], &mut rng);

    for _ in 0..15 {
        for index in 0..players.len() {
            players[index].set_ready();
            let mv = players[index]
                .generate_move(&board, &mut rng)
                .expect("ready automated players always submit");
            apply_move(&mut board, &mv, &mut rng);
            check_invariants(&board);
        }
    }

    // The frame of the board never moves, whatever happened inside it.
    assert_eq!(board.position(), (0, 0));
    assert_eq!(board.size(), 640);
    assert_eq!(board.level(), 0);
    assert_eq!(board.max_depth(), 3);

    // Scores remain well defined for every player.
    for player in &players {
        let _ = player.goal().score(&board);
    }
}
