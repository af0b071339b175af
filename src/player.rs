//! Players and move search.
//!
//! This module provides everything between the board and the game loop:
//! - The move representation (action + target node by position and level)
//! - Rejection sampling of structurally valid moves
//! - Move application against the authoritative board
//! - The three player variants: human, random, and smart (best-of-N)
//! - Roster construction with randomly generated goals
//!
//! Search never touches the board it was handed: every speculative action
//! runs on a clone, and the accepted move carries the target's position and
//! level, which identify the same node in the authoritative tree.

use crate::block::{Block, Rotation, SwapDirection};
use crate::constants::*;
use crate::goal::{Goal, generate_goals};

/// One of the seven board actions, or a pass.
///
/// Paint carries the painting player's goal colour so that a move is
/// self-contained when the game loop applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Rotate(Rotation),
    Swap(SwapDirection),
    Smash,
    Paint(Colour),
    Combine,
    Pass,
}

/// A move: an action aimed at the block whose upper-left corner and level
/// are given. Moves are routinely computed against a throwaway copy of the
/// board; position and level survive the copy boundary, so applying the
/// move re-resolves the node in whichever tree it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub action: Action,
    pub position: (u32, u32),
    pub level: u32,
}

impl Move {
    /// The pass move for `board`, aimed at its root.
    pub fn pass(board: &Block) -> Move {
        Move {
            action: Action::Pass,
            position: board.position(),
            level: board.level(),
        }
    }

    /// Whether this move is a pass.
    #[inline]
    pub fn is_pass(&self) -> bool {
        self.action == Action::Pass
    }
}

/// Run `action` against `block`, reporting whether it was performed.
fn perform(block: &mut Block, action: Action, rng: &mut fastrand::Rng) -> bool {
    match action {
        Action::Rotate(rotation) => block.rotate(rotation),
        Action::Swap(direction) => block.swap(direction),
        Action::Smash => block.smash(rng),
        Action::Paint(colour) => block.paint(colour),
        Action::Combine => block.combine(),
        Action::Pass => false,
    }
}

/// Apply `mv` to the matching node of `board`.
///
/// The target is re-resolved by position and level, then the action runs on
/// it. Returns the mutator's performed/not-performed status; a pass (or a
/// target that falls outside the board) performs nothing. Smash draws fresh
/// colours here, so applying a sampled smash move is itself random.
pub fn apply_move(board: &mut Block, mv: &Move, rng: &mut fastrand::Rng) -> bool {
    let Some(target) = board.block_at_mut(mv.position, mv.level) else {
        return false;
    };
    perform(target, mv.action, rng)
}

/// Uniform draw over the seven non-pass actions.
fn random_action(paint_colour: Colour, rng: &mut fastrand::Rng) -> Action {
    match rng.u32(0..7) {
        0 => Action::Rotate(Rotation::Clockwise),
        1 => Action::Rotate(Rotation::CounterClockwise),
        2 => Action::Swap(SwapDirection::Vertical),
        3 => Action::Swap(SwapDirection::Horizontal),
        4 => Action::Smash,
        5 => Action::Combine,
        _ => Action::Paint(paint_colour),
    }
}

/// Sample a structurally valid move by rejection: draw a target level, walk
/// random children down to it (stopping early at a leaf), draw an action,
/// and test it on a disposable copy of the board. The first action a
/// mutator accepts becomes the move; `paint_colour` is the colour a drawn
/// paint action would apply.
///
/// Returns `None` only if [`MAX_MOVE_ATTEMPTS`] draws were all rejected,
/// which requires a board with no valid move at all (for instance a lone
/// max-depth-0 leaf already painted `paint_colour`).
pub fn create_valid_move(
    board: &Block,
    paint_colour: Colour,
    rng: &mut fastrand::Rng,
) -> Option<Move> {
    for _ in 0..MAX_MOVE_ATTEMPTS {
        let target_level = rng.u32(0..=board.max_depth());
        let mut copy = board.clone();
        let mut node: &mut Block = &mut copy;
        while node.level() < target_level && !node.is_leaf() {
            let index = rng.usize(0..4);
            node = &mut node.quadrants_mut()[index];
        }
        let action = random_action(paint_colour, rng);
        if perform(node, action, rng) {
            // Position and level identify the same node in `board`; no
            // mutator moves or re-levels the node it runs on.
            return Some(Move {
                action,
                position: node.position(),
                level: node.level(),
            });
        }
    }
    None
}

/// A human player's UI-fed state: a cursor, a selection depth, and at most
/// one queued action. The surrounding input layer owns the actual devices
/// and calls the setters here; the core only resolves the selection and
/// emits the move.
#[derive(Debug, Clone)]
pub struct HumanPlayer {
    id: usize,
    goal: Goal,
    selection_level: u32,
    cursor: Option<(u32, u32)>,
    desired_action: Option<Action>,
}

impl HumanPlayer {
    pub fn new(id: usize, goal: Goal) -> HumanPlayer {
        HumanPlayer {
            id,
            goal,
            selection_level: 0,
            cursor: None,
            desired_action: None,
        }
    }

    /// Update the pointed-at board location, if any.
    pub fn set_cursor(&mut self, cursor: Option<(u32, u32)>) {
        self.cursor = cursor;
    }

    /// Move the selection one level toward the root and drop any queued
    /// action.
    pub fn select_shallower(&mut self) {
        self.selection_level = self.selection_level.saturating_sub(1);
        self.desired_action = None;
    }

    /// Move the selection one level deeper and drop any queued action. The
    /// level is clamped to the board's max depth at lookup time.
    pub fn select_deeper(&mut self) {
        self.selection_level += 1;
        self.desired_action = None;
    }

    /// Queue the action to perform on the current selection.
    pub fn set_action(&mut self, action: Action) {
        self.desired_action = Some(action);
    }

    /// The block the cursor currently selects at the chosen level, if the
    /// cursor is on the board.
    pub fn selected_block<'a>(&self, board: &'a Block) -> Option<&'a Block> {
        let cursor = self.cursor?;
        board.block_at(cursor, self.selection_level.min(board.max_depth()))
    }

    fn generate_move(&mut self, board: &Block) -> Option<Move> {
        let action = self.desired_action?;
        let target = self.selected_block(board)?;
        let mv = Move {
            action,
            position: target.position(),
            level: target.level(),
        };
        self.desired_action = None;
        Some(mv)
    }
}

/// An automated player that plays the first valid move it samples.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    id: usize,
    goal: Goal,
    ready: bool,
}

impl RandomPlayer {
    pub fn new(id: usize, goal: Goal) -> RandomPlayer {
        RandomPlayer {
            id,
            goal,
            ready: false,
        }
    }

    fn generate_move(&mut self, board: &Block, rng: &mut fastrand::Rng) -> Option<Move> {
        if !self.ready {
            return None;
        }
        self.ready = false;
        let mv = create_valid_move(board, self.goal.colour(), rng)
            .unwrap_or_else(|| Move::pass(board));
        Some(mv)
    }
}

/// An automated player that samples `difficulty` candidate moves and
/// scores each on its own clone of the board, keeping the single best. It
/// passes when nothing strictly beats the current score.
#[derive(Debug, Clone)]
pub struct SmartPlayer {
    id: usize,
    goal: Goal,
    difficulty: u32,
    ready: bool,
}

impl SmartPlayer {
    pub fn new(id: usize, goal: Goal, difficulty: u32) -> SmartPlayer {
        SmartPlayer {
            id,
            goal,
            difficulty,
            ready: false,
        }
    }

    /// Number of candidates sampled per move.
    #[inline]
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    fn generate_move(&mut self, board: &Block, rng: &mut fastrand::Rng) -> Option<Move> {
        if !self.ready {
            return None;
        }
        self.ready = false;
        let mut best_score = self.goal.score(board);
        let mut best: Option<Move> = None;
        for _ in 0..self.difficulty {
            let mut trial = board.clone();
            let Some(candidate) = create_valid_move(&trial, self.goal.colour(), rng) else {
                continue;
            };
            apply_move(&mut trial, &candidate, rng);
            let score = self.goal.score(&trial);
            if score > best_score {
                best_score = score;
                best = Some(candidate);
            }
        }
        Some(best.unwrap_or_else(|| Move::pass(board)))
    }
}

/// A participant in the game: one of the closed set of player variants,
/// each owning its id and goal.
#[derive(Debug, Clone)]
pub enum Player {
    Human(HumanPlayer),
    Random(RandomPlayer),
    Smart(SmartPlayer),
}

impl Player {
    pub fn id(&self) -> usize {
        match self {
            Player::Human(p) => p.id,
            Player::Random(p) => p.id,
            Player::Smart(p) => p.id,
        }
    }

    pub fn goal(&self) -> &Goal {
        match self {
            Player::Human(p) => &p.goal,
            Player::Random(p) => &p.goal,
            Player::Smart(p) => &p.goal,
        }
    }

    /// Signal an automated player to produce its next move. The game loop
    /// calls this when its pacing event fires; human players pace
    /// themselves through their queued action instead and ignore this.
    pub fn set_ready(&mut self) {
        match self {
            Player::Human(_) => {}
            Player::Random(p) => p.ready = true,
            Player::Smart(p) => p.ready = true,
        }
    }

    /// Produce this player's next move against `board`, or `None` when the
    /// player has nothing to submit yet (not signalled, or an incomplete
    /// human selection). A returned pass is a deliberate move; `None` is
    /// the absence of one. Never mutates `board`.
    pub fn generate_move(&mut self, board: &Block, rng: &mut fastrand::Rng) -> Option<Move> {
        match self {
            Player::Human(p) => p.generate_move(board),
            Player::Random(p) => p.generate_move(board, rng),
            Player::Smart(p) => p.generate_move(board, rng),
        }
    }
}

/// Build a roster: `num_human` human players, then `num_random` random
/// players, then one smart player per entry of `smart_difficulties`, with
/// ids in construction order and goals from [`generate_goals`] (one
/// strategy for the batch, distinct colours).
///
/// # Panics
///
/// Panics if the roster is larger than the palette.
pub fn create_players(
    num_human: usize,
    num_random: usize,
    smart_difficulties: &[u32],
    rng: &mut fastrand::Rng,
) -> Vec<Player> {
    let total = num_human + num_random + smart_difficulties.len();
    let goals = generate_goals(total, rng);
    let mut players = Vec::with_capacity(total);
    for (id, goal) in goals.into_iter().enumerate() {
        let player = if id < num_human {
            Player::Human(HumanPlayer::new(id, goal))
        } else if id < num_human + num_random {
            Player::Random(RandomPlayer::new(id, goal))
        } else {
            let difficulty = smart_difficulties[id - num_human - num_random];
            Player::Smart(SmartPlayer::new(id, goal, difficulty))
        };
        players.push(player);
    }
    players
}
