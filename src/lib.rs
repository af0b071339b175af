//! Quadsmash: a quadtree strategy board core.
//!
//! This crate provides the full rules engine for a colour-matching board
//! game played on a recursive quadtree: random board generation, the six
//! mutating actions, goal scoring over a flattened grid, and automated
//! players that search for good moves by sampling.
//!
//! ## Modules
//!
//! - [`constants`] - The colour palette and tuning parameters
//! - [`block`] - The quadtree board and its mutating actions
//! - [`goal`] - Board flattening and goal scoring
//! - [`player`] - Players, move representation, and move search
//!
//! ## Example
//!
//! ```
//! use quadsmash::block::generate_board;
//! use quadsmash::constants::REAL_RED;
//! use quadsmash::goal::Goal;
//! use quadsmash::player::{apply_move, create_valid_move};
//!
//! // Generate a random board
//! let mut rng = fastrand::Rng::with_seed(42);
//! let mut board = generate_board(3, 640, &mut rng);
//! assert_eq!(board.children().len(), 4);
//!
//! // Sample a valid move and play it
//! let mv = create_valid_move(&board, REAL_RED, &mut rng).unwrap();
//! apply_move(&mut board, &mv, &mut rng);
//!
//! // Score the result against a goal
//! let goal = Goal::blob(REAL_RED);
//! println!("Blob score: {}", goal.score(&board));
//! ```

pub mod block;
pub mod constants;
pub mod goal;
pub mod player;
