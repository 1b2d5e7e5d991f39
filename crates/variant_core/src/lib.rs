//! Variant chess rule engine.
//!
//! Board state and move generation for boards from 5x5 to 26x26, a
//! composable rule chain (standard chess, the bureaucrat piece, several moves
//! per turn), start position derivation with resizing and Chess960 shuffles,
//! and a click-driven controller that a presentation layer drives.
//!
//! ```no_run
//! use variant_core::{new_game, preset};
//!
//! let standard = preset("Standard").unwrap();
//! let mut game = new_game(&standard, &standard.configuration()).unwrap();
//! game.handle_click(4, 6); // e2
//! game.handle_click(4, 4); // e4
//! assert_eq!(game.view_state().move_history, vec!["e2-e4"]);
//! ```

pub mod board;
pub mod bureaucrat;
pub mod config;
pub mod controller;
pub mod error;
pub mod fen;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod rule_builder;
pub mod rules;
pub mod start_position;
pub mod types;

pub use board::*;
pub use bureaucrat::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use fen::{decode, encode, normalize, STANDARD_FEN};
pub use movegen::*;
pub use notation::*;
pub use perft::{perft, perft_with_rules};
pub use rule_builder::build_rules;
pub use rules::*;
pub use start_position::*;
pub use types::*;
