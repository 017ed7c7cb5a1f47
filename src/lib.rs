//! A Minesweeper game engine.
//!
//! A [`Game`] is configured with a [`Grid`] and a [`Difficulty`], started with
//! [`Game::play`] and then driven with [`Game::visit`] and [`Game::flag`].
//! Whether the player won or lost is reported once through the [`Outcomes`]
//! receiver returned alongside the game:
//!
//! ```
//! use minesweeper::{Difficulty, Game, Grid, Outcome};
//! use std::time::Duration;
//!
//! let (mut game, outcomes) = Game::with_grid(Grid::new(10, 40)?);
//! game.set_difficulty(Difficulty::Easy)?;
//! game.play()?;
//!
//! let mine = game.bomb_locations()[0];
//! assert!(game.visit(mine.x, mine.y).is_err());
//! assert_eq!(outcomes.recv_timeout(Duration::from_secs(5))?, Outcome::Lose);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Rendering is left to the caller, which reads the board through
//! [`Game::blocks`] and the location accessors.

mod block;
mod difficulty;
mod error;
mod game;
mod generator;
mod grid;
mod history;
mod outcome;
mod reveal;
mod store;

pub use block::{Block, Kind};
pub use difficulty::{mine_count, Difficulty, ParseDifficultyError};
pub use error::{Error, Result};
pub use game::{Game, State};
pub use generator::generate;
pub use grid::{Grid, Position};
pub use history::{Action, History, MoveRecord};
pub use outcome::{Outcome, Outcomes};
pub use store::BlockStore;
