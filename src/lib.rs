// Nim engine, HTTP controller and tooling around it
pub mod error;
pub mod dice;
pub mod game;
pub mod slot;
pub mod config;
pub mod api;
pub mod server;
pub mod selfplay;

pub use error::NimError;
pub use game::{Difficulty, Match, Move, Side, Status};
