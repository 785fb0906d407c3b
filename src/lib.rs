//! Backgammon rules engine.
//!
//! [`backgammon::Game`] owns the board, the dice and the turn. Moves are
//! checked against the rules and applied atomically; illegal moves come
//! back as [`error::MoveError`] without touching the position.

pub mod backgammon;
pub mod config;
pub mod error;
pub mod menu;
pub mod simulation;
