//! Centralized error types for the simulation.
//!
//! This module defines all error types used throughout the crate,
//! providing a consistent error handling approach.

use bevy_ecs::event::Event;

/// Main error type for the simulation.
///
/// This is the primary error type that should be used in public APIs. It is
/// registered as an ECS event so systems can report problems without
/// panicking; a draining system logs them once per tick.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while validating external commands.
///
/// These are guard failures, not faults: the offending command is ignored
/// and the simulation continues unchanged.
#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("Card choice {0} is out of range")]
    ChoiceOutOfRange(usize),

    #[error("No {0} choice is pending")]
    NotChoosing(&'static str),

    #[error("Restart requested while a run is still active")]
    RunStillActive,
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
