//! Tracing subscriber installation for embedders.

use tracing_subscriber::EnvFilter;

use crate::error::{GameError, GameResult};
use crate::formatter::TickFormatter;

/// Installs the global tracing subscriber with the tick-tagged formatter.
///
/// The log filter is read from `RUST_LOG`, falling back to `info`. Embedders
/// that install their own subscriber can skip this entirely.
pub fn init() -> GameResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(TickFormatter)
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(|e| GameError::Logging(e.to_string()))
}
