//! Picred - Picross ROM puzzle level editor backend
//!
//! This is the main library crate: the puzzle-table accessor, the level
//! catalog, and the editing session a frontend drives.

pub mod catalog;
pub mod rom;
pub mod session;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "picred=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Picred initializing...");
}
