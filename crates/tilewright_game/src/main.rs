//! Tilewright - Game Client
//!
//! Usage: `tilewright_game [LEVEL.ron]`

use std::path::PathBuf;

use tilewright_game::LevelSource;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Tilewright");

    let mut source = LevelSource::default();
    if let Some(path) = std::env::args().nth(1) {
        source.level_path = PathBuf::from(path);
    }

    if let Err(e) = tilewright_game::run(source) {
        tracing::error!("Game error: {e}");
        std::process::exit(1);
    }
}
