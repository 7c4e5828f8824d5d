pub mod history;
pub mod play;
pub mod stats;
pub mod toggle;
pub mod topics;

use std::path::Path;

use bm_session::{Game, GameConfig, SystemClock};

use crate::store::JsonFileStore;
use crate::terminal::TerminalSink;

/// The game as the terminal sees it.
pub type TerminalGame = Game<JsonFileStore, TerminalSink, SystemClock>;

/// Load the saved game in `data_dir`.
fn load_game(
    data_dir: &Path,
    config: GameConfig,
    sink: TerminalSink,
) -> Result<TerminalGame, String> {
    let store = JsonFileStore::open(data_dir)
        .map_err(|e| format!("cannot open data directory {}: {e}", data_dir.display()))?;
    Ok(Game::new(config, store, sink, SystemClock::new()))
}
