use std::path::Path;

use bm_session::GameConfig;

use crate::terminal::TerminalSink;

pub fn run(data_dir: &Path, character: &str, details: bool) -> Result<(), String> {
    let sink = if details {
        TerminalSink::with_all_details()
    } else {
        TerminalSink::new()
    };
    let mut game = super::load_game(data_dir, GameConfig::default(), sink)?;
    game.select_character(character).map_err(|e| e.to_string())?;
    game.show_history().map_err(|e| e.to_string())
}
