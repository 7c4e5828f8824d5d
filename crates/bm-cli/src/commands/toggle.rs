use std::path::Path;

use colored::Colorize;

use bm_session::GameConfig;

use crate::terminal::TerminalSink;

pub fn run(data_dir: &Path, index: usize, character: Option<&str>) -> Result<(), String> {
    let mut game = super::load_game(data_dir, GameConfig::default(), TerminalSink::new())?;
    if let Some(key) = character {
        game.select_character(key).map_err(|e| e.to_string())?;
    }

    let visible = game
        .toggle_history_entry(index)
        .map_err(|e| e.to_string())?;
    let state = if visible { "shown" } else { "hidden" };
    println!("  Details for entry {index} are now {}.", state.bold());
    Ok(())
}
