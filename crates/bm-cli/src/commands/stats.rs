use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use bm_core::{CharacterProfile, ItemKind};
use bm_session::GameConfig;

use crate::terminal::TerminalSink;

pub fn run(data_dir: &Path, character: Option<&str>) -> Result<(), String> {
    let mut game = super::load_game(data_dir, GameConfig::default(), TerminalSink::new())?;

    if let Some(key) = character {
        game.select_character(key).map_err(|e| e.to_string())?;
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["Character".to_string(), "Level".into(), "Exp".into()];
    header.extend(ItemKind::ALL.iter().map(|k| k.to_string()));
    table.set_header(header);

    for profile in CharacterProfile::roster() {
        let progress = game
            .progression()
            .progress(&profile.id)
            .map_err(|e| e.to_string())?;
        let mut row = vec![
            format!("{} {}", profile.avatar, profile.name),
            progress.level.to_string(),
            format!("{}/{}", progress.experience, progress.threshold()),
        ];
        row.extend(
            ItemKind::ALL
                .iter()
                .map(|k| progress.item_count(*k).to_string()),
        );
        table.add_row(row);
    }

    println!("{table}");
    Ok(())
}
