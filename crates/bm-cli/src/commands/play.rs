use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use colored::Colorize;

use bm_session::{GameConfig, SessionState, SubmitOutcome};

use super::TerminalGame;
use crate::terminal::TerminalSink;

pub fn run(
    data_dir: &Path,
    character: &str,
    topic: &str,
    seed: Option<u64>,
    delay_ms: u64,
) -> Result<(), String> {
    let mut config = GameConfig::default().with_advance_delay(delay_ms);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mut game = super::load_game(data_dir, config, TerminalSink::new())?;
    let profile = game
        .select_character(character)
        .map_err(|e| e.to_string())?;
    let topic = game.select_topic(topic).map_err(|e| e.to_string())?;

    println!(
        "  {} {} as {}",
        "Mining".bold(),
        topic.name,
        profile.name.bold()
    );
    println!("  Type the answer and press enter, 'quit' to leave.");

    game.start().map_err(|e| e.to_string())?;
    check_blocked(&game)?;

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    while game.session().state() != SessionState::Finished {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }

        game.tick();
        let Ok(value) = input.parse::<u32>() else {
            println!("  {}", "Enter one of the numbers shown.".yellow());
            continue;
        };

        match game.submit(value) {
            Ok(SubmitOutcome::Correct { .. }) => {
                wait_for_advance(&mut game);
                check_blocked(&game)?;
            }
            Ok(SubmitOutcome::Wrong { .. }) => {}
            Err(e) => println!("  {}", e.to_string().yellow()),
        }
    }

    if game.session().state() != SessionState::Finished {
        println!("  Session abandoned.");
    }
    Ok(())
}

/// Sleep through the pause after a correct answer, keeping the clocks fed.
fn wait_for_advance(game: &mut TerminalGame) {
    while game.session().is_awaiting_advance() {
        let Some(ms) = game.millis_until_next_timer() else {
            break;
        };
        if ms > 0 {
            thread::sleep(Duration::from_millis(ms));
        }
        game.tick();
    }
}

fn check_blocked(game: &TerminalGame) -> Result<(), String> {
    match game.session().state() {
        SessionState::Blocked { index } => Err(format!(
            "question {} could not be loaded, start a new game",
            index + 1
        )),
        _ => Ok(()),
    }
}
