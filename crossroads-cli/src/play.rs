//! Interactive terminal session.
use anyhow::{Context, Result};
use colored::Colorize;
use crossroads_game::{
    Command, Direction, EncounterRules, GameSession, MusicToggle, RngBundle, seeded_session,
};
use std::io::{Stdout, stdout};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::narrative::DirectoryNarrative;
use crate::store::JsonFileStore;
use crate::terminal::{TerminalSoundtrack, TerminalView};

pub struct PlayOptions {
    pub save: PathBuf,
    pub narrative_dir: PathBuf,
    pub seed: u64,
    pub reset: bool,
}

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Game(Command),
    Music,
    Reset,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    let word = line.trim().to_ascii_lowercase();
    match word.as_str() {
        "start" | "new" => Some(Input::Game(Command::Start)),
        "music" | "m" => Some(Input::Music),
        "reset" => Some(Input::Reset),
        "help" | "h" | "?" => Some(Input::Help),
        "quit" | "q" | "exit" => Some(Input::Quit),
        other => other
            .parse::<Direction>()
            .ok()
            .map(|direction| Input::Game(Command::Choose(direction))),
    }
}

type TerminalSession =
    GameSession<JsonFileStore, RngBundle, DirectoryNarrative, TerminalView<Stdout>>;

pub async fn run(options: &PlayOptions, rules: EncounterRules) -> Result<()> {
    let store = JsonFileStore::open(&options.save);
    log::info!(
        "playing with save {} and seed {}",
        store.path().display(),
        options.seed
    );
    let mut session: TerminalSession = seeded_session(
        store,
        options.seed,
        rules,
        DirectoryNarrative::new(&options.narrative_dir),
        TerminalView::new(stdout()),
    );
    if options.reset {
        session.reset_player();
    }
    let mut music = MusicToggle::new(TerminalSoundtrack);

    print_help(&music);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading input")? {
        let Some(input) = parse_input(&line) else {
            if !line.trim().is_empty() {
                session
                    .view_mut()
                    .notice(&format!("Unrecognized input `{}`; type help.", line.trim()));
            }
            continue;
        };
        match input {
            Input::Game(command) => handle_command(&mut session, command).await,
            Input::Music => {
                let label = music.toggle();
                let state = if music.is_playing() { "on" } else { "off" };
                session
                    .view_mut()
                    .notice(&format!("Music {state} ({label})"));
            }
            Input::Reset => session.reset_player(),
            Input::Help => print_help(&music),
            Input::Quit => break,
        }
    }
    Ok(())
}

async fn handle_command(session: &mut TerminalSession, command: Command) {
    if matches!(command, Command::Choose(_)) && !session.view().choices_enabled() {
        let reason = if session.phase().is_terminal() {
            "The journey is over; type start to begin again."
        } else {
            "Type start to begin."
        };
        session.view_mut().notice(reason);
        return;
    }
    if let Err(err) = session.dispatch(command).await {
        session.view_mut().notice(&err.to_string());
    }
}

fn print_help(music: &MusicToggle<TerminalSoundtrack>) {
    println!("{}", "🧭 Crossroads".bright_cyan().bold());
    println!("  start          begin a new run at level 1");
    println!("  l / r / s      go left, right or straight");
    println!("  music          {}", music.label().to_lowercase());
    println!("  reset          restore full health and an empty purse");
    println!("  quit           leave the game (progress is saved)");
}
