//! Colored terminal rendering of the game surfaces.
use colored::Colorize;
use crossroads_game::{Asset, GameView, PlayerStats, Soundtrack, messages};
use std::fmt::Display;
use std::io::Write;

/// Writes log entries, announcements and status lines to `out`.
pub struct TerminalView<W: Write> {
    out: W,
    asset: Option<Asset>,
    choices_enabled: bool,
}

impl<W: Write> TerminalView<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out,
            asset: None,
            choices_enabled: false,
        }
    }

    /// Whether the choice inputs are currently accepted.
    pub const fn choices_enabled(&self) -> bool {
        self.choices_enabled
    }

    pub fn notice(&mut self, text: &str) {
        self.write_line(text.yellow());
    }

    fn write_line(&mut self, line: impl Display) {
        if let Err(err) = writeln!(self.out, "{line}") {
            log::warn!("terminal write failed: {err}");
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> GameView for TerminalView<W> {
    fn clear_log(&mut self) {
        self.write_line("-".repeat(40).dimmed());
    }

    fn append_log(&mut self, text: &str) {
        self.write_line(text);
    }

    fn announce(&mut self, text: &str) {
        self.write_line("");
        for line in text.lines() {
            self.write_line(format_args!("  {}", line.bright_cyan().italic()));
        }
        self.write_line("");
    }

    fn show_status(&mut self, stats: PlayerStats) {
        self.write_line(format_args!(
            "[{} | {}]",
            messages::health_label(stats.health).red().bold(),
            messages::treasure_label(stats.treasure).yellow().bold()
        ));
    }

    fn show_asset(&mut self, asset: Asset) {
        self.asset = Some(asset);
    }

    fn set_asset_visible(&mut self, visible: bool) {
        if visible && let Some(asset) = self.asset {
            self.write_line(format!("[{}: {}]", asset.alt_text(), asset.path()).dimmed());
        }
    }

    fn set_choices_enabled(&mut self, enabled: bool) {
        if enabled && !self.choices_enabled {
            self.write_line("Choose: [l]eft, [r]ight, [s]traight".green());
        }
        self.choices_enabled = enabled;
    }
}

/// Terminal stand-in for the looping background track.
#[derive(Debug, Default)]
pub struct TerminalSoundtrack;

impl Soundtrack for TerminalSoundtrack {
    fn play_looped(&mut self) {
        log::info!("background track looping");
    }

    fn pause(&mut self) {
        log::info!("background track paused");
    }
}
