//! Presentation surfaces the engine drives.
use crate::encounters::Asset;
use crate::player::PlayerStats;

/// Output hooks implemented by a front end. The engine never touches a UI
/// toolkit directly.
pub trait GameView {
    /// Empty the append-only log.
    fn clear_log(&mut self);
    /// Append one entry to the log.
    fn append_log(&mut self, text: &str);
    /// Present narrative text prominently (a modal in the browser).
    fn announce(&mut self, text: &str);
    fn show_status(&mut self, stats: PlayerStats);
    fn show_asset(&mut self, asset: Asset);
    fn set_asset_visible(&mut self, visible: bool);
    fn set_choices_enabled(&mut self, enabled: bool);
}

impl<V: GameView + ?Sized> GameView for &mut V {
    fn clear_log(&mut self) {
        (**self).clear_log();
    }

    fn append_log(&mut self, text: &str) {
        (**self).append_log(text);
    }

    fn announce(&mut self, text: &str) {
        (**self).announce(text);
    }

    fn show_status(&mut self, stats: PlayerStats) {
        (**self).show_status(stats);
    }

    fn show_asset(&mut self, asset: Asset) {
        (**self).show_asset(asset);
    }

    fn set_asset_visible(&mut self, visible: bool) {
        (**self).set_asset_visible(visible);
    }

    fn set_choices_enabled(&mut self, enabled: bool) {
        (**self).set_choices_enabled(enabled);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    ClearLog,
    Log(String),
    Announce(String),
    Status(PlayerStats),
    Asset(Asset),
    AssetVisible(bool),
    ChoicesEnabled(bool),
}

/// View that records every call, used by tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    events: Vec<ViewEvent>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    /// Log entries written since the last clear.
    #[must_use]
    pub fn log(&self) -> Vec<&str> {
        let start = self
            .events
            .iter()
            .rposition(|event| matches!(event, ViewEvent::ClearLog))
            .map_or(0, |idx| idx + 1);
        self.events[start..]
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Log(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn announcements(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Announce(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn last_status(&self) -> Option<PlayerStats> {
        self.events.iter().rev().find_map(|event| match event {
            ViewEvent::Status(stats) => Some(*stats),
            _ => None,
        })
    }

    /// Latest choice-input state; disabled until the first enable.
    #[must_use]
    pub fn choices_enabled(&self) -> bool {
        self.events
            .iter()
            .rev()
            .find_map(|event| match event {
                ViewEvent::ChoicesEnabled(enabled) => Some(*enabled),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl GameView for Transcript {
    fn clear_log(&mut self) {
        self.events.push(ViewEvent::ClearLog);
    }

    fn append_log(&mut self, text: &str) {
        self.events.push(ViewEvent::Log(text.to_string()));
    }

    fn announce(&mut self, text: &str) {
        self.events.push(ViewEvent::Announce(text.to_string()));
    }

    fn show_status(&mut self, stats: PlayerStats) {
        self.events.push(ViewEvent::Status(stats));
    }

    fn show_asset(&mut self, asset: Asset) {
        self.events.push(ViewEvent::Asset(asset));
    }

    fn set_asset_visible(&mut self, visible: bool) {
        self.events.push(ViewEvent::AssetVisible(visible));
    }

    fn set_choices_enabled(&mut self, enabled: bool) {
        self.events.push(ViewEvent::ChoicesEnabled(enabled));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_starts_after_last_clear() {
        let mut view = Transcript::new();
        view.append_log("old");
        view.clear_log();
        view.append_log("new");
        view.announce("story");
        assert_eq!(view.log(), ["new"]);
        assert_eq!(view.announcements(), ["story"]);
    }

    #[test]
    fn tracks_latest_status_and_choices() {
        let mut view = Transcript::new();
        assert!(!view.choices_enabled());
        view.set_choices_enabled(true);
        view.show_status(PlayerStats::default());
        view.show_status(PlayerStats { health: 5, treasure: 1 });
        assert!(view.choices_enabled());
        assert_eq!(view.last_status(), Some(PlayerStats { health: 5, treasure: 1 }));
    }
}
