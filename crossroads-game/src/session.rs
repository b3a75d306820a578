//! Command dispatch binding an engine to its collaborators.
use serde::{Deserialize, Serialize};

use crate::encounters::Direction;
use crate::engine::{ChoiceError, ChoiceOutcome, GamePhase, ProgressionEngine};
use crate::narrative::NarrativeLoader;
use crate::rng::Dice;
use crate::storage::KeyValueStore;
use crate::view::GameView;

/// Input events a front end forwards to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "command", content = "direction")]
pub enum Command {
    Start,
    Choose(Direction),
}

/// High-level session wrapper binding a progression engine to its narrative
/// loader and view.
#[derive(Debug)]
pub struct GameSession<S, D, L, V>
where
    S: KeyValueStore,
    D: Dice,
    L: NarrativeLoader,
    V: GameView,
{
    engine: ProgressionEngine<S, D>,
    loader: L,
    view: V,
}

impl<S, D, L, V> GameSession<S, D, L, V>
where
    S: KeyValueStore,
    D: Dice,
    L: NarrativeLoader,
    V: GameView,
{
    /// Bind collaborators. The status display is refreshed immediately and
    /// choice input stays disabled until the first `Start`.
    #[must_use]
    pub fn new(engine: ProgressionEngine<S, D>, loader: L, mut view: V) -> Self {
        view.show_status(engine.player().stats());
        view.set_choices_enabled(false);
        Self {
            engine,
            loader,
            view,
        }
    }

    /// Route one input event. `Start` yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates the [`ChoiceError`] of a refused choice.
    pub async fn dispatch(
        &mut self,
        command: Command,
    ) -> Result<Option<ChoiceOutcome>, ChoiceError> {
        match command {
            Command::Start => {
                self.engine.start(&mut self.view);
                Ok(None)
            }
            Command::Choose(direction) => self
                .engine
                .resolve_choice(direction, &self.loader, &mut self.view)
                .await
                .map(Some),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.engine.phase()
    }

    #[must_use]
    pub const fn engine(&self) -> &ProgressionEngine<S, D> {
        &self.engine
    }

    pub const fn engine_mut(&mut self) -> &mut ProgressionEngine<S, D> {
        &mut self.engine
    }

    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    pub const fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Restore default player stats and refresh the status display.
    pub fn reset_player(&mut self) {
        self.engine.player_mut().reset();
        self.view.show_status(self.engine.player().stats());
    }

    /// Consume the session, returning the engine and view.
    #[must_use]
    pub fn into_parts(self) -> (ProgressionEngine<S, D>, V) {
        (self.engine, self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::NarrativeLibrary;
    use crate::player::{PlayerState, PlayerStats};
    use crate::rng::{DrawStream, ScriptedDice};
    use crate::storage::MemoryStore;
    use crate::view::Transcript;

    fn session() -> GameSession<MemoryStore, ScriptedDice, NarrativeLibrary, Transcript> {
        let dice = ScriptedDice::new().with_rolls(DrawStream::Primary, [10]);
        let engine = ProgressionEngine::new(PlayerState::load(MemoryStore::new()), dice);
        GameSession::new(engine, NarrativeLibrary::empty(), Transcript::new())
    }

    #[tokio::test]
    async fn dispatch_routes_commands() {
        let mut session = session();
        assert_eq!(session.view().last_status(), Some(PlayerStats::default()));
        assert!(!session.view().choices_enabled());

        assert_eq!(session.dispatch(Command::Start).await, Ok(None));
        assert_eq!(session.phase(), GamePhase::InProgress);

        let outcome = session
            .dispatch(Command::Choose(Direction::Left))
            .await
            .unwrap()
            .expect("choice outcome");
        assert_eq!(outcome.after.treasure, 10);
        assert_eq!(session.engine().current_level(), 2);
    }

    #[test]
    fn commands_deserialize_from_json() {
        let cmd: Command =
            serde_json::from_str(r#"{ "command": "choose", "direction": "straight" }"#).unwrap();
        assert_eq!(cmd, Command::Choose(Direction::Straight));
        let cmd: Command = serde_json::from_str(r#"{ "command": "start" }"#).unwrap();
        assert_eq!(cmd, Command::Start);
    }

    #[test]
    fn reset_player_refreshes_status() {
        let store = MemoryStore::with_entries([("health", "1"), ("treasure", "5")]);
        let engine = ProgressionEngine::new(PlayerState::load(store), ScriptedDice::new());
        let mut session = GameSession::new(engine, NarrativeLibrary::empty(), Transcript::new());
        session.reset_player();
        assert_eq!(session.view().last_status(), Some(PlayerStats::default()));
    }
}
