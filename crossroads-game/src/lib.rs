//! Crossroads Game Engine
//!
//! Platform-agnostic rules for a ten-level choose-your-path adventure. Each
//! level the player picks left, right or straight; the choice triggers an
//! encounter, an NPC may follow, and the run ends in victory after the last
//! level or in defeat when health runs out. Storage, narrative text and
//! presentation are supplied by the front end through traits.

pub mod audio;
pub mod constants;
pub mod encounters;
pub mod engine;
pub mod messages;
pub mod narrative;
pub mod player;
pub mod rng;
pub mod rules;
pub mod session;
pub mod storage;
pub mod view;

// Re-export commonly used types
pub use audio::{MusicToggle, Soundtrack};
pub use constants::{DEFAULT_HEALTH, DEFAULT_TREASURE, MAX_LEVEL};
pub use encounters::{
    Asset, Direction, NpcKind, ParseDirectionError, PrimaryEncounter, theft_amount,
};
pub use engine::{ChoiceError, ChoiceOutcome, GamePhase, NarrativeStatus, ProgressionEngine};
pub use narrative::{NarrativeError, NarrativeLibrary, NarrativeLoader};
pub use player::{PlayerState, PlayerStats};
pub use rng::{Dice, DrawStream, RngBundle, ScriptedDice};
pub use rules::{AmountRange, EncounterRules, RulesError};
pub use session::{Command, GameSession};
pub use storage::{KeyValueStore, MemoryStore, parse_stored_int};
pub use view::{GameView, Transcript, ViewEvent};

/// Build a session seeded for reproducible play.
#[must_use]
pub fn seeded_session<S, L, V>(
    store: S,
    seed: u64,
    rules: EncounterRules,
    loader: L,
    view: V,
) -> GameSession<S, RngBundle, L, V>
where
    S: KeyValueStore,
    L: NarrativeLoader,
    V: GameView,
{
    let player = PlayerState::load(store);
    let engine = ProgressionEngine::with_rules(player, RngBundle::from_user_seed(seed), rules);
    GameSession::new(engine, loader, view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_sessions_replay_identically() {
        async fn play(seed: u64) -> Vec<ViewEvent> {
            let mut session = seeded_session(
                MemoryStore::new(),
                seed,
                EncounterRules::default(),
                NarrativeLibrary::empty(),
                Transcript::new(),
            );
            session.dispatch(Command::Start).await.unwrap();
            for direction in Direction::ALL.iter().cycle().take(6) {
                if session.phase().is_terminal() {
                    break;
                }
                session.dispatch(Command::Choose(*direction)).await.unwrap();
            }
            session.view().events().to_vec()
        }

        assert_eq!(play(0xC0FFEE).await, play(0xC0FFEE).await);
    }
}
