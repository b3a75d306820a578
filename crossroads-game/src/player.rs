//! Player health and treasure, mirrored to a key-value store on every change.
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HEALTH, DEFAULT_TREASURE, HEALTH_KEY, TREASURE_KEY};
use crate::encounters::NpcKind;
use crate::messages;
use crate::rng::{Dice, DrawStream};
use crate::rules::EncounterRules;
use crate::storage::{KeyValueStore, parse_stored_int};

/// Snapshot of the two player counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub health: i64,
    pub treasure: i64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: DEFAULT_HEALTH,
            treasure: DEFAULT_TREASURE,
        }
    }
}

/// Health and treasure owned by a session.
///
/// Every encounter operation writes both counters back to the store before
/// returning, so the persisted copy never lags the in-memory one.
#[derive(Debug)]
pub struct PlayerState<S: KeyValueStore> {
    stats: PlayerStats,
    store: S,
}

impl<S: KeyValueStore> PlayerState<S> {
    /// Restore counters from the store, falling back to defaults for missing,
    /// unreadable or unparsable values.
    #[must_use]
    pub fn load(store: S) -> Self {
        let health = read_counter(&store, HEALTH_KEY).unwrap_or(DEFAULT_HEALTH);
        let treasure = read_counter(&store, TREASURE_KEY).unwrap_or(DEFAULT_TREASURE);
        Self {
            stats: PlayerStats { health, treasure },
            store,
        }
    }

    #[must_use]
    pub const fn stats(&self) -> PlayerStats {
        self.stats
    }

    #[must_use]
    pub const fn health(&self) -> i64 {
        self.stats.health
    }

    #[must_use]
    pub const fn treasure(&self) -> i64 {
        self.stats.treasure
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.stats.health > 0
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the player, returning the backing store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn encounter_treasure(&mut self, amount: i64) -> String {
        self.stats.treasure = self.stats.treasure.saturating_add(amount);
        self.persist();
        messages::treasure_found(amount)
    }

    pub fn encounter_thief(&mut self, amount: i64) -> String {
        self.stats.treasure = self.stats.treasure.saturating_sub(amount);
        self.persist();
        messages::thief_struck(amount)
    }

    pub fn encounter_snake(&mut self, damage: i64) -> String {
        self.stats.health = self.stats.health.saturating_sub(damage);
        self.persist();
        messages::snake_bite(damage)
    }

    /// A friendly NPC heals from `rules.npc_heal`; a hostile one takes gold
    /// from `rules.npc_penalty`. Both amounts come from the NPC magnitude stream.
    pub fn encounter_npc<D: Dice>(
        &mut self,
        kind: NpcKind,
        rules: &EncounterRules,
        dice: &mut D,
    ) -> String {
        let message = match kind {
            NpcKind::Friendly => {
                let heal = dice.roll(DrawStream::NpcMagnitude, rules.npc_heal);
                self.stats.health = self.stats.health.saturating_add(heal);
                messages::npc_friendly(heal)
            }
            NpcKind::Hostile => {
                let penalty = dice.roll(DrawStream::NpcMagnitude, rules.npc_penalty);
                self.stats.treasure = self.stats.treasure.saturating_sub(penalty);
                messages::npc_hostile(penalty)
            }
        };
        self.persist();
        message
    }

    /// Restore default counters and persist them.
    pub fn reset(&mut self) {
        self.stats = PlayerStats::default();
        self.persist();
    }

    fn persist(&mut self) {
        let PlayerStats { health, treasure } = self.stats;
        for (key, value) in [(HEALTH_KEY, health), (TREASURE_KEY, treasure)] {
            if let Err(err) = self.store.set(key, &value.to_string()) {
                log::warn!("failed to persist `{key}`={value}: {err}");
            }
        }
    }
}

fn read_counter<S: KeyValueStore>(store: &S, key: &str) -> Option<i64> {
    match store.get(key) {
        Ok(raw) => raw.as_deref().and_then(parse_stored_int),
        Err(err) => {
            log::debug!("reading `{key}` failed, using default: {err}");
            None
        }
    }
}
