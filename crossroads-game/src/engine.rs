//! Level progression and choice resolution.
//!
//! The engine walks `NotStarted -> InProgress -> {Victorious, Defeated}`.
//! Each call to [`ProgressionEngine::resolve_choice`] is one step of the
//! machine: a primary encounter picked by direction, the narrative fetch, an
//! optional NPC encounter, then the termination check. `Resolving` covers the
//! window in which the narrative fetch is suspended.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{FIRST_LEVEL, MAX_LEVEL};
use crate::encounters::{Direction, NpcKind, PrimaryEncounter, theft_amount};
use crate::messages;
use crate::narrative::{NarrativeError, NarrativeLoader};
use crate::player::{PlayerState, PlayerStats};
use crate::rng::{Dice, DrawStream};
use crate::rules::EncounterRules;
use crate::storage::KeyValueStore;
use crate::view::GameView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    Resolving,
    Victorious,
    Defeated,
}

impl GamePhase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victorious | Self::Defeated)
    }
}

/// Why a choice was refused. The engine state is untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChoiceError {
    #[error("no game in progress; start a new game first")]
    NotStarted,
    #[error("a choice is already being resolved")]
    Busy,
    #[error("the game is over ({0:?})")]
    Finished(GamePhase),
}

/// What happened to the narrative text of the primary encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NarrativeStatus {
    Shown,
    NotFound,
    Failed,
}

impl From<&NarrativeError> for NarrativeStatus {
    fn from(err: &NarrativeError) -> Self {
        match err {
            NarrativeError::NotFound(_) => Self::NotFound,
            NarrativeError::Io { .. } => Self::Failed,
        }
    }
}

/// Summary of one resolved choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOutcome {
    /// Level the choice was made on.
    pub level: u32,
    pub direction: Direction,
    pub primary: PrimaryEncounter,
    pub primary_amount: i64,
    pub npc: Option<NpcKind>,
    pub narrative: NarrativeStatus,
    pub before: PlayerStats,
    pub after: PlayerStats,
    /// Phase after the step; `InProgress` when the game continues.
    pub phase: GamePhase,
}

impl ChoiceOutcome {
    #[must_use]
    pub const fn health_delta(&self) -> i64 {
        self.after.health.saturating_sub(self.before.health)
    }

    #[must_use]
    pub const fn treasure_delta(&self) -> i64 {
        self.after.treasure.saturating_sub(self.before.treasure)
    }
}

/// Session state machine owning the player and its dice.
#[derive(Debug)]
pub struct ProgressionEngine<S: KeyValueStore, D: Dice> {
    player: PlayerState<S>,
    dice: D,
    rules: EncounterRules,
    level: u32,
    phase: GamePhase,
}

impl<S: KeyValueStore, D: Dice> ProgressionEngine<S, D> {
    #[must_use]
    pub fn new(player: PlayerState<S>, dice: D) -> Self {
        Self::with_rules(player, dice, EncounterRules::default())
    }

    /// Create an engine with explicit encounter rules.
    #[must_use]
    pub fn with_rules(player: PlayerState<S>, dice: D, rules: EncounterRules) -> Self {
        Self {
            player,
            dice,
            rules,
            level: FIRST_LEVEL,
            phase: GamePhase::NotStarted,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub const fn current_level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub const fn player(&self) -> &PlayerState<S> {
        &self.player
    }

    /// Mutable player access for explicit resets between games.
    pub const fn player_mut(&mut self) -> &mut PlayerState<S> {
        &mut self.player
    }

    #[must_use]
    pub const fn rules(&self) -> &EncounterRules {
        &self.rules
    }

    #[must_use]
    pub const fn dice(&self) -> &D {
        &self.dice
    }

    pub const fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    /// Consume the engine, returning the player.
    #[must_use]
    pub fn into_player(self) -> PlayerState<S> {
        self.player
    }

    /// Begin (or restart) a run at level 1. Player stats carry over.
    pub fn start<V: GameView>(&mut self, view: &mut V) {
        self.level = FIRST_LEVEL;
        self.phase = GamePhase::InProgress;
        view.clear_log();
        view.set_choices_enabled(true);
        view.append_log(&messages::level_prompt(self.level));
        log::info!(
            "run started at level {} with {:?}",
            self.level,
            self.player.stats()
        );
    }

    /// Resolve one directional choice.
    ///
    /// # Errors
    ///
    /// Returns a [`ChoiceError`] when no run is in progress, a previous
    /// resolution was abandoned mid-fetch, or the run already ended.
    pub async fn resolve_choice<L, V>(
        &mut self,
        direction: Direction,
        loader: &L,
        view: &mut V,
    ) -> Result<ChoiceOutcome, ChoiceError>
    where
        L: NarrativeLoader + ?Sized,
        V: GameView,
    {
        match self.phase {
            GamePhase::InProgress => {}
            GamePhase::NotStarted => return Err(ChoiceError::NotStarted),
            GamePhase::Resolving => return Err(ChoiceError::Busy),
            phase => return Err(ChoiceError::Finished(phase)),
        }

        let level = self.level;
        let before = self.player.stats();
        view.set_asset_visible(false);

        let primary = PrimaryEncounter::for_direction(direction);
        let (primary_amount, primary_message) = self.apply_primary(primary);
        view.show_asset(primary.asset());

        self.phase = GamePhase::Resolving;
        view.set_choices_enabled(false);
        let narrative = match loader.load(primary.narrative_key()).await {
            Ok(text) => {
                view.announce(&text);
                NarrativeStatus::Shown
            }
            Err(err) => {
                log::warn!("{err}");
                view.append_log(err.notice());
                NarrativeStatus::from(&err)
            }
        };
        self.phase = GamePhase::InProgress;

        let npc_message = self.roll_npc();
        let after = self.player.stats();

        view.append_log(&primary_message);
        if let Some((_, message)) = &npc_message {
            view.append_log(message);
        }
        view.append_log(&messages::status_line(after));
        view.set_asset_visible(true);
        view.show_status(after);

        log::debug!(
            "level {level}: {direction} -> {primary:?}({primary_amount}), npc {:?}, stats {after:?}",
            npc_message.as_ref().map(|(kind, _)| *kind)
        );

        self.advance(view);

        Ok(ChoiceOutcome {
            level,
            direction,
            primary,
            primary_amount,
            npc: npc_message.map(|(kind, _)| kind),
            narrative,
            before,
            after,
            phase: self.phase,
        })
    }

    fn apply_primary(&mut self, primary: PrimaryEncounter) -> (i64, String) {
        match primary {
            PrimaryEncounter::TreasureFind => {
                let amount = self
                    .dice
                    .roll(DrawStream::Primary, self.rules.treasure_find);
                (amount, self.player.encounter_treasure(amount))
            }
            PrimaryEncounter::Theft => {
                let amount = theft_amount(self.player.treasure(), self.rules.thief_share_pct);
                (amount, self.player.encounter_thief(amount))
            }
            PrimaryEncounter::Snakebite => {
                let damage = self
                    .dice
                    .roll(DrawStream::Primary, self.rules.snake_damage);
                (damage, self.player.encounter_snake(damage))
            }
        }
    }

    fn roll_npc(&mut self) -> Option<(NpcKind, String)> {
        if !self
            .dice
            .chance(DrawStream::NpcOccurrence, self.rules.npc_chance)
        {
            return None;
        }
        let friendly = self
            .dice
            .chance(DrawStream::NpcPolarity, self.rules.npc_friendly_chance);
        let kind = NpcKind::from_coin(friendly);
        let message = self.player.encounter_npc(kind, &self.rules, &mut self.dice);
        Some((kind, message))
    }

    fn advance<V: GameView>(&mut self, view: &mut V) {
        if !self.player.is_alive() {
            self.phase = GamePhase::Defeated;
            view.append_log(messages::DEATH);
            view.set_choices_enabled(false);
            log::info!("defeated on level {}", self.level);
            return;
        }

        self.level += 1;
        if self.level > MAX_LEVEL {
            self.phase = GamePhase::Victorious;
            let stats = self.player.stats();
            view.append_log(messages::VICTORY);
            view.append_log(&messages::final_stats(stats));
            view.set_choices_enabled(false);
            log::info!("victorious with {stats:?}");
        } else {
            view.append_log(&messages::level_prompt(self.level));
            view.set_choices_enabled(true);
        }
    }
}
