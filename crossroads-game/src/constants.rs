//! Centralized balance and tuning constants for Crossroads.
//!
//! `MAX_LEVEL` is fixed; the remaining values seed the defaults of
//! [`EncounterRules`](crate::rules::EncounterRules).

// Progression --------------------------------------------------------------
pub const MAX_LEVEL: u32 = 10;
pub const FIRST_LEVEL: u32 = 1;

// Player defaults ----------------------------------------------------------
pub const DEFAULT_HEALTH: i64 = 100;
pub const DEFAULT_TREASURE: i64 = 0;

// Storage keys -------------------------------------------------------------
pub const HEALTH_KEY: &str = "health";
pub const TREASURE_KEY: &str = "treasure";

// Primary encounters -------------------------------------------------------
pub(crate) const TREASURE_FIND_MIN: i64 = 10;
pub(crate) const TREASURE_FIND_MAX: i64 = 50;
pub(crate) const SNAKE_DAMAGE_MIN: i64 = 5;
pub(crate) const SNAKE_DAMAGE_MAX: i64 = 15;
pub(crate) const THIEF_SHARE_PCT: i64 = 20;

// NPC layer ----------------------------------------------------------------
pub(crate) const NPC_CHANCE: f64 = 0.3;
pub(crate) const NPC_FRIENDLY_CHANCE: f64 = 0.5;
pub(crate) const NPC_HEAL_MIN: i64 = 10;
pub(crate) const NPC_HEAL_MAX: i64 = 30;
pub(crate) const NPC_PENALTY_MIN: i64 = 5;
pub(crate) const NPC_PENALTY_MAX: i64 = 15;
