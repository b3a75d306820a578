//! Fixed player-facing message set.
use crate::player::PlayerStats;

pub const DEATH: &str = "Game over! The snake's venom got the better of you.";
pub const VICTORY: &str = "Congratulations, you made it through every level!";
pub const NARRATIVE_NOT_FOUND: &str = "Failed to load the story for this level.";
pub const NARRATIVE_FAILED: &str = "Something went wrong while loading the story for this level.";
pub const MUSIC_PLAY: &str = "Play background music";
pub const MUSIC_STOP: &str = "Stop background music";

#[must_use]
pub fn level_prompt(level: u32) -> String {
    format!("Level {level}: which way will you go?")
}

#[must_use]
pub fn treasure_found(amount: i64) -> String {
    format!("You found {amount} gold coins!")
}

#[must_use]
pub fn thief_struck(amount: i64) -> String {
    format!("A bandit snatched {amount} gold coins!")
}

#[must_use]
pub fn snake_bite(damage: i64) -> String {
    format!("A venomous snake bit you! You lost {damage} health.")
}

#[must_use]
pub fn npc_friendly(heal: i64) -> String {
    format!("A friendly traveler tends to you, restoring {heal} health!")
}

#[must_use]
pub fn npc_hostile(penalty: i64) -> String {
    format!("A hostile stranger made off with {penalty} gold coins!")
}

#[must_use]
pub fn status_line(stats: PlayerStats) -> String {
    format!(
        "Current health: {}, current treasure: {}",
        stats.health, stats.treasure
    )
}

#[must_use]
pub fn final_stats(stats: PlayerStats) -> String {
    format!(
        "Final health: {}, final treasure: {}",
        stats.health, stats.treasure
    )
}

#[must_use]
pub fn health_label(health: i64) -> String {
    format!("Health: {health}")
}

#[must_use]
pub fn treasure_label(treasure: i64) -> String {
    format!("Treasure: {treasure}")
}
