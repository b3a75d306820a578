//! Encounter tuning loaded from JSON with validated defaults.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    NPC_CHANCE, NPC_FRIENDLY_CHANCE, NPC_HEAL_MAX, NPC_HEAL_MIN, NPC_PENALTY_MAX, NPC_PENALTY_MIN,
    SNAKE_DAMAGE_MAX, SNAKE_DAMAGE_MIN, THIEF_SHARE_PCT, TREASURE_FIND_MAX, TREASURE_FIND_MIN,
};

/// Inclusive integer range used for every randomized magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: i64,
    pub max: i64,
}

impl AmountRange {
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn contains(self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value into the range; inverted ranges collapse to `min`.
    #[must_use]
    pub fn clamp(self, value: i64) -> i64 {
        if self.max < self.min {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    fn validate_positive(self, field: &'static str) -> Result<(), RulesError> {
        if self.min > self.max {
            return Err(RulesError::InvertedRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        if self.min <= 0 {
            return Err(RulesError::NonPositiveRange {
                field,
                min: self.min,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulesError {
    #[error("{field} range is inverted (min {min} > max {max})")]
    InvertedRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
    #[error("{field} must start above zero (got {min})")]
    NonPositiveRange { field: &'static str, min: i64 },
    #[error("{field} must be a probability between 0 and 1 (got {value:.3})")]
    Probability { field: &'static str, value: f64 },
    #[error("thief share must be between 1 and 100 percent (got {0})")]
    ThiefShare(i64),
    #[error("rules JSON could not be parsed: {0}")]
    Parse(String),
}

/// Magnitudes and probabilities driving encounter resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterRules {
    #[serde(default = "EncounterRules::default_treasure_find")]
    pub treasure_find: AmountRange,
    #[serde(default = "EncounterRules::default_snake_damage")]
    pub snake_damage: AmountRange,
    #[serde(default = "EncounterRules::default_thief_share_pct")]
    pub thief_share_pct: i64,
    #[serde(default = "EncounterRules::default_npc_chance")]
    pub npc_chance: f64,
    #[serde(default = "EncounterRules::default_npc_friendly_chance")]
    pub npc_friendly_chance: f64,
    #[serde(default = "EncounterRules::default_npc_heal")]
    pub npc_heal: AmountRange,
    #[serde(default = "EncounterRules::default_npc_penalty")]
    pub npc_penalty: AmountRange,
}

impl EncounterRules {
    const fn default_treasure_find() -> AmountRange {
        AmountRange::new(TREASURE_FIND_MIN, TREASURE_FIND_MAX)
    }

    const fn default_snake_damage() -> AmountRange {
        AmountRange::new(SNAKE_DAMAGE_MIN, SNAKE_DAMAGE_MAX)
    }

    const fn default_thief_share_pct() -> i64 {
        THIEF_SHARE_PCT
    }

    const fn default_npc_chance() -> f64 {
        NPC_CHANCE
    }

    const fn default_npc_friendly_chance() -> f64 {
        NPC_FRIENDLY_CHANCE
    }

    const fn default_npc_heal() -> AmountRange {
        AmountRange::new(NPC_HEAL_MIN, NPC_HEAL_MAX)
    }

    const fn default_npc_penalty() -> AmountRange {
        AmountRange::new(NPC_PENALTY_MIN, NPC_PENALTY_MAX)
    }

    /// Parse and validate rules from a JSON document. Missing fields keep
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values fail validation.
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        let rules: Self =
            serde_json::from_str(json).map_err(|err| RulesError::Parse(err.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Validate ranges and probabilities.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field encountered.
    pub fn validate(&self) -> Result<(), RulesError> {
        self.treasure_find.validate_positive("treasure_find")?;
        self.snake_damage.validate_positive("snake_damage")?;
        self.npc_heal.validate_positive("npc_heal")?;
        self.npc_penalty.validate_positive("npc_penalty")?;
        validate_probability("npc_chance", self.npc_chance)?;
        validate_probability("npc_friendly_chance", self.npc_friendly_chance)?;
        if !(1..=100).contains(&self.thief_share_pct) {
            return Err(RulesError::ThiefShare(self.thief_share_pct));
        }
        Ok(())
    }
}

fn validate_probability(field: &'static str, value: f64) -> Result<(), RulesError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RulesError::Probability { field, value })
    }
}

impl Default for EncounterRules {
    fn default() -> Self {
        Self {
            treasure_find: Self::default_treasure_find(),
            snake_damage: Self::default_snake_damage(),
            thief_share_pct: Self::default_thief_share_pct(),
            npc_chance: Self::default_npc_chance(),
            npc_friendly_chance: Self::default_npc_friendly_chance(),
            npc_heal: Self::default_npc_heal(),
            npc_penalty: Self::default_npc_penalty(),
        }
    }
}
