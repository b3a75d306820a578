use anyhow::{Result, bail};
use crossroads_game::{Direction, PlayerStats, theft_amount};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use std::fmt;

/// Built-in automated play strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Always takes the treasure path.
    Left,
    /// Always walks straight into the grass.
    Straight,
    /// Goes right only when the thief would take nothing, left otherwise.
    Balanced,
    /// Uniformly random direction.
    Random,
}

impl Strategy {
    pub const ALL: [Self; 4] = [Self::Left, Self::Straight, Self::Balanced, Self::Random];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Straight => "straight",
            Self::Balanced => "balanced",
            Self::Random => "random",
        }
    }

    /// Parse CLI tokens; `all` expands to every strategy.
    pub fn parse_list(tokens: &[String]) -> Result<Vec<Self>> {
        let mut strategies = Vec::new();
        for token in tokens {
            if token.eq_ignore_ascii_case("all") {
                return Ok(Self::ALL.to_vec());
            }
            let Some(strategy) = Self::ALL
                .into_iter()
                .find(|s| s.label().eq_ignore_ascii_case(token))
            else {
                bail!("Unrecognized strategy: {token}");
            };
            if !strategies.contains(&strategy) {
                strategies.push(strategy);
            }
        }
        if strategies.is_empty() {
            bail!("No strategies selected");
        }
        Ok(strategies)
    }

    #[must_use]
    pub fn create_policy(self, seed: u64, thief_share_pct: i64) -> Policy {
        Policy {
            strategy: self,
            thief_share_pct,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stateful direction picker for one run.
pub struct Policy {
    strategy: Strategy,
    thief_share_pct: i64,
    rng: ChaCha20Rng,
}

impl Policy {
    pub fn pick(&mut self, stats: PlayerStats) -> Direction {
        match self.strategy {
            Strategy::Left => Direction::Left,
            Strategy::Straight => Direction::Straight,
            Strategy::Balanced => {
                if theft_amount(stats.treasure, self.thief_share_pct) <= 0 {
                    Direction::Right
                } else {
                    Direction::Left
                }
            }
            Strategy::Random => *Direction::ALL
                .choose(&mut self.rng)
                .unwrap_or(&Direction::Left),
        }
    }
}
