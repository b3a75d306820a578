//! Injectable randomness for encounter resolution.
//!
//! Every draw the engine makes belongs to one [`DrawStream`]. The production
//! [`RngBundle`] keeps an independent seeded generator per stream so a single
//! stream can be reseeded without disturbing the others; [`ScriptedDice`]
//! replays fixed values for tests.
use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::collections::{HashMap, VecDeque};

use crate::rules::AmountRange;

/// Independent random sources consumed while resolving a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawStream {
    /// Magnitude of a treasure find or snakebite.
    Primary,
    /// Whether an NPC shows up after the primary encounter.
    NpcOccurrence,
    /// Friendly or hostile NPC.
    NpcPolarity,
    /// Heal or penalty amount of the NPC.
    NpcMagnitude,
}

impl DrawStream {
    pub const ALL: [Self; 4] = [
        Self::Primary,
        Self::NpcOccurrence,
        Self::NpcPolarity,
        Self::NpcMagnitude,
    ];

    const fn domain_tag(self) -> &'static [u8] {
        match self {
            Self::Primary => b"primary",
            Self::NpcOccurrence => b"npc-occurrence",
            Self::NpcPolarity => b"npc-polarity",
            Self::NpcMagnitude => b"npc-magnitude",
        }
    }
}

/// Source of every random decision the engine makes.
pub trait Dice {
    /// Draw uniformly from the inclusive range.
    fn roll(&mut self, stream: DrawStream, range: AmountRange) -> i64;

    /// Bernoulli trial succeeding with `probability`.
    fn chance(&mut self, stream: DrawStream, probability: f64) -> bool;
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn roll(&mut self, stream: DrawStream, range: AmountRange) -> i64 {
        (**self).roll(stream, range)
    }

    fn chance(&mut self, stream: DrawStream, probability: f64) -> bool {
        (**self).chance(stream, probability)
    }
}

/// Deterministic bundle of RNG streams segregated by draw kind.
#[derive(Debug, Clone)]
pub struct RngBundle {
    primary: CountingRng<SmallRng>,
    npc_occurrence: CountingRng<SmallRng>,
    npc_polarity: CountingRng<SmallRng>,
    npc_magnitude: CountingRng<SmallRng>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            primary: CountingRng::new(derive_stream_seed(seed, DrawStream::Primary)),
            npc_occurrence: CountingRng::new(derive_stream_seed(seed, DrawStream::NpcOccurrence)),
            npc_polarity: CountingRng::new(derive_stream_seed(seed, DrawStream::NpcPolarity)),
            npc_magnitude: CountingRng::new(derive_stream_seed(seed, DrawStream::NpcMagnitude)),
        }
    }

    /// Replace a single stream with a fresh generator seeded by `seed`.
    pub fn reseed_stream(&mut self, stream: DrawStream, seed: u64) {
        *self.stream_mut(stream) = CountingRng::new(seed);
    }

    /// Number of draw calls performed against a stream.
    #[must_use]
    pub const fn draws(&self, stream: DrawStream) -> u64 {
        match stream {
            DrawStream::Primary => self.primary.draws(),
            DrawStream::NpcOccurrence => self.npc_occurrence.draws(),
            DrawStream::NpcPolarity => self.npc_polarity.draws(),
            DrawStream::NpcMagnitude => self.npc_magnitude.draws(),
        }
    }

    const fn stream_mut(&mut self, stream: DrawStream) -> &mut CountingRng<SmallRng> {
        match stream {
            DrawStream::Primary => &mut self.primary,
            DrawStream::NpcOccurrence => &mut self.npc_occurrence,
            DrawStream::NpcPolarity => &mut self.npc_polarity,
            DrawStream::NpcMagnitude => &mut self.npc_magnitude,
        }
    }
}

impl Dice for RngBundle {
    fn roll(&mut self, stream: DrawStream, range: AmountRange) -> i64 {
        if range.max <= range.min {
            return range.min;
        }
        self.stream_mut(stream).gen_range(range.min..=range.max)
    }

    fn chance(&mut self, stream: DrawStream, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.stream_mut(stream).gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, stream: DrawStream) -> u64 {
    // HMAC accepts keys of any length, so construction cannot fail.
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(stream.domain_tag());
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

/// Dice replaying queued values per stream.
///
/// Scripted rolls are clamped into the requested range. An exhausted stream
/// rolls the range minimum and fails every chance.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: HashMap<DrawStream, VecDeque<i64>>,
    chances: HashMap<DrawStream, VecDeque<bool>>,
}

impl ScriptedDice {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rolls(mut self, stream: DrawStream, values: impl IntoIterator<Item = i64>) -> Self {
        self.rolls.entry(stream).or_default().extend(values);
        self
    }

    #[must_use]
    pub fn with_chances(
        mut self,
        stream: DrawStream,
        values: impl IntoIterator<Item = bool>,
    ) -> Self {
        self.chances.entry(stream).or_default().extend(values);
        self
    }

    pub fn push_roll(&mut self, stream: DrawStream, value: i64) {
        self.rolls.entry(stream).or_default().push_back(value);
    }

    pub fn push_chance(&mut self, stream: DrawStream, value: bool) {
        self.chances.entry(stream).or_default().push_back(value);
    }

    /// Values still queued for a stream, rolls and chances combined.
    #[must_use]
    pub fn remaining(&self, stream: DrawStream) -> usize {
        self.rolls.get(&stream).map_or(0, VecDeque::len)
            + self.chances.get(&stream).map_or(0, VecDeque::len)
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, stream: DrawStream, range: AmountRange) -> i64 {
        let value = self
            .rolls
            .get_mut(&stream)
            .and_then(VecDeque::pop_front)
            .unwrap_or(range.min);
        range.clamp(value)
    }

    fn chance(&mut self, stream: DrawStream, _probability: f64) -> bool {
        self.chances
            .get_mut(&stream)
            .and_then(VecDeque::pop_front)
            .unwrap_or(false)
    }
}
