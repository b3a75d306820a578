use crossroads_game::{
    AmountRange, Dice, DrawStream, EncounterRules, MemoryStore, NpcKind, PlayerState, RngBundle,
};
use std::convert::TryFrom;

const BOUND_TRIALS: usize = 10_000;
const FREQUENCY_TRIALS: usize = 100_000;
const TOLERANCE: f64 = 0.01;

fn ratio(hits: usize, total: usize) -> f64 {
    let hits = u32::try_from(hits).expect("count fits");
    let total = u32::try_from(total).expect("count fits");
    f64::from(hits) / f64::from(total)
}

fn assert_bounds_reached(observed: &[i64], range: AmountRange) {
    assert!(observed.iter().all(|value| range.contains(*value)));
    assert_eq!(observed.iter().min().copied(), Some(range.min));
    assert_eq!(observed.iter().max().copied(), Some(range.max));
}

#[test]
fn friendly_npc_heals_within_bounds() {
    let rules = EncounterRules::default();
    let mut dice = RngBundle::from_user_seed(11);
    let mut player = PlayerState::load(MemoryStore::new());
    let mut heals = Vec::with_capacity(BOUND_TRIALS);
    for _ in 0..BOUND_TRIALS {
        let before = player.health();
        player.encounter_npc(NpcKind::Friendly, &rules, &mut dice);
        heals.push(player.health() - before);
    }
    assert_bounds_reached(&heals, AmountRange::new(10, 30));
}

#[test]
fn hostile_npc_penalty_within_bounds() {
    let rules = EncounterRules::default();
    let mut dice = RngBundle::from_user_seed(12);
    let mut player = PlayerState::load(MemoryStore::new());
    let mut penalties = Vec::with_capacity(BOUND_TRIALS);
    for _ in 0..BOUND_TRIALS {
        let before = player.treasure();
        player.encounter_npc(NpcKind::Hostile, &rules, &mut dice);
        penalties.push(before - player.treasure());
    }
    assert_bounds_reached(&penalties, AmountRange::new(5, 15));
}

#[test]
fn primary_magnitudes_within_bounds() {
    let rules = EncounterRules::default();
    let mut dice = RngBundle::from_user_seed(13);
    let finds: Vec<i64> = (0..BOUND_TRIALS)
        .map(|_| dice.roll(DrawStream::Primary, rules.treasure_find))
        .collect();
    assert_bounds_reached(&finds, rules.treasure_find);
    let bites: Vec<i64> = (0..BOUND_TRIALS)
        .map(|_| dice.roll(DrawStream::Primary, rules.snake_damage))
        .collect();
    assert_bounds_reached(&bites, rules.snake_damage);
}

#[test]
fn npc_occurrence_and_polarity_track_their_rates() {
    let rules = EncounterRules::default();
    let mut dice = RngBundle::from_user_seed(0x5EED);
    let occurred = (0..FREQUENCY_TRIALS)
        .filter(|_| dice.chance(DrawStream::NpcOccurrence, rules.npc_chance))
        .count();
    let friendly = (0..FREQUENCY_TRIALS)
        .filter(|_| dice.chance(DrawStream::NpcPolarity, rules.npc_friendly_chance))
        .count();

    let occurrence_rate = ratio(occurred, FREQUENCY_TRIALS);
    let friendly_rate = ratio(friendly, FREQUENCY_TRIALS);
    assert!(
        (occurrence_rate - 0.3).abs() <= TOLERANCE,
        "npc rate drifted: {occurrence_rate:.4}"
    );
    assert!(
        (friendly_rate - 0.5).abs() <= TOLERANCE,
        "polarity drifted: {friendly_rate:.4}"
    );
}
