use crossroads_game::{
    DrawStream, EncounterRules, KeyValueStore, MemoryStore, NpcKind, PlayerState, PlayerStats,
    RngBundle, ScriptedDice, theft_amount,
};
use std::fmt;

fn assert_mirrored(player: &PlayerState<MemoryStore>) {
    let store = player.store();
    assert_eq!(
        store.get("health").unwrap(),
        Some(player.health().to_string())
    );
    assert_eq!(
        store.get("treasure").unwrap(),
        Some(player.treasure().to_string())
    );
}

#[test]
fn every_encounter_leaves_store_in_sync() {
    let rules = EncounterRules::default();
    let mut dice = RngBundle::from_user_seed(2024);
    let mut player = PlayerState::load(MemoryStore::new());

    for step in 0..500 {
        match step % 4 {
            0 => {
                player.encounter_treasure(17);
            }
            1 => {
                let cut = theft_amount(player.treasure(), rules.thief_share_pct);
                player.encounter_thief(cut);
            }
            2 => {
                player.encounter_snake(3);
            }
            _ => {
                let kind = NpcKind::from_coin(step % 8 == 3);
                player.encounter_npc(kind, &rules, &mut dice);
            }
        }
        assert_mirrored(&player);
    }
}

#[test]
fn thief_takes_a_fifth_of_the_purse() {
    let store = MemoryStore::with_entries([("treasure", "100")]);
    let mut player = PlayerState::load(store);
    let cut = theft_amount(player.treasure(), 20);
    assert_eq!(cut, 20);
    player.encounter_thief(cut);
    assert_eq!(player.treasure(), 80);

    let mut broke = PlayerState::load(MemoryStore::new());
    let cut = theft_amount(broke.treasure(), 20);
    assert_eq!(cut, 0);
    broke.encounter_thief(cut);
    assert_eq!(broke.treasure(), 0);
}

#[test]
fn stats_survive_a_reload() {
    let store = MemoryStore::new();
    let rules = EncounterRules::default();
    let mut dice = ScriptedDice::new().with_rolls(DrawStream::NpcMagnitude, [11]);
    {
        let mut player = PlayerState::load(store.clone());
        player.encounter_treasure(45);
        player.encounter_snake(9);
        player.encounter_npc(NpcKind::Hostile, &rules, &mut dice);
    }
    let reloaded = PlayerState::load(store);
    assert_eq!(
        reloaded.stats(),
        PlayerStats {
            health: 91,
            treasure: 34
        }
    );
}

#[derive(Debug)]
struct ReadOnly;

impl fmt::Display for ReadOnly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("store is read-only")
    }
}

impl std::error::Error for ReadOnly {}

struct FrozenStore;

impl KeyValueStore for FrozenStore {
    type Error = ReadOnly;

    fn get(&self, _key: &str) -> Result<Option<String>, Self::Error> {
        Err(ReadOnly)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), Self::Error> {
        Err(ReadOnly)
    }
}

#[test]
fn failing_backend_is_not_fatal() {
    let mut player = PlayerState::load(FrozenStore);
    assert_eq!(player.stats(), PlayerStats::default());
    player.encounter_snake(20);
    assert_eq!(player.health(), 80);
}

#[test]
fn saturated_treasure_survives_a_reload() {
    let store = MemoryStore::with_entries([("treasure", "-9223372036854775800")]);
    let mut player = PlayerState::load(store.clone());
    player.encounter_thief(100);
    assert_eq!(player.treasure(), i64::MIN);
    assert_mirrored(&player);

    let reloaded = PlayerState::load(store);
    assert_eq!(reloaded.treasure(), i64::MIN);
}
