//! Seeded automated runs against an in-memory store.
use crossroads_game::{
    Command, EncounterRules, GamePhase, MemoryStore, NarrativeLibrary, PlayerStats, Transcript,
    seeded_session,
};
use serde::Serialize;
use std::collections::BTreeMap;

use super::strategy::Strategy;

/// Result of one automated run.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub strategy: Strategy,
    pub seed: u64,
    pub phase: GamePhase,
    pub levels_cleared: u32,
    pub choices: u32,
    pub npc_encounters: u32,
    pub final_stats: PlayerStats,
}

/// Per-strategy summary over every seed and iteration.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyAggregate {
    pub strategy: Strategy,
    pub runs: usize,
    pub victories: usize,
    pub defeats: usize,
    pub win_rate: f64,
    pub avg_levels_cleared: f64,
    pub avg_final_health: f64,
    pub avg_final_treasure: f64,
    pub npc_rate: f64,
}

fn placeholder_narrative() -> NarrativeLibrary {
    ["treasure", "thief", "snake"]
        .into_iter()
        .fold(NarrativeLibrary::empty(), |library, key| {
            library.with_text(key, format!("({key})"))
        })
}

/// Play one run to completion with a fresh store.
pub async fn run_once(rules: &EncounterRules, strategy: Strategy, seed: u64) -> RunRecord {
    let mut session = seeded_session(
        MemoryStore::new(),
        seed,
        rules.clone(),
        placeholder_narrative(),
        Transcript::new(),
    );
    let mut policy = strategy.create_policy(seed, rules.thief_share_pct);
    let mut choices = 0;
    let mut npc_encounters = 0;
    let mut levels_cleared = 0;

    if let Err(err) = session.dispatch(Command::Start).await {
        log::error!("seed {seed}: start refused: {err}");
    }
    while session.phase() == GamePhase::InProgress {
        let direction = policy.pick(session.engine().player().stats());
        match session.dispatch(Command::Choose(direction)).await {
            Ok(Some(outcome)) => {
                choices += 1;
                if outcome.npc.is_some() {
                    npc_encounters += 1;
                }
                if outcome.phase != GamePhase::Defeated {
                    levels_cleared = outcome.level;
                }
            }
            Ok(None) => {}
            Err(err) => {
                log::error!("seed {seed}: choice refused: {err}");
                break;
            }
        }
    }

    RunRecord {
        strategy,
        seed,
        phase: session.phase(),
        levels_cleared,
        choices,
        npc_encounters,
        final_stats: session.engine().player().stats(),
    }
}

/// Run every strategy `iterations` times per seed. Iteration `i` of seed `s`
/// plays with seed `s + i`.
pub async fn run_simulation(
    rules: &EncounterRules,
    strategies: &[Strategy],
    seeds: &[u64],
    iterations: usize,
    verbose: bool,
) -> Vec<RunRecord> {
    let mut records = Vec::with_capacity(strategies.len() * seeds.len() * iterations);
    for &strategy in strategies {
        for &base_seed in seeds {
            for offset in 0..iterations as u64 {
                let record = run_once(rules, strategy, base_seed.wrapping_add(offset)).await;
                if verbose {
                    println!(
                        "  {strategy:<9} seed {:<8} {:?} after {} choices, {:?}",
                        record.seed, record.phase, record.choices, record.final_stats
                    );
                }
                records.push(record);
            }
        }
    }
    records
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

/// Summarize records per strategy, ordered by strategy.
#[allow(clippy::cast_precision_loss)]
pub fn aggregate_runs(records: &[RunRecord]) -> Vec<StrategyAggregate> {
    let mut grouped: BTreeMap<&'static str, Vec<&RunRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.strategy.label()).or_default().push(record);
    }

    Strategy::ALL
        .into_iter()
        .filter_map(|strategy| {
            let runs = grouped.get(strategy.label())?;
            let count = runs.len();
            let victories = runs
                .iter()
                .filter(|r| r.phase == GamePhase::Victorious)
                .count();
            let defeats = runs
                .iter()
                .filter(|r| r.phase == GamePhase::Defeated)
                .count();
            let total_choices: u32 = runs.iter().map(|r| r.choices).sum();
            let total_npcs: u32 = runs.iter().map(|r| r.npc_encounters).sum();
            Some(StrategyAggregate {
                strategy,
                runs: count,
                victories,
                defeats,
                win_rate: mean(std::iter::once(victories as f64), count),
                avg_levels_cleared: mean(runs.iter().map(|r| f64::from(r.levels_cleared)), count),
                avg_final_health: mean(runs.iter().map(|r| r.final_stats.health as f64), count),
                avg_final_treasure: mean(runs.iter().map(|r| r.final_stats.treasure as f64), count),
                npc_rate: if total_choices == 0 {
                    0.0
                } else {
                    f64::from(total_npcs) / f64::from(total_choices)
                },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossroads_game::MAX_LEVEL;

    #[tokio::test]
    async fn left_runs_always_win() {
        let record = run_once(&EncounterRules::default(), Strategy::Left, 5).await;
        assert_eq!(record.phase, GamePhase::Victorious);
        assert_eq!(record.choices, MAX_LEVEL);
        assert_eq!(record.levels_cleared, MAX_LEVEL);
        assert!(record.final_stats.health >= 100);
    }

    #[tokio::test]
    async fn straight_runs_end_and_are_reproducible() {
        let rules = EncounterRules::default();
        let first = run_once(&rules, Strategy::Straight, 99).await;
        let second = run_once(&rules, Strategy::Straight, 99).await;
        assert!(first.phase.is_terminal());
        assert_eq!(first.final_stats, second.final_stats);
        assert_eq!(first.choices, second.choices);
    }

    #[tokio::test]
    async fn aggregates_group_by_strategy() {
        let rules = EncounterRules::default();
        let records = run_simulation(
            &rules,
            &[Strategy::Left, Strategy::Balanced],
            &[1, 2],
            3,
            false,
        )
        .await;
        assert_eq!(records.len(), 12);
        let aggregates = aggregate_runs(&records);
        assert_eq!(aggregates.len(), 2);
        let left = &aggregates[0];
        assert_eq!(left.strategy, Strategy::Left);
        assert_eq!(left.runs, 6);
        assert_eq!(left.victories, 6);
        assert!((left.win_rate - 1.0).abs() < f64::EPSILON);
        assert!((0.0..=1.0).contains(&left.npc_rate));
    }
}
