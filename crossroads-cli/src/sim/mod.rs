pub mod reports;
pub mod runner;
pub mod seeds;
pub mod strategy;

pub use runner::{StrategyAggregate, aggregate_runs, run_simulation};
pub use seeds::resolve_seed_inputs;
pub use strategy::Strategy;
