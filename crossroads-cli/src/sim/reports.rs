use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::StrategyAggregate;

pub fn generate_console_report(
    out: &mut dyn Write,
    aggregates: &[StrategyAggregate],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Simulation Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;

    if aggregates.is_empty() {
        writeln!(out, "No runs executed.")?;
        return Ok(());
    }

    for aggregate in aggregates {
        writeln!(out, "{}", aggregate.strategy.label().bold())?;
        writeln!(
            out,
            "   Runs: {} ({} won, {} lost)",
            aggregate.runs,
            aggregate.victories.to_string().green(),
            aggregate.defeats.to_string().red()
        )?;
        writeln!(out, "   Win rate: {:.1}%", aggregate.win_rate * 100.0)?;
        writeln!(out, "   Levels cleared: {:.2}", aggregate.avg_levels_cleared)?;
        writeln!(
            out,
            "   Final health: {:.1}, final treasure: {:.1}",
            aggregate.avg_final_health, aggregate.avg_final_treasure
        )?;
        writeln!(out, "   NPC rate: {:.3}", aggregate.npc_rate)?;
        writeln!(out)?;
    }

    writeln!(out, "🏁 Total time: {total_duration:?}")?;
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, aggregates: &[StrategyAggregate]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(aggregates)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut dyn Write,
    aggregates: &[StrategyAggregate],
) -> Result<()> {
    writeln!(out, "# Crossroads Simulation Results\n")?;
    writeln!(out, "_Generated {}_\n", Utc::now().format("%Y-%m-%d %H:%M UTC"))?;

    if aggregates.is_empty() {
        writeln!(out, "_No runs executed._")?;
        return Ok(());
    }

    writeln!(
        out,
        "| Strategy | Runs | Won | Lost | Win rate | Levels | Health | Treasure | NPC rate |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|---|---|")?;
    for a in aggregates {
        writeln!(
            out,
            "| {} | {} | {} | {} | {:.1}% | {:.2} | {:.1} | {:.1} | {:.3} |",
            a.strategy.label(),
            a.runs,
            a.victories,
            a.defeats,
            a.win_rate * 100.0,
            a.avg_levels_cleared,
            a.avg_final_health,
            a.avg_final_treasure,
            a.npc_rate
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Strategy;

    fn sample() -> StrategyAggregate {
        StrategyAggregate {
            strategy: Strategy::Balanced,
            runs: 4,
            victories: 3,
            defeats: 1,
            win_rate: 0.75,
            avg_levels_cleared: 9.25,
            avg_final_health: 88.5,
            avg_final_treasure: 120.0,
            npc_rate: 0.31,
        }
    }

    #[test]
    fn json_report_lists_strategies() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &[sample()]).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed[0]["strategy"], "balanced");
        assert_eq!(parsed[0]["victories"], 3);
    }

    #[test]
    fn markdown_report_has_table_row() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &[sample()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("| balanced | 4 | 3 | 1 | 75.0% |"));
    }

    #[test]
    fn console_report_handles_empty_input() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &[], Duration::from_millis(5)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("No runs executed."));
    }
}
