use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use crate::scenarios::ScenarioResult;

pub fn generate_console_report(
    out: &mut impl Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Assessment Scenario Results".bright_cyan().bold())?;
    writeln!(out, "{}", "===========================".cyan())?;

    let total_runs = results.len();
    let passed_runs = results.iter().filter(|r| r.passed).count();
    let failed_runs = total_runs - passed_runs;

    writeln!(out, "Total runs: {total_runs}")?;
    writeln!(out, "Passed: {}", passed_runs.to_string().green())?;
    writeln!(out, "Failed: {}", failed_runs.to_string().red())?;
    #[allow(clippy::cast_precision_loss)]
    let success_rate = (passed_runs as f64 / total_runs.max(1) as f64) * 100.0;
    writeln!(out, "Success rate: {success_rate:.1}%")?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "PASS".green()
        } else {
            "FAIL".red()
        };

        writeln!(
            out,
            "{} {} (seed {})",
            status,
            result.scenario_name.bold(),
            result.seed
        )?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "   Average time: {}us", result.average_duration_us)?;

        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     - {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    if !results.is_empty() {
        writeln!(out, "{}", "Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "===================".yellow())?;

        if let (Some(fastest), Some(slowest)) = (
            results.iter().min_by_key(|r| r.average_duration_us),
            results.iter().max_by_key(|r| r.average_duration_us),
        ) {
            writeln!(
                out,
                "Fastest: {} ({}us)",
                fastest.scenario_name.green(),
                fastest.average_duration_us
            )?;
            writeln!(
                out,
                "Slowest: {} ({}us)",
                slowest.scenario_name.yellow(),
                slowest.average_duration_us
            )?;
        }
    }
    Ok(())
}

pub fn generate_json_report(out: &mut impl Write, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut impl Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Charis Assessment Scenario Results\n")?;

    let total_runs = results.len();
    let passed_runs = results.iter().filter(|r| r.passed).count();
    let failed_runs = total_runs - passed_runs;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total runs**: {total_runs}")?;
    writeln!(out, "- **Passed**: {passed_runs}")?;
    writeln!(out, "- **Failed**: {failed_runs}")?;
    #[allow(clippy::cast_precision_loss)]
    let success_rate = (passed_runs as f64 / total_runs.max(1) as f64) * 100.0;
    writeln!(out, "- **Success rate**: {success_rate:.1}%\n")?;

    writeln!(out, "## Detailed Results\n")?;

    for result in results {
        let status = if result.passed { "PASS" } else { "FAIL" };

        writeln!(
            out,
            "### {} {} (seed {})\n",
            status, result.scenario_name, result.seed
        )?;
        writeln!(
            out,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "- **Average time**: {}us", result.average_duration_us)?;

        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
