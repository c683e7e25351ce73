// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::render::{RenderOutcome, RenderStatus};
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Print one line per task and a summary
    pub fn report_outcomes(outcomes: &[RenderOutcome]) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{}", "Render Summary".bold());
        println!("{}", "━".repeat(80).bright_black());

        for outcome in outcomes {
            let path = outcome.path.display().to_string();
            match outcome.status {
                RenderStatus::Rendered => println!(
                    "  {} {:>9} {}",
                    "✅".green(),
                    Self::format_duration(outcome.elapsed).yellow(),
                    path.cyan()
                ),
                RenderStatus::ScriptOnly => println!(
                    "  {} {:>9} {}",
                    "📝".bright_blue(),
                    "script".bright_black(),
                    path.cyan()
                ),
                RenderStatus::Failed => println!(
                    "  {} {:>9} {}",
                    "❌".red(),
                    "failed".red(),
                    path.cyan()
                ),
            }
        }

        let (rendered, scripts, failed) = Self::tally(outcomes);
        let total: Duration = outcomes.iter().map(|o| o.elapsed).sum();
        println!();
        println!(
            "  {} {}  {} {}  {} {}",
            "Rendered:".bright_black(),
            rendered.to_string().green(),
            "Scripts only:".bright_black(),
            scripts.to_string().cyan(),
            "Failed:".bright_black(),
            if failed > 0 {
                failed.to_string().red()
            } else {
                failed.to_string().green()
            }
        );
        println!(
            "  {} {}",
            "Renderer time:".bright_black(),
            Self::format_duration(total).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Count rendered, script-only and failed outcomes
    fn tally(outcomes: &[RenderOutcome]) -> (usize, usize, usize) {
        outcomes
            .iter()
            .fold((0, 0, 0), |(r, s, f), o| match o.status {
                RenderStatus::Rendered => (r + 1, s, f),
                RenderStatus::ScriptOnly => (r, s + 1, f),
                RenderStatus::Failed => (r, s, f + 1),
            })
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }

    #[test]
    fn test_tally() {
        let outcome = |status| RenderOutcome {
            path: PathBuf::from("/tmp/part"),
            elapsed: Duration::ZERO,
            status,
        };
        let outcomes = [
            outcome(RenderStatus::Rendered),
            outcome(RenderStatus::Failed),
            outcome(RenderStatus::Rendered),
            outcome(RenderStatus::ScriptOnly),
        ];
        assert_eq!(Reporter::tally(&outcomes), (2, 1, 1));
    }
}
