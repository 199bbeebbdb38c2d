//! Console output formatter for diagnostic results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use dpc_application::{ReconcileReport, SeedReport};
use dpc_domain::{ConfigIssue, Severity, SubmissionOutcome, Tally};

/// Formats diagnostic results and maintenance reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete result
    pub fn format_full(outcome: &SubmissionOutcome) -> String {
        let result = &outcome.result;
        let profile = &result.profile;
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("Diagnóstico DPC"));
        output.push('\n');

        output.push_str(&format!(
            "\n{} {}\n",
            "Seu perfil:".cyan().bold(),
            profile.name.yellow().bold()
        ));
        if !profile.description.trim().is_empty() {
            output.push_str(&format!("\n{}\n", profile.description));
        }

        // Descriptive fields
        let fields = profile.described_fields();
        if !fields.is_empty() {
            output.push_str(&Self::section_header("Sobre o perfil"));
            for (label, value) in fields {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("{}:", label).cyan(),
                    Self::indent(value, "  ")
                ));
            }
        }

        if !profile.pains.is_empty() {
            output.push_str(&format!("\n{}\n", "Dores comuns:".cyan()));
            for pain in &profile.pains {
                output.push_str(&format!("  * {}\n", pain));
            }
        }

        // Scores
        output.push_str(&Self::section_header("Pontuação"));
        output.push_str(&Self::format_tally(&result.tally, &result.winner));

        if !outcome.warnings.is_empty() {
            output.push_str(&Self::format_warnings(outcome));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format the winning profile and scores only
    pub fn format_summary(outcome: &SubmissionOutcome) -> String {
        let result = &outcome.result;
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Resultado do Diagnóstico ===".cyan().bold()
        ));
        output.push_str(&format!(
            "{} {} ({})\n\n",
            "Perfil:".bold(),
            result.profile.name.yellow().bold(),
            result.winner.dimmed()
        ));
        output.push_str(&Self::format_tally(&result.tally, &result.winner));

        if !outcome.warnings.is_empty() {
            output.push_str(&Self::format_warnings(outcome));
        }
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &SubmissionOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// One line per slug in ranking order, the winner highlighted
    pub fn format_tally(tally: &Tally, winner: &str) -> String {
        let total = tally.total().max(1);
        let width = tally
            .iter()
            .map(|(slug, _)| slug.chars().count())
            .max()
            .unwrap_or(0);

        let mut output = String::new();
        for (slug, count) in tally.ranked() {
            let bar = "#".repeat((count as usize * 30) / total as usize);
            let line = format!("  {:<width$}  {:>3}  {}", slug, count, bar, width = width);
            if slug == winner {
                output.push_str(&format!("{}\n", line.green().bold()));
            } else {
                output.push_str(&format!("{}\n", line));
            }
        }
        output
    }

    fn format_warnings(outcome: &SubmissionOutcome) -> String {
        let mut output = format!("\n{}\n", "Avisos:".yellow().bold());
        for warning in &outcome.warnings {
            output.push_str(&format!("  ! {}\n", warning));
        }
        output
    }

    /// Format the outcome of a question sync
    pub fn format_reconcile_report(report: &ReconcileReport) -> String {
        let mut output = String::new();
        if report.is_success() {
            output.push_str(&format!("{} {}\n", "v".green(), report.summary()));
        } else {
            output.push_str(&format!("{} {}\n", "x".red(), report.summary()));
            for failure in &report.failures {
                output.push_str(&format!(
                    "  {} {:?} {}: {}\n",
                    "-".red(),
                    failure.kind,
                    failure.id,
                    failure.reason
                ));
            }
        }
        output
    }

    /// Format the outcome of a profile seeding run
    pub fn format_seed_report(report: &SeedReport) -> String {
        let mark = if report.is_success() {
            "v".green()
        } else {
            "x".red()
        };
        let mut output = format!(
            "{} {} of {} profiles seeded",
            mark, report.succeeded, report.total
        );
        if report.failed > 0 {
            output.push_str(&format!(", {} failed", report.failed));
        }
        if let Some(stored) = report.stored {
            output.push_str(&format!(" ({} in store)", stored));
        }
        output.push('\n');
        output
    }

    /// Format configuration issues, errors first
    pub fn format_config_issues(issues: &[ConfigIssue]) -> String {
        let mut sorted: Vec<&ConfigIssue> = issues.iter().collect();
        sorted.sort_by_key(|issue| !issue.is_error());

        sorted
            .into_iter()
            .map(|issue| match issue.severity {
                Severity::Error => format!("{} {}", "error:".red().bold(), issue.message),
                Severity::Warning => format!("{} {}", "warning:".yellow().bold(), issue.message),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, outcome: &SubmissionOutcome) -> String {
        Self::format_full(outcome)
    }

    fn format_summary(&self, outcome: &SubmissionOutcome) -> String {
        Self::format_summary(outcome)
    }

    fn format_json(&self, outcome: &SubmissionOutcome) -> String {
        Self::format_json(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpc_application::{RecordKind, SyncFailure};
    use dpc_domain::{
        ConfigIssueCode, DiagnosticResult, OutputFormat, Profile, SubmissionWarning,
    };

    fn outcome() -> SubmissionOutcome {
        let mut tally = Tally::new();
        tally.add("ansioso");
        tally.add("culpado");
        tally.add("ansioso");

        let mut profile = Profile::new("ansioso", "O Ansioso");
        profile.description = "Vive antecipando o futuro.".into();
        profile.spiritual_lesson = "Confiar no cuidado de Deus.".into();
        profile.pains = vec!["Insônia".into(), "Medo do amanhã".into()];

        SubmissionOutcome::new(DiagnosticResult {
            winner: "ansioso".into(),
            tally,
            profile,
        })
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_full_includes_profile_and_scores() {
        plain();
        let text = ConsoleFormatter::format_full(&outcome());
        assert!(text.contains("Seu perfil: O Ansioso"));
        assert!(text.contains("Vive antecipando o futuro."));
        assert!(text.contains("Lição espiritual:"));
        assert!(text.contains("  * Medo do amanhã"));
        assert!(!text.contains("Demônio associado"));
        assert!(!text.contains("Avisos"));
    }

    #[test]
    fn test_summary_mentions_warning() {
        plain();
        let outcome = outcome().with_warning(SubmissionWarning::ResponsesNotSaved {
            reason: "timeout".into(),
        });
        let text = ConsoleFormatter::format_summary(&outcome);
        assert!(text.contains("Perfil: O Ansioso (ansioso)"));
        assert!(text.contains("responses were not saved: timeout"));
    }

    #[test]
    fn test_tally_is_ranked() {
        plain();
        let outcome = outcome();
        let text = ConsoleFormatter::format_tally(&outcome.result.tally, "ansioso");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].trim_start().starts_with("ansioso"));
        assert!(lines[0].contains("  2  "));
        assert!(lines[1].trim_start().starts_with("culpado"));
    }

    #[test]
    fn test_json_round_trips_winner() {
        let json = ConsoleFormatter::format_json(&outcome());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["result"]["winner"], "ansioso");
        assert!(value.get("warnings").is_none());
    }

    #[test]
    fn test_trait_dispatch() {
        plain();
        let formatter = ConsoleFormatter;
        let outcome = outcome();
        assert!(
            formatter
                .format(&outcome, OutputFormat::Json)
                .starts_with('{')
        );
        assert!(
            formatter
                .format(&outcome, OutputFormat::Summary)
                .contains("Resultado")
        );
    }

    #[test]
    fn test_reconcile_report_lists_failures() {
        plain();
        let report = ReconcileReport {
            questions_synced: 32,
            options_synced: 128,
            failures: vec![SyncFailure {
                kind: RecordKind::Question,
                id: "p07".into(),
                reason: "timeout".into(),
            }],
        };
        let text = ConsoleFormatter::format_reconcile_report(&report);
        assert!(text.contains("1 failed"));
        assert!(text.contains("p07: timeout"));
    }

    #[test]
    fn test_seed_report() {
        plain();
        let report = SeedReport {
            succeeded: 5,
            failed: 0,
            total: 5,
            stored: Some(5),
        };
        assert_eq!(
            ConsoleFormatter::format_seed_report(&report),
            "v 5 of 5 profiles seeded (5 in store)\n"
        );
    }

    #[test]
    fn test_config_issues_errors_first() {
        plain();
        let issues = vec![
            ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::OutOfRange {
                    field: "backend.timeout_secs".into(),
                    value: 0,
                },
                message: "timeout is zero".into(),
            },
            ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::MissingApiKey,
                message: "anon key missing".into(),
            },
        ];
        let text = ConsoleFormatter::format_config_issues(&issues);
        assert_eq!(text, "error: anon key missing\nwarning: timeout is zero");
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
