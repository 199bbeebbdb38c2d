//! Progress reporting for question synchronization

use colored::Colorize;
use dpc_application::SyncProgressNotifier;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports sync progress with a progress bar
pub struct SyncProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl SyncProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for SyncProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncProgressNotifier for SyncProgressReporter {
    fn on_sync_start(&self, total_questions: usize) {
        let pb = ProgressBar::new(total_questions as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Syncing questions");
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_question_synced(&self, question_id: &str, success: bool) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), question_id)
            } else {
                format!("{} {}", "x".red(), question_id)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_sync_complete(&self, success: bool) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            if success {
                pb.finish_with_message(format!("{}", "complete!".green()));
            } else {
                pb.abandon_with_message(format!("{}", "finished with failures".red()));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleSyncProgress;

impl SyncProgressNotifier for SimpleSyncProgress {
    fn on_sync_start(&self, total_questions: usize) {
        println!(
            "{} {} ({} questions)",
            "->".cyan(),
            "Syncing questions".bold(),
            total_questions
        );
    }

    fn on_question_synced(&self, question_id: &str, success: bool) {
        if success {
            println!("  {} {}", "v".green(), question_id);
        } else {
            println!("  {} {} (failed)", "x".red(), question_id);
        }
    }

    fn on_sync_complete(&self, _success: bool) {
        println!();
    }
}
