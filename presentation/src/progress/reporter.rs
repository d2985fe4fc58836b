//! Progress reporting for synthesis requests

use colored::Colorize;
use council_application::ports::progress::{ProgressNotifier, SynthesisStep};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner per step
pub struct ProgressReporter {
    current: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_step_start(&self, step: SynthesisStep) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(step.display_name());
        pb.set_message("...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut current) = self.current.lock()
            && let Some(previous) = current.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_step_complete(&self, step: SynthesisStep, success: bool) {
        let Ok(mut current) = self.current.lock() else {
            return;
        };
        if let Some(pb) = current.take() {
            let status = if success {
                "done".green()
            } else {
                "failed".red()
            };
            pb.finish_with_message(format!("{} {}", step.display_name(), status));
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_step_start(&self, step: SynthesisStep) {
        eprintln!("{} {}", "->".cyan(), step.display_name().bold());
    }

    fn on_step_complete(&self, step: SynthesisStep, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), step.display_name());
        } else {
            eprintln!("  {} {} (failed)", "x".red(), step.display_name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_tracks_one_step_at_a_time() {
        let reporter = ProgressReporter::new();
        reporter.on_step_start(SynthesisStep::Synthesize);
        assert!(reporter.current.lock().unwrap().is_some());

        reporter.on_step_complete(SynthesisStep::Synthesize, true);
        assert!(reporter.current.lock().unwrap().is_none());

        // Completing a step that never started is a no-op
        reporter.on_step_complete(SynthesisStep::Save, false);
        assert!(reporter.current.lock().unwrap().is_none());
    }
}
