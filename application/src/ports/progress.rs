//! Progress notification port
//!
//! Defines the interface for reporting progress while a synthesis runs.

/// Step of a synthesis request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisStep {
    /// Waiting for the chairman model
    Synthesize,
    /// Computing the peer-ranking leaderboard
    Aggregate,
    /// Auto-saving the completed conversation
    Save,
}

impl SynthesisStep {
    pub fn display_name(&self) -> &'static str {
        match self {
            SynthesisStep::Synthesize => "Synthesizing final answer",
            SynthesisStep::Aggregate => "Aggregating peer rankings",
            SynthesisStep::Save => "Saving conversation",
        }
    }
}

/// Callback for progress updates during a synthesis
///
/// Implementations live in the presentation layer.
pub trait ProgressNotifier: Send + Sync {
    /// Called when a step starts
    fn on_step_start(&self, step: SynthesisStep);

    /// Called when a step finishes
    fn on_step_complete(&self, step: SynthesisStep, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_step_start(&self, _step: SynthesisStep) {}
    fn on_step_complete(&self, _step: SynthesisStep, _success: bool) {}
}
