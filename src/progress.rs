use seeker_kinematics::{Pose, WheelCommand};
use seeker_navigation::{DriveMode, GoalPoint};
use tracing::info;

/// Driver state machine phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Init,
    Sensing,
    Running { goal: GoalPoint },
    Reached,
    Exhausted,
    Failed,
}

/// One control step, reported before the command is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvent {
    pub step: usize,
    pub pose: Pose,
    pub distance: f64,
    pub command: WheelCommand,
    pub mode: DriveMode,
}

/// Observer for a simulation run. Purely observational: nothing a sink does
/// feeds back into the control loop.
pub trait ProgressSink {
    fn on_phase(&mut self, _phase: Phase) {}
    fn on_step(&mut self, _event: &StepEvent) {}
}

/// Logs phase changes and every `interval`-th step through `tracing`.
#[derive(Debug, Clone, Copy)]
pub struct TracingProgress {
    interval: usize,
}

impl TracingProgress {
    /// `interval == 0` silences step logging.
    pub fn new(interval: usize) -> Self {
        Self { interval }
    }
}

impl ProgressSink for TracingProgress {
    fn on_phase(&mut self, phase: Phase) {
        info!(?phase, "Simulation phase");
    }

    fn on_step(&mut self, event: &StepEvent) {
        if self.interval > 0 && event.step % self.interval == 0 {
            info!(
                step = event.step,
                mode = ?event.mode,
                left = event.command.left,
                right = event.command.right,
                "Step {}: Position ({:.1}, {:.1}), Distance: {:.1}",
                event.step, event.pose.x, event.pose.y, event.distance
            );
        }
    }
}

/// Keeps every event, for inspection after a run.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub phases: Vec<Phase>,
    pub steps: Vec<StepEvent>,
}

#[cfg(test)]
impl ProgressSink for Recorder {
    fn on_phase(&mut self, phase: Phase) {
        self.phases.push(phase);
    }

    fn on_step(&mut self, event: &StepEvent) {
        self.steps.push(*event);
    }
}
