use indexmap::IndexMap;
use std::time::Duration;

/// Wall-clock duration of each step, in execution order
#[derive(Debug, Clone, Default)]
pub struct StepTimings {
    step_durations: IndexMap<String, Duration>,
}

impl StepTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a step's duration, accumulating if it runs more than once
    pub fn record(&mut self, step_name: impl Into<String>, duration: Duration) {
        *self
            .step_durations
            .entry(step_name.into())
            .or_insert(Duration::ZERO) += duration;
    }

    pub fn get(&self, step_name: &str) -> Option<Duration> {
        self.step_durations.get(step_name).copied()
    }

    pub fn total(&self) -> Duration {
        self.step_durations.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Duration)> {
        self.step_durations.iter().map(|(name, d)| (name.as_str(), *d))
    }
}
