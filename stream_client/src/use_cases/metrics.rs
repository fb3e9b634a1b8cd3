use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::domain::MetricsReporter;

pub const METRICS_INTERVAL: Duration = Duration::from_secs(1);

// Periodic metrics task that only runs while the session is streaming.
pub struct MetricsSampler {
    reporter: Option<Arc<dyn MetricsReporter>>,
    interval: Duration,
    task: Option<JoinHandle<()>>,
}

impl MetricsSampler {
    pub fn new(reporter: Option<Arc<dyn MetricsReporter>>, interval: Duration) -> Self {
        Self {
            reporter,
            interval,
            task: None,
        }
    }

    pub fn disabled() -> Self {
        Self::new(None, METRICS_INTERVAL)
    }

    // Restart semantics: any running task is replaced.
    pub fn start(&mut self) {
        self.stop();
        let Some(reporter) = self.reporter.clone() else {
            return;
        };
        let period = self.interval;
        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                reporter.sample().await;
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for MetricsSampler {
    fn drop(&mut self) {
        self.stop();
    }
}
