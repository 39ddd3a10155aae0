//! Periodic sampling of metric sources into the shared [`SampleStore`].

pub mod memory;

pub use memory::{format_bytes, MemorySource};

use graph_config::SamplerConfig;
use graph_core::{MetricSource, SampleStore};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{info, warn};

/// Periodic timer feeding one [`MetricSource`] into a [`SampleStore`].
///
/// Sample times are seconds elapsed since the sampler was created, so every
/// series shares the same time axis.
#[derive(Debug)]
pub struct Sampler {
    store:    SampleStore,
    source:   Box<dyn MetricSource>,
    interval: Duration,
    started:  Instant,
}

impl Sampler {
    pub fn new(store: SampleStore, source: Box<dyn MetricSource>, interval: Duration) -> Self {
        Self {
            store,
            source,
            interval,
            started: Instant::now(),
        }
    }

    /// Build a sampler for the configured memory source.
    pub fn from_config(store: SampleStore, config: &SamplerConfig) -> Self {
        Self::new(
            store,
            Box::new(MemorySource::new(config.source)),
            Duration::from_millis(config.interval_ms),
        )
    }

    /// Take one reading and append it at time `t`.
    ///
    /// A failing source is logged and the tick is skipped.  Returns the number
    /// of samples appended.
    pub fn record(&mut self, t: f64) -> usize {
        match self.source.sample() {
            Ok(reading) => self.store.append(t, &reading),
            Err(e) => {
                warn!("Sampling failed at t={t:.2}: {e}");
                0
            }
        }
    }

    /// Spawn the sampling loop as a background Tokio task.
    ///
    /// The task runs until it is aborted.
    pub fn spawn(mut self) -> JoinHandle<()> {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            series = ?self.source.names(),
            "Sampler started"
        );

        tokio::spawn(async move {
            let mut ticker = time::interval(self.interval);
            ticker.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let t = self.started.elapsed().as_secs_f64();
                self.record(t);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_core::{GraphError, Reading, Result};

    #[derive(Debug, Default)]
    struct Counter {
        calls: u32,
        fail:  bool,
    }

    impl MetricSource for Counter {
        fn names(&self) -> Vec<String> {
            vec!["used".into(), "total".into()]
        }

        fn sample(&mut self) -> Result<Reading> {
            self.calls += 1;
            if self.fail {
                return Err(GraphError::Sampler("counter offline".into()));
            }
            let n = f64::from(self.calls);
            Ok(Reading::from([("used".to_string(), n), ("total".to_string(), 2.0 * n)]))
        }
    }

    #[test]
    fn record_appends_one_sample_per_series() {
        let store = SampleStore::new(["used", "total"], 10);
        let mut sampler = Sampler::new(store.clone(), Box::new(Counter::default()), Duration::from_millis(100));

        assert_eq!(sampler.record(0.5), 2);
        let snap = store.snapshot(10);
        assert_eq!(snap[1].samples[0].t, 0.5);
        assert_eq!(snap[1].samples[0].v, 2.0);
    }

    #[test]
    fn failing_source_skips_tick() {
        let store = SampleStore::new(["used", "total"], 10);
        let source = Counter { calls: 0, fail: true };
        let mut sampler = Sampler::new(store.clone(), Box::new(source), Duration::from_millis(100));

        assert_eq!(sampler.record(0.0), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn spawned_sampler_keeps_appending() {
        let store = SampleStore::new(["used", "total"], 100);
        let handle = Sampler::new(store.clone(), Box::new(Counter::default()), Duration::from_millis(5)).spawn();

        time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        let snap = store.snapshot(100);
        assert!(snap[0].len() >= 2);
        let times: Vec<f64> = snap[0].samples.iter().map(|s| s.t).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }
}
