use graph_config::GraphConfig;
use graph_core::SampleStore;
use graph_renderer::RenderEngine;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// State shared by every request handler, built once at startup.
///
/// The engine lock is only held for the synchronous load-and-render step,
/// never across the poll delay.
#[derive(Debug)]
pub struct DashboardContext {
    store:      SampleStore,
    engine:     Mutex<RenderEngine>,
    poll_delay: Duration,
}

impl DashboardContext {
    pub fn new(store: SampleStore, engine: RenderEngine, poll_delay: Duration) -> Self {
        Self {
            store,
            engine: Mutex::new(engine),
            poll_delay,
        }
    }

    pub fn from_config(store: SampleStore, config: &GraphConfig) -> Self {
        Self::new(
            store,
            RenderEngine::from_config(&config.chart),
            Duration::from_millis(config.server.poll_delay_ms),
        )
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    /// Pacing delay applied to every `/update.js` request.
    pub fn poll_delay(&self) -> Duration {
        self.poll_delay
    }

    /// Current visible time window width.
    pub fn scale(&self) -> f64 {
        self.engine().mapper().scale()
    }

    pub fn set_scale(&self, scale: f64) {
        self.engine().set_scale(scale);
    }

    /// Load the latest samples and render the full page.
    pub fn render_page(&self) -> String {
        let mut engine = self.engine();
        self.reload(&mut engine);
        engine.render_full()
    }

    /// Load the latest samples and render the redraw script.
    pub fn render_update(&self) -> String {
        let mut engine = self.engine();
        self.reload(&mut engine);
        engine.render_incremental()
    }

    fn reload(&self, engine: &mut RenderEngine) {
        let snapshot = self.store.snapshot(engine.render_window());
        engine.load_samples(&snapshot);
    }

    // Every render recomputes the derived state, so a poisoned lock is safe to reuse.
    fn engine(&self) -> MutexGuard<'_, RenderEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_core::Reading;

    fn context() -> DashboardContext {
        let store = SampleStore::new(["used", "total"], 1_000);
        DashboardContext::from_config(store, &GraphConfig::default())
    }

    #[test]
    fn scale_persists_across_renders() {
        let ctx = context();
        assert_eq!(ctx.scale(), 10.0);
        ctx.set_scale(100.0);
        ctx.render_page();
        ctx.render_update();
        assert_eq!(ctx.scale(), 100.0);
    }

    #[test]
    fn renders_reflect_new_samples() {
        let ctx = context();
        let before = ctx.render_update();
        for i in 0..3 {
            let r = Reading::from([("used".to_string(), 1.0 + i as f64), ("total".to_string(), 8.0)]);
            ctx.store().append(i as f64, &r);
        }
        let after = ctx.render_update();
        assert_ne!(before, after);
        assert!(after.contains("lineTo"));
    }
}
