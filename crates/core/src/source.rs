use crate::{error::Result, sample::Reading};

/// A periodic numeric source the sampler polls on every tick.
///
/// Implementations report one value per series name; the sampler stamps the
/// reading with the elapsed time and appends it to the store.
pub trait MetricSource: Send + std::fmt::Debug {
    /// Series names this source reports, in rendering order.
    fn names(&self) -> Vec<String>;

    /// Take one reading of every counter.
    fn sample(&mut self) -> Result<Reading>;
}
