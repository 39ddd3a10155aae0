use crate::sample::{Reading, Sample, Series};
use std::sync::{Arc, PoisonError, RwLock};

/// Shared, capacity-bounded sample storage.
///
/// Cloning the store is cheap: every clone refers to the same buffers.  The
/// sampler task is the only writer; request handlers take copy-on-read
/// snapshots, so a reader never observes a half-applied [`Reading`].
#[derive(Debug, Clone)]
pub struct SampleStore {
    inner:    Arc<RwLock<Vec<Series>>>,
    capacity: usize,
}

impl SampleStore {
    /// Create a store tracking `names` (in that order), each holding at most
    /// `capacity` samples.
    pub fn new<I, S>(names: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let series = names.into_iter().map(Series::new).collect();
        Self {
            inner:    Arc::new(RwLock::new(series)),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Names of the tracked series, in rendering order.
    pub fn names(&self) -> Vec<String> {
        let series = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        series.iter().map(|s| s.name.clone()).collect()
    }

    /// Append one value per series present in `reading`, all stamped with `t`.
    ///
    /// Series missing from the reading, and non-finite values, are skipped.
    /// Returns the number of samples actually appended.
    pub fn append(&self, t: f64, reading: &Reading) -> usize {
        let mut series = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let mut appended = 0;
        for s in series.iter_mut() {
            let Some(&v) = reading.get(&s.name) else {
                continue;
            };
            let sample = Sample::new(t, v);
            if !sample.is_finite() {
                tracing::debug!(series = %s.name, t, v, "dropping non-finite sample");
                continue;
            }
            s.push_capped(sample, self.capacity);
            appended += 1;
        }
        appended
    }

    /// Copy of every series, each cut down to its `limit` most recent samples.
    pub fn snapshot(&self, limit: usize) -> Vec<Series> {
        let series = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        series.iter().map(|s| s.tail(limit)).collect()
    }

    /// Total number of samples currently held across all series.
    pub fn len(&self) -> usize {
        let series = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        series.iter().map(Series::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
