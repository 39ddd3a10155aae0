use std::collections::{BTreeMap, VecDeque};

/// A single `(time, value)` observation of a tracked counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Seconds since the sampler started.
    pub t: f64,
    pub v: f64,
}

impl Sample {
    pub const fn new(t: f64, v: f64) -> Self {
        Self { t, v }
    }

    /// `true` when both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.t.is_finite() && self.v.is_finite()
    }
}

/// One tick's worth of counter values, keyed by series name.
pub type Reading = BTreeMap<String, f64>;

/// A named, insertion-ordered sequence of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name:    String,
    pub samples: VecDeque<Sample>,
}

impl Series {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:    name.into(),
            samples: VecDeque::new(),
        }
    }

    /// Build a series from an existing list of samples.
    pub fn from_samples(name: impl Into<String>, samples: impl IntoIterator<Item = Sample>) -> Self {
        Self {
            name:    name.into(),
            samples: samples.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Push a new sample, evicting the oldest ones while above `capacity`.
    pub fn push_capped(&mut self, sample: Sample, capacity: usize) {
        self.samples.push_back(sample);
        while self.samples.len() > capacity {
            self.samples.pop_front();
        }
    }

    /// Copy of this series holding at most the `limit` most recent samples.
    #[must_use]
    pub fn tail(&self, limit: usize) -> Self {
        let skip = self.samples.len().saturating_sub(limit);
        Self {
            name:    self.name.clone(),
            samples: self.samples.iter().skip(skip).copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_capped_evicts_oldest_first() {
        let mut series = Series::new("used");
        for i in 0..5 {
            series.push_capped(Sample::new(i as f64, 0.0), 3);
        }
        let times: Vec<f64> = series.samples.iter().map(|s| s.t).collect();
        assert_eq!(times, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn tail_keeps_most_recent() {
        let series = Series::from_samples("total", (0..10).map(|i| Sample::new(i as f64, 1.0)));
        let tail = series.tail(4);
        assert_eq!(tail.len(), 4);
        assert_eq!(tail.samples.front().map(|s| s.t), Some(6.0));
        assert_eq!(series.tail(50).len(), 10);
    }

    #[test]
    fn non_finite_samples_are_detected() {
        assert!(Sample::new(1.0, 2.0).is_finite());
        assert!(!Sample::new(f64::NAN, 2.0).is_finite());
        assert!(!Sample::new(1.0, f64::INFINITY).is_finite());
    }
}
