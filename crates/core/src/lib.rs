pub mod error;
pub mod sample;
pub mod source;
pub mod store;

pub use error::{GraphError, Result};
pub use sample::{Reading, Sample, Series};
pub use source::MetricSource;
pub use store::SampleStore;
