//! Records of telemetry written by environments and drivers.
//!
//! A [`Record`] is a set of named values. Environments return one record per step
//! with the reward sub-terms of the step, [`LearningEnv::snapshot`] packs the
//! observable state of an environment, and evaluators write one record per episode
//! to a [`Recorder`].
//!
//! ```rust
//! use lenv_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("progress", RecordValue::Scalar(0.25));
//! record.insert("obs", RecordValue::Array1(vec![1.0, 2.0]));
//! assert_eq!(record.get_scalar("progress").unwrap(), 0.25);
//! ```
//!
//! [`LearningEnv::snapshot`]: crate::LearningEnv::snapshot
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
