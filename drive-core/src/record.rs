//! Types and traits for recording what happens while driving.
//!
//! A [`Record`] is a bag of named values. Environments return one per step
//! (built by their observation and action filters), and the [`Driver`](crate::Driver)
//! adds the step index, episode index and reward before passing it to a [`Recorder`].
//!
//! ```rust
//! use drive_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("step", RecordValue::Scalar(1.0));
//! record.insert("reward", RecordValue::Scalar(-1.0));
//! record.insert("act", RecordValue::Array1(vec![0.5, -0.5]));
//! assert_eq!(record.get_scalar("reward").unwrap(), -1.0);
//! ```
mod base;
mod buffered_recorder;
mod log_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use log_recorder::LogRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
