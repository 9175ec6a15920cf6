use super::{Record, Recorder};
use log::{log, Level};

/// A recorder that emits every record through the [`log`] facade.
pub struct LogRecorder {
    level: Level,
}

impl LogRecorder {
    /// Creates a recorder logging at `level`.
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Default for LogRecorder {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

impl Recorder for LogRecorder {
    fn write(&mut self, record: Record) {
        log!(self.level, "{}", record);
    }
}
