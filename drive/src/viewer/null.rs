use anyhow::Result;
use drive_core::{Frame, FrameSink};
use log::trace;

/// A sink that drops every frame.
#[derive(Default)]
pub struct NullSink {}

impl FrameSink for NullSink {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        trace!("Dropped a {}x{} frame", frame.width(), frame.height());
        Ok(())
    }
}
