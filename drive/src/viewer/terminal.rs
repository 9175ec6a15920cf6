use super::frame_to_image;
use anyhow::{anyhow, Result};
use drive_core::{Frame, FrameSink};
use image::DynamicImage;
use std::io::{stdout, Write};

/// Draws frames in the terminal.
///
/// Every frame is drawn at the top-left corner of the terminal, over the
/// previous one. The screen is cleared once, before the first frame.
pub struct TerminalSink {
    width: u32,
    height: u32,
    cleared: bool,
}

impl TerminalSink {
    /// Creates a sink showing images of `width x height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cleared: false,
        }
    }
}

impl FrameSink for TerminalSink {
    fn clear(&mut self) -> Result<()> {
        if !self.cleared {
            let mut out = stdout();
            out.write_all(b"\x1B[2J")?;
            out.flush()?;
            self.cleared = true;
        }
        Ok(())
    }

    fn show(&mut self, frame: &Frame) -> Result<()> {
        let img = DynamicImage::ImageRgb8(frame_to_image(frame, self.width, self.height)?);
        let config = viuer::Config {
            absolute_offset: true,
            x: 0,
            y: 0,
            ..Default::default()
        };
        viuer::print(&img, &config).map_err(|e| anyhow!("Failed to draw a frame: {:?}", e))?;
        Ok(())
    }
}
