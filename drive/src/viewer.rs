//! Showing rendered frames.
//!
//! Every frame is converted to an image and resized before it is shown,
//! 320x240 by default, which keeps terminal output and files small.
mod image_file;
mod null;
mod terminal;
use anyhow::Result;
use drive_core::{error::DriveError, Frame, FrameSink};
use image::{
    imageops::{resize, FilterType::Triangle},
    RgbImage,
};
pub use image_file::ImageFileSink;
pub use null::NullSink;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
pub use terminal::TerminalSink;

/// Where frames are shown.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    /// Draw frames in the terminal, each over the previous one.
    Terminal,

    /// Write frames to PNG files.
    File,

    /// Do not show frames.
    None,
}

/// Configuration of the frame sink built by [`build_sink`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Where frames are shown.
    pub kind: DisplayKind,

    /// Width of the displayed image in pixels.
    pub width: u32,

    /// Height of the displayed image in pixels.
    pub height: u32,

    /// Output file of [`DisplayKind::File`].
    pub path: PathBuf,

    /// Keep every frame in a numbered file instead of overwriting `path`.
    pub keep_frames: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            kind: DisplayKind::Terminal,
            width: 320,
            height: 240,
            path: PathBuf::from("frame.png"),
            keep_frames: false,
        }
    }
}

/// Builds the sink described by `config`.
pub fn build_sink(config: &DisplayConfig) -> Result<Box<dyn FrameSink>> {
    if config.width == 0 || config.height == 0 {
        return Err(DriveError::InvalidFrame(format!(
            "display size must be positive, got {}x{}",
            config.width, config.height
        ))
        .into());
    }

    let sink: Box<dyn FrameSink> = match config.kind {
        DisplayKind::Terminal => Box::new(TerminalSink::new(config.width, config.height)),
        DisplayKind::File => Box::new(
            ImageFileSink::new(&config.path, config.width, config.height)
                .keep_frames(config.keep_frames),
        ),
        DisplayKind::None => Box::new(NullSink::default()),
    };
    Ok(sink)
}

/// Converts a frame to an image of `width x height` pixels.
pub fn frame_to_image(frame: &Frame, width: u32, height: u32) -> Result<RgbImage> {
    let img = RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
        .ok_or_else(|| {
            DriveError::InvalidFrame(format!(
                "cannot make a {}x{} image",
                frame.width(),
                frame.height()
            ))
        })?;

    if img.dimensions() == (width, height) {
        Ok(img)
    } else {
        Ok(resize(&img, width, height, Triangle))
    }
}
