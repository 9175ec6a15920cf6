use super::frame_to_image;
use anyhow::Result;
use drive_core::{Frame, FrameSink};
use image::ImageFormat;
use log::debug;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Writes frames to PNG files.
///
/// By default every frame overwrites the same file, so an image viewer that
/// reloads it shows the simulation as it runs. The file is replaced by
/// renaming, so readers never see a partly written frame. With
/// [`ImageFileSink::keep_frames`], frame `i` goes to `<stem>_<i>.png` instead.
pub struct ImageFileSink {
    path: PathBuf,
    width: u32,
    height: u32,
    keep_frames: bool,
    count: usize,
}

impl ImageFileSink {
    /// Creates a sink writing images of `width x height` pixels to `path`.
    pub fn new(path: impl AsRef<Path>, width: u32, height: u32) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            width,
            height,
            keep_frames: false,
            count: 0,
        }
    }

    /// Keeps every frame in its own numbered file.
    pub fn keep_frames(mut self, v: bool) -> Self {
        self.keep_frames = v;
        self
    }

    /// Path of the `i`-th frame.
    pub fn frame_path(&self, i: usize) -> PathBuf {
        if !self.keep_frames {
            return self.path.clone();
        }
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "frame".to_string());
        self.path.with_file_name(format!("{}_{:06}.png", stem, i))
    }
}

impl FrameSink for ImageFileSink {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        let img = frame_to_image(frame, self.width, self.height)?;
        let path = self.frame_path(self.count);
        self.count += 1;

        if self.keep_frames {
            img.save_with_format(&path, ImageFormat::Png)?;
        } else {
            let tmp = path.with_extension("tmp");
            img.save_with_format(&tmp, ImageFormat::Png)?;
            fs::rename(&tmp, &path)?;
        }
        debug!("Wrote {}", path.display());
        Ok(())
    }
}
