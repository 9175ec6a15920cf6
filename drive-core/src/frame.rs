//! Rendered frames and the places they are shown.
use crate::error::DriveError;
use anyhow::Result;

/// An RGB image, 8 bits per channel, stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Creates a frame from packed RGB pixels.
    ///
    /// `data.len()` must be `width * height * 3`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, DriveError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(DriveError::InvalidFrame(format!(
                "{}x{} RGB frame needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a frame from a `height x width x channels` pixel array.
    ///
    /// Three channels are taken as RGB. With four channels the last one is
    /// treated as alpha and dropped.
    pub fn from_hwc(shape: &[usize], data: Vec<u8>) -> Result<Self, DriveError> {
        let (h, w, c) = match shape {
            [h, w, c] => (*h, *w, *c),
            _ => {
                return Err(DriveError::InvalidFrame(format!(
                    "expected a 3-dimensional array, got shape {:?}",
                    shape
                )))
            }
        };
        if h * w * c != data.len() {
            return Err(DriveError::InvalidFrame(format!(
                "shape {:?} does not match {} bytes",
                shape,
                data.len()
            )));
        }

        let data = match c {
            3 => data,
            4 => data
                .chunks_exact(4)
                .flat_map(|px| px[..3].iter().copied())
                .collect(),
            _ => {
                return Err(DriveError::InvalidFrame(format!(
                    "expected 3 or 4 channels, got {}",
                    c
                )))
            }
        };

        Self::new(w as u32, h as u32, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed RGB pixels.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A destination for rendered frames.
///
/// A sink shows one frame at a time; [`FrameSink::clear`] is called before each
/// [`FrameSink::show`] so that the new frame replaces the previous one.
pub trait FrameSink {
    /// Displays the frame.
    fn show(&mut self, frame: &Frame) -> Result<()>;

    /// Removes the previously displayed frame.
    fn clear(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        (**self).show(frame)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_length() {
        assert!(Frame::new(2, 2, vec![0; 11]).is_err());
        assert!(Frame::new(2, 2, vec![0; 12]).is_ok());
    }

    #[test]
    fn drops_alpha_channel() {
        let data = vec![1, 2, 3, 255, 4, 5, 6, 255];
        let frame = Frame::from_hwc(&[1, 2, 4], data).unwrap();
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 1);
        assert_eq!(frame.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(Frame::from_hwc(&[2, 2], vec![0; 4]).is_err());
        assert!(Frame::from_hwc(&[2, 2, 1], vec![0; 4]).is_err());
        assert!(Frame::from_hwc(&[2, 2, 3], vec![0; 11]).is_err());
    }

    #[test]
    fn height_is_the_leading_dimension() {
        let frame = Frame::from_hwc(&[120, 160, 3], vec![0; 120 * 160 * 3]).unwrap();
        assert_eq!((frame.width(), frame.height()), (160, 120));
    }
}
