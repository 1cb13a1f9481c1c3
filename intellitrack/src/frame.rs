use crate::error::FrameSourceError;

pub const BYTES_PER_PIXEL: usize = 4;

/// A decoded RGBA frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FrameSourceError> {
        let expected = width * height * BYTES_PER_PIXEL;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(FrameSourceError::Size {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn byte_len(width: usize, height: usize) -> usize {
        width * height * BYTES_PER_PIXEL
    }

    /// Integer BT.601 luma, one byte per pixel, row-major.
    pub fn luma_plane(&self) -> Vec<u8> {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| {
                let weighted = 77 * px[0] as u32 + 150 * px[1] as u32 + 29 * px[2] as u32;
                (weighted >> 8) as u8
            })
            .collect()
    }
}
