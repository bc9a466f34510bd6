//! # Bitmap Adapter
//!
//! Validates pre-rendered 1-bit bitmaps arriving on the wire and turns
//! them into raster blocks the device can print. Pixels are packed MSB
//! first: bit 7 of byte 0 is the top-left pixel, a set bit prints black.
//!
//! No scaling, dithering, or format conversion happens here. A sender
//! that wants an image on paper delivers it already packed; this adapter
//! only checks that the declared geometry and the data agree.

use crate::error::BridgeError;

/// A validated, device-ready raster block.
///
/// Invariants held after construction:
/// - `width % 8 == 0`, both dimensions positive
/// - `data.len() == (width / 8) * height`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBlock {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBlock {
    /// Build a raster block from packed pixel data.
    ///
    /// `width` and `height` are in pixels; `data` is row-major,
    /// 8 pixels per byte, MSB first.
    pub fn from_packed(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BridgeError> {
        if width == 0 || height == 0 {
            return Err(BridgeError::InvalidBitmapDimensions {
                width,
                height,
                reason: "dimensions must be positive",
            });
        }
        if width % 8 != 0 {
            return Err(BridgeError::InvalidBitmapDimensions {
                width,
                height,
                reason: "width must be a multiple of 8",
            });
        }

        let expected = (width as usize / 8) * height as usize;
        if data.len() != expected {
            return Err(BridgeError::BitmapDataLength {
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

    /// Pack a row-major boolean pixel grid (true = black), padding the
    /// width up to the next byte boundary with white pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: &[bool]) -> Result<Self, BridgeError> {
        if width == 0 || height == 0 {
            return Err(BridgeError::InvalidBitmapDimensions {
                width,
                height,
                reason: "dimensions must be positive",
            });
        }
        if pixels.len() != (width as usize) * (height as usize) {
            return Err(BridgeError::BitmapDataLength {
                expected: (width as usize) * (height as usize),
                actual: pixels.len(),
            });
        }

        let padded_width = width.div_ceil(8) * 8;
        let bytes_per_row = (padded_width / 8) as usize;
        let mut data = vec![0u8; bytes_per_row * height as usize];

        for y in 0..height as usize {
            for x in 0..width as usize {
                if pixels[y * width as usize + x] {
                    data[y * bytes_per_row + x / 8] |= 0x80 >> (x % 8);
                }
            }
        }

        Ok(Self {
            width: padded_width,
            height,
            data,
        })
    }

    /// Width in pixels (always a multiple of 8).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes.
    pub fn width_bytes(&self) -> u16 {
        (self.width / 8) as u16
    }

    /// Packed pixel data, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the block, returning the packed data.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_packed_valid() {
        let block = RasterBlock::from_packed(128, 128, vec![0u8; 2048]).unwrap();
        assert_eq!(block.width(), 128);
        assert_eq!(block.height(), 128);
        assert_eq!(block.width_bytes(), 16);
        assert_eq!(block.data().len(), 2048);
    }

    #[test]
    fn test_from_packed_rejects_unaligned_width() {
        let err = RasterBlock::from_packed(100, 10, vec![0u8; 130]).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::InvalidBitmapDimensions { width: 100, .. }
        ));
    }

    #[test]
    fn test_from_packed_rejects_zero_dimensions() {
        assert!(RasterBlock::from_packed(0, 10, vec![]).is_err());
        assert!(RasterBlock::from_packed(8, 0, vec![]).is_err());
    }

    #[test]
    fn test_from_packed_rejects_length_mismatch() {
        let err = RasterBlock::from_packed(64, 4, vec![0u8; 31]).unwrap_err();
        match err {
            BridgeError::BitmapDataLength { expected, actual } => {
                assert_eq!(expected, 32);
                assert_eq!(actual, 31);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_pixels_packs_msb_first() {
        // 8x1: leftmost pixel black, rest white
        let mut pixels = vec![false; 8];
        pixels[0] = true;
        let block = RasterBlock::from_pixels(8, 1, &pixels).unwrap();
        assert_eq!(block.data(), &[0x80]);
    }

    #[test]
    fn test_from_pixels_pads_to_byte_boundary() {
        // 10 wide pads to 16; set the rightmost real pixel
        let mut pixels = vec![false; 10];
        pixels[9] = true;
        let block = RasterBlock::from_pixels(10, 1, &pixels).unwrap();
        assert_eq!(block.width(), 16);
        assert_eq!(block.width_bytes(), 2);
        assert_eq!(block.data(), &[0x00, 0x40]); // bit 6 of byte 1 = pixel 9
    }

    #[test]
    fn test_from_pixels_row_stride() {
        let pixels = vec![true; 16 * 2];
        let block = RasterBlock::from_pixels(16, 2, &pixels).unwrap();
        assert_eq!(block.data(), &[0xFF, 0xFF, 0xFF, 0xFF]);
    }
}
