//! # ESC/POS Raster Graphics Commands
//!
//! Raster bit image printing via GS v 0, the widely supported legacy
//! graphics command. Bitmaps arrive already packed: 1 bit per pixel,
//! MSB first within each byte, rows padded to whole bytes.
//!
//! ## Bit Image Format
//!
//! ```text
//! Byte 0             Byte 1
//! ┌─┬─┬─┬─┬─┬─┬─┬─┐ ┌─┬─┬─┬─┬─┬─┬─┬─┐
//! │7│6│5│4│3│2│1│0│ │7│6│5│4│3│2│1│0│  bit 7 = leftmost pixel
//! └─┴─┴─┴─┴─┴─┴─┴─┘ └─┴─┴─┴─┴─┴─┴─┴─┘
//! ```
//!
//! A set bit (1) prints black; a clear bit (0) leaves white.

use super::commands::{u16_le, GS};

/// # Print Raster Bit Image (GS v 0)
///
/// Prints a packed 1-bit raster image at the current position.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
/// | Decimal | 29 118 48 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m = 0`: Normal density (203 DPI both axes)
/// - `xL xH`: Width in **bytes** (little-endian), so width_dots / 8
/// - `yL yH`: Height in dots (little-endian)
/// - `d1...dk`: Image data, k = (xL + xH*256) * (yL + yH*256) bytes
///
/// ## Example
///
/// ```
/// use recibo::protocol::graphics::raster;
///
/// // 16 dots wide (2 bytes), 1 dot tall, all black
/// let cmd = raster(2, 1, &[0xFF, 0xFF]);
/// assert_eq!(cmd[..8], [0x1D, 0x76, 0x30, 0x00, 0x02, 0x00, 0x01, 0x00]);
/// assert_eq!(&cmd[8..], &[0xFF, 0xFF]);
/// ```
pub fn raster(width_bytes: u16, height_dots: u16, data: &[u8]) -> Vec<u8> {
    let [x_l, x_h] = u16_le(width_bytes);
    let [y_l, y_h] = u16_le(height_dots);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.extend_from_slice(&[GS, b'v', b'0', 0x00, x_l, x_h, y_l, y_h]);
    cmd.extend_from_slice(data);
    cmd
}

// ============================================================================
// TESTS
// ============================================================================
