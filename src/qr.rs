//! # QR Payload Builder
//!
//! Turns QR print requests into device operations. Two paths exist:
//!
//! - **Native**: the payload is handed to the printer's own QR engine
//!   (GS ( k). Cheapest on the wire and the default.
//! - **Raster**: the symbol is rendered host-side with the `qrcode` crate
//!   and shipped as a bit image, for firmware without 2D symbol support.
//!
//! Requested sizes use the wire's 1-16 scale. The native path maps that
//! directly to module dots; the raster path maps it to a target pixel
//! width before scaling the rendered matrix.

use qrcode::{EcLevel, QrCode};

use crate::error::BridgeError;
use crate::ops::DeviceOp;
use crate::raster::RasterBlock;

/// Wire-scale size bounds.
pub const MIN_SIZE: u8 = 1;
pub const MAX_SIZE: u8 = 16;

/// Default size when the wire omits one.
pub const DEFAULT_SIZE: u8 = 10;

/// Resolve a requested size against the 1-16 scale.
///
/// Lenient mode clamps out-of-range values; strict mode rejects them.
pub fn resolve_size(requested: u8, strict: bool) -> Result<u8, BridgeError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&requested) {
        return Ok(requested);
    }
    if strict {
        return Err(BridgeError::MalformedElement(format!(
            "qr_size {requested} out of range {MIN_SIZE}-{MAX_SIZE}"
        )));
    }
    Ok(requested.clamp(MIN_SIZE, MAX_SIZE))
}

/// Target raster width in pixels for a wire-scale size.
///
/// Steps match the rendered widths the reference firmware produces, so
/// raster output is visually comparable to native symbols at the same
/// requested size.
pub fn size_to_pixels(size: u8) -> u32 {
    match size {
        0..=3 => 64,
        4..=6 => 96,
        7..=10 => 128,
        11..=12 => 160,
        _ => 192,
    }
}

/// Build a native QR operation from a URL or arbitrary payload.
pub fn native_op(payload: &str, size: u8, strict: bool) -> Result<DeviceOp, BridgeError> {
    if payload.is_empty() {
        return Err(BridgeError::InvalidPayload("empty QR payload".into()));
    }
    let module_size = resolve_size(size, strict)?;
    Ok(DeviceOp::QrNative {
        payload: payload.to_string(),
        module_size,
    })
}

/// Render a payload to a raster block host-side.
///
/// The matrix is scaled by whole-module steps to approach the target
/// pixel width without exceeding readability (never below 1 pixel per
/// module), then packed MSB first.
pub fn raster_block(payload: &str, size: u8, strict: bool) -> Result<RasterBlock, BridgeError> {
    if payload.is_empty() {
        return Err(BridgeError::InvalidPayload("empty QR payload".into()));
    }
    let size = resolve_size(size, strict)?;
    let target_px = size_to_pixels(size);

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)
        .map_err(|e| BridgeError::InvalidPayload(format!("QR encoding failed: {e}")))?;

    let modules = code.width() as u32;
    let colors = code.to_colors();
    let scale = (target_px / modules).max(1);
    let px = modules * scale;

    let mut pixels = vec![false; (px * px) as usize];
    for my in 0..modules {
        for mx in 0..modules {
            if colors[(my * modules + mx) as usize] == qrcode::Color::Dark {
                for dy in 0..scale {
                    for dx in 0..scale {
                        let x = mx * scale + dx;
                        let y = my * scale + dy;
                        pixels[(y * px + x) as usize] = true;
                    }
                }
            }
        }
    }

    RasterBlock::from_pixels(px, px, &pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_size_in_range() {
        assert_eq!(resolve_size(1, false).unwrap(), 1);
        assert_eq!(resolve_size(16, true).unwrap(), 16);
    }

    #[test]
    fn test_resolve_size_lenient_clamps() {
        assert_eq!(resolve_size(0, false).unwrap(), 1);
        assert_eq!(resolve_size(40, false).unwrap(), 16);
    }

    #[test]
    fn test_resolve_size_strict_rejects() {
        assert!(matches!(
            resolve_size(0, true),
            Err(BridgeError::MalformedElement(_))
        ));
        assert!(matches!(
            resolve_size(17, true),
            Err(BridgeError::MalformedElement(_))
        ));
    }

    #[test]
    fn test_size_to_pixels_steps() {
        assert_eq!(size_to_pixels(1), 64);
        assert_eq!(size_to_pixels(3), 64);
        assert_eq!(size_to_pixels(4), 96);
        assert_eq!(size_to_pixels(6), 96);
        assert_eq!(size_to_pixels(10), 128);
        assert_eq!(size_to_pixels(12), 160);
        assert_eq!(size_to_pixels(16), 192);
    }

    #[test]
    fn test_native_op() {
        let op = native_op("https://example.com", 6, false).unwrap();
        assert_eq!(
            op,
            DeviceOp::QrNative {
                payload: "https://example.com".into(),
                module_size: 6,
            }
        );
    }

    #[test]
    fn test_native_op_rejects_empty_payload() {
        assert!(matches!(
            native_op("", 6, false),
            Err(BridgeError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_raster_block_square_and_aligned() {
        let block = raster_block("https://example.com/r/abc123", 6, false).unwrap();
        assert_eq!(block.width() % 8, 0);
        // Scaled output stays near the 96px target without collapsing
        assert!(block.height() >= 25); // at least one pixel per module
        assert!(block.width() >= block.height());
    }

    #[test]
    fn test_raster_block_rejects_empty_payload() {
        assert!(matches!(
            raster_block("", 6, false),
            Err(BridgeError::InvalidPayload(_))
        ));
    }
}
