//! # Device Operation Compiler
//!
//! Compiles a [`DeviceOp`] stream to raw ESC/POS bytes. Purely mechanical:
//! every op maps to exactly one protocol builder call, with no reordering
//! and no state tracking (redundant register writes are already coalesced
//! by the interpreter).

use crate::ops::{DeviceOp, LineStyle, TextSize};
use crate::protocol::{commands, graphics, qr, text};

/// Feed distance for the end-of-job cut, in motion units.
const CUT_FEED_UNITS: u8 = 0x00;

/// Compile a single operation to its byte sequence.
pub fn encode_op(op: &DeviceOp) -> Vec<u8> {
    match op {
        DeviceOp::SetAlignment(a) => text::align(*a),
        DeviceOp::SetBold(enabled) => text::bold(*enabled),
        DeviceOp::SetSize(size) => match size {
            TextSize::Small | TextSize::Normal => text::size_normal(),
            TextSize::Large => text::size_double(),
        },
        DeviceOp::EmitText(line) => {
            let mut bytes = line.as_bytes().to_vec();
            bytes.extend(commands::line_feed());
            bytes
        }
        DeviceOp::FeedLine => commands::line_feed(),
        DeviceOp::DrawLine { style, width } => {
            let ch = match style {
                LineStyle::Solid => b'-',
                LineStyle::Dotted => b'.',
            };
            let mut bytes = vec![ch; *width as usize];
            bytes.extend(commands::line_feed());
            bytes
        }
        DeviceOp::EmitRaster {
            width_bytes,
            height,
            data,
        } => graphics::raster(*width_bytes, *height, data),
        DeviceOp::QrNative {
            payload,
            module_size,
        } => qr::symbol(payload.as_bytes(), *module_size, qr::QrEcLevel::Medium),
        DeviceOp::Cut => commands::cut_partial_feed(CUT_FEED_UNITS),
    }
}

/// Compile an ordered operation stream to one contiguous byte buffer.
pub fn encode(ops: &[DeviceOp]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for op in ops {
        bytes.extend(encode_op(op));
    }
    bytes
}

// ============================================================================
// TESTS
// ============================================================================
