//! # Device Operations
//!
//! This module defines the ordered, device-ready operation stream the
//! interpreter produces. The stream sits between the wire-format print job
//! and raw ESC/POS bytes:
//!
//! ```text
//! PrintJob → Interpreter → [DeviceOp] (inspectable) → Codegen → Bytes
//! ```
//!
//! Each operation is a single atomic device action. Style changes are
//! individual ops so the interpreter can coalesce redundant register
//! writes before anything reaches the sink.

use crate::protocol::text::Alignment;

/// Character size register values.
///
/// Large maps to double width AND double height in one setting; the
/// device has no independent axis control at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    /// Condensed. Rendered as normal cell size on devices without a
    /// smaller font step.
    Small = 0,
    #[default]
    Normal = 1,
    /// Double width and double height.
    Large = 2,
}

/// Rule styles for horizontal separator lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// Repeated `-`
    #[default]
    Solid,
    /// Repeated `.`
    Dotted,
}

/// Device operations - the "bytecode" for receipt printing.
///
/// Closed set: the sink never sees anything outside this enum. The stream
/// can be:
/// - Inspected for debugging (`{:#?}`) and dry runs
/// - Recorded by `VecSink` in tests
/// - Compiled to ESC/POS bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceOp {
    // ========== Style Registers ==========
    /// Set text alignment (ESC a).
    SetAlignment(Alignment),

    /// Enable/disable emphasis (ESC E).
    SetBold(bool),

    /// Set character size (GS !).
    SetSize(TextSize),

    // ========== Content ==========
    /// Print one text line under the current registers. The codegen
    /// appends the line feed; `text` carries no trailing newline.
    EmitText(String),

    /// Advance one blank line.
    FeedLine,

    /// Full-width horizontal rule.
    DrawLine { style: LineStyle, width: u8 },

    /// Packed 1-bit raster block (GS v 0). `width_bytes` is the row
    /// stride; data length is width_bytes * height.
    EmitRaster {
        width_bytes: u16,
        height: u16,
        data: Vec<u8>,
    },

    /// Device-rendered QR symbol (GS ( k), module size in dots.
    QrNative { payload: String, module_size: u8 },

    // ========== Paper Control ==========
    /// Feed to the cutter and partial-cut (GS V B).
    Cut,
}

impl DeviceOp {
    /// True for ops that write a style register rather than content.
    pub fn is_style(&self) -> bool {
        matches!(
            self,
            DeviceOp::SetAlignment(_) | DeviceOp::SetBold(_) | DeviceOp::SetSize(_)
        )
    }
}
