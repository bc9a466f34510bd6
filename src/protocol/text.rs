//! # ESC/POS Text Styling Commands
//!
//! Text formatting commands for Epson-compatible thermal printers.
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Alignment | ESC a n | Left / center / right |
//! | Bold | ESC E n | **Emphasized** text |
//! | Size | GS ! n | Width and height multipliers |
//! | Font | ESC M n | Font A (12×24) or Font B (9×17) |
//!
//! ## Text Alignment
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! ```

use super::commands::{ESC, GS};

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Set Text Alignment (ESC a n)
///
/// Sets the alignment for subsequent text lines.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC a n  |
/// | Hex     | 1B 61 n  |
/// | Decimal | 27 97 n  |
///
/// ## Parameters
///
/// - `n = 0`: Left alignment (default)
/// - `n = 1`: Center alignment
/// - `n = 2`: Right alignment
///
/// ## Behavior
///
/// - Affects all subsequent lines until changed
/// - Takes effect at start of next line
/// - Reset by ESC @ (initialize)
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::{align, Alignment};
///
/// let center = align(Alignment::Center);
/// assert_eq!(center, vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// TEXT EMPHASIS (BOLD)
// ============================================================================

/// # Set Emphasis (ESC E n)
///
/// Turns emphasized (bold) printing on or off.
///
/// ## Protocol Details
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC E n |
/// | Hex     | 1B 45 n |
/// | Decimal | 27 69 n |
///
/// ## Parameters
///
/// Only the least significant bit of `n` is used:
/// - `n = 0`: Emphasis OFF
/// - `n = 1`: Emphasis ON
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::bold;
///
/// let mut data = Vec::new();
/// data.extend(bold(true));
/// data.extend(b"TOTAL");
/// data.extend(bold(false));
/// ```
#[inline]
pub fn bold(enabled: bool) -> Vec<u8> {
    vec![ESC, b'E', enabled as u8]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// # Select Character Size (GS ! n)
///
/// Sets horizontal and vertical character expansion in a single byte.
///
/// ## Protocol Details
///
/// | Format  | Bytes  |
/// |---------|--------|
/// | ASCII   | GS ! n |
/// | Hex     | 1D 21 n |
/// | Decimal | 29 33 n |
///
/// ## Parameters
///
/// `n` packs both multipliers:
/// - Bits 4-6: width multiplier minus one (0-7 = 1× to 8×)
/// - Bits 0-2: height multiplier minus one (0-7 = 1× to 8×)
///
/// ## Common Values
///
/// | n | Size |
/// |------|------|
/// | 0x00 | Normal (1×1) |
/// | 0x11 | Double width and height (2×2) |
/// | 0x01 | Double height only |
/// | 0x10 | Double width only |
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::size;
///
/// // Double width and height
/// let big = size(2, 2);
/// assert_eq!(big, vec![0x1D, 0x21, 0x11]);
/// ```
pub fn size(width_mult: u8, height_mult: u8) -> Vec<u8> {
    let w = width_mult.clamp(1, 8) - 1;
    let h = height_mult.clamp(1, 8) - 1;
    vec![GS, b'!', (w << 4) | h]
}

/// Reset to normal size (1x1)
#[inline]
pub fn size_normal() -> Vec<u8> {
    size(1, 1)
}

/// Double size (2x2)
#[inline]
pub fn size_double() -> Vec<u8> {
    size(2, 2)
}

// ============================================================================
// FONT SELECTION
// ============================================================================

/// Available fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Font A: 12×24 dots, 48 columns on 80mm paper
    #[default]
    A = 0,
    /// Font B: 9×17 dots, 64 columns on 80mm paper
    B = 1,
}

/// # Select Font (ESC M n)
///
/// Selects the character font for subsequent text.
///
/// ## Protocol Details
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC M n |
/// | Hex     | 1B 4D n |
/// | Decimal | 27 77 n |
///
/// ## Font Specifications
///
/// | Font | Char Size | Columns (80mm) |
/// |------|-----------|----------------|
/// | A | 12×24 dots | 48 |
/// | B | 9×17 dots | 64 |
///
/// ## Example
///
/// ```
/// use recibo::protocol::text::{font, Font};
///
/// let font_b = font(Font::B);
/// assert_eq!(font_b, vec![0x1B, 0x4D, 0x01]);
/// ```
pub fn font(f: Font) -> Vec<u8> {
    vec![ESC, b'M', f as u8]
}

// ============================================================================
// TESTS
// ============================================================================
