//! # Initialization, Feed, and Cut Commands
//!
//! Core paper-handling commands shared by all ESC/POS printers.
//!
//! ## Reference
//!
//! Based on "ESC/POS Application Programming Guide" by Seiko Epson Corp.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// Most ESC/POS commands begin with ESC (0x1B). This byte signals the start
/// of a control sequence rather than printable text.
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Prefixes graphics, barcode, and cutter commands:
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
///
/// Prints any data in the line buffer and advances paper by the current
/// line spacing amount.
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state. Sent once when a
/// device connection is opened so every job starts from known registers.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## What Gets Reset
///
/// - Print buffer is cleared
/// - Emphasis and character size return to defaults
/// - Alignment reset to left
/// - Line spacing reset to default
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// let init = commands::init();
/// assert_eq!(init, vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// PAPER FEED
// ============================================================================

/// # Print and Line Feed (LF)
///
/// Prints the line buffer and advances one line.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | LF    |
/// | Hex     | 0A    |
/// | Decimal | 10    |
#[inline]
pub fn line_feed() -> Vec<u8> {
    vec![LF]
}

/// # Feed n Lines (ESC d n)
///
/// Prints the line buffer and feeds `n` lines at the current line spacing.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC d n  |
/// | Hex     | 1B 64 n  |
/// | Decimal | 27 100 n |
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// let feed = commands::feed_lines(3);
/// assert_eq!(feed, vec![0x1B, 0x64, 3]);
/// ```
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

// ============================================================================
// CUTTER CONTROL
// ============================================================================

/// # Feed and Partial Cut (GS V 66 n)
///
/// Feeds paper `n` motion units past the last printed line, then performs
/// a partial cut. Function B of the GS V command family, the standard
/// end-of-receipt cut on Epson-compatible autocutters.
///
/// ## Protocol Details
///
/// | Format  | Bytes      |
/// |---------|------------|
/// | ASCII   | GS V B n   |
/// | Hex     | 1D 56 42 n |
/// | Decimal | 29 86 66 n |
///
/// ## Behavior
///
/// Partial cuts leave a small uncut hinge so the receipt does not fall
/// before the customer takes it.
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// // At end of receipt
/// let cut = commands::cut_partial_feed(0);
/// assert_eq!(cut, vec![0x1D, 0x56, 0x42, 0x00]);
/// ```
#[inline]
pub fn cut_partial_feed(n: u8) -> Vec<u8> {
    vec![GS, b'V', 0x42, n]
}

/// # Full Cut (GS V 0)
///
/// Performs a full cut at the current position without feeding.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 0   |
/// | Hex     | 1D 56 00 |
/// | Decimal | 29 86 0  |
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![GS, b'V', 0]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ESC/POS uses little-endian encoding for all multi-byte integers.
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(576), [0x40, 0x02]); // 576 = 0x0240
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
