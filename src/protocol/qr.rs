//! # ESC/POS 2D Symbol Commands (QR Code)
//!
//! Native QR code printing via the GS ( k command family. The printer
//! renders the symbol itself from the payload string, which is far less
//! data over the wire than a rasterized QR image.
//!
//! ## GS ( k Structure
//!
//! Every function shares the frame:
//!
//! ```text
//! GS ( k pL pH cn fn [parameters]
//! 1D 28 6B pL pH 31 fn ...
//! ```
//!
//! - `pL pH`: Parameter length (little-endian), counting cn fn and data
//! - `cn = 49`: Symbol type QR Code
//! - `fn`: Function number (65 model, 67 module size, 69 error correction,
//!   80 store data, 81 print)
//!
//! ## Typical Sequence
//!
//! 1. Function 165: select model 2
//! 2. Function 167: set module size in dots
//! 3. Function 169: set error correction level
//! 4. Function 180: store the payload
//! 5. Function 181: print the stored symbol

use super::commands::{u16_le, GS};

/// QR error correction levels
///
/// Higher levels survive more physical damage at the cost of symbol size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrEcLevel {
    /// ~7% recovery
    Low = 48,
    /// ~15% recovery (the usual choice for receipts)
    #[default]
    Medium = 49,
    /// ~25% recovery
    Quartile = 50,
    /// ~30% recovery
    High = 51,
}

/// # Select QR Model (GS ( k fn=65)
///
/// Selects QR model 2, the variant every modern reader expects.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1D 28 6B 04 00 31 41 32 00 |
/// | Decimal | 29 40 107 4 0 49 65 50 0 |
#[inline]
pub fn model2() -> Vec<u8> {
    vec![GS, b'(', b'k', 0x04, 0x00, 0x31, 0x41, 0x32, 0x00]
}

/// # Set Module Size (GS ( k fn=67)
///
/// Sets the width of one QR module in dots. At 203 DPI one dot is about
/// 0.125mm, so n=6 gives ~0.75mm modules.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1D 28 6B 03 00 31 43 n |
/// | Decimal | 29 40 107 3 0 49 67 n |
///
/// ## Parameters
///
/// - `n`: Module width in dots, 1-16
///
/// ## Example
///
/// ```
/// use recibo::protocol::qr;
///
/// let cmd = qr::module_size(6);
/// assert_eq!(cmd, vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, 6]);
/// ```
#[inline]
pub fn module_size(n: u8) -> Vec<u8> {
    vec![GS, b'(', b'k', 0x03, 0x00, 0x31, 0x43, n]
}

/// # Set Error Correction Level (GS ( k fn=69)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1D 28 6B 03 00 31 45 n |
/// | Decimal | 29 40 107 3 0 49 69 n |
///
/// ## Parameters
///
/// - `n = 48`: Level L (~7%)
/// - `n = 49`: Level M (~15%)
/// - `n = 50`: Level Q (~25%)
/// - `n = 51`: Level H (~30%)
#[inline]
pub fn error_correction(level: QrEcLevel) -> Vec<u8> {
    vec![GS, b'(', b'k', 0x03, 0x00, 0x31, 0x45, level as u8]
}

/// # Store Symbol Data (GS ( k fn=80)
///
/// Stores the payload in the printer's symbol buffer. The parameter
/// length counts cn, fn, m, and the payload bytes.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1D 28 6B pL pH 31 50 30 d1...dk |
/// | Decimal | 29 40 107 pL pH 49 80 48 d1...dk |
///
/// ## Example
///
/// ```
/// use recibo::protocol::qr;
///
/// let cmd = qr::store(b"https://example.com");
/// // pL pH = payload len + 3 = 22
/// assert_eq!(&cmd[..8], &[0x1D, 0x28, 0x6B, 22, 0x00, 0x31, 0x50, 0x30]);
/// assert_eq!(&cmd[8..], b"https://example.com");
/// ```
pub fn store(data: &[u8]) -> Vec<u8> {
    let [p_l, p_h] = u16_le((data.len() + 3) as u16);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.extend_from_slice(&[GS, b'(', b'k', p_l, p_h, 0x31, 0x50, 0x30]);
    cmd.extend_from_slice(data);
    cmd
}

/// # Print Stored Symbol (GS ( k fn=81)
///
/// Prints the symbol stored by [`store`] at the current position, using
/// the current alignment.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1D 28 6B 03 00 31 51 30 |
/// | Decimal | 29 40 107 3 0 49 81 48 |
#[inline]
pub fn print() -> Vec<u8> {
    vec![GS, b'(', b'k', 0x03, 0x00, 0x31, 0x51, 0x30]
}

/// Full command sequence for one QR symbol
///
/// Emits model selection, module size, error correction, store, and print
/// in the order the firmware requires.
///
/// ## Example
///
/// ```
/// use recibo::protocol::qr;
///
/// let bytes = qr::symbol(b"https://example.com", 6, qr::QrEcLevel::Medium);
/// // Starts with the model 2 selection frame
/// assert_eq!(&bytes[..9], &[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00]);
/// ```
pub fn symbol(data: &[u8], module_dots: u8, ec: QrEcLevel) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(32 + data.len());
    cmd.extend(model2());
    cmd.extend(module_size(module_dots));
    cmd.extend(error_correction(ec));
    cmd.extend(store(data));
    cmd.extend(print());
    cmd
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model2() {
        assert_eq!(
            model2(),
            vec![0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00]
        );
    }

    #[test]
    fn test_module_size() {
        assert_eq!(
            module_size(1),
            vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, 0x01]
        );
        assert_eq!(
            module_size(16),
            vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, 0x10]
        );
    }

    #[test]
    fn test_error_correction() {
        assert_eq!(
            error_correction(QrEcLevel::Medium),
            vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 0x31]
        );
        assert_eq!(
            error_correction(QrEcLevel::High),
            vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 0x33]
        );
    }

    #[test]
    fn test_store_length_frame() {
        let cmd = store(b"abc");
        // 3 payload bytes + 3 frame bytes = 6
        assert_eq!(cmd[3], 6);
        assert_eq!(cmd[4], 0);
        assert_eq!(&cmd[8..], b"abc");
    }

    #[test]
    fn test_store_long_payload() {
        let data = vec![b'x'; 300];
        let cmd = store(&data);
        // 303 = 0x012F
        assert_eq!(cmd[3], 0x2F);
        assert_eq!(cmd[4], 0x01);
    }

    #[test]
    fn test_print() {
        assert_eq!(
            print(),
            vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]
        );
    }

    #[test]
    fn test_symbol_ordering() {
        let bytes = symbol(b"hi", 4, QrEcLevel::Low);
        // model, size, ec, store, print frames in order
        let expected_len = 9 + 8 + 8 + (8 + 2) + 8;
        assert_eq!(bytes.len(), expected_len);
        // Print frame is last
        assert_eq!(&bytes[bytes.len() - 8..], &print()[..]);
    }
}
