//! # ESC/POS Protocol Commands
//!
//! Byte-level command builders for ESC/POS thermal receipt printers
//! (Epson TM series and the many 58mm/80mm compatibles).
//!
//! ## Protocol Overview
//!
//! ESC/POS commands are byte sequences starting with escape characters:
//!
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC a n`, `GS v 0 m xL xH yL yH d1...dk`
//!
//! Multi-byte integers use **little-endian** encoding.
//!
//! ## Module Layout
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`commands`] | Initialization, feed, and cut |
//! | [`text`] | Alignment, emphasis, and character size |
//! | [`graphics`] | Raster bit images (GS v 0) |
//! | [`qr`] | Model 2 QR symbols (GS ( k) |
//! | [`codegen`] | [`DeviceOp`](crate::ops::DeviceOp) → byte compilation |

pub mod codegen;
pub mod commands;
pub mod graphics;
pub mod qr;
pub mod text;
