//! # Recibo - Receipt Printer Bridge Library
//!
//! Recibo interprets print jobs from a fleet server into device
//! operations for ESC/POS thermal receipt printers. It provides:
//!
//! - **Wire format**: the fleet's JSON job shape, parsed and validated
//! - **Interpreter**: stateful formatting engine with register coalescing
//! - **QR/bitmap builders**: native symbols or host-side rasters
//! - **Protocol implementation**: ESC/POS command builders
//! - **Pipeline**: bounded FIFO queue with a single device worker
//!
//! ## Quick Start
//!
//! ```no_run
//! use recibo::{interp, job::wire, protocol::codegen, sink::FileSink};
//!
//! // Parse a job off the wire
//! let payload = br#"["Welcome!", {"line": "solid"}, ""]"#;
//! let job = wire::parse_job(payload)?;
//!
//! // Render it to device operations
//! let rendered = interp::render(&job, &interp::InterpOptions::default());
//!
//! // Encode and inspect the bytes
//! let bytes = codegen::encode(&rendered.ops);
//! assert!(!bytes.is_empty());
//!
//! // Or drive a real device
//! let _sink = FileSink::open("/dev/usb/lp0")?;
//!
//! # Ok::<(), recibo::error::BridgeError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`job`] | Wire format, domain model, templates |
//! | [`style`] | Formatting state machine |
//! | [`interp`] | Element interpreter |
//! | [`qr`] | QR payload builder |
//! | [`raster`] | Bitmap adapter |
//! | [`ops`] | Device operation stream |
//! | [`protocol`] | ESC/POS command builders |
//! | [`sink`] | Device operation sinks |
//! | [`bridge`] | Queue and worker pipeline |
//! | [`server`] | HTTP ingestion surface |
//! | [`status`] | Health and statistics model |
//! | [`config`] | Environment configuration |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Tested against Epson TM-T20 class devices and common 80mm
//! ESC/POS-compatible clones over the usblp character device.

pub mod bridge;
pub mod config;
pub mod error;
pub mod interp;
pub mod job;
pub mod ops;
pub mod protocol;
pub mod qr;
pub mod raster;
pub mod server;
pub mod sink;
pub mod status;
pub mod style;

// Re-exports for convenience
pub use bridge::Bridge;
pub use config::BridgeConfig;
pub use error::BridgeError;
