//! # Character Device Sink
//!
//! Writes encoded ESC/POS bytes to a printer device node such as
//! `/dev/usb/lp0` (USB line printer class) or a serial adapter.
//!
//! ## Chunked Writes
//!
//! Raster blocks can run to tens of kilobytes while the printer's input
//! buffer is typically 4KB. Writes are chunked with a short pause so the
//! kernel never has to block for the full image.
//!
//! ## Setup (Linux)
//!
//! ```bash
//! # USB receipt printers register as usblp devices
//! $ ls /dev/usb/lp*
//! /dev/usb/lp0
//! # The invoking user needs write access, usually via the lp group
//! $ sudo usermod -a -G lp $USER
//! ```

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::error::BridgeError;
use crate::ops::DeviceOp;
use crate::protocol::{codegen, commands};
use crate::sink::DeviceSink;
use crate::status::PrinterHealth;

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// Sink backed by a writable device node.
#[derive(Debug)]
pub struct FileSink {
    file: File,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl FileSink {
    /// Open the device and send ESC @ so the first job starts from
    /// power-on registers.
    ///
    /// ## Errors
    ///
    /// Returns `Transport` if the node cannot be opened (missing
    /// device, permissions) and `DeviceIo` if initialization fails.
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, BridgeError> {
        let path = device.as_ref();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            BridgeError::Transport(format!("failed to open {}: {e}", path.display()))
        })?;

        let mut sink = Self {
            file,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        };
        sink.write_chunked(&commands::init())?;
        debug!(device = %path.display(), "device sink opened");
        Ok(sink)
    }

    fn write_chunked(&mut self, data: &[u8]) -> Result<(), BridgeError> {
        if data.len() <= self.chunk_size {
            self.file
                .write_all(data)
                .map_err(|e| BridgeError::DeviceIo(format!("write failed: {e}")))?;
            return Ok(());
        }

        for chunk in data.chunks(self.chunk_size) {
            self.file
                .write_all(chunk)
                .map_err(|e| BridgeError::DeviceIo(format!("write failed: {e}")))?;
            if !self.chunk_delay.is_zero() {
                thread::sleep(self.chunk_delay);
            }
        }
        Ok(())
    }
}

impl DeviceSink for FileSink {
    fn submit(&mut self, op: &DeviceOp) -> Result<(), BridgeError> {
        self.write_chunked(&codegen::encode_op(op))
    }

    fn flush(&mut self) -> Result<(), BridgeError> {
        self.file
            .flush()
            .map_err(|e| BridgeError::DeviceIo(format!("flush failed: {e}")))
    }

    fn status(&self) -> PrinterHealth {
        // The usblp node gives no status channel; an open handle is
        // the best liveness signal available.
        PrinterHealth::Ready
    }
}
