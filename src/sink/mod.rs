//! # Device Operation Sink
//!
//! The boundary between rendered operations and the physical printer.
//! The bridge owns exactly one sink handle, passed in at construction,
//! and drives it from a single worker so device registers are never
//! touched by two jobs at once.

pub mod file;

pub use file::FileSink;

use std::sync::{Arc, Mutex};

use crate::error::BridgeError;
use crate::ops::DeviceOp;
use crate::status::PrinterHealth;

/// Consumer of rendered device operations.
///
/// Implementations receive ops strictly in emission order. `submit` may
/// buffer; `flush` must push everything to the device before returning.
pub trait DeviceSink: Send {
    fn submit(&mut self, op: &DeviceOp) -> Result<(), BridgeError>;

    fn flush(&mut self) -> Result<(), BridgeError>;

    /// Current device health as far as the sink can tell.
    fn status(&self) -> PrinterHealth;
}

/// Recording sink for tests and dry runs.
///
/// Stores every submitted op; shares its log through an `Arc` so a test
/// can keep reading after the sink moves into the bridge.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    ops: Arc<Mutex<Vec<DeviceOp>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything submitted so far.
    pub fn recorded(&self) -> Vec<DeviceOp> {
        self.ops.lock().map(|ops| ops.clone()).unwrap_or_default()
    }
}

impl DeviceSink for VecSink {
    fn submit(&mut self, op: &DeviceOp) -> Result<(), BridgeError> {
        self.ops
            .lock()
            .map_err(|_| BridgeError::DeviceIo("recorder lock poisoned".into()))?
            .push(op.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), BridgeError> {
        Ok(())
    }

    fn status(&self) -> PrinterHealth {
        PrinterHealth::Ready
    }
}
