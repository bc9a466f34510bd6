//! # Element Interpreter
//!
//! Walks an ordered [`PrintJob`] and produces the ordered [`DeviceOp`]
//! stream for it. This is where the formatting state machine, template
//! substitution, and the QR/bitmap builders meet.
//!
//! ## Register Coalescing
//!
//! Declared formatting state and emitted device registers are tracked
//! separately. Before each text line the interpreter diffs the two and
//! emits only the `SetAlignment`/`SetBold`/`SetSize` ops that actually
//! change a register. The fleet firmware does the same, and redundant
//! writes cost real time on a 9600-baud serial printer.
//!
//! ## Finalization
//!
//! Every rendered job ends with `FeedLine` then `Cut`, exactly once,
//! whether or not an element failed. A job that dies halfway must still
//! leave the paper cut and the drawer serviceable.

use tracing::debug;

use crate::error::BridgeError;
use crate::job::{template, PrintElement, PrintJob};
use crate::ops::DeviceOp;
use crate::protocol::text::Alignment;
use crate::qr;
use crate::raster::RasterBlock;
use crate::style::FormatState;

/// Interpreter policy knobs, sourced from [`BridgeConfig`](crate::config::BridgeConfig).
#[derive(Debug, Clone, Copy)]
pub struct InterpOptions {
    /// Paper width in text columns. Separator rules default to this and
    /// never exceed it.
    pub paper_width: u8,
    /// Restore the declared alignment immediately after QR and bitmap
    /// blocks instead of leaving the device register where the block
    /// put it.
    pub restore_alignment: bool,
    /// Reject out-of-range QR sizes instead of clamping.
    pub strict_qr_size: bool,
    /// Use the printer's QR engine. When false, QR URLs are rendered
    /// host-side and shipped as raster blocks.
    pub native_qr: bool,
}

impl Default for InterpOptions {
    fn default() -> Self {
        Self {
            paper_width: 48,
            restore_alignment: true,
            strict_qr_size: false,
            native_qr: true,
        }
    }
}

/// Outcome of rendering one job.
///
/// `ops` is complete and finalized even when `error` is set; the sink
/// can always flush it.
#[derive(Debug)]
pub struct Rendered {
    pub ops: Vec<DeviceOp>,
    pub error: Option<BridgeError>,
}

impl Rendered {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Device registers as last written, for coalescing.
///
/// Initial values are what ESC @ leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct EmittedRegisters {
    alignment: Alignment,
    bold: bool,
    size: crate::ops::TextSize,
}

/// Render a print job to its device operation stream.
pub fn render(job: &PrintJob, opts: &InterpOptions) -> Rendered {
    let mut interp = Interpreter::new(opts);
    let mut error = None;

    for (index, element) in job.elements.iter().enumerate() {
        if let Err(e) = interp.element(element, &job.variables) {
            debug!(index, error = %e, "element failed, finalizing job");
            error = Some(e);
            break;
        }
    }

    let ops = interp.finish();
    Rendered { ops, error }
}

struct Interpreter<'a> {
    opts: &'a InterpOptions,
    declared: FormatState,
    emitted: EmittedRegisters,
    ops: Vec<DeviceOp>,
}

impl<'a> Interpreter<'a> {
    fn new(opts: &'a InterpOptions) -> Self {
        Self {
            opts,
            declared: FormatState::new(),
            emitted: EmittedRegisters::default(),
            ops: Vec::new(),
        }
    }

    fn element(
        &mut self,
        element: &PrintElement,
        variables: &std::collections::HashMap<String, String>,
    ) -> Result<(), BridgeError> {
        match element {
            PrintElement::Text(text) => {
                let text = template::replace_variables(text, variables);
                self.sync_registers();
                self.ops.push(DeviceOp::EmitText(text));
            }
            PrintElement::Blank => {
                self.ops.push(DeviceOp::FeedLine);
            }
            PrintElement::Format(directive) => {
                self.declared.apply(directive);
            }
            PrintElement::Line { style, width } => {
                let width = width
                    .unwrap_or(self.opts.paper_width)
                    .min(self.opts.paper_width);
                self.ops.push(DeviceOp::DrawLine {
                    style: *style,
                    width,
                });
            }
            PrintElement::QrUrl {
                url,
                size,
                alignment,
            } => {
                self.aligned_block(*alignment, |this| {
                    if this.opts.native_qr {
                        let op = qr::native_op(url, *size, this.opts.strict_qr_size)?;
                        this.ops.push(op);
                    } else {
                        let block = qr::raster_block(url, *size, this.opts.strict_qr_size)?;
                        this.push_raster(block);
                    }
                    Ok(())
                })?;
            }
            PrintElement::QrBitmap {
                width,
                height,
                data,
            } => {
                let block = RasterBlock::from_packed(*width, *height, data.clone())?;
                self.aligned_block(Alignment::Center, |this| {
                    this.push_raster(block);
                    Ok(())
                })?;
            }
        }
        Ok(())
    }

    /// Emit register diffs so the device matches the declared state.
    fn sync_registers(&mut self) {
        if self.emitted.alignment != self.declared.alignment {
            self.ops.push(DeviceOp::SetAlignment(self.declared.alignment));
            self.emitted.alignment = self.declared.alignment;
        }
        if self.emitted.bold != self.declared.bold {
            self.ops.push(DeviceOp::SetBold(self.declared.bold));
            self.emitted.bold = self.declared.bold;
        }
        if self.emitted.size != self.declared.size {
            self.ops.push(DeviceOp::SetSize(self.declared.size));
            self.emitted.size = self.declared.size;
        }
    }

    /// Run a block under a temporary alignment, restoring the declared
    /// alignment afterwards when the policy asks for it.
    ///
    /// Validation errors inside the block surface before any alignment
    /// op lands, so a rejected QR leaves no stray register writes.
    fn aligned_block(
        &mut self,
        alignment: Alignment,
        body: impl FnOnce(&mut Self) -> Result<(), BridgeError>,
    ) -> Result<(), BridgeError> {
        let staged = std::mem::take(&mut self.ops);
        let result = body(self);
        let block_ops = std::mem::replace(&mut self.ops, staged);
        result?;

        if self.emitted.alignment != alignment {
            self.ops.push(DeviceOp::SetAlignment(alignment));
            self.emitted.alignment = alignment;
        }
        self.ops.extend(block_ops);

        if self.opts.restore_alignment && self.emitted.alignment != self.declared.alignment {
            self.ops.push(DeviceOp::SetAlignment(self.declared.alignment));
            self.emitted.alignment = self.declared.alignment;
        }
        Ok(())
    }

    fn push_raster(&mut self, block: RasterBlock) {
        let width_bytes = block.width_bytes();
        let height = block.height() as u16;
        self.ops.push(DeviceOp::EmitRaster {
            width_bytes,
            height,
            data: block.into_data(),
        });
    }

    /// Finalize: one trailing feed, one cut.
    fn finish(mut self) -> Vec<DeviceOp> {
        self.ops.push(DeviceOp::FeedLine);
        self.ops.push(DeviceOp::Cut);
        self.ops
    }
}

// ============================================================================
// TESTS
// ============================================================================
