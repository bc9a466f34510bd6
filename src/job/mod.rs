//! # Print Jobs
//!
//! Domain model for one print job: the ordered element list a sender
//! submits, plus the variable map used for `{{name}}` substitution.
//!
//! Submodules:
//! - [`wire`]: the exact inbound/outbound JSON shapes
//! - [`template`]: placeholder substitution

pub mod template;
pub mod wire;

use std::collections::HashMap;

use crate::ops::LineStyle;
use crate::protocol::text::Alignment;
use crate::style::FormatDirective;

/// One element of a print job, in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintElement {
    /// Text line printed under the current formatting registers.
    Text(String),

    /// Empty string on the wire: advance one blank line.
    Blank,

    /// Partial formatting update.
    Format(FormatDirective),

    /// Horizontal separator rule.
    Line { style: LineStyle, width: Option<u8> },

    /// QR symbol from a URL payload.
    QrUrl {
        url: String,
        size: u8,
        alignment: Alignment,
    },

    /// Pre-rendered 1-bit bitmap, packed MSB first.
    QrBitmap {
        width: u32,
        height: u32,
        data: Vec<u8>,
    },
}

/// A parsed, validated print job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrintJob {
    pub elements: Vec<PrintElement>,
    pub variables: HashMap<String, String>,
}

impl PrintJob {
    pub fn new(elements: Vec<PrintElement>) -> Self {
        Self {
            elements,
            variables: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
