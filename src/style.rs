//! # Formatting State Machine
//!
//! Tracks the formatting registers a print job declares over its
//! lifetime. Format directives are partial updates: each one names only
//! the registers it changes, and everything else persists until the next
//! directive or the end of the job.
//!
//! The state here is the *declared* state. What actually gets written to
//! the device is decided by the interpreter, which diffs declared state
//! against the last-emitted registers before each content op.

use crate::ops::TextSize;
use crate::protocol::text::{Alignment, Font};

/// A partial formatting update parsed off the wire.
///
/// `None` fields leave the corresponding register untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatDirective {
    pub alignment: Option<Alignment>,
    pub bold: Option<bool>,
    pub size: Option<TextSize>,
}

impl FormatDirective {
    /// A directive that changes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.alignment.is_none() && self.bold.is_none() && self.size.is_none()
    }
}

/// Current formatting registers.
///
/// `font` is tracked for completeness but nothing on the wire mutates
/// it; jobs always print in Font A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatState {
    pub alignment: Alignment,
    pub bold: bool,
    pub size: TextSize,
    pub font: Font,
}

impl Default for FormatState {
    fn default() -> Self {
        Self {
            alignment: Alignment::Left,
            bold: false,
            size: TextSize::Normal,
            font: Font::A,
        }
    }
}

impl FormatState {
    /// Initial job state: left-aligned, no emphasis, normal size, Font A.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a partial update into the current state.
    pub fn apply(&mut self, directive: &FormatDirective) {
        if let Some(alignment) = directive.alignment {
            self.alignment = alignment;
        }
        if let Some(bold) = directive.bold {
            self.bold = bold;
        }
        if let Some(size) = directive.size {
            self.size = size;
        }
    }

    /// Snapshot of the current registers.
    pub fn current(&self) -> Self {
        *self
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_initial_state() {
        let state = FormatState::new();
        assert_eq!(state.alignment, Alignment::Left);
        assert!(!state.bold);
        assert_eq!(state.size, TextSize::Normal);
        assert_eq!(state.font, Font::A);
    }

    #[test]
    fn test_partial_update_preserves_other_registers() {
        let mut state = FormatState::new();
        state.apply(&FormatDirective {
            alignment: Some(Alignment::Center),
            bold: Some(true),
            size: Some(TextSize::Large),
        });

        // Only bold named: alignment and size must survive
        state.apply(&FormatDirective {
            bold: Some(false),
            ..FormatDirective::default()
        });

        assert_eq!(state.alignment, Alignment::Center);
        assert!(!state.bold);
        assert_eq!(state.size, TextSize::Large);
    }

    #[test]
    fn test_empty_directive_is_noop() {
        let mut state = FormatState::new();
        state.apply(&FormatDirective {
            alignment: Some(Alignment::Right),
            ..FormatDirective::default()
        });
        let before = state.current();
        state.apply(&FormatDirective::empty());
        assert_eq!(state.current(), before);
    }

    #[test]
    fn test_reset() {
        let mut state = FormatState::new();
        state.apply(&FormatDirective {
            alignment: Some(Alignment::Center),
            bold: Some(true),
            size: Some(TextSize::Small),
        });
        state.reset();
        assert_eq!(state, FormatState::default());
    }

    #[test]
    fn test_directive_is_empty() {
        assert!(FormatDirective::empty().is_empty());
        assert!(!FormatDirective {
            bold: Some(true),
            ..FormatDirective::default()
        }
        .is_empty());
    }
}
