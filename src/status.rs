//! # Printer Status Model
//!
//! Health and statistics reported to the fleet server. Field names and
//! status strings match the firmware wire format byte for byte; the
//! server keys dashboards off these exact strings.

use chrono::Utc;
use serde::Serialize;

/// Printer health states, serialized as the firmware's status strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrinterHealth {
    #[default]
    Ready,
    PaperOut,
    PaperLow,
    CoverOpen,
    CutterError,
    Overheat,
    MechanicalError,
    Offline,
}

impl PrinterHealth {
    /// Whether the device can accept a job in this state. PaperLow
    /// still prints; everything else worse than Ready does not.
    pub fn can_print(&self) -> bool {
        matches!(self, PrinterHealth::Ready | PrinterHealth::PaperLow)
    }
}

/// Lifetime job counters for one bridge process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PrintStats {
    pub total_jobs: u64,
    pub successful_jobs: u64,
    pub failed_jobs: u64,
    /// Unix milliseconds of the last completed job, if any.
    pub last_print_time: Option<i64>,
}

impl PrintStats {
    pub fn record_success(&mut self) {
        self.total_jobs += 1;
        self.successful_jobs += 1;
        self.last_print_time = Some(now_ms());
    }

    pub fn record_failure(&mut self) {
        self.total_jobs += 1;
        self.failed_jobs += 1;
    }
}

/// Full status report, the `GET /status` body and heartbeat payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub printer_id: String,
    /// Unix milliseconds.
    pub timestamp: i64,
    pub printer_online: bool,
    pub printer_status: PrinterHealth,
    pub paper_present: bool,
    pub paper_near_end: bool,
    pub cover_closed: bool,
    pub cutter_ok: bool,
    pub print_stats: PrintStats,
}

impl StatusReport {
    pub fn new(printer_id: impl Into<String>, health: PrinterHealth, stats: PrintStats) -> Self {
        Self {
            printer_id: printer_id.into(),
            timestamp: now_ms(),
            printer_online: health != PrinterHealth::Offline,
            printer_status: health,
            paper_present: health != PrinterHealth::PaperOut,
            paper_near_end: health == PrinterHealth::PaperLow,
            cover_closed: health != PrinterHealth::CoverOpen,
            cutter_ok: health != PrinterHealth::CutterError,
            print_stats: stats,
        }
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
