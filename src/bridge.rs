//! # Job Pipeline
//!
//! Accepts wire payloads, queues them FIFO, and drives a single worker
//! against the device sink. At most one job renders/prints at a time:
//! printer registers are shared mutable device state, and interleaving
//! two jobs would corrupt both receipts.
//!
//! The queue is bounded. A flooding sender gets an immediate rejection
//! instead of growing the process until the box falls over.
//!
//! Per accepted job, exactly one [`JobEvent`] comes out of the event
//! channel; the broker transport forwards these to the server.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::interp::{self, InterpOptions};
use crate::job::wire::{self, JobEvent};
use crate::job::PrintJob;
use crate::sink::DeviceSink;
use crate::status::{PrintStats, PrinterHealth, StatusReport};

struct QueuedJob {
    job_ref: String,
    job: PrintJob,
}

/// Handle for submitting jobs and reading status.
///
/// Cloneable; all clones feed the same queue and worker.
#[derive(Clone)]
pub struct Bridge {
    tx: mpsc::Sender<QueuedJob>,
    sink: Arc<Mutex<dyn DeviceSink>>,
    stats: Arc<Mutex<PrintStats>>,
    printer_id: String,
}

impl Bridge {
    /// Start the pipeline: spawns the worker task and returns the
    /// submission handle plus the job event stream.
    pub fn start<S: DeviceSink + 'static>(
        sink: S,
        config: &BridgeConfig,
    ) -> (Self, mpsc::UnboundedReceiver<JobEvent>) {
        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let sink: Arc<Mutex<dyn DeviceSink>> = Arc::new(Mutex::new(sink));
        let stats = Arc::new(Mutex::new(PrintStats::default()));

        tokio::spawn(worker(
            rx,
            sink.clone(),
            stats.clone(),
            event_tx,
            config.interp_options(),
        ));

        (
            Self {
                tx,
                sink,
                stats,
                printer_id: config.printer_id.clone(),
            },
            event_rx,
        )
    }

    /// Parse and enqueue a wire payload.
    ///
    /// Returns the generated job reference on acceptance. Malformed
    /// payloads and a full queue are rejected here, before anything is
    /// queued, so a rejected job never produces an event.
    pub fn submit(&self, payload: &[u8]) -> Result<String, BridgeError> {
        let job = wire::parse_job(payload)?;
        let job_ref = Uuid::new_v4().to_string();

        self.tx
            .try_send(QueuedJob {
                job_ref: job_ref.clone(),
                job,
            })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => {
                    warn!(%job_ref, "queue full, rejecting job");
                    BridgeError::Transport("print queue full".into())
                }
                mpsc::error::TrySendError::Closed(_) => {
                    BridgeError::Transport("print worker stopped".into())
                }
            })?;

        info!(%job_ref, "job queued");
        Ok(job_ref)
    }

    /// Current health and counters.
    pub fn status(&self) -> StatusReport {
        let health = self.sink.lock().map_or(PrinterHealth::Offline, |s| s.status());
        let stats = self.stats.lock().map(|s| *s).unwrap_or_default();
        StatusReport::new(self.printer_id.clone(), health, stats)
    }
}

async fn worker(
    mut rx: mpsc::Receiver<QueuedJob>,
    sink: Arc<Mutex<dyn DeviceSink>>,
    stats: Arc<Mutex<PrintStats>>,
    events: mpsc::UnboundedSender<JobEvent>,
    opts: InterpOptions,
) {
    while let Some(queued) = rx.recv().await {
        let QueuedJob { job_ref, job } = queued;

        let rendered = interp::render(&job, &opts);
        let op_count = rendered.ops.len();

        // The sink drain sleeps between chunks; keep it off the
        // async worker thread.
        let drain_sink = sink.clone();
        let ops = rendered.ops;
        let print_result =
            match tokio::task::spawn_blocking(move || print_ops(&drain_sink, &ops)).await {
                Ok(result) => result,
                Err(e) => Err(BridgeError::DeviceIo(format!("print task failed: {e}"))),
            };

        let outcome = match (rendered.error, print_result) {
            (None, Ok(())) => Ok(()),
            (Some(e), _) => Err(e),
            (None, Err(e)) => Err(e),
        };

        let event = match outcome {
            Ok(()) => {
                if let Ok(mut s) = stats.lock() {
                    s.record_success();
                }
                info!(%job_ref, ops = op_count, "job printed");
                JobEvent::success(job_ref.clone())
            }
            Err(e) => {
                if let Ok(mut s) = stats.lock() {
                    s.record_failure();
                }
                error!(%job_ref, error = %e, "job failed");
                JobEvent::error(job_ref.clone(), e.to_string())
            }
        };

        // Receiver gone means nobody is forwarding events; keep
        // printing anyway.
        let _ = events.send(event);
    }
}

/// Flush a rendered op stream through the sink.
///
/// Called with finalized streams only, so even a failing job's feed and
/// cut reach the device before the error is reported.
fn print_ops(sink: &Arc<Mutex<dyn DeviceSink>>, ops: &[crate::ops::DeviceOp]) -> Result<(), BridgeError> {
    let mut sink = sink
        .lock()
        .map_err(|_| BridgeError::DeviceIo("sink lock poisoned".into()))?;
    for op in ops {
        sink.submit(op)?;
    }
    sink.flush()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::wire::JobStatus;
    use crate::ops::DeviceOp;
    use crate::sink::VecSink;
    use pretty_assertions::assert_eq;

    fn test_config() -> BridgeConfig {
        BridgeConfig {
            printer_id: "test-printer".into(),
            queue_capacity: 4,
            ..BridgeConfig::default()
        }
    }

    #[tokio::test]
    async fn test_job_prints_and_reports_success() {
        let sink = VecSink::new();
        let recorder = sink.clone();
        let (bridge, mut events) = Bridge::start(sink, &test_config());

        let job_ref = bridge.submit(br#"["hello"]"#).unwrap();
        let event = events.recv().await.unwrap();

        assert_eq!(event.status, JobStatus::Success);
        assert_eq!(event.job_ref, job_ref);
        assert_eq!(
            recorder.recorded(),
            vec![
                DeviceOp::EmitText("hello".into()),
                DeviceOp::FeedLine,
                DeviceOp::Cut,
            ]
        );

        let status = bridge.status();
        assert_eq!(status.print_stats.successful_jobs, 1);
        assert_eq!(status.print_stats.failed_jobs, 0);
    }

    #[tokio::test]
    async fn test_malformed_payload_rejected_without_event() {
        let (bridge, mut events) = Bridge::start(VecSink::new(), &test_config());

        let err = bridge.submit(br#"[{"bogus": 1}]"#).unwrap_err();
        assert!(matches!(err, BridgeError::MalformedElement(_)));

        // Nothing was queued, so a good job's event is the first one.
        bridge.submit(br#"["ok"]"#).unwrap();
        let event = events.recv().await.unwrap();
        assert_eq!(event.status, JobStatus::Success);
    }

    #[tokio::test]
    async fn test_failed_job_still_cuts_and_pipeline_continues() {
        let sink = VecSink::new();
        let recorder = sink.clone();
        let (bridge, mut events) = Bridge::start(sink, &test_config());

        // Valid wire shape, but the bitmap geometry is wrong: fails at
        // render time, after queue acceptance.
        bridge
            .submit(br#"[{"qr_bitmap": {"width": 100, "height": 2, "data": [0]}}]"#)
            .unwrap();
        let failed = events.recv().await.unwrap();
        assert_eq!(failed.status, JobStatus::Error);

        bridge.submit(br#"["next"]"#).unwrap();
        let ok = events.recv().await.unwrap();
        assert_eq!(ok.status, JobStatus::Success);

        // The failed job finalized (feed + cut) before the next job ran.
        let ops = recorder.recorded();
        assert_eq!(
            ops,
            vec![
                DeviceOp::FeedLine,
                DeviceOp::Cut,
                DeviceOp::EmitText("next".into()),
                DeviceOp::FeedLine,
                DeviceOp::Cut,
            ]
        );

        let status = bridge.status();
        assert_eq!(status.print_stats.total_jobs, 2);
        assert_eq!(status.print_stats.failed_jobs, 1);
    }

    #[tokio::test]
    async fn test_raster_job_drains_off_the_async_worker() {
        let sink = VecSink::new();
        let recorder = sink.clone();
        let (bridge, mut events) = Bridge::start(sink, &test_config());

        bridge
            .submit(br#"[{"qr_bitmap": {"width": 16, "height": 2, "data": [255, 255, 255, 255]}}]"#)
            .unwrap();
        let event = events.recv().await.unwrap();
        assert_eq!(event.status, JobStatus::Success);

        assert!(recorder
            .recorded()
            .iter()
            .any(|op| matches!(op, DeviceOp::EmitRaster { .. })));
    }

    #[tokio::test]
    async fn test_jobs_processed_in_submission_order() {
        let sink = VecSink::new();
        let recorder = sink.clone();
        let (bridge, mut events) = Bridge::start(sink, &test_config());

        for payload in [&br#"["first"]"#[..], &br#"["second"]"#[..], &br#"["third"]"#[..]] {
            bridge.submit(payload).unwrap();
        }
        for _ in 0..3 {
            assert_eq!(events.recv().await.unwrap().status, JobStatus::Success);
        }

        let texts: Vec<String> = recorder
            .recorded()
            .into_iter()
            .filter_map(|op| match op {
                DeviceOp::EmitText(t) => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }
}
