use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Number of closure-call durations kept per stage
const LATENCY_WINDOW: usize = 1024;

/// Counters for a single pipeline stage
#[derive(Debug)]
pub struct StageStats {
    name: String,
    forwarded: AtomicU64,
    discarded: AtomicU64,
    latencies: Mutex<VecDeque<u64>>,
}

impl StageStats {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            forwarded: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
            latencies: Mutex::new(VecDeque::with_capacity(LATENCY_WINDOW)),
        }
    }

    /// Stage name as registered
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn record_forwarded(&self) {
        self.forwarded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_discarded(&self) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one closure-call duration in nanoseconds
    pub(crate) fn record_latency(&self, nanos: u64) {
        let mut latencies = self.latencies.lock();
        if latencies.len() >= LATENCY_WINDOW {
            latencies.pop_front();
        }
        latencies.push_back(nanos);
    }

    /// Elements this stage sent downstream
    pub fn forwarded(&self) -> u64 {
        self.forwarded.load(Ordering::Relaxed)
    }

    /// Elements this stage dropped (failed predicate or cut by a limit)
    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }

    /// Median closure-call latency in microseconds
    pub fn latency_p50_us(&self) -> f64 {
        self.percentile(0.50)
    }

    /// 99th-percentile closure-call latency in microseconds
    pub fn latency_p99_us(&self) -> f64 {
        self.percentile(0.99)
    }

    fn percentile(&self, p: f64) -> f64 {
        let latencies = self.latencies.lock();
        if latencies.is_empty() {
            return 0.0;
        }

        let mut sorted: Vec<_> = latencies.iter().copied().collect();
        sorted.sort_unstable();

        let idx = ((sorted.len() as f64 * p).ceil() as usize).saturating_sub(1);
        sorted[idx] as f64 / 1000.0
    }

    /// Point-in-time copy of this stage's counters
    pub fn snapshot(&self) -> StageSnapshot {
        StageSnapshot {
            name: self.name.clone(),
            forwarded: self.forwarded(),
            discarded: self.discarded(),
            latency_p50_us: self.latency_p50_us(),
            latency_p99_us: self.latency_p99_us(),
        }
    }
}

/// A snapshot of one stage's counters at a point in time
#[derive(Debug, Clone)]
pub struct StageSnapshot {
    pub name: String,
    pub forwarded: u64,
    pub discarded: u64,
    pub latency_p50_us: f64,
    pub latency_p99_us: f64,
}

impl StageSnapshot {
    /// Format the snapshot as a human-readable line
    pub fn format(&self) -> String {
        format!(
            "{}: forwarded {}, discarded {}, closure P50: {:.2}µs, P99: {:.2}µs",
            self.name, self.forwarded, self.discarded, self.latency_p50_us, self.latency_p99_us
        )
    }
}

/// Registry of per-stage counters for one pipeline.
///
/// Clonable; a handle taken before the terminal call stays valid after the
/// pipeline has been drained.
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    stages: Arc<Mutex<Vec<Arc<StageStats>>>>,
}

impl PipelineStats {
    /// Register a new stage, in attachment order
    pub(crate) fn register(&self, name: &str) -> Arc<StageStats> {
        let stats = Arc::new(StageStats::new(name));
        self.stages.lock().push(Arc::clone(&stats));
        stats
    }

    /// Snapshots for all stages, in attachment order
    pub fn snapshot(&self) -> Vec<StageSnapshot> {
        self.stages.lock().iter().map(|s| s.snapshot()).collect()
    }

    /// Multi-line summary of all stage counters
    pub fn summary(&self) -> String {
        let mut summary = String::from("Pipeline stage counters:\n");
        for snapshot in self.snapshot() {
            summary.push_str(&format!("  {}\n", snapshot.format()));
        }
        summary
    }
}
