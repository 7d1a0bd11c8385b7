use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

/// Shared counters for one exploration run.
/// Workers add through atomics; checkpoints own the timing.
pub struct Metrics {
    contexts: AtomicUsize,
    worlds: AtomicUsize,
    hits: AtomicUsize,
    misses: AtomicUsize,
    degraded: AtomicUsize,
    start: Instant,
    prior: Mutex<(Instant, usize)>,
}

impl Default for Metrics {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            contexts: AtomicUsize::new(0),
            worlds: AtomicUsize::new(0),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            degraded: AtomicUsize::new(0),
            start: now,
            prior: Mutex::new((now, 0)),
        }
    }
}

impl Metrics {
    /// Contexts built into models.
    pub fn add_contexts(&self, n: usize) {
        self.contexts.fetch_add(n, Ordering::Relaxed);
    }
    /// Worlds across all built models.
    pub fn add_worlds(&self, n: usize) {
        self.worlds.fetch_add(n, Ordering::Relaxed);
    }
    /// Contexts that landed on an already registered state.
    pub fn add_hits(&self, n: usize) {
        self.hits.fetch_add(n, Ordering::Relaxed);
    }
    /// Contexts that registered a new state.
    pub fn add_misses(&self, n: usize) {
        self.misses.fetch_add(n, Ordering::Relaxed);
    }
    /// Models kept unreduced after a reducer failure.
    pub fn add_degraded(&self, n: usize) {
        self.degraded.fetch_add(n, Ordering::Relaxed);
    }

    pub fn contexts(&self) -> usize {
        self.contexts.load(Ordering::Relaxed)
    }
    pub fn worlds(&self) -> usize {
        self.worlds.load(Ordering::Relaxed)
    }
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
    pub fn degraded(&self) -> usize {
        self.degraded.load(Ordering::Relaxed)
    }
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns stats only if the progress interval has elapsed.
    /// Reports the context rate since the last checkpoint.
    pub fn checkpoint(&self) -> Option<String> {
        let mut prior = self.prior.lock().ok()?;
        if prior.0.elapsed() >= crate::PROGRESS_INTERVAL {
            let secs = prior.0.elapsed().as_secs().max(1) as f64;
            let curr = self.contexts();
            let rate = (curr - prior.1) as f64 / secs;
            *prior = (Instant::now(), curr);
            Some(format!(
                "{:<20}{:<20}{:<20}{:<20}",
                format!("contexts {}", curr),
                format!("states {}", self.misses()),
                format!("degraded {}", self.degraded()),
                format!("C/sec {:.1}", rate),
            ))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} contexts, {} worlds, {} states, {} merges, {} degraded in {:.2?}",
            self.contexts(),
            self.worlds(),
            self.misses(),
            self.hits(),
            self.degraded(),
            self.elapsed()
        )
    }
}
