//! Per-stage call counters for the draw loop.
//! Counting only compiles in under the `profiling` feature; the macro
//! expands to nothing otherwise.

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for the pipeline's hot paths.
pub struct FunctionCounters {
    pub draw_mesh_calls: AtomicU64,
    pub triangles_processed: AtomicU64,
    pub pixels_tested: AtomicU64,
    pub pixels_covered: AtomicU64,
    pub samples_inside: AtomicU64,
    pub depth_test_passed: AtomicU64,
    pub depth_test_failed: AtomicU64,
    pub framebuffer_clear_calls: AtomicU64,
}

impl FunctionCounters {
    pub const fn new() -> Self {
        Self {
            draw_mesh_calls: AtomicU64::new(0),
            triangles_processed: AtomicU64::new(0),
            pixels_tested: AtomicU64::new(0),
            pixels_covered: AtomicU64::new(0),
            samples_inside: AtomicU64::new(0),
            depth_test_passed: AtomicU64::new(0),
            depth_test_failed: AtomicU64::new(0),
            framebuffer_clear_calls: AtomicU64::new(0),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.draw_mesh_calls.store(0, Ordering::Relaxed);
        self.triangles_processed.store(0, Ordering::Relaxed);
        self.pixels_tested.store(0, Ordering::Relaxed);
        self.pixels_covered.store(0, Ordering::Relaxed);
        self.samples_inside.store(0, Ordering::Relaxed);
        self.depth_test_passed.store(0, Ordering::Relaxed);
        self.depth_test_failed.store(0, Ordering::Relaxed);
        self.framebuffer_clear_calls.store(0, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters.
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            draw_mesh_calls: self.draw_mesh_calls.load(Ordering::Relaxed),
            triangles_processed: self.triangles_processed.load(Ordering::Relaxed),
            pixels_tested: self.pixels_tested.load(Ordering::Relaxed),
            pixels_covered: self.pixels_covered.load(Ordering::Relaxed),
            samples_inside: self.samples_inside.load(Ordering::Relaxed),
            depth_test_passed: self.depth_test_passed.load(Ordering::Relaxed),
            depth_test_failed: self.depth_test_failed.load(Ordering::Relaxed),
            framebuffer_clear_calls: self.framebuffer_clear_calls.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of counter values at a point in time.
#[derive(Debug, Clone, Copy)]
pub struct CounterSnapshot {
    pub draw_mesh_calls: u64,
    pub triangles_processed: u64,
    pub pixels_tested: u64,
    pub pixels_covered: u64,
    pub samples_inside: u64,
    pub depth_test_passed: u64,
    pub depth_test_failed: u64,
    pub framebuffer_clear_calls: u64,
}

impl CounterSnapshot {
    /// Print a formatted report.
    pub fn print_report(&self) {
        println!("\n=== Rasterizer Counters ===");
        println!("  draw_mesh calls:      {:12}", self.draw_mesh_calls);
        println!("  triangles processed:  {:12}", self.triangles_processed);
        println!("  pixels tested:        {:12}", self.pixels_tested);
        println!("  pixels covered:       {:12}", self.pixels_covered);
        println!("  subsamples inside:    {:12}", self.samples_inside);
        println!("  depth test passed:    {:12}", self.depth_test_passed);
        println!("  depth test failed:    {:12}", self.depth_test_failed);
        let attempts = self.depth_test_passed + self.depth_test_failed;
        if attempts > 0 {
            let pass_rate = (self.depth_test_passed as f64 / attempts as f64) * 100.0;
            println!("  depth test pass rate: {:11.2}%", pass_rate);
        }
        println!("  framebuffer clears:   {:12}", self.framebuffer_clear_calls);
        println!();
    }
}

/// Global counters instance.
pub static FUNCTION_COUNTERS: FunctionCounters = FunctionCounters::new();

/// Increment a counter (only when the profiling feature is enabled).
#[macro_export]
macro_rules! count_call {
    ($counter:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }
    };
}
