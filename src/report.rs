//! Per-run reporting for the evaluator driver.

use std::time::Duration;

/// Sizes and timing for one reduction pass over one sample.
pub struct ReductionReport {
    pub algorithm: &'static str,
    pub sample_size: usize,
    pub minset_size: usize,
    pub coverage_size: usize,
    pub elapsed: Duration,
}

impl ReductionReport {
    pub fn print_text(&self) {
        eprintln!(
            "{}: minset {} of {}, covers {} blocks in {:.2?}",
            self.algorithm, self.minset_size, self.sample_size, self.coverage_size, self.elapsed
        );
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "algorithm": self.algorithm,
            "sample_size": self.sample_size,
            "minset_size": self.minset_size,
            "coverage_size": self.coverage_size,
            "elapsed_ms": self.elapsed.as_millis(),
        })
    }
}
