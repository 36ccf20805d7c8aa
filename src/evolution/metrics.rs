use std::collections::VecDeque;
use std::time::Duration;

use super::report::GenerationSummary;

/// Evolution metrics tracker with rolling window computations.
pub struct EvolutionMetrics {
    summaries: VecDeque<GenerationSummary>,
    generation_micros: VecDeque<u64>,
    capacity: usize,
    total_generations: usize, // lifetime count, never capped
}

impl EvolutionMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        EvolutionMetrics {
            summaries: VecDeque::with_capacity(capacity),
            generation_micros: VecDeque::with_capacity(capacity),
            capacity,
            total_generations: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record_generation(&mut self, summary: GenerationSummary) {
        self.total_generations += 1;
        self.summaries.push_back(summary);
        if self.summaries.len() > self.capacity {
            self.summaries.pop_front();
        }
    }

    pub fn record_generation_time(&mut self, d: Duration) {
        self.generation_micros.push_back(d.as_micros() as u64);
        if self.generation_micros.len() > self.capacity {
            self.generation_micros.pop_front();
        }
    }

    /// Average best score over the last N generations.
    pub fn average_best_score(&self, last_n: usize) -> f64 {
        self.average(last_n, |s| s.best_score as f64)
    }

    /// Average population mean score over the last N generations.
    pub fn average_mean_score(&self, last_n: usize) -> f64 {
        self.average(last_n, |s| s.mean_score)
    }

    /// Average population defection rate (percent) over the last N generations.
    pub fn average_defection_rate(&self, last_n: usize) -> f64 {
        self.average(last_n, |s| s.mean_defection_rate)
    }

    /// Mean wall time of the last N generations in milliseconds.
    pub fn avg_generation_ms(&self, last_n: usize) -> f64 {
        let n = self.generation_micros.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: u64 = self.generation_micros.iter().rev().take(n).sum();
        total as f64 / n as f64 / 1000.0
    }

    pub fn total_generations(&self) -> usize {
        self.total_generations
    }

    fn average(&self, last_n: usize, f: impl Fn(&GenerationSummary) -> f64) -> f64 {
        let n = self.summaries.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = self.summaries.iter().rev().take(n).map(f).sum();
        sum / n as f64
    }
}

impl Default for EvolutionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
