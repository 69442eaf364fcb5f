//! Solver configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order in which AC-3 takes arcs off its work queue.
///
/// Only the visitation order changes; the resulting domains are the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ArcQueue {
    /// Oldest arc first.
    #[default]
    Fifo,
    /// Newest arc first.
    Lifo,
}

/// Configuration for [`CspRunner`](super::CspRunner).
///
/// # Examples
///
/// ```
/// use crossword_csp::csp::{ArcQueue, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_max_steps(10_000)
///     .with_time_limit_ms(500)
///     .with_arc_queue(ArcQueue::Lifo)
///     .with_inference(true)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Maximum recursive search steps. 0 = no limit.
    pub max_steps: usize,

    /// Wall-clock budget for the whole solve in milliseconds. 0 = no limit.
    ///
    /// Polled at every search step only; node consistency and the initial
    /// AC-3 pass run to completion, so a solve can overrun by their cost.
    pub time_limit_ms: u64,

    /// AC-3 queue discipline.
    pub arc_queue: ArcQueue,

    /// Re-run arc consistency after each tentative assignment.
    pub inference: bool,

    /// Seed for breaking heuristic ties at random. `None` breaks ties by
    /// slot and dictionary order.
    pub seed: Option<u64>,

    /// Score candidate values in parallel. Requires the `parallel` feature.
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_steps: 0,
            time_limit_ms: 0,
            arc_queue: ArcQueue::Fifo,
            inference: false,
            seed: None,
            parallel: false,
        }
    }
}

impl SolverConfig {
    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = n;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn with_arc_queue(mut self, queue: ArcQueue) -> Self {
        self.arc_queue = queue;
        self
    }

    pub fn with_inference(mut self, inference: bool) -> Self {
        self.inference = inference;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.parallel && !cfg!(feature = "parallel") {
            return Err("parallel scoring requires the `parallel` feature".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.max_steps, 0);
        assert_eq!(config.time_limit_ms, 0);
        assert_eq!(config.arc_queue, ArcQueue::Fifo);
        assert!(!config.inference);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SolverConfig::default()
            .with_max_steps(5)
            .with_time_limit_ms(20)
            .with_arc_queue(ArcQueue::Lifo)
            .with_inference(true)
            .with_seed(3);
        assert_eq!(config.max_steps, 5);
        assert_eq!(config.time_limit_ms, 20);
        assert_eq!(config.arc_queue, ArcQueue::Lifo);
        assert!(config.inference);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_validate_parallel() {
        let config = SolverConfig::default().with_parallel(true);
        assert_eq!(config.validate().is_ok(), cfg!(feature = "parallel"));
    }
}
