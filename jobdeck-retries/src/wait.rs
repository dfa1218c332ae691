//! Wait strategies between retry attempts.

use std::time::Duration;

/// Strategy for waiting before a retry.
#[derive(Debug, Clone)]
pub enum WaitStrategy {
    /// No waiting.
    None,
    /// Fixed delay.
    Fixed(Duration),
    /// Fixed base with randomization, to keep concurrent clients from
    /// retrying in lockstep.
    Jittered {
        /// Base delay.
        base: Duration,
        /// Jitter factor (0.0 to 1.0) applied to the base.
        jitter: f64,
    },
}

impl WaitStrategy {
    /// Calculate the wait duration for the next retry.
    pub fn calculate(&self) -> Duration {
        match self {
            WaitStrategy::None => Duration::ZERO,
            WaitStrategy::Fixed(delay) => *delay,
            WaitStrategy::Jittered { base, jitter } => {
                let base_secs = base.as_secs_f64();
                let delay = base_secs + base_secs * jitter * random_jitter();
                Duration::from_secs_f64(delay.max(0.0))
            }
        }
    }
}

/// Generate a random jitter factor between -1.0 and 1.0.
fn random_jitter() -> f64 {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    rng.gen_range(-1.0..1.0)
}
