//! Bounded readiness polling

use std::time::{Duration, Instant};

use super::error::ProvisionError;

/// Calls a probe at a fixed interval until it succeeds or time runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poller {
    interval: Duration,
    timeout: Duration,
}

impl Default for Poller {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            timeout: Duration::from_secs(180),
        }
    }
}

impl Poller {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Call `probe` until it returns true
    ///
    /// Returns the number of probe calls on success. The probe is always
    /// called at least once, and sleeps never run past the timeout.
    pub fn wait_until<F>(&self, mut probe: F) -> Result<u32, ProvisionError>
    where
        F: FnMut() -> bool,
    {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            if probe() {
                tracing::debug!("Probe succeeded after {} attempt(s)", attempts);
                return Ok(attempts);
            }

            let elapsed = started.elapsed();
            let Some(remaining) = self.timeout.checked_sub(elapsed).filter(|r| !r.is_zero())
            else {
                return Err(ProvisionError::ReadinessTimeout {
                    step: None,
                    attempts,
                    elapsed,
                });
            };

            let delay = self.interval.min(remaining);
            tracing::debug!("Probe attempt {} failed, retrying in {:?}", attempts, delay);
            std::thread::sleep(delay);
        }
    }
}
