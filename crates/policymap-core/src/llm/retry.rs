//! Exponential-backoff retry for remote service calls
//!
//! Wraps any fallible, blocking operation. Failures are counted against a
//! retry budget; while budget remains the calling thread sleeps for a
//! multiplicatively growing (optionally jittered) delay and tries again.
//! Once the budget is spent the most recent error is handed back unchanged.
//! Every caught failure is logged at error level, whatever its kind.

use crate::error::{PolicyMapError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Failure categories a retry policy can single out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Remote service asked us to slow down (HTTP 429)
    RateLimited,
    Timeout,
    Connection,
    /// 5xx responses
    Server,
    /// 4xx responses other than 429
    Client,
    /// Response body could not be understood
    Decode,
    Other,
}

/// Errors that can report which [`ErrorKind`] they belong to
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}

/// Retry policy for remote calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Starting delay in seconds, grown before the first sleep
    pub initial_delay_secs: f64,

    /// Multiplier applied to the delay on every retry
    pub exponential_base: f64,

    /// Scale each step by a further random factor in `[1, 2)`
    pub jitter: bool,

    /// Retries allowed after the first attempt
    pub max_retries: u32,

    /// Kinds treated as transient
    pub retriable: HashSet<ErrorKind>,

    /// Log every attempt at info level
    pub verbose: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay_secs: 1.0,
            exponential_base: 2.0,
            jitter: true,
            max_retries: 0,
            retriable: HashSet::from([ErrorKind::RateLimited]),
            verbose: false,
        }
    }
}

impl RetryPolicy {
    /// Policy with the given retry budget and default backoff
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.initial_delay_secs > 0.0) || !self.initial_delay_secs.is_finite() {
            return Err(PolicyMapError::Config(format!(
                "retry.initial_delay_secs must be positive, got {}",
                self.initial_delay_secs
            )));
        }
        if !(self.exponential_base > 1.0) || !self.exponential_base.is_finite() {
            return Err(PolicyMapError::Config(format!(
                "retry.exponential_base must be greater than 1, got {}",
                self.exponential_base
            )));
        }
        Ok(())
    }

    /// Whether `kind` is one of the designated transient kinds
    pub fn is_retriable(&self, kind: ErrorKind) -> bool {
        self.retriable.contains(&kind)
    }

    /// Delay (seconds) to sleep after `delay`, per
    /// `delay * base * (1 + jitter * U[0, 1))`
    pub fn next_delay<R: Rng>(&self, delay: f64, rng: &mut R) -> f64 {
        let spread = if self.jitter { rng.gen::<f64>() } else { 0.0 };
        delay * self.exponential_base * (1.0 + spread)
    }

    /// Run `op` under this policy, sleeping on the calling thread
    pub fn run<T, E, F>(&self, op: F) -> std::result::Result<T, E>
    where
        F: FnMut() -> std::result::Result<T, E>,
        E: Classify + Display,
    {
        self.run_with(op, std::thread::sleep, &mut rand::thread_rng())
    }

    /// Run `op` with an injected sleep function and random source
    pub fn run_with<T, E, F, S, R>(
        &self,
        mut op: F,
        mut sleep: S,
        rng: &mut R,
    ) -> std::result::Result<T, E>
    where
        F: FnMut() -> std::result::Result<T, E>,
        E: Classify + Display,
        S: FnMut(Duration),
        R: Rng,
    {
        let started = Instant::now();
        let mut retries: u32 = 0;
        let mut delay = self.initial_delay_secs;

        loop {
            if self.verbose {
                info!(
                    "Polling remote service (retries {}/{}, next delay {:.2}s)",
                    retries, self.max_retries, delay
                );
            }

            let err = match op() {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            let elapsed = started.elapsed().as_secs_f64();
            let kind = err.kind();
            if self.is_retriable(kind) {
                error!(?kind, "Transient failure after {:.2}s: {}", elapsed, err);
            } else {
                // NOTE: non-retriable failures are not raised immediately. They
                // are logged and then consume the same counted retry budget as
                // transient ones, so a nonzero budget retries every failure.
                error!(
                    ?kind,
                    "An error has occurred after {:.2}s when calling the remote service: \"{}\"",
                    elapsed,
                    err
                );
            }

            retries += 1;
            if retries > self.max_retries {
                return Err(err);
            }

            delay = self.next_delay(delay, rng);
            sleep(Duration::try_from_secs_f64(delay).unwrap_or(Duration::MAX));
        }
    }
}
