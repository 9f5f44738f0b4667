//! Bounded retry-until-true waiting.
//!
//! Bridges the gap between a write call returning and its effect being
//! observably consistent on later reads. Blocks the calling thread; the only
//! way out is the predicate turning true or the timeout elapsing.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// Repeatedly evaluate `predicate` until it returns true or `timeout`
/// elapses. The deadline gets a final evaluation before giving up.
pub fn await_until<F>(timeout: Duration, interval: Duration, mut predicate: F) -> Result<(), PollError>
where
    F: FnMut() -> bool,
{
    let started = Instant::now();
    loop {
        if predicate() {
            return Ok(());
        }
        let waited = started.elapsed();
        if waited >= timeout {
            return Err(PollError::TimedOut { waited, timeout });
        }
        thread::sleep(interval.min(timeout - waited));
    }
}

/// Like [`await_until`] but the predicate may fail. Transient evaluation
/// errors are logged and treated as "not yet".
pub fn await_until_ok<F, E>(
    timeout: Duration,
    interval: Duration,
    mut predicate: F,
) -> Result<(), PollError>
where
    F: FnMut() -> Result<bool, E>,
    E: fmt::Display,
{
    await_until(timeout, interval, || match predicate() {
        Ok(ready) => ready,
        Err(e) => {
            debug!(error = %e, "Poll predicate failed; retrying");
            false
        }
    })
}

#[derive(Debug)]
pub enum PollError {
    /// The condition never became true within the allotted time.
    TimedOut { waited: Duration, timeout: Duration },
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimedOut { waited, timeout } => write!(
                f,
                "Condition not met within {:?} (waited {:?})",
                timeout, waited
            ),
        }
    }
}

impl std::error::Error for PollError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_immediately_when_predicate_already_true() {
        let started = Instant::now();
        await_until(Duration::from_secs(5), Duration::from_millis(100), || true).unwrap();
        assert!(started.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn waits_for_predicate_to_flip() {
        let mut calls = 0;
        await_until(Duration::from_secs(2), Duration::from_millis(5), || {
            calls += 1;
            calls >= 3
        })
        .unwrap();
        assert_eq!(calls, 3);
    }

    #[test]
    fn times_out_when_condition_never_holds() {
        let err = await_until(Duration::from_millis(50), Duration::from_millis(10), || false)
            .unwrap_err();
        let PollError::TimedOut { waited, timeout } = err;
        assert_eq!(timeout, Duration::from_millis(50));
        assert!(waited >= timeout);
    }

    #[test]
    fn transient_errors_are_swallowed() {
        let mut calls = 0;
        await_until_ok(Duration::from_secs(2), Duration::from_millis(5), || {
            calls += 1;
            if calls < 3 {
                Err("connection refused")
            } else {
                Ok(true)
            }
        })
        .unwrap();
        assert_eq!(calls, 3);
    }

    #[test]
    fn persistent_errors_become_a_timeout() {
        let result = await_until_ok(
            Duration::from_millis(40),
            Duration::from_millis(10),
            || Err::<bool, _>("still broken"),
        );
        assert!(matches!(result, Err(PollError::TimedOut { .. })));
    }
}
