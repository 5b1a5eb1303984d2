//! In-memory test context.

use parking_lot::Mutex;
use probe_application::TestContext;

/// Test context that records every reported failure.
///
/// Assertions keep running after a failure; call [`finish`](Self::finish)
/// at the end of the test to fail it if anything was recorded.
#[derive(Debug, Default)]
pub struct FailureLog {
    failures: Mutex<Vec<String>>,
}

impl FailureLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded failure messages in report order.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().clone()
    }

    /// Returns the number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.lock().len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.lock().is_empty()
    }

    /// Forgets all recorded failures.
    pub fn clear(&self) {
        self.failures.lock().clear();
    }

    /// Panics with every recorded message if any failure was recorded.
    ///
    /// # Panics
    ///
    /// Panics when the log is not empty.
    #[allow(clippy::panic)]
    pub fn finish(&self) {
        let failures = self.failures.lock();
        if !failures.is_empty() {
            panic!(
                "{} assertion(s) failed:\n  {}",
                failures.len(),
                failures.join("\n  ")
            );
        }
    }
}

impl TestContext for FailureLog {
    fn fail(&self, message: String) {
        tracing::warn!(%message, "test failure recorded");
        self.failures.lock().push(message);
    }
}
