//! Test-reporting port

use std::sync::Arc;

use probe_domain::AssertionFailure;

/// Port for reporting failures to the running test.
///
/// Reporting a failure never aborts the test: later assertions in the same
/// test still run. The context is passed explicitly to every call; there is
/// no global failure sink.
pub trait TestContext {
    /// Records a free-form failure message.
    fn fail(&self, message: String);

    /// Records an assertion failure.
    fn report(&self, failure: &AssertionFailure) {
        tracing::debug!(%failure, "soft assertion failed");
        self.fail(failure.to_string());
    }
}

impl<T: TestContext + ?Sized> TestContext for &T {
    fn fail(&self, message: String) {
        (**self).fail(message);
    }
}

impl<T: TestContext + ?Sized> TestContext for Arc<T> {
    fn fail(&self, message: String) {
        (**self).fail(message);
    }
}
