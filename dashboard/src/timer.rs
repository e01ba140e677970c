use std::future::Future;
use std::time::Duration;

/// Runtime-specific sleep. The browser uses gloo timers, tests use tokio's
/// pausable clock.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}
