use futures::future::join;
use std::time::Duration;

use crate::context::FieldContext;
use crate::error::RefreshError;
use crate::state::ViewSink;
use crate::telemetry::log_error;
use crate::timer::Timer;

/// Handle the user's refresh button.
///
/// Asks the shared context to reload its field list and keeps the loading
/// flag up until both the reload and `min_spinner` have elapsed, so the
/// spinner is visible even when the reload is instant. The flag is tracked
/// independently of any resolution cycle the reload goes on to trigger.
///
/// The flag is cleared whether or not the reload succeeded. A failure is
/// logged before it is returned.
pub async fn manual_refresh(
    context: &impl FieldContext,
    timer: &impl Timer,
    sink: &impl ViewSink,
    min_spinner: Duration,
) -> Result<(), RefreshError> {
    tracing::info!("Manual refresh requested");
    sink.set_loading(true);

    let (refreshed, ()) =
        join(context.refresh_fields(), timer.sleep(min_spinner)).await;

    sink.set_loading(false);

    refreshed.map_err(|e| {
        let e = RefreshError::from(e);
        log_error(&e);
        e
    })
}
