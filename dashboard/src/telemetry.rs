use std::error::Error;

/// Render an error with its source chain, exactly as anyhow's alternate
/// selector does (`outer: inner: root`). Works on a borrowed error, so the
/// caller can still return it afterwards.
pub fn error_chain(e: &(dyn Error + 'static)) -> String {
    anyhow::Chain::new(e)
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

/// Log an error using the alternate selector, which emits the error chain.
pub fn log_error(e: &(dyn Error + 'static)) {
    tracing::error!("{}", error_chain(e));
}
