//! Host-based tests for the Morse trainer core
//!
//! Timing-sensitive tests run on the paused tokio clock, so pulse and gap
//! lengths come out exact and nothing here depends on wall time.

#[cfg(test)]
mod grading_tests;
#[cfg(test)]
mod lesson_tests;
#[cfg(test)]
mod receiver_tests;

#[cfg(test)]
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
