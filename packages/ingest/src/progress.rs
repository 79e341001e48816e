//! Progress reporting for batch runs.
//!
//! [`ProgressCallback`] keeps the batch layer independent of how progress
//! is shown. The CLI renders it with `indicatif`; tests and library callers
//! use [`NullProgress`].

use std::sync::Arc;

/// Receives progress updates from [`crate::process_directory`].
///
/// Implementations must be `Send + Sync` because documents finish on
/// blocking worker threads.
pub trait ProgressCallback: Send + Sync {
    /// Set the number of documents to process.
    fn set_total(&self, total: u64);

    /// Advance by `delta` documents.
    fn inc(&self, delta: u64);

    /// Update the message shown alongside the indicator.
    fn set_message(&self, msg: String);

    /// Mark the run as complete with a final message.
    fn finish(&self, msg: String);
}

/// Ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`].
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
