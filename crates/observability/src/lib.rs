//! `billhub-observability` — tracing setup for the portal binaries.

/// Initialize process-wide tracing.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration.
pub mod tracing;
