use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use warden_core::{AppError, AppResult};

/// Shared flag marking a form submission as in flight.
///
/// Clones observe the same flag, so a view can disable its submit control
/// while the form it belongs to is waiting on the API.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<AtomicBool>,
}

impl SubmissionGuard {
    /// Creates an idle guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a submission is currently in flight.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claims the guard until the returned value is dropped.
    pub fn try_begin(&self, operation: &str) -> AppResult<InFlightSubmission> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::Busy(format!("{operation} is already in progress")))?;

        Ok(InFlightSubmission {
            in_flight: Arc::clone(&self.in_flight),
        })
    }
}

/// Claim on a [`SubmissionGuard`]; releases it on drop.
#[derive(Debug)]
pub struct InFlightSubmission {
    in_flight: Arc<AtomicBool>,
}

impl Drop for InFlightSubmission {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
