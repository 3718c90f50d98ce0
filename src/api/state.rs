//! Application state for the Payroll Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::workflow::PayrollService;

/// Shared application state.
///
/// Holds the payroll service, which in turn owns the collaborators
/// and the payroll rules.
#[derive(Clone)]
pub struct AppState {
    /// The payroll service.
    service: Arc<PayrollService>,
}

impl AppState {
    /// Creates a new application state around a payroll service.
    pub fn new(service: PayrollService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns a reference to the payroll service.
    pub fn service(&self) -> &PayrollService {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
