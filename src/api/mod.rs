//! HTTP API module for the Payroll Engine.
//!
//! This module exposes attendance summaries, payroll previews, salary
//! generation and the salary record lifecycle as REST endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{MarkPaidRequest, PreviewRequest, RecordsQuery};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
