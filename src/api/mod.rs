//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoint that runs payroll over punches and
//! rates submitted as JSON.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::PayrollRequest;
pub use response::{ApiError, ApiErrorResponse, PayrollResponse};
pub use state::AppState;
