//! HTTP API module for the Compensation Engine.
//!
//! This module provides the REST API endpoints for computing salary
//! breakdowns, applying revisions and managing employee records.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BreakdownQuery, EmployeeRecordRequest, RevisionCalculationRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
