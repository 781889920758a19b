//! HTTP API module for the capacity planner.
//!
//! This module provides the REST endpoints for storing PIs, editing the
//! configuration, computing capacity and moving state in and out.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EnrichRequest, ImportBundle};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
