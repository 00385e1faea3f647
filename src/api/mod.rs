//! HTTP API exposing the user-invoked payroll operations.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ActionRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
