//! HTTP response domain types

mod record;

pub use record::{ApiResponse, StatusCode};
