//! HTTP request domain types

mod header;
mod method;
mod record;

pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use record::ApiRequest;
