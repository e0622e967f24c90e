//! Application use cases (business logic orchestration).

mod fetch_profile;
mod login;
mod logout;

pub use fetch_profile::*;
pub use login::*;
pub use logout::*;
