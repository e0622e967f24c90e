//! InTransit Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus settings loading.

pub mod adapters;
pub mod persistence;
pub mod serialization;
pub mod settings;

pub use adapters::ReqwestHttpClient;
pub use persistence::FileSessionStorage;
pub use serialization::{SerializationError, from_json_bytes, to_json_pretty_bytes};
pub use settings::{
    ConfigError, ENV_PREFIX, default_config_path, load_settings, load_settings_from,
};
