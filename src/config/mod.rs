//! Runtime configuration: a thread-safe store of string settings that can
//! be seeded from a manifest and populated from environment variables.

pub mod env;
pub mod error;
pub mod manifest;
pub mod notice;
pub mod report;
pub mod store;

pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use error::ConfigError;
pub use manifest::Manifest;
pub use notice::{IgnoreNotice, NoticeSink, RecordingSink, TracingSink};
pub use report::KeyStatus;
pub use store::ConfigStore;
