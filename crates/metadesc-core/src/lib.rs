//! Core building blocks for Metadesc.
//!
//! - [`error`]: the `ApiError` taxonomy every public operation returns
//! - [`types`]: model descriptors, summary requests, and the JSON wire shapes
//! - [`config`]: settings schema, loading, and env var overrides
//! - [`utils`]: paths and text helpers

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use error::{ApiError, ApiResult};
pub use types::{ModelDescriptor, SummaryRequest};
