//! Remote sources: the HTTP client and the image registry probe

pub mod client;
pub mod registry;

pub use client::{Fetch, HttpClient};
pub use registry::{DockerHubRegistry, TagRegistry};
