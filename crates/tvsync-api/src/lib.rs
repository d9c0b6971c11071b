// tvsync-api: Async Rust client for the TeamViewer Web API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::Error;
pub use transport::TransportConfig;
