//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest`, with retry and exponential backoff
//! - `CacheStore` as a mutex-guarded in-memory map with per-entry expiry
//!
//! Account/token handling is left to the host application, which supplies an
//! `AccessTokenProvider` of its own.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{MemoryCacheStore, ReqwestHttpClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> bridge_traits::error::Result<()> {
//!     let http_client = Arc::new(ReqwestHttpClient::try_new()?);
//!     let cache = Arc::new(MemoryCacheStore::new());
//!
//!     // Use in core configuration
//!     Ok(())
//! }
//! ```

mod cache;
mod http;

pub use cache::MemoryCacheStore;
pub use http::ReqwestHttpClient;
