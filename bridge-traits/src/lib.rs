//! # Host Bridge Traits
//!
//! Contracts between the OneDrive listing core and the host that embeds it.
//!
//! ## Overview
//!
//! The core never talks to the network, the account system or a cache
//! directly. Each capability it needs is a trait here, implemented by the
//! host (desktop defaults live in `bridge-desktop`).
//!
//! ## Traits
//!
//! ### Networking
//! - [`HttpClient`](http::HttpClient) - Async HTTP with retry and TLS owned by the implementation
//! - [`AccessTokenProvider`](auth::AccessTokenProvider) - Bearer tokens for the account owning a drive
//!
//! ### State
//! - [`CacheStore`](cache::CacheStore) - In-process key/value store with per-entry TTL
//!
//! ### Control & Utilities
//! - [`CancellationSignal`](cancel::CancellationSignal) - Cooperative cancellation polled between fetches
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! should convert platform-specific failures into it with an actionable
//! message.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so implementations can be shared
//! across async tasks behind an `Arc`.

pub mod auth;
pub mod cache;
pub mod cancel;
pub mod error;
pub mod http;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use auth::{AccessTokenProvider, AccessTokens};
pub use cache::CacheStore;
pub use cancel::{CancellationSignal, NeverCancel};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use time::{Clock, SystemClock};
