//! # Core Runtime Module
//!
//! Runtime infrastructure shared by the provider crates:
//! - Logging and tracing setup
//! - Configuration management with fail-fast validation
//!
//! ## Overview
//!
//! Hosts build a [`CoreConfig`](config::CoreConfig) once, initialize logging
//! with [`init_logging`](logging::init_logging), and hand the config to a
//! provider connector.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
