//! Workspace facade crate.
//!
//! Host applications depend on `mediadrive-workspace` and toggle the
//! documented features (`desktop-shims`) instead of wiring each crate
//! individually. The OneDrive provider and runtime configuration are
//! re-exported as-is.

pub use core_runtime::config::{CoreConfig, CoreConfigBuilder};
pub use core_runtime::logging::{init_logging, LoggingConfig};
pub use provider_onedrive::{
    FolderTarget, ItemKind, NormalizedItem, OneDriveConnector, OneDriveError,
};
