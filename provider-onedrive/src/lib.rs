//! # OneDrive Provider
//!
//! Media-oriented listing core for Microsoft Graph (OneDrive).
//!
//! ## Overview
//!
//! This module provides:
//! - Normalization of heterogeneous drive item records into [`NormalizedItem`]
//! - Folder listing that follows `@odata.nextLink` with cooperative cancellation
//! - A short-lived item cache populated by listings
//! - Single-item resolution with sibling subtitle discovery
//! - Account and drive discovery

pub mod cache;
pub mod connector;
pub mod error;
pub mod item;
pub mod normalize;
pub mod types;

pub use cache::ItemCache;
pub use connector::{FolderTarget, OneDriveConnector};
pub use error::{OneDriveError, Result};
pub use item::{
    extension, strip_extension, AudioFacet, DownloadInfo, FolderFacet, ImageFacet, ItemKind,
    NormalizedItem, VideoFacet,
};
pub use normalize::normalize;
pub use types::{Account, Drive, DriveItemPage, DriveType, RawRecord};
