//! Microsoft Graph connector
//!
//! Folder listings, single-item resolution with subtitle discovery, and
//! account/drive discovery against the OneDrive Graph API.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use bridge_traits::auth::AccessTokenProvider;
use bridge_traits::cancel::CancellationSignal;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use core_runtime::config::CoreConfig;
use core_runtime::logging::redact_if_sensitive;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::cache::ItemCache;
use crate::error::{OneDriveError, Result};
use crate::item::{strip_extension, NormalizedItem};
use crate::normalize::normalize;
use crate::types::{
    Account, Drive, DriveItemPage, DriveListResponse, GraphErrorResponse, MeResponse, RawRecord,
};

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Extensions recognised as subtitle files (case-sensitive)
const SUBTITLE_EXTENSIONS: [&str; 3] = ["srt", "sub", "sbv"];

/// Folder whose children should be listed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderTarget {
    /// A folder item; `item_drive_id` defaults to the listing drive
    Item {
        item_id: String,
        item_drive_id: Option<String>,
    },
    /// A path segment under the drive, such as `root` or `special/music`
    Path(String),
}

impl FolderTarget {
    pub fn root() -> Self {
        FolderTarget::Path("root".to_string())
    }

    fn children_path(&self, drive_id: &str) -> String {
        match self {
            FolderTarget::Item {
                item_id,
                item_drive_id,
            } => format!(
                "/drives/{}/items/{}/children",
                item_drive_id.as_deref().unwrap_or(drive_id),
                item_id
            ),
            FolderTarget::Path(folder) => {
                format!("/drives/{}/{}/children", drive_id, folder.trim_matches('/'))
            }
        }
    }
}

/// OneDrive Graph API connector
///
/// # Features
///
/// - Paginated folder listing that follows `@odata.nextLink` with cooperative cancellation
/// - Every listed record cached for a short time, so playback lookups skip the API
/// - Single-item resolution with sibling subtitle discovery
/// - Account and drive discovery
///
/// # Example
///
/// ```ignore
/// use bridge_traits::NeverCancel;
/// use provider_onedrive::{FolderTarget, OneDriveConnector};
///
/// let connector = OneDriveConnector::from_config(&config);
/// let items = connector
///     .get_folder_items("drive-id", &FolderTarget::root(), &NeverCancel)
///     .await?;
/// ```
pub struct OneDriveConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Bearer tokens for the account owning a drive
    token_provider: Arc<dyn AccessTokenProvider>,

    /// Raw record cache shared by listings and lookups
    cache: ItemCache,

    /// Base URL relative paths resolve against
    api_base_url: String,

    /// Query parameters sent with listing and item requests
    listing_parameters: Vec<(String, String)>,
}

impl OneDriveConnector {
    /// Create a connector from explicit collaborators
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        token_provider: Arc<dyn AccessTokenProvider>,
        cache: ItemCache,
        api_base_url: impl Into<String>,
        listing_parameters: Vec<(String, String)>,
    ) -> Self {
        Self {
            http_client,
            token_provider,
            cache,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            listing_parameters,
        }
    }

    /// Create a connector wired from a validated [`CoreConfig`]
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(
            Arc::clone(&config.http_client),
            Arc::clone(&config.token_provider),
            ItemCache::new(
                Arc::clone(&config.cache_store),
                config.addon_id.clone(),
                config.item_cache_ttl,
            ),
            config.api_base_url.clone(),
            config.listing_parameters.clone(),
        )
    }

    /// List the children of a folder, following every continuation page.
    ///
    /// Returns an empty list when cancelled right after the first fetch.
    #[instrument(skip(self, cancel), fields(drive_id = %drive_id, target = ?target))]
    pub async fn get_folder_items(
        &self,
        drive_id: &str,
        target: &FolderTarget,
        cancel: &dyn CancellationSignal,
    ) -> Result<Vec<NormalizedItem>> {
        let path = target.children_path(drive_id);
        let first_page: DriveItemPage = self
            .get_json(drive_id, &path, &self.listing_parameters)
            .await?;

        if cancel.should_cancel() {
            info!("Listing cancelled after first page fetch");
            return Ok(Vec::new());
        }

        let items = self.list_children(drive_id, first_page, cancel).await?;
        info!("Listed {} items", items.len());
        Ok(items)
    }

    /// Normalize a page and every page after it, in order.
    ///
    /// Each record is cached as it is walked. The signal is polled before
    /// each page is processed and before each next-page fetch; once it fires
    /// the items gathered so far are returned without further requests.
    #[instrument(skip(self, first_page, cancel), fields(drive_id = %drive_id))]
    pub async fn list_children(
        &self,
        drive_id: &str,
        first_page: DriveItemPage,
        cancel: &dyn CancellationSignal,
    ) -> Result<Vec<NormalizedItem>> {
        let mut items = Vec::new();
        let mut page = first_page;
        let mut page_number = 1usize;

        loop {
            if cancel.should_cancel() {
                info!("Listing cancelled before page {}", page_number);
                break;
            }

            debug!("Processing page {} ({} records)", page_number, page.value.len());
            for raw in page.value {
                let record = raw.into_resolved();
                let item = normalize(&record, None);
                self.cache
                    .put(item.drive_id.as_deref().unwrap_or_default(), &item.id, &record)
                    .await;
                items.push(item);
            }

            let Some(next_link) = page.next_link else {
                break;
            };

            if cancel.should_cancel() {
                info!("Listing cancelled before fetching page {}", page_number + 1);
                break;
            }

            page = self.get_json(drive_id, &next_link, &[]).await?;
            page_number += 1;
        }

        Ok(items)
    }

    /// Resolve one item, from the cache when possible.
    ///
    /// `drive_id` selects the account; `item_drive_id` and `item_id` address
    /// the item itself, which may live on another drive.
    #[instrument(skip(self), fields(drive_id = %drive_id, item_drive_id = %item_drive_id, item_id = %item_id))]
    pub async fn get_item(
        &self,
        drive_id: &str,
        item_drive_id: &str,
        item_id: &str,
        find_subtitles: bool,
        include_download_info: bool,
    ) -> Result<NormalizedItem> {
        let record = match self.cache.get(item_drive_id, item_id).await {
            Some(record) => record,
            None => {
                let path = format!("/drives/{}/items/{}", item_drive_id, item_id);
                let record: RawRecord = self
                    .get_json(drive_id, &path, &self.listing_parameters)
                    .await?;
                self.cache.put(item_drive_id, item_id, &record).await;
                record
            }
        };

        let token = if include_download_info {
            Some(self.access_token(drive_id).await?)
        } else {
            None
        };
        let mut item = normalize(&record, token.as_ref().map(|t| t.as_deref()));

        if find_subtitles {
            let record = record.into_resolved();
            match record.str_at(&["parentReference", "id"]) {
                Some(parent_id) => {
                    let subtitles = self
                        .find_subtitles(
                            drive_id,
                            item_drive_id,
                            parent_id,
                            strip_extension(&item.name),
                            include_download_info,
                        )
                        .await?;
                    if !subtitles.is_empty() {
                        item.subtitles = Some(subtitles);
                    }
                }
                None => debug!("No parent reference, skipping subtitle search"),
            }
        }

        Ok(item)
    }

    /// Search a folder for subtitle files named after `base_name`.
    ///
    /// Only the first page of search results is examined.
    #[instrument(skip(self), fields(drive_id = %drive_id, parent_id = %parent_id))]
    pub async fn find_subtitles(
        &self,
        drive_id: &str,
        item_drive_id: &str,
        parent_id: &str,
        base_name: &str,
        include_download_info: bool,
    ) -> Result<Vec<NormalizedItem>> {
        let path = format!(
            "/drives/{}/items/{}/search(q='{{{}}}')",
            item_drive_id,
            parent_id,
            urlencoding::encode(base_name)
        );
        let results: DriveItemPage = self.get_json(drive_id, &path, &[]).await?;

        let token = if include_download_info {
            Some(self.access_token(drive_id).await?)
        } else {
            None
        };

        let subtitles: Vec<NormalizedItem> = results
            .value
            .iter()
            .map(|raw| normalize(raw, token.as_ref().map(|t| t.as_deref())))
            .filter(|item| SUBTITLE_EXTENSIONS.contains(&item.name_extension.as_str()))
            .collect();

        debug!("Found {} subtitle files", subtitles.len());
        Ok(subtitles)
    }

    /// Profile of the account owning `drive_id`
    #[instrument(skip(self), fields(drive_id = %drive_id))]
    pub async fn get_account(&self, drive_id: &str) -> Result<Account> {
        let me: MeResponse = self.get_json(drive_id, "/me", &[]).await?;

        Ok(Account {
            id: me.id,
            name: me.display_name.unwrap_or_default(),
        })
    }

    /// Drives visible to the account owning `drive_id`, first-seen order
    #[instrument(skip(self), fields(drive_id = %drive_id))]
    pub async fn get_drives(&self, drive_id: &str) -> Result<Vec<Drive>> {
        let mut seen = HashSet::new();
        let mut drives = Vec::new();

        for path in ["/drives", "/me/drives"] {
            let response: DriveListResponse = self.get_json(drive_id, path, &[]).await?;
            for resource in response.value {
                if seen.insert(resource.id.clone()) {
                    drives.push(Drive::from(resource));
                }
            }
        }

        info!("Discovered {} drives", drives.len());
        Ok(drives)
    }

    /// Access token for the account owning `drive_id`, if the host has one
    async fn access_token(&self, drive_id: &str) -> Result<Option<String>> {
        let tokens = self.token_provider.access_tokens(drive_id).await?;
        if tokens.is_none() {
            warn!(drive_id = %drive_id, "No access token available");
        }
        Ok(tokens.map(|tokens| tokens.access_token))
    }

    /// Resolve a relative API path against the base; absolute URLs pass through
    fn resolve_url(&self, path_or_url: &str) -> String {
        if path_or_url.starts_with("https://") || path_or_url.starts_with("http://") {
            path_or_url.to_string()
        } else {
            format!("{}{}", self.api_base_url, path_or_url)
        }
    }

    /// Authenticated `GET` decoded as JSON
    #[instrument(skip(self, params))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        drive_id: &str,
        path_or_url: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let token = self.access_token(drive_id).await?.ok_or_else(|| {
            OneDriveError::AuthenticationFailed(format!(
                "No access token for drive {}",
                drive_id
            ))
        })?;

        let request = HttpRequest::get(self.resolve_url(path_or_url))
            .query(params)
            .bearer_token(token)
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);
        debug!(
            url = %request.url,
            authorization = %redact_if_sensitive(
                "authorization",
                request.headers.get("Authorization").map_or("", String::as_str)
            ),
            "Sending Graph request"
        );

        let response = self.http_client.execute(request).await?;
        Self::check_status(&response)?;

        serde_json::from_slice(&response.body).map_err(|e| {
            OneDriveError::ParseError(format!("Failed to parse {}: {}", path_or_url, e))
        })
    }

    /// Map a non-success response to an error
    fn check_status(response: &HttpResponse) -> Result<()> {
        if response.is_success() {
            return Ok(());
        }

        let message = Self::error_message(response);
        warn!("API request failed: status={}, {}", response.status, message);

        Err(match response.status {
            401 => OneDriveError::AuthenticationFailed(message),
            429 => OneDriveError::Throttled {
                retry_after_seconds: response
                    .header("Retry-After")
                    .and_then(|value| value.trim().parse().ok())
                    .unwrap_or(0),
            },
            status_code => OneDriveError::ApiError {
                status_code,
                message,
            },
        })
    }

    /// Graph error message, falling back to the raw body
    fn error_message(response: &HttpResponse) -> String {
        match serde_json::from_slice::<GraphErrorResponse>(&response.body) {
            Ok(GraphErrorResponse { error }) => match (error.code, error.message) {
                (Some(code), Some(message)) => format!("{}: {}", code, message),
                (None, Some(message)) => message,
                (Some(code), None) => code,
                (None, None) => String::from_utf8_lossy(&response.body).into_owned(),
            },
            Err(_) => String::from_utf8_lossy(&response.body).into_owned(),
        }
    }
}
