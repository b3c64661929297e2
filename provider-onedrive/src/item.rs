//! Normalized drive item model
//!
//! The uniform shape every listing and lookup returns, independent of how
//! the API happened to describe the item.

use serde::Serialize;

/// Which kind of entry an item is, for callers that dispatch on it.
///
/// Computed once during normalization. The facets on [`NormalizedItem`] stay
/// independent; when an item carries several, the first of
/// folder, video, audio, image wins here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Folder,
    Video,
    Audio,
    Image,
    File,
}

/// Marker for folder entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderFacet {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VideoFacet {
    pub width: Option<u64>,
    pub height: Option<u64>,
    /// Whole seconds, truncated from milliseconds
    pub duration_seconds: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AudioFacet {
    pub tracknumber: Option<u32>,
    pub discnumber: Option<u32>,
    /// Whole seconds, truncated from milliseconds
    pub duration_seconds: u64,
    pub year: Option<u32>,
    pub genre: Option<String>,
    pub album: Option<String>,
    pub artist: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageFacet {
    /// Size of the image file in bytes
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadHeaders {
    pub authorization: String,
}

/// Everything a player needs to fetch the content directly
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadInfo {
    pub url: Option<String>,
    pub headers: DownloadHeaders,
}

impl DownloadInfo {
    /// Header value is `Bearer ` with an empty token when none is available.
    pub fn new(url: Option<String>, access_token: Option<&str>) -> Self {
        Self {
            url,
            headers: DownloadHeaders {
                authorization: format!("Bearer {}", access_token.unwrap_or_default()),
            },
        }
    }
}

/// A drive item in the uniform shape.
///
/// `id`, `name`, `name_extension`, `drive_id` and `mimetype` are always
/// present when serialized (`null` when unknown); every other field appears
/// only when it applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedItem {
    pub id: String,
    pub name: String,
    pub name_extension: String,
    pub drive_id: Option<String>,
    pub mimetype: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<FolderFacet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoFacet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioFacet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageFacet>,

    /// Large thumbnail URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnails: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_info: Option<DownloadInfo>,

    /// Sibling subtitle files, attached only when some were found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<Vec<NormalizedItem>>,

    #[serde(skip)]
    pub kind: ItemKind,
}

impl NormalizedItem {
    pub fn is_folder(&self) -> bool {
        self.folder.is_some()
    }
}

/// Text after the last `.` of `name`, or `""` when there is no dot.
///
/// Case is preserved.
pub fn extension(name: &str) -> &str {
    name.rfind('.').map_or("", |dot| &name[dot + 1..])
}

/// `name` with its final `.extension` removed; unchanged when there is no dot.
pub fn strip_extension(name: &str) -> &str {
    name.rfind('.').map_or(name, |dot| &name[..dot])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(extension("clip.mp4"), "mp4");
        assert_eq!(extension("archive.tar.GZ"), "GZ");
        assert_eq!(extension("README"), "");
        assert_eq!(extension("trailing."), "");
        assert_eq!(extension(""), "");
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("movie.mkv"), "movie");
        assert_eq!(strip_extension("show.s01e01.mp4"), "show.s01e01");
        assert_eq!(strip_extension("README"), "README");
        assert_eq!(strip_extension(".hidden"), "");
    }

    #[test]
    fn test_download_info_degrades_without_token() {
        let info = DownloadInfo::new(Some("https://dl".to_string()), None);
        assert_eq!(info.headers.authorization, "Bearer ");

        let info = DownloadInfo::new(None, Some("tok"));
        assert_eq!(info.headers.authorization, "Bearer tok");
        assert!(info.url.is_none());
    }
}
