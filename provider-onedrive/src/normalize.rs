//! Raw record to [`NormalizedItem`] conversion
//!
//! Pure functions: no I/O and no failure modes. Any field the record lacks
//! comes out as `None` (or `""` for `id`/`name`).

use crate::item::{
    extension, AudioFacet, DownloadInfo, FolderFacet, ImageFacet, ItemKind, NormalizedItem,
    VideoFacet,
};
use crate::types::RawRecord;

/// Normalize one drive item record.
///
/// `download_token` is `None` when download info is not wanted, and
/// `Some(token)` when it is; a `Some(None)` token still attaches download info
/// with an empty bearer.
///
/// Records wrapping a `remoteItem` are normalized from the wrapped record.
pub fn normalize(raw: &RawRecord, download_token: Option<Option<&str>>) -> NormalizedItem {
    if raw.is_remote() {
        let inner = raw.clone().into_resolved();
        return normalize_record(&inner, download_token);
    }
    normalize_record(raw, download_token)
}

fn normalize_record(raw: &RawRecord, download_token: Option<Option<&str>>) -> NormalizedItem {
    let name = raw.str_at(&["name"]).unwrap_or_default().to_string();

    let folder = raw.has("folder").then(FolderFacet::default);
    let video = raw.has("video").then(|| video_facet(raw));
    let audio = raw.has("audio").then(|| audio_facet(raw));
    let image = (raw.has("image") || raw.has("photo")).then(|| ImageFacet {
        size: raw.u64_at(&["size"]),
    });

    let kind = if folder.is_some() {
        ItemKind::Folder
    } else if video.is_some() {
        ItemKind::Video
    } else if audio.is_some() {
        ItemKind::Audio
    } else if image.is_some() {
        ItemKind::Image
    } else {
        ItemKind::File
    };

    let download_info = download_token.map(|token| {
        DownloadInfo::new(
            raw.str_at(&["@microsoft.graph.downloadUrl"])
                .map(str::to_string),
            token,
        )
    });

    NormalizedItem {
        id: raw.str_at(&["id"]).unwrap_or_default().to_string(),
        name_extension: extension(&name).to_string(),
        name,
        drive_id: raw
            .str_at(&["parentReference", "driveId"])
            .map(str::to_string),
        mimetype: raw.str_at(&["file", "mimeType"]).map(str::to_string),
        folder,
        video,
        audio,
        image,
        thumbnails: large_thumbnail(raw),
        download_info,
        subtitles: None,
        kind,
    }
}

fn video_facet(raw: &RawRecord) -> VideoFacet {
    VideoFacet {
        width: raw.u64_at(&["video", "width"]),
        height: raw.u64_at(&["video", "height"]),
        duration_seconds: raw.u64_at(&["video", "duration"]).unwrap_or(0) / 1000,
    }
}

fn audio_facet(raw: &RawRecord) -> AudioFacet {
    let text = |key: &str| raw.str_at(&["audio", key]).map(str::to_string);

    AudioFacet {
        tracknumber: raw.u32_at(&["audio", "track"]),
        discnumber: raw.u32_at(&["audio", "disc"]),
        duration_seconds: raw.u64_at(&["audio", "duration"]).unwrap_or(0) / 1000,
        year: raw.u32_at(&["audio", "year"]),
        genre: text("genre"),
        album: text("album"),
        artist: text("artist"),
        title: text("title"),
    }
}

fn large_thumbnail(raw: &RawRecord) -> Option<String> {
    raw.lookup(&["thumbnails"])?
        .as_array()?
        .first()?
        .get("large")?
        .get("url")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        RawRecord::new(value)
    }

    #[test]
    fn test_video_scenario() {
        let raw = record(json!({
            "id": "A1",
            "name": "clip.mp4",
            "parentReference": {"driveId": "D1"},
            "file": {"mimeType": "video/mp4"},
            "video": {"width": 1920, "height": 1080, "duration": 5000}
        }));

        let item = normalize(&raw, None);

        assert_eq!(item.kind, ItemKind::Video);
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "id": "A1",
                "name": "clip.mp4",
                "name_extension": "mp4",
                "drive_id": "D1",
                "mimetype": "video/mp4",
                "video": {"width": 1920, "height": 1080, "duration_seconds": 5}
            })
        );
    }

    #[test]
    fn test_remote_item_matches_inner_record() {
        let inner = json!({
            "id": "R1",
            "name": "shared.flac",
            "parentReference": {"driveId": "REMOTE", "id": "RP"},
            "file": {"mimeType": "audio/flac"},
            "audio": {"track": 3, "duration": 241_999}
        });
        let outer = record(json!({
            "id": "L1",
            "name": "shared.flac",
            "parentReference": {"driveId": "LOCAL"},
            "remoteItem": inner.clone()
        }));

        assert_eq!(normalize(&outer, None), normalize(&record(inner), None));
        assert_eq!(
            normalize(&outer, None).drive_id.as_deref(),
            Some("REMOTE")
        );
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let item = normalize(&record(json!({})), None);

        assert_eq!(item.id, "");
        assert_eq!(item.name, "");
        assert_eq!(item.name_extension, "");
        assert!(item.drive_id.is_none());
        assert!(item.mimetype.is_none());
        assert_eq!(item.kind, ItemKind::File);
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "id": "",
                "name": "",
                "name_extension": "",
                "drive_id": null,
                "mimetype": null
            })
        );
    }

    #[test]
    fn test_audio_durations_and_tags() {
        let raw = record(json!({
            "id": "T1",
            "name": "song.mp3",
            "audio": {
                "track": 7,
                "disc": 1,
                "duration": 185_500,
                "year": 1999,
                "genre": "Rock",
                "album": "Album",
                "artist": "Artist",
                "title": "Song"
            }
        }));

        let audio = normalize(&raw, None).audio.unwrap();
        assert_eq!(
            audio,
            AudioFacet {
                tracknumber: Some(7),
                discnumber: Some(1),
                duration_seconds: 185,
                year: Some(1999),
                genre: Some("Rock".to_string()),
                album: Some("Album".to_string()),
                artist: Some("Artist".to_string()),
                title: Some("Song".to_string()),
            }
        );

        let bare = normalize(&record(json!({"name": "x.mp3", "audio": {}})), None);
        assert_eq!(bare.audio.unwrap().duration_seconds, 0);
    }

    #[test]
    fn test_duration_truncates_to_seconds() {
        for (millis, seconds) in [(0u64, 0u64), (999, 0), (1000, 1), (61_999, 61)] {
            let raw = record(json!({"video": {"duration": millis}}));
            assert_eq!(normalize(&raw, None).video.unwrap().duration_seconds, seconds);
        }
    }

    #[test]
    fn test_folder_marker() {
        let raw = record(json!({
            "id": "F1",
            "name": "Movies",
            "folder": {"childCount": 12}
        }));

        let item = normalize(&raw, None);
        assert!(item.is_folder());
        assert_eq!(item.kind, ItemKind::Folder);
        assert_eq!(serde_json::to_value(&item).unwrap()["folder"], json!({}));
    }

    #[test]
    fn test_image_or_photo_marker() {
        let image = normalize(&record(json!({"size": 2048, "image": {}})), None);
        assert_eq!(image.image, Some(ImageFacet { size: Some(2048) }));
        assert_eq!(image.kind, ItemKind::Image);

        let photo = normalize(&record(json!({"photo": {"takenDateTime": "x"}})), None);
        assert_eq!(photo.image, Some(ImageFacet { size: None }));
    }

    #[test]
    fn test_facets_are_independent() {
        let raw = record(json!({
            "name": "odd.mp4",
            "video": {"duration": 1000},
            "audio": {"duration": 2000}
        }));

        let item = normalize(&raw, None);
        assert!(item.video.is_some());
        assert!(item.audio.is_some());
        assert_eq!(item.kind, ItemKind::Video);
    }

    #[test]
    fn test_thumbnail_only_with_non_empty_list() {
        let with = record(json!({
            "thumbnails": [{"large": {"url": "https://thumb/large"}}, {"large": {"url": "other"}}]
        }));
        assert_eq!(
            normalize(&with, None).thumbnails.as_deref(),
            Some("https://thumb/large")
        );

        let empty = record(json!({"thumbnails": []}));
        assert!(normalize(&empty, None).thumbnails.is_none());
    }

    #[test]
    fn test_download_info_only_when_requested() {
        let raw = record(json!({
            "id": "A1",
            "name": "clip.mp4",
            "@microsoft.graph.downloadUrl": "https://download/a1"
        }));

        assert!(normalize(&raw, None).download_info.is_none());

        let info = normalize(&raw, Some(Some("tok"))).download_info.unwrap();
        assert_eq!(info.url.as_deref(), Some("https://download/a1"));
        assert_eq!(info.headers.authorization, "Bearer tok");

        let degraded = normalize(&raw, Some(None)).download_info.unwrap();
        assert_eq!(degraded.headers.authorization, "Bearer ");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = record(json!({
            "id": "I1",
            "name": "pic.JPG",
            "size": 10,
            "image": {},
            "thumbnails": [{"large": {"url": "u"}}]
        }));

        let first = normalize(&raw, Some(Some("t")));
        let second = normalize(&raw, Some(Some("t")));
        assert_eq!(first, second);
        assert_eq!(first.name_extension, "JPG");
    }
}
