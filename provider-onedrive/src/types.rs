//! Microsoft Graph API response types
//!
//! Drive item records come back in many shapes (plain files, folders, media
//! with facets, shared items wrapped in `remoteItem`). They are kept as raw
//! JSON behind [`RawRecord`] and read with safe lookups; only the envelope
//! types with a fixed shape are deserialized into structs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One drive item exactly as the API returned it.
///
/// Every accessor is a safe lookup: a missing key, or a key whose value has
/// the wrong type, yields `None` instead of an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Value);

impl RawRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Follow `path` one key at a time, stopping at the first absent level
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.0, |value, key| value.get(key))
    }

    /// Whether a top-level key is present, even with a `null` value
    pub fn has(&self, key: &str) -> bool {
        self.0.get(key).is_some()
    }

    pub fn str_at(&self, path: &[&str]) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str)
    }

    /// Read a non-negative integer, accepting numeric strings and truncating floats
    pub fn u64_at(&self, path: &[&str]) -> Option<u64> {
        match self.lookup(path)? {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn u32_at(&self, path: &[&str]) -> Option<u32> {
        self.u64_at(path).and_then(|n| u32::try_from(n).ok())
    }

    /// Whether this entry wraps the real record of another drive
    pub fn is_remote(&self) -> bool {
        self.0.get("remoteItem").is_some_and(Value::is_object)
    }

    /// The record this entry stands for.
    ///
    /// Shared and mounted items carry the real record of another drive under
    /// `remoteItem`; everything else is returned unchanged.
    pub fn into_resolved(self) -> RawRecord {
        match self.0 {
            Value::Object(mut map) => match map.remove("remoteItem") {
                Some(inner) if inner.is_object() => RawRecord(inner),
                Some(other) => {
                    map.insert("remoteItem".to_string(), other);
                    RawRecord(Value::Object(map))
                }
                None => RawRecord(Value::Object(map)),
            },
            other => RawRecord(other),
        }
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A page of a collection response (`children`, `search`, `drives`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriveItemPage {
    /// Records on this page
    #[serde(default)]
    pub value: Vec<RawRecord>,

    /// Absolute URL of the next page, absent on the last page
    #[serde(rename = "@odata.nextLink", default)]
    pub next_link: Option<String>,
}

/// Signed-in account summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: String,
    pub name: String,
}

/// Kind of drive as reported by `driveType`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveType {
    Personal,
    Business,
    DocumentLibrary,
    Other(String),
}

impl DriveType {
    pub fn parse(s: &str) -> Self {
        match s {
            "personal" => DriveType::Personal,
            "business" => DriveType::Business,
            "documentLibrary" => DriveType::DocumentLibrary,
            other => DriveType::Other(other.to_string()),
        }
    }

    /// Wire value of `driveType`
    pub fn as_str(&self) -> &str {
        match self {
            DriveType::Personal => "personal",
            DriveType::Business => "business",
            DriveType::DocumentLibrary => "documentLibrary",
            DriveType::Other(other) => other,
        }
    }

    /// Human-readable name; unknown types are shown as-is
    pub fn display_name(&self) -> &str {
        match self {
            DriveType::Personal => "OneDrive Personal",
            DriveType::Business => "OneDrive for Business",
            DriveType::DocumentLibrary => "SharePoint Document Library",
            DriveType::Other(other) => other,
        }
    }
}

impl Serialize for DriveType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A drive visible to the signed-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Drive {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub drive_type: DriveType,
}

/// `GET /me` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MeResponse {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// `GET /drives` and `GET /me/drives` response
#[derive(Debug, Deserialize)]
pub(crate) struct DriveListResponse {
    #[serde(default)]
    pub value: Vec<DriveResource>,
}

/// Drive resource
///
/// See: https://learn.microsoft.com/graph/api/resources/drive
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DriveResource {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub drive_type: String,
}

/// Error body returned with non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct GraphErrorResponse {
    pub error: GraphError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<DriveResource> for Drive {
    fn from(resource: DriveResource) -> Self {
        Drive {
            id: resource.id,
            name: resource.name.unwrap_or_default(),
            drive_type: DriveType::parse(&resource.drive_type),
        }
    }
}
