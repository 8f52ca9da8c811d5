use std::fmt;

use serde::{Deserialize, Deserializer};

/// Opaque record key. The service hands out numeric ids, but nothing here relies on that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(serde_json::Number),
            Text(String),
        }
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => RecordId(n.to_string()),
            RawId::Text(s) => RecordId(s),
        })
    }
}

/// Stored resume bytes. Accepts the `{"type":"Buffer","data":[..]}` shape a Node backend emits
/// for blob columns as well as a bare byte array. A null column is no bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContent(pub Vec<u8>);

impl<'de> Deserialize<'de> for FileContent {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawFile {
            Buffer { data: Vec<u8> },
            Bytes(Vec<u8>),
        }
        Ok(match Option::<RawFile>::deserialize(deserializer)? {
            Some(RawFile::Buffer { data }) => FileContent(data),
            Some(RawFile::Bytes(data)) => FileContent(data),
            None => FileContent::default(),
        })
    }
}

impl FileContent {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn deserialize_null_default<'de, D, T>(deserializer: D) -> core::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordEntry {
    pub id: RecordId,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub name: String,
    #[serde(default)]
    pub file: FileContent,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordPage {
    pub data: Vec<RecordEntry>,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// Body the service sends alongside a failed request.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Server verdict on an upload. A rejection is an answer, not a transport failure.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Accepted(serde_json::Value),
    Rejected { status: u16, error: String },
}

pub const DUPLICATE_RESUME: &str = "Duplicate resume detected";

impl UploadOutcome {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, UploadOutcome::Rejected { error, .. } if error == DUPLICATE_RESUME)
    }
}
