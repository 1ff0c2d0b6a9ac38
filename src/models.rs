//! Archive data model
//!
//! Typed views over the JSON payloads the archive REST API returns, plus the
//! option structs callers pass in. Records are only ever built by decoding a
//! service response; nothing in this crate mutates one after the fact.

use serde::{Deserialize, Serialize};

/// One recording's metadata as reported by the service.
///
/// Decoding is deliberately tolerant: every field has a default and unknown
/// fields are ignored, so payloads from newer service versions still decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archive {
    /// Identifier assigned by the service when the archive was created.
    #[serde(default)]
    pub id: String,

    /// Lifecycle status as reported by the service (`starting`, `started`,
    /// `recording`, `stopped`, `available`, `uploaded`, `deleted`,
    /// `failed`). Passed through verbatim, never validated against a closed
    /// set.
    #[serde(default)]
    pub status: String,

    /// The session this archive records.
    #[serde(default)]
    pub session_id: String,

    /// Creation time, in milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: i64,

    /// Recorded duration in seconds.
    #[serde(default)]
    pub duration: u64,

    /// Caller-supplied label; empty when none was given.
    #[serde(default)]
    pub name: String,

    /// Download URL; `None` until the archive is available.
    #[serde(default)]
    pub url: Option<String>,
}

/// One page of archives plus the server-side total.
///
/// Read-only: index it, iterate it, or take the items out by value via
/// `IntoIterator`. [`total_count`](ArchiveList::total_count) reports how many
/// archives exist for the project overall, not how many were paged in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArchiveList {
    #[serde(rename = "count", default)]
    total_count: u64,
    #[serde(default)]
    items: Vec<Archive>,
}

impl ArchiveList {
    /// Total number of archives that exist server-side.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Number of archives in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Archive at `index`, or `None` past the end of the page.
    pub fn get(&self, index: usize) -> Option<&Archive> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Archive> {
        self.items.iter()
    }

    /// The page as a slice.
    pub fn items(&self) -> &[Archive] {
        &self.items
    }
}

impl std::ops::Index<usize> for ArchiveList {
    type Output = Archive;

    fn index(&self, index: usize) -> &Archive {
        &self.items[index]
    }
}

impl IntoIterator for ArchiveList {
    type Item = Archive;
    type IntoIter = std::vec::IntoIter<Archive>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ArchiveList {
    type Item = &'a Archive;
    type IntoIter = std::slice::Iter<'a, Archive>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Options for starting an archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveOptions {
    /// Human-readable label stored with the archive. Sent as the empty
    /// string when unset.
    pub name: Option<String>,
}

impl ArchiveOptions {
    /// Options carrying a name label.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Pagination options for listing archives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// How many of the most recent archives to skip; `Some(0)` starts at the
    /// most recent. Service default when `None`.
    pub offset: Option<u32>,

    /// How many archives to return, at most 100. Service default when
    /// `None`.
    pub count: Option<u32>,
}
