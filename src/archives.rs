//! Archive manager
//!
//! The caller-facing facade over the archive endpoints: validates input,
//! delegates each operation to the shared [`ApiClient`], and hands back the
//! typed result. Holds no state of its own and never caches records; every
//! operation is one round-trip to the service.

use std::sync::Arc;

use crate::client::ApiClient;
use crate::errors::{ArchiveError, ArchiveResult};
use crate::models::{Archive, ArchiveList, ArchiveOptions, ListOptions};

/// Largest page the listing endpoint accepts. The public REST docs still
/// advertise 1000 per page, but the service rejects anything above 100, so
/// 100 is what gets enforced before a request goes out.
const MAX_LIST_COUNT: u32 = 100;

/// Entry point for archive operations.
///
/// Shares its [`ApiClient`] with any sibling managers; cloning the manager
/// clones the handle, not the connection pool.
#[derive(Clone)]
pub struct Archives {
    client: Arc<ApiClient>,
}

impl Archives {
    /// Create a manager over a shared transport.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Start recording `session_id` and return the new archive.
    ///
    /// The service allows at most one recording archive per session and
    /// cannot archive peer-to-peer sessions or sessions without connected
    /// clients; those rejections come back as
    /// [`ArchiveError::Operation`].
    pub async fn create(
        &self,
        session_id: &str,
        options: ArchiveOptions,
    ) -> ArchiveResult<Archive> {
        require_non_empty(session_id, "session_id")?;
        self.client.start_archive(session_id, &options).await
    }

    /// Fetch one archive by identifier.
    pub async fn find(&self, archive_id: &str) -> ArchiveResult<Archive> {
        require_non_empty(archive_id, "archive_id")?;
        self.client.get_archive(archive_id).await
    }

    /// Fetch one page of archives, most recent first.
    ///
    /// `offset` skips past the most recent archives; `count` caps the page
    /// at up to [`MAX_LIST_COUNT`]. Anything above the cap fails with
    /// [`ArchiveError::InvalidArgument`] before a request is sent.
    pub async fn list(&self, options: ListOptions) -> ArchiveResult<ArchiveList> {
        if let Some(count) = options.count {
            if count > MAX_LIST_COUNT {
                return Err(ArchiveError::InvalidArgument(format!(
                    "count must be between 0 and {}, got {}",
                    MAX_LIST_COUNT, count
                )));
            }
        }
        self.client
            .list_archives(options.offset, options.count)
            .await
    }

    /// Stop an in-progress recording and return the updated archive.
    ///
    /// Recording also ends on its own server-side once the maximum duration
    /// is reached or every participant has disconnected; this call only
    /// requests an explicit stop.
    pub async fn stop_by_id(&self, archive_id: &str) -> ArchiveResult<Archive> {
        require_non_empty(archive_id, "archive_id")?;
        self.client.stop_archive(archive_id).await
    }

    /// Delete an archive, returning whether the service answered with a
    /// success status.
    ///
    /// Only archives whose status is `available`, `uploaded` or `deleted`
    /// can be deleted; anything else comes back as
    /// [`ArchiveError::Operation`].
    pub async fn delete_by_id(&self, archive_id: &str) -> ArchiveResult<bool> {
        require_non_empty(archive_id, "archive_id")?;
        let status = self.client.delete_archive(archive_id).await?;
        Ok(status.is_success())
    }
}

fn require_non_empty(value: &str, name: &str) -> ArchiveResult<()> {
    if value.is_empty() {
        return Err(ArchiveError::InvalidArgument(format!(
            "{} must not be empty",
            name
        )));
    }
    Ok(())
}
