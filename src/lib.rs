//! Rust client for the Vidmesh session recording (archive) REST API
//!
//! Vidmesh records video-conferencing sessions server-side; this crate wraps
//! the REST endpoints that manage those recordings ("archives"): start,
//! fetch, page through, stop, and delete. The recording pipeline itself
//! (capture, compositing, encoding, storage) lives entirely in the service;
//! nothing here touches media.
//!
//! # Features
//!
//! - **Typed results**: responses decode into [`Archive`] and
//!   [`ArchiveList`] values; lifecycle statuses stay pass-through strings
//! - **Local validation**: empty identifiers and out-of-range page sizes
//!   fail with [`ArchiveError::InvalidArgument`] before any request is sent
//! - **Distinct error kinds**: credential rejections, domain rejections and
//!   transport failures each surface as their own [`ArchiveError`] variant
//! - **Shared transport**: one [`ApiClient`] behind an `Arc` serves any
//!   number of managers and concurrent callers
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use vidmesh_archives::{ApiClient, ArchiveOptions, Archives, Credentials, ListOptions};
//!
//! let client = ApiClient::new(Credentials::new("key", "secret"))?;
//! let archives = Archives::new(Arc::new(client));
//!
//! // Start recording a session, under a label.
//! let archive = archives
//!     .create("sess_4fjq02", ArchiveOptions::with_name("weekly sync"))
//!     .await?;
//! println!("recording {} ({})", archive.id, archive.status);
//!
//! // Page through what exists.
//! let page = archives
//!     .list(ListOptions { offset: Some(0), count: Some(50) })
//!     .await?;
//! println!("{} of {} archives", page.len(), page.total_count());
//!
//! // Stop and clean up.
//! let stopped = archives.stop_by_id(&archive.id).await?;
//! archives.delete_by_id(&stopped.id).await?;
//! ```

pub mod archives;
pub mod client;
pub mod errors;
pub mod models;

// Re-export main types
pub use archives::Archives;
pub use client::{ApiClient, ApiClientBuilder, Credentials};
pub use errors::{ArchiveError, ArchiveOperation, ArchiveResult};
pub use models::{Archive, ArchiveList, ArchiveOptions, ListOptions};
