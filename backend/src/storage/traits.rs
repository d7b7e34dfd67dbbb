//! # Storage Traits
//!
//! Abstractions the domain services depend on. Implementations live in
//! sibling modules: [`crate::storage::fs`] persists to a data directory,
//! [`crate::storage::memory`] keeps everything in process memory for tests
//! and throwaway embedding.

use anyhow::Result;

use crate::domain::models::guest::Guest;
use crate::domain::models::member::Member;

/// Storage interface for family member records.
pub trait MemberStorage: Send + Sync {
    /// Store a new member record.
    fn store_member(&self, member: &Member) -> Result<()>;

    /// Get a member by id, or `None` when no such record exists.
    fn get_member(&self, member_id: &str) -> Result<Option<Member>>;

    /// List all members, ordered by name.
    fn list_members(&self) -> Result<Vec<Member>>;

    /// Replace an existing member record. Fails when the record is missing.
    fn update_member(&self, member: &Member) -> Result<()>;

    /// Remove a member record. Removing a missing record is not an error.
    fn delete_member(&self, member_id: &str) -> Result<()>;
}

/// Storage interface for guest RSVP responses.
pub trait GuestStorage: Send + Sync {
    /// Append one response.
    fn store_guest(&self, guest: &Guest) -> Result<()>;

    /// List all responses, newest submission first.
    fn list_guests(&self) -> Result<Vec<Guest>>;
}

/// Blob store for member photos.
pub trait PhotoStorage: Send + Sync {
    /// Store image bytes under `path` and return the public URL.
    fn upload_photo(&self, path: &str, bytes: &[u8]) -> Result<String>;

    /// Remove the image at `path`. Removing a missing image is not an error.
    fn delete_photo(&self, path: &str) -> Result<()>;
}

/// Marker every photo URL embeds between its backend-specific prefix and
/// the storage path.
pub const PHOTO_URL_MARKER: &str = "/family-photos/";

/// Recover the storage path from a public photo URL, whichever backend
/// produced it.
pub fn photo_path_from_url(url: &str) -> Option<&str> {
    let (_, path) = url.split_once(PHOTO_URL_MARKER)?;
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

/// A storage backend: hands out the repository implementations the services
/// are wired with. `Clone` is expected to be cheap and to share underlying
/// state between the handed-out repositories.
pub trait Connection: Send + Sync + Clone {
    type MemberRepository: MemberStorage + Clone;
    type GuestRepository: GuestStorage + Clone;
    type PhotoRepository: PhotoStorage + Clone;

    fn create_member_repository(&self) -> Self::MemberRepository;
    fn create_guest_repository(&self) -> Self::GuestRepository;
    fn create_photo_repository(&self) -> Self::PhotoRepository;
}
