//! Photo blob store under the data directory.

use anyhow::Result;
use log::{info, warn};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::traits::PhotoStorage;

use super::connection::FsConnection;

/// Photo store writing image files under the `family-photos/` tree. The
/// public URL of an image is its absolute filesystem path, which keeps the
/// `/family-photos/` marker recoverable from any URL this store hands out.
#[derive(Clone)]
pub struct PhotoRepository {
    connection: FsConnection,
}

impl PhotoRepository {
    pub fn new(connection: FsConnection) -> Self {
        Self { connection }
    }

    /// Map a storage path onto the filesystem, refusing anything that would
    /// escape the photo root.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes || path.is_empty() {
            return Err(anyhow::anyhow!("Invalid photo path: {}", path));
        }
        Ok(self.connection.photos_directory().join(relative))
    }
}

impl PhotoStorage for PhotoRepository {
    fn upload_photo(&self, path: &str, bytes: &[u8]) -> Result<String> {
        let destination = self.resolve(path)?;
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = destination.with_extension("tmp");
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &destination)?;

        info!("Uploaded photo {} ({} bytes)", path, bytes.len());
        Ok(destination.to_string_lossy().into_owned())
    }

    fn delete_photo(&self, path: &str) -> Result<()> {
        let destination = self.resolve(path)?;
        if destination.exists() {
            fs::remove_file(&destination)?;
            info!("Deleted photo {}", path);
        } else {
            warn!("Attempted to delete non-existent photo: {}", path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::TestHelper;
    use super::*;
    use crate::storage::traits::photo_path_from_url;

    #[test]
    fn test_upload_and_delete() {
        let helper = TestHelper::new().unwrap();

        helper
            .photo_repo
            .upload_photo("members/member-1.jpg", &[0xFF, 0xD8])
            .unwrap();
        let on_disk = helper
            .env
            .connection
            .photos_directory()
            .join("members/member-1.jpg");
        assert!(on_disk.exists());
        assert_eq!(std::fs::read(&on_disk).unwrap(), vec![0xFF, 0xD8]);

        helper.photo_repo.delete_photo("members/member-1.jpg").unwrap();
        assert!(!on_disk.exists());
    }

    #[test]
    fn test_url_round_trips_through_the_marker() {
        let helper = TestHelper::new().unwrap();

        let url = helper
            .photo_repo
            .upload_photo("members/member-1.jpg", &[1])
            .unwrap();
        assert_eq!(photo_path_from_url(&url), Some("members/member-1.jpg"));
    }

    #[test]
    fn test_delete_missing_photo_is_not_an_error() {
        let helper = TestHelper::new().unwrap();
        helper.photo_repo.delete_photo("members/ghost.jpg").unwrap();
    }

    #[test]
    fn test_escaping_paths_are_rejected() {
        let helper = TestHelper::new().unwrap();

        assert!(helper
            .photo_repo
            .upload_photo("../outside.jpg", &[1])
            .is_err());
        assert!(helper.photo_repo.upload_photo("/etc/shadow", &[1]).is_err());
        assert!(helper.photo_repo.delete_photo("").is_err());
    }
}
