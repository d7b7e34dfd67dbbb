//! Connection to a filesystem data directory.

use anyhow::Result;
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::traits::Connection;

use super::guest_repository::GuestRepository;
use super::member_repository::MemberRepository;
use super::photo_repository::PhotoRepository;

/// Filesystem-backed store rooted at a data directory.
///
/// Layout under the root:
/// - `members/{id}.yaml`: one document per member record
/// - `guest_responses.csv`: every RSVP ever submitted
/// - `family-photos/`: uploaded images
#[derive(Clone)]
pub struct FsConnection {
    base_directory: PathBuf,
}

impl FsConnection {
    /// Open a store at `base_directory`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }
        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Open the store in the default location, `~/Documents/Celebra`,
    /// honoring a redirect file left behind by a relocated installation.
    pub fn new_default() -> Result<Self> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let default_data_dir = PathBuf::from(home_dir).join("Documents").join("Celebra");
        let redirect_file = default_data_dir.join(".celebra_redirect");

        let data_dir = if redirect_file.exists() {
            match fs::read_to_string(&redirect_file) {
                Ok(contents) => {
                    let redirected = PathBuf::from(contents.trim());
                    if redirected.exists() {
                        info!(
                            "Found redirect file, using data directory: {}",
                            redirected.display()
                        );
                        redirected
                    } else {
                        warn!(
                            "Redirect file points to missing directory {}, using default",
                            redirected.display()
                        );
                        default_data_dir
                    }
                }
                Err(e) => {
                    error!("Failed to read redirect file: {}, using default", e);
                    default_data_dir
                }
            }
        } else {
            default_data_dir
        };

        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Directory holding one YAML document per member.
    pub fn members_directory(&self) -> PathBuf {
        self.base_directory.join("members")
    }

    /// The single CSV file holding all guest responses.
    pub fn guests_file_path(&self) -> PathBuf {
        self.base_directory.join("guest_responses.csv")
    }

    /// Root of the uploaded-photo tree. The directory name doubles as the
    /// marker embedded in public photo URLs.
    pub fn photos_directory(&self) -> PathBuf {
        self.base_directory.join("family-photos")
    }
}

impl Connection for FsConnection {
    type MemberRepository = MemberRepository;
    type GuestRepository = GuestRepository;
    type PhotoRepository = PhotoRepository;

    fn create_member_repository(&self) -> MemberRepository {
        MemberRepository::new(self.clone())
    }

    fn create_guest_repository(&self) -> GuestRepository {
        GuestRepository::new(self.clone())
    }

    fn create_photo_repository(&self) -> PhotoRepository {
        PhotoRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("deep").join("data");

        let connection = FsConnection::new(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested.as_path());
    }

    #[test]
    fn test_paths_hang_off_the_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let connection = FsConnection::new(temp_dir.path()).unwrap();

        assert_eq!(
            connection.guests_file_path(),
            temp_dir.path().join("guest_responses.csv")
        );
        assert_eq!(
            connection.members_directory(),
            temp_dir.path().join("members")
        );
        assert_eq!(
            connection.photos_directory(),
            temp_dir.path().join("family-photos")
        );
    }
}
