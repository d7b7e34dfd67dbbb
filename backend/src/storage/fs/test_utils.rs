//! Shared fixtures for filesystem storage tests.
//!
//! `TestEnvironment` owns a temporary data directory that disappears with
//! it; `TestHelper` adds ready-made repositories on top.

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::FsConnection;
use super::guest_repository::GuestRepository;
use super::member_repository::MemberRepository;
use super::photo_repository::PhotoRepository;
use crate::storage::traits::Connection;

pub struct TestEnvironment {
    pub connection: FsConnection,
    pub base_path: PathBuf,
    // Keeps the temp directory alive for the test's duration.
    _temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = FsConnection::new(&base_path)?;
        Ok(Self {
            connection,
            base_path,
            _temp_dir: temp_dir,
        })
    }
}

pub struct TestHelper {
    pub env: TestEnvironment,
    pub member_repo: MemberRepository,
    pub guest_repo: GuestRepository,
    pub photo_repo: PhotoRepository,
}

impl TestHelper {
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let member_repo = env.connection.create_member_repository();
        let guest_repo = env.connection.create_guest_repository();
        let photo_repo = env.connection.create_photo_repository();
        Ok(Self {
            env,
            member_repo,
            guest_repo,
            photo_repo,
        })
    }
}
