//! # Celebra Backend
//!
//! Embeddable backend for a single-event family site: guest RSVPs for the
//! celebration, a member registry, and the derived genealogy views (tree
//! graph with layout, timeline).
//!
//! ## Architecture
//!
//! ```text
//! Front end / binary
//!        |
//!     Backend (facade)
//!        |
//!     domain services  -- MemberService, GuestService, LineageService
//!        |
//!     storage traits   -- MemberStorage, GuestStorage, PhotoStorage
//!        |
//!     backends         -- FsConnection (data directory), MemoryConnection
//! ```
//!
//! Everything is synchronous; callers that need async wrap the calls
//! themselves. The data directory holds one YAML file per member, one CSV
//! of guest responses, and the uploaded photos.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod storage;

pub use domain::{GuestService, LineageService, MemberService};
pub use storage::fs::FsConnection;

/// Facade wiring every service over one filesystem store.
pub struct Backend {
    pub member_service: MemberService<FsConnection>,
    pub guest_service: GuestService<FsConnection>,
    pub lineage_service: LineageService<FsConnection>,
}

impl Backend {
    /// Open a backend over the data directory at `data_dir`.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        Self::with_connection(FsConnection::new(data_dir)?)
    }

    /// Open a backend over the default data directory
    /// (see [`FsConnection::new_default`]).
    pub fn new_default() -> Result<Self> {
        Self::with_connection(FsConnection::new_default()?)
    }

    fn with_connection(connection: FsConnection) -> Result<Self> {
        let connection = Arc::new(connection);
        Ok(Backend {
            member_service: MemberService::new(connection.clone()),
            guest_service: GuestService::new(connection.clone()),
            lineage_service: LineageService::new(connection),
        })
    }
}
