//! # Storage Module
//!
//! Persistence for the family site. The traits in [`traits`] are what the
//! domain services program against; [`fs`] is the production backend over a
//! plain data directory, [`memory`] the zero-setup one.

pub mod fs;
pub mod memory;
pub mod traits;

pub use fs::FsConnection;
pub use memory::MemoryConnection;
pub use traits::{Connection, GuestStorage, MemberStorage, PhotoStorage};
