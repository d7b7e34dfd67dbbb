//! # Domain Module
//!
//! Business logic for the family site, independent of any storage backend
//! or front end.
//!
//! ## Architecture
//!
//! Services own the rules and talk to storage through the traits in
//! `crate::storage::traits`:
//!
//! - **`MemberService`**: member administration (create, update, delete,
//!   photo attachment) and the founder-role guard.
//! - **`GuestService`**: RSVP intake and the dashboard numbers.
//! - **`LineageService`**: derived read models over the member table.
//!
//! The derivations themselves (`lineage`, `layout`, `timeline`) are pure
//! functions over member snapshots and never touch storage directly.
//!
//! All operations accept and return the command/result structs in
//! [`commands`].

pub mod commands;
pub mod guest_service;
pub mod layout;
pub mod lineage;
pub mod lineage_service;
pub mod member_service;
pub mod models;
pub mod timeline;

pub use guest_service::GuestService;
pub use lineage_service::LineageService;
pub use member_service::MemberService;
