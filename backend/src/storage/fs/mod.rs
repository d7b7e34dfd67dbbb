//! # Filesystem Storage
//!
//! Human-inspectable persistence rooted at a single data directory:
//!
//! ```text
//! <data dir>/
//!   members/{id}.yaml       one YAML document per member, wire shape
//!   guest_responses.csv     every RSVP row, wire column names
//!   family-photos/          uploaded images
//! ```
//!
//! All writes go through a temp file and rename, so readers never observe a
//! half-written record.

pub mod connection;
pub mod guest_repository;
pub mod member_repository;
pub mod photo_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::FsConnection;
pub use guest_repository::GuestRepository;
pub use member_repository::MemberRepository;
pub use photo_repository::PhotoRepository;
