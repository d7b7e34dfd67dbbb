//! Domain models and their validation errors.

pub mod guest;
pub mod member;

pub use guest::Guest;
pub use member::Member;
