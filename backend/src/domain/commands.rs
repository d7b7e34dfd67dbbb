//! Command and result types for the domain services.
//!
//! Services take and return these structs rather than bare parameter lists,
//! so a front end (or the smoke binary) maps its own input shapes onto one
//! well-named type per operation.

pub mod members {
    use crate::domain::models::member::Member;
    use shared::{FamilyRole, SocialLinks};

    /// Input for registering a family member.
    #[derive(Debug, Clone)]
    pub struct CreateMemberCommand {
        pub name: String,
        pub role: FamilyRole,
        pub parent_id: Option<String>,
        /// YYYY-MM-DD; parsed at the service boundary.
        pub birth_date: Option<String>,
        /// YYYY-MM-DD; ignored unless `is_deceased` is set.
        pub death_date: Option<String>,
        pub is_deceased: bool,
        pub description: Option<String>,
        pub social_links: SocialLinks,
        /// Public URL of an already uploaded photo, if any.
        pub photo_url: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct CreateMemberResult {
        pub member: Member,
    }

    /// Full replacement of a member's editable fields. The id and creation
    /// timestamp are preserved.
    #[derive(Debug, Clone)]
    pub struct UpdateMemberCommand {
        pub member_id: String,
        pub name: String,
        pub role: FamilyRole,
        pub parent_id: Option<String>,
        pub birth_date: Option<String>,
        pub death_date: Option<String>,
        pub is_deceased: bool,
        pub description: Option<String>,
        pub social_links: SocialLinks,
        pub photo_url: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateMemberResult {
        pub member: Member,
    }

    #[derive(Debug, Clone)]
    pub struct GetMemberCommand {
        pub member_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct GetMemberResult {
        pub member: Option<Member>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteMemberCommand {
        pub member_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteMemberResult {
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct ListMembersResult {
        pub members: Vec<Member>,
    }

    /// Upload a photo and point the member's record at it, replacing any
    /// previous photo.
    #[derive(Debug, Clone)]
    pub struct AttachPhotoCommand {
        pub member_id: String,
        pub image: Vec<u8>,
    }

    #[derive(Debug, Clone)]
    pub struct AttachPhotoResult {
        pub member: Member,
    }
}

pub mod guests {
    use crate::domain::models::guest::Guest;

    /// One companion on an RSVP form.
    #[derive(Debug, Clone)]
    pub struct CompanionInput {
        pub name: String,
        pub age: Option<u32>,
    }

    /// Input for one RSVP submission, attending or declining.
    #[derive(Debug, Clone)]
    pub struct SubmitRsvpCommand {
        pub full_name: String,
        pub age: Option<u32>,
        pub attending: bool,
        /// Ignored when declining.
        pub companions: Vec<CompanionInput>,
        pub message: Option<String>,
        /// Required when declining; ignored otherwise.
        pub visit_frequency: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct SubmitRsvpResult {
        pub guest: Guest,
    }

    #[derive(Debug, Clone)]
    pub struct ListGuestsResult {
        pub guests: Vec<Guest>,
    }
}
