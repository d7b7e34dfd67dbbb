use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{FamilyMember, FamilyRole, SocialLinks};

/// Domain model for a family member.
///
/// Dates are parsed and the record shape-checked on the way in from the wire
/// representation, so everything downstream (derivations, layout, timeline)
/// can rely on well-formed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    /// ID of this member's parent. May dangle after deletions; derived views
    /// treat a dangling reference like a missing one.
    pub parent_id: Option<String>,
    pub name: String,
    pub role: FamilyRole,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub is_deceased: bool,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub social_links: SocialLinks,
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Generate a fresh record id.
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Whole years lived as of `today`, when a birth date is recorded.
    ///
    /// Deceased members are measured to their death date when one is
    /// recorded; everyone else to `today`.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        let birth = self.birth_date?;
        let end = if self.is_deceased {
            self.death_date.unwrap_or(today)
        } else {
            today
        };
        Some(whole_years_between(birth, end))
    }
}

/// Whole-year difference between two dates, counting a year only once the
/// anniversary has passed.
pub fn whole_years_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let mut years = end.year() - start.year();
    if (end.month(), end.day()) < (start.month(), start.day()) {
        years -= 1;
    }
    years
}

/// Find the member already holding `role`, ignoring `exclude_id` (the record
/// being edited). Only founder roles are exclusive; for any other role this
/// returns `None`.
pub fn find_role_conflict<'a>(
    members: &'a [Member],
    role: FamilyRole,
    exclude_id: Option<&str>,
) -> Option<&'a Member> {
    if !role.is_founder() {
        return None;
    }
    members
        .iter()
        .find(|m| m.role == role && exclude_id != Some(m.id.as_str()))
}

/// Walk a proposed parent chain and report whether it loops back to the
/// member being written. Chains that lead into a pre-existing loop among
/// other members are capped at the member count and accepted; this write
/// did not create them.
pub fn creates_ancestry_cycle(
    member_id: &str,
    parent_id: Option<&str>,
    members: &[Member],
) -> bool {
    let mut current = parent_id;
    let mut hops = 0;
    while let Some(id) = current {
        if id == member_id {
            return true;
        }
        hops += 1;
        if hops > members.len() {
            return false;
        }
        current = members
            .iter()
            .find(|m| m.id == id)
            .and_then(|m| m.parent_id.as_deref());
    }
    false
}

/// Why a write command was rejected before touching storage.
#[derive(Debug, thiserror::Error)]
pub enum MemberValidationError {
    #[error("Member name cannot be empty")]
    EmptyName,
    #[error("The family already has a {role}: {holder}")]
    RoleTaken { role: FamilyRole, holder: String },
    #[error("A member cannot be made their own ancestor")]
    AncestryCycle,
}

/// Why a stored row could not be accepted as a domain member.
#[derive(Debug, thiserror::Error)]
pub enum MemberRowError {
    #[error("Member name cannot be empty")]
    EmptyName,
    #[error("Invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    #[error("Invalid created_at '{0}': expected RFC 3339")]
    InvalidCreatedAt(String),
}

impl TryFrom<FamilyMember> for Member {
    type Error = MemberRowError;

    fn try_from(row: FamilyMember) -> Result<Self, Self::Error> {
        let name = row.name.trim().to_string();
        if name.is_empty() {
            return Err(MemberRowError::EmptyName);
        }

        let birth_date = parse_wire_date("birth_date", row.birth_date)?;
        let death_date = parse_wire_date("death_date", row.death_date)?;
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|_| MemberRowError::InvalidCreatedAt(row.created_at.clone()))?
            .with_timezone(&Utc);

        Ok(Member {
            id: row.id,
            parent_id: row.parent_id,
            name,
            role: row.role,
            birth_date,
            death_date,
            is_deceased: row.is_deceased,
            photo_url: row.photo_url,
            description: row.description,
            social_links: row.social_links,
            created_at,
        })
    }
}

fn parse_wire_date(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<NaiveDate>, MemberRowError> {
    match value {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| MemberRowError::InvalidDate { field, value: s }),
    }
}

impl From<&Member> for FamilyMember {
    fn from(member: &Member) -> Self {
        FamilyMember {
            id: member.id.clone(),
            parent_id: member.parent_id.clone(),
            name: member.name.clone(),
            photo_url: member.photo_url.clone(),
            description: member.description.clone(),
            social_links: member.social_links.clone(),
            birth_date: member.birth_date.map(|d| d.format("%Y-%m-%d").to_string()),
            death_date: member.death_date.map(|d| d.format("%Y-%m-%d").to_string()),
            is_deceased: member.is_deceased,
            role: member.role,
            created_at: member.created_at.to_rfc3339(),
        }
    }
}

/// Build a member with the given identity and no dates; tests fill in the
/// rest by mutation.
#[cfg(test)]
pub fn test_member(id: &str, name: &str, role: FamilyRole, parent_id: Option<&str>) -> Member {
    Member {
        id: id.to_string(),
        parent_id: parent_id.map(String::from),
        name: name.to_string(),
        role,
        birth_date: None,
        death_date: None,
        is_deceased: false,
        photo_url: None,
        description: None,
        social_links: SocialLinks::default(),
        created_at: Utc::now(),
    }
}
