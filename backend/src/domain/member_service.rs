//! Family member administration: create, update, delete, photo attachment.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::sync::Arc;

use shared::FamilyRole;

use crate::domain::commands::members::{
    AttachPhotoCommand, AttachPhotoResult, CreateMemberCommand, CreateMemberResult,
    DeleteMemberCommand, DeleteMemberResult, GetMemberCommand, GetMemberResult, ListMembersResult,
    UpdateMemberCommand, UpdateMemberResult,
};
use crate::domain::models::member::{
    creates_ancestry_cycle, find_role_conflict, Member, MemberValidationError,
};
use crate::storage::traits::{photo_path_from_url, Connection, MemberStorage, PhotoStorage};

/// Service for managing family member records and their photos.
#[derive(Clone)]
pub struct MemberService<C: Connection> {
    member_repository: C::MemberRepository,
    photo_repository: C::PhotoRepository,
}

impl<C: Connection> MemberService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            member_repository: connection.create_member_repository(),
            photo_repository: connection.create_photo_repository(),
        }
    }

    /// Register a new family member.
    pub fn create_member(&self, command: CreateMemberCommand) -> Result<CreateMemberResult> {
        info!("Creating member: name={}, role={}", command.name, command.role);

        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(MemberValidationError::EmptyName.into());
        }
        self.check_founder_role(command.role, None)?;

        let birth_date =
            parse_command_date(command.birth_date.as_deref()).context("Invalid birth date")?;
        // A death date only means something on a deceased member.
        let death_date = if command.is_deceased {
            parse_command_date(command.death_date.as_deref()).context("Invalid death date")?
        } else {
            None
        };

        let member = Member {
            id: Member::generate_id(),
            parent_id: command.parent_id,
            name,
            role: command.role,
            birth_date,
            death_date,
            is_deceased: command.is_deceased,
            photo_url: command.photo_url,
            description: command.description,
            social_links: command.social_links,
            created_at: Utc::now(),
        };

        self.member_repository.store_member(&member)?;
        info!("Created member: {} with ID: {}", member.name, member.id);
        Ok(CreateMemberResult { member })
    }

    /// Replace a member's editable fields, keeping id and creation time.
    pub fn update_member(&self, command: UpdateMemberCommand) -> Result<UpdateMemberResult> {
        info!("Updating member: {}", command.member_id);

        let existing = self
            .member_repository
            .get_member(&command.member_id)?
            .ok_or_else(|| anyhow::anyhow!("Member not found: {}", command.member_id))?;

        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(MemberValidationError::EmptyName.into());
        }
        self.check_founder_role(command.role, Some(&command.member_id))?;
        self.check_parent_chain(&command.member_id, command.parent_id.as_deref())?;

        let birth_date =
            parse_command_date(command.birth_date.as_deref()).context("Invalid birth date")?;
        let death_date = if command.is_deceased {
            parse_command_date(command.death_date.as_deref()).context("Invalid death date")?
        } else {
            None
        };

        let member = Member {
            id: existing.id,
            parent_id: command.parent_id,
            name,
            role: command.role,
            birth_date,
            death_date,
            is_deceased: command.is_deceased,
            photo_url: command.photo_url,
            description: command.description,
            social_links: command.social_links,
            created_at: existing.created_at,
        };

        self.member_repository.update_member(&member)?;
        info!("Updated member: {} with ID: {}", member.name, member.id);
        Ok(UpdateMemberResult { member })
    }

    pub fn get_member(&self, command: GetMemberCommand) -> Result<GetMemberResult> {
        let member = self.member_repository.get_member(&command.member_id)?;
        Ok(GetMemberResult { member })
    }

    /// All members, ordered by name.
    pub fn list_members(&self) -> Result<ListMembersResult> {
        let members = self.member_repository.list_members()?;
        Ok(ListMembersResult { members })
    }

    /// Delete a member record and, best effort, its photo.
    pub fn delete_member(&self, command: DeleteMemberCommand) -> Result<DeleteMemberResult> {
        info!("Deleting member: {}", command.member_id);

        let member = self
            .member_repository
            .get_member(&command.member_id)?
            .ok_or_else(|| anyhow::anyhow!("Member not found: {}", command.member_id))?;

        // The record goes away even when the photo cleanup fails.
        if let Some(url) = &member.photo_url {
            match photo_path_from_url(url) {
                Some(path) => {
                    if let Err(e) = self.photo_repository.delete_photo(path) {
                        warn!("Failed to delete photo for member {}: {}", member.id, e);
                    }
                }
                None => warn!(
                    "Member {} has a photo URL outside the photo store: {}",
                    member.id, url
                ),
            }
        }

        self.member_repository.delete_member(&command.member_id)?;
        info!("Deleted member: {} with ID: {}", member.name, member.id);
        Ok(DeleteMemberResult {
            success_message: format!("Member '{}' deleted", member.name),
        })
    }

    /// Upload a photo and point the member's record at it.
    ///
    /// Old-photo deletion, upload and record update are separate storage
    /// requests; a crash in between can orphan an image but never the
    /// member record.
    pub fn attach_photo(&self, command: AttachPhotoCommand) -> Result<AttachPhotoResult> {
        info!(
            "Attaching photo to member: {} ({} bytes)",
            command.member_id,
            command.image.len()
        );

        let mut member = self
            .member_repository
            .get_member(&command.member_id)?
            .ok_or_else(|| anyhow::anyhow!("Member not found: {}", command.member_id))?;

        if let Some(url) = &member.photo_url {
            if let Some(path) = photo_path_from_url(url) {
                if let Err(e) = self.photo_repository.delete_photo(path) {
                    warn!(
                        "Failed to delete previous photo for member {}: {}",
                        member.id, e
                    );
                }
            }
        }

        let path = format!(
            "members/member-{}-{}.jpg",
            Utc::now().timestamp_millis(),
            uuid::Uuid::new_v4().simple()
        );
        let photo_url = self.photo_repository.upload_photo(&path, &command.image)?;

        member.photo_url = Some(photo_url);
        self.member_repository.update_member(&member)?;
        info!("Attached photo to member: {}", member.id);
        Ok(AttachPhotoResult { member })
    }

    /// Reject a founder role that some other member already holds.
    fn check_founder_role(&self, role: FamilyRole, exclude_id: Option<&str>) -> Result<()> {
        if !role.is_founder() {
            return Ok(());
        }
        // Check against the freshest list the store can give us.
        let members = self.member_repository.list_members()?;
        if let Some(holder) = find_role_conflict(&members, role, exclude_id) {
            warn!("Founder role {} already held by {}", role, holder.name);
            return Err(MemberValidationError::RoleTaken {
                role,
                holder: holder.name.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Reject a parent assignment that would loop the member's own ancestry.
    fn check_parent_chain(&self, member_id: &str, parent_id: Option<&str>) -> Result<()> {
        if parent_id.is_none() {
            return Ok(());
        }
        let members = self.member_repository.list_members()?;
        if creates_ancestry_cycle(member_id, parent_id, &members) {
            warn!("Rejected ancestry loop for member {}", member_id);
            return Err(MemberValidationError::AncestryCycle.into());
        }
        Ok(())
    }
}

fn parse_command_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Ok(Some(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)),
    }
}
