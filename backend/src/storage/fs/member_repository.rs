//! YAML-file member repository.

use anyhow::Result;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use shared::FamilyMember;

use crate::domain::models::member::Member;
use crate::storage::traits::MemberStorage;

use super::connection::FsConnection;

/// Member repository keeping one YAML document per record, in the wire
/// shape, so a data directory can be inspected or fixed up by hand with any
/// YAML tool.
#[derive(Clone)]
pub struct MemberRepository {
    connection: FsConnection,
}

impl MemberRepository {
    pub fn new(connection: FsConnection) -> Self {
        Self { connection }
    }

    fn member_file_path(&self, member_id: &str) -> PathBuf {
        self.connection
            .members_directory()
            .join(format!("{}.yaml", member_id))
    }

    /// Scan the members directory, skipping records that fail to parse.
    fn discover_members(&self) -> Result<Vec<Member>> {
        let members_dir = self.connection.members_directory();
        if !members_dir.exists() {
            debug!("Members directory does not exist yet, returning empty list");
            return Ok(Vec::new());
        }

        let mut members = Vec::new();
        for entry in fs::read_dir(&members_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            match Self::load_member_file(&path) {
                Ok(member) => members.push(member),
                // One bad record must not take the whole list down.
                Err(e) => warn!("Skipping unreadable member record {:?}: {}", path, e),
            }
        }

        members.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Discovered {} member records", members.len());
        Ok(members)
    }

    fn load_member_file(path: &Path) -> Result<Member> {
        let content = fs::read_to_string(path)?;
        let row: FamilyMember = serde_yaml::from_str(&content)?;
        Ok(Member::try_from(row)?)
    }

    fn save_member(&self, member: &Member) -> Result<()> {
        let members_dir = self.connection.members_directory();
        if !members_dir.exists() {
            fs::create_dir_all(&members_dir)?;
        }

        let row = FamilyMember::from(member);
        let content = serde_yaml::to_string(&row)?;

        // Atomic write via temp file and rename.
        let yaml_path = self.member_file_path(&member.id);
        let temp_path = yaml_path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &yaml_path)?;
        Ok(())
    }
}

impl MemberStorage for MemberRepository {
    fn store_member(&self, member: &Member) -> Result<()> {
        self.save_member(member)?;
        info!("Saved member {} ({})", member.name, member.id);
        Ok(())
    }

    fn get_member(&self, member_id: &str) -> Result<Option<Member>> {
        let path = self.member_file_path(member_id);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(Self::load_member_file(&path)?))
    }

    fn list_members(&self) -> Result<Vec<Member>> {
        self.discover_members()
    }

    fn update_member(&self, member: &Member) -> Result<()> {
        if !self.member_file_path(&member.id).exists() {
            warn!("Attempted to update non-existent member: {}", member.id);
            return Err(anyhow::anyhow!("Member not found for update: {}", member.id));
        }
        self.save_member(member)?;
        info!("Updated member {} ({})", member.name, member.id);
        Ok(())
    }

    fn delete_member(&self, member_id: &str) -> Result<()> {
        let path = self.member_file_path(member_id);
        if path.exists() {
            fs::remove_file(&path)?;
            info!("Deleted member record: {}", member_id);
        } else {
            warn!("Attempted to delete non-existent member: {}", member_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::TestHelper;
    use super::*;
    use crate::domain::models::member::test_member;
    use chrono::NaiveDate;
    use shared::FamilyRole;

    #[test]
    fn test_store_and_get_member() {
        let helper = TestHelper::new().unwrap();

        let mut member = test_member("m1", "Ana Souza", FamilyRole::Descendant, Some("p1"));
        member.birth_date = NaiveDate::from_ymd_opt(1960, 7, 9);
        helper.member_repo.store_member(&member).unwrap();

        let fetched = helper.member_repo.get_member("m1").unwrap();
        assert_eq!(fetched, Some(member));

        assert_eq!(helper.member_repo.get_member("missing").unwrap(), None);
    }

    #[test]
    fn test_records_are_stored_in_wire_shape() {
        let helper = TestHelper::new().unwrap();

        let mut member = test_member("m1", "Ana Souza", FamilyRole::Matriarch, None);
        member.birth_date = NaiveDate::from_ymd_opt(1960, 7, 9);
        helper.member_repo.store_member(&member).unwrap();

        let on_disk = std::fs::read_to_string(
            helper.env.connection.members_directory().join("m1.yaml"),
        )
        .unwrap();
        assert!(on_disk.contains("id: m1"));
        assert!(on_disk.contains("role: matriarca"));
        assert!(on_disk.contains("birth_date: 1960-07-09"));
    }

    #[test]
    fn test_list_is_name_ordered_and_skips_bad_records() {
        let helper = TestHelper::new().unwrap();

        helper
            .member_repo
            .store_member(&test_member("m1", "Zeca", FamilyRole::Descendant, None))
            .unwrap();
        helper
            .member_repo
            .store_member(&test_member("m2", "Ana", FamilyRole::Descendant, None))
            .unwrap();

        // Unparseable YAML and a structurally valid row with a broken date
        // both get skipped.
        let members_dir = helper.env.connection.members_directory();
        std::fs::write(members_dir.join("broken.yaml"), ": not yaml :").unwrap();
        let mut bad_row = shared::FamilyMember::from(&test_member(
            "m3",
            "Bia",
            FamilyRole::Descendant,
            None,
        ));
        bad_row.birth_date = Some("not-a-date".to_string());
        std::fs::write(
            members_dir.join("m3.yaml"),
            serde_yaml::to_string(&bad_row).unwrap(),
        )
        .unwrap();
        // Unrelated files are ignored entirely.
        std::fs::write(members_dir.join("notes.txt"), "hello").unwrap();

        let names: Vec<String> = helper
            .member_repo
            .list_members()
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Zeca"]);
    }

    #[test]
    fn test_update_requires_existing_record() {
        let helper = TestHelper::new().unwrap();
        let member = test_member("m1", "Ana", FamilyRole::Descendant, None);

        assert!(helper.member_repo.update_member(&member).is_err());

        helper.member_repo.store_member(&member).unwrap();
        let mut renamed = member.clone();
        renamed.name = "Ana Clara".to_string();
        helper.member_repo.update_member(&renamed).unwrap();

        let fetched = helper.member_repo.get_member("m1").unwrap().unwrap();
        assert_eq!(fetched.name, "Ana Clara");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let helper = TestHelper::new().unwrap();
        let member = test_member("m1", "Ana", FamilyRole::Descendant, None);
        helper.member_repo.store_member(&member).unwrap();

        helper.member_repo.delete_member("m1").unwrap();
        assert_eq!(helper.member_repo.get_member("m1").unwrap(), None);

        // Deleting again is fine.
        helper.member_repo.delete_member("m1").unwrap();
    }

    #[test]
    fn test_list_on_fresh_directory_is_empty() {
        let helper = TestHelper::new().unwrap();
        assert!(helper.member_repo.list_members().unwrap().is_empty());
    }
}
