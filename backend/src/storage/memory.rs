//! In-memory storage backend.
//!
//! Implements all three repository traits on one type; `create_*_repository`
//! hands out clones sharing the same maps. Used by tests and by embedders
//! that want the services without a data directory.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::models::guest::Guest;
use crate::domain::models::member::Member;
use crate::storage::traits::{Connection, GuestStorage, MemberStorage, PhotoStorage};

#[derive(Clone, Default)]
pub struct MemoryConnection {
    state: Arc<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    members: Mutex<HashMap<String, Member>>,
    guests: Mutex<Vec<Guest>>,
    photos: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored photo bytes for `path`, if any.
    pub fn photo_bytes(&self, path: &str) -> Option<Vec<u8>> {
        self.state.photos.lock().unwrap().get(path).cloned()
    }
}

impl MemberStorage for MemoryConnection {
    fn store_member(&self, member: &Member) -> Result<()> {
        self.state
            .members
            .lock()
            .unwrap()
            .insert(member.id.clone(), member.clone());
        Ok(())
    }

    fn get_member(&self, member_id: &str) -> Result<Option<Member>> {
        Ok(self.state.members.lock().unwrap().get(member_id).cloned())
    }

    fn list_members(&self) -> Result<Vec<Member>> {
        let mut members: Vec<Member> = self
            .state
            .members
            .lock()
            .unwrap()
            .values()
            .cloned()
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(members)
    }

    fn update_member(&self, member: &Member) -> Result<()> {
        let mut members = self.state.members.lock().unwrap();
        if !members.contains_key(&member.id) {
            return Err(anyhow::anyhow!("Member not found for update: {}", member.id));
        }
        members.insert(member.id.clone(), member.clone());
        Ok(())
    }

    fn delete_member(&self, member_id: &str) -> Result<()> {
        self.state.members.lock().unwrap().remove(member_id);
        Ok(())
    }
}

impl GuestStorage for MemoryConnection {
    fn store_guest(&self, guest: &Guest) -> Result<()> {
        self.state.guests.lock().unwrap().push(guest.clone());
        Ok(())
    }

    fn list_guests(&self) -> Result<Vec<Guest>> {
        let mut guests = self.state.guests.lock().unwrap().clone();
        guests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(guests)
    }
}

impl PhotoStorage for MemoryConnection {
    fn upload_photo(&self, path: &str, bytes: &[u8]) -> Result<String> {
        self.state
            .photos
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());
        Ok(format!("memory://family-photos/{}", path))
    }

    fn delete_photo(&self, path: &str) -> Result<()> {
        self.state.photos.lock().unwrap().remove(path);
        Ok(())
    }
}

impl Connection for MemoryConnection {
    type MemberRepository = MemoryConnection;
    type GuestRepository = MemoryConnection;
    type PhotoRepository = MemoryConnection;

    fn create_member_repository(&self) -> MemoryConnection {
        self.clone()
    }

    fn create_guest_repository(&self) -> MemoryConnection {
        self.clone()
    }

    fn create_photo_repository(&self) -> MemoryConnection {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::member::test_member;
    use crate::storage::traits::photo_path_from_url;
    use chrono::{Duration, Utc};
    use shared::FamilyRole;

    #[test]
    fn test_member_store_shares_state_across_clones() {
        let connection = MemoryConnection::new();
        let repo = connection.create_member_repository();

        repo.store_member(&test_member("m1", "Ana", FamilyRole::Descendant, None))
            .unwrap();
        assert!(connection.get_member("m1").unwrap().is_some());
    }

    #[test]
    fn test_list_members_is_name_ordered() {
        let connection = MemoryConnection::new();
        for (id, name) in [("m1", "Zeca"), ("m2", "Ana")] {
            connection
                .store_member(&test_member(id, name, FamilyRole::Descendant, None))
                .unwrap();
        }

        let names: Vec<String> = connection
            .list_members()
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Zeca"]);
    }

    #[test]
    fn test_update_requires_existing_member() {
        let connection = MemoryConnection::new();
        let member = test_member("m1", "Ana", FamilyRole::Descendant, None);
        assert!(connection.update_member(&member).is_err());

        connection.store_member(&member).unwrap();
        assert!(connection.update_member(&member).is_ok());
    }

    #[test]
    fn test_guests_list_newest_first() {
        let connection = MemoryConnection::new();
        let now = Utc::now();
        for (id, minutes_ago) in [("g1", 10), ("g2", 5)] {
            let guest = Guest {
                id: id.to_string(),
                created_at: now - Duration::minutes(minutes_ago),
                full_name: id.to_string(),
                age: None,
                attending: true,
                companion_count: 0,
                companion_names: None,
                message: None,
            };
            connection.store_guest(&guest).unwrap();
        }

        let ids: Vec<String> = connection
            .list_guests()
            .unwrap()
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec!["g2", "g1"]);
    }

    #[test]
    fn test_photo_urls_carry_the_marker() {
        let connection = MemoryConnection::new();
        let url = connection.upload_photo("members/m-1.jpg", &[1, 2]).unwrap();

        assert_eq!(photo_path_from_url(&url), Some("members/m-1.jpg"));
        assert_eq!(connection.photo_bytes("members/m-1.jpg"), Some(vec![1, 2]));

        connection.delete_photo("members/m-1.jpg").unwrap();
        assert_eq!(connection.photo_bytes("members/m-1.jpg"), None);
    }
}
