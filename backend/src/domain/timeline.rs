//! Chronological timeline over the member table.
//!
//! Only members with a recorded birth date appear. Entries alternate
//! between the left and right side of the center line, the way the
//! timeline page renders them.

use chrono::{Datelike, Local, NaiveDate};
use shared::{LineageStats, TimelineEntry, TimelineSide};

use crate::domain::lineage;
use crate::domain::models::member::Member;

/// Project the dated members onto the timeline, oldest first.
///
/// `today` anchors the age of living members; tests inject a fixed date.
pub fn project(members: &[Member], today: NaiveDate) -> Vec<TimelineEntry> {
    let mut dated: Vec<&Member> = members.iter().filter(|m| m.birth_date.is_some()).collect();
    dated.sort_by_key(|m| m.birth_date);

    dated
        .iter()
        .enumerate()
        .map(|(position, member)| TimelineEntry {
            member: (*member).into(),
            position: position as u32,
            side: if position % 2 == 0 {
                TimelineSide::Left
            } else {
                TimelineSide::Right
            },
            age_years: member.age_on(today).unwrap_or(0),
            parentage: lineage::parentage_of(member, members),
        })
        .collect()
}

/// Same projection anchored on the current local date.
pub fn project_today(members: &[Member]) -> Vec<TimelineEntry> {
    project(members, Local::now().date_naive())
}

/// Headline numbers for the timeline page. The member count includes
/// undated members; the earliest year obviously does not.
pub fn stats(members: &[Member]) -> LineageStats {
    LineageStats {
        member_count: members.len(),
        earliest_birth_year: members
            .iter()
            .filter_map(|m| m.birth_date)
            .map(|d| d.year())
            .min(),
    }
}

/// Case-insensitive name filter over projected entries. A blank query
/// returns everything.
pub fn filter_by_name(entries: &[TimelineEntry], query: &str) -> Vec<TimelineEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.to_vec();
    }
    entries
        .iter()
        .filter(|entry| entry.member.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
