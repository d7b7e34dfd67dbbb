//! Read-only views derived from the member table: the positioned genealogy
//! graph, the timeline, and headline stats.

use anyhow::Result;
use log::debug;
use std::sync::Arc;

use shared::{FamilyGraph, LineageStats, TimelineEntry};

use crate::domain::{layout, lineage, timeline};
use crate::storage::traits::{Connection, MemberStorage};

/// Service producing the derived family views. Every call re-derives from a
/// fresh member snapshot; nothing hierarchical is cached or persisted.
#[derive(Clone)]
pub struct LineageService<C: Connection> {
    member_repository: C::MemberRepository,
}

impl<C: Connection> LineageService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            member_repository: connection.create_member_repository(),
        }
    }

    /// The derived and positioned genealogy graph.
    pub fn family_graph(&self) -> Result<FamilyGraph> {
        let members = self.member_repository.list_members()?;
        let mut graph = lineage::derive_graph(&members);
        layout::position_graph(&mut graph);
        debug!(
            "Derived family graph: {} nodes, {} edges",
            graph.nodes.len(),
            graph.edges.len()
        );
        Ok(graph)
    }

    /// Timeline entries, oldest first, anchored on the current date.
    pub fn timeline(&self) -> Result<Vec<TimelineEntry>> {
        let members = self.member_repository.list_members()?;
        Ok(timeline::project_today(&members))
    }

    /// Timeline entries whose member name matches `query`.
    pub fn search_timeline(&self, query: &str) -> Result<Vec<TimelineEntry>> {
        let entries = self.timeline()?;
        Ok(timeline::filter_by_name(&entries, query))
    }

    /// Headline stats for the timeline page.
    pub fn stats(&self) -> Result<LineageStats> {
        let members = self.member_repository.list_members()?;
        Ok(timeline::stats(&members))
    }
}
