//! Derivation of the genealogy graph from the flat member table.
//!
//! Members are stored as rows with an optional `parent_id`; nothing
//! hierarchical is persisted. This module turns a member snapshot into
//! nodes and edges for the tree page, inserting a synthetic union node
//! between the founder couple so their shared descendants hang from a
//! single anchor instead of from one arbitrary founder.

use std::collections::HashSet;

use shared::{FamilyGraph, FamilyRole, Parentage, TreeEdge, TreeNode, TreeNodeKind};

use crate::domain::layout::{NODE_HEIGHT, NODE_WIDTH};
use crate::domain::models::member::Member;

/// Fixed id of the synthetic node joining the founder couple. The tree page
/// styles this node specially, so the id is part of the rendered contract.
pub const UNION_NODE_ID: &str = "genearcas-union";

/// Compact node label: the first two whitespace-separated words of a name.
pub fn short_label(name: &str) -> String {
    name.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

/// Derive the unpositioned genealogy graph from a member snapshot.
///
/// A pure function of its input: one node per member, plus the union node
/// while both founder roles are occupied. Each member with a resolvable
/// parent gets exactly one incoming edge; children of either founder are
/// re-parented onto the union node. Dangling parent references produce no
/// edge, leaving that member as an extra root. Coordinates are zeroed here;
/// the layout pass assigns them.
pub fn derive_graph(members: &[Member]) -> FamilyGraph {
    let patriarch = members.iter().find(|m| m.role == FamilyRole::Patriarch);
    let matriarch = members.iter().find(|m| m.role == FamilyRole::Matriarch);
    let union_present = patriarch.is_some() && matriarch.is_some();

    let mut nodes: Vec<TreeNode> = members
        .iter()
        .map(|member| TreeNode {
            id: member.id.clone(),
            label: short_label(&member.name),
            kind: TreeNodeKind::Member(member.into()),
            x: 0.0,
            y: 0.0,
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
        })
        .collect();

    let mut edges = Vec::new();
    let mut founder_ids: HashSet<&str> = HashSet::new();
    if union_present {
        nodes.push(TreeNode {
            id: UNION_NODE_ID.to_string(),
            label: String::new(),
            kind: TreeNodeKind::Union,
            x: 0.0,
            y: 0.0,
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
        });
        if let (Some(p), Some(m)) = (patriarch, matriarch) {
            edges.push(edge(&p.id, UNION_NODE_ID));
            edges.push(edge(&m.id, UNION_NODE_ID));
            founder_ids.insert(p.id.as_str());
            founder_ids.insert(m.id.as_str());
        }
    }

    let known_ids: HashSet<&str> = members.iter().map(|m| m.id.as_str()).collect();
    for member in members {
        let Some(parent_id) = member.parent_id.as_deref() else {
            continue;
        };
        if founder_ids.contains(parent_id) {
            edges.push(edge(UNION_NODE_ID, &member.id));
        } else if known_ids.contains(parent_id) && parent_id != member.id {
            edges.push(edge(parent_id, &member.id));
        }
        // Dangling references draw nothing.
    }

    FamilyGraph { nodes, edges }
}

fn edge(source: &str, target: &str) -> TreeEdge {
    TreeEdge {
        id: format!("e-{}-{}", source, target),
        source: source.to_string(),
        target: target.to_string(),
    }
}

/// Resolve a member's literal parent reference against the same snapshot.
///
/// This is the timeline's view of ancestry: children of a founder name that
/// founder, never the union node.
pub fn parentage_of(member: &Member, members: &[Member]) -> Parentage {
    match member.parent_id.as_deref() {
        None => Parentage::Root,
        Some(parent_id) => members
            .iter()
            .find(|m| m.id == parent_id)
            .map(|parent| Parentage::Named(parent.name.clone()))
            .unwrap_or(Parentage::Unresolved),
    }
}

/// Origin column for the admin member table.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberOrigin {
    /// The member is one of the founders.
    Founder,
    /// Direct child of a founder.
    FoundingCouple,
    /// Child of an ordinary member, by name.
    Parent(String),
    /// No parent recorded, or the reference dangles.
    Unknown,
}

pub fn member_origin(member: &Member, members: &[Member]) -> MemberOrigin {
    if member.role.is_founder() {
        return MemberOrigin::Founder;
    }
    let Some(parent_id) = member.parent_id.as_deref() else {
        return MemberOrigin::Unknown;
    };
    match members.iter().find(|m| m.id == parent_id) {
        Some(parent) if parent.role.is_founder() => MemberOrigin::FoundingCouple,
        Some(parent) => MemberOrigin::Parent(parent.name.clone()),
        None => MemberOrigin::Unknown,
    }
}
