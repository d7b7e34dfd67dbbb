use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a member plays in the family tree.
///
/// Serialized with the exact strings the hosted table and the web client use,
/// so records written here stay readable by both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FamilyRole {
    /// Founding father of the lineage. At most one per tree.
    #[serde(rename = "patriarca")]
    Patriarch,
    /// Founding mother of the lineage. At most one per tree.
    #[serde(rename = "matriarca")]
    Matriarch,
    /// Everyone else.
    #[serde(rename = "descendente")]
    Descendant,
}

impl FamilyRole {
    /// Whether this role is one of the two founder roles.
    pub fn is_founder(&self) -> bool {
        matches!(self, FamilyRole::Patriarch | FamilyRole::Matriarch)
    }
}

impl fmt::Display for FamilyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FamilyRole::Patriarch => "patriarch",
            FamilyRole::Matriarch => "matriarch",
            FamilyRole::Descendant => "descendant",
        };
        write!(f, "{}", label)
    }
}

/// Social profile links attached to a member. All free-form; no URL shape is
/// enforced anywhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub instagram: Option<String>,
    pub whatsapp: Option<String>,
    pub facebook: Option<String>,
}

/// Wire representation of a family member record.
///
/// Field names and date formats match the persisted rows one to one. Date
/// parsing and role/consistency validation happen at the domain boundary, not
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: String,
    /// ID of this member's parent, if any. May dangle after deletions.
    pub parent_id: Option<String>,
    pub name: String,
    /// Public URL of the member's photo in the image store.
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub social_links: SocialLinks,
    /// Birth date (YYYY-MM-DD).
    pub birth_date: Option<String>,
    /// Death date (YYYY-MM-DD). Only meaningful when `is_deceased` is set.
    pub death_date: Option<String>,
    pub is_deceased: bool,
    pub role: FamilyRole,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// Wire representation of a guest RSVP row.
///
/// Column names are the hosted table's Portuguese ones; they are part of the
/// stored format and must not be translated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestResponse {
    pub id: String,
    /// Submission timestamp (RFC 3339).
    pub created_at: String,
    pub nome_completo: String,
    pub idade: Option<u32>,
    pub vai_comparecer: bool,
    pub qtd_acompanhantes: u32,
    /// Preformatted companion list, e.g. `"Ana (8 anos), Pedro"`.
    pub nomes_acompanhantes: Option<String>,
    pub mensagem_justificativa: Option<String>,
}

/// What a node in the derived genealogy graph stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNodeKind {
    /// A real family member, carrying the full record for rendering.
    Member(FamilyMember),
    /// The synthetic anchor joining the two founders. Exists only while both
    /// founder roles are occupied.
    Union,
}

/// A positioned node of the genealogy graph.
///
/// `x`/`y` are the node's center in canvas units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    /// Short display label (first two words of the name; empty for the
    /// union anchor).
    pub label: String,
    pub kind: TreeNodeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TreeNode {
    /// The member record behind this node, if it is not the union anchor.
    pub fn member(&self) -> Option<&FamilyMember> {
        match &self.kind {
            TreeNodeKind::Member(member) => Some(member),
            TreeNodeKind::Union => None,
        }
    }

    pub fn is_union(&self) -> bool {
        matches!(self.kind, TreeNodeKind::Union)
    }
}

/// A directed edge of the genealogy graph, drawn from the upper node (parent
/// side) to the lower one (child side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// The fully derived and positioned genealogy graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyGraph {
    pub nodes: Vec<TreeNode>,
    pub edges: Vec<TreeEdge>,
}

impl FamilyGraph {
    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Which side of the center line a timeline entry is rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineSide {
    Left,
    Right,
}

/// Resolution of a member's literal `parent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Parentage {
    /// No parent recorded; the member is a root of the lineage.
    Root,
    /// A parent is recorded but no member with that id exists.
    Unresolved,
    /// The parent's display name.
    Named(String),
}

/// One member on the chronological timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub member: FamilyMember,
    /// 0-based position among the dated members, in birth order.
    pub position: u32,
    /// Alternates starting from `Left` at position 0.
    pub side: TimelineSide,
    /// Whole years lived, measured to the death date for deceased members
    /// and to the current date otherwise.
    pub age_years: i32,
    /// Literal parentage; the union anchor never appears here.
    pub parentage: Parentage,
}

/// Headline numbers shown next to the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageStats {
    /// Total registered members, dated or not.
    pub member_count: usize,
    /// Year of the earliest recorded birth, if any member has one.
    pub earliest_birth_year: Option<i32>,
}

/// Aggregates over all guest responses for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestSummary {
    /// Responses that said yes.
    pub confirmed: u32,
    /// Responses that declined.
    pub declined: u32,
    /// People expected: every confirmed guest plus their companions.
    pub total_attendees: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_role_uses_portuguese_wire_strings() {
        assert_eq!(
            serde_json::to_string(&FamilyRole::Patriarch).unwrap(),
            "\"patriarca\""
        );
        assert_eq!(
            serde_json::to_string(&FamilyRole::Matriarch).unwrap(),
            "\"matriarca\""
        );
        assert_eq!(
            serde_json::to_string(&FamilyRole::Descendant).unwrap(),
            "\"descendente\""
        );

        let parsed: FamilyRole = serde_json::from_str("\"matriarca\"").unwrap();
        assert_eq!(parsed, FamilyRole::Matriarch);
    }

    #[test]
    fn family_member_round_trips_with_wire_field_names() {
        let member = FamilyMember {
            id: "abc-123".to_string(),
            parent_id: None,
            name: "Maria das Dores".to_string(),
            photo_url: None,
            description: Some("Founder".to_string()),
            social_links: SocialLinks::default(),
            birth_date: Some("1936-02-10".to_string()),
            death_date: None,
            is_deceased: false,
            role: FamilyRole::Matriarch,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["parent_id"], serde_json::Value::Null);
        assert_eq!(json["birth_date"], "1936-02-10");
        assert_eq!(json["role"], "matriarca");
        assert_eq!(json["social_links"]["instagram"], serde_json::Value::Null);

        let back: FamilyMember = serde_json::from_value(json).unwrap();
        assert_eq!(back, member);
    }

    #[test]
    fn guest_response_keeps_hosted_column_names() {
        let guest = GuestResponse {
            id: "g1".to_string(),
            created_at: "2024-05-01T12:00:00+00:00".to_string(),
            nome_completo: "João Silva".to_string(),
            idade: Some(42),
            vai_comparecer: true,
            qtd_acompanhantes: 2,
            nomes_acompanhantes: Some("Ana (8 anos), Pedro".to_string()),
            mensagem_justificativa: None,
        };

        let json = serde_json::to_value(&guest).unwrap();
        assert_eq!(json["nome_completo"], "João Silva");
        assert_eq!(json["vai_comparecer"], true);
        assert_eq!(json["qtd_acompanhantes"], 2);
        assert!(json.get("full_name").is_none());
    }

    #[test]
    fn tree_node_kind_exposes_member_payload() {
        let member = FamilyMember {
            id: "m1".to_string(),
            parent_id: None,
            name: "José Santos".to_string(),
            photo_url: None,
            description: None,
            social_links: SocialLinks::default(),
            birth_date: None,
            death_date: None,
            is_deceased: false,
            role: FamilyRole::Patriarch,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        };

        let node = TreeNode {
            id: "m1".to_string(),
            label: "José Santos".to_string(),
            kind: TreeNodeKind::Member(member.clone()),
            x: 0.0,
            y: 0.0,
            width: 150.0,
            height: 150.0,
        };
        assert_eq!(node.member(), Some(&member));
        assert!(!node.is_union());

        let anchor = TreeNode {
            id: "u".to_string(),
            label: String::new(),
            kind: TreeNodeKind::Union,
            x: 0.0,
            y: 0.0,
            width: 150.0,
            height: 150.0,
        };
        assert!(anchor.is_union());
        assert!(anchor.member().is_none());
    }
}
