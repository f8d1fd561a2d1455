//! Relationship (edge) types

use crate::member::MemberId;
use serde::{Deserialize, Serialize};

/// Identifier of a relationship record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipId(pub String);

impl RelationshipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of family relationship
///
/// Parsing never fails: strings outside the known vocabulary are kept as
/// [`RelationshipType::Custom`] and pass through every operation unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipType {
    Parent,
    Child,
    Spouse,
    Sibling,
    Grandparent,
    Grandchild,
    Aunt,
    Uncle,
    /// Only produced as the inverse of aunt/uncle
    NephewNiece,
    /// Only produced as the inverse of nephew/niece
    AuntUncle,
    Cousin,
    Other,
    Custom(String),
}

impl RelationshipType {
    /// Parse a relationship type, case-insensitively
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "parent" => Self::Parent,
            "child" => Self::Child,
            "spouse" => Self::Spouse,
            "sibling" => Self::Sibling,
            "grandparent" => Self::Grandparent,
            "grandchild" => Self::Grandchild,
            "aunt" => Self::Aunt,
            "uncle" => Self::Uncle,
            "nephew/niece" => Self::NephewNiece,
            "aunt/uncle" => Self::AuntUncle,
            "cousin" => Self::Cousin,
            "other" => Self::Other,
            _ => Self::Custom(s.to_string()),
        }
    }

    /// Wire name of this type
    pub fn as_str(&self) -> &str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Spouse => "spouse",
            Self::Sibling => "sibling",
            Self::Grandparent => "grandparent",
            Self::Grandchild => "grandchild",
            Self::Aunt => "aunt",
            Self::Uncle => "uncle",
            Self::NephewNiece => "nephew/niece",
            Self::AuntUncle => "aunt/uncle",
            Self::Cousin => "cousin",
            Self::Other => "other",
            Self::Custom(s) => s,
        }
    }

    /// The type seen from the other end of the edge
    pub fn inverse(&self) -> Self {
        match self {
            Self::Parent => Self::Child,
            Self::Child => Self::Parent,
            Self::Grandparent => Self::Grandchild,
            Self::Grandchild => Self::Grandparent,
            Self::Aunt | Self::Uncle | Self::AuntUncle => Self::NephewNiece,
            Self::NephewNiece => Self::AuntUncle,
            Self::Spouse | Self::Sibling | Self::Cousin | Self::Other | Self::Custom(_) => {
                self.clone()
            }
        }
    }

    /// Display name: wire name with its first letter capitalized
    pub fn label(&self) -> String {
        match self {
            Self::NephewNiece => return "Nephew/Niece".to_string(),
            Self::AuntUncle => return "Aunt/Uncle".to_string(),
            _ => {}
        }
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for RelationshipType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&str> for RelationshipType {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<RelationshipType> for String {
    fn from(t: RelationshipType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A directed relationship record between two members
///
/// `(from, Parent, to)` reads "from is the parent of to". Records are
/// semantically bidirectional; see [`crate::adjacency::Adjacency`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Unique identifier
    pub id: RelationshipId,

    /// Source member
    pub from_id: MemberId,

    /// Target member
    pub to_id: MemberId,

    /// Type of relationship
    pub relationship_type: RelationshipType,

    /// Human-authored label such as "Father" or "Step-sister"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_label: Option<String>,
}

impl Relationship {
    pub fn new(
        id: impl Into<String>,
        from_id: impl Into<MemberId>,
        to_id: impl Into<MemberId>,
        relationship_type: impl Into<RelationshipType>,
    ) -> Self {
        Self {
            id: RelationshipId::new(id),
            from_id: from_id.into(),
            to_id: to_id.into(),
            relationship_type: relationship_type.into(),
            specific_label: None,
        }
    }

    /// Set the specific label of this relationship
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.specific_label = Some(label.into());
        self
    }

    /// Whether this record touches the given member
    pub fn involves(&self, id: &MemberId) -> bool {
        &self.from_id == id || &self.to_id == id
    }
}
