//! Core types for the family graph.
//!
//! Members and links as supplied by the host membership system, with the
//! wire names of its API.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Host ids arrive as strings or integers depending on the backing store.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Stable identity of a member across calls.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl<'de> Deserialize<'de> for MemberId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| MemberId(raw.into_string()))
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        MemberId(s.to_string())
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LinkId(pub String);

impl<'de> Deserialize<'de> for LinkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| LinkId(raw.into_string()))
    }
}

/// Recorded gender of a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
    Other,
    /// Not recorded, or a value the engine does not know.
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Other => write!(f, "other"),
            Gender::Unknown => write!(f, "unknown"),
        }
    }
}

fn gender_or_unknown<'de, D>(deserializer: D) -> Result<Gender, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Gender>::deserialize(deserializer)?.unwrap_or_default())
}

/// The kind of a primitive link between two members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkKind {
    /// Directed: `from` is a parent of `to`.
    Parent,
    /// Symmetric partnership, stored with a from/to pair.
    Spouse,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkKind::Parent => write!(f, "parent"),
            LinkKind::Spouse => write!(f, "spouse"),
        }
    }
}

/// A person in the family tree.
///
/// Role and status belong to the host application and are carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "gender_or_unknown")]
    pub gender: Gender,
    /// Placeholder ancestor with no login.
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default, rename = "avatar_url")]
    pub avatar_url: Option<String>,
    #[serde(default, rename = "birth_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "family_branch")]
    pub family_branch: Option<String>,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, first_name: &str, last_name: &str) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: None,
            gender: Gender::Unknown,
            is_virtual: false,
            avatar_url: None,
            birth_date: None,
            role: None,
            status: None,
            family_branch: None,
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_branch(mut self, branch: &str) -> Self {
        self.family_branch = Some(branch.to_string());
        self
    }

    pub fn as_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    /// "First Last", or the id when both name fields are blank.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.id.to_string()
        } else {
            name.to_string()
        }
    }
}

/// A primitive edge between two members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(default)]
    pub id: Option<LinkId>,
    pub from_user_id: MemberId,
    pub to_user_id: MemberId,
    pub relation_type: LinkKind,
}

impl Link {
    pub fn new(from: impl Into<MemberId>, to: impl Into<MemberId>, kind: LinkKind) -> Self {
        Self {
            id: None,
            from_user_id: from.into(),
            to_user_id: to.into(),
            relation_type: kind,
        }
    }

    /// `parent` is a parent of `child`.
    pub fn parent(parent: impl Into<MemberId>, child: impl Into<MemberId>) -> Self {
        Self::new(parent, child, LinkKind::Parent)
    }

    pub fn spouse(a: impl Into<MemberId>, b: impl Into<MemberId>) -> Self {
        Self::new(a, b, LinkKind::Spouse)
    }
}
