//! Domain entities: the persisted shape of organizations and members

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind tag carried by every organization record.
///
/// Only one kind exists today; the tag is kept so documents round-trip unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgKind {
    #[default]
    Organization,
}

/// An organization in the persisted forest.
///
/// Membership is expressed by id only; member data lives in [`DomainData::members`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: OrgKind,
    /// Parent organization id, `None` for roots
    pub parent: Option<String>,
    /// Id of the representative member, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representation: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

/// Activation state of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Activated,
    Inactivated,
}

impl MemberStatus {
    pub fn from_activated(activated: bool) -> Self {
        if activated {
            Self::Activated
        } else {
            Self::Inactivated
        }
    }

    pub fn is_activated(self) -> bool {
        self == Self::Activated
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activated => write!(f, "activated"),
            Self::Inactivated => write!(f, "inactivated"),
        }
    }
}

/// A member record, referenced by id from organization membership lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub status: MemberStatus,
}

/// Complete persisted document: the organization forest plus the member table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainData {
    pub orgs: Vec<Organization>,
    pub members: Vec<Member>,
}

impl DomainData {
    pub fn find_member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn find_org(&self, id: &str) -> Option<&Organization> {
        self.orgs.iter().find(|o| o.id == id)
    }
}
