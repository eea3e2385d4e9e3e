//! Form model: the editable shape of the organization forest

use serde::{Deserialize, Serialize};

use crate::domain::Node;

/// Editable member record, embedded in its organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormMemberField {
    /// Persisted member id, absent for members created during the session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Age as typed; may be fractional or non-finite until submission
    pub age: Option<f64>,
    pub activated: bool,
    /// True iff this member is its organization's sole representative
    pub representation: bool,
}

impl FormMemberField {
    /// A freshly appended member row.
    pub fn blank() -> Self {
        Self {
            id: None,
            name: String::new(),
            age: None,
            activated: true,
            representation: false,
        }
    }
}

/// Editable organization record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormOrgField {
    pub identifier: String,
    pub parent: Option<String>,
    pub name: String,
    #[serde(default)]
    pub members: Vec<FormMemberField>,
}

impl FormOrgField {
    /// An empty root organization.
    pub fn blank(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            parent: None,
            name: String::new(),
            members: Vec::new(),
        }
    }

    /// The representative member, if one is flagged.
    pub fn representative(&self) -> Option<&FormMemberField> {
        self.members.iter().find(|m| m.representation)
    }
}

impl Node for FormOrgField {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// Complete form state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormValues {
    pub orgs: Vec<FormOrgField>,
}

impl FormValues {
    pub fn position(&self, identifier: &str) -> Option<usize> {
        self.orgs.iter().position(|o| o.identifier == identifier)
    }

    pub fn find(&self, identifier: &str) -> Option<&FormOrgField> {
        self.orgs.iter().find(|o| o.identifier == identifier)
    }

    pub fn find_mut(&mut self, identifier: &str) -> Option<&mut FormOrgField> {
        self.orgs.iter_mut().find(|o| o.identifier == identifier)
    }
}

/// Field path of an organization's name, e.g. `orgs.1.name`.
pub fn org_name_path(org: usize) -> String {
    format!("orgs.{org}.name")
}

/// Field path of a member's name, e.g. `orgs.0.members.2.name`.
pub fn member_name_path(org: usize, member: usize) -> String {
    format!("orgs.{org}.members.{member}.name")
}
