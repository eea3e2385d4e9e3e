//! Conversion between the persisted domain model and the editable form model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    sort_by_dfs, DomainData, DomainError, Member, MemberStatus, OrgKind, Organization, TreeResult,
};
use crate::form::model::{FormMemberField, FormOrgField, FormValues};

/// Options for [`to_form`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOptions {
    /// Canonicalize the organization list into depth-first pre-order
    pub sort_by_dfs: bool,
    /// Drop membership ids with no member record instead of failing
    pub ignore_missing_members: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            sort_by_dfs: true,
            ignore_missing_members: true,
        }
    }
}

/// How [`to_domain`] derives persisted identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityPolicy {
    /// Organization ids are form identifiers; member ids are carried through
    /// the session, new members get a fresh UUID.
    #[default]
    Stable,
    /// Organization and member ids are their display names. Parent links are
    /// rewritten to the parent's name so they keep resolving.
    Names,
}

/// Build editable form values from domain data.
#[instrument(level = "debug", skip(domain), fields(orgs = domain.orgs.len(), members = domain.members.len()))]
pub fn to_form(domain: &DomainData, options: FormOptions) -> TreeResult<FormValues> {
    let members: HashMap<&str, &Member> = domain
        .members
        .iter()
        .map(|m| (m.id.as_str(), m))
        .collect();

    let mut orgs = Vec::with_capacity(domain.orgs.len());
    for org in &domain.orgs {
        let mut fields = Vec::with_capacity(org.members.len());
        for member_id in &org.members {
            let Some(member) = members.get(member_id.as_str()) else {
                if options.ignore_missing_members {
                    warn!("organization {} lists unknown member {}, dropped", org.id, member_id);
                    continue;
                }
                return Err(DomainError::MissingMember {
                    organization: org.id.clone(),
                    member: member_id.clone(),
                });
            };
            fields.push(FormMemberField {
                id: Some(member.id.clone()),
                name: member.name.clone(),
                age: member.age.map(f64::from),
                activated: member.status.is_activated(),
                representation: org.representation.as_deref() == Some(member.id.as_str()),
            });
        }
        orgs.push(FormOrgField {
            identifier: org.id.clone(),
            parent: org.parent.clone(),
            name: org.name.clone(),
            members: fields,
        });
    }

    if options.sort_by_dfs {
        orgs = sort_by_dfs(orgs)?;
    }
    Ok(FormValues { orgs })
}

/// Convert form values back into domain data.
///
/// Emits one organization per form organization and one member record per
/// member row, in form order.
#[instrument(level = "debug", skip(form), fields(orgs = form.orgs.len()))]
pub fn to_domain(form: &FormValues, policy: IdentityPolicy) -> DomainData {
    let names: HashMap<&str, &str> = form
        .orgs
        .iter()
        .map(|o| (o.identifier.as_str(), o.name.as_str()))
        .collect();

    let mut data = DomainData::default();
    for org in &form.orgs {
        let mut member_ids = Vec::with_capacity(org.members.len());
        let mut representation = None;
        for field in &org.members {
            let id = member_id(field, policy);
            if field.representation && representation.is_none() {
                representation = Some(id.clone());
            }
            data.members.push(Member {
                id: id.clone(),
                name: field.name.clone(),
                age: coerce_age(field.age),
                status: MemberStatus::from_activated(field.activated),
            });
            member_ids.push(id);
        }

        let (id, parent) = match policy {
            IdentityPolicy::Stable => (org.identifier.clone(), org.parent.clone()),
            IdentityPolicy::Names => (
                org.name.clone(),
                org.parent
                    .as_deref()
                    .map(|p| names.get(p).copied().unwrap_or(p).to_string()),
            ),
        };
        data.orgs.push(Organization {
            id,
            name: org.name.clone(),
            kind: OrgKind::Organization,
            parent,
            representation,
            members: member_ids,
        });
    }
    debug!("to_domain: {} orgs, {} members", data.orgs.len(), data.members.len());
    data
}

fn member_id(field: &FormMemberField, policy: IdentityPolicy) -> String {
    match policy {
        IdentityPolicy::Names => field.name.clone(),
        IdentityPolicy::Stable => field
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
    }
}

/// Ages that are not finite non-negative whole numbers become absent.
fn coerce_age(age: Option<f64>) -> Option<u32> {
    age.filter(|a| a.is_finite() && *a >= 0.0 && a.fract() == 0.0 && *a <= f64::from(u32::MAX))
        .map(|a| a as u32)
}
