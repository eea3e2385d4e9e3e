//! Submission-time validation producing field-addressed errors.
//!
//! Validation is advisory: it never blocks edits, it only annotates the
//! submission error state.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::form::model::{member_name_path, org_name_path, FormValues};

pub const DUPLICATE_MESSAGE: &str = "this name is already used";
pub const REQUIRED_MESSAGE: &str = "this field is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldErrorKind {
    Duplicate,
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn duplicate() -> Self {
        Self {
            kind: FieldErrorKind::Duplicate,
            message: DUPLICATE_MESSAGE.to_string(),
        }
    }

    pub fn required() -> Self {
        Self {
            kind: FieldErrorKind::Required,
            message: REQUIRED_MESSAGE.to_string(),
        }
    }
}

/// Field path → error. Empty means valid.
pub type FieldErrors = BTreeMap<String, FieldError>;

/// Report every repeated organization name and every repeated member name.
///
/// The first occurrence of a name is never reported. Member names are
/// compared across the whole form, not per organization.
#[instrument(level = "debug", skip(form))]
pub fn validate_unique(form: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let mut org_names = HashSet::new();
    for (i, org) in form.orgs.iter().enumerate() {
        if !org_names.insert(org.name.as_str()) {
            errors.insert(org_name_path(i), FieldError::duplicate());
        }
    }

    let mut member_names = HashSet::new();
    for (i, org) in form.orgs.iter().enumerate() {
        for (j, member) in org.members.iter().enumerate() {
            if !member_names.insert(member.name.as_str()) {
                errors.insert(member_name_path(i, j), FieldError::duplicate());
            }
        }
    }

    debug!("validate_unique: {} errors", errors.len());
    errors
}

/// Report organization and member names that are empty or whitespace.
pub fn validate_required(form: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (i, org) in form.orgs.iter().enumerate() {
        if org.name.trim().is_empty() {
            errors.insert(org_name_path(i), FieldError::required());
        }
        for (j, member) in org.members.iter().enumerate() {
            if member.name.trim().is_empty() {
                errors.insert(member_name_path(i, j), FieldError::required());
            }
        }
    }
    errors
}

/// All validation rules; a duplicate error wins over a required error on the same path.
pub fn validate(form: &FormValues) -> FieldErrors {
    let mut errors = validate_required(form);
    errors.extend(validate_unique(form));
    errors
}
