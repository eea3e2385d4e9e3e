//! Editing session service
//!
//! Owns the default and current form snapshots and applies every edit as a
//! whole-snapshot replacement: readers holding an earlier snapshot keep seeing
//! it unchanged, never a half-applied edit.

use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::dnd::{DragEnd, DragKind, DragMove, DropOutcome, LevelPreview, ReorderEngine};
use crate::domain::{sort_by_dfs, DomainData};
use crate::form::{
    set_activated, set_representation, to_domain, to_form, validate, FieldErrors,
    FormMemberField, FormOrgField, FormValues,
};

/// Service for editing one organization forest.
pub struct EditorService {
    settings: Arc<Settings>,
    defaults: Arc<FormValues>,
    current: Arc<FormValues>,
    engine: ReorderEngine,
}

impl EditorService {
    /// Start a session whose reset target is `defaults`.
    pub fn new(settings: Arc<Settings>, defaults: FormValues) -> Self {
        let defaults = Arc::new(defaults);
        let engine = ReorderEngine::new(settings.indent_width);
        Self {
            current: Arc::clone(&defaults),
            defaults,
            settings,
            engine,
        }
    }

    /// Start a session from persisted data, converted with the configured options.
    #[instrument(level = "debug", skip(settings, domain))]
    pub fn from_domain(settings: Arc<Settings>, domain: &DomainData) -> ApplicationResult<Self> {
        let form = to_form(domain, settings.form_options())?;
        Ok(Self::new(settings, form))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current values.
    pub fn values(&self) -> &FormValues {
        &self.current
    }

    /// Shared handle on the current snapshot; later edits do not affect it.
    pub fn snapshot(&self) -> Arc<FormValues> {
        Arc::clone(&self.current)
    }

    pub fn is_dirty(&self) -> bool {
        self.current != self.defaults
    }

    pub fn engine(&self) -> &ReorderEngine {
        &self.engine
    }

    fn install(&mut self, next: FormValues) {
        self.current = Arc::new(next);
    }

    /// Apply `f` to a copy of the current values; install it only on success.
    fn edit<R>(
        &mut self,
        f: impl FnOnce(&mut FormValues) -> ApplicationResult<R>,
    ) -> ApplicationResult<R> {
        let mut next = FormValues::clone(&self.current);
        let result = f(&mut next)?;
        self.install(next);
        Ok(result)
    }

    // ---------------------------------------------------------------
    // Organizations
    // ---------------------------------------------------------------

    /// Append an empty root organization; returns its new identifier.
    #[instrument(level = "debug", skip(self))]
    pub fn append_organization(&mut self) -> String {
        let identifier = Uuid::new_v4().to_string();
        let mut next = FormValues::clone(&self.current);
        next.orgs.push(FormOrgField::blank(identifier.clone()));
        self.install(next);
        identifier
    }

    /// Remove the organization at `index`. Its children move up to its parent.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_organization(&mut self, index: usize) -> ApplicationResult<FormOrgField> {
        self.edit(|next| {
            if index >= next.orgs.len() {
                return Err(ApplicationError::UnknownOrganization(index));
            }
            let removed = next.orgs.remove(index);
            for org in &mut next.orgs {
                if org.parent.as_deref() == Some(removed.identifier.as_str()) {
                    debug!("lifting {} to {:?}", org.identifier, removed.parent);
                    org.parent = removed.parent.clone();
                }
            }
            next.orgs = sort_by_dfs(std::mem::take(&mut next.orgs))?;
            Ok(removed)
        })
    }

    pub fn rename_organization(&mut self, index: usize, name: &str) -> ApplicationResult<()> {
        self.edit(|next| {
            org_mut(next, index)?.name = name.to_string();
            Ok(())
        })
    }

    // ---------------------------------------------------------------
    // Members
    // ---------------------------------------------------------------

    /// Append a blank, activated member; returns its index.
    ///
    /// The row gets its persisted id now, so repeated submissions agree on it.
    pub fn append_member(&mut self, org: usize) -> ApplicationResult<usize> {
        self.edit(|next| {
            let members = &mut org_mut(next, org)?.members;
            members.push(FormMemberField {
                id: Some(Uuid::new_v4().to_string()),
                ..FormMemberField::blank()
            });
            Ok(members.len() - 1)
        })
    }

    pub fn remove_member(&mut self, org: usize, member: usize) -> ApplicationResult<FormMemberField> {
        self.edit(|next| {
            let members = &mut org_mut(next, org)?.members;
            if member >= members.len() {
                return Err(ApplicationError::UnknownMember { org, member });
            }
            Ok(members.remove(member))
        })
    }

    pub fn set_member_name(&mut self, org: usize, member: usize, name: &str) -> ApplicationResult<()> {
        self.edit(|next| {
            member_mut(next, org, member)?.name = name.to_string();
            Ok(())
        })
    }

    /// Store the age as typed; invalid values are dropped on submit.
    pub fn set_member_age(
        &mut self,
        org: usize,
        member: usize,
        age: Option<f64>,
    ) -> ApplicationResult<()> {
        self.edit(|next| {
            member_mut(next, org, member)?.age = age;
            Ok(())
        })
    }

    /// Toggle activation; deactivating drops the representative flag.
    #[instrument(level = "debug", skip(self))]
    pub fn set_member_activated(
        &mut self,
        org: usize,
        member: usize,
        activated: bool,
    ) -> ApplicationResult<()> {
        self.edit(|next| {
            let field = org_mut(next, org)?;
            if !set_activated(field, member, activated) {
                return Err(ApplicationError::UnknownMember { org, member });
            }
            Ok(())
        })
    }

    /// Toggle the representative flag; setting it clears every sibling.
    ///
    /// Returns false when an inactive member was asked to represent.
    #[instrument(level = "debug", skip(self))]
    pub fn set_member_representation(
        &mut self,
        org: usize,
        member: usize,
        representation: bool,
    ) -> ApplicationResult<bool> {
        self.edit(|next| {
            let field = org_mut(next, org)?;
            if member >= field.members.len() {
                return Err(ApplicationError::UnknownMember { org, member });
            }
            Ok(set_representation(field, member, representation))
        })
    }

    // ---------------------------------------------------------------
    // Drag gestures
    // ---------------------------------------------------------------

    pub fn drag_start(&mut self, kind: DragKind, active_id: &str) {
        self.engine.drag_start(kind, active_id);
    }

    /// Update the drop preview; returns it for drawing the indicator.
    pub fn drag_move(&mut self, event: &DragMove) -> Option<LevelPreview> {
        let current = Arc::clone(&self.current);
        self.engine.drag_move(&current.orgs, event).cloned()
    }

    pub fn drag_cancel(&mut self) {
        self.engine.drag_cancel();
    }

    /// Finish the gesture, installing the new values on commit.
    #[instrument(level = "debug", skip(self))]
    pub fn drag_end(&mut self, end: &DragEnd) -> ApplicationResult<DropOutcome> {
        let current = Arc::clone(&self.current);
        let outcome = self.engine.drag_end(&current, end)?;
        if let DropOutcome::Committed(values) = &outcome {
            self.install(values.clone());
        }
        Ok(outcome)
    }

    // ---------------------------------------------------------------
    // Session
    // ---------------------------------------------------------------

    /// Discard all edits and any gesture in flight.
    pub fn reset(&mut self) {
        debug!("reset to defaults");
        self.engine.drag_cancel();
        self.current = Arc::clone(&self.defaults);
    }

    pub fn validate(&self) -> FieldErrors {
        validate(&self.current)
    }

    /// Validate, then convert to domain data with the configured identity policy.
    #[instrument(level = "debug", skip(self))]
    pub fn submit(&self) -> ApplicationResult<DomainData> {
        let errors = self.validate();
        if !errors.is_empty() {
            debug!("submit blocked by {} errors", errors.len());
            return Err(ApplicationError::Invalid(errors));
        }
        Ok(to_domain(&self.current, self.settings.identity))
    }
}

fn org_mut(values: &mut FormValues, index: usize) -> ApplicationResult<&mut FormOrgField> {
    values
        .orgs
        .get_mut(index)
        .ok_or(ApplicationError::UnknownOrganization(index))
}

fn member_mut(
    values: &mut FormValues,
    org: usize,
    member: usize,
) -> ApplicationResult<&mut FormMemberField> {
    org_mut(values, org)?
        .members
        .get_mut(member)
        .ok_or(ApplicationError::UnknownMember { org, member })
}
