//! Drag gesture state machine and drop commits.
//!
//! ```text
//! Idle --drag_start--> Dragging --drag_end--> (commit | reject | ignore) --> Idle
//!                         |  ^
//!                drag_move|  |preview updated
//!                         +--+
//!                      drag_cancel --> Idle
//! ```
//!
//! A commit never edits the list in place: it returns a complete replacement
//! for the caller to install.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::dnd::level::{array_move, calc_level, DragMove, LevelPreview};
use crate::domain::ancestry::is_ancestor_id;
use crate::domain::{is_ancestor, node_map, sort_by_dfs, TreeResult};
use crate::form::{FormOrgField, FormValues};

/// What is being dragged, or what the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    Organization,
    Member,
}

impl fmt::Display for DragKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Organization => write!(f, "organization"),
            Self::Member => write!(f, "member"),
        }
    }
}

/// Drop payload.
///
/// For organizations the indices address the organization list. For members
/// they address the member lists of the organizations named by the container
/// ids. `over_kind` is `None` when the pointer was released outside any target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEnd {
    pub active_kind: DragKind,
    pub over_kind: Option<DragKind>,
    pub active_index: usize,
    pub over_index: usize,
    #[serde(default)]
    pub active_container_id: Option<String>,
    #[serde(default)]
    pub over_container_id: Option<String>,
}

impl DragEnd {
    pub fn organization(active_index: usize, over_index: usize) -> Self {
        Self {
            active_kind: DragKind::Organization,
            over_kind: Some(DragKind::Organization),
            active_index,
            over_index,
            active_container_id: None,
            over_container_id: None,
        }
    }

    pub fn member(
        active_container: &str,
        active_index: usize,
        over_container: &str,
        over_index: usize,
    ) -> Self {
        Self {
            active_kind: DragKind::Member,
            over_kind: Some(DragKind::Member),
            active_index,
            over_index,
            active_container_id: Some(active_container.to_string()),
            over_container_id: Some(over_container.to_string()),
        }
    }
}

/// A move that would make an organization its own ancestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMove {
    OntoDescendant { active: String, over: String },
    ParentIsDescendant { active: String, parent: String },
}

impl fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OntoDescendant { active, over } => {
                write!(f, "cannot drop {active} onto its descendant {over}")
            }
            Self::ParentIsDescendant { active, parent } => {
                write!(f, "cannot make {parent} the parent of its ancestor {active}")
            }
        }
    }
}

/// Result of a drop.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Replacement form values to install
    Committed(FormValues),
    /// The move was illegal; nothing changes
    Rejected(InvalidMove),
    /// Not a recognized drop; nothing changes
    Ignored,
}

/// Preview together with the drop target it was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPreview {
    pub over_id: String,
    pub preview: LevelPreview,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        kind: DragKind,
        active_id: String,
        preview: Option<PendingPreview>,
    },
}

/// Gesture state machine for one drag at a time.
#[derive(Debug, Clone)]
pub struct ReorderEngine {
    indent_width: f64,
    state: DragState,
}

impl ReorderEngine {
    /// `indent_width` is the horizontal distance, in pixels, of one indent level.
    pub fn new(indent_width: f64) -> Self {
        Self {
            indent_width,
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Current drop-indicator preview, if any.
    pub fn preview(&self) -> Option<&LevelPreview> {
        match &self.state {
            DragState::Dragging {
                preview: Some(pending),
                ..
            } => Some(&pending.preview),
            _ => None,
        }
    }

    /// Begin a gesture. A gesture already in flight is discarded.
    #[instrument(level = "debug", skip(self))]
    pub fn drag_start(&mut self, kind: DragKind, active_id: &str) {
        if self.is_dragging() {
            warn!("drag_start while dragging, previous gesture discarded");
        }
        self.state = DragState::Dragging {
            kind,
            active_id: active_id.to_string(),
            preview: None,
        };
    }

    /// Recompute the preview for a pointer move. Member drags have no level.
    pub fn drag_move(&mut self, orgs: &[FormOrgField], event: &DragMove) -> Option<&LevelPreview> {
        let indent_width = self.indent_width;
        if let DragState::Dragging {
            kind: DragKind::Organization,
            active_id,
            preview,
        } = &mut self.state
        {
            if *active_id != event.active_id {
                debug!(
                    "drag_move for {} ignored, dragging {}",
                    event.active_id, active_id
                );
                return None;
            }
            *preview = calc_level(
                orgs,
                &event.active_id,
                &event.over_id,
                event.delta_x,
                indent_width,
            )
            .map(|preview| PendingPreview {
                over_id: event.over_id.clone(),
                preview,
            });
        }
        self.preview()
    }

    /// Abandon the gesture without any effect.
    pub fn drag_cancel(&mut self) {
        debug!("drag cancelled");
        self.state = DragState::Idle;
    }

    /// Finish the gesture. The engine is idle afterwards whatever the outcome.
    ///
    /// An organization is always spliced directly after the drop target, then
    /// the list is put back into depth-first order. Dragging upwards therefore
    /// lands after `over` although the preview was computed for the slot
    /// before it, and nothing can be dropped into the first position.
    ///
    /// The preview only applies when it was computed for the same dragged
    /// organization and the same target. A drop whose canonical result equals
    /// the current list is reported as `Ignored`.
    ///
    /// Structural errors in `form` (dangling or cyclic parents) propagate.
    #[instrument(level = "debug", skip(self, form))]
    pub fn drag_end(&mut self, form: &FormValues, end: &DragEnd) -> TreeResult<DropOutcome> {
        let state = std::mem::take(&mut self.state);
        let DragState::Dragging {
            kind,
            active_id,
            preview,
        } = state
        else {
            debug!("drag_end without drag_start");
            return Ok(DropOutcome::Ignored);
        };
        if kind != end.active_kind {
            warn!("drag started as {} but dropped as {}", kind, end.active_kind);
        }

        let outcome = match (end.active_kind, end.over_kind) {
            (DragKind::Member, Some(DragKind::Member)) => commit_member(form, end),
            (DragKind::Organization, Some(DragKind::Organization)) => {
                commit_organization(form, end, &active_id, preview)?
            }
            _ => DropOutcome::Ignored,
        };
        debug!("drag_end outcome: {}", outcome_label(&outcome));
        Ok(outcome)
    }
}

fn outcome_label(outcome: &DropOutcome) -> String {
    match outcome {
        DropOutcome::Committed(_) => "committed".to_string(),
        DropOutcome::Rejected(reason) => format!("rejected ({reason})"),
        DropOutcome::Ignored => "ignored".to_string(),
    }
}

/// Reorder or move a member between organizations.
fn commit_member(form: &FormValues, end: &DragEnd) -> DropOutcome {
    let (Some(from), Some(to)) = (
        end.active_container_id.as_deref(),
        end.over_container_id.as_deref(),
    ) else {
        return DropOutcome::Ignored;
    };
    let (Some(from_idx), Some(to_idx)) = (form.position(from), form.position(to)) else {
        return DropOutcome::Ignored;
    };

    let mut next = form.clone();
    if from_idx == to_idx {
        let members = &mut next.orgs[from_idx].members;
        if end.active_index == end.over_index
            || end.active_index >= members.len()
            || end.over_index >= members.len()
        {
            return DropOutcome::Ignored;
        }
        array_move(members, end.active_index, end.over_index);
        return DropOutcome::Committed(next);
    }

    if end.active_index >= next.orgs[from_idx].members.len() {
        return DropOutcome::Ignored;
    }
    let mut member = next.orgs[from_idx].members.remove(end.active_index);
    // The flag described the source organization.
    member.representation = false;
    let target = &mut next.orgs[to_idx].members;
    let at = end.over_index.min(target.len());
    debug!("member {:?} moved from {} to {}[{}]", member.name, from, to, at);
    target.insert(at, member);
    DropOutcome::Committed(next)
}

/// Move an organization and its whole subtree after the drop target.
fn commit_organization(
    form: &FormValues,
    end: &DragEnd,
    active_id: &str,
    pending: Option<PendingPreview>,
) -> TreeResult<DropOutcome> {
    let orgs = &form.orgs;
    let (Some(active), Some(over)) = (orgs.get(end.active_index), orgs.get(end.over_index)) else {
        return Ok(DropOutcome::Ignored);
    };
    if active.identifier == over.identifier {
        return Ok(DropOutcome::Ignored);
    }

    // Ancestry is judged on the pre-move order.
    let map = node_map(orgs);
    if is_ancestor(&map, active, over) {
        return Ok(DropOutcome::Rejected(InvalidMove::OntoDescendant {
            active: active.identifier.clone(),
            over: over.identifier.clone(),
        }));
    }

    if active.identifier != active_id {
        warn!(
            "dropped {} but gesture dragged {}, preview discarded",
            active.identifier, active_id
        );
    }
    let preview = pending
        .filter(|p| active.identifier == active_id && p.over_id == over.identifier)
        .map(|p| p.preview);
    if let Some(parent) = preview.as_ref().and_then(|p| p.parent.as_deref()) {
        if is_ancestor_id(&map, &active.identifier, Some(parent)) {
            return Ok(DropOutcome::Rejected(InvalidMove::ParentIsDescendant {
                active: active.identifier.clone(),
                parent: parent.to_string(),
            }));
        }
    }

    let descendants = orgs[end.active_index + 1..]
        .iter()
        .take_while(|o| is_ancestor(&map, active, *o))
        .count();
    let over_id = over.identifier.clone();
    debug!(
        "moving {} with {} descendants after {}",
        active.identifier, descendants, over_id
    );

    let mut next: Vec<FormOrgField> = orgs.clone();
    let mut slice: Vec<FormOrgField> = next
        .drain(end.active_index..=end.active_index + descendants)
        .collect();
    if let Some(preview) = preview {
        slice[0].parent = preview.parent;
    }

    let Some(over_pos) = next.iter().position(|o| o.identifier == over_id) else {
        return Ok(DropOutcome::Ignored);
    };
    next.splice(over_pos + 1..over_pos + 1, slice);

    let orgs = sort_by_dfs(next)?;
    if orgs == form.orgs {
        debug!("drop leaves order and parents unchanged");
        return Ok(DropOutcome::Ignored);
    }
    Ok(DropOutcome::Committed(FormValues { orgs }))
}
