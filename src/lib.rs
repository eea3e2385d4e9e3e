//! orgtree: editing core for a forest of organizations and their members.
//!
//! Organizations form a parent-pointer forest kept as a flat list in
//! depth-first pre-order. This crate provides:
//!
//! - [`domain`]: the persisted model, tree building, depth-first ordering and
//!   ancestry queries.
//! - [`form`]: the editable model, conversion to and from the persisted model,
//!   member flag invariants and submission validation.
//! - [`dnd`]: the drag gesture engine that reorders organizations, reparents
//!   them from horizontal pointer movement, and moves members.
//! - [`application`]: an editing session tying these together.
//!
//! ```
//! use orgtree::dnd::{DragEnd, DragKind, DropOutcome, ReorderEngine};
//! use orgtree::form::{FormOrgField, FormValues};
//!
//! let org = |id: &str, parent: Option<&str>| FormOrgField {
//!     parent: parent.map(str::to_string),
//!     name: id.to_string(),
//!     ..FormOrgField::blank(id)
//! };
//! let form = FormValues { orgs: vec![org("A", None), org("B", Some("A")), org("C", None)] };
//!
//! let mut engine = ReorderEngine::new(50.0);
//! engine.drag_start(DragKind::Organization, "A");
//! let DropOutcome::Committed(next) = engine.drag_end(&form, &DragEnd::organization(0, 2)).unwrap() else {
//!     panic!("expected a commit");
//! };
//! let order: Vec<_> = next.orgs.iter().map(|o| o.identifier.as_str()).collect();
//! assert_eq!(order, ["C", "A", "B"]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod dnd;
pub mod domain;
pub mod form;
pub mod tree_traits;
pub mod util;
