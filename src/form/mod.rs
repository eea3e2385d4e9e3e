//! Form layer: editable model, invariants, mapping and validation

pub mod invariants;
pub mod mapper;
pub mod model;
pub mod validate;

pub use invariants::{set_activated, set_representation};
pub use mapper::{to_domain, to_form, FormOptions, IdentityPolicy};
pub use model::{member_name_path, org_name_path, FormMemberField, FormOrgField, FormValues};
pub use validate::{
    validate, validate_required, validate_unique, FieldError, FieldErrorKind, FieldErrors,
};
