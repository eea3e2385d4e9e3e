//! Test support: one shared tracing subscriber and small form builders.

use std::sync::Once;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::form::{FormMemberField, FormOrgField, FormValues};

static TRACING: Once = Once::new();

/// Install the test subscriber once per process.
///
/// `RUST_LOG` wins; otherwise `orgtree=debug`, which shows engine and mapper decisions.
pub fn init_test_setup() {
    TRACING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("orgtree=debug"));
        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter);

        // Another harness may own the global dispatcher already.
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            eprintln!("orgtree tests: tracing subscriber already installed");
        }
    });
}

/// Organization row named after its identifier, without members.
pub fn org(identifier: &str, parent: Option<&str>) -> FormOrgField {
    FormOrgField {
        parent: parent.map(str::to_string),
        name: identifier.to_string(),
        ..FormOrgField::blank(identifier)
    }
}

/// Activated member row whose persisted id equals its name.
pub fn member(name: &str, representation: bool) -> FormMemberField {
    FormMemberField {
        id: Some(name.to_string()),
        name: name.to_string(),
        age: Some(30.0),
        activated: true,
        representation,
    }
}

pub fn form(orgs: Vec<FormOrgField>) -> FormValues {
    FormValues { orgs }
}

/// Organization identifiers in list order.
pub fn order(values: &FormValues) -> Vec<&str> {
    values.orgs.iter().map(|o| o.identifier.as_str()).collect()
}
