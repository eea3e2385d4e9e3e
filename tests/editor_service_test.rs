//! Tests for EditorService: snapshot edits, member flags, drags and submission

use std::sync::Arc;

use rstest::{fixture, rstest};

use orgtree::application::services::EditorService;
use orgtree::application::ApplicationError;
use orgtree::config::Settings;
use orgtree::dnd::{DragEnd, DragKind, DropOutcome};
use orgtree::domain::{DomainData, Member, MemberStatus, OrgKind, Organization};
use orgtree::form::{FieldErrorKind, IdentityPolicy};
use orgtree::util::testing;

fn organization(id: &str, parent: Option<&str>, members: &[&str]) -> Organization {
    Organization {
        id: id.to_string(),
        name: id.to_string(),
        kind: OrgKind::Organization,
        parent: parent.map(str::to_string),
        representation: None,
        members: members.iter().map(|m| m.to_string()).collect(),
    }
}

fn member(id: &str, status: MemberStatus) -> Member {
    Member {
        id: id.to_string(),
        name: id.to_string(),
        age: Some(40),
        status,
    }
}

/// hq
///   sales
///     emea
/// ops
#[fixture]
fn service() -> EditorService {
    testing::init_test_setup();
    let data = DomainData {
        orgs: vec![
            organization("hq", None, &["ann", "bob", "cid"]),
            organization("sales", Some("hq"), &["dan"]),
            organization("emea", Some("sales"), &[]),
            organization("ops", None, &[]),
        ],
        members: vec![
            member("ann", MemberStatus::Activated),
            member("bob", MemberStatus::Activated),
            member("cid", MemberStatus::Inactivated),
            member("dan", MemberStatus::Activated),
        ],
    };
    EditorService::from_domain(Arc::new(Settings::default()), &data).unwrap()
}

fn order(service: &EditorService) -> Vec<&str> {
    service
        .values()
        .orgs
        .iter()
        .map(|o| o.identifier.as_str())
        .collect()
}

// ============================================================
// Member flags
// ============================================================

#[rstest]
fn given_representative_when_setting_another_then_previous_is_cleared(mut service: EditorService) {
    // Arrange
    service.set_member_representation(0, 0, true).unwrap();

    // Act
    let applied = service.set_member_representation(0, 1, true).unwrap();

    // Assert
    assert!(applied);
    let hq = &service.values().orgs[0];
    let flags: Vec<_> = hq.members.iter().map(|m| m.representation).collect();
    assert_eq!(flags, [false, true, false]);
}

#[rstest]
fn given_inactive_member_when_setting_representation_then_refused(mut service: EditorService) {
    let applied = service.set_member_representation(0, 2, true).unwrap();

    assert!(!applied);
    assert!(service.values().orgs[0].representative().is_none());
}

#[rstest]
fn given_representative_when_deactivated_then_flag_cleared(mut service: EditorService) {
    // Arrange
    service.set_member_representation(0, 1, true).unwrap();

    // Act
    service.set_member_activated(0, 1, false).unwrap();

    // Assert
    let bob = &service.values().orgs[0].members[1];
    assert!(!bob.activated);
    assert!(!bob.representation);
}

#[rstest]
fn given_inactive_member_when_reactivated_then_can_represent(mut service: EditorService) {
    service.set_member_activated(0, 2, true).unwrap();

    let applied = service.set_member_representation(0, 2, true).unwrap();

    assert!(applied);
    assert_eq!(
        service.values().orgs[0].representative().map(|m| m.name.as_str()),
        Some("cid")
    );
}

#[rstest]
#[case(9, 0)]
#[case(0, 9)]
fn given_bad_indices_when_editing_member_then_error_and_unchanged(
    mut service: EditorService,
    #[case] org: usize,
    #[case] member: usize,
) {
    let before = service.snapshot();

    let result = service.set_member_name(org, member, "zed");

    assert!(matches!(
        result,
        Err(ApplicationError::UnknownOrganization(_)) | Err(ApplicationError::UnknownMember { .. })
    ));
    assert_eq!(service.values(), &*before);
}

#[rstest]
fn given_member_rows_when_appending_and_removing_then_indices_shift(mut service: EditorService) {
    let index = service.append_member(3).unwrap();
    service.set_member_name(3, index, "eve").unwrap();
    service.set_member_age(3, index, Some(31.0)).unwrap();

    let removed = service.remove_member(0, 0).unwrap();

    assert_eq!(index, 0);
    assert_eq!(removed.name, "ann");
    assert_eq!(service.values().orgs[0].members[0].name, "bob");
    let eve = &service.values().orgs[3].members[0];
    assert_eq!(eve.name, "eve");
    assert_eq!(eve.age, Some(31.0));
    assert!(eve.activated);
    assert!(eve.id.is_some());
}

#[rstest]
fn given_new_member_when_submitting_twice_then_persisted_id_is_stable(mut service: EditorService) {
    // Arrange
    let index = service.append_member(3).unwrap();
    service.set_member_name(3, index, "alice").unwrap();

    // Act
    let first = service.submit().unwrap();
    let second = service.submit().unwrap();

    // Assert
    let first_id = &first.find_org("ops").unwrap().members[0];
    let second_id = &second.find_org("ops").unwrap().members[0];
    assert_eq!(first_id, second_id);
    assert_eq!(first.find_member(first_id).unwrap().name, "alice");
}

// ============================================================
// Organizations
// ============================================================

#[rstest]
fn given_org_with_children_when_removed_then_children_lifted(mut service: EditorService) {
    // Act
    let removed = service.remove_organization(1).unwrap();

    // Assert
    assert_eq!(removed.identifier, "sales");
    assert_eq!(order(&service), ["hq", "emea", "ops"]);
    let emea = service.values().find("emea").unwrap();
    assert_eq!(emea.parent.as_deref(), Some("hq"));
}

#[rstest]
fn given_root_with_children_when_removed_then_children_become_roots(mut service: EditorService) {
    service.remove_organization(0).unwrap();

    assert_eq!(order(&service), ["sales", "emea", "ops"]);
    assert_eq!(service.values().find("sales").unwrap().parent, None);
}

#[rstest]
fn given_forest_when_appending_org_then_blank_root_at_end(mut service: EditorService) {
    let id = service.append_organization();

    let last = service.values().orgs.last().unwrap();
    assert_eq!(last.identifier, id);
    assert!(last.parent.is_none());
    assert!(last.name.is_empty());
    assert!(service.is_dirty());
}

// ============================================================
// Snapshots and reset
// ============================================================

#[rstest]
fn given_snapshot_when_editing_then_snapshot_is_unchanged(mut service: EditorService) {
    // Arrange
    let before = service.snapshot();

    // Act
    service.rename_organization(0, "headquarters").unwrap();

    // Assert
    assert_eq!(before.orgs[0].name, "hq");
    assert_eq!(service.values().orgs[0].name, "headquarters");
}

#[rstest]
fn given_edits_when_reset_then_defaults_restored(mut service: EditorService) {
    let defaults = service.snapshot();
    service.rename_organization(0, "headquarters").unwrap();
    service.append_organization();
    service.drag_start(DragKind::Organization, "ops");

    service.reset();

    assert_eq!(service.values(), &*defaults);
    assert!(!service.is_dirty());
    assert!(!service.engine().is_dragging());
}

// ============================================================
// Drags
// ============================================================

#[rstest]
fn given_subtree_when_dragged_after_root_then_installed(mut service: EditorService) {
    // Act: hq (with sales and emea) after ops
    service.drag_start(DragKind::Organization, "hq");
    let outcome = service
        .drag_end(&DragEnd::organization(0, 3))
        .unwrap();

    // Assert
    assert!(matches!(outcome, DropOutcome::Committed(_)));
    assert_eq!(order(&service), ["ops", "hq", "sales", "emea"]);
}

#[rstest]
fn given_drop_on_descendant_when_ending_then_values_untouched(mut service: EditorService) {
    let before = service.snapshot();

    service.drag_start(DragKind::Organization, "hq");
    let outcome = service.drag_end(&DragEnd::organization(0, 2)).unwrap();

    assert!(matches!(outcome, DropOutcome::Rejected(_)));
    assert!(Arc::ptr_eq(&before, &service.snapshot()));
}

#[rstest]
fn given_representative_when_moved_to_other_org_then_flag_dropped(mut service: EditorService) {
    service.set_member_representation(0, 0, true).unwrap();

    service.drag_start(DragKind::Member, "ann");
    service
        .drag_end(&DragEnd::member("hq", 0, "ops", 0))
        .unwrap();

    let ops = service.values().find("ops").unwrap();
    assert_eq!(ops.members[0].name, "ann");
    assert!(!ops.members[0].representation);
    assert_eq!(service.values().orgs[0].members.len(), 2);
}

// ============================================================
// Submission
// ============================================================

#[rstest]
fn given_duplicate_names_when_submitting_then_invalid_with_field_errors(mut service: EditorService) {
    // Arrange
    service.rename_organization(3, "hq").unwrap();
    service.set_member_name(1, 0, "ann").unwrap();

    // Act
    let result = service.submit();

    // Assert
    let Err(ApplicationError::Invalid(errors)) = result else {
        panic!("expected validation errors");
    };
    assert_eq!(errors["orgs.3.name"].kind, FieldErrorKind::Duplicate);
    assert_eq!(errors["orgs.1.members.0.name"].kind, FieldErrorKind::Duplicate);
    assert_eq!(errors.len(), 2);
}

#[rstest]
fn given_valid_edits_when_submitting_then_domain_reflects_them(mut service: EditorService) {
    // Arrange
    service.set_member_representation(0, 1, true).unwrap();
    let index = service.append_member(3).unwrap();
    service.set_member_name(3, index, "eve").unwrap();

    // Act
    let data = service.submit().unwrap();

    // Assert
    let hq = data.find_org("hq").unwrap();
    assert_eq!(hq.representation.as_deref(), Some("bob"));
    let ops = data.find_org("ops").unwrap();
    assert_eq!(ops.members.len(), 1);
    let eve = data.find_member(&ops.members[0]).unwrap();
    assert_eq!(eve.name, "eve");
    assert_ne!(eve.id, "eve");
    assert_eq!(data.members.len(), 5);
}

#[test]
fn given_names_policy_when_submitting_then_ids_are_names() {
    // Arrange
    let settings = Settings {
        identity: IdentityPolicy::Names,
        ..Settings::default()
    };
    let data = DomainData {
        orgs: vec![organization("o1", None, &["m1"])],
        members: vec![member("m1", MemberStatus::Activated)],
    };
    let mut service = EditorService::from_domain(Arc::new(settings), &data).unwrap();
    service.rename_organization(0, "Board").unwrap();
    service.set_member_name(0, 0, "Alice").unwrap();

    // Act
    let result = service.submit().unwrap();

    // Assert
    assert_eq!(result.orgs[0].id, "Board");
    assert_eq!(result.orgs[0].members, ["Alice"]);
    assert_eq!(result.members[0].id, "Alice");
}
