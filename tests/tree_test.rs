//! Tests for forest building, depth-first ordering and ancestry

use rstest::rstest;

use orgtree::domain::{
    build_tree, flatten_by_dfs, is_ancestor, level_of, node_map, sort_by_dfs, DomainError,
    NodeRecord, TreeArena,
};
use orgtree::util::testing;

fn rec(id: &str, parent: Option<&str>) -> NodeRecord {
    NodeRecord::new(id, parent)
}

fn ids(items: &[NodeRecord]) -> Vec<&str> {
    items.iter().map(|n| n.identifier.as_str()).collect()
}

#[test]
fn given_missing_parent_when_building_then_dangling_parent_error() {
    // Arrange
    let items = vec![rec("1", None), rec("2", Some("3"))];

    // Act
    let result = build_tree(items);

    // Assert
    assert_eq!(
        result.unwrap_err(),
        DomainError::DanglingParent {
            identifier: "2".into(),
            parent: "3".into()
        }
    );
}

#[test]
fn given_duplicate_identifier_when_building_then_duplicate_error() {
    let items = vec![rec("1", None), rec("1", None), rec("2", None)];

    let result = build_tree(items);

    assert_eq!(
        result.unwrap_err(),
        DomainError::DuplicateIdentifier("1".into())
    );
}

#[rstest]
#[case::self_parent(vec![rec("1", Some("1"))])]
#[case::two_cycle(vec![rec("r", None), rec("a", Some("b")), rec("b", Some("a"))])]
fn given_parent_cycle_when_building_then_cycle_detected(#[case] items: Vec<NodeRecord>) {
    testing::init_test_setup();

    let result = build_tree(items);

    assert!(matches!(result, Err(DomainError::CycleDetected(_))));
}

#[test]
fn given_only_roots_when_building_then_all_roots_without_children() {
    let items = vec![rec("1", None), rec("2", None), rec("3", None)];

    let roots = build_tree(items).unwrap();

    assert_eq!(roots.len(), 3);
    assert!(roots.iter().all(|r| r.children.is_empty()));
}

#[test]
fn given_chain_when_building_then_nested_children() {
    let items = vec![rec("1", None), rec("2", Some("1")), rec("3", Some("2"))];

    let roots = build_tree(items).unwrap();

    assert_eq!(roots.len(), 1);
    let node = &roots[0];
    assert_eq!(node.identifier, "1");
    assert_eq!(node.children.len(), 1);
    let node = &node.children[0];
    assert_eq!(node.identifier, "2");
    assert_eq!(node.parent.as_deref(), Some("1"));
    assert_eq!(node.children.len(), 1);
    let node = &node.children[0];
    assert_eq!(node.identifier, "3");
    assert!(node.children.is_empty());
    assert_eq!(roots[0].size(), 3);
}

#[test]
fn given_children_listed_before_parents_when_flattening_then_preorder() {
    // Arrange
    let items = vec![rec("3", Some("2")), rec("1", None), rec("2", Some("1"))];

    // Act
    let roots = build_tree(items).unwrap();
    let flat = flatten_by_dfs(&roots);

    // Assert
    let order: Vec<_> = flat.iter().map(|n| n.identifier.as_str()).collect();
    assert_eq!(order, ["1", "2", "3"]);
}

#[test]
fn given_siblings_when_flattening_then_source_order_is_kept() {
    let items = vec![
        rec("b", Some("r")),
        rec("r", None),
        rec("a", Some("r")),
        rec("s", None),
        rec("c", Some("b")),
    ];

    let roots = build_tree(items.iter()).unwrap();
    let order: Vec<_> = flatten_by_dfs(&roots)
        .iter()
        .map(|n| n.identifier.as_str())
        .collect();

    assert_eq!(order, ["r", "b", "c", "a", "s"]);
}

#[test]
fn given_very_deep_chain_when_sorting_then_completes_in_root_first_order() {
    // Arrange: n0 <- n1 <- ... listed leaf first
    const DEPTH: usize = 200_000;
    let items: Vec<NodeRecord> = (0..DEPTH)
        .rev()
        .map(|i| {
            let parent = (i > 0).then(|| format!("n{}", i - 1));
            NodeRecord {
                identifier: format!("n{i}"),
                parent,
            }
        })
        .collect();

    // Act
    let sorted = sort_by_dfs(items).unwrap();

    // Assert
    assert_eq!(sorted.len(), DEPTH);
    assert_eq!(sorted[0].identifier, "n0");
    assert_eq!(sorted[DEPTH - 1].identifier, format!("n{}", DEPTH - 1));
}

#[test]
fn given_unordered_list_when_sorting_then_every_subtree_is_contiguous() {
    // Arrange
    let items = vec![
        rec("c1", Some("c")),
        rec("a", None),
        rec("c", Some("a")),
        rec("b", None),
        rec("a1", Some("a")),
        rec("b1", Some("b")),
        rec("c2", Some("c")),
    ];

    // Act
    let sorted = sort_by_dfs(items).unwrap();

    // Assert
    assert_eq!(ids(&sorted), ["a", "c", "c1", "c2", "a1", "b", "b1"]);
    let map = node_map(&sorted);
    for (i, node) in sorted.iter().enumerate() {
        let subtree_end = sorted[i + 1..]
            .iter()
            .take_while(|o| is_ancestor(&map, node, *o))
            .count();
        let total = sorted.iter().filter(|o| is_ancestor(&map, node, *o)).count();
        assert_eq!(subtree_end, total, "subtree of {} is split", node.identifier);
    }
}

#[test]
fn given_preorder_list_when_sorting_then_unchanged() {
    let items = vec![
        rec("a", None),
        rec("a1", Some("a")),
        rec("a2", Some("a")),
        rec("b", None),
    ];

    let sorted = sort_by_dfs(items.clone()).unwrap();

    assert_eq!(sorted, items);
}

#[test]
fn given_invalid_list_when_sorting_then_error_propagates() {
    let items = vec![rec("a", None), rec("b", Some("missing"))];

    assert!(sort_by_dfs(items).is_err());
}

#[test]
fn given_chain_when_checking_ancestry_then_only_upward_links_count() {
    // Arrange
    let items = vec![
        rec("a", None),
        rec("b", Some("a")),
        rec("c", Some("b")),
        rec("d", None),
    ];
    let map = node_map(&items);

    // Act / Assert
    assert!(is_ancestor(&map, &items[0], &items[2]));
    assert!(is_ancestor(&map, &items[1], &items[2]));
    assert!(!is_ancestor(&map, &items[2], &items[0]));
    assert!(!is_ancestor(&map, &items[0], &items[0]));
    assert!(!is_ancestor(&map, &items[3], &items[2]));
}

#[test]
fn given_looping_parents_when_checking_ancestry_then_terminates() {
    let items = vec![rec("a", Some("b")), rec("b", Some("a")), rec("x", None)];
    let map = node_map(&items);

    assert!(!is_ancestor(&map, &items[2], &items[0]));
}

#[rstest]
#[case("a", 0)]
#[case("b", 1)]
#[case("c", 2)]
#[case("orphan", 0)]
#[case("unknown", 0)]
fn given_forest_when_computing_level_then_counts_ancestors(
    #[case] id: &str,
    #[case] expected: usize,
) {
    let items = vec![
        rec("a", None),
        rec("b", Some("a")),
        rec("c", Some("b")),
        rec("orphan", Some("gone")),
    ];
    let map = node_map(&items);

    assert_eq!(level_of(&map, id), expected);
}

#[test]
fn given_arena_when_iterating_then_preorder_across_roots() {
    let items = vec![rec("a", None), rec("b", None), rec("a1", Some("a"))];

    let arena = TreeArena::from_items(items).unwrap();
    let order: Vec<_> = arena
        .iter()
        .map(|(_, node)| node.data.identifier.as_str())
        .collect();

    assert_eq!(arena.len(), 3);
    assert_eq!(arena.roots().len(), 2);
    assert_eq!(order, ["a", "a1", "b"]);
}
