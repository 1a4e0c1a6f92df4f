//! Tests for join path resolution over the definition's join edges.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use strata::prelude::*;
use strata::semantic::join_graph::{JoinGraphResolver, JoinStep};

fn edge(one: &str, many: &str, on: &str) -> JoinEdge {
    JoinEdge {
        one: one.into(),
        many: many.into(),
        on: on.into(),
    }
}

fn definition(joins: Vec<JoinEdge>) -> Definition {
    Definition {
        joins,
        ..Default::default()
    }
}

fn tables<const N: usize>(names: [&str; N]) -> HashSet<String> {
    names.into_iter().map(String::from).collect()
}

#[test]
fn single_table_needs_no_joins() {
    let definition = definition(vec![edge(
        "orders",
        "order_items",
        "orders.id = order_items.order_id",
    )]);
    let resolver = JoinGraphResolver::new(&definition);

    let steps = resolver.resolve("orders", &tables(["orders"])).unwrap();
    assert!(steps.is_empty());
}

#[test]
fn connects_two_tables_through_one_edge() {
    let definition = definition(vec![edge(
        "orders",
        "order_items",
        "orders.id = order_items.order_id",
    )]);
    let resolver = JoinGraphResolver::new(&definition);

    let steps = resolver
        .resolve("order_items", &tables(["order_items", "orders"]))
        .unwrap();
    assert_eq!(
        steps,
        vec![JoinStep {
            table: "orders".into(),
            on: "orders.id = order_items.order_id".into(),
        }]
    );
}

#[test]
fn walks_a_chain_in_discovery_order() {
    let definition = definition(vec![
        edge("orders", "order_items", "orders.id = order_items.order_id"),
        edge("users", "orders", "users.id = orders.user_id"),
    ]);
    let resolver = JoinGraphResolver::new(&definition);

    let steps = resolver
        .resolve("order_items", &tables(["order_items", "users"]))
        .unwrap();
    assert_eq!(
        steps,
        vec![
            JoinStep {
                table: "orders".into(),
                on: "orders.id = order_items.order_id".into(),
            },
            JoinStep {
                table: "users".into(),
                on: "users.id = orders.user_id".into(),
            },
        ]
    );
}

#[test]
fn edges_not_on_a_path_to_a_required_table_are_omitted() {
    let definition = definition(vec![
        edge("orders", "order_items", "orders.id = order_items.order_id"),
        edge("users", "orders", "users.id = orders.user_id"),
        edge(
            "distribution_centers",
            "order_items",
            "distribution_centers.id = order_items.dc_id",
        ),
    ]);
    let resolver = JoinGraphResolver::new(&definition);

    let steps = resolver
        .resolve("order_items", &tables(["order_items", "users"]))
        .unwrap();
    let joined: Vec<&str> = steps.iter().map(|s| s.table.as_str()).collect();
    assert_eq!(joined, vec!["orders", "users"]);
}

#[test]
fn join_order_is_independent_of_edge_declaration_order() {
    let forward = definition(vec![
        edge("orders", "order_items", "orders.id = order_items.order_id"),
        edge("users", "orders", "users.id = orders.user_id"),
        edge(
            "distribution_centers",
            "order_items",
            "distribution_centers.id = order_items.dc_id",
        ),
    ]);
    let mut reversed = forward.clone();
    reversed.joins.reverse();

    let required = tables(["order_items", "orders", "users", "distribution_centers"]);
    let a = JoinGraphResolver::new(&forward)
        .resolve("order_items", &required)
        .unwrap();
    let b = JoinGraphResolver::new(&reversed)
        .resolve("order_items", &required)
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn sibling_branches_join_in_table_name_order() {
    let definition = definition(vec![
        edge("users", "orders", "users.id = orders.user_id"),
        edge("addresses", "orders", "addresses.id = orders.address_id"),
    ]);
    let resolver = JoinGraphResolver::new(&definition);

    let steps = resolver
        .resolve("orders", &tables(["orders", "users", "addresses"]))
        .unwrap();
    let joined: Vec<&str> = steps.iter().map(|s| s.table.as_str()).collect();
    assert_eq!(joined, vec!["addresses", "users"]);
}

#[test]
fn disconnected_tables_fail_with_the_unreachable_set() {
    let definition = definition(vec![edge(
        "orders",
        "order_items",
        "orders.id = order_items.order_id",
    )]);
    let resolver = JoinGraphResolver::new(&definition);

    let err = resolver
        .resolve("orders", &tables(["orders", "events", "sessions"]))
        .unwrap_err();
    assert_eq!(
        err,
        CompileError::JoinResolution {
            anchor: "orders".into(),
            unreachable: vec!["events".into(), "sessions".into()],
        }
    );
}

#[test]
fn anchor_absent_from_the_graph_fails() {
    let definition = definition(vec![edge(
        "users",
        "orders",
        "users.id = orders.user_id",
    )]);
    let resolver = JoinGraphResolver::new(&definition);

    let err = resolver
        .resolve("events", &tables(["events", "orders"]))
        .unwrap_err();
    assert!(matches!(err, CompileError::JoinResolution { .. }));
}
