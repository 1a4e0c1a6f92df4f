//! Tests for filter classification and predicate rendering.

use pretty_assertions::assert_eq;
use strata::prelude::*;
use strata::semantic::filters::FilterClassifier;
use strata::semantic::resolver::DefinitionResolver;

fn definition() -> Definition {
    Definition {
        metrics: vec![Metric {
            name: "total_revenue".into(),
            sql: "SUM(sale_price)".into(),
            table: "order_items".into(),
        }],
        dimensions: vec![Dimension {
            name: "status".into(),
            sql: "status".into(),
            table: "orders".into(),
        }],
        joins: vec![],
    }
}

fn filter(field: &str, operator: &str, value: FilterValue) -> Filter {
    Filter {
        field: field.into(),
        operator: operator.into(),
        value,
    }
}

#[test]
fn dimension_filters_go_to_where() {
    let definition = definition();
    let resolver = DefinitionResolver::new(&definition);
    let classified = FilterClassifier::new(&resolver)
        .classify(&[filter("status", "=", "Complete".into())])
        .unwrap();

    assert_eq!(classified.where_predicates, vec!["status = 'Complete'"]);
    assert!(classified.having_predicates.is_empty());
}

#[test]
fn metric_filters_go_to_having_using_the_raw_expression() {
    let definition = definition();
    let resolver = DefinitionResolver::new(&definition);
    let classified = FilterClassifier::new(&resolver)
        .classify(&[filter("total_revenue", ">", 1000.into())])
        .unwrap();

    assert!(classified.where_predicates.is_empty());
    assert_eq!(
        classified.having_predicates,
        vec!["SUM(sale_price) > 1000"]
    );
}

#[test]
fn in_filter_renders_a_parenthesized_list() {
    let definition = definition();
    let resolver = DefinitionResolver::new(&definition);
    let classified = FilterClassifier::new(&resolver)
        .classify(&[filter(
            "status",
            "IN",
            FilterValue::list(["Complete", "Shipped"]),
        )])
        .unwrap();

    assert_eq!(
        classified.where_predicates,
        vec!["status IN ('Complete', 'Shipped')"]
    );
}

#[test]
fn in_filter_with_scalar_value_fails_validation() {
    let definition = definition();
    let resolver = DefinitionResolver::new(&definition);
    let err = FilterClassifier::new(&resolver)
        .classify(&[filter("status", "IN", "Complete".into())])
        .unwrap_err();

    assert!(matches!(err, CompileError::Validation(_)));
}

#[test]
fn unknown_field_fails() {
    let definition = definition();
    let resolver = DefinitionResolver::new(&definition);
    let err = FilterClassifier::new(&resolver)
        .classify(&[filter("margin", "=", 1.into())])
        .unwrap_err();

    assert_eq!(err, CompileError::UnknownField("margin".into()));
}

#[test]
fn unsupported_operator_fails() {
    let definition = definition();
    let resolver = DefinitionResolver::new(&definition);
    let err = FilterClassifier::new(&resolver)
        .classify(&[filter("status", "LIKE", "Comp%".into())])
        .unwrap_err();

    assert_eq!(err, CompileError::UnsupportedOperator("LIKE".into()));
}

#[test]
fn predicates_keep_query_order_within_a_group() {
    let definition = definition();
    let resolver = DefinitionResolver::new(&definition);
    let classified = FilterClassifier::new(&resolver)
        .classify(&[
            filter("status", "!=", "Cancelled".into()),
            filter("status", "!=", "Returned".into()),
        ])
        .unwrap();

    assert_eq!(
        classified.where_predicates,
        vec!["status != 'Cancelled'", "status != 'Returned'"]
    );
}
