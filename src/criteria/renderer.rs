use super::comparison_operation::ComparisonOperation;
use super::criteria_error::CriteriaError;
use super::criteria_tree::{KeyType, LeafValue, Level1, Level2, Level3};
use crate::expr::{Attribute, AttributeScope, ComparisonOp, ComparisonOperator, Literal};
use crate::resolver::NameResolver;

const LOG_TARGET: &str = "  renderer";

/// Render a criteria tree as expression text.
///
/// `resolver` maps source ids back to source names. The output uses single quotes throughout and
/// parses back into an expression that compiles to the same tree.
///
/// # Errors
///
/// Returns [`CriteriaError::Resolution`] when a source id cannot be mapped to a name and
/// [`CriteriaError::Schema`] when the tree cannot be expressed as text.
pub async fn render<R: NameResolver>(tree: &Level1, resolver: &R) -> Result<String, CriteriaError> {
    let mut text = String::new();

    match tree.children.as_slice() {
        [] => {
            log::debug!(target: LOG_TARGET, "Criteria tree has no groups, rendering empty text");
        }

        [group] => render_group(&mut text, group, resolver).await?,

        groups if groups.iter().all(|group| group.children.len() == 1) => {
            for (i, leaf) in groups.iter().flat_map(|group| &group.children).enumerate() {
                if i > 0 {
                    push_connective(&mut text, tree.operation.keyword());
                }
                text.push_str(&render_leaf(leaf, resolver).await?);
            }
        }

        groups => {
            for (i, group) in groups.iter().enumerate() {
                if i > 0 {
                    push_connective(&mut text, tree.operation.keyword());
                }
                text.push('(');
                render_group(&mut text, group, resolver).await?;
                text.push(')');
            }
        }
    }

    Ok(text)
}

fn push_connective(text: &mut String, keyword: &str) {
    text.push(' ');
    text.push_str(keyword);
    text.push(' ');
}

async fn render_group<R: NameResolver>(text: &mut String, group: &Level2, resolver: &R) -> Result<(), CriteriaError> {
    if group.children.is_empty() {
        return Err(CriteriaError::Schema("group without predicates".to_string()));
    }

    for (i, leaf) in group.children.iter().enumerate() {
        if i > 0 {
            push_connective(text, group.operation.keyword());
        }
        text.push_str(&render_leaf(leaf, resolver).await?);
    }

    Ok(())
}

async fn render_leaf<R: NameResolver>(leaf: &Level3, resolver: &R) -> Result<String, CriteriaError> {
    let scope = match leaf.key.key_type {
        KeyType::Identity => AttributeScope::Identity,
        KeyType::Account => AttributeScope::AccountOf(source_name(leaf, resolver).await?),
        KeyType::Entitlement => AttributeScope::EntitlementOf(source_name(leaf, resolver).await?),
    };

    let (op, value) = match &leaf.value {
        LeafValue::Single(value) => (leaf.operation.keyword(), Literal::Single(value.clone())),
        LeafValue::List(values) if values.is_empty() => {
            return Err(CriteriaError::Schema(format!("'{}' has an empty value list", leaf.key.property)));
        }
        LeafValue::List(values) if leaf.operation == ComparisonOperation::Equals => (ComparisonOp::In, Literal::List(values.clone())),
        LeafValue::List(values) => (leaf.operation.keyword(), Literal::List(values.clone())),
    };

    let comparison = ComparisonOperator {
        op,
        attribute: Attribute {
            scope,
            property: leaf.key.attribute_name().to_string(),
        },
        value,
    };

    Ok(comparison.to_string())
}

async fn source_name<R: NameResolver>(leaf: &Level3, resolver: &R) -> Result<String, CriteriaError> {
    let Some(source_id) = leaf.key.source_id.as_deref() else {
        return Err(CriteriaError::Schema(format!("'{}' has no source id", leaf.key.property)));
    };

    resolver
        .resolve(source_id)
        .await
        .map_err(|e| CriteriaError::resolution(source_id, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::criteria_tree::{CriteriaKey, LogicalOperation};
    use crate::resolver::{DirectoryResolver, ResolveError};

    fn names() -> DirectoryResolver {
        DirectoryResolver::from_pairs([("2c91808a", "Active Directory"), ("2c91808b", "O'Brien Systems")])
    }

    fn leaf(key_type: KeyType, property: &str, source_id: Option<&str>, value: LeafValue) -> Level3 {
        Level3 {
            operation: ComparisonOperation::Equals,
            key: CriteriaKey {
                key_type,
                property: format!("attribute.{property}"),
                source_id: source_id.map(ToString::to_string),
            },
            value,
        }
    }

    fn single(value: &str) -> LeafValue {
        LeafValue::Single(value.to_string())
    }

    fn group(operation: LogicalOperation, children: Vec<Level3>) -> Level2 {
        Level2 { operation, children }
    }

    #[tokio::test]
    async fn test_empty_tree_renders_empty_text() {
        let tree = Level1 {
            operation: LogicalOperation::Or,
            children: Vec::new(),
        };
        assert_eq!(render(&tree, &names()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_single_group() {
        let tree = Level1 {
            operation: LogicalOperation::Or,
            children: vec![group(
                LogicalOperation::And,
                vec![
                    leaf(KeyType::Identity, "department", None, single("Accounting")),
                    leaf(KeyType::Entitlement, "memberOf", Some("2c91808a"), single("CN=X")),
                ],
            )],
        };

        assert_eq!(
            render(&tree, &names()).await.unwrap(),
            "identity.department eq 'Accounting' and 'Active Directory'.entitlement.memberOf eq 'CN=X'"
        );
    }

    #[tokio::test]
    async fn test_singleton_groups_join_with_root_connective() {
        let tree = Level1 {
            operation: LogicalOperation::Or,
            children: vec![
                group(LogicalOperation::And, vec![leaf(KeyType::Identity, "a", None, single("1"))]),
                group(LogicalOperation::And, vec![leaf(KeyType::Account, "b", Some("2c91808a"), single("2"))]),
            ],
        };

        assert_eq!(
            render(&tree, &names()).await.unwrap(),
            "identity.a eq '1' or 'Active Directory'.attribute.b eq '2'"
        );
    }

    #[tokio::test]
    async fn test_mixed_groups_are_parenthesized() {
        let tree = Level1 {
            operation: LogicalOperation::Or,
            children: vec![
                group(
                    LogicalOperation::And,
                    vec![
                        leaf(KeyType::Identity, "a", None, single("1")),
                        leaf(KeyType::Identity, "b", None, single("2")),
                    ],
                ),
                group(LogicalOperation::And, vec![leaf(KeyType::Identity, "c", None, single("3"))]),
            ],
        };

        assert_eq!(
            render(&tree, &names()).await.unwrap(),
            "(identity.a eq '1' and identity.b eq '2') or (identity.c eq '3')"
        );
    }

    #[tokio::test]
    async fn test_value_list_renders_with_in() {
        let mut list = leaf(
            KeyType::Identity,
            "location",
            None,
            LeafValue::List(vec!["Berlin".to_string(), "Paris".to_string()]),
        );
        let tree = Level1 {
            operation: LogicalOperation::Or,
            children: vec![group(LogicalOperation::And, vec![list.clone()])],
        };
        assert_eq!(
            render(&tree, &names()).await.unwrap(),
            "identity.location in ('Berlin','Paris')"
        );

        list.operation = ComparisonOperation::NotEquals;
        let tree = Level1 {
            operation: LogicalOperation::Or,
            children: vec![group(LogicalOperation::And, vec![list])],
        };
        assert_eq!(
            render(&tree, &names()).await.unwrap(),
            "identity.location ne ('Berlin','Paris')"
        );
    }

    #[tokio::test]
    async fn test_quotes_are_doubled() {
        let tree = Level1 {
            operation: LogicalOperation::Or,
            children: vec![group(
                LogicalOperation::And,
                vec![leaf(KeyType::Account, "lastName", Some("2c91808b"), single("O'Neil"))],
            )],
        };

        assert_eq!(
            render(&tree, &names()).await.unwrap(),
            "'O''Brien Systems'.attribute.lastName eq 'O''Neil'"
        );
    }

    #[tokio::test]
    async fn test_missing_source_id_is_a_schema_error() {
        let tree = Level1 {
            operation: LogicalOperation::Or,
            children: vec![group(
                LogicalOperation::And,
                vec![leaf(KeyType::Account, "status", None, single("A"))],
            )],
        };

        let err = render(&tree, &names()).await.unwrap_err();
        assert!(matches!(err, CriteriaError::Schema(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_unknown_source_id_is_a_resolution_error() {
        let tree = Level1 {
            operation: LogicalOperation::Or,
            children: vec![group(
                LogicalOperation::And,
                vec![leaf(KeyType::Entitlement, "memberOf", Some("ffff"), single("CN=X"))],
            )],
        };

        let err = render(&tree, &names()).await.unwrap_err();
        assert_eq!(
            err,
            CriteriaError::Resolution {
                name: "ffff".to_string(),
                source: ResolveError::NotFound("ffff".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_empty_group_is_a_schema_error() {
        let tree = Level1 {
            operation: LogicalOperation::And,
            children: vec![
                group(LogicalOperation::Or, Vec::new()),
                group(
                    LogicalOperation::Or,
                    vec![
                        leaf(KeyType::Identity, "a", None, single("1")),
                        leaf(KeyType::Identity, "b", None, single("2")),
                    ],
                ),
            ],
        };

        let err = render(&tree, &names()).await.unwrap_err();
        assert!(matches!(err, CriteriaError::Schema(_)), "{err:?}");
    }
}
