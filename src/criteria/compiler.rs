use super::comparison_operation::ComparisonOperation;
use super::criteria_error::CriteriaError;
use super::criteria_tree::{CriteriaKey, KeyType, LeafValue, Level1, Level2, Level3, LogicalOperation, PROPERTY_PREFIX};
use crate::expr::{AttributeScope, ComparisonOperator, Expression, Literal, LogicalOp, parse};
use crate::resolver::NameResolver;
use strum::Display;

const LOG_TARGET: &str = "  compiler";

/// Deepest logical nesting the three-tier tree can represent.
const MAX_LOGICAL_DEPTH: usize = 2;

/// What kind of membership the criteria tree is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    /// Leaves take a single value or a list of values.
    Role,

    /// Leaves take a single value only.
    Dimension,
}

/// Lowers expressions to criteria trees, resolving source names to source ids on the way.
///
/// Source names are resolved one at a time in document order. Pair the compiler with a
/// [`CachedResolver`](crate::resolver::CachedResolver) so that a source named by many leaves
/// costs one lookup.
#[derive(Debug, Clone)]
pub struct CriteriaCompiler<R> {
    resolver: R,
    variant: Variant,
}

impl<R: NameResolver> CriteriaCompiler<R> {
    pub fn new(resolver: R, variant: Variant) -> Self {
        Self { resolver, variant }
    }

    pub fn role(resolver: R) -> Self {
        Self::new(resolver, Variant::Role)
    }

    pub fn dimension(resolver: R) -> Self {
        Self::new(resolver, Variant::Dimension)
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Compile an expression into a tree with exactly three tiers.
    ///
    /// - A single comparison becomes `OR { AND { leaf } }`.
    /// - One logical level over comparisons becomes a single group wrapped by the complementary
    ///   connective.
    /// - Two logical levels map directly; a bare comparison next to groups becomes a one-leaf group.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::Schema`] for nesting deeper than two logical levels or for a value
    /// list in a dimension, and [`CriteriaError::Resolution`] when a source name cannot be resolved.
    pub async fn compile(&self, expression: &Expression) -> Result<Level1, CriteriaError> {
        let depth = expression.logical_depth();
        if depth > MAX_LOGICAL_DEPTH {
            return Err(CriteriaError::Schema(format!(
                "expression nests {depth} logical levels, at most {MAX_LOGICAL_DEPTH} are supported"
            )));
        }

        match expression {
            Expression::Comparison(comparison) => {
                log::debug!(target: LOG_TARGET, "Compiling single comparison into {} criteria", self.variant);
                Ok(Level1 {
                    operation: LogicalOperation::Or,
                    children: vec![Level2 {
                        operation: LogicalOperation::And,
                        children: vec![self.compile_leaf(comparison).await?],
                    }],
                })
            }

            Expression::Logical(logical) if depth == 1 => {
                log::debug!(
                    target: LOG_TARGET,
                    "Compiling one '{}' level of {} comparisons into {} criteria",
                    logical.op,
                    logical.children.len(),
                    self.variant
                );
                Ok(Level1 {
                    operation: logical.op.complement().into(),
                    children: vec![self.compile_group(logical.op, &logical.children).await?],
                })
            }

            Expression::Logical(logical) => {
                log::debug!(
                    target: LOG_TARGET,
                    "Compiling two levels joined by '{}' ({} groups) into {} criteria",
                    logical.op,
                    logical.children.len(),
                    self.variant
                );

                let mut groups = Vec::with_capacity(logical.children.len());
                for child in &logical.children {
                    let group = match child {
                        Expression::Comparison(comparison) => Level2 {
                            operation: logical.op.complement().into(),
                            children: vec![self.compile_leaf(comparison).await?],
                        },
                        Expression::Logical(inner) => self.compile_group(inner.op, &inner.children).await?,
                    };
                    groups.push(group);
                }

                Ok(Level1 {
                    operation: logical.op.into(),
                    children: groups,
                })
            }
        }
    }

    async fn compile_group(&self, op: LogicalOp, children: &[Expression]) -> Result<Level2, CriteriaError> {
        let mut leaves = Vec::with_capacity(children.len());
        for child in children {
            match child {
                Expression::Comparison(comparison) => leaves.push(self.compile_leaf(comparison).await?),
                Expression::Logical(_) => {
                    return Err(CriteriaError::Schema(format!("group '{child}' is nested too deeply")));
                }
            }
        }

        Ok(Level2 {
            operation: op.into(),
            children: leaves,
        })
    }

    async fn compile_leaf(&self, comparison: &ComparisonOperator) -> Result<Level3, CriteriaError> {
        let attribute = &comparison.attribute;

        let value = match (&comparison.value, self.variant) {
            (Literal::Single(value), _) => LeafValue::Single(value.clone()),
            (Literal::List(values), Variant::Role) => LeafValue::List(values.clone()),
            (Literal::List(_), Variant::Dimension) => {
                return Err(CriteriaError::Schema(format!(
                    "dimension criteria take a single value, found a list in '{comparison}'"
                )));
            }
        };

        let (key_type, source_id) = match &attribute.scope {
            AttributeScope::Identity => (KeyType::Identity, None),
            AttributeScope::AccountOf(source) => (KeyType::Account, Some(self.resolve(source).await?)),
            AttributeScope::EntitlementOf(source) => (KeyType::Entitlement, Some(self.resolve(source).await?)),
        };

        Ok(Level3 {
            operation: ComparisonOperation::from(comparison.op),
            key: CriteriaKey {
                key_type,
                property: format!("{PROPERTY_PREFIX}{}", attribute.property),
                source_id,
            },
            value,
        })
    }

    async fn resolve(&self, source: &str) -> Result<String, CriteriaError> {
        self.resolver
            .resolve(source)
            .await
            .map_err(|e| CriteriaError::resolution(source, e))
    }
}

/// Parse and compile role membership criteria.
///
/// # Errors
///
/// Fails when the text does not parse or the expression cannot be compiled.
pub async fn compile_role<R: NameResolver>(text: &str, resolver: R) -> Result<Level1, CriteriaError> {
    let expression = parse(text)?;
    CriteriaCompiler::role(resolver).compile(&expression).await
}

/// Parse and compile dimension membership criteria.
///
/// # Errors
///
/// Fails when the text does not parse or the expression cannot be compiled.
pub async fn compile_dimension<R: NameResolver>(text: &str, resolver: R) -> Result<Level1, CriteriaError> {
    let expression = parse(text)?;
    CriteriaCompiler::dimension(resolver).compile(&expression).await
}
