use super::expression::{Attribute, ComparisonOperator, Expression, Literal, LogicalOperator};

/// Depth-first traversal over an expression.
///
/// Each node kind has its own method. The default implementations walk into children in
/// document order, so an implementation only overrides the nodes it cares about.
pub trait Visitor {
    fn visit_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Comparison(comparison) => self.visit_comparison(comparison),
            Expression::Logical(logical) => self.visit_logical(logical),
        }
    }

    fn visit_logical(&mut self, logical: &LogicalOperator) {
        for child in &logical.children {
            self.visit_expression(child);
        }
    }

    fn visit_comparison(&mut self, comparison: &ComparisonOperator) {
        self.visit_attribute(&comparison.attribute);
        self.visit_literal(&comparison.value);
    }

    fn visit_attribute(&mut self, _attribute: &Attribute) {}

    fn visit_literal(&mut self, _literal: &Literal) {}
}

#[derive(Debug, Default)]
struct SourceNames {
    names: Vec<String>,
}

impl Visitor for SourceNames {
    fn visit_attribute(&mut self, attribute: &Attribute) {
        if let Some(source) = attribute.scope.source()
            && !self.names.iter().any(|name| name == source)
        {
            self.names.push(source.to_string());
        }
    }
}

/// The distinct source names referenced by an expression, in document order.
#[must_use]
pub fn source_names(expression: &Expression) -> Vec<String> {
    let mut collector = SourceNames::default();
    collector.visit_expression(expression);
    collector.names
}
