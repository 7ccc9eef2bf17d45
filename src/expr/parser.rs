//! Recursive-descent parser for criteria expressions.
//!
//! ```text
//! expression   := ( '(' expression ')' | comparison ) ( logicalOp ( '(' expression ')' | comparison ) )*
//! comparison   := identityComparison | sourceComparison
//! identityComparison := 'identity' '.' token comparisonOp literal
//! sourceComparison   := token '.' ('attribute'|'entitlement') '.' token comparisonOp literal
//! logicalOp    := 'and' | 'or'
//! comparisonOp := 'eq'|'ne'|'co'|'sw'|'ew'|'ge'|'gt'|'lt'|'le'|'nc'|'in'
//! literal      := quotedString | bareToken | '(' csvList ')'
//! ```
//!
//! Keywords are case-insensitive. Every logical operator at one nesting level must be the same
//! keyword; mixing `and` and `or` requires parentheses.

use super::cursor::{Cursor, Token, is_quote};
use super::expression::{Attribute, AttributeScope, ComparisonOperator, Expression, Literal, LogicalOperator};
use super::operators::{ComparisonOp, LogicalOp};
use super::parse_error::ParseError;
use core::str::FromStr;

const LOG_TARGET: &str = "    parser";

/// Parse an expression into its AST.
///
/// A single comparison, possibly parenthesized, is returned as-is without a wrapping logical operator.
pub fn parse(text: &str) -> Result<Expression, ParseError> {
    let expression = parse_expression(&mut Cursor::new(text))?;

    log::trace!(
        target: LOG_TARGET,
        "Parsed {} byte expression with {} logical level(s)",
        text.len(),
        expression.logical_depth()
    );

    Ok(expression)
}

fn parse_expression(cursor: &mut Cursor<'_>) -> Result<Expression, ParseError> {
    let mut children = Vec::new();
    let mut connective: Option<(LogicalOp, String)> = None;
    let mut expecting_operand = true;

    loop {
        cursor.skip_whitespace();
        if cursor.is_at_end() {
            break;
        }

        if expecting_operand {
            children.push(parse_operand(cursor)?);
            expecting_operand = false;
        } else {
            let token = cursor.read_token()?;
            let op = parse_connective(&token)?;

            match connective {
                Some((expected, ref expected_text)) if expected != op => {
                    return Err(ParseError::MixedLogicalOperators {
                        expected: expected_text.clone(),
                        found: token.text,
                        offset: token.offset,
                    });
                }
                Some(_) => {}
                None => connective = Some((op, token.text)),
            }

            expecting_operand = true;
        }
    }

    if expecting_operand && !children.is_empty() {
        return Err(ParseError::DanglingLogicalOperator);
    }

    match (children.len(), connective) {
        (0, _) => Err(ParseError::EmptyExpression),
        (1, _) => Ok(children.swap_remove(0)),
        (_, Some((op, _))) => Ok(Expression::Logical(LogicalOperator { op, children })),
        (_, None) => Err(ParseError::ExpectedLogicalOperator {
            token: String::new(),
            offset: cursor.offset(),
        }),
    }
}

/// Parse a parenthesized sub-expression or a comparison.
fn parse_operand(cursor: &mut Cursor<'_>) -> Result<Expression, ParseError> {
    if cursor.current() == Some('(') {
        _ = cursor.advance();
        let (offset, fragment) = cursor.move_to_closing_parenthesis()?;
        return parse_expression(&mut Cursor::with_offset(fragment, offset));
    }

    let token = cursor.read_token()?;
    if token.is_empty() {
        return Err(unexpected(cursor));
    }

    parse_comparison(cursor, token).map(Expression::Comparison)
}

fn parse_connective(token: &Token) -> Result<LogicalOp, ParseError> {
    if token.quoted {
        return Err(ParseError::ExpectedLogicalOperator {
            token: token.text.clone(),
            offset: token.offset,
        });
    }

    LogicalOp::from_str(&token.text).map_err(|_| ParseError::ExpectedLogicalOperator {
        token: token.text.clone(),
        offset: token.offset,
    })
}

/// Parse the rest of a comparison whose first token has already been read.
fn parse_comparison(cursor: &mut Cursor<'_>, first: Token) -> Result<ComparisonOperator, ParseError> {
    let scope = if first.is_keyword("identity") {
        expect_dot(cursor, &first.text)?;
        AttributeScope::Identity
    } else {
        expect_dot(cursor, &first.text)?;
        let kind = read_word(cursor)?;
        expect_dot(cursor, &kind.text)?;

        if kind.is_keyword("attribute") {
            AttributeScope::AccountOf(first.text)
        } else if kind.is_keyword("entitlement") {
            AttributeScope::EntitlementOf(first.text)
        } else {
            return Err(ParseError::UnknownAttributeKind {
                token: kind.text,
                offset: kind.offset,
            });
        }
    };

    let property = read_word(cursor)?;
    let op = parse_comparison_op(cursor)?;
    let value = parse_literal(cursor)?;

    Ok(ComparisonOperator {
        op,
        attribute: Attribute {
            scope,
            property: property.text,
        },
        value,
    })
}

fn expect_dot(cursor: &mut Cursor<'_>, after: &str) -> Result<(), ParseError> {
    cursor.skip_whitespace();
    if cursor.current() == Some('.') {
        _ = cursor.advance();
        Ok(())
    } else {
        Err(ParseError::MissingSeparator {
            after: after.to_string(),
            offset: cursor.offset(),
        })
    }
}

/// Read a token that must not be empty.
fn read_word(cursor: &mut Cursor<'_>) -> Result<Token, ParseError> {
    let token = cursor.read_token()?;
    if token.is_empty() { Err(unexpected(cursor)) } else { Ok(token) }
}

fn parse_comparison_op(cursor: &mut Cursor<'_>) -> Result<ComparisonOp, ParseError> {
    let token = read_word(cursor)?;
    if token.quoted {
        return Err(ParseError::UnknownOperator {
            token: token.text,
            offset: token.offset,
        });
    }

    ComparisonOp::from_str(&token.text).map_err(|_| ParseError::UnknownOperator {
        token: token.text.clone(),
        offset: token.offset,
    })
}

fn parse_literal(cursor: &mut Cursor<'_>) -> Result<Literal, ParseError> {
    let token = cursor.read_token()?;
    if !token.is_empty() {
        return Ok(Literal::Single(token.text));
    }

    if cursor.current() == Some('(') {
        parse_value_list(cursor).map(Literal::List)
    } else {
        Err(unexpected(cursor))
    }
}

/// Parse `( value, value, ... )` with the cursor on the opening parenthesis.
fn parse_value_list(cursor: &mut Cursor<'_>) -> Result<Vec<String>, ParseError> {
    let open = cursor.offset();
    let mut values = Vec::new();
    _ = cursor.advance();

    loop {
        cursor.skip_whitespace();
        match cursor.current() {
            None => return Err(ParseError::UnmatchedParenthesis { open }),
            Some(')') if values.is_empty() => return Err(ParseError::EmptyValueList { offset: open }),
            Some(quote) if is_quote(quote) => values.push(cursor.read_quoted(quote)?),
            Some(_) => {
                let value = cursor.move_to(|c| c == ',' || c == ')', false)?;
                values.push(value.trim().to_string());
            }
        }

        cursor.skip_whitespace();
        match cursor.current() {
            Some(',') => {
                _ = cursor.advance();
            }
            Some(')') => {
                _ = cursor.advance();
                return Ok(values);
            }
            None => return Err(ParseError::UnmatchedParenthesis { open }),
            Some(_) => return Err(unexpected(cursor)),
        }
    }
}

fn unexpected(cursor: &Cursor<'_>) -> ParseError {
    cursor.current().map_or(ParseError::NoToken, |c| ParseError::UnexpectedToken {
        token: c.to_string(),
        offset: cursor.offset(),
    })
}
